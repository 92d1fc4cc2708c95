/// Display-space to native-space coordinate mapping.
pub mod mapper;
