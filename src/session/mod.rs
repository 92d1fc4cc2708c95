/// Session-oriented editor API orchestrating crop, mask and annotations.
pub mod editor_session;
/// Editor events consumed by a session.
pub mod event;
/// Named resolution presets for aspect ratios.
pub mod presets;
