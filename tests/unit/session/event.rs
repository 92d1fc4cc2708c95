use super::*;

#[test]
fn tagged_events_parse_from_json() {
    let ev = EditorEvent::from_json(r#"{"type":"aspect_ratio_selected","ratio":"16/9"}"#).unwrap();
    assert!(matches!(
        ev,
        EditorEvent::AspectRatioSelected {
            ratio: AspectRatio::Ratio { num: 16, den: 9 }
        }
    ));

    let ev = EditorEvent::from_json(r#"{"type":"export_requested","format":"webp"}"#).unwrap();
    assert!(matches!(
        ev,
        EditorEvent::ExportRequested {
            format: ExportFormat::Webp
        }
    ));

    let ev = EditorEvent::from_json(r#"{"type":"tool_selected","tool":"straight"}"#).unwrap();
    assert!(matches!(
        ev,
        EditorEvent::ToolSelected {
            tool: Some(Tool::Straight)
        }
    ));

    let ev =
        EditorEvent::from_json(r#"{"type":"preset_selected","width":1920,"height":1080}"#).unwrap();
    assert!(matches!(
        ev,
        EditorEvent::PresetSelected {
            width: 1920,
            height: 1080
        }
    ));

    assert!(matches!(
        EditorEvent::from_json(r#"{"type":"crop_requested"}"#).unwrap(),
        EditorEvent::CropRequested
    ));
}

#[test]
fn pointer_events_round_trip_through_json() {
    let original = EditorEvent::PenPressed {
        at: Point::new(12.5, 7.25),
    };
    let json = serde_json::to_string(&original).unwrap();
    let back = EditorEvent::from_json(&json).unwrap();
    let EditorEvent::PenPressed { at } = back else {
        panic!("wrong variant: {back:?}");
    };
    assert_eq!(at, Point::new(12.5, 7.25));

    let release = EditorEvent::PenReleased { at: None };
    let json = serde_json::to_string(&release).unwrap();
    assert!(matches!(
        EditorEvent::from_json(&json).unwrap(),
        EditorEvent::PenReleased { at: None }
    ));
}

#[test]
fn malformed_json_is_invalid_input() {
    assert!(matches!(
        EditorEvent::from_json("not json"),
        Err(EditorError::InvalidInput(_))
    ));
    assert!(matches!(
        EditorEvent::from_json(r#"{"type":"no_such_event"}"#),
        Err(EditorError::InvalidInput(_))
    ));
    assert!(matches!(
        EditorEvent::from_json(r#"{"type":"aspect_ratio_selected","ratio":"0/0"}"#),
        Err(EditorError::InvalidInput(_))
    ));
}
