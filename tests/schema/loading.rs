use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn versions_are_detected() {
    let cases = [
        (include_str!("../files/v1_legacy.dat"), "1.5.0"),
        (include_str!("../files/v2_noodle.dat"), "2.6.0"),
        (include_str!("../files/v3_lightshow.dat"), "3.2.0"),
        (include_str!("../files/v4_beatmap.dat"), "4.0.0"),
    ];
    for (source, version) in cases {
        let wire = WireDifficulty::from_json(source).unwrap();
        assert_eq!(wire.version(), version);
        assert_eq!(Difficulty::from_wire(&wire).version, version);
    }
}

#[test]
fn documents_without_version_are_2_x() {
    let difficulty = Difficulty::from_json(r#"{"_notes":[{"_time":1,"_type":3}]}"#).unwrap();
    assert_eq!(difficulty.major_version(), Some(2));
    assert_eq!(difficulty.bomb_notes.len(), 1);
}

#[test]
fn loading_sorts_by_time() {
    let difficulty = Difficulty::from_json(include_str!("../files/v2_noodle.dat")).unwrap();
    assert!(difficulty.is_sorted());
    let times: Vec<_> = difficulty.color_notes.iter().map(|n| n.time).collect();
    assert_eq!(times, vec![2.0, 4.0, 5.0]);
}

#[test]
fn missing_fields_take_defaults() {
    let difficulty = Difficulty::from_json(
        r#"{"version":"3.2.0","obstacles":[{"b":2}],"basicBeatmapEvents":[{"b":1,"et":4}]}"#,
    )
    .unwrap();
    let obstacle = &difficulty.obstacles[0];
    assert_eq!(
        (obstacle.time, obstacle.duration, obstacle.width, obstacle.height),
        (2.0, 1.0, 1, 5)
    );
    assert_eq!(difficulty.basic_events[0].float_value, 1.0);
}

#[test]
fn extension_values_are_kept() {
    let difficulty = Difficulty::from_json(
        r#"{"_version":"2.6.0","_notes":[{"_time":1,"_lineIndex":1500,"_lineLayer":-2000,"_type":0,"_cutDirection":1180}]}"#,
    )
    .unwrap();
    let note = &difficulty.color_notes[0];
    assert_eq!((note.lane, note.row, note.direction), (1500, -2000, 1180));
    assert!(!note.is_valid(KeyStyle::Legacy));
    assert_eq!(note.dialects(KeyStyle::Legacy), vec![Dialect::MappingExtensions]);
}

#[test]
fn load_errors() {
    assert!(matches!(
        Difficulty::from_json("{"),
        Err(LoadError::Json(_))
    ));
    assert!(matches!(
        Difficulty::from_json("42"),
        Err(LoadError::NotAnObject)
    ));
    assert!(matches!(
        Difficulty::from_json(r#"{"version":"7.1.0"}"#),
        Err(LoadError::UnsupportedVersion(version)) if version == "7.1.0"
    ));
    match Difficulty::from_json(r#"{"_version":"2.6.0","_events":[{"_time":"soon"}]}"#) {
        Err(LoadError::Field { path, .. }) => assert_eq!(path, "_events[0]._time"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn unsupported_versions_cannot_be_saved() {
    let difficulty = Difficulty::new("9.0.0");
    assert!(matches!(
        difficulty.to_json_value(),
        Err(LoadError::UnsupportedVersion(_))
    ));
}

#[test]
fn empty_custom_data_is_not_written() {
    let difficulty = Difficulty::new("3.2.0");
    let value = difficulty.to_json_value().unwrap();
    assert_eq!(value.get("customData"), None);
    assert_eq!(value["colorNotes"], json!([]));
    assert_eq!(value["useNormalEventsAsCompatibleEvents"], json!(false));
}
