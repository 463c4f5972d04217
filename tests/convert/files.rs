use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{codes, convert_strict};

fn load(source: &str) -> Difficulty {
    match Difficulty::from_json(source) {
        Ok(difficulty) => difficulty,
        Err(e) => panic!("failed to load: {e}"),
    }
}

#[test]
fn v2_noodle_map_to_v3() {
    let source = load(include_str!("../files/v2_noodle.dat"));
    let output = convert_strict(&source, TargetVersion::V3);
    assert!(output.warnings.is_empty());
    let difficulty = &output.difficulty;

    let notes: Vec<_> = difficulty.color_notes.iter().map(|n| n.time).collect();
    assert_eq!(notes, vec![2.0, 4.0]);
    assert_eq!(
        difficulty.color_notes[1].custom_data,
        json!({ "color": [1, 0, 0], "track": "notes" })
            .as_object()
            .cloned()
            .unwrap()
    );
    assert_eq!(difficulty.bomb_notes.len(), 1);
    assert_eq!(difficulty.obstacles.len(), 2);
    assert_eq!(difficulty.basic_events.len(), 1);
    assert_eq!(difficulty.color_boost_events.len(), 1);
    let rotations: Vec<_> = difficulty
        .rotation_events
        .iter()
        .map(|r| (r.time, r.execution_time, r.rotation))
        .collect();
    assert_eq!(
        rotations,
        vec![
            (2.0, ExecutionTime::Early, 15.0),
            (3.0, ExecutionTime::Late, 45.0),
        ]
    );
    assert_eq!(difficulty.bpm_events[0].bpm, 150.0);

    let custom_data = &difficulty.custom_data;
    let fakes = &custom_data["fakeColorNotes"];
    assert_eq!(fakes.as_array().map(Vec::len), Some(1));
    assert_eq!(fakes[0]["b"], json!(5.0));
    assert_eq!(fakes[0]["customData"], json!({ "uninteractable": true }));
    assert_eq!(custom_data["environment"][0]["position"], json!([6.0, 3.0, 0.0]));
    assert_eq!(
        custom_data["customEvents"][0]["d"]["position"],
        json!([[0.0, 0.0, 0.0, 0], [6.0, 0.0, 0.0, 1]])
    );
    assert_eq!(custom_data["bookmarks"], json!([{ "b": 8, "n": "drop" }]));
}

#[test]
fn v2_noodle_map_survives_the_v3_wire() {
    let source = load(include_str!("../files/v2_noodle.dat"));
    let output = convert_strict(&source, TargetVersion::V3);
    let value = output.difficulty.to_json_value().unwrap();
    assert_eq!(value["version"], json!("3.2.0"));
    let wire = WireDifficulty::from_value(value).unwrap();
    assert_eq!(Difficulty::from_wire(&wire), output.difficulty);
}

#[test]
fn v2_noodle_map_back_to_v2() {
    let source = load(include_str!("../files/v2_noodle.dat"));
    let upgraded = convert_strict(&source, TargetVersion::V3);
    let output = convert_strict(&upgraded.difficulty, TargetVersion::V2);
    let difficulty = &output.difficulty;

    assert_eq!(difficulty.color_notes.len(), 3);
    let fake = &difficulty.color_notes[2];
    assert_eq!(fake.time, 5.0);
    assert_eq!(fake.custom_data["_fake"], json!(true));
    assert_eq!(fake.custom_data["_interactable"], json!(false));
    assert_eq!(
        difficulty.custom_data["_environment"],
        source.custom_data["_environment"]
            .as_array()
            .map(|entries| {
                let mut entry = entries[0].clone();
                entry["_position"] = json!([10.0, 5.0, 0.0]);
                json!([entry])
            })
            .unwrap()
    );
    let rotations: Vec<_> = difficulty
        .basic_events
        .iter()
        .filter(|e| e.is_lane_rotation_event())
        .map(|e| (e.event_type, e.value))
        .collect();
    assert_eq!(rotations, vec![(14, 5), (15, 5)]);
    assert_eq!(
        codes(&output.warnings),
        vec!["rotation-approximated", "rotation-approximated"]
    );
}

#[test]
fn v3_lightshow_map_to_v2_and_v4() {
    let source = load(include_str!("../files/v3_lightshow.dat"));
    assert_eq!(source.arcs.len(), 1);
    assert_eq!(source.chains.len(), 1);
    assert_eq!(source.color_notes[0].angle_offset, 45);

    let v2 = convert_strict(&source, TargetVersion::V2);
    assert_eq!(v2.difficulty.arcs.len(), 1);
    assert!(v2.difficulty.chains.is_empty());
    assert!(v2.difficulty.light_color_event_box_groups.is_empty());
    assert_eq!(
        codes(&v2.warnings),
        vec!["field-dropped", "objects-dropped", "objects-dropped"]
    );

    let v4 = convert_strict(&source, TargetVersion::V4);
    assert_eq!(v4.difficulty.chains.len(), 1);
    assert_eq!(v4.difficulty.light_color_event_box_groups.len(), 1);
    assert!(v4.difficulty.bpm_events.is_empty());
    assert!(!v4.difficulty.use_normal_events_as_compatible_events);
    assert_eq!(codes(&v4.warnings), vec!["objects-dropped"]);
}

#[test]
fn v4_files_to_v3_and_v2() {
    let wire = WireDifficulty::from_json_v4(
        include_str!("../files/v4_beatmap.dat"),
        include_str!("../files/v4_lightshow.dat"),
    )
    .unwrap();
    let source = Difficulty::from_wire(&wire);
    assert_eq!(source.color_notes.len(), 3);
    assert_eq!(source.color_notes[1].angle_offset, 15);
    assert_eq!(source.basic_events.len(), 1);
    assert_eq!(source.color_boost_events.len(), 1);

    let v3 = convert_strict(&source, TargetVersion::V3);
    assert!(v3.warnings.is_empty());
    let rotations: Vec<_> = v3
        .difficulty
        .rotation_events
        .iter()
        .map(|r| (r.time, r.execution_time, r.rotation))
        .collect();
    assert_eq!(
        rotations,
        vec![
            (2.0, ExecutionTime::Early, 15.0),
            (4.0, ExecutionTime::Early, -30.0),
        ]
    );
    assert!(v3.difficulty.color_notes.iter().all(|n| n.lane_rotation == 0));

    let v2 = convert_strict(&source, TargetVersion::V2);
    assert_eq!(
        codes(&v2.warnings),
        vec!["field-dropped", "rotation-approximated", "rotation-approximated"]
    );
    assert_eq!(v2.difficulty.basic_events.len(), 4);
}

#[test]
fn v1_file_to_v3() {
    let source = load(include_str!("../files/v1_legacy.dat"));
    assert_eq!(
        source.legacy_info.as_ref().map(|info| info.beats_per_minute),
        Some(128.0)
    );
    assert_eq!(source.custom_data["_time"], json!(42.5));

    let output = convert_strict(&source, TargetVersion::V3);
    assert_eq!(output.warnings, vec![ConvertWarning::LegacyInfoDropped]);
    let difficulty = &output.difficulty;
    assert_eq!(difficulty.color_notes.len(), 2);
    assert_eq!(difficulty.bomb_notes.len(), 1);
    assert_eq!(
        difficulty.obstacles.iter().map(|o| (o.row, o.height)).collect::<Vec<_>>(),
        vec![(2, 3)]
    );
    assert_eq!(difficulty.custom_data["time"], json!(42.5));
    assert!(difficulty.basic_events.iter().all(|e| e.float_value == 1.0));
}
