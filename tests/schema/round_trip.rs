use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{common_difficulty, parse};

fn through_json(difficulty: &Difficulty) -> Difficulty {
    let text = difficulty.to_json_value().unwrap().to_string();
    Difficulty::from_json(&text).unwrap()
}

#[test]
fn v2_round_trip() {
    let mut difficulty = common_difficulty("2.6.0");
    difficulty.basic_events.push(BasicEvent {
        time: 0.0,
        event_type: 2,
        value: 5,
        float_value: 0.5,
        custom_data: json!({ "_color": [1, 0, 0, 1] }).as_object().cloned().unwrap(),
    });
    difficulty.waypoints.push(Waypoint {
        time: 2.0,
        lane: 1,
        direction: 4,
        ..Waypoint::default()
    });
    difficulty.custom_data = json!({ "_bookmarks": [] }).as_object().cloned().unwrap();
    assert_eq!(through_json(&difficulty), difficulty);
}

#[test]
fn v3_round_trip() {
    let mut difficulty = common_difficulty("3.2.0");
    difficulty.color_notes[0].angle_offset = 30;
    difficulty.chains.push(Chain {
        time: 2.0,
        tail_time: 2.25,
        tail_row: 2,
        slice_count: 5,
        squish: 0.75,
        ..Chain::default()
    });
    difficulty.color_boost_events.push(ColorBoostEvent {
        time: 8.0,
        toggle: true,
        custom_data: CustomData::new(),
    });
    difficulty.rotation_events.push(RotationEvent {
        time: 4.0,
        execution_time: ExecutionTime::Late,
        rotation: -15.0,
        custom_data: CustomData::new(),
    });
    difficulty.bpm_events.push(BpmEvent {
        time: 0.0,
        bpm: 128.0,
        custom_data: CustomData::new(),
    });
    difficulty.keyword_events.push(KeywordEvents {
        keyword: "drop".to_owned(),
        events: vec![0, 4],
    });
    difficulty.use_normal_events_as_compatible_events = true;
    assert_eq!(through_json(&difficulty), difficulty);
}

#[test]
fn v4_round_trip() {
    let mut difficulty = common_difficulty("4.0.0");
    difficulty.color_notes[1].lane_rotation = 15;
    difficulty.obstacles[1].lane_rotation = 15;
    difficulty.rotation_events.push(RotationEvent {
        time: 2.0,
        execution_time: ExecutionTime::Early,
        rotation: 15.0,
        custom_data: CustomData::new(),
    });
    difficulty.basic_events.push(BasicEvent {
        time: 0.0,
        event_type: 4,
        value: 1,
        ..BasicEvent::default()
    });

    let files = match difficulty.to_wire().unwrap() {
        WireDifficulty::V4(files) => files,
        other => panic!("expected 4.x files, got {}", other.version()),
    };
    let beatmap = serde_json::to_string(&files.difficulty).unwrap();
    let lightshow = serde_json::to_string(&files.lightshow).unwrap();
    let wire = WireDifficulty::from_json_v4(&beatmap, &lightshow).unwrap();
    assert_eq!(Difficulty::from_wire(&wire), difficulty);
}

#[test]
fn v1_round_trip_keeps_editor_metadata() {
    let source = include_str!("../files/v1_legacy.dat");
    let difficulty = Difficulty::from_json(source).unwrap();
    let written = difficulty.to_json_value().unwrap();
    assert_eq!(written["_time"], json!(42.5));
    assert_eq!(written["_beatsPerMinute"], json!(128.0));
    assert_eq!(written["_notes"].as_array().map(Vec::len), Some(3));
    assert_eq!(Difficulty::from_json(&written.to_string()).unwrap(), difficulty);
    assert_eq!(
        parse(source)["_obstacles"][0]["_type"],
        written["_obstacles"][0]["_type"]
    );
}
