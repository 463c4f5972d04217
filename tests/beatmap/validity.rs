use beatmap_rs::prelude::*;
use serde_json::json;

use super::bag;

#[test]
fn vanilla_objects_are_valid() {
    let difficulty = Difficulty::from_json(include_str!("../files/v3_lightshow.dat")).unwrap();
    let style = difficulty.key_style();
    assert!(difficulty.color_notes.iter().all(|n| n.is_valid(style)));
    assert!(difficulty.bomb_notes.iter().all(|b| b.is_valid(style)));
    assert!(difficulty.obstacles.iter().all(|o| o.is_valid(style)));
    assert!(difficulty.arcs.iter().all(|a| a.is_valid(style)));
    assert!(difficulty.chains.iter().all(|c| c.is_valid(style)));
    assert!(difficulty.basic_events.iter().all(|e| e.is_valid(style)));
    assert!(difficulty.bpm_events.iter().all(|e| e.is_valid(style)));
    assert!(
        difficulty
            .light_color_event_box_groups
            .iter()
            .all(|g| g.is_valid(style))
    );
}

#[test]
fn out_of_range_fields_are_invalid() {
    let note = ColorNote {
        color: 2,
        ..ColorNote::default()
    };
    assert!(!note.is_valid(KeyStyle::Modern));
    let note = ColorNote {
        direction: 9,
        ..ColorNote::default()
    };
    assert!(!note.is_valid(KeyStyle::Modern));
    let wall = Obstacle {
        duration: 0.0,
        ..Obstacle::default()
    };
    assert!(!wall.is_valid(KeyStyle::Modern));
    let wall = Obstacle {
        width: 5,
        ..Obstacle::default()
    };
    assert!(!wall.is_valid(KeyStyle::Modern));
    let bpm = BpmEvent {
        time: 0.0,
        bpm: 0.0,
        custom_data: CustomData::new(),
    };
    assert!(!bpm.is_valid(KeyStyle::Modern));
}

#[test]
fn inverse_and_degenerate_arcs_are_invalid() {
    let inverse = Arc {
        time: 2.0,
        tail_time: 1.0,
        tail_lane: 2,
        ..Arc::default()
    };
    assert!(!inverse.is_valid(KeyStyle::Modern));
    let degenerate = Arc {
        time: 1.0,
        tail_time: 2.0,
        ..Arc::default()
    };
    assert!(!degenerate.is_valid(KeyStyle::Modern));
    let chain = Chain {
        time: 1.0,
        tail_time: 1.5,
        tail_row: 2,
        slice_count: 0,
        ..Chain::default()
    };
    assert!(!chain.is_valid(KeyStyle::Modern));
}

#[test]
fn extension_data_is_not_vanilla() {
    let chroma = ColorNote {
        custom_data: bag(json!({ "_color": [1, 0, 0] })),
        ..ColorNote::default()
    };
    assert!(!chroma.is_valid(KeyStyle::Legacy));
    assert!(chroma.is_valid(KeyStyle::Modern));

    let light = BasicEvent {
        event_type: 1,
        value: 3,
        custom_data: bag(json!({ "_lightID": [1, 2] })),
        ..BasicEvent::default()
    };
    assert!(!light.is_valid(KeyStyle::Legacy));

    let waypoint = Waypoint {
        lane: 4,
        ..Waypoint::default()
    };
    assert!(!waypoint.is_valid(KeyStyle::Modern));
}
