use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{bag, codes, convert_strict};

fn unsorted_v3() -> Difficulty {
    let mut source = Difficulty::new("3.2.0");
    for time in [4.0, 1.0, 3.0, 2.0] {
        source.color_notes.push(ColorNote {
            time,
            direction: 1,
            ..ColorNote::default()
        });
        source.basic_events.push(BasicEvent {
            time,
            event_type: 1,
            value: 1,
            ..BasicEvent::default()
        });
    }
    source.color_boost_events = vec![
        ColorBoostEvent {
            time: 3.0,
            toggle: true,
            custom_data: CustomData::new(),
        },
        ColorBoostEvent {
            time: 0.5,
            toggle: false,
            custom_data: CustomData::new(),
        },
    ];
    source.bpm_events.push(BpmEvent {
        time: 2.5,
        bpm: 140.0,
        custom_data: CustomData::new(),
    });
    source
}

#[test]
fn every_target_comes_out_sorted() {
    let source = unsorted_v3();
    assert!(!source.is_sorted());
    for target in [
        TargetVersion::V1,
        TargetVersion::V2,
        TargetVersion::V3,
        TargetVersion::V4,
    ] {
        let output = convert_strict(&source, target);
        assert!(output.difficulty.is_sorted(), "{target} is not sorted");
        assert_eq!(output.difficulty.version, target.version_string());
    }
}

#[test]
fn boosts_and_bpm_changes_fold_into_v2_events() {
    let output = convert_strict(&unsorted_v3(), TargetVersion::V2);
    let special: Vec<_> = output
        .difficulty
        .basic_events
        .iter()
        .filter(|e| e.event_type != 1)
        .map(|e| (e.time, e.event_type, e.value, e.float_value))
        .collect();
    assert_eq!(
        special,
        vec![(0.5, 5, 0, 1.0), (2.5, 100, 1, 140.0), (3.0, 5, 1, 1.0)]
    );
    assert!(output.difficulty.color_boost_events.is_empty());
    assert!(output.difficulty.bpm_events.is_empty());

    let back = convert_strict(&output.difficulty, TargetVersion::V3);
    assert_eq!(back.difficulty.color_boost_events.len(), 2);
    assert_eq!(back.difficulty.bpm_events[0].bpm, 140.0);
    assert_eq!(back.difficulty.basic_events.len(), 4);
    assert!(back.difficulty.use_normal_events_as_compatible_events);
}

#[test]
fn v1_keeps_only_what_it_can_hold() {
    let mut source = unsorted_v3();
    source.obstacles = vec![
        Obstacle {
            time: 1.0,
            row: 0,
            height: 5,
            ..Obstacle::default()
        },
        Obstacle {
            time: 2.0,
            row: 2,
            height: 3,
            ..Obstacle::default()
        },
        Obstacle {
            time: 3.0,
            row: 1,
            height: 2,
            ..Obstacle::default()
        },
    ];
    source.arcs.push(Arc {
        time: 1.0,
        tail_time: 2.0,
        tail_lane: 3,
        ..Arc::default()
    });
    source.custom_data = bag(json!({ "bookmarks": [{ "b": 4, "n": "end" }], "time": 12.5 }));

    let output = convert_strict(&source, TargetVersion::V1);
    let difficulty = &output.difficulty;
    assert_eq!(difficulty.version, "1.5.0");
    assert!(difficulty.arcs.is_empty());
    assert!(difficulty.color_boost_events.is_empty());
    assert!(difficulty.bpm_events.is_empty());
    assert_eq!(difficulty.legacy_info, Some(LegacyInfo::default()));
    let placements: Vec<_> = difficulty.obstacles.iter().map(|o| (o.row, o.height)).collect();
    assert_eq!(placements, vec![(0, 5), (2, 3), (0, 5)]);
    assert_eq!(
        difficulty.custom_data,
        bag(json!({ "_bookmarks": [{ "_time": 4, "_name": "end" }], "_time": 12.5 }))
    );
    let codes = codes(&output.warnings);
    assert!(codes.contains(&"obstacle-approximated"));
    assert!(codes.contains(&"objects-dropped"));

    let value = difficulty.to_json_value().unwrap();
    let types: Vec<_> = value["_obstacles"]
        .as_array()
        .into_iter()
        .flatten()
        .map(|o| o["_type"].as_i64())
        .collect();
    assert_eq!(types, vec![Some(0), Some(1), Some(0)]);
}

#[test]
fn v1_upgrade_forgets_root_timing() {
    let mut source = Difficulty::new("1.5.0");
    source.legacy_info = Some(LegacyInfo {
        beats_per_minute: 174.0,
        ..LegacyInfo::default()
    });
    source.bomb_notes.push(BombNote::default());
    let output = convert_strict(&source, TargetVersion::V4);
    assert_eq!(output.difficulty.legacy_info, None);
    assert_eq!(output.difficulty.bomb_notes.len(), 1);
    assert_eq!(output.warnings, vec![ConvertWarning::LegacyInfoDropped]);
}

#[test]
fn v4_light_transitions_are_approximated_for_v3() {
    let mut source = Difficulty::new("4.0.0");
    source.light_color_event_box_groups.push(LightColorEventBoxGroup {
        time: 2.0,
        boxes: vec![LightColorEventBox {
            events: vec![
                LightColorEvent {
                    easing: 3,
                    ..LightColorEvent::default()
                },
                LightColorEvent::default(),
            ],
            ..LightColorEventBox::default()
        }],
        ..LightColorEventBoxGroup::default()
    });

    let output = convert_strict(&source, TargetVersion::V3);
    assert_eq!(codes(&output.warnings), vec!["light-transition-approximated"]);
    let events = &output.difficulty.light_color_event_box_groups[0].boxes[0].events;
    assert!(events.iter().all(LightColorEvent::has_exact_transition));
}
