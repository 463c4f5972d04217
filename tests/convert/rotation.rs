use beatmap_rs::{
    geometry::{legacy_rotation_value, rotation_from_legacy_value},
    prelude::*,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{bag, codes, convert_strict};

fn rotation(time: f64, execution_time: ExecutionTime, rotation: f64) -> RotationEvent {
    RotationEvent {
        time,
        execution_time,
        rotation,
        custom_data: CustomData::new(),
    }
}

fn event(time: f64, event_type: i32, value: i32) -> BasicEvent {
    BasicEvent {
        time,
        event_type,
        value,
        ..BasicEvent::default()
    }
}

#[test]
fn legacy_values_are_bucketed() {
    let values: Vec<_> = [-60.0, -45.0, 0.0, 45.0, 60.0]
        .into_iter()
        .map(legacy_rotation_value)
        .collect();
    assert_eq!(values, vec![3, 3, 4, 5, 6]);
    assert_eq!(legacy_rotation_value(-720.0), 3);
    assert_eq!(legacy_rotation_value(720.0), 6);
}

#[test]
fn legacy_values_decode() {
    assert_eq!(rotation_from_legacy_value(0), Some(-60.0));
    assert_eq!(rotation_from_legacy_value(4), Some(15.0));
    assert_eq!(rotation_from_legacy_value(7), Some(60.0));
    assert_eq!(rotation_from_legacy_value(1000), Some(-360.0));
    assert_eq!(rotation_from_legacy_value(1360), Some(0.0));
    assert_eq!(rotation_from_legacy_value(1720), Some(360.0));
    assert_eq!(rotation_from_legacy_value(8), None);
    assert_eq!(rotation_from_legacy_value(-1), None);
    assert_eq!(rotation_from_legacy_value(1721), None);
}

#[test]
fn downgrade_writes_bucketed_values() {
    let mut source = Difficulty::new("3.2.0");
    source.rotation_events = vec![
        rotation(1.0, ExecutionTime::Early, -60.0),
        rotation(2.0, ExecutionTime::Late, -45.0),
        rotation(3.0, ExecutionTime::Early, 0.0),
        rotation(4.0, ExecutionTime::Late, 45.0),
        rotation(5.0, ExecutionTime::Early, 60.0),
    ];

    let output = convert_strict(&source, TargetVersion::V2);
    let events: Vec<_> = output
        .difficulty
        .basic_events
        .iter()
        .map(|e| (e.time, e.event_type, e.value))
        .collect();
    assert_eq!(
        events,
        vec![
            (1.0, 14, 3),
            (2.0, 15, 3),
            (3.0, 14, 4),
            (4.0, 15, 5),
            (5.0, 14, 6),
        ]
    );
    assert!(output.difficulty.rotation_events.is_empty());
    assert!(
        codes(&output.warnings)
            .iter()
            .all(|code| *code == "rotation-approximated")
    );
    assert_eq!(output.warnings.len(), 5);
}

#[test]
fn upgrade_reads_precise_and_extension_rotations() {
    let mut source = Difficulty::new("2.6.0");
    source.basic_events = vec![
        event(1.0, 14, 1200),
        BasicEvent {
            custom_data: bag(json!({ "_rotation": 22.5 })),
            ..event(2.0, 15, 4)
        },
        event(3.0, 14, 9),
    ];

    let output = convert_strict(&source, TargetVersion::V3);
    let rotations: Vec<_> = output
        .difficulty
        .rotation_events
        .iter()
        .map(|r| (r.time, r.execution_time, r.rotation))
        .collect();
    assert_eq!(
        rotations,
        vec![
            (1.0, ExecutionTime::Early, -160.0),
            (2.0, ExecutionTime::Late, 22.5),
        ]
    );
    assert!(output.difficulty.rotation_events[1].custom_data.is_empty());
    assert!(output.difficulty.basic_events.is_empty());
    assert_eq!(
        output.warnings,
        vec![ConvertWarning::RotationUnrepresentable {
            object: ObjectRef::new(ObjectKind::BasicEvent, 2, 3.0),
            value: 9,
        }]
    );
}

#[test]
fn lane_rotation_accumulates_on_v4_objects() {
    let mut source = Difficulty::new("3.2.0");
    source.rotation_events = vec![
        rotation(2.0, ExecutionTime::Early, 15.0),
        rotation(4.0, ExecutionTime::Late, -45.0),
    ];
    for time in [1.0, 2.0, 3.0, 4.0, 5.0] {
        source.color_notes.push(ColorNote {
            time,
            ..ColorNote::default()
        });
    }
    source.obstacles.push(Obstacle {
        time: 4.0,
        ..Obstacle::default()
    });

    let output = convert_strict(&source, TargetVersion::V4);
    let rotations: Vec<_> = output
        .difficulty
        .color_notes
        .iter()
        .map(|n| n.lane_rotation)
        .collect();
    assert_eq!(rotations, vec![0, 15, 15, 15, -30]);
    assert_eq!(output.difficulty.obstacles[0].lane_rotation, 15);
    assert_eq!(output.difficulty.rotation_events.len(), 2);
}

#[test]
fn fractional_lane_rotation_is_rounded_with_a_warning() {
    let mut source = Difficulty::new("3.2.0");
    source.rotation_events = vec![rotation(1.0, ExecutionTime::Early, 22.5)];
    source.color_notes = vec![
        ColorNote {
            time: 0.5,
            ..ColorNote::default()
        },
        ColorNote {
            time: 2.0,
            ..ColorNote::default()
        },
    ];
    source.arcs.push(Arc {
        time: 1.0,
        tail_time: 3.0,
        tail_lane: 2,
        ..Arc::default()
    });

    let output = convert_strict(&source, TargetVersion::V4);
    let rotations: Vec<_> = output
        .difficulty
        .color_notes
        .iter()
        .map(|n| n.lane_rotation)
        .collect();
    assert_eq!(rotations, vec![0, 23]);
    let arc = &output.difficulty.arcs[0];
    assert_eq!((arc.lane_rotation, arc.tail_lane_rotation), (23, 23));
    let rounded: Vec<_> = output
        .warnings
        .into_iter()
        .filter(|w| matches!(w, ConvertWarning::LaneRotationRounded { .. }))
        .collect();
    assert_eq!(
        rounded,
        vec![
            ConvertWarning::LaneRotationRounded {
                kind: ObjectKind::ColorNote,
                count: 1,
            },
            ConvertWarning::LaneRotationRounded {
                kind: ObjectKind::Arc,
                count: 2,
            },
        ]
    );
}

#[test]
fn lane_rotation_outside_the_rotation_events_is_reported_on_v3() {
    let mut source = Difficulty::new("4.0.0");
    source.rotation_events = vec![rotation(1.0, ExecutionTime::Early, 15.0)];
    source.color_notes = vec![
        ColorNote {
            time: 2.0,
            lane_rotation: 90,
            ..ColorNote::default()
        },
        ColorNote {
            time: 3.0,
            lane_rotation: 15,
            ..ColorNote::default()
        },
    ];
    source.obstacles.push(Obstacle {
        time: 0.5,
        ..Obstacle::default()
    });

    let output = convert_strict(&source, TargetVersion::V3);
    let events: Vec<_> = output
        .difficulty
        .rotation_events
        .iter()
        .map(|e| e.rotation)
        .collect();
    assert_eq!(events, vec![15.0]);
    assert!(
        output
            .difficulty
            .color_notes
            .iter()
            .all(|n| n.lane_rotation == 0)
    );
    let dropped: Vec<_> = output
        .warnings
        .into_iter()
        .filter(|w| matches!(w, ConvertWarning::FieldDropped { field: "r", .. }))
        .collect();
    assert_eq!(
        dropped,
        vec![ConvertWarning::FieldDropped {
            kind: ObjectKind::ColorNote,
            field: "r",
            count: 1,
        }]
    );
}
