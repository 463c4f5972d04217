use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::bag;

#[test]
fn key_style_follows_the_major_version() {
    assert_eq!(Difficulty::new("1.5.0").key_style(), KeyStyle::Legacy);
    assert_eq!(Difficulty::new("2.2.0").key_style(), KeyStyle::Legacy);
    assert_eq!(Difficulty::new("3.0.0").key_style(), KeyStyle::Modern);
    assert_eq!(Difficulty::new("4.0.0").key_style(), KeyStyle::Modern);
    assert_eq!(Difficulty::new("").key_style(), KeyStyle::Legacy);
}

#[test]
fn sorting_covers_every_collection() {
    let mut difficulty = Difficulty::new("3.2.0");
    difficulty.obstacles = vec![
        Obstacle {
            time: 3.0,
            ..Obstacle::default()
        },
        Obstacle {
            time: 1.0,
            ..Obstacle::default()
        },
    ];
    difficulty.rotation_events = vec![
        RotationEvent {
            time: 9.0,
            ..RotationEvent::default()
        },
        RotationEvent {
            time: 4.0,
            ..RotationEvent::default()
        },
    ];
    difficulty.light_color_event_box_groups = vec![
        LightColorEventBoxGroup {
            time: 2.0,
            ..LightColorEventBoxGroup::default()
        },
        LightColorEventBoxGroup {
            time: 0.0,
            ..LightColorEventBoxGroup::default()
        },
    ];
    assert!(!difficulty.is_sorted());
    difficulty.sort();
    assert!(difficulty.is_sorted());
    assert_eq!(difficulty.rotation_events[0].time, 4.0);
    assert_eq!(difficulty.light_color_event_box_groups[1].time, 2.0);
}

#[test]
fn mirroring_notes() {
    let mut note = ColorNote {
        lane: 0,
        color: 0,
        direction: 6,
        angle_offset: 15,
        ..ColorNote::default()
    };
    note.mirror(true);
    assert_eq!(
        (note.lane, note.color, note.direction, note.angle_offset),
        (3, 1, 7, -15)
    );
    assert_eq!(note.angle(), 45.0 - 15.0);
}

#[test]
fn mirroring_precise_lanes() {
    let mut note = ColorNote {
        lane: 1500,
        ..ColorNote::default()
    };
    assert_eq!(note.position(), (-1.5, 0.0));
    note.mirror(false);
    assert_eq!(note.lane, 3500);
    assert_eq!(note.position(), (0.5, 0.0));
    note.mirror(false);
    assert_eq!(note.lane, 1500);

    let mut bomb = BombNote {
        lane: -1500,
        ..BombNote::default()
    };
    bomb.mirror();
    assert_eq!(bomb.lane, 4500);
    assert_eq!(bomb.position(), (1.5, 0.0));

    let mut wall = Obstacle {
        lane: 1500,
        width: 2000,
        ..Obstacle::default()
    };
    wall.mirror();
    assert_eq!(wall.lane, 3500);
}

#[test]
fn mirroring_obstacle_coordinates() {
    let mut wall = Obstacle {
        custom_data: bag(json!({
            "coordinates": [-2, 0],
            "animation": {
                "definitePosition": [[-2, 0, 0, 0], [0, 0, 0, 1]],
                "offsetPosition": [1, 0, 0],
            },
        })),
        ..Obstacle::default()
    };
    wall.mirror();
    assert_eq!(wall.lane, 3);
    assert_eq!(
        wall.custom_data,
        bag(json!({
            "coordinates": [1.0, 0],
            "animation": {
                "definitePosition": [[1.0, 0, 0, 0], [-1.0, 0, 0, 1]],
                "offsetPosition": [-1.0, 0, 0],
            },
        }))
    );

    let mut wide = Obstacle {
        custom_data: bag(json!({ "_position": [-2, 0], "_scale": [2, 1] })),
        ..Obstacle::default()
    };
    wide.mirror();
    assert_eq!(wide.custom_data["_position"], json!([0.0, 0]));
}

#[test]
fn mirroring_arcs_and_chains() {
    let mut arc = Arc {
        lane: 0,
        tail_lane: 2,
        direction: 2,
        mid_anchor: 1,
        custom_data: bag(json!({ "coordinates": [-2, 0], "tailCoordinates": [0, 1] })),
        ..Arc::default()
    };
    arc.mirror(true);
    assert_eq!(
        (arc.lane, arc.tail_lane, arc.color, arc.direction, arc.mid_anchor),
        (3, 1, 1, 3, 2)
    );
    assert_eq!(
        arc.custom_data,
        bag(json!({ "coordinates": [1.0, 0], "tailCoordinates": [-1.0, 1] }))
    );

    let mut chain = Chain {
        lane: 1000,
        tail_lane: 2,
        custom_data: bag(json!({ "animation": { "offsetPosition": "sway" } })),
        ..Chain::default()
    };
    chain.mirror(false);
    assert_eq!((chain.lane, chain.tail_lane), (4000, 1));
    assert_eq!(
        chain.custom_data,
        bag(json!({ "animation": { "offsetPosition": "sway" } }))
    );
}

#[test]
fn object_refs_display() {
    assert_eq!(
        ObjectRef::new(ObjectKind::ColorNote, 3, 1.5).to_string(),
        "color note #3 at beat 1.5"
    );
    assert_eq!(
        ObjectRef::untimed(ObjectKind::Environment, 0).to_string(),
        "environment entry #0"
    );
}
