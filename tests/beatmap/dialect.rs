use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::bag;

#[test]
fn trigger_keys_depend_on_key_style() {
    let legacy = ColorNote {
        custom_data: bag(json!({ "_color": [1, 0, 0], "_position": [0, 1] })),
        ..ColorNote::default()
    };
    assert_eq!(
        legacy.dialects(KeyStyle::Legacy),
        vec![Dialect::Chroma, Dialect::NoodleExtensions]
    );
    assert!(legacy.dialects(KeyStyle::Modern).is_empty());

    let modern = ColorNote {
        custom_data: bag(json!({ "coordinates": [0, 1] })),
        ..ColorNote::default()
    };
    assert_eq!(modern.dialects(KeyStyle::Modern), vec![Dialect::NoodleExtensions]);
    assert!(modern.dialects(KeyStyle::Legacy).is_empty());
}

#[test]
fn value_shape_matters() {
    let note = ColorNote {
        custom_data: bag(json!({ "color": "red", "track": 3 })),
        ..ColorNote::default()
    };
    assert!(note.dialects(KeyStyle::Modern).is_empty());
}

#[test]
fn mapping_extensions_is_read_from_positions() {
    let wide_wall = Obstacle {
        width: 1500,
        ..Obstacle::default()
    };
    assert_eq!(
        wide_wall.dialects(KeyStyle::Modern),
        vec![Dialect::MappingExtensions]
    );
    let precise_note = ColorNote {
        direction: 1090,
        ..ColorNote::default()
    };
    assert!(precise_note.has_mapping_extensions());
    let rotation = BasicEvent {
        event_type: 15,
        value: 1400,
        ..BasicEvent::default()
    };
    assert!(rotation.has_mapping_extensions());
    let light = BasicEvent {
        event_type: 1,
        value: 1400,
        ..BasicEvent::default()
    };
    assert!(!light.has_mapping_extensions());
}

#[test]
fn dialects_only_grow_when_keys_are_added() {
    let additions = [
        ("_color", json!([0, 0, 1])),
        ("_track", json!("t")),
        ("_animation", json!({ "_dissolve": [[0, 0]] })),
        ("_fake", json!(true)),
        ("_unknown", json!(1)),
    ];
    let mut obstacle = Obstacle::default();
    let mut previous = obstacle.dialects(KeyStyle::Legacy);
    for (key, value) in additions {
        obstacle.custom_data.insert(key.to_owned(), value);
        let current = obstacle.dialects(KeyStyle::Legacy);
        assert!(
            previous.iter().all(|dialect| current.contains(dialect)),
            "adding `{key}` removed a dialect"
        );
        previous = current;
    }
    assert_eq!(previous, vec![Dialect::Chroma, Dialect::NoodleExtensions]);
}

#[test]
fn difficulty_dialects_cover_objects_and_root_data() {
    let mut difficulty = Difficulty::new("3.2.0");
    assert!(difficulty_dialects(&difficulty).is_empty());

    difficulty.custom_data = bag(json!({ "environment": [] }));
    assert_eq!(difficulty_dialects(&difficulty), vec![Dialect::Chroma]);

    difficulty.bomb_notes.push(BombNote {
        lane: -3,
        ..BombNote::default()
    });
    difficulty.basic_events.push(BasicEvent {
        event_type: 1,
        value: 1,
        custom_data: bag(json!({ "color": [1, 1, 1] })),
        ..BasicEvent::default()
    });
    assert_eq!(
        difficulty_dialects(&difficulty),
        vec![Dialect::Chroma, Dialect::MappingExtensions]
    );

    difficulty
        .custom_data
        .insert("fakeColorNotes".to_owned(), json!([]));
    assert_eq!(
        difficulty_dialects(&difficulty),
        vec![
            Dialect::Chroma,
            Dialect::NoodleExtensions,
            Dialect::MappingExtensions
        ]
    );
}

#[test]
fn fixture_dialects() {
    let difficulty = Difficulty::from_json(include_str!("../files/v2_noodle.dat")).unwrap();
    assert_eq!(
        difficulty_dialects(&difficulty),
        vec![Dialect::Chroma, Dialect::NoodleExtensions]
    );
    let difficulty = Difficulty::from_json(include_str!("../files/v3_lightshow.dat")).unwrap();
    assert!(difficulty_dialects(&difficulty).is_empty());
}
