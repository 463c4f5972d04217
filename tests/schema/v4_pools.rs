use beatmap_rs::{prelude::*, schema::v4};
use pretty_assertions::assert_eq;

use super::common_difficulty;

fn files_of(difficulty: &Difficulty) -> v4::DifficultyFiles {
    <v4::DifficultyFiles as SchemaContainer>::serialize(difficulty)
}

#[test]
fn identical_data_is_pooled_once() {
    let mut difficulty = common_difficulty("4.0.0");
    for time in [5.0, 6.0, 7.0] {
        difficulty.color_notes.push(ColorNote {
            time,
            lane: 1,
            direction: 1,
            ..ColorNote::default()
        });
    }
    let files = files_of(&difficulty);
    assert_eq!(files.difficulty.color_notes.len(), 5);
    // Two distinct notes plus the arc tail, whose head shares the first note's data.
    assert_eq!(files.difficulty.color_notes_data.len(), 3);
    assert_eq!(files.difficulty.obstacles_data.len(), 2);
    assert!(
        files
            .difficulty
            .color_notes
            .iter()
            .all(|record| record.i < files.difficulty.color_notes_data.len())
    );
}

#[test]
fn lightshow_lives_in_its_own_document() {
    let mut difficulty = Difficulty::new("4.0.0");
    difficulty.basic_events.push(BasicEvent {
        time: 1.0,
        event_type: 1,
        value: 3,
        ..BasicEvent::default()
    });
    difficulty.color_boost_events.push(ColorBoostEvent {
        time: 2.0,
        toggle: true,
        custom_data: CustomData::new(),
    });
    let wire = difficulty.to_wire().unwrap();
    let beatmap = wire.to_value().unwrap();
    let lightshow = wire.lightshow_value().unwrap().unwrap();
    assert_eq!(beatmap.get("basicEvents"), None);
    assert_eq!(lightshow["basicEvents"].as_array().map(Vec::len), Some(1));
    assert_eq!(lightshow["colorBoostEventsData"][0]["b"], 1);
}

#[test]
fn dangling_indices_read_as_defaults() {
    let wire = WireDifficulty::from_json_v4(
        r#"{"version":"4.0.0","colorNotes":[{"b":1,"i":7}],"colorNotesData":[]}"#,
        r#"{"version":"4.0.0"}"#,
    )
    .unwrap();
    let difficulty = Difficulty::from_wire(&wire);
    assert_eq!(difficulty.color_notes, vec![ColorNote {
        time: 1.0,
        ..ColorNote::default()
    }]);
}

#[test]
fn older_versions_have_no_lightshow() {
    let wire = common_difficulty("3.2.0").to_wire().unwrap();
    assert_eq!(wire.lightshow_value().unwrap(), None);
}
