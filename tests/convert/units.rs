use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{bag, convert_strict};

#[test]
fn environment_positions_shrink_on_upgrade() {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_environment": [{
            "_id": "Spectrogram",
            "_lookupMethod": "Contains",
            "_position": [10, 5, 0],
            "_localPosition": [5, 0, 10],
        }],
    }));

    let output = convert_strict(&source, TargetVersion::V3);
    let entry = &output.difficulty.custom_data["environment"][0];
    assert_eq!(entry["position"], json!([6.0, 3.0, 0.0]));
    assert_eq!(entry["localPosition"], json!([3.0, 0.0, 6.0]));
    assert_eq!(entry["id"], json!("Spectrogram"));
    assert!(output.warnings.is_empty());
}

#[test]
fn environment_positions_grow_on_downgrade() {
    let mut source = Difficulty::new("3.2.0");
    source.custom_data = bag(json!({
        "environment": [{
            "id": "Laser",
            "lookupMethod": "Regex",
            "position": [6, 3, 0],
        }],
    }));

    let output = convert_strict(&source, TargetVersion::V2);
    let entry = &output.difficulty.custom_data["_environment"][0];
    assert_eq!(entry["_position"], json!([10.0, 5.0, 0.0]));
    assert_eq!(entry["_lookupMethod"], json!("Regex"));
}

#[test]
fn gameplay_positions_keep_their_units() {
    let mut source = Difficulty::new("2.6.0");
    source.color_notes.push(ColorNote {
        time: 1.0,
        custom_data: bag(json!({ "_position": [1.5, 0], "_track": "a" })),
        ..ColorNote::default()
    });
    source.custom_data = bag(json!({
        "_environment": [{ "_id": "Ring", "_lookupMethod": "Exact", "_track": "ring" }],
        "_customEvents": [{
            "_time": 4,
            "_type": "AnimateTrack",
            "_data": { "_track": "a", "_position": [[10, 0, 0, 0]] },
        }],
    }));

    let output = convert_strict(&source, TargetVersion::V3);
    let note = &output.difficulty.color_notes[0];
    assert_eq!(note.custom_data["coordinates"], json!([1.5, 0]));
    assert_eq!(
        output.difficulty.custom_data["customEvents"][0]["d"]["position"],
        json!([[10, 0, 0, 0]])
    );
}

#[test]
fn environment_track_animations_are_rescaled() {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_environment": [{ "_id": "Ring", "_lookupMethod": "Exact", "_track": "ring" }],
        "_customEvents": [{
            "_time": 4,
            "_type": "AnimateTrack",
            "_data": { "_track": "ring", "_position": [[0, 5, 10, 0], [10, 0, 0, 1, "easeInOutSine"]] },
        }],
    }));

    let output = convert_strict(&source, TargetVersion::V3);
    assert_eq!(
        output.difficulty.custom_data["customEvents"][0]["d"]["position"],
        json!([[0.0, 3.0, 6.0, 0], [6.0, 0.0, 0.0, 1, "easeInOutSine"]])
    );

    let back = convert_strict(&output.difficulty, TargetVersion::V2);
    assert_eq!(
        back.difficulty.custom_data["_customEvents"][0]["_data"]["_position"],
        json!([[0.0, 5.0, 10.0, 0], [10.0, 0.0, 0.0, 1, "easeInOutSine"]])
    );
}
