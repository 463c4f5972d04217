use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{bag, convert_strict, init_logger};

#[test]
fn unsupported_source_versions() {
    init_logger();
    for version in ["0.9.0", "5.0.0", "latest"] {
        let source = Difficulty::new(version);
        assert_eq!(
            source.convert(TargetVersion::V2, ConvertOptions::STRICT),
            Err(ConvertError::UnsupportedVersion {
                version: version.to_owned()
            })
        );

        let output = source
            .convert(TargetVersion::V2, ConvertOptions::LENIENT)
            .unwrap();
        assert_eq!(output.difficulty, source);
        assert_eq!(
            output.warnings,
            vec![ConvertWarning::UnsupportedVersion {
                version: version.to_owned()
            }]
        );
    }
}

#[test]
fn same_major_returns_an_equal_copy() {
    let mut source = Difficulty::new("2.0.0");
    source.color_notes.push(ColorNote {
        time: 1.0,
        custom_data: bag(json!({ "_color": [0, 1, 0] })),
        ..ColorNote::default()
    });
    let output = convert_strict(&source, TargetVersion::V2);
    assert_eq!(output.difficulty, source);
    assert!(output.warnings.is_empty());
}

#[test]
fn source_is_never_touched() {
    let mut source = Difficulty::new("2.6.0");
    source.color_notes.push(ColorNote {
        time: 2.0,
        custom_data: bag(json!({ "_fake": true, "_track": "t" })),
        ..ColorNote::default()
    });
    source.basic_events.push(BasicEvent {
        time: 1.0,
        event_type: 14,
        value: 2,
        custom_data: bag(json!({ "_rotation": 10 })),
        ..BasicEvent::default()
    });
    source.custom_data = bag(json!({
        "_environment": [{ "_id": "Spectrogram", "_lookupMethod": "Contains", "_position": [10, 0, 0] }],
    }));
    let snapshot = source.clone();

    let mut output = convert_strict(&source, TargetVersion::V4);
    assert_eq!(source, snapshot);

    output.difficulty.custom_data.clear();
    if let Some(rotation) = output.difficulty.rotation_events.first_mut() {
        rotation.custom_data.insert("mutated".to_owned(), json!(true));
    }
    assert_eq!(source, snapshot);
}

#[test]
fn outputs_are_independent_of_each_other() {
    let mut source = Difficulty::new("3.2.0");
    source.color_notes.push(ColorNote {
        time: 1.0,
        custom_data: bag(json!({ "track": "t" })),
        ..ColorNote::default()
    });
    let snapshot = source.clone();

    let mut first = convert_strict(&source, TargetVersion::V2);
    let second = convert_strict(&source, TargetVersion::V2);
    let v4 = convert_strict(&source, TargetVersion::V4);
    assert_eq!(first, second);

    first.difficulty.color_notes[0]
        .custom_data
        .insert("_track".to_owned(), json!("changed"));
    first.difficulty.color_notes[0].lane = 3;
    assert_eq!(second.difficulty.color_notes[0].custom_data, bag(json!({ "_track": "t" })));
    assert_eq!(second.difficulty.color_notes[0].lane, 0);
    assert_eq!(v4.difficulty.color_notes[0].custom_data, bag(json!({ "track": "t" })));
    assert_eq!(source, snapshot);
}

#[test]
fn skip_confirmation_does_not_change_the_result() {
    let mut source = Difficulty::new("3.2.0");
    source.chains.push(Chain::default());
    let confirmed = source
        .convert(
            TargetVersion::V2,
            ConvertOptions::STRICT.with_skip_confirmation(true),
        )
        .unwrap();
    let unconfirmed = convert_strict(&source, TargetVersion::V2);
    assert_eq!(confirmed, unconfirmed);
    assert_eq!(confirmed.warnings.len(), 1);
}
