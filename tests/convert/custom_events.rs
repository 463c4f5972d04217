use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use super::{bag, codes, convert_strict};

fn times(events: &Value) -> Vec<f64> {
    events
        .as_array()
        .map(|events| {
            events
                .iter()
                .filter_map(|event| event["_time"].as_f64())
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn repeat_expands_on_downgrade() {
    let mut source = Difficulty::new("3.2.0");
    source.custom_data = bag(json!({
        "customEvents": [{
            "b": 10,
            "t": "AnimateTrack",
            "d": { "track": "cube", "duration": 2, "repeat": 3, "dissolve": [[0, 0], [1, 1]] },
        }],
    }));

    let output = convert_strict(&source, TargetVersion::V2);
    let events = &output.difficulty.custom_data["_customEvents"];
    assert_eq!(times(events), vec![10.0, 12.0, 14.0, 16.0]);
    for event in events.as_array().into_iter().flatten() {
        assert_eq!(event["_type"], json!("AnimateTrack"));
        assert_eq!(
            event["_data"],
            json!({ "_track": "cube", "_duration": 2, "_dissolve": [[0, 0], [1, 1]] })
        );
    }
    assert_eq!(
        output.warnings,
        vec![ConvertWarning::RepeatExpanded {
            object: ObjectRef::new(ObjectKind::CustomEvent, 0, 10.0),
            count: 4,
        }]
    );
}

#[test]
fn oversized_repeat_is_clamped_on_downgrade() {
    let mut source = Difficulty::new("3.2.0");
    source.custom_data = bag(json!({
        "customEvents": [{
            "b": 4,
            "t": "AnimateTrack",
            "d": { "track": "cube", "duration": 0.5, "repeat": 1e300 },
        }],
    }));

    let output = convert_strict(&source, TargetVersion::V2);
    let events = &output.difficulty.custom_data["_customEvents"];
    assert_eq!(times(events).len(), 1001);
    assert_eq!(
        output.warnings,
        vec![
            ConvertWarning::RepeatClamped {
                object: ObjectRef::new(ObjectKind::CustomEvent, 0, 4.0),
                requested: 1e300,
                limit: 1000,
            },
            ConvertWarning::RepeatExpanded {
                object: ObjectRef::new(ObjectKind::CustomEvent, 0, 4.0),
                count: 1001,
            },
        ]
    );
}

#[test]
fn fog_round_trips_through_animate_component() {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_customEvents": [{
            "_time": 3,
            "_type": "AssignFogTrack",
            "_data": { "_track": "fog", "_duration": 4, "_attenuation": [[0.5, 0]], "_startY": [[-10, 0]] },
        }],
    }));

    let upgraded = convert_strict(&source, TargetVersion::V3);
    assert_eq!(
        upgraded.difficulty.custom_data["customEvents"],
        json!([{
            "b": 3.0,
            "t": "AnimateComponent",
            "d": {
                "track": "fog",
                "duration": 4,
                "BloomFogEnvironment": { "attenuation": [[0.5, 0]], "startY": [[-10, 0]] },
            },
        }])
    );

    let downgraded = convert_strict(&upgraded.difficulty, TargetVersion::V2);
    assert_eq!(
        downgraded.difficulty.custom_data["_customEvents"],
        json!([{
            "_time": 3.0,
            "_type": "AssignFogTrack",
            "_data": { "_track": "fog", "_duration": 4, "_attenuation": [[0.5, 0]], "_startY": [[-10, 0]] },
        }])
    );
    assert!(downgraded.warnings.is_empty());
}

#[test]
fn components_other_than_fog_are_dropped() {
    let mut source = Difficulty::new("3.2.0");
    source.custom_data = bag(json!({
        "customEvents": [{
            "b": 1,
            "t": "AnimateComponent",
            "d": { "track": "lights", "TubeBloomPrePassLight": { "colorAlphaMultiplier": [[2, 0]] } },
        }],
    }));

    let output = convert_strict(&source, TargetVersion::V2);
    assert_eq!(output.difficulty.custom_data["_customEvents"], json!([]));
    assert_eq!(codes(&output.warnings), vec!["custom-event-dropped"]);
}

#[test]
fn track_assignments_are_rekeyed() {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_customEvents": [
            {
                "_time": 0,
                "_type": "AssignTrackParent",
                "_data": { "_childrenTracks": ["a", "b"], "_parentTrack": "p", "_worldPositionStays": true },
            },
            {
                "_time": 0,
                "_type": "AssignPlayerToTrack",
                "_data": { "_track": "player" },
            },
        ],
    }));

    let output = convert_strict(&source, TargetVersion::V3);
    let events = &output.difficulty.custom_data["customEvents"];
    assert_eq!(
        events[0]["d"],
        json!({ "childrenTracks": ["a", "b"], "parentTrack": "p", "worldPositionStays": true })
    );
    assert_eq!(events[1]["d"], json!({ "track": "player" }));
    assert!(output.warnings.is_empty());
}

#[test]
fn unknown_types_pass_through() {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_customEvents": [{ "_time": 1, "_type": "SetLight", "_data": { "_foo": 1 } }],
    }));

    let output = convert_strict(&source, TargetVersion::V3);
    assert_eq!(
        output.difficulty.custom_data["customEvents"],
        json!([{ "b": 1.0, "t": "SetLight", "d": { "_foo": 1 } }])
    );
    assert_eq!(codes(&output.warnings), vec!["unknown-custom-event"]);
}

#[test]
fn point_definitions_change_shape() {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_pointDefinitions": [
            { "_name": "bounce", "_points": [[0, 0, 0, 0], [0, 1, 0, 1, "easeOutBounce"]] },
        ],
    }));

    let upgraded = convert_strict(&source, TargetVersion::V3);
    assert_eq!(
        upgraded.difficulty.custom_data["pointDefinitions"],
        json!({ "bounce": [[0, 0, 0, 0], [0, 1, 0, 1, "easeOutBounce"]] })
    );
    let downgraded = convert_strict(&upgraded.difficulty, TargetVersion::V2);
    assert_eq!(
        downgraded.difficulty.custom_data["_pointDefinitions"],
        source.custom_data["_pointDefinitions"]
    );
}
