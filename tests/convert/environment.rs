use beatmap_rs::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::{bag, codes, convert_strict, init_logger};

fn with_stray_entry() -> Difficulty {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_environment": [
            { "_id": "Spectrogram", "_lookupMethod": "Contains", "_active": false },
            { "_track": "orphan", "_position": [1, 2, 3] },
        ],
    }));
    source
}

#[test]
fn strict_mode_rejects_entries_without_id_or_geometry() {
    init_logger();
    let source = with_stray_entry();
    assert_eq!(
        source.convert(TargetVersion::V3, ConvertOptions::STRICT),
        Err(ConvertError::UnrepresentableEnvironment { index: 1 })
    );
}

#[test]
fn lenient_mode_passes_them_through() {
    init_logger();
    let source = with_stray_entry();
    let output = source
        .convert(TargetVersion::V3, ConvertOptions::LENIENT)
        .unwrap();
    let environment = &output.difficulty.custom_data["environment"];
    assert_eq!(
        environment[0],
        json!({ "id": "Spectrogram", "lookupMethod": "Contains", "active": false })
    );
    assert_eq!(environment[1], json!({ "_track": "orphan", "_position": [1, 2, 3] }));
    assert_eq!(
        output.warnings,
        vec![ConvertWarning::UnrepresentableEnvironment {
            object: ObjectRef::untimed(ObjectKind::Environment, 1),
        }]
    );
    assert_eq!(
        output.warnings[0].object_ref(),
        Some(ObjectRef::untimed(ObjectKind::Environment, 1))
    );
}

#[test]
fn geometry_light_ids_move_into_components() {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_environment": [{
            "_geometry": { "_type": "Cube", "_material": { "_shader": "Standard", "_color": [1, 1, 1] } },
            "_lightID": 5,
        }],
        "_materials": { "glow": { "_shader": "OpaqueLight", "_shaderKeywords": [] } },
    }));

    let upgraded = convert_strict(&source, TargetVersion::V3);
    assert_eq!(
        upgraded.difficulty.custom_data["environment"],
        json!([{
            "geometry": { "type": "Cube", "material": { "shader": "Standard", "color": [1, 1, 1] } },
            "components": { "ILightWithId": { "lightID": 5, "type": 0 } },
        }])
    );
    assert_eq!(
        upgraded.difficulty.custom_data["materials"],
        json!({ "glow": { "shader": "OpaqueLight", "shaderKeywords": [] } })
    );

    let downgraded = convert_strict(&upgraded.difficulty, TargetVersion::V2);
    assert_eq!(
        downgraded.difficulty.custom_data["_environment"],
        source.custom_data["_environment"]
    );
    assert_eq!(
        downgraded.difficulty.custom_data["_materials"],
        source.custom_data["_materials"]
    );
    assert_eq!(codes(&downgraded.warnings), vec!["environment-light-type"]);
}

#[test]
fn other_components_are_dropped_on_downgrade() {
    let mut source = Difficulty::new("3.2.0");
    source.custom_data = bag(json!({
        "environment": [{
            "id": "Laser",
            "lookupMethod": "Contains",
            "components": {
                "ILightWithId": { "lightID": 10 },
                "TubeBloomPrePassLight": { "colorAlphaMultiplier": 2 },
            },
        }],
    }));

    let output = convert_strict(&source, TargetVersion::V2);
    assert_eq!(
        output.difficulty.custom_data["_environment"],
        json!([{ "_id": "Laser", "_lookupMethod": "Contains", "_lightID": 10 }])
    );
    assert_eq!(
        output.warnings,
        vec![ConvertWarning::FieldDropped {
            kind: ObjectKind::Environment,
            field: "components",
            count: 1,
        }]
    );
}

#[test]
fn mixed_track_animations_are_left_alone() {
    let mut source = Difficulty::new("2.6.0");
    source.custom_data = bag(json!({
        "_environment": [{ "_id": "Ring", "_lookupMethod": "Exact", "_track": "env" }],
        "_customEvents": [
            {
                "_time": 1,
                "_type": "AnimateTrack",
                "_data": { "_track": ["env", "note"], "_position": [[10, 0, 0, 0]] },
            },
            {
                "_time": 2,
                "_type": "AnimateTrack",
                "_data": { "_track": "env", "_position": "path" },
            },
        ],
    }));

    let output = convert_strict(&source, TargetVersion::V3);
    let events = &output.difficulty.custom_data["customEvents"];
    assert_eq!(events[0]["d"]["position"], json!([[10, 0, 0, 0]]));
    assert_eq!(events[1]["d"]["position"], json!("path"));
    assert_eq!(
        output.warnings,
        vec![
            ConvertWarning::PartialEnvironmentTrack {
                object: ObjectRef::new(ObjectKind::CustomEvent, 0, 1.0),
            },
            ConvertWarning::PointDefinitionReference {
                object: ObjectRef::new(ObjectKind::CustomEvent, 1, 2.0),
            },
        ]
    );
}
