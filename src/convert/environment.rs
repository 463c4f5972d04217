//! Environment enhancements, materials and point definitions of the difficulty custom data.

use std::collections::HashSet;

use serde_json::{Value, json};

use super::{
    ConvertError, ConvertWarning, Context,
    custom_data::{Direction, ENVIRONMENT_KEYS, MATERIAL_KEYS, rekey},
};
use crate::beatmap::{CustomData, ObjectKind, ObjectRef};

const LIGHT_COMPONENT: &str = "ILightWithId";

/// Keys that decide whether an entry is representable, per direction of the source.
struct EntryKeys {
    id: &'static str,
    lookup_method: &'static str,
    geometry: &'static str,
}

const fn source_keys(direction: Direction) -> EntryKeys {
    match direction {
        Direction::ToLegacy => EntryKeys {
            id: "id",
            lookup_method: "lookupMethod",
            geometry: "geometry",
        },
        Direction::ToModern => EntryKeys {
            id: "_id",
            lookup_method: "_lookupMethod",
            geometry: "_geometry",
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryShape {
    Lookup,
    Geometry,
}

fn entry_shape(entry: &CustomData, keys: &EntryKeys) -> Option<EntryShape> {
    let has_id = entry
        .get(keys.id)
        .and_then(Value::as_str)
        .is_some_and(|id| !id.is_empty());
    let has_lookup_method = entry.get(keys.lookup_method).is_some_and(|m| !m.is_null());
    if has_id && has_lookup_method {
        Some(EntryShape::Lookup)
    } else if entry.get(keys.geometry).is_some_and(Value::is_object) {
        Some(EntryShape::Geometry)
    } else {
        None
    }
}

/// Converts the environment enhancement list.
///
/// Returns `Ok(None)` when `entries` is not a list, after reporting it as malformed.
///
/// # Errors
///
/// [`ConvertError::UnrepresentableEnvironment`] in strict mode for an entry with neither lookup id nor geometry.
pub(super) fn convert_environment(
    entries: &Value,
    key: &'static str,
    direction: Direction,
    ctx: &mut Context,
) -> Result<Option<Value>, ConvertError> {
    let Value::Array(entries) = entries else {
        ctx.warn(ConvertWarning::MalformedCustomData { key, object: None });
        return Ok(None);
    };
    let keys = source_keys(direction);
    let mut converted = Vec::with_capacity(entries.len());
    let mut dropped_components = 0;
    for (index, entry) in entries.iter().enumerate() {
        let shape = match entry {
            Value::Object(map) => entry_shape(map, &keys).map(|shape| (map, shape)),
            _ => None,
        };
        let Some((map, shape)) = shape else {
            ctx.unrepresentable_environment(index)?;
            converted.push(entry.clone());
            continue;
        };
        let entry = match direction {
            Direction::ToLegacy => {
                let (entry, dropped) = entry_to_legacy(map, shape, index, ctx);
                dropped_components += usize::from(dropped);
                entry
            }
            Direction::ToModern => entry_to_modern(map, shape),
        };
        converted.push(Value::Object(entry));
    }
    if dropped_components > 0 {
        ctx.warn(ConvertWarning::FieldDropped {
            kind: ObjectKind::Environment,
            field: "components",
            count: dropped_components,
        });
    }
    Ok(Some(Value::Array(converted)))
}

/// Returns the entry and whether components other than the light id were dropped.
fn entry_to_legacy(
    entry: &CustomData,
    shape: EntryShape,
    index: usize,
    ctx: &mut Context,
) -> (CustomData, bool) {
    let mut source = entry.clone();
    let components = source.remove("components");
    let mut out = rekey(&source, ENVIRONMENT_KEYS, Direction::ToLegacy);
    let Some(Value::Object(mut components)) = components else {
        return (out, false);
    };
    if let Some(Value::Object(light)) = components.remove(LIGHT_COMPONENT) {
        let typed = light
            .get("type")
            .is_some_and(|ty| !ty.is_null() && ty.as_f64() != Some(0.0));
        if shape == EntryShape::Geometry && (typed || light.contains_key("lightID")) {
            ctx.warn(ConvertWarning::EnvironmentLightType {
                object: ObjectRef::untimed(ObjectKind::Environment, index),
            });
        }
        if let Some(light_id) = light.get("lightID") {
            out.insert("_lightID".to_owned(), light_id.clone());
        }
    }
    (out, !components.is_empty())
}

fn entry_to_modern(entry: &CustomData, shape: EntryShape) -> CustomData {
    let mut source = entry.clone();
    let light_id = source.remove("_lightID").filter(|id| !id.is_null());
    let mut out = rekey(&source, ENVIRONMENT_KEYS, Direction::ToModern);
    if let Some(light_id) = light_id {
        let light = match shape {
            EntryShape::Geometry => json!({ "lightID": light_id, "type": 0 }),
            EntryShape::Lookup => json!({ "lightID": light_id }),
        };
        let components = out
            .entry("components")
            .or_insert_with(|| Value::Object(CustomData::new()));
        if let Value::Object(components) = components {
            components.insert(LIGHT_COMPONENT.to_owned(), light);
        }
    }
    out
}

/// Re-keys every material of a name to material map.
pub(super) fn convert_materials(materials: &Value, direction: Direction) -> Value {
    let Value::Object(materials) = materials else {
        return materials.clone();
    };
    Value::Object(
        materials
            .iter()
            .map(|(name, material)| {
                let material = match material {
                    Value::Object(material) => {
                        Value::Object(rekey(material, MATERIAL_KEYS, direction))
                    }
                    other => other.clone(),
                };
                (name.clone(), material)
            })
            .collect(),
    )
}

/// Turns `[{ "_name", "_points" }]` into a name to points map.
pub(super) fn point_definitions_to_modern(definitions: &Value, ctx: &mut Context) -> Option<Value> {
    const KEY: &str = "_pointDefinitions";
    let Value::Array(definitions) = definitions else {
        ctx.warn(ConvertWarning::MalformedCustomData {
            key: KEY,
            object: None,
        });
        return None;
    };
    let mut out = CustomData::new();
    for definition in definitions {
        let name = definition.get("_name").and_then(Value::as_str);
        let points = definition.get("_points");
        match name.zip(points) {
            Some((name, points)) => {
                out.insert(name.to_owned(), points.clone());
            }
            None => ctx.warn(ConvertWarning::MalformedCustomData {
                key: KEY,
                object: None,
            }),
        }
    }
    Some(Value::Object(out))
}

/// Turns a name to points map into `[{ "_name", "_points" }]`.
pub(super) fn point_definitions_to_legacy(definitions: &Value, ctx: &mut Context) -> Option<Value> {
    let Value::Object(definitions) = definitions else {
        ctx.warn(ConvertWarning::MalformedCustomData {
            key: "pointDefinitions",
            object: None,
        });
        return None;
    };
    Some(Value::Array(
        definitions
            .iter()
            .map(|(name, points)| json!({ "_name": name, "_points": points }))
            .collect(),
    ))
}

/// Track names used by environment entries, read with the track key of `direction`'s target.
pub(super) fn environment_tracks(entries: &Value, track_key: &str) -> HashSet<String> {
    let Value::Array(entries) = entries else {
        return HashSet::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.get(track_key))
        .flat_map(|track| match track {
            Value::String(name) => vec![name.clone()],
            Value::Array(names) => names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}
