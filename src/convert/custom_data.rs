//! Key mapping of custom data between legacy (`_`-prefixed) and modern keys.
//!
//! Known keys are renamed by a [`KeyRule`] table per object kind. Keys missing from the table are copied as they are. When two source keys map to the same target key, the first one in key order wins.

use serde_json::Value;

use crate::{
    beatmap::{CustomData, EventCategory},
    geometry::{to_legacy_units, to_modern_units},
};

/// Which way keys are mapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Direction {
    /// Modern keys to `_`-prefixed keys.
    ToLegacy,
    /// `_`-prefixed keys to modern keys.
    ToModern,
}

/// What happens to the value of a renamed key.
#[derive(Debug, Clone, Copy)]
pub(super) enum Reshape {
    /// Copied as is.
    Copy,
    /// A boolean whose meaning flips between the two keys.
    Negate,
    /// An object, or a list of objects, whose keys map by another table.
    Nested(&'static [KeyRule]),
    /// A world position whose numbers are rescaled between the two unit conventions.
    Position,
}

/// One renamed key.
#[derive(Debug, Clone, Copy)]
pub(super) struct KeyRule {
    pub modern: &'static str,
    pub legacy: &'static str,
    pub reshape: Reshape,
}

const fn copy(modern: &'static str, legacy: &'static str) -> KeyRule {
    KeyRule {
        modern,
        legacy,
        reshape: Reshape::Copy,
    }
}

const fn negate(modern: &'static str, legacy: &'static str) -> KeyRule {
    KeyRule {
        modern,
        legacy,
        reshape: Reshape::Negate,
    }
}

const fn nested(modern: &'static str, legacy: &'static str, table: &'static [KeyRule]) -> KeyRule {
    KeyRule {
        modern,
        legacy,
        reshape: Reshape::Nested(table),
    }
}

const fn position(modern: &'static str, legacy: &'static str) -> KeyRule {
    KeyRule {
        modern,
        legacy,
        reshape: Reshape::Position,
    }
}

impl KeyRule {
    pub(super) const fn source(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::ToLegacy => self.modern,
            Direction::ToModern => self.legacy,
        }
    }

    pub(super) const fn target(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::ToLegacy => self.legacy,
            Direction::ToModern => self.modern,
        }
    }
}

pub(super) const ANIMATION_KEYS: &[KeyRule] = &[
    copy("color", "_color"),
    copy("definitePosition", "_definitePosition"),
    copy("dissolve", "_dissolve"),
    copy("dissolveArrow", "_dissolveArrow"),
    copy("interactable", "_interactable"),
    copy("localRotation", "_localRotation"),
    copy("offsetPosition", "_position"),
    copy("offsetRotation", "_rotation"),
    copy("scale", "_scale"),
    copy("time", "_time"),
];

/// Notes, bombs, arcs and waypoints.
pub(super) const NOTE_KEYS: &[KeyRule] = &[
    copy("color", "_color"),
    copy("coordinates", "_position"),
    copy("disableNoteGravity", "_disableNoteGravity"),
    copy("disableNoteLook", "_disableNoteLook"),
    copy("flip", "_flip"),
    copy("localRotation", "_localRotation"),
    copy("noteJumpMovementSpeed", "_noteJumpMovementSpeed"),
    copy("noteJumpStartBeatOffset", "_noteJumpStartBeatOffset"),
    negate("spawnEffect", "_disableSpawnEffect"),
    copy("track", "_track"),
    negate("uninteractable", "_interactable"),
    copy("worldRotation", "_rotation"),
    nested("animation", "_animation", ANIMATION_KEYS),
];

pub(super) const OBSTACLE_KEYS: &[KeyRule] = &[
    copy("color", "_color"),
    copy("coordinates", "_position"),
    copy("localRotation", "_localRotation"),
    copy("noteJumpMovementSpeed", "_noteJumpMovementSpeed"),
    copy("noteJumpStartBeatOffset", "_noteJumpStartBeatOffset"),
    copy("size", "_scale"),
    copy("track", "_track"),
    negate("uninteractable", "_interactable"),
    copy("worldRotation", "_rotation"),
    nested("animation", "_animation", ANIMATION_KEYS),
];

const LIGHT_EVENT_KEYS: &[KeyRule] = &[
    copy("color", "_color"),
    copy("lightID", "_lightID"),
    copy("easing", "_easing"),
    copy("lerpType", "_lerpType"),
];

const RING_EVENT_KEYS: &[KeyRule] = &[
    copy("nameFilter", "_nameFilter"),
    copy("rotation", "_rotation"),
    copy("step", "_step"),
    copy("prop", "_prop"),
    copy("speed", "_speed"),
    copy("direction", "_direction"),
];

const LASER_EVENT_KEYS: &[KeyRule] = &[
    copy("lockRotation", "_lockPosition"),
    copy("direction", "_direction"),
    copy("speed", "_preciseSpeed"),
    copy("speed", "_speed"),
];

/// Key table of basic events of `category`. Other categories carry no known keys.
pub(super) const fn event_keys(category: EventCategory) -> &'static [KeyRule] {
    match category {
        EventCategory::Light => LIGHT_EVENT_KEYS,
        EventCategory::Ring => RING_EVENT_KEYS,
        EventCategory::LaserRotation => LASER_EVENT_KEYS,
        _ => &[],
    }
}

pub(super) const MATERIAL_KEYS: &[KeyRule] = &[
    copy("shader", "_shader"),
    copy("shaderKeywords", "_shaderKeywords"),
    copy("environmentMaterial", "_environmentMaterial"),
    copy("collision", "_collision"),
    copy("track", "_track"),
    copy("color", "_color"),
];

const MESH_KEYS: &[KeyRule] = &[
    copy("vertices", "_vertices"),
    copy("uv", "_uv"),
    copy("triangles", "_triangles"),
];

const GEOMETRY_KEYS: &[KeyRule] = &[
    copy("type", "_type"),
    nested("material", "_material", MATERIAL_KEYS),
    copy("collision", "_collision"),
    nested("mesh", "_mesh", MESH_KEYS),
];

/// Environment enhancements, except the light id which moves in and out of `components`.
pub(super) const ENVIRONMENT_KEYS: &[KeyRule] = &[
    copy("id", "_id"),
    copy("lookupMethod", "_lookupMethod"),
    nested("geometry", "_geometry", GEOMETRY_KEYS),
    copy("track", "_track"),
    copy("duplicate", "_duplicate"),
    copy("active", "_active"),
    copy("scale", "_scale"),
    position("position", "_position"),
    copy("rotation", "_rotation"),
    position("localPosition", "_localPosition"),
    copy("localRotation", "_localRotation"),
];

pub(super) const BOOKMARK_KEYS: &[KeyRule] = &[
    copy("b", "_time"),
    copy("n", "_name"),
    copy("c", "_color"),
];

pub(super) const BPM_CHANGE_KEYS: &[KeyRule] = &[
    copy("b", "_time"),
    copy("m", "_BPM"),
    copy("p", "_beatsPerBar"),
    copy("o", "_metronomeOffset"),
];

/// Maps the keys of `data` by `rules`.
///
/// The source map is never modified; the result owns copies of every value.
pub(super) fn rekey(data: &CustomData, rules: &[KeyRule], direction: Direction) -> CustomData {
    let mut out = CustomData::new();
    for (key, value) in data {
        let Some(rule) = rules.iter().find(|rule| rule.source(direction) == key) else {
            out.entry(key.clone()).or_insert_with(|| value.clone());
            continue;
        };
        let value = match rule.reshape {
            Reshape::Copy => value.clone(),
            Reshape::Negate => match value {
                Value::Bool(flag) => Value::Bool(!flag),
                other => other.clone(),
            },
            Reshape::Nested(table) => rekey_value(value, table, direction),
            Reshape::Position => scale_position(value, direction),
        };
        out.entry(rule.target(direction).to_owned())
            .or_insert(value);
    }
    out
}

fn rekey_value(value: &Value, rules: &[KeyRule], direction: Direction) -> Value {
    match value {
        Value::Object(map) => Value::Object(rekey(map, rules, direction)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| rekey_value(item, rules, direction))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn scale_position(value: &Value, direction: Direction) -> Value {
    let Value::Array(items) = value else {
        return value.clone();
    };
    let scale = match direction {
        Direction::ToLegacy => to_legacy_units,
        Direction::ToModern => to_modern_units,
    };
    Value::Array(
        items
            .iter()
            .map(|item| match item.as_f64() {
                Some(number) => Value::from(scale(number)),
                None => item.clone(),
            })
            .collect(),
    )
}

/// Scales the first three numbers of a point or of each point of a point list.
///
/// Returns `false` if `points` is not an array, such as a point definition name.
pub(super) fn scale_points(points: &mut Value, scale: fn(f64) -> f64) -> bool {
    let Value::Array(items) = points else {
        return false;
    };
    if items.first().is_some_and(Value::is_number) {
        scale_point(items, scale);
    } else {
        for item in items {
            if let Value::Array(point) = item {
                scale_point(point, scale);
            }
        }
    }
    true
}

fn scale_point(point: &mut [Value], scale: fn(f64) -> f64) {
    for component in point.iter_mut().take(3) {
        if let Some(number) = component.as_f64() {
            *component = Value::from(scale(number));
        }
    }
}
