//! Classifiers deciding which community extension dialects an object uses.
//!
//! Chroma and Noodle Extensions share the custom data bag: each is detected by looking for its trigger keys with the expected value shape, using the tables in this module. The tables differ per object kind and per [`KeyStyle`]. Mapping Extensions has no keys at all; it stores out-of-range values in the positional fields, so its classifier looks at those instead.
//!
//! The three classifiers are independent. An object may use any combination of dialects, and [`DialectCheck::dialects`] reports them in the fixed order of [`Dialect`].

use serde_json::Value;

use crate::beatmap::{
    Arc, BasicEvent, BombNote, Chain, ColorNote, CustomData, Difficulty, EventCategory, KeyStyle,
    Obstacle, Waypoint,
};

/// A community extension of the beatmap format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dialect {
    /// Colors and lighting control through custom data.
    Chroma,
    /// Animation, placement and track control through custom data.
    NoodleExtensions,
    /// Precision placement through out-of-range positional values.
    MappingExtensions,
}

/// Expected JSON shape of a trigger key's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A JSON array.
    Array,
    /// A JSON array or object. Animation blocks appear as both in the wild.
    Container,
    /// A JSON number.
    Number,
    /// A JSON number or an array of them.
    NumberOrArray,
    /// A JSON boolean.
    Bool,
    /// A JSON string.
    String,
}

impl Shape {
    /// Whether `value` has this shape.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Array => value.is_array(),
            Self::Container => value.is_array() || value.is_object(),
            Self::Number => value.is_number(),
            Self::NumberOrArray => value.is_number() || value.is_array(),
            Self::Bool => value.is_boolean(),
            Self::String => value.is_string(),
        }
    }
}

/// A custom data key whose presence with the given shape signals a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerKey {
    /// Key in the custom data bag.
    pub key: &'static str,
    /// Expected value shape.
    pub shape: Shape,
}

const fn key(key: &'static str, shape: Shape) -> TriggerKey {
    TriggerKey { key, shape }
}

/// Chroma keys of notes and bombs in legacy style.
pub const NOTE_CHROMA_LEGACY: &[TriggerKey] = &[
    key("_color", Shape::Array),
    key("_disableSpawnEffect", Shape::Bool),
];
/// Chroma keys of notes and bombs in modern style.
pub const NOTE_CHROMA_MODERN: &[TriggerKey] = &[
    key("color", Shape::Array),
    key("spawnEffect", Shape::Bool),
];
/// Noodle Extensions keys of notes, bombs and arcs in legacy style.
pub const NOTE_NOODLE_LEGACY: &[TriggerKey] = &[
    key("_animation", Shape::Container),
    key("_cutDirection", Shape::Number),
    key("_disableNoteGravity", Shape::Bool),
    key("_disableNoteLook", Shape::Bool),
    key("_fake", Shape::Bool),
    key("_flip", Shape::Array),
    key("_interactable", Shape::Bool),
    key("_localRotation", Shape::Array),
    key("_noteJumpMovementSpeed", Shape::Number),
    key("_noteJumpStartBeatOffset", Shape::Number),
    key("_position", Shape::Array),
    key("_rotation", Shape::Array),
];
/// Noodle Extensions keys of notes, bombs, arcs and chains in modern style.
pub const NOTE_NOODLE_MODERN: &[TriggerKey] = &[
    key("animation", Shape::Container),
    key("disableNoteGravity", Shape::Bool),
    key("disableNoteLook", Shape::Bool),
    key("flip", Shape::Array),
    key("uninteractable", Shape::Bool),
    key("localRotation", Shape::Array),
    key("noteJumpMovementSpeed", Shape::Number),
    key("noteJumpStartBeatOffset", Shape::Number),
    key("coordinates", Shape::Array),
    key("tailCoordinates", Shape::Array),
    key("worldRotation", Shape::Array),
    key("track", Shape::String),
];
/// Chroma keys of obstacles, arcs and chains in legacy style.
pub const OBSTACLE_CHROMA_LEGACY: &[TriggerKey] = &[key("_color", Shape::Array)];
/// Chroma keys of obstacles, arcs and chains in modern style.
pub const OBSTACLE_CHROMA_MODERN: &[TriggerKey] = &[key("color", Shape::Array)];
/// Noodle Extensions keys of obstacles in legacy style.
pub const OBSTACLE_NOODLE_LEGACY: &[TriggerKey] = &[
    key("_animation", Shape::Container),
    key("_fake", Shape::Bool),
    key("_interactable", Shape::Bool),
    key("_localRotation", Shape::Array),
    key("_noteJumpMovementSpeed", Shape::Number),
    key("_noteJumpStartBeatOffset", Shape::Number),
    key("_position", Shape::Array),
    key("_rotation", Shape::Array),
    key("_scale", Shape::Array),
    key("_track", Shape::String),
];
/// Noodle Extensions keys of obstacles in modern style.
pub const OBSTACLE_NOODLE_MODERN: &[TriggerKey] = &[
    key("animation", Shape::Container),
    key("uninteractable", Shape::Bool),
    key("localRotation", Shape::Array),
    key("noteJumpMovementSpeed", Shape::Number),
    key("noteJumpStartBeatOffset", Shape::Number),
    key("coordinates", Shape::Array),
    key("worldRotation", Shape::Array),
    key("size", Shape::Array),
    key("track", Shape::String),
];
/// Chroma keys of light events in legacy style.
pub const LIGHT_CHROMA_LEGACY: &[TriggerKey] = &[
    key("_color", Shape::Array),
    key("_lightID", Shape::NumberOrArray),
    key("_propID", Shape::NumberOrArray),
    key("_lightGradient", Shape::Container),
    key("_easing", Shape::String),
    key("_lerpType", Shape::String),
];
/// Chroma keys of light events in modern style.
pub const LIGHT_CHROMA_MODERN: &[TriggerKey] = &[
    key("color", Shape::Array),
    key("lightID", Shape::NumberOrArray),
    key("easing", Shape::String),
    key("lerpType", Shape::String),
];
/// Chroma keys of ring events in legacy style.
pub const RING_CHROMA_LEGACY: &[TriggerKey] = &[
    key("_nameFilter", Shape::String),
    key("_reset", Shape::Bool),
    key("_rotation", Shape::Number),
    key("_step", Shape::Number),
    key("_prop", Shape::Number),
    key("_speed", Shape::Number),
    key("_direction", Shape::Number),
    key("_counterSpin", Shape::Bool),
];
/// Chroma keys of ring events in modern style.
pub const RING_CHROMA_MODERN: &[TriggerKey] = &[
    key("nameFilter", Shape::String),
    key("rotation", Shape::Number),
    key("step", Shape::Number),
    key("prop", Shape::Number),
    key("speed", Shape::Number),
    key("direction", Shape::Number),
];
/// Chroma keys of laser rotation events in legacy style.
pub const LASER_CHROMA_LEGACY: &[TriggerKey] = &[
    key("_lockPosition", Shape::Bool),
    key("_preciseSpeed", Shape::Number),
    key("_speed", Shape::Number),
    key("_direction", Shape::Number),
];
/// Chroma keys of laser rotation events in modern style.
pub const LASER_CHROMA_MODERN: &[TriggerKey] = &[
    key("lockRotation", Shape::Bool),
    key("speed", Shape::Number),
    key("direction", Shape::Number),
];

const fn by_style(
    style: KeyStyle,
    legacy: &'static [TriggerKey],
    modern: &'static [TriggerKey],
) -> &'static [TriggerKey] {
    match style {
        KeyStyle::Legacy => legacy,
        KeyStyle::Modern => modern,
    }
}

/// Whether `custom_data` contains any of `keys` with its expected shape.
#[must_use]
pub fn has_any_trigger(custom_data: &CustomData, keys: &[TriggerKey]) -> bool {
    keys.iter().any(|trigger| {
        custom_data
            .get(trigger.key)
            .is_some_and(|value| trigger.shape.matches(value))
    })
}

/// Dialect classification of one object.
pub trait DialectCheck {
    /// Whether the object uses Chroma custom data written in `style`.
    fn has_chroma(&self, style: KeyStyle) -> bool;
    /// Whether the object uses Noodle Extensions custom data written in `style`.
    fn has_noodle_extensions(&self, style: KeyStyle) -> bool;
    /// Whether the positional fields are outside the vanilla ranges in the way Mapping Extensions encodes placement.
    fn has_mapping_extensions(&self) -> bool;

    /// Every dialect the object uses, in the order of [`Dialect`].
    fn dialects(&self, style: KeyStyle) -> Vec<Dialect> {
        [
            (Dialect::Chroma, self.has_chroma(style)),
            (Dialect::NoodleExtensions, self.has_noodle_extensions(style)),
            (Dialect::MappingExtensions, self.has_mapping_extensions()),
        ]
        .into_iter()
        .filter_map(|(dialect, used)| used.then_some(dialect))
        .collect()
    }
}

const fn outside_grid(lane: i32, row: i32) -> bool {
    lane < 0 || lane > 3 || row < 0 || row > 2
}

const fn is_precise_direction(direction: i32) -> bool {
    direction >= 1000 && direction <= 1360
}

impl DialectCheck for ColorNote {
    fn has_chroma(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, NOTE_CHROMA_LEGACY, NOTE_CHROMA_MODERN),
        )
    }

    fn has_noodle_extensions(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, NOTE_NOODLE_LEGACY, NOTE_NOODLE_MODERN),
        )
    }

    fn has_mapping_extensions(&self) -> bool {
        outside_grid(self.lane, self.row) || is_precise_direction(self.direction)
    }
}

impl DialectCheck for BombNote {
    fn has_chroma(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, NOTE_CHROMA_LEGACY, NOTE_CHROMA_MODERN),
        )
    }

    fn has_noodle_extensions(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, NOTE_NOODLE_LEGACY, NOTE_NOODLE_MODERN),
        )
    }

    fn has_mapping_extensions(&self) -> bool {
        outside_grid(self.lane, self.row)
    }
}

impl DialectCheck for Obstacle {
    fn has_chroma(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, OBSTACLE_CHROMA_LEGACY, OBSTACLE_CHROMA_MODERN),
        )
    }

    fn has_noodle_extensions(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, OBSTACLE_NOODLE_LEGACY, OBSTACLE_NOODLE_MODERN),
        )
    }

    fn has_mapping_extensions(&self) -> bool {
        self.lane < 0
            || self.lane > 3
            || self.row > 2
            || self.width >= 1000
            || self.height >= 1000
    }
}

impl DialectCheck for Arc {
    fn has_chroma(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, OBSTACLE_CHROMA_LEGACY, OBSTACLE_CHROMA_MODERN),
        )
    }

    fn has_noodle_extensions(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, NOTE_NOODLE_LEGACY, NOTE_NOODLE_MODERN),
        )
    }

    fn has_mapping_extensions(&self) -> bool {
        outside_grid(self.lane, self.row)
            || outside_grid(self.tail_lane, self.tail_row)
            || is_precise_direction(self.direction)
            || is_precise_direction(self.tail_direction)
    }
}

impl DialectCheck for Chain {
    fn has_chroma(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, OBSTACLE_CHROMA_LEGACY, OBSTACLE_CHROMA_MODERN),
        )
    }

    fn has_noodle_extensions(&self, style: KeyStyle) -> bool {
        has_any_trigger(
            &self.custom_data,
            by_style(style, NOTE_NOODLE_LEGACY, NOTE_NOODLE_MODERN),
        )
    }

    fn has_mapping_extensions(&self) -> bool {
        outside_grid(self.lane, self.row)
            || outside_grid(self.tail_lane, self.tail_row)
            || is_precise_direction(self.direction)
    }
}

impl DialectCheck for Waypoint {
    fn has_chroma(&self, _style: KeyStyle) -> bool {
        false
    }

    fn has_noodle_extensions(&self, _style: KeyStyle) -> bool {
        false
    }

    fn has_mapping_extensions(&self) -> bool {
        outside_grid(self.lane, self.row)
    }
}

impl DialectCheck for BasicEvent {
    fn has_chroma(&self, style: KeyStyle) -> bool {
        let keys = match self.category() {
            EventCategory::Light => by_style(style, LIGHT_CHROMA_LEGACY, LIGHT_CHROMA_MODERN),
            EventCategory::Ring => by_style(style, RING_CHROMA_LEGACY, RING_CHROMA_MODERN),
            EventCategory::LaserRotation => {
                by_style(style, LASER_CHROMA_LEGACY, LASER_CHROMA_MODERN)
            }
            _ => return false,
        };
        has_any_trigger(&self.custom_data, keys)
    }

    fn has_noodle_extensions(&self, _style: KeyStyle) -> bool {
        false
    }

    fn has_mapping_extensions(&self) -> bool {
        self.is_lane_rotation_event() && (1000..=1720).contains(&self.value)
    }
}

fn collect_dialects<T: DialectCheck>(objects: &[T], style: KeyStyle, found: &mut Vec<Dialect>) {
    for object in objects {
        found.extend(object.dialects(style));
    }
}

/// Difficulty-level custom data keys that only Chroma reads.
const DIFFICULTY_CHROMA_KEYS: [(&str, &str); 2] =
    [("_environment", "environment"), ("_materials", "materials")];
/// Difficulty-level custom data keys that only Noodle Extensions reads.
const DIFFICULTY_NOODLE_KEYS: [(&str, &str); 6] = [
    ("_customEvents", "customEvents"),
    ("_pointDefinitions", "pointDefinitions"),
    ("", "fakeColorNotes"),
    ("", "fakeBombNotes"),
    ("", "fakeObstacles"),
    ("", "fakeBurstSliders"),
];

/// Every dialect used anywhere in `difficulty`, in the order of [`Dialect`].
///
/// Useful to fill the requirement list of an info file.
#[must_use]
pub fn difficulty_dialects(difficulty: &Difficulty) -> Vec<Dialect> {
    let style = difficulty.key_style();
    let difficulty_key = |(legacy, modern): &(&str, &str)| {
        let key = match style {
            KeyStyle::Legacy => legacy,
            KeyStyle::Modern => modern,
        };
        !key.is_empty() && difficulty.custom_data.contains_key(*key)
    };
    let mut found = Vec::new();
    collect_dialects(&difficulty.color_notes, style, &mut found);
    collect_dialects(&difficulty.bomb_notes, style, &mut found);
    collect_dialects(&difficulty.obstacles, style, &mut found);
    collect_dialects(&difficulty.arcs, style, &mut found);
    collect_dialects(&difficulty.chains, style, &mut found);
    collect_dialects(&difficulty.waypoints, style, &mut found);
    collect_dialects(&difficulty.basic_events, style, &mut found);
    if DIFFICULTY_CHROMA_KEYS.iter().any(difficulty_key) {
        found.push(Dialect::Chroma);
    }
    if DIFFICULTY_NOODLE_KEYS.iter().any(difficulty_key) {
        found.push(Dialect::NoodleExtensions);
    }
    found.sort_unstable();
    found.dedup();
    found
}
