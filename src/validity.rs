//! Vanilla conformance checks.
//!
//! An object is valid when every positional field is inside its nominal range and it uses no extension dialect, so that an unmodded game plays it as written. Extension use is not corruption: the converter uses these checks to decide which objects can be carried over without loss, and a saver can use them to refuse or re-check data before writing.

use crate::{
    beatmap::{
        Arc, BasicEvent, BombNote, BpmEvent, Chain, ColorBoostEvent, ColorNote, KeyStyle,
        LightColorEventBoxGroup, Obstacle, RotationEvent, Waypoint,
    },
    dialect::DialectCheck,
};

/// Vanilla conformance of one object.
pub trait Validity {
    /// Whether the object is a vanilla object when its custom data is read in `style`.
    fn is_valid(&self, style: KeyStyle) -> bool;
}

const fn is_valid_direction(direction: i32) -> bool {
    direction >= 0 && direction <= 8
}

const fn is_valid_color(color: i32) -> bool {
    color == 0 || color == 1
}

fn uses_custom_dialect(object: &impl DialectCheck, style: KeyStyle) -> bool {
    object.has_chroma(style) || object.has_noodle_extensions(style)
}

impl Validity for ColorNote {
    fn is_valid(&self, style: KeyStyle) -> bool {
        !self.has_mapping_extensions()
            && is_valid_direction(self.direction)
            && is_valid_color(self.color)
            && !uses_custom_dialect(self, style)
    }
}

impl Validity for BombNote {
    fn is_valid(&self, style: KeyStyle) -> bool {
        !self.has_mapping_extensions() && !uses_custom_dialect(self, style)
    }
}

impl Validity for Obstacle {
    fn is_valid(&self, style: KeyStyle) -> bool {
        !self.has_mapping_extensions()
            && self.duration > 0.0
            && self.width > 0
            && self.width <= 4
            && self.height > 0
            && self.row >= 0
            && !uses_custom_dialect(self, style)
    }
}

impl Validity for Arc {
    fn is_valid(&self, style: KeyStyle) -> bool {
        !self.has_mapping_extensions()
            && !self.is_inverse()
            && is_valid_color(self.color)
            && is_valid_direction(self.direction)
            && is_valid_direction(self.tail_direction)
            && !(self.lane == self.tail_lane && self.row == self.tail_row)
            && !uses_custom_dialect(self, style)
    }
}

impl Validity for Chain {
    fn is_valid(&self, style: KeyStyle) -> bool {
        !self.has_mapping_extensions()
            && !self.is_inverse()
            && is_valid_color(self.color)
            && is_valid_direction(self.direction)
            && self.slice_count > 0
            && !(self.lane == self.tail_lane && self.row == self.tail_row)
            && !uses_custom_dialect(self, style)
    }
}

impl Validity for Waypoint {
    fn is_valid(&self, _style: KeyStyle) -> bool {
        !self.has_mapping_extensions()
    }
}

impl Validity for BasicEvent {
    fn is_valid(&self, style: KeyStyle) -> bool {
        self.event_type >= 0
            && self.value >= 0
            && !self.has_mapping_extensions()
            && !self.has_chroma(style)
    }
}

impl Validity for ColorBoostEvent {
    fn is_valid(&self, _style: KeyStyle) -> bool {
        self.time.is_finite()
    }
}

impl Validity for RotationEvent {
    fn is_valid(&self, _style: KeyStyle) -> bool {
        self.time.is_finite() && self.rotation.is_finite()
    }
}

impl Validity for BpmEvent {
    fn is_valid(&self, _style: KeyStyle) -> bool {
        self.bpm.is_finite() && self.bpm > 0.0
    }
}

impl Validity for LightColorEventBoxGroup {
    fn is_valid(&self, _style: KeyStyle) -> bool {
        self.boxes.iter().all(|event_box| {
            event_box.filter.filter_type > 0
                && event_box
                    .events
                    .iter()
                    .all(|event| event.brightness >= 0.0 && (0..=2).contains(&event.color))
        })
    }
}
