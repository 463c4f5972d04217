//! Group lighting: event box groups addressing a filtered subset of lights in an environment group.
//!
//! Event times inside a box are relative to the time of the group.

use super::{CustomData, Timed};

/// Selects which lights of a group an event box drives.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexFilter {
    /// `1` divides the group into sections, `2` steps through it.
    pub filter_type: i32,
    /// Section count or start index.
    pub p0: i32,
    /// Section index or step.
    pub p1: i32,
    /// Whether the order is reversed.
    pub reverse: i32,
    /// Number of lights chunked together.
    pub chunks: i32,
    /// Random behaviour flags.
    pub random: i32,
    /// Random seed.
    pub seed: i32,
    /// Fraction of the selection kept.
    pub limit: f64,
    /// Which distributions the limit also affects.
    pub limit_affects: i32,
}

impl Default for IndexFilter {
    fn default() -> Self {
        Self {
            filter_type: 1,
            p0: 1,
            p1: 0,
            reverse: 0,
            chunks: 0,
            random: 0,
            seed: 0,
            limit: 0.0,
            limit_affects: 0,
        }
    }
}

macro_rules! impl_timed {
    ($($ty:ty),* $(,)?) => {
        $(impl Timed for $ty {
            fn time(&self) -> f64 {
                self.time
            }
        })*
    };
}

/// A group of light color event boxes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightColorEventBoxGroup {
    /// Beat of the group.
    pub time: f64,
    /// Environment light group id.
    pub group_id: i32,
    /// Boxes of the group.
    pub boxes: Vec<LightColorEventBox>,
    /// Metadata bag.
    pub custom_data: CustomData,
}

/// Color events applied to the lights selected by a filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightColorEventBox {
    /// Light selection.
    pub filter: IndexFilter,
    /// Beat distribution value.
    pub beat_distribution: f64,
    /// `1` wave, `2` step.
    pub beat_distribution_type: i32,
    /// Brightness distribution value.
    pub brightness_distribution: f64,
    /// `1` wave, `2` step.
    pub brightness_distribution_type: i32,
    /// Whether the distribution also affects the first event.
    pub affect_first: i32,
    /// Distribution easing.
    pub easing: i32,
    /// Events of the box.
    pub events: Vec<LightColorEvent>,
    /// Metadata bag.
    pub custom_data: CustomData,
}

/// One light color change.
#[derive(Debug, Clone, PartialEq)]
pub struct LightColorEvent {
    /// Beat relative to the group.
    pub time: f64,
    /// `1` keeps the color of the previous event.
    pub previous: i32,
    /// Transition easing from the previous event, `-1` is instant.
    pub easing: i32,
    /// `0` red, `1` blue, `2` white.
    pub color: i32,
    /// Brightness.
    pub brightness: f64,
    /// Strobe frequency.
    pub frequency: i32,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Default for LightColorEvent {
    fn default() -> Self {
        Self {
            time: 0.0,
            previous: 0,
            easing: 0,
            color: 0,
            brightness: 1.0,
            frequency: 0,
            custom_data: CustomData::new(),
        }
    }
}

impl LightColorEvent {
    /// Transition code of `3.x`: `0` instant, `1` interpolate, `2` extend.
    #[must_use]
    pub const fn transition(&self) -> i32 {
        if self.previous == 1 {
            2
        } else if self.easing == -1 {
            0
        } else {
            1
        }
    }

    /// Whether [`Self::transition`] captures the previous and easing fields exactly.
    #[must_use]
    pub const fn has_exact_transition(&self) -> bool {
        matches!((self.previous, self.easing), (1, 0) | (0, -1 | 0))
    }

    /// Previous and easing fields of a `3.x` transition code.
    #[must_use]
    pub const fn fields_of_transition(transition: i32) -> (i32, i32) {
        match transition {
            0 => (0, -1),
            2 => (1, 0),
            _ => (0, 0),
        }
    }
}

/// A group of light rotation event boxes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightRotationEventBoxGroup {
    /// Beat of the group.
    pub time: f64,
    /// Environment light group id.
    pub group_id: i32,
    /// Boxes of the group.
    pub boxes: Vec<LightRotationEventBox>,
    /// Metadata bag.
    pub custom_data: CustomData,
}

/// Rotation events applied to the lights selected by a filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightRotationEventBox {
    /// Light selection.
    pub filter: IndexFilter,
    /// Beat distribution value.
    pub beat_distribution: f64,
    /// `1` wave, `2` step.
    pub beat_distribution_type: i32,
    /// Rotation distribution value.
    pub rotation_distribution: f64,
    /// `1` wave, `2` step.
    pub rotation_distribution_type: i32,
    /// `0` x, `1` y, `2` z.
    pub axis: i32,
    /// Whether the rotation is mirrored.
    pub flip: i32,
    /// Whether the distribution also affects the first event.
    pub affect_first: i32,
    /// Distribution easing.
    pub easing: i32,
    /// Events of the box.
    pub events: Vec<LightRotationEvent>,
    /// Metadata bag.
    pub custom_data: CustomData,
}

/// One light rotation change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightRotationEvent {
    /// Beat relative to the group.
    pub time: f64,
    /// `1` extends the previous event.
    pub previous: i32,
    /// Transition easing.
    pub easing: i32,
    /// Additional full loops.
    pub loop_count: i32,
    /// Rotation in degrees.
    pub rotation: f64,
    /// `0` automatic, `1` clockwise, `2` counter-clockwise.
    pub direction: i32,
    /// Metadata bag.
    pub custom_data: CustomData,
}

/// A group of light translation event boxes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightTranslationEventBoxGroup {
    /// Beat of the group.
    pub time: f64,
    /// Environment light group id.
    pub group_id: i32,
    /// Boxes of the group.
    pub boxes: Vec<LightTranslationEventBox>,
    /// Metadata bag.
    pub custom_data: CustomData,
}

/// Translation events applied to the lights selected by a filter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightTranslationEventBox {
    /// Light selection.
    pub filter: IndexFilter,
    /// Beat distribution value.
    pub beat_distribution: f64,
    /// `1` wave, `2` step.
    pub beat_distribution_type: i32,
    /// Gap distribution value.
    pub gap_distribution: f64,
    /// `1` wave, `2` step.
    pub gap_distribution_type: i32,
    /// `0` x, `1` y, `2` z.
    pub axis: i32,
    /// Whether the translation is mirrored.
    pub flip: i32,
    /// Whether the distribution also affects the first event.
    pub affect_first: i32,
    /// Distribution easing.
    pub easing: i32,
    /// Events of the box.
    pub events: Vec<LightTranslationEvent>,
    /// Metadata bag.
    pub custom_data: CustomData,
}

/// One light translation change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightTranslationEvent {
    /// Beat relative to the group.
    pub time: f64,
    /// `1` extends the previous event.
    pub previous: i32,
    /// Transition easing.
    pub easing: i32,
    /// Translation distance.
    pub translation: f64,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl_timed!(
    LightColorEventBoxGroup,
    LightRotationEventBoxGroup,
    LightTranslationEventBoxGroup,
);
