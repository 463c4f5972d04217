//! Basic beatmap events and the single-purpose events split out of them in `3.x`.

use super::{CustomData, Timed};

/// Basic event type of a color boost toggle in `2.x`.
pub const EVENT_TYPE_COLOR_BOOST: i32 = 5;
/// Basic event type of an early lane rotation in `2.x`.
pub const EVENT_TYPE_EARLY_ROTATION: i32 = 14;
/// Basic event type of a late lane rotation in `2.x`.
pub const EVENT_TYPE_LATE_ROTATION: i32 = 15;
/// Basic event type of a BPM change in `2.x`.
pub const EVENT_TYPE_BPM_CHANGE: i32 = 100;

/// What a basic event type controls. Custom data keys are interpreted per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    /// Light groups, types `0..=4`, `6`, `7`, `10` and `11`.
    Light,
    /// Ring rotation and zoom, types `8` and `9`.
    Ring,
    /// Laser rotation speed, types `12` and `13`.
    LaserRotation,
    /// Color boost, type `5`.
    ColorBoost,
    /// Lane rotation, types `14` and `15`.
    LaneRotation,
    /// BPM change, type `100`.
    BpmChange,
    /// Anything else.
    Other,
}

impl EventCategory {
    /// Category of the basic event type `event_type`.
    #[must_use]
    pub const fn of(event_type: i32) -> Self {
        match event_type {
            0..=4 | 6 | 7 | 10 | 11 => Self::Light,
            8 | 9 => Self::Ring,
            12 | 13 => Self::LaserRotation,
            EVENT_TYPE_COLOR_BOOST => Self::ColorBoost,
            EVENT_TYPE_EARLY_ROTATION | EVENT_TYPE_LATE_ROTATION => Self::LaneRotation,
            EVENT_TYPE_BPM_CHANGE => Self::BpmChange,
            _ => Self::Other,
        }
    }
}

/// A basic lighting or environment event.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicEvent {
    /// Beat of the event.
    pub time: f64,
    /// Event type.
    pub event_type: i32,
    /// Integer value, meaning depends on the type.
    pub value: i32,
    /// Float value, brightness for light events.
    pub float_value: f64,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Default for BasicEvent {
    fn default() -> Self {
        Self {
            time: 0.0,
            event_type: 0,
            value: 0,
            float_value: 1.0,
            custom_data: CustomData::new(),
        }
    }
}

impl BasicEvent {
    /// Category of this event's type.
    #[must_use]
    pub const fn category(&self) -> EventCategory {
        EventCategory::of(self.event_type)
    }

    /// Whether the event controls a light group.
    #[must_use]
    pub const fn is_light_event(&self) -> bool {
        matches!(self.category(), EventCategory::Light)
    }

    /// Whether the event controls ring rotation or zoom.
    #[must_use]
    pub const fn is_ring_event(&self) -> bool {
        matches!(self.category(), EventCategory::Ring)
    }

    /// Whether the event controls laser rotation speed.
    #[must_use]
    pub const fn is_laser_rotation_event(&self) -> bool {
        matches!(self.category(), EventCategory::LaserRotation)
    }

    /// Whether the event is a `2.x` lane rotation.
    #[must_use]
    pub const fn is_lane_rotation_event(&self) -> bool {
        matches!(self.category(), EventCategory::LaneRotation)
    }
}

impl Timed for BasicEvent {
    fn time(&self) -> f64 {
        self.time
    }
}

/// Toggles the boost color palette.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorBoostEvent {
    /// Beat of the event.
    pub time: f64,
    /// Whether boost colors are enabled from this beat on.
    pub toggle: bool,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Timed for ColorBoostEvent {
    fn time(&self) -> f64 {
        self.time
    }
}

/// When a lane rotation applies to objects on the same beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionTime {
    /// Objects on the same beat are already rotated.
    #[default]
    Early,
    /// Only objects after the beat are rotated.
    Late,
}

impl ExecutionTime {
    /// Wire code, `0` early and `1` late.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Early => 0,
            Self::Late => 1,
        }
    }

    /// Decodes the wire code. Anything but `1` is early.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        if code == 1 { Self::Late } else { Self::Early }
    }
}

/// Rotates the lanes of a 360 or 90 degree map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RotationEvent {
    /// Beat of the event.
    pub time: f64,
    /// Whether objects on the same beat are affected.
    pub execution_time: ExecutionTime,
    /// Clockwise rotation in degrees, relative to the current one.
    pub rotation: f64,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Timed for RotationEvent {
    fn time(&self) -> f64 {
        self.time
    }
}

/// Changes the tempo.
#[derive(Debug, Clone, PartialEq)]
pub struct BpmEvent {
    /// Beat of the change.
    pub time: f64,
    /// New tempo.
    pub bpm: f64,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Default for BpmEvent {
    fn default() -> Self {
        Self {
            time: 0.0,
            bpm: 120.0,
            custom_data: CustomData::new(),
        }
    }
}

impl Timed for BpmEvent {
    fn time(&self) -> f64 {
        self.time
    }
}

/// Event types triggered by one special keyword.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordEvents {
    /// The keyword.
    pub keyword: String,
    /// Basic event types enabled by the keyword.
    pub events: Vec<i32>,
}
