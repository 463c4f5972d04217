//! The version-independent model of one difficulty.
//!
//! Every wire format (`1.5.0`, `2.6.0`, `3.x`, `4.0.0`) is read into a [`Difficulty`], which holds the canonical attributes of each game object. The model is a superset of all versions: collections that a version cannot express are simply left empty when reading it, and dropped when writing it.
//!
//! Custom data is kept in the key style of the version the difficulty was read from (see [`KeyStyle`]). Re-keying between the legacy `_`-prefixed style and the modern style is the job of [`crate::convert`].

use std::fmt;

use itertools::Itertools;

pub mod event;
pub mod lightshow;
pub mod object;

pub use self::{
    event::{
        BasicEvent, BpmEvent, ColorBoostEvent, EventCategory, ExecutionTime, KeywordEvents,
        RotationEvent,
    },
    lightshow::{
        IndexFilter, LightColorEvent, LightColorEventBox, LightColorEventBoxGroup,
        LightRotationEvent, LightRotationEventBox, LightRotationEventBoxGroup,
        LightTranslationEvent, LightTranslationEventBox, LightTranslationEventBoxGroup,
    },
    object::{Arc, BombNote, Chain, ColorNote, Obstacle, Waypoint},
};

/// The free-form metadata bag attached to objects and to the difficulty itself.
pub type CustomData = serde_json::Map<String, serde_json::Value>;

/// The naming convention of custom data keys.
///
/// Schema versions up to 2 prefix every custom data key with an underscore (`_color`, `_track`), later versions drop the prefix and rename several keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyStyle {
    /// `_`-prefixed keys of `1.x` and `2.x`.
    Legacy,
    /// Unprefixed keys of `3.x` and `4.x`.
    Modern,
}

impl KeyStyle {
    /// Key style used by the schema of major version `major`.
    #[must_use]
    pub const fn from_major(major: u32) -> Self {
        if major <= 2 {
            Self::Legacy
        } else {
            Self::Modern
        }
    }
}

/// Kinds of object a difficulty can contain, used to locate warnings and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ObjectKind {
    /// [`ColorNote`].
    ColorNote,
    /// [`BombNote`].
    BombNote,
    /// [`Obstacle`].
    Obstacle,
    /// [`Arc`].
    Arc,
    /// [`Chain`].
    Chain,
    /// [`Waypoint`].
    Waypoint,
    /// [`BasicEvent`].
    BasicEvent,
    /// [`ColorBoostEvent`].
    ColorBoostEvent,
    /// [`RotationEvent`].
    RotationEvent,
    /// [`BpmEvent`].
    BpmEvent,
    /// [`LightColorEventBoxGroup`].
    LightColorEventBoxGroup,
    /// [`LightRotationEventBoxGroup`].
    LightRotationEventBoxGroup,
    /// [`LightTranslationEventBoxGroup`].
    LightTranslationEventBoxGroup,
    /// An entry of the difficulty-level custom event list.
    CustomEvent,
    /// An entry of the difficulty-level environment enhancement list.
    Environment,
    /// A material definition in the difficulty-level custom data.
    Material,
    /// The difficulty-level custom data itself.
    Difficulty,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ColorNote => "color note",
            Self::BombNote => "bomb note",
            Self::Obstacle => "obstacle",
            Self::Arc => "arc",
            Self::Chain => "chain",
            Self::Waypoint => "waypoint",
            Self::BasicEvent => "basic event",
            Self::ColorBoostEvent => "color boost event",
            Self::RotationEvent => "rotation event",
            Self::BpmEvent => "BPM event",
            Self::LightColorEventBoxGroup => "light color event box group",
            Self::LightRotationEventBoxGroup => "light rotation event box group",
            Self::LightTranslationEventBoxGroup => "light translation event box group",
            Self::CustomEvent => "custom event",
            Self::Environment => "environment entry",
            Self::Material => "material",
            Self::Difficulty => "difficulty",
        };
        f.write_str(name)
    }
}

/// Location of one object inside a [`Difficulty`] collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectRef {
    /// Which collection the object lives in.
    pub kind: ObjectKind,
    /// Index in that collection.
    pub index: usize,
    /// Beat of the object, if it has one.
    pub time: Option<f64>,
}

impl ObjectRef {
    /// Creates a reference to a timed object.
    #[must_use]
    pub const fn new(kind: ObjectKind, index: usize, time: f64) -> Self {
        Self {
            kind,
            index,
            time: Some(time),
        }
    }

    /// Creates a reference to an untimed entry, such as an environment enhancement.
    #[must_use]
    pub const fn untimed(kind: ObjectKind, index: usize) -> Self {
        Self {
            kind,
            index,
            time: None,
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(f, "{} #{} at beat {}", self.kind, self.index, time),
            None => write!(f, "{} #{}", self.kind, self.index),
        }
    }
}

/// Objects placed on the beat timeline.
pub trait Timed {
    /// The beat at which the object starts.
    fn time(&self) -> f64;
}

/// Root timing fields of the `1.5.0` format, which later versions moved into the info file.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyInfo {
    /// `_beatsPerMinute`.
    pub beats_per_minute: f64,
    /// `_beatsPerBar`.
    pub beats_per_bar: f64,
    /// `_shuffle`.
    pub shuffle: f64,
    /// `_shufflePeriod`.
    pub shuffle_period: f64,
    /// `_noteJumpSpeed`.
    pub note_jump_speed: f64,
    /// `_noteJumpStartBeatOffset`.
    pub note_jump_start_beat_offset: f64,
}

impl Default for LegacyInfo {
    fn default() -> Self {
        Self {
            beats_per_minute: 120.0,
            beats_per_bar: 4.0,
            shuffle: 0.0,
            shuffle_period: 0.5,
            note_jump_speed: 10.0,
            note_jump_start_beat_offset: 0.0,
        }
    }
}

/// One playable chart: every timed object for a song at one skill level.
#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
    /// Dotted schema version such as `3.2.0`. Its major component selects the wire format.
    pub version: String,
    /// Name of the file the difficulty was read from, kept for the saver.
    pub filename: String,
    /// Notes to be cut.
    pub color_notes: Vec<ColorNote>,
    /// Bombs to be avoided.
    pub bomb_notes: Vec<BombNote>,
    /// Walls.
    pub obstacles: Vec<Obstacle>,
    /// Arcs, called sliders in `2.6.0` and `3.x`.
    pub arcs: Vec<Arc>,
    /// Chains, called burst sliders in `3.x`.
    pub chains: Vec<Chain>,
    /// Waypoints.
    pub waypoints: Vec<Waypoint>,
    /// Basic lighting and environment events. Difficulties read from `2.x` also keep their boost, lane rotation and BPM change events here.
    pub basic_events: Vec<BasicEvent>,
    /// Color boost toggles.
    pub color_boost_events: Vec<ColorBoostEvent>,
    /// Lane rotations, called spawn rotations in `4.0.0`.
    pub rotation_events: Vec<RotationEvent>,
    /// BPM changes.
    pub bpm_events: Vec<BpmEvent>,
    /// Group lighting color events.
    pub light_color_event_box_groups: Vec<LightColorEventBoxGroup>,
    /// Group lighting rotation events.
    pub light_rotation_event_box_groups: Vec<LightRotationEventBoxGroup>,
    /// Group lighting translation events.
    pub light_translation_event_box_groups: Vec<LightTranslationEventBoxGroup>,
    /// Special event keyword filters.
    pub keyword_events: Vec<KeywordEvents>,
    /// Whether basic events also drive group lighting environments.
    pub use_normal_events_as_compatible_events: bool,
    /// Root timing fields of `1.5.0`.
    pub legacy_info: Option<LegacyInfo>,
    /// Difficulty-level custom data (environment, custom events, materials, point definitions, fake objects and so on).
    pub custom_data: CustomData,
}

impl Difficulty {
    /// Creates an empty difficulty tagged with `version`.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            filename: String::new(),
            color_notes: Vec::new(),
            bomb_notes: Vec::new(),
            obstacles: Vec::new(),
            arcs: Vec::new(),
            chains: Vec::new(),
            waypoints: Vec::new(),
            basic_events: Vec::new(),
            color_boost_events: Vec::new(),
            rotation_events: Vec::new(),
            bpm_events: Vec::new(),
            light_color_event_box_groups: Vec::new(),
            light_rotation_event_box_groups: Vec::new(),
            light_translation_event_box_groups: Vec::new(),
            keyword_events: Vec::new(),
            use_normal_events_as_compatible_events: false,
            legacy_info: None,
            custom_data: CustomData::new(),
        }
    }

    /// Major component of [`Self::version`], if it is a number.
    #[must_use]
    pub fn major_version(&self) -> Option<u32> {
        parse_major_version(&self.version)
    }

    /// Key style of the custom data held by this difficulty. Unparsable versions are treated as legacy, the same fallback the loader applies to a missing version.
    #[must_use]
    pub fn key_style(&self) -> KeyStyle {
        KeyStyle::from_major(self.major_version().unwrap_or(2))
    }

    /// Sorts every collection by time. Objects on the same beat keep their relative order.
    pub fn sort(&mut self) {
        sort_by_time(&mut self.color_notes);
        sort_by_time(&mut self.bomb_notes);
        sort_by_time(&mut self.obstacles);
        sort_by_time(&mut self.arcs);
        sort_by_time(&mut self.chains);
        sort_by_time(&mut self.waypoints);
        sort_by_time(&mut self.basic_events);
        sort_by_time(&mut self.color_boost_events);
        sort_by_time(&mut self.rotation_events);
        sort_by_time(&mut self.bpm_events);
        sort_by_time(&mut self.light_color_event_box_groups);
        sort_by_time(&mut self.light_rotation_event_box_groups);
        sort_by_time(&mut self.light_translation_event_box_groups);
    }

    /// Whether every collection is sorted by time, non-decreasing.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        is_sorted_by_time(&self.color_notes)
            && is_sorted_by_time(&self.bomb_notes)
            && is_sorted_by_time(&self.obstacles)
            && is_sorted_by_time(&self.arcs)
            && is_sorted_by_time(&self.chains)
            && is_sorted_by_time(&self.waypoints)
            && is_sorted_by_time(&self.basic_events)
            && is_sorted_by_time(&self.color_boost_events)
            && is_sorted_by_time(&self.rotation_events)
            && is_sorted_by_time(&self.bpm_events)
            && is_sorted_by_time(&self.light_color_event_box_groups)
            && is_sorted_by_time(&self.light_rotation_event_box_groups)
            && is_sorted_by_time(&self.light_translation_event_box_groups)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new("3.2.0")
    }
}

/// Parses the major component of a dotted version string such as `2.6.0`.
#[must_use]
pub fn parse_major_version(version: &str) -> Option<u32> {
    version.split('.').next()?.trim().parse().ok()
}

fn sort_by_time<T: Timed>(objects: &mut [T]) {
    objects.sort_by(|a, b| a.time().total_cmp(&b.time()));
}

fn is_sorted_by_time<T: Timed>(objects: &[T]) -> bool {
    objects
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.time() <= b.time())
}
