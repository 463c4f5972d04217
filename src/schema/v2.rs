//! The `2.x` wire format.
//!
//! Boosts, lane rotations and BPM changes are basic events of special types here, and fake objects are ordinary objects flagged `_fake` in their custom data. Both are left as they are by these containers; splitting them is a conversion concern.

use super::{LEGACY_BOMB_TYPE, LegacyNote, SchemaContainer};
use crate::{
    beatmap::{self, BasicEvent, BombNote, ColorNote, CustomData, KeywordEvents, Waypoint},
    geometry::{OBSTACLE_TYPE_FREE, legacy_obstacle_type, placement_of_legacy_obstacle_type},
};

/// Version string written by this format.
pub const VERSION: &str = "2.6.0";

/// A note or bomb.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Note {
    /// Beat.
    #[serde(rename = "_time")]
    pub time: f64,
    /// Lane.
    #[serde(rename = "_lineIndex")]
    pub lane: i32,
    /// Row.
    #[serde(rename = "_lineLayer")]
    pub row: i32,
    /// `0` red, `1` blue, `3` bomb.
    #[serde(rename = "_type")]
    pub note_type: i32,
    /// Cut direction.
    #[serde(rename = "_cutDirection")]
    pub direction: i32,
    /// Metadata bag.
    #[serde(rename = "_customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Note {
    /// Wire record of a color note. The angle offset has no field here and is dropped.
    #[must_use]
    pub fn from_color_note(note: &ColorNote) -> Self {
        Self {
            time: note.time,
            lane: note.lane,
            row: note.row,
            note_type: note.color,
            direction: note.direction,
            custom_data: note.custom_data.clone(),
        }
    }

    /// Wire record of a bomb.
    #[must_use]
    pub fn from_bomb_note(bomb: &BombNote) -> Self {
        Self {
            time: bomb.time,
            lane: bomb.lane,
            row: bomb.row,
            note_type: LEGACY_BOMB_TYPE,
            direction: 0,
            custom_data: bomb.custom_data.clone(),
        }
    }
}

impl SchemaContainer for Note {
    type Canonical = LegacyNote;

    fn serialize(data: &LegacyNote) -> Self {
        match data {
            LegacyNote::Color(note) => Self::from_color_note(note),
            LegacyNote::Bomb(bomb) => Self::from_bomb_note(bomb),
        }
    }

    fn deserialize(&self) -> LegacyNote {
        if self.note_type == LEGACY_BOMB_TYPE {
            LegacyNote::Bomb(BombNote {
                time: self.time,
                lane: self.lane,
                row: self.row,
                lane_rotation: 0,
                custom_data: self.custom_data.clone(),
            })
        } else {
            LegacyNote::Color(ColorNote {
                time: self.time,
                lane: self.lane,
                row: self.row,
                color: self.note_type,
                direction: self.direction,
                custom_data: self.custom_data.clone(),
                ..ColorNote::default()
            })
        }
    }
}

/// A wall.
///
/// `_lineLayer` and `_height` only take effect for type `2`; the other types imply them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Obstacle {
    /// Beat.
    #[serde(rename = "_time")]
    pub time: f64,
    /// Leftmost lane.
    #[serde(rename = "_lineIndex")]
    pub lane: i32,
    /// Bottom row for type `2`, written as `0` otherwise.
    #[serde(rename = "_lineLayer")]
    pub row: i32,
    /// `0` full height, `1` crouch, `2` free placement.
    #[serde(rename = "_type")]
    pub obstacle_type: i32,
    /// Length in beats.
    #[serde(rename = "_duration")]
    pub duration: f64,
    /// Lanes covered.
    #[serde(rename = "_width")]
    pub width: i32,
    /// Height for type `2`.
    #[serde(rename = "_height")]
    pub height: i32,
    /// Metadata bag.
    #[serde(rename = "_customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for Obstacle {
    fn default() -> Self {
        Self {
            time: 0.0,
            lane: 0,
            row: 0,
            obstacle_type: 0,
            duration: 1.0,
            width: 1,
            height: 5,
            custom_data: CustomData::new(),
        }
    }
}

impl SchemaContainer for Obstacle {
    type Canonical = beatmap::Obstacle;

    fn serialize(data: &beatmap::Obstacle) -> Self {
        let obstacle_type = legacy_obstacle_type(data.row, data.height);
        let row = if obstacle_type == OBSTACLE_TYPE_FREE || obstacle_type >= 1000 {
            data.row
        } else {
            0
        };
        Self {
            time: data.time,
            lane: data.lane,
            row,
            obstacle_type,
            duration: data.duration,
            width: data.width,
            height: data.height,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> beatmap::Obstacle {
        let (row, height) = match placement_of_legacy_obstacle_type(self.obstacle_type) {
            Some(placement) => placement,
            None if self.obstacle_type >= 1000 => (self.row, self.obstacle_type),
            None => (self.row, self.height),
        };
        beatmap::Obstacle {
            time: self.time,
            lane: self.lane,
            row,
            duration: self.duration,
            width: self.width,
            height,
            lane_rotation: 0,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A basic event.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Event {
    /// Beat.
    #[serde(rename = "_time")]
    pub time: f64,
    /// Event type.
    #[serde(rename = "_type")]
    pub event_type: i32,
    /// Value.
    #[serde(rename = "_value")]
    pub value: i32,
    /// Float value.
    #[serde(rename = "_floatValue")]
    pub float_value: f64,
    /// Metadata bag.
    #[serde(rename = "_customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for Event {
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

impl SchemaContainer for Event {
    type Canonical = BasicEvent;

    fn serialize(data: &BasicEvent) -> Self {
        Self {
            time: data.time,
            event_type: data.event_type,
            value: data.value,
            float_value: data.float_value,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> BasicEvent {
        BasicEvent {
            time: self.time,
            event_type: self.event_type,
            value: self.value,
            float_value: self.float_value,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// An arc.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Slider {
    /// Saber color.
    #[serde(rename = "_colorType")]
    pub color: i32,
    /// Beat of the head.
    #[serde(rename = "_headTime")]
    pub time: f64,
    /// Head lane.
    #[serde(rename = "_headLineIndex")]
    pub lane: i32,
    /// Head row.
    #[serde(rename = "_headLineLayer")]
    pub row: i32,
    /// Head control point length multiplier.
    #[serde(
        rename = "_headControlPointLengthMultiplier",
        alias = "_headControlPointlengthMultiplier"
    )]
    pub length_multiplier: f64,
    /// Head cut direction.
    #[serde(rename = "_headCutDirection")]
    pub direction: i32,
    /// Beat of the tail.
    #[serde(rename = "_tailTime")]
    pub tail_time: f64,
    /// Tail lane.
    #[serde(rename = "_tailLineIndex")]
    pub tail_lane: i32,
    /// Tail row.
    #[serde(rename = "_tailLineLayer")]
    pub tail_row: i32,
    /// Tail control point length multiplier.
    #[serde(rename = "_tailControlPointLengthMultiplier")]
    pub tail_length_multiplier: f64,
    /// Tail cut direction.
    #[serde(rename = "_tailCutDirection")]
    pub tail_direction: i32,
    /// Mid anchor mode.
    #[serde(rename = "_sliderMidAnchorMode")]
    pub mid_anchor: i32,
    /// Metadata bag.
    #[serde(rename = "_customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for Slider {
    fn default() -> Self {
        Self::serialize(&beatmap::Arc::default())
    }
}

impl SchemaContainer for Slider {
    type Canonical = beatmap::Arc;

    fn serialize(data: &beatmap::Arc) -> Self {
        Self {
            color: data.color,
            time: data.time,
            lane: data.lane,
            row: data.row,
            length_multiplier: data.length_multiplier,
            direction: data.direction,
            tail_time: data.tail_time,
            tail_lane: data.tail_lane,
            tail_row: data.tail_row,
            tail_length_multiplier: data.tail_length_multiplier,
            tail_direction: data.tail_direction,
            mid_anchor: data.mid_anchor,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> beatmap::Arc {
        beatmap::Arc {
            time: self.time,
            color: self.color,
            lane: self.lane,
            row: self.row,
            direction: self.direction,
            length_multiplier: self.length_multiplier,
            tail_time: self.tail_time,
            tail_lane: self.tail_lane,
            tail_row: self.tail_row,
            tail_direction: self.tail_direction,
            tail_length_multiplier: self.tail_length_multiplier,
            mid_anchor: self.mid_anchor,
            lane_rotation: 0,
            tail_lane_rotation: 0,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A waypoint.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaypointRecord {
    /// Beat.
    #[serde(rename = "_time")]
    pub time: f64,
    /// Lane.
    #[serde(rename = "_lineIndex")]
    pub lane: i32,
    /// Row.
    #[serde(rename = "_lineLayer")]
    pub row: i32,
    /// Offset direction.
    #[serde(rename = "_offsetDirection")]
    pub direction: i32,
    /// Metadata bag.
    #[serde(rename = "_customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for WaypointRecord {
    type Canonical = Waypoint;

    fn serialize(data: &Waypoint) -> Self {
        Self {
            time: data.time,
            lane: data.lane,
            row: data.row,
            direction: data.direction,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> Waypoint {
        Waypoint {
            time: self.time,
            lane: self.lane,
            row: self.row,
            direction: self.direction,
            lane_rotation: 0,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// Event types enabled by one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Keyword {
    /// The keyword.
    #[serde(rename = "_keyword")]
    pub keyword: String,
    /// Enabled event types.
    #[serde(rename = "_specialEvents")]
    pub special_events: Vec<i32>,
}

impl SchemaContainer for Keyword {
    type Canonical = KeywordEvents;

    fn serialize(data: &KeywordEvents) -> Self {
        Self {
            keyword: data.keyword.clone(),
            special_events: data.events.clone(),
        }
    }

    fn deserialize(&self) -> KeywordEvents {
        KeywordEvents {
            keyword: self.keyword.clone(),
            events: self.special_events.clone(),
        }
    }
}

/// The keyword filter list.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpecialEventsKeywordFilters {
    /// Keywords.
    #[serde(rename = "_keywords")]
    pub keywords: Vec<Keyword>,
}

/// A whole `2.x` difficulty file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Difficulty {
    /// Version string.
    #[serde(rename = "_version")]
    pub version: String,
    /// Notes and bombs.
    #[serde(rename = "_notes")]
    pub notes: Vec<Note>,
    /// Arcs.
    #[serde(rename = "_sliders")]
    pub sliders: Vec<Slider>,
    /// Walls.
    #[serde(rename = "_obstacles")]
    pub obstacles: Vec<Obstacle>,
    /// Basic events, including boosts, lane rotations and BPM changes.
    #[serde(rename = "_events")]
    pub events: Vec<Event>,
    /// Waypoints.
    #[serde(rename = "_waypoints")]
    pub waypoints: Vec<WaypointRecord>,
    /// Keyword filters.
    #[serde(rename = "_specialEventsKeywordFilters")]
    pub special_events_keyword_filters: SpecialEventsKeywordFilters,
    /// Difficulty-level custom data.
    #[serde(rename = "_customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            version: VERSION.to_owned(),
            notes: Vec::new(),
            sliders: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            waypoints: Vec::new(),
            special_events_keyword_filters: SpecialEventsKeywordFilters::default(),
            custom_data: CustomData::new(),
        }
    }
}

impl SchemaContainer for Difficulty {
    type Canonical = beatmap::Difficulty;

    fn serialize(data: &beatmap::Difficulty) -> Self {
        let mut notes: Vec<Note> = data
            .color_notes
            .iter()
            .map(Note::from_color_note)
            .chain(data.bomb_notes.iter().map(Note::from_bomb_note))
            .collect();
        notes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            version: data.version.clone(),
            notes,
            sliders: data.arcs.iter().map(Slider::serialize).collect(),
            obstacles: data.obstacles.iter().map(Obstacle::serialize).collect(),
            events: data.basic_events.iter().map(Event::serialize).collect(),
            waypoints: data
                .waypoints
                .iter()
                .map(WaypointRecord::serialize)
                .collect(),
            special_events_keyword_filters: SpecialEventsKeywordFilters {
                keywords: data.keyword_events.iter().map(Keyword::serialize).collect(),
            },
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> beatmap::Difficulty {
        let mut difficulty = beatmap::Difficulty::new(self.version.clone());
        for note in &self.notes {
            match note.deserialize() {
                LegacyNote::Color(note) => difficulty.color_notes.push(note),
                LegacyNote::Bomb(bomb) => difficulty.bomb_notes.push(bomb),
            }
        }
        difficulty.arcs = self.sliders.iter().map(Slider::deserialize).collect();
        difficulty.obstacles = self.obstacles.iter().map(Obstacle::deserialize).collect();
        difficulty.basic_events = self.events.iter().map(Event::deserialize).collect();
        difficulty.waypoints = self
            .waypoints
            .iter()
            .map(WaypointRecord::deserialize)
            .collect();
        difficulty.keyword_events = self
            .special_events_keyword_filters
            .keywords
            .iter()
            .map(Keyword::deserialize)
            .collect();
        difficulty.custom_data = self.custom_data.clone();
        difficulty
    }
}
