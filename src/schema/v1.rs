//! The `1.5.0` wire format.
//!
//! Objects carry no custom data. Root timing fields live in the difficulty file, and walls are either full height or crouch.

use super::{LEGACY_BOMB_TYPE, LegacyNote, SchemaContainer};
use crate::{
    beatmap::{self, BasicEvent, BombNote, ColorNote, CustomData, LegacyInfo},
    geometry::{
        OBSTACLE_TYPE_CROUCH, OBSTACLE_TYPE_FREE, OBSTACLE_TYPE_FULL_HEIGHT,
        legacy_obstacle_type, placement_of_legacy_obstacle_type,
    },
};

/// Version string written by this format.
pub const VERSION: &str = "1.5.0";

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
}

impl Note {
    /// Wire record of a color note.
    #[must_use]
    pub const fn from_color_note(note: &ColorNote) -> Self {
        Self {
            time: note.time,
            lane: note.lane,
            row: note.row,
            note_type: note.color,
            direction: note.direction,
        }
    }

    /// Wire record of a bomb.
    #[must_use]
    pub const fn from_bomb_note(bomb: &BombNote) -> Self {
        Self {
            time: bomb.time,
            lane: bomb.lane,
            row: bomb.row,
            note_type: LEGACY_BOMB_TYPE,
            direction: 0,
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
                ..BombNote::default()
            })
        } else {
            LegacyNote::Color(ColorNote {
                time: self.time,
                lane: self.lane,
                row: self.row,
                color: self.note_type,
                direction: self.direction,
                ..ColorNote::default()
            })
        }
    }
}

/// A wall.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Obstacle {
    /// Beat.
    #[serde(rename = "_time")]
    pub time: f64,
    /// Leftmost lane.
    #[serde(rename = "_lineIndex")]
    pub lane: i32,
    /// `0` full height, `1` crouch.
    #[serde(rename = "_type")]
    pub obstacle_type: i32,
    /// Length in beats.
    #[serde(rename = "_duration")]
    pub duration: f64,
    /// Lanes covered.
    #[serde(rename = "_width")]
    pub width: i32,
}

impl Default for Obstacle {
    fn default() -> Self {
        Self {
            time: 0.0,
            lane: 0,
            obstacle_type: OBSTACLE_TYPE_FULL_HEIGHT,
            duration: 1.0,
            width: 1,
        }
    }
}

impl SchemaContainer for Obstacle {
    type Canonical = beatmap::Obstacle;

    /// Freely placed walls have no type here; they become crouch walls from row 2 up and full height walls below.
    fn serialize(data: &beatmap::Obstacle) -> Self {
        let obstacle_type = match legacy_obstacle_type(data.row, data.height) {
            OBSTACLE_TYPE_FREE if data.row >= 2 => OBSTACLE_TYPE_CROUCH,
            OBSTACLE_TYPE_FREE => OBSTACLE_TYPE_FULL_HEIGHT,
            other => other,
        };
        Self {
            time: data.time,
            lane: data.lane,
            obstacle_type,
            duration: data.duration,
            width: data.width,
        }
    }

    fn deserialize(&self) -> beatmap::Obstacle {
        let (row, height) = placement_of_legacy_obstacle_type(self.obstacle_type)
            .unwrap_or(if self.obstacle_type >= 1000 {
                (0, self.obstacle_type)
            } else {
                (0, 5)
            });
        beatmap::Obstacle {
            time: self.time,
            lane: self.lane,
            row,
            duration: self.duration,
            width: self.width,
            height,
            ..beatmap::Obstacle::default()
        }
    }
}

/// A lighting event.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
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
}

impl SchemaContainer for Event {
    type Canonical = BasicEvent;

    fn serialize(data: &BasicEvent) -> Self {
        Self {
            time: data.time,
            event_type: data.event_type,
            value: data.value,
        }
    }

    fn deserialize(&self) -> BasicEvent {
        BasicEvent {
            time: self.time,
            event_type: self.event_type,
            value: self.value,
            ..BasicEvent::default()
        }
    }
}

/// A whole `1.5.0` difficulty file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Difficulty {
    /// Always `1.5.0`.
    #[serde(rename = "_version")]
    pub version: String,
    /// Song tempo.
    #[serde(rename = "_beatsPerMinute")]
    pub beats_per_minute: f64,
    /// Beats per bar.
    #[serde(rename = "_beatsPerBar")]
    pub beats_per_bar: f64,
    /// Swing amount.
    #[serde(rename = "_shuffle")]
    pub shuffle: f64,
    /// Swing period.
    #[serde(rename = "_shufflePeriod")]
    pub shuffle_period: f64,
    /// Note jump speed.
    #[serde(rename = "_noteJumpSpeed")]
    pub note_jump_speed: f64,
    /// Note jump start beat offset.
    #[serde(rename = "_noteJumpStartBeatOffset")]
    pub note_jump_start_beat_offset: f64,
    /// Events.
    #[serde(rename = "_events")]
    pub events: Vec<Event>,
    /// Notes and bombs.
    #[serde(rename = "_notes")]
    pub notes: Vec<Note>,
    /// Walls.
    #[serde(rename = "_obstacles")]
    pub obstacles: Vec<Obstacle>,
    /// Editor metadata such as `_time` and `_bookmarks`, kept as is.
    #[serde(flatten)]
    pub extra: CustomData,
}

impl Default for Difficulty {
    fn default() -> Self {
        let info = LegacyInfo::default();
        Self {
            version: VERSION.to_owned(),
            beats_per_minute: info.beats_per_minute,
            beats_per_bar: info.beats_per_bar,
            shuffle: info.shuffle,
            shuffle_period: info.shuffle_period,
            note_jump_speed: info.note_jump_speed,
            note_jump_start_beat_offset: info.note_jump_start_beat_offset,
            events: Vec::new(),
            notes: Vec::new(),
            obstacles: Vec::new(),
            extra: CustomData::new(),
        }
    }
}

impl SchemaContainer for Difficulty {
    type Canonical = beatmap::Difficulty;

    fn serialize(data: &beatmap::Difficulty) -> Self {
        let info = data.legacy_info.clone().unwrap_or_default();
        let mut notes: Vec<Note> = data
            .color_notes
            .iter()
            .map(Note::from_color_note)
            .chain(data.bomb_notes.iter().map(Note::from_bomb_note))
            .collect();
        notes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            version: data.version.clone(),
            beats_per_minute: info.beats_per_minute,
            beats_per_bar: info.beats_per_bar,
            shuffle: info.shuffle,
            shuffle_period: info.shuffle_period,
            note_jump_speed: info.note_jump_speed,
            note_jump_start_beat_offset: info.note_jump_start_beat_offset,
            events: data.basic_events.iter().map(Event::serialize).collect(),
            notes,
            obstacles: data.obstacles.iter().map(Obstacle::serialize).collect(),
            extra: data.custom_data.clone(),
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
        difficulty.obstacles = self.obstacles.iter().map(Obstacle::deserialize).collect();
        difficulty.basic_events = self.events.iter().map(Event::deserialize).collect();
        difficulty.legacy_info = Some(LegacyInfo {
            beats_per_minute: self.beats_per_minute,
            beats_per_bar: self.beats_per_bar,
            shuffle: self.shuffle,
            shuffle_period: self.shuffle_period,
            note_jump_speed: self.note_jump_speed,
            note_jump_start_beat_offset: self.note_jump_start_beat_offset,
        });
        difficulty.custom_data = self.extra.clone();
        difficulty
    }
}
