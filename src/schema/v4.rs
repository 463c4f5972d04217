//! The `4.x` wire format.
//!
//! A difficulty is two documents. The beatmap file holds gameplay objects and spawn rotations; the lightshow file holds waypoints, basic events, boosts and event box groups. Every object is split into a small record with its beat and lane rotation, and an index into a data pool shared by identical objects.
//!
//! Serializing interns pool entries in first-seen order. Deserializing an index that points past its pool reads the default entry.

use std::{any::TypeId, collections::HashMap};

use serde::Serialize;

use super::{
    SchemaContainer,
    v3::{BasicEventTypesWithKeywords, IndexFilterRecord, KeywordRecord},
};
use crate::beatmap::{
    self, BasicEvent, BombNote, ColorBoostEvent, ColorNote, CustomData, ExecutionTime,
    LightColorEvent, LightColorEventBox, LightColorEventBoxGroup, LightRotationEvent,
    LightRotationEventBox, LightRotationEventBoxGroup, LightTranslationEvent,
    LightTranslationEventBox, LightTranslationEventBoxGroup, RotationEvent, Waypoint,
};

/// Version string written by this format.
pub const VERSION: &str = "4.0.0";

/// Group type of light color event boxes.
pub const GROUP_TYPE_COLOR: i32 = 1;
/// Group type of light rotation event boxes.
pub const GROUP_TYPE_ROTATION: i32 = 2;
/// Group type of light translation event boxes.
pub const GROUP_TYPE_TRANSLATION: i32 = 3;

/// Pool positions of the entries interned so far, keyed by pool type and serialized entry.
#[derive(Debug, Default)]
struct PoolIndex(HashMap<(TypeId, String), usize>);

impl PoolIndex {
    /// Returns the index of `item` in `pool`, appending it first if absent.
    fn intern<T: Serialize + 'static>(&mut self, pool: &mut Vec<T>, item: T) -> usize {
        let Ok(key) = serde_json::to_string(&item) else {
            pool.push(item);
            return pool.len() - 1;
        };
        *self.0.entry((TypeId::of::<T>(), key)).or_insert_with(|| {
            pool.push(item);
            pool.len() - 1
        })
    }
}

fn lookup<T: Clone + Default>(pool: &[T], index: usize) -> T {
    pool.get(index).cloned().unwrap_or_default()
}

/// A gameplay object placed in time and lane rotation.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ObjectRecord {
    /// Beat.
    pub b: f64,
    /// Lane rotation in degrees.
    pub r: i32,
    /// Index into the data pool.
    pub i: usize,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

/// An entry placed in time only.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IndexedRecord {
    /// Beat.
    pub b: f64,
    /// Index into the data pool.
    pub i: usize,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

/// Pooled note data, also used for arc and chain heads and tails.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorNoteData {
    /// Lane.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Color.
    pub c: i32,
    /// Cut direction.
    pub d: i32,
    /// Angle offset.
    pub a: i32,
}

/// Pooled bomb data.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BombNoteData {
    /// Lane.
    pub x: i32,
    /// Row.
    pub y: i32,
}

/// Pooled wall data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ObstacleData {
    /// Duration in beats.
    pub d: f64,
    /// Leftmost lane.
    pub x: i32,
    /// Bottom row.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Default for ObstacleData {
    fn default() -> Self {
        Self {
            d: 1.0,
            x: 0,
            y: 0,
            w: 1,
            h: 5,
        }
    }
}

/// An arc between two pooled notes.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArcRecord {
    /// Head beat.
    pub hb: f64,
    /// Tail beat.
    pub tb: f64,
    /// Head lane rotation.
    pub hr: i32,
    /// Tail lane rotation.
    pub tr: i32,
    /// Head note data index.
    pub hi: usize,
    /// Tail note data index.
    pub ti: usize,
    /// Arc data index.
    pub ai: usize,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

/// Pooled arc data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArcData {
    /// Head control point length multiplier.
    pub m: f64,
    /// Tail control point length multiplier.
    pub tm: f64,
    /// Mid anchor mode.
    pub a: i32,
}

impl Default for ArcData {
    fn default() -> Self {
        Self {
            m: 1.0,
            tm: 1.0,
            a: 0,
        }
    }
}

/// A chain from a pooled head note.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChainRecord {
    /// Head beat.
    pub hb: f64,
    /// Tail beat.
    pub tb: f64,
    /// Head lane rotation.
    pub hr: i32,
    /// Tail lane rotation.
    pub tr: i32,
    /// Head note data index.
    pub i: usize,
    /// Chain data index.
    pub ci: usize,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

/// Pooled chain data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChainData {
    /// Tail lane.
    pub tx: i32,
    /// Tail row.
    pub ty: i32,
    /// Slice count.
    pub c: i32,
    /// Squish factor.
    pub s: f64,
}

impl Default for ChainData {
    fn default() -> Self {
        Self {
            tx: 0,
            ty: 0,
            c: 3,
            s: 1.0,
        }
    }
}

/// Pooled spawn rotation data.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpawnRotationData {
    /// `0` early, `1` late.
    pub t: i32,
    /// Rotation in degrees.
    pub r: f64,
}

/// Pooled waypoint data.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaypointData {
    /// Lane.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Offset direction.
    pub d: i32,
}

/// Pooled basic event data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BasicEventData {
    /// Event type.
    pub t: i32,
    /// Value.
    pub i: i32,
    /// Float value.
    pub f: f64,
}

impl Default for BasicEventData {
    fn default() -> Self {
        Self { t: 0, i: 0, f: 1.0 }
    }
}

/// Pooled color boost data.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorBoostData {
    /// `1` turns the boost colors on.
    pub b: i32,
}

/// An event placed in a box, relative to its group.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EventReference {
    /// Beat relative to the group.
    pub b: f64,
    /// Event data index.
    pub i: usize,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

/// A box of a group: a filter, box data and events, all by index.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EventBoxEntry {
    /// Index filter index.
    pub f: usize,
    /// Box data index.
    pub e: usize,
    /// Events.
    pub l: Vec<EventReference>,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

/// An event box group of any kind.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EventBoxGroupRecord {
    /// Beat.
    pub b: f64,
    /// Group id.
    pub g: i32,
    /// [`GROUP_TYPE_COLOR`], [`GROUP_TYPE_ROTATION`] or [`GROUP_TYPE_TRANSLATION`].
    pub t: i32,
    /// Boxes.
    pub e: Vec<EventBoxEntry>,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for EventBoxGroupRecord {
    fn default() -> Self {
        Self {
            b: 0.0,
            g: 0,
            t: GROUP_TYPE_COLOR,
            e: Vec::new(),
            custom_data: CustomData::new(),
        }
    }
}

/// Pooled light color box data.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightColorBoxData {
    /// Beat distribution.
    pub w: f64,
    /// Beat distribution type.
    pub d: i32,
    /// Brightness distribution.
    pub s: f64,
    /// Brightness distribution type.
    pub t: i32,
    /// Affect first.
    pub b: i32,
    /// Easing.
    pub e: i32,
}

/// Pooled light color event data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightColorEventData {
    /// Extend previous.
    pub p: i32,
    /// Color.
    pub c: i32,
    /// Easing.
    pub e: i32,
    /// Brightness.
    pub b: f64,
    /// Strobe frequency.
    pub f: i32,
}

impl Default for LightColorEventData {
    fn default() -> Self {
        Self {
            p: 0,
            c: 0,
            e: 0,
            b: 1.0,
            f: 0,
        }
    }
}

/// Pooled light rotation box data.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightRotationBoxData {
    /// Beat distribution.
    pub w: f64,
    /// Beat distribution type.
    pub d: i32,
    /// Rotation distribution.
    pub s: f64,
    /// Rotation distribution type.
    pub t: i32,
    /// Affect first.
    pub b: i32,
    /// Easing.
    pub e: i32,
    /// Axis.
    pub a: i32,
    /// Flip.
    pub f: i32,
}

/// Pooled light rotation event data.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightRotationEventData {
    /// Extend previous.
    pub p: i32,
    /// Loop count.
    pub l: i32,
    /// Easing.
    pub e: i32,
    /// Rotation in degrees.
    pub r: f64,
    /// Direction.
    pub d: i32,
}

/// Pooled light translation box data.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightTranslationBoxData {
    /// Beat distribution.
    pub w: f64,
    /// Beat distribution type.
    pub d: i32,
    /// Gap distribution.
    pub s: f64,
    /// Gap distribution type.
    pub t: i32,
    /// Affect first.
    pub b: i32,
    /// Easing.
    pub e: i32,
    /// Axis.
    pub a: i32,
    /// Flip.
    pub f: i32,
}

/// Pooled light translation event data.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightTranslationEventData {
    /// Extend previous.
    pub p: i32,
    /// Easing.
    pub e: i32,
    /// Translation.
    pub t: f64,
}

/// The beatmap document of a `4.x` difficulty.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Difficulty {
    /// Version string.
    pub version: String,
    /// Color notes.
    pub color_notes: Vec<ObjectRecord>,
    /// Note data pool.
    pub color_notes_data: Vec<ColorNoteData>,
    /// Bombs.
    pub bomb_notes: Vec<ObjectRecord>,
    /// Bomb data pool.
    pub bomb_notes_data: Vec<BombNoteData>,
    /// Walls.
    pub obstacles: Vec<ObjectRecord>,
    /// Wall data pool.
    pub obstacles_data: Vec<ObstacleData>,
    /// Arcs.
    pub arcs: Vec<ArcRecord>,
    /// Arc data pool.
    pub arcs_data: Vec<ArcData>,
    /// Chains.
    pub chains: Vec<ChainRecord>,
    /// Chain data pool.
    pub chains_data: Vec<ChainData>,
    /// Spawn rotations.
    pub spawn_rotations: Vec<IndexedRecord>,
    /// Spawn rotation data pool.
    pub spawn_rotations_data: Vec<SpawnRotationData>,
    /// Difficulty-level custom data.
    #[serde(skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            version: VERSION.to_owned(),
            color_notes: Vec::new(),
            color_notes_data: Vec::new(),
            bomb_notes: Vec::new(),
            bomb_notes_data: Vec::new(),
            obstacles: Vec::new(),
            obstacles_data: Vec::new(),
            arcs: Vec::new(),
            arcs_data: Vec::new(),
            chains: Vec::new(),
            chains_data: Vec::new(),
            spawn_rotations: Vec::new(),
            spawn_rotations_data: Vec::new(),
            custom_data: CustomData::new(),
        }
    }
}

/// The lightshow document of a `4.x` difficulty.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lightshow {
    /// Version string.
    pub version: String,
    /// Waypoints.
    pub waypoints: Vec<IndexedRecord>,
    /// Waypoint data pool.
    pub waypoints_data: Vec<WaypointData>,
    /// Basic events.
    pub basic_events: Vec<IndexedRecord>,
    /// Basic event data pool.
    pub basic_events_data: Vec<BasicEventData>,
    /// Color boosts.
    pub color_boost_events: Vec<IndexedRecord>,
    /// Color boost data pool.
    pub color_boost_events_data: Vec<ColorBoostData>,
    /// Event box groups of every kind.
    pub event_box_groups: Vec<EventBoxGroupRecord>,
    /// Index filter pool.
    pub index_filters: Vec<IndexFilterRecord>,
    /// Light color box pool.
    pub light_color_event_boxes: Vec<LightColorBoxData>,
    /// Light color event pool.
    pub light_color_events: Vec<LightColorEventData>,
    /// Light rotation box pool.
    pub light_rotation_event_boxes: Vec<LightRotationBoxData>,
    /// Light rotation event pool.
    pub light_rotation_events: Vec<LightRotationEventData>,
    /// Light translation box pool.
    pub light_translation_event_boxes: Vec<LightTranslationBoxData>,
    /// Light translation event pool.
    pub light_translation_events: Vec<LightTranslationEventData>,
    /// Keywords.
    pub basic_event_types_with_keywords: BasicEventTypesWithKeywords,
    /// Whether basic events drive group lights as well.
    pub use_normal_events_as_compatible_events: bool,
    /// Lightshow custom data, merged into the difficulty custom data on reading.
    #[serde(skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for Lightshow {
    fn default() -> Self {
        Self {
            version: VERSION.to_owned(),
            waypoints: Vec::new(),
            waypoints_data: Vec::new(),
            basic_events: Vec::new(),
            basic_events_data: Vec::new(),
            color_boost_events: Vec::new(),
            color_boost_events_data: Vec::new(),
            event_box_groups: Vec::new(),
            index_filters: Vec::new(),
            light_color_event_boxes: Vec::new(),
            light_color_events: Vec::new(),
            light_rotation_event_boxes: Vec::new(),
            light_rotation_events: Vec::new(),
            light_translation_event_boxes: Vec::new(),
            light_translation_events: Vec::new(),
            basic_event_types_with_keywords: BasicEventTypesWithKeywords::default(),
            use_normal_events_as_compatible_events: false,
            custom_data: CustomData::new(),
        }
    }
}

/// Both documents of a `4.x` difficulty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DifficultyFiles {
    /// The beatmap document.
    pub difficulty: Difficulty,
    /// The lightshow document.
    pub lightshow: Lightshow,
}

impl Difficulty {
    fn push_objects(&mut self, data: &beatmap::Difficulty, pools: &mut PoolIndex) {
        for note in &data.color_notes {
            let i = pools.intern(
                &mut self.color_notes_data,
                ColorNoteData {
                    x: note.lane,
                    y: note.row,
                    c: note.color,
                    d: note.direction,
                    a: note.angle_offset,
                },
            );
            self.color_notes.push(ObjectRecord {
                b: note.time,
                r: note.lane_rotation,
                i,
                custom_data: note.custom_data.clone(),
            });
        }
        for bomb in &data.bomb_notes {
            let i = pools.intern(
                &mut self.bomb_notes_data,
                BombNoteData {
                    x: bomb.lane,
                    y: bomb.row,
                },
            );
            self.bomb_notes.push(ObjectRecord {
                b: bomb.time,
                r: bomb.lane_rotation,
                i,
                custom_data: bomb.custom_data.clone(),
            });
        }
        for obstacle in &data.obstacles {
            let i = pools.intern(
                &mut self.obstacles_data,
                ObstacleData {
                    d: obstacle.duration,
                    x: obstacle.lane,
                    y: obstacle.row,
                    w: obstacle.width,
                    h: obstacle.height,
                },
            );
            self.obstacles.push(ObjectRecord {
                b: obstacle.time,
                r: obstacle.lane_rotation,
                i,
                custom_data: obstacle.custom_data.clone(),
            });
        }
        for arc in &data.arcs {
            let hi = pools.intern(
                &mut self.color_notes_data,
                ColorNoteData {
                    x: arc.lane,
                    y: arc.row,
                    c: arc.color,
                    d: arc.direction,
                    a: 0,
                },
            );
            let ti = pools.intern(
                &mut self.color_notes_data,
                ColorNoteData {
                    x: arc.tail_lane,
                    y: arc.tail_row,
                    c: arc.color,
                    d: arc.tail_direction,
                    a: 0,
                },
            );
            let ai = pools.intern(
                &mut self.arcs_data,
                ArcData {
                    m: arc.length_multiplier,
                    tm: arc.tail_length_multiplier,
                    a: arc.mid_anchor,
                },
            );
            self.arcs.push(ArcRecord {
                hb: arc.time,
                tb: arc.tail_time,
                hr: arc.lane_rotation,
                tr: arc.tail_lane_rotation,
                hi,
                ti,
                ai,
                custom_data: arc.custom_data.clone(),
            });
        }
        for chain in &data.chains {
            let i = pools.intern(
                &mut self.color_notes_data,
                ColorNoteData {
                    x: chain.lane,
                    y: chain.row,
                    c: chain.color,
                    d: chain.direction,
                    a: 0,
                },
            );
            let ci = pools.intern(
                &mut self.chains_data,
                ChainData {
                    tx: chain.tail_lane,
                    ty: chain.tail_row,
                    c: chain.slice_count,
                    s: chain.squish,
                },
            );
            self.chains.push(ChainRecord {
                hb: chain.time,
                tb: chain.tail_time,
                hr: chain.lane_rotation,
                tr: chain.tail_lane_rotation,
                i,
                ci,
                custom_data: chain.custom_data.clone(),
            });
        }
        for rotation in &data.rotation_events {
            let i = pools.intern(
                &mut self.spawn_rotations_data,
                SpawnRotationData {
                    t: rotation.execution_time.code(),
                    r: rotation.rotation,
                },
            );
            self.spawn_rotations.push(IndexedRecord {
                b: rotation.time,
                i,
                custom_data: rotation.custom_data.clone(),
            });
        }
    }

    fn read_objects(&self, difficulty: &mut beatmap::Difficulty) {
        difficulty.color_notes = self
            .color_notes
            .iter()
            .map(|record| {
                let data = lookup(&self.color_notes_data, record.i);
                ColorNote {
                    time: record.b,
                    lane: data.x,
                    row: data.y,
                    color: data.c,
                    direction: data.d,
                    angle_offset: data.a,
                    lane_rotation: record.r,
                    custom_data: record.custom_data.clone(),
                }
            })
            .collect();
        difficulty.bomb_notes = self
            .bomb_notes
            .iter()
            .map(|record| {
                let data = lookup(&self.bomb_notes_data, record.i);
                BombNote {
                    time: record.b,
                    lane: data.x,
                    row: data.y,
                    lane_rotation: record.r,
                    custom_data: record.custom_data.clone(),
                }
            })
            .collect();
        difficulty.obstacles = self
            .obstacles
            .iter()
            .map(|record| {
                let data = lookup(&self.obstacles_data, record.i);
                beatmap::Obstacle {
                    time: record.b,
                    lane: data.x,
                    row: data.y,
                    duration: data.d,
                    width: data.w,
                    height: data.h,
                    lane_rotation: record.r,
                    custom_data: record.custom_data.clone(),
                }
            })
            .collect();
        difficulty.arcs = self
            .arcs
            .iter()
            .map(|record| {
                let head = lookup(&self.color_notes_data, record.hi);
                let tail = lookup(&self.color_notes_data, record.ti);
                let data = lookup(&self.arcs_data, record.ai);
                beatmap::Arc {
                    time: record.hb,
                    color: head.c,
                    lane: head.x,
                    row: head.y,
                    direction: head.d,
                    length_multiplier: data.m,
                    tail_time: record.tb,
                    tail_lane: tail.x,
                    tail_row: tail.y,
                    tail_direction: tail.d,
                    tail_length_multiplier: data.tm,
                    mid_anchor: data.a,
                    lane_rotation: record.hr,
                    tail_lane_rotation: record.tr,
                    custom_data: record.custom_data.clone(),
                }
            })
            .collect();
        difficulty.chains = self
            .chains
            .iter()
            .map(|record| {
                let head = lookup(&self.color_notes_data, record.i);
                let data = lookup(&self.chains_data, record.ci);
                beatmap::Chain {
                    time: record.hb,
                    color: head.c,
                    lane: head.x,
                    row: head.y,
                    direction: head.d,
                    tail_time: record.tb,
                    tail_lane: data.tx,
                    tail_row: data.ty,
                    slice_count: data.c,
                    squish: data.s,
                    lane_rotation: record.hr,
                    tail_lane_rotation: record.tr,
                    custom_data: record.custom_data.clone(),
                }
            })
            .collect();
        difficulty.rotation_events = self
            .spawn_rotations
            .iter()
            .map(|record| {
                let data = lookup(&self.spawn_rotations_data, record.i);
                RotationEvent {
                    time: record.b,
                    execution_time: ExecutionTime::from_code(data.t),
                    rotation: data.r,
                    custom_data: record.custom_data.clone(),
                }
            })
            .collect();
    }
}

impl Lightshow {
    fn push_events(&mut self, data: &beatmap::Difficulty, pools: &mut PoolIndex) {
        for waypoint in &data.waypoints {
            let i = pools.intern(
                &mut self.waypoints_data,
                WaypointData {
                    x: waypoint.lane,
                    y: waypoint.row,
                    d: waypoint.direction,
                },
            );
            self.waypoints.push(IndexedRecord {
                b: waypoint.time,
                i,
                custom_data: waypoint.custom_data.clone(),
            });
        }
        for event in &data.basic_events {
            let i = pools.intern(
                &mut self.basic_events_data,
                BasicEventData {
                    t: event.event_type,
                    i: event.value,
                    f: event.float_value,
                },
            );
            self.basic_events.push(IndexedRecord {
                b: event.time,
                i,
                custom_data: event.custom_data.clone(),
            });
        }
        for boost in &data.color_boost_events {
            let i = pools.intern(
                &mut self.color_boost_events_data,
                ColorBoostData {
                    b: i32::from(boost.toggle),
                },
            );
            self.color_boost_events.push(IndexedRecord {
                b: boost.time,
                i,
                custom_data: boost.custom_data.clone(),
            });
        }
    }

    fn push_color_group(&mut self, group: &LightColorEventBoxGroup, pools: &mut PoolIndex) {
        let mut boxes = Vec::with_capacity(group.boxes.len());
        for event_box in &group.boxes {
            let f = pools.intern(
                &mut self.index_filters,
                <IndexFilterRecord as SchemaContainer>::serialize(&event_box.filter),
            );
            let e = pools.intern(
                &mut self.light_color_event_boxes,
                LightColorBoxData {
                    w: event_box.beat_distribution,
                    d: event_box.beat_distribution_type,
                    s: event_box.brightness_distribution,
                    t: event_box.brightness_distribution_type,
                    b: event_box.affect_first,
                    e: event_box.easing,
                },
            );
            let mut events = Vec::with_capacity(event_box.events.len());
            for event in &event_box.events {
                let i = pools.intern(
                    &mut self.light_color_events,
                    LightColorEventData {
                        p: event.previous,
                        c: event.color,
                        e: event.easing,
                        b: event.brightness,
                        f: event.frequency,
                    },
                );
                events.push(EventReference {
                    b: event.time,
                    i,
                    custom_data: event.custom_data.clone(),
                });
            }
            boxes.push(EventBoxEntry {
                f,
                e,
                l: events,
                custom_data: event_box.custom_data.clone(),
            });
        }
        self.event_box_groups.push(EventBoxGroupRecord {
            b: group.time,
            g: group.group_id,
            t: GROUP_TYPE_COLOR,
            e: boxes,
            custom_data: group.custom_data.clone(),
        });
    }

    fn push_rotation_group(&mut self, group: &LightRotationEventBoxGroup, pools: &mut PoolIndex) {
        let mut boxes = Vec::with_capacity(group.boxes.len());
        for event_box in &group.boxes {
            let f = pools.intern(
                &mut self.index_filters,
                <IndexFilterRecord as SchemaContainer>::serialize(&event_box.filter),
            );
            let e = pools.intern(
                &mut self.light_rotation_event_boxes,
                LightRotationBoxData {
                    w: event_box.beat_distribution,
                    d: event_box.beat_distribution_type,
                    s: event_box.rotation_distribution,
                    t: event_box.rotation_distribution_type,
                    b: event_box.affect_first,
                    e: event_box.easing,
                    a: event_box.axis,
                    f: event_box.flip,
                },
            );
            let mut events = Vec::with_capacity(event_box.events.len());
            for event in &event_box.events {
                let i = pools.intern(
                    &mut self.light_rotation_events,
                    LightRotationEventData {
                        p: event.previous,
                        l: event.loop_count,
                        e: event.easing,
                        r: event.rotation,
                        d: event.direction,
                    },
                );
                events.push(EventReference {
                    b: event.time,
                    i,
                    custom_data: event.custom_data.clone(),
                });
            }
            boxes.push(EventBoxEntry {
                f,
                e,
                l: events,
                custom_data: event_box.custom_data.clone(),
            });
        }
        self.event_box_groups.push(EventBoxGroupRecord {
            b: group.time,
            g: group.group_id,
            t: GROUP_TYPE_ROTATION,
            e: boxes,
            custom_data: group.custom_data.clone(),
        });
    }

    fn push_translation_group(&mut self, group: &LightTranslationEventBoxGroup, pools: &mut PoolIndex) {
        let mut boxes = Vec::with_capacity(group.boxes.len());
        for event_box in &group.boxes {
            let f = pools.intern(
                &mut self.index_filters,
                <IndexFilterRecord as SchemaContainer>::serialize(&event_box.filter),
            );
            let e = pools.intern(
                &mut self.light_translation_event_boxes,
                LightTranslationBoxData {
                    w: event_box.beat_distribution,
                    d: event_box.beat_distribution_type,
                    s: event_box.gap_distribution,
                    t: event_box.gap_distribution_type,
                    b: event_box.affect_first,
                    e: event_box.easing,
                    a: event_box.axis,
                    f: event_box.flip,
                },
            );
            let mut events = Vec::with_capacity(event_box.events.len());
            for event in &event_box.events {
                let i = pools.intern(
                    &mut self.light_translation_events,
                    LightTranslationEventData {
                        p: event.previous,
                        e: event.easing,
                        t: event.translation,
                    },
                );
                events.push(EventReference {
                    b: event.time,
                    i,
                    custom_data: event.custom_data.clone(),
                });
            }
            boxes.push(EventBoxEntry {
                f,
                e,
                l: events,
                custom_data: event_box.custom_data.clone(),
            });
        }
        self.event_box_groups.push(EventBoxGroupRecord {
            b: group.time,
            g: group.group_id,
            t: GROUP_TYPE_TRANSLATION,
            e: boxes,
            custom_data: group.custom_data.clone(),
        });
    }

    fn read_events(&self, difficulty: &mut beatmap::Difficulty) {
        difficulty.waypoints = self
            .waypoints
            .iter()
            .map(|record| {
                let data = lookup(&self.waypoints_data, record.i);
                Waypoint {
                    time: record.b,
                    lane: data.x,
                    row: data.y,
                    direction: data.d,
                    lane_rotation: 0,
                    custom_data: record.custom_data.clone(),
                }
            })
            .collect();
        difficulty.basic_events = self
            .basic_events
            .iter()
            .map(|record| {
                let data = lookup(&self.basic_events_data, record.i);
                BasicEvent {
                    time: record.b,
                    event_type: data.t,
                    value: data.i,
                    float_value: data.f,
                    custom_data: record.custom_data.clone(),
                }
            })
            .collect();
        difficulty.color_boost_events = self
            .color_boost_events
            .iter()
            .map(|record| ColorBoostEvent {
                time: record.b,
                toggle: lookup(&self.color_boost_events_data, record.i).b != 0,
                custom_data: record.custom_data.clone(),
            })
            .collect();
        for group in &self.event_box_groups {
            match group.t {
                GROUP_TYPE_COLOR => difficulty
                    .light_color_event_box_groups
                    .push(self.read_color_group(group)),
                GROUP_TYPE_ROTATION => difficulty
                    .light_rotation_event_box_groups
                    .push(self.read_rotation_group(group)),
                GROUP_TYPE_TRANSLATION => difficulty
                    .light_translation_event_box_groups
                    .push(self.read_translation_group(group)),
                other => log::warn!(
                    target: "beatmap_rs::schema",
                    "skipping event box group of unknown type {other} at beat {}",
                    group.b
                ),
            }
        }
    }

    fn read_color_group(&self, group: &EventBoxGroupRecord) -> LightColorEventBoxGroup {
        LightColorEventBoxGroup {
            time: group.b,
            group_id: group.g,
            boxes: group
                .e
                .iter()
                .map(|entry| {
                    let data = lookup(&self.light_color_event_boxes, entry.e);
                    LightColorEventBox {
                        filter: lookup(&self.index_filters, entry.f).deserialize(),
                        beat_distribution: data.w,
                        beat_distribution_type: data.d,
                        brightness_distribution: data.s,
                        brightness_distribution_type: data.t,
                        affect_first: data.b,
                        easing: data.e,
                        events: entry
                            .l
                            .iter()
                            .map(|reference| {
                                let event = lookup(&self.light_color_events, reference.i);
                                LightColorEvent {
                                    time: reference.b,
                                    previous: event.p,
                                    easing: event.e,
                                    color: event.c,
                                    brightness: event.b,
                                    frequency: event.f,
                                    custom_data: reference.custom_data.clone(),
                                }
                            })
                            .collect(),
                        custom_data: entry.custom_data.clone(),
                    }
                })
                .collect(),
            custom_data: group.custom_data.clone(),
        }
    }

    fn read_rotation_group(&self, group: &EventBoxGroupRecord) -> LightRotationEventBoxGroup {
        LightRotationEventBoxGroup {
            time: group.b,
            group_id: group.g,
            boxes: group
                .e
                .iter()
                .map(|entry| {
                    let data = lookup(&self.light_rotation_event_boxes, entry.e);
                    LightRotationEventBox {
                        filter: lookup(&self.index_filters, entry.f).deserialize(),
                        beat_distribution: data.w,
                        beat_distribution_type: data.d,
                        rotation_distribution: data.s,
                        rotation_distribution_type: data.t,
                        axis: data.a,
                        flip: data.f,
                        affect_first: data.b,
                        easing: data.e,
                        events: entry
                            .l
                            .iter()
                            .map(|reference| {
                                let event = lookup(&self.light_rotation_events, reference.i);
                                LightRotationEvent {
                                    time: reference.b,
                                    previous: event.p,
                                    easing: event.e,
                                    loop_count: event.l,
                                    rotation: event.r,
                                    direction: event.d,
                                    custom_data: reference.custom_data.clone(),
                                }
                            })
                            .collect(),
                        custom_data: entry.custom_data.clone(),
                    }
                })
                .collect(),
            custom_data: group.custom_data.clone(),
        }
    }

    fn read_translation_group(&self, group: &EventBoxGroupRecord) -> LightTranslationEventBoxGroup {
        LightTranslationEventBoxGroup {
            time: group.b,
            group_id: group.g,
            boxes: group
                .e
                .iter()
                .map(|entry| {
                    let data = lookup(&self.light_translation_event_boxes, entry.e);
                    LightTranslationEventBox {
                        filter: lookup(&self.index_filters, entry.f).deserialize(),
                        beat_distribution: data.w,
                        beat_distribution_type: data.d,
                        gap_distribution: data.s,
                        gap_distribution_type: data.t,
                        axis: data.a,
                        flip: data.f,
                        affect_first: data.b,
                        easing: data.e,
                        events: entry
                            .l
                            .iter()
                            .map(|reference| {
                                let event = lookup(&self.light_translation_events, reference.i);
                                LightTranslationEvent {
                                    time: reference.b,
                                    previous: event.p,
                                    easing: event.e,
                                    translation: event.t,
                                    custom_data: reference.custom_data.clone(),
                                }
                            })
                            .collect(),
                        custom_data: entry.custom_data.clone(),
                    }
                })
                .collect(),
            custom_data: group.custom_data.clone(),
        }
    }
}

impl SchemaContainer for DifficultyFiles {
    type Canonical = beatmap::Difficulty;

    fn serialize(data: &beatmap::Difficulty) -> Self {
        let mut difficulty = Difficulty {
            version: data.version.clone(),
            custom_data: data.custom_data.clone(),
            ..Difficulty::default()
        };
        difficulty.push_objects(data, &mut PoolIndex::default());

        let mut lightshow = Lightshow {
            version: data.version.clone(),
            basic_event_types_with_keywords: BasicEventTypesWithKeywords {
                d: data
                    .keyword_events
                    .iter()
                    .map(<KeywordRecord as SchemaContainer>::serialize)
                    .collect(),
            },
            use_normal_events_as_compatible_events: data.use_normal_events_as_compatible_events,
            ..Lightshow::default()
        };
        let mut pools = PoolIndex::default();
        lightshow.push_events(data, &mut pools);
        for group in &data.light_color_event_box_groups {
            lightshow.push_color_group(group, &mut pools);
        }
        for group in &data.light_rotation_event_box_groups {
            lightshow.push_rotation_group(group, &mut pools);
        }
        for group in &data.light_translation_event_box_groups {
            lightshow.push_translation_group(group, &mut pools);
        }
        lightshow
            .event_box_groups
            .sort_by(|a, b| a.b.total_cmp(&b.b));

        Self {
            difficulty,
            lightshow,
        }
    }

    fn deserialize(&self) -> beatmap::Difficulty {
        let mut difficulty = beatmap::Difficulty::new(self.difficulty.version.clone());
        self.difficulty.read_objects(&mut difficulty);
        self.lightshow.read_events(&mut difficulty);
        difficulty.keyword_events = self
            .lightshow
            .basic_event_types_with_keywords
            .d
            .iter()
            .map(KeywordRecord::deserialize)
            .collect();
        difficulty.use_normal_events_as_compatible_events =
            self.lightshow.use_normal_events_as_compatible_events;
        difficulty.custom_data = self.lightshow.custom_data.clone();
        difficulty
            .custom_data
            .extend(self.difficulty.custom_data.clone());
        difficulty
    }
}
