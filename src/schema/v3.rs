//! The `3.x` wire format.
//!
//! Field names are single letters. Boosts, lane rotations and BPM changes have their own collections, and group lighting appears as event box groups.

use super::SchemaContainer;
use crate::beatmap::{
    self, BasicEvent, BombNote, BpmEvent, ColorBoostEvent, ColorNote, CustomData, ExecutionTime,
    IndexFilter, KeywordEvents, LightColorEvent, LightColorEventBox, LightColorEventBoxGroup,
    LightRotationEvent, LightRotationEventBox, LightRotationEventBoxGroup, LightTranslationEvent,
    LightTranslationEventBox, LightTranslationEventBoxGroup, RotationEvent, Waypoint,
};

/// Version string written by this format.
pub const VERSION: &str = "3.2.0";

/// A color note.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorNoteRecord {
    /// Beat.
    pub b: f64,
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
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for ColorNoteRecord {
    type Canonical = ColorNote;

    fn serialize(data: &ColorNote) -> Self {
        Self {
            b: data.time,
            x: data.lane,
            y: data.row,
            c: data.color,
            d: data.direction,
            a: data.angle_offset,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> ColorNote {
        ColorNote {
            time: self.b,
            lane: self.x,
            row: self.y,
            color: self.c,
            direction: self.d,
            angle_offset: self.a,
            lane_rotation: 0,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A bomb.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BombNoteRecord {
    /// Beat.
    pub b: f64,
    /// Lane.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for BombNoteRecord {
    type Canonical = BombNote;

    fn serialize(data: &BombNote) -> Self {
        Self {
            b: data.time,
            x: data.lane,
            y: data.row,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> BombNote {
        BombNote {
            time: self.b,
            lane: self.x,
            row: self.y,
            lane_rotation: 0,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A wall.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ObstacleRecord {
    /// Beat.
    pub b: f64,
    /// Leftmost lane.
    pub x: i32,
    /// Bottom row.
    pub y: i32,
    /// Duration in beats.
    pub d: f64,
    /// Width in lanes.
    pub w: i32,
    /// Height in rows.
    pub h: i32,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for ObstacleRecord {
    fn default() -> Self {
        Self::serialize(&beatmap::Obstacle::default())
    }
}

impl SchemaContainer for ObstacleRecord {
    type Canonical = beatmap::Obstacle;

    fn serialize(data: &beatmap::Obstacle) -> Self {
        Self {
            b: data.time,
            x: data.lane,
            y: data.row,
            d: data.duration,
            w: data.width,
            h: data.height,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> beatmap::Obstacle {
        beatmap::Obstacle {
            time: self.b,
            lane: self.x,
            row: self.y,
            duration: self.d,
            width: self.w,
            height: self.h,
            lane_rotation: 0,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// An arc.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SliderRecord {
    /// Head beat.
    pub b: f64,
    /// Color.
    pub c: i32,
    /// Head lane.
    pub x: i32,
    /// Head row.
    pub y: i32,
    /// Head cut direction.
    pub d: i32,
    /// Head control point length multiplier.
    pub mu: f64,
    /// Tail beat.
    pub tb: f64,
    /// Tail lane.
    pub tx: i32,
    /// Tail row.
    pub ty: i32,
    /// Tail cut direction.
    pub tc: i32,
    /// Tail control point length multiplier.
    pub tmu: f64,
    /// Mid anchor mode.
    pub m: i32,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for SliderRecord {
    fn default() -> Self {
        Self::serialize(&beatmap::Arc::default())
    }
}

impl SchemaContainer for SliderRecord {
    type Canonical = beatmap::Arc;

    fn serialize(data: &beatmap::Arc) -> Self {
        Self {
            b: data.time,
            c: data.color,
            x: data.lane,
            y: data.row,
            d: data.direction,
            mu: data.length_multiplier,
            tb: data.tail_time,
            tx: data.tail_lane,
            ty: data.tail_row,
            tc: data.tail_direction,
            tmu: data.tail_length_multiplier,
            m: data.mid_anchor,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> beatmap::Arc {
        beatmap::Arc {
            time: self.b,
            color: self.c,
            lane: self.x,
            row: self.y,
            direction: self.d,
            length_multiplier: self.mu,
            tail_time: self.tb,
            tail_lane: self.tx,
            tail_row: self.ty,
            tail_direction: self.tc,
            tail_length_multiplier: self.tmu,
            mid_anchor: self.m,
            lane_rotation: 0,
            tail_lane_rotation: 0,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A chain.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BurstSliderRecord {
    /// Head beat.
    pub b: f64,
    /// Color.
    pub c: i32,
    /// Head lane.
    pub x: i32,
    /// Head row.
    pub y: i32,
    /// Head cut direction.
    pub d: i32,
    /// Tail beat.
    pub tb: f64,
    /// Tail lane.
    pub tx: i32,
    /// Tail row.
    pub ty: i32,
    /// Slice count.
    pub sc: i32,
    /// Squish factor.
    pub s: f64,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for BurstSliderRecord {
    fn default() -> Self {
        Self::serialize(&beatmap::Chain::default())
    }
}

impl SchemaContainer for BurstSliderRecord {
    type Canonical = beatmap::Chain;

    fn serialize(data: &beatmap::Chain) -> Self {
        Self {
            b: data.time,
            c: data.color,
            x: data.lane,
            y: data.row,
            d: data.direction,
            tb: data.tail_time,
            tx: data.tail_lane,
            ty: data.tail_row,
            sc: data.slice_count,
            s: data.squish,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> beatmap::Chain {
        beatmap::Chain {
            time: self.b,
            color: self.c,
            lane: self.x,
            row: self.y,
            direction: self.d,
            tail_time: self.tb,
            tail_lane: self.tx,
            tail_row: self.ty,
            slice_count: self.sc,
            squish: self.s,
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
    pub b: f64,
    /// Lane.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Offset direction.
    pub d: i32,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for WaypointRecord {
    type Canonical = Waypoint;

    fn serialize(data: &Waypoint) -> Self {
        Self {
            b: data.time,
            x: data.lane,
            y: data.row,
            d: data.direction,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> Waypoint {
        Waypoint {
            time: self.b,
            lane: self.x,
            row: self.y,
            direction: self.d,
            lane_rotation: 0,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A basic event.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BasicEventRecord {
    /// Beat.
    pub b: f64,
    /// Event type.
    pub et: i32,
    /// Value.
    pub i: i32,
    /// Float value.
    pub f: f64,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for BasicEventRecord {
    fn default() -> Self {
        Self::serialize(&BasicEvent::default())
    }
}

impl SchemaContainer for BasicEventRecord {
    type Canonical = BasicEvent;

    fn serialize(data: &BasicEvent) -> Self {
        Self {
            b: data.time,
            et: data.event_type,
            i: data.value,
            f: data.float_value,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> BasicEvent {
        BasicEvent {
            time: self.b,
            event_type: self.et,
            value: self.i,
            float_value: self.f,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A color boost toggle.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorBoostRecord {
    /// Beat.
    pub b: f64,
    /// Whether the boost colors are on.
    pub o: bool,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for ColorBoostRecord {
    type Canonical = ColorBoostEvent;

    fn serialize(data: &ColorBoostEvent) -> Self {
        Self {
            b: data.time,
            o: data.toggle,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> ColorBoostEvent {
        ColorBoostEvent {
            time: self.b,
            toggle: self.o,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A lane rotation.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RotationRecord {
    /// Beat.
    pub b: f64,
    /// `0` early, `1` late.
    pub e: i32,
    /// Rotation in degrees.
    pub r: f64,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for RotationRecord {
    type Canonical = RotationEvent;

    fn serialize(data: &RotationEvent) -> Self {
        Self {
            b: data.time,
            e: data.execution_time.code(),
            r: data.rotation,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> RotationEvent {
        RotationEvent {
            time: self.b,
            execution_time: ExecutionTime::from_code(self.e),
            rotation: self.r,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A BPM change.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BpmRecord {
    /// Beat.
    pub b: f64,
    /// Tempo.
    pub m: f64,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for BpmRecord {
    fn default() -> Self {
        Self::serialize(&BpmEvent::default())
    }
}

impl SchemaContainer for BpmRecord {
    type Canonical = BpmEvent;

    fn serialize(data: &BpmEvent) -> Self {
        Self {
            b: data.time,
            m: data.bpm,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> BpmEvent {
        BpmEvent {
            time: self.b,
            bpm: self.m,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// Light selection of an event box.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IndexFilterRecord {
    /// Filter type.
    pub f: i32,
    /// First parameter.
    pub p: i32,
    /// Second parameter.
    pub t: i32,
    /// Reverse.
    pub r: i32,
    /// Chunks.
    pub c: i32,
    /// Random behaviour.
    pub n: i32,
    /// Seed.
    pub s: i32,
    /// Limit.
    pub l: f64,
    /// Limit also affects.
    pub d: i32,
}

impl Default for IndexFilterRecord {
    fn default() -> Self {
        Self::serialize(&IndexFilter::default())
    }
}

impl SchemaContainer for IndexFilterRecord {
    type Canonical = IndexFilter;

    fn serialize(data: &IndexFilter) -> Self {
        Self {
            f: data.filter_type,
            p: data.p0,
            t: data.p1,
            r: data.reverse,
            c: data.chunks,
            n: data.random,
            s: data.seed,
            l: data.limit,
            d: data.limit_affects,
        }
    }

    fn deserialize(&self) -> IndexFilter {
        IndexFilter {
            filter_type: self.f,
            p0: self.p,
            p1: self.t,
            reverse: self.r,
            chunks: self.c,
            random: self.n,
            seed: self.s,
            limit: self.l,
            limit_affects: self.d,
        }
    }
}

/// A light color change. Previous and easing are folded into one transition code.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightColorEventRecord {
    /// Beat relative to the group.
    pub b: f64,
    /// `0` instant, `1` interpolate, `2` extend.
    pub i: i32,
    /// Color.
    pub c: i32,
    /// Brightness.
    pub s: f64,
    /// Strobe frequency.
    pub f: i32,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for LightColorEventRecord {
    fn default() -> Self {
        Self::serialize(&LightColorEvent::default())
    }
}

impl SchemaContainer for LightColorEventRecord {
    type Canonical = LightColorEvent;

    fn serialize(data: &LightColorEvent) -> Self {
        Self {
            b: data.time,
            i: data.transition(),
            c: data.color,
            s: data.brightness,
            f: data.frequency,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> LightColorEvent {
        let (previous, easing) = LightColorEvent::fields_of_transition(self.i);
        LightColorEvent {
            time: self.b,
            previous,
            easing,
            color: self.c,
            brightness: self.s,
            frequency: self.f,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A light color event box.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightColorEventBoxRecord {
    /// Filter.
    pub f: IndexFilterRecord,
    /// Beat distribution.
    pub w: f64,
    /// Beat distribution type.
    pub d: i32,
    /// Brightness distribution.
    pub r: f64,
    /// Brightness distribution type.
    pub t: i32,
    /// Affect first.
    pub b: i32,
    /// Easing.
    pub i: i32,
    /// Events.
    pub e: Vec<LightColorEventRecord>,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for LightColorEventBoxRecord {
    type Canonical = LightColorEventBox;

    fn serialize(data: &LightColorEventBox) -> Self {
        Self {
            f: IndexFilterRecord::serialize(&data.filter),
            w: data.beat_distribution,
            d: data.beat_distribution_type,
            r: data.brightness_distribution,
            t: data.brightness_distribution_type,
            b: data.affect_first,
            i: data.easing,
            e: data
                .events
                .iter()
                .map(LightColorEventRecord::serialize)
                .collect(),
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> LightColorEventBox {
        LightColorEventBox {
            filter: self.f.deserialize(),
            beat_distribution: self.w,
            beat_distribution_type: self.d,
            brightness_distribution: self.r,
            brightness_distribution_type: self.t,
            affect_first: self.b,
            easing: self.i,
            events: self.e.iter().map(LightColorEventRecord::deserialize).collect(),
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A light rotation change.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightRotationEventRecord {
    /// Beat relative to the group.
    pub b: f64,
    /// Extend previous.
    pub p: i32,
    /// Easing.
    pub e: i32,
    /// Loop count.
    pub l: i32,
    /// Rotation in degrees.
    pub r: f64,
    /// Direction.
    pub o: i32,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for LightRotationEventRecord {
    type Canonical = LightRotationEvent;

    fn serialize(data: &LightRotationEvent) -> Self {
        Self {
            b: data.time,
            p: data.previous,
            e: data.easing,
            l: data.loop_count,
            r: data.rotation,
            o: data.direction,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> LightRotationEvent {
        LightRotationEvent {
            time: self.b,
            previous: self.p,
            easing: self.e,
            loop_count: self.l,
            rotation: self.r,
            direction: self.o,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A light rotation event box.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightRotationEventBoxRecord {
    /// Filter.
    pub f: IndexFilterRecord,
    /// Beat distribution.
    pub w: f64,
    /// Beat distribution type.
    pub d: i32,
    /// Rotation distribution.
    pub s: f64,
    /// Rotation distribution type.
    pub t: i32,
    /// Axis.
    pub a: i32,
    /// Flip.
    pub r: i32,
    /// Affect first.
    pub b: i32,
    /// Easing.
    pub i: i32,
    /// Events.
    pub l: Vec<LightRotationEventRecord>,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for LightRotationEventBoxRecord {
    type Canonical = LightRotationEventBox;

    fn serialize(data: &LightRotationEventBox) -> Self {
        Self {
            f: IndexFilterRecord::serialize(&data.filter),
            w: data.beat_distribution,
            d: data.beat_distribution_type,
            s: data.rotation_distribution,
            t: data.rotation_distribution_type,
            a: data.axis,
            r: data.flip,
            b: data.affect_first,
            i: data.easing,
            l: data
                .events
                .iter()
                .map(LightRotationEventRecord::serialize)
                .collect(),
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> LightRotationEventBox {
        LightRotationEventBox {
            filter: self.f.deserialize(),
            beat_distribution: self.w,
            beat_distribution_type: self.d,
            rotation_distribution: self.s,
            rotation_distribution_type: self.t,
            axis: self.a,
            flip: self.r,
            affect_first: self.b,
            easing: self.i,
            events: self
                .l
                .iter()
                .map(LightRotationEventRecord::deserialize)
                .collect(),
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A light translation change.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightTranslationEventRecord {
    /// Beat relative to the group.
    pub b: f64,
    /// Extend previous.
    pub p: i32,
    /// Easing.
    pub e: i32,
    /// Translation.
    pub t: f64,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for LightTranslationEventRecord {
    type Canonical = LightTranslationEvent;

    fn serialize(data: &LightTranslationEvent) -> Self {
        Self {
            b: data.time,
            p: data.previous,
            e: data.easing,
            t: data.translation,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> LightTranslationEvent {
        LightTranslationEvent {
            time: self.b,
            previous: self.p,
            easing: self.e,
            translation: self.t,
            custom_data: self.custom_data.clone(),
        }
    }
}

/// A light translation event box.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LightTranslationEventBoxRecord {
    /// Filter.
    pub f: IndexFilterRecord,
    /// Beat distribution.
    pub w: f64,
    /// Beat distribution type.
    pub d: i32,
    /// Gap distribution.
    pub s: f64,
    /// Gap distribution type.
    pub t: i32,
    /// Axis.
    pub a: i32,
    /// Flip.
    pub r: i32,
    /// Affect first.
    pub b: i32,
    /// Easing.
    pub i: i32,
    /// Events.
    pub l: Vec<LightTranslationEventRecord>,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl SchemaContainer for LightTranslationEventBoxRecord {
    type Canonical = LightTranslationEventBox;

    fn serialize(data: &LightTranslationEventBox) -> Self {
        Self {
            f: IndexFilterRecord::serialize(&data.filter),
            w: data.beat_distribution,
            d: data.beat_distribution_type,
            s: data.gap_distribution,
            t: data.gap_distribution_type,
            a: data.axis,
            r: data.flip,
            b: data.affect_first,
            i: data.easing,
            l: data
                .events
                .iter()
                .map(LightTranslationEventRecord::serialize)
                .collect(),
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> LightTranslationEventBox {
        LightTranslationEventBox {
            filter: self.f.deserialize(),
            beat_distribution: self.w,
            beat_distribution_type: self.d,
            gap_distribution: self.s,
            gap_distribution_type: self.t,
            axis: self.a,
            flip: self.r,
            affect_first: self.b,
            easing: self.i,
            events: self
                .l
                .iter()
                .map(LightTranslationEventRecord::deserialize)
                .collect(),
            custom_data: self.custom_data.clone(),
        }
    }
}

/// An event box group, generic over its box record.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EventBoxGroupRecord<B> {
    /// Beat.
    pub b: f64,
    /// Group id.
    pub g: i32,
    /// Boxes.
    pub e: Vec<B>,
    /// Metadata bag.
    #[serde(rename = "customData", skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

macro_rules! impl_event_box_group {
    ($group:ident, $record:ty) => {
        impl SchemaContainer for EventBoxGroupRecord<$record> {
            type Canonical = $group;

            fn serialize(data: &$group) -> Self {
                Self {
                    b: data.time,
                    g: data.group_id,
                    e: data.boxes.iter().map(<$record>::serialize).collect(),
                    custom_data: data.custom_data.clone(),
                }
            }

            fn deserialize(&self) -> $group {
                $group {
                    time: self.b,
                    group_id: self.g,
                    boxes: self.e.iter().map(<$record>::deserialize).collect(),
                    custom_data: self.custom_data.clone(),
                }
            }
        }
    };
}

impl_event_box_group!(LightColorEventBoxGroup, LightColorEventBoxRecord);
impl_event_box_group!(LightRotationEventBoxGroup, LightRotationEventBoxRecord);
impl_event_box_group!(LightTranslationEventBoxGroup, LightTranslationEventBoxRecord);

/// Event types enabled by one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct KeywordRecord {
    /// Keyword.
    pub k: String,
    /// Enabled event types.
    pub e: Vec<i32>,
}

impl SchemaContainer for KeywordRecord {
    type Canonical = KeywordEvents;

    fn serialize(data: &KeywordEvents) -> Self {
        Self {
            k: data.keyword.clone(),
            e: data.events.clone(),
        }
    }

    fn deserialize(&self) -> KeywordEvents {
        KeywordEvents {
            keyword: self.k.clone(),
            events: self.e.clone(),
        }
    }
}

/// The keyword list.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BasicEventTypesWithKeywords {
    /// Keywords.
    pub d: Vec<KeywordRecord>,
}

/// A whole `3.x` difficulty file.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Difficulty {
    /// Version string.
    pub version: String,
    /// BPM changes.
    pub bpm_events: Vec<BpmRecord>,
    /// Lane rotations.
    pub rotation_events: Vec<RotationRecord>,
    /// Color notes.
    pub color_notes: Vec<ColorNoteRecord>,
    /// Bombs.
    pub bomb_notes: Vec<BombNoteRecord>,
    /// Walls.
    pub obstacles: Vec<ObstacleRecord>,
    /// Arcs.
    pub sliders: Vec<SliderRecord>,
    /// Chains.
    pub burst_sliders: Vec<BurstSliderRecord>,
    /// Waypoints.
    pub waypoints: Vec<WaypointRecord>,
    /// Basic events.
    pub basic_beatmap_events: Vec<BasicEventRecord>,
    /// Color boosts.
    pub color_boost_beatmap_events: Vec<ColorBoostRecord>,
    /// Light color groups.
    pub light_color_event_box_groups: Vec<EventBoxGroupRecord<LightColorEventBoxRecord>>,
    /// Light rotation groups.
    pub light_rotation_event_box_groups: Vec<EventBoxGroupRecord<LightRotationEventBoxRecord>>,
    /// Light translation groups.
    pub light_translation_event_box_groups:
        Vec<EventBoxGroupRecord<LightTranslationEventBoxRecord>>,
    /// Keywords.
    pub basic_event_types_with_keywords: BasicEventTypesWithKeywords,
    /// Whether basic events drive group lights as well.
    pub use_normal_events_as_compatible_events: bool,
    /// Difficulty-level custom data.
    #[serde(skip_serializing_if = "CustomData::is_empty")]
    pub custom_data: CustomData,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            version: VERSION.to_owned(),
            bpm_events: Vec::new(),
            rotation_events: Vec::new(),
            color_notes: Vec::new(),
            bomb_notes: Vec::new(),
            obstacles: Vec::new(),
            sliders: Vec::new(),
            burst_sliders: Vec::new(),
            waypoints: Vec::new(),
            basic_beatmap_events: Vec::new(),
            color_boost_beatmap_events: Vec::new(),
            light_color_event_box_groups: Vec::new(),
            light_rotation_event_box_groups: Vec::new(),
            light_translation_event_box_groups: Vec::new(),
            basic_event_types_with_keywords: BasicEventTypesWithKeywords::default(),
            use_normal_events_as_compatible_events: false,
            custom_data: CustomData::new(),
        }
    }
}

fn serialize_all<T: SchemaContainer>(data: &[T::Canonical]) -> Vec<T> {
    data.iter().map(T::serialize).collect()
}

fn deserialize_all<T: SchemaContainer>(records: &[T]) -> Vec<T::Canonical> {
    records.iter().map(T::deserialize).collect()
}

impl SchemaContainer for Difficulty {
    type Canonical = beatmap::Difficulty;

    fn serialize(data: &beatmap::Difficulty) -> Self {
        Self {
            version: data.version.clone(),
            bpm_events: serialize_all(&data.bpm_events),
            rotation_events: serialize_all(&data.rotation_events),
            color_notes: serialize_all(&data.color_notes),
            bomb_notes: serialize_all(&data.bomb_notes),
            obstacles: serialize_all(&data.obstacles),
            sliders: serialize_all(&data.arcs),
            burst_sliders: serialize_all(&data.chains),
            waypoints: serialize_all(&data.waypoints),
            basic_beatmap_events: serialize_all(&data.basic_events),
            color_boost_beatmap_events: serialize_all(&data.color_boost_events),
            light_color_event_box_groups: serialize_all(&data.light_color_event_box_groups),
            light_rotation_event_box_groups: serialize_all(&data.light_rotation_event_box_groups),
            light_translation_event_box_groups: serialize_all(
                &data.light_translation_event_box_groups,
            ),
            basic_event_types_with_keywords: BasicEventTypesWithKeywords {
                d: serialize_all(&data.keyword_events),
            },
            use_normal_events_as_compatible_events: data.use_normal_events_as_compatible_events,
            custom_data: data.custom_data.clone(),
        }
    }

    fn deserialize(&self) -> beatmap::Difficulty {
        beatmap::Difficulty {
            version: self.version.clone(),
            color_notes: deserialize_all(&self.color_notes),
            bomb_notes: deserialize_all(&self.bomb_notes),
            obstacles: deserialize_all(&self.obstacles),
            arcs: deserialize_all(&self.sliders),
            chains: deserialize_all(&self.burst_sliders),
            waypoints: deserialize_all(&self.waypoints),
            basic_events: deserialize_all(&self.basic_beatmap_events),
            color_boost_events: deserialize_all(&self.color_boost_beatmap_events),
            rotation_events: deserialize_all(&self.rotation_events),
            bpm_events: deserialize_all(&self.bpm_events),
            light_color_event_box_groups: deserialize_all(&self.light_color_event_box_groups),
            light_rotation_event_box_groups: deserialize_all(&self.light_rotation_event_box_groups),
            light_translation_event_box_groups: deserialize_all(
                &self.light_translation_event_box_groups,
            ),
            keyword_events: deserialize_all(&self.basic_event_types_with_keywords.d),
            use_normal_events_as_compatible_events: self.use_normal_events_as_compatible_events,
            custom_data: self.custom_data.clone(),
            ..beatmap::Difficulty::new(String::new())
        }
    }
}
