//! Step between `2.6.0` and `3.2.0`.
//!
//! Besides renaming custom data keys, this step splits the `2.x` event list into the dedicated boost, lane rotation and BPM collections of `3.x` and moves fake objects in and out of the difficulty custom data.

use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use super::{
    Context, ConvertError, ConvertWarning, TargetVersion,
    custom_data::{
        BOOKMARK_KEYS, BPM_CHANGE_KEYS, Direction, KeyRule, NOTE_KEYS, OBSTACLE_KEYS, event_keys,
        rekey,
    },
    custom_event::{custom_events_to_legacy, custom_events_to_modern, rescale_environment_tracks},
    environment::{
        convert_environment, convert_materials, environment_tracks, point_definitions_to_legacy,
        point_definitions_to_modern,
    },
};
use crate::{
    beatmap::{
        BasicEvent, BpmEvent, ColorBoostEvent, ColorNote, CustomData, Difficulty, EventCategory,
        ExecutionTime, ObjectKind, ObjectRef, RotationEvent,
        event::{
            EVENT_TYPE_BPM_CHANGE, EVENT_TYPE_COLOR_BOOST, EVENT_TYPE_EARLY_ROTATION,
            EVENT_TYPE_LATE_ROTATION,
        },
        object::DIRECTION_ANY,
    },
    geometry::{
        legacy_rotation_value, mapping_extensions_angle, normalize_angle,
        rotation_from_legacy_value,
    },
    schema::{
        SchemaContainer,
        v3::{BombNoteRecord, ColorNoteRecord, ObstacleRecord},
    },
};

/// Legacy Chroma light values at or above this carry an RGB color instead of a light state.
const CHROMA_RGB_OFFSET: i32 = 2_000_000_000;

const FAKE_COLOR_NOTES: &str = "fakeColorNotes";
const FAKE_BOMB_NOTES: &str = "fakeBombNotes";
const FAKE_OBSTACLES: &str = "fakeObstacles";

/// Removes the `_fake` flag and tells whether it was set.
fn take_fake(custom_data: &mut CustomData) -> bool {
    matches!(custom_data.remove("_fake"), Some(Value::Bool(true)))
}

fn fake_record<T: SchemaContainer + Serialize>(object: &T::Canonical) -> Option<Value> {
    serde_json::to_value(<T as SchemaContainer>::serialize(object)).ok()
}

/// Reads the fake objects stored under `key` in `3.x` difficulty custom data.
fn read_fakes<T: SchemaContainer + DeserializeOwned>(
    custom_data: &CustomData,
    key: &'static str,
    kind: ObjectKind,
    ctx: &mut Context,
) -> Vec<T::Canonical> {
    let Some(value) = custom_data.get(key) else {
        return Vec::new();
    };
    let Value::Array(records) = value else {
        ctx.warn(ConvertWarning::MalformedCustomData { key, object: None });
        return Vec::new();
    };
    let mut objects = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match serde_json::from_value::<T>(record.clone()) {
            Ok(record) => objects.push(SchemaContainer::deserialize(&record)),
            Err(_) => ctx.warn(ConvertWarning::MalformedCustomData {
                key,
                object: Some(ObjectRef::untimed(kind, index)),
            }),
        }
    }
    objects
}

fn legacy_fake(custom_data: &CustomData, rules: &[KeyRule]) -> CustomData {
    let mut custom_data = rekey(custom_data, rules, Direction::ToLegacy);
    custom_data.insert("_fake".to_owned(), Value::Bool(true));
    custom_data
}

/// Moves a Noodle Extensions or Mapping Extensions precise cut direction into the angle offset.
fn upgrade_cut_direction(note: &mut ColorNote) {
    if let Some(angle) = note
        .custom_data
        .remove("_cutDirection")
        .and_then(|angle| angle.as_f64())
    {
        note.angle_offset = normalize_angle(angle).round() as i32 % 360;
        if note.direction != DIRECTION_ANY {
            note.direction = 1;
        }
    } else if (1000..=1360).contains(&note.direction) {
        note.angle_offset = mapping_extensions_angle(note.direction).round() as i32;
        note.direction = 1;
    }
}

/// RGB color of a legacy Chroma light value, if it is one.
fn chroma_rgb(value: i32) -> Option<Value> {
    if value < CHROMA_RGB_OFFSET {
        return None;
    }
    let rgb = value - CHROMA_RGB_OFFSET;
    let channel = |shift: i32| f64::from((rgb >> shift) & 0xff) / 255.0;
    Some(json!([channel(16), channel(8), channel(0)]))
}

fn rekey_list(value: &Value, rules: &[KeyRule], direction: Direction) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::Object(item) => Value::Object(rekey(item, rules, direction)),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

pub(super) fn upgrade(source: &Difficulty, ctx: &mut Context) -> Result<Difficulty, ConvertError> {
    let mut target = Difficulty::new(TargetVersion::V3.version_string());
    target.filename.clone_from(&source.filename);
    let mut fake_color_notes = Vec::new();
    let mut fake_bomb_notes = Vec::new();
    let mut fake_obstacles = Vec::new();

    for note in &source.color_notes {
        let mut note = note.clone();
        let fake = take_fake(&mut note.custom_data);
        upgrade_cut_direction(&mut note);
        note.custom_data = rekey(&note.custom_data, NOTE_KEYS, Direction::ToModern);
        if fake {
            fake_color_notes.extend(fake_record::<ColorNoteRecord>(&note));
        } else {
            target.color_notes.push(note);
        }
    }
    for bomb in &source.bomb_notes {
        let mut bomb = bomb.clone();
        let fake = take_fake(&mut bomb.custom_data);
        bomb.custom_data = rekey(&bomb.custom_data, NOTE_KEYS, Direction::ToModern);
        if fake {
            fake_bomb_notes.extend(fake_record::<BombNoteRecord>(&bomb));
        } else {
            target.bomb_notes.push(bomb);
        }
    }
    for obstacle in &source.obstacles {
        let mut obstacle = obstacle.clone();
        let fake = take_fake(&mut obstacle.custom_data);
        obstacle.custom_data = rekey(&obstacle.custom_data, OBSTACLE_KEYS, Direction::ToModern);
        if fake {
            fake_obstacles.extend(fake_record::<ObstacleRecord>(&obstacle));
        } else {
            target.obstacles.push(obstacle);
        }
    }
    target.arcs = source
        .arcs
        .iter()
        .map(|arc| {
            let mut arc = arc.clone();
            arc.custom_data = rekey(&arc.custom_data, NOTE_KEYS, Direction::ToModern);
            arc
        })
        .collect();
    target.waypoints = source
        .waypoints
        .iter()
        .map(|waypoint| {
            let mut waypoint = waypoint.clone();
            waypoint.custom_data = rekey(&waypoint.custom_data, NOTE_KEYS, Direction::ToModern);
            waypoint
        })
        .collect();

    split_events(source, &mut target, ctx);
    target.keyword_events.clone_from(&source.keyword_events);
    target.use_normal_events_as_compatible_events = true;

    target.custom_data = upgrade_root_custom_data(&source.custom_data, ctx)?;
    for (key, fakes) in [
        (FAKE_COLOR_NOTES, fake_color_notes),
        (FAKE_BOMB_NOTES, fake_bomb_notes),
        (FAKE_OBSTACLES, fake_obstacles),
    ] {
        if !fakes.is_empty() {
            target.custom_data.insert(key.to_owned(), Value::Array(fakes));
        }
    }
    Ok(target)
}

/// Sorts `2.x` events into basic, boost, lane rotation and BPM events.
fn split_events(source: &Difficulty, target: &mut Difficulty, ctx: &mut Context) {
    let mut chroma_colors: HashMap<i32, Value> = HashMap::new();
    for (index, event) in source.basic_events.iter().enumerate() {
        let object = ObjectRef::new(ObjectKind::BasicEvent, index, event.time);
        match event.category() {
            EventCategory::ColorBoost => target.color_boost_events.push(ColorBoostEvent {
                time: event.time,
                toggle: event.value != 0,
                custom_data: event.custom_data.clone(),
            }),
            EventCategory::LaneRotation => {
                let mut custom_data = event.custom_data.clone();
                let precise = custom_data.remove("_rotation").and_then(|r| r.as_f64());
                let Some(rotation) = precise.or_else(|| rotation_from_legacy_value(event.value))
                else {
                    ctx.warn(ConvertWarning::RotationUnrepresentable {
                        object,
                        value: event.value,
                    });
                    continue;
                };
                let execution_time = if event.event_type == EVENT_TYPE_LATE_ROTATION {
                    ExecutionTime::Late
                } else {
                    ExecutionTime::Early
                };
                target.rotation_events.push(RotationEvent {
                    time: event.time,
                    execution_time,
                    rotation,
                    custom_data,
                });
            }
            EventCategory::BpmChange => target.bpm_events.push(BpmEvent {
                time: event.time,
                bpm: event.float_value,
                custom_data: event.custom_data.clone(),
            }),
            category => {
                if category == EventCategory::Light
                    && let Some(color) = chroma_rgb(event.value)
                {
                    log::debug!(target: super::LOG_TARGET, "{object} sets a Chroma color");
                    chroma_colors.insert(event.event_type, color);
                    continue;
                }
                let mut custom_data =
                    rekey(&event.custom_data, event_keys(category), Direction::ToModern);
                if category == EventCategory::Light
                    && event.value != 0
                    && let Some(color) = chroma_colors.get(&event.event_type)
                {
                    custom_data
                        .entry("color".to_owned())
                        .or_insert_with(|| color.clone());
                }
                target.basic_events.push(BasicEvent {
                    custom_data,
                    ..event.clone()
                });
            }
        }
    }
}

fn upgrade_root_custom_data(
    source: &CustomData,
    ctx: &mut Context,
) -> Result<CustomData, ConvertError> {
    let mut out = CustomData::new();
    for (key, value) in source {
        let converted = match key.as_str() {
            "_customEvents" => custom_events_to_modern(value, ctx).map(|v| ("customEvents", v)),
            "_environment" => convert_environment(value, "_environment", Direction::ToModern, ctx)?
                .map(|v| ("environment", v)),
            "_materials" => Some(("materials", convert_materials(value, Direction::ToModern))),
            "_pointDefinitions" => {
                point_definitions_to_modern(value, ctx).map(|v| ("pointDefinitions", v))
            }
            "_bookmarks" => Some((
                "bookmarks",
                rekey_list(value, BOOKMARK_KEYS, Direction::ToModern),
            )),
            "_BPMChanges" => Some((
                "BPMChanges",
                rekey_list(value, BPM_CHANGE_KEYS, Direction::ToModern),
            )),
            "_time" => Some(("time", value.clone())),
            _ => {
                out.entry(key.clone()).or_insert_with(|| value.clone());
                continue;
            }
        };
        if let Some((key, value)) = converted {
            out.insert(key.to_owned(), value);
        }
    }
    if let Some(environment) = out.get("environment") {
        let tracks = environment_tracks(environment, "track");
        if let Some(events) = out.get_mut("customEvents") {
            rescale_environment_tracks(events, &tracks, Direction::ToModern, ctx);
        }
    }
    Ok(out)
}

pub(super) fn downgrade(source: &Difficulty, ctx: &mut Context) -> Result<Difficulty, ConvertError> {
    let v2 = TargetVersion::V2;
    let mut target = Difficulty::new(v2.version_string());
    target.filename.clone_from(&source.filename);

    let mut angle_offsets = 0;
    for note in &source.color_notes {
        let mut note = note.clone();
        if note.angle_offset != 0 {
            angle_offsets += 1;
            note.angle_offset = 0;
        }
        note.custom_data = rekey(&note.custom_data, NOTE_KEYS, Direction::ToLegacy);
        target.color_notes.push(note);
    }
    if angle_offsets > 0 {
        ctx.warn(ConvertWarning::FieldDropped {
            kind: ObjectKind::ColorNote,
            field: "angleOffset",
            count: angle_offsets,
        });
    }
    target.bomb_notes = source
        .bomb_notes
        .iter()
        .map(|bomb| {
            let mut bomb = bomb.clone();
            bomb.custom_data = rekey(&bomb.custom_data, NOTE_KEYS, Direction::ToLegacy);
            bomb
        })
        .collect();
    target.obstacles = source
        .obstacles
        .iter()
        .map(|obstacle| {
            let mut obstacle = obstacle.clone();
            obstacle.custom_data =
                rekey(&obstacle.custom_data, OBSTACLE_KEYS, Direction::ToLegacy);
            obstacle
        })
        .collect();

    let fake_notes: Vec<ColorNote> = read_fakes::<ColorNoteRecord>(
        &source.custom_data,
        FAKE_COLOR_NOTES,
        ObjectKind::ColorNote,
        ctx,
    );
    target
        .color_notes
        .extend(fake_notes.into_iter().map(|mut note| {
            note.angle_offset = 0;
            note.custom_data = legacy_fake(&note.custom_data, NOTE_KEYS);
            note
        }));
    let fake_bombs =
        read_fakes::<BombNoteRecord>(&source.custom_data, FAKE_BOMB_NOTES, ObjectKind::BombNote, ctx);
    target
        .bomb_notes
        .extend(fake_bombs.into_iter().map(|mut bomb| {
            bomb.custom_data = legacy_fake(&bomb.custom_data, NOTE_KEYS);
            bomb
        }));
    let fake_obstacles =
        read_fakes::<ObstacleRecord>(&source.custom_data, FAKE_OBSTACLES, ObjectKind::Obstacle, ctx);
    target
        .obstacles
        .extend(fake_obstacles.into_iter().map(|mut obstacle| {
            obstacle.custom_data = legacy_fake(&obstacle.custom_data, OBSTACLE_KEYS);
            obstacle
        }));

    target.arcs = source
        .arcs
        .iter()
        .map(|arc| {
            let mut arc = arc.clone();
            arc.custom_data = rekey(&arc.custom_data, NOTE_KEYS, Direction::ToLegacy);
            arc
        })
        .collect();
    target.waypoints = source
        .waypoints
        .iter()
        .map(|waypoint| {
            let mut waypoint = waypoint.clone();
            waypoint.custom_data = rekey(&waypoint.custom_data, NOTE_KEYS, Direction::ToLegacy);
            waypoint
        })
        .collect();
    ctx.warn_dropped(ObjectKind::Chain, source.chains.len(), v2);
    ctx.warn_dropped(
        ObjectKind::LightColorEventBoxGroup,
        source.light_color_event_box_groups.len(),
        v2,
    );
    ctx.warn_dropped(
        ObjectKind::LightRotationEventBoxGroup,
        source.light_rotation_event_box_groups.len(),
        v2,
    );
    ctx.warn_dropped(
        ObjectKind::LightTranslationEventBoxGroup,
        source.light_translation_event_box_groups.len(),
        v2,
    );

    merge_events(source, &mut target, ctx);
    target.keyword_events.clone_from(&source.keyword_events);
    target.custom_data = downgrade_root_custom_data(&source.custom_data, ctx)?;
    Ok(target)
}

/// Folds boost, lane rotation and BPM events back into the `2.x` event list.
fn merge_events(source: &Difficulty, target: &mut Difficulty, ctx: &mut Context) {
    target.basic_events = source
        .basic_events
        .iter()
        .map(|event| BasicEvent {
            custom_data: rekey(
                &event.custom_data,
                event_keys(event.category()),
                Direction::ToLegacy,
            ),
            ..event.clone()
        })
        .collect();
    target
        .basic_events
        .extend(source.color_boost_events.iter().map(|boost| BasicEvent {
            time: boost.time,
            event_type: EVENT_TYPE_COLOR_BOOST,
            value: i32::from(boost.toggle),
            float_value: 1.0,
            custom_data: boost.custom_data.clone(),
        }));
    for (index, rotation) in source.rotation_events.iter().enumerate() {
        let value = legacy_rotation_value(rotation.rotation);
        let written = rotation_from_legacy_value(value).unwrap_or_default();
        if (written - rotation.rotation).abs() > f64::EPSILON {
            ctx.warn(ConvertWarning::RotationApproximated {
                object: ObjectRef::new(ObjectKind::RotationEvent, index, rotation.time),
                rotation: rotation.rotation,
                written,
            });
        }
        // Early rotations are event type 14 and late rotations are 15, as the game reads them.
        let event_type = match rotation.execution_time {
            ExecutionTime::Early => EVENT_TYPE_EARLY_ROTATION,
            ExecutionTime::Late => EVENT_TYPE_LATE_ROTATION,
        };
        target.basic_events.push(BasicEvent {
            time: rotation.time,
            event_type,
            value,
            float_value: 1.0,
            custom_data: rotation.custom_data.clone(),
        });
    }
    target
        .basic_events
        .extend(source.bpm_events.iter().map(|bpm| BasicEvent {
            time: bpm.time,
            event_type: EVENT_TYPE_BPM_CHANGE,
            value: 1,
            float_value: bpm.bpm,
            custom_data: bpm.custom_data.clone(),
        }));
}

fn downgrade_root_custom_data(
    source: &CustomData,
    ctx: &mut Context,
) -> Result<CustomData, ConvertError> {
    let mut out = CustomData::new();
    for (key, value) in source {
        let converted = match key.as_str() {
            "customEvents" => custom_events_to_legacy(value, ctx).map(|v| ("_customEvents", v)),
            "environment" => convert_environment(value, "environment", Direction::ToLegacy, ctx)?
                .map(|v| ("_environment", v)),
            "materials" => Some(("_materials", convert_materials(value, Direction::ToLegacy))),
            "pointDefinitions" => {
                point_definitions_to_legacy(value, ctx).map(|v| ("_pointDefinitions", v))
            }
            "bookmarks" => Some((
                "_bookmarks",
                rekey_list(value, BOOKMARK_KEYS, Direction::ToLegacy),
            )),
            "BPMChanges" => Some((
                "_BPMChanges",
                rekey_list(value, BPM_CHANGE_KEYS, Direction::ToLegacy),
            )),
            "time" => Some(("_time", value.clone())),
            FAKE_COLOR_NOTES | FAKE_BOMB_NOTES | FAKE_OBSTACLES => None,
            _ => {
                out.entry(key.clone()).or_insert_with(|| value.clone());
                continue;
            }
        };
        if let Some((key, value)) = converted {
            out.insert(key.to_owned(), value);
        }
    }
    if let Some(environment) = out.get("_environment") {
        let tracks = environment_tracks(environment, "_track");
        if let Some(events) = out.get_mut("_customEvents") {
            rescale_environment_tracks(events, &tracks, Direction::ToLegacy, ctx);
        }
    }
    Ok(out)
}
