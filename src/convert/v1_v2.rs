//! Step between `1.5.0` and `2.6.0`.

use super::{Context, ConvertWarning, TargetVersion};
use crate::{
    beatmap::{CustomData, Difficulty, KeyStyle, LegacyInfo, ObjectKind, ObjectRef},
    geometry::{
        OBSTACLE_TYPE_CROUCH, OBSTACLE_TYPE_FREE, OBSTACLE_TYPE_FULL_HEIGHT,
        legacy_obstacle_type, placement_of_legacy_obstacle_type,
    },
    validity::Validity,
};

/// Root custom data keys a `1.5.0` file carries next to its objects.
const KEPT_ROOT_KEYS: [&str; 3] = ["_time", "_BPMChanges", "_bookmarks"];

pub(super) fn upgrade(source: &Difficulty, ctx: &mut Context) -> Difficulty {
    let mut target = source.clone();
    target.version = TargetVersion::V2.version_string().to_owned();
    if target.legacy_info.take().is_some() {
        ctx.warn(ConvertWarning::LegacyInfoDropped);
    }
    for event in &mut target.basic_events {
        event.float_value = 1.0;
    }
    target
}

/// Counts objects of `kind` with custom data, clears it, and warns.
fn strip_custom_data<'a>(
    kind: ObjectKind,
    bags: impl Iterator<Item = &'a mut CustomData>,
    ctx: &mut Context,
) {
    let mut count = 0;
    for bag in bags {
        if !bag.is_empty() {
            bag.clear();
            count += 1;
        }
    }
    if count > 0 {
        ctx.warn(ConvertWarning::CustomDataDropped { kind, count });
    }
}

fn warn_non_vanilla<T: Validity>(kind: ObjectKind, objects: &[T], ctx: &mut Context) {
    let count = objects
        .iter()
        .filter(|object| !object.is_valid(KeyStyle::Legacy))
        .count();
    if count > 0 {
        ctx.warn(ConvertWarning::NonVanillaObjects { kind, count });
    }
}

pub(super) fn downgrade(source: &Difficulty, ctx: &mut Context) -> Difficulty {
    let v1 = TargetVersion::V1;
    warn_non_vanilla(ObjectKind::ColorNote, &source.color_notes, ctx);
    warn_non_vanilla(ObjectKind::BombNote, &source.bomb_notes, ctx);
    warn_non_vanilla(ObjectKind::Obstacle, &source.obstacles, ctx);

    let mut target = Difficulty::new(v1.version_string());
    target.filename.clone_from(&source.filename);
    target.color_notes.clone_from(&source.color_notes);
    target.bomb_notes.clone_from(&source.bomb_notes);
    target.obstacles.clone_from(&source.obstacles);
    target.basic_events.clone_from(&source.basic_events);

    strip_custom_data(
        ObjectKind::ColorNote,
        target.color_notes.iter_mut().map(|note| &mut note.custom_data),
        ctx,
    );
    strip_custom_data(
        ObjectKind::BombNote,
        target.bomb_notes.iter_mut().map(|bomb| &mut bomb.custom_data),
        ctx,
    );
    strip_custom_data(
        ObjectKind::Obstacle,
        target.obstacles.iter_mut().map(|obstacle| &mut obstacle.custom_data),
        ctx,
    );
    strip_custom_data(
        ObjectKind::BasicEvent,
        target.basic_events.iter_mut().map(|event| &mut event.custom_data),
        ctx,
    );

    for (index, obstacle) in target.obstacles.iter_mut().enumerate() {
        if legacy_obstacle_type(obstacle.row, obstacle.height) != OBSTACLE_TYPE_FREE {
            continue;
        }
        let crouch = obstacle.row >= 2;
        let legacy_type = if crouch {
            OBSTACLE_TYPE_CROUCH
        } else {
            OBSTACLE_TYPE_FULL_HEIGHT
        };
        if let Some((row, height)) = placement_of_legacy_obstacle_type(legacy_type) {
            obstacle.row = row;
            obstacle.height = height;
        }
        ctx.warn(ConvertWarning::ObstacleApproximated {
            object: ObjectRef::new(ObjectKind::Obstacle, index, obstacle.time),
            crouch,
        });
    }

    let mut float_values = 0;
    for event in &mut target.basic_events {
        if (event.float_value - 1.0).abs() > f64::EPSILON {
            event.float_value = 1.0;
            float_values += 1;
        }
    }
    if float_values > 0 {
        ctx.warn(ConvertWarning::FieldDropped {
            kind: ObjectKind::BasicEvent,
            field: "_floatValue",
            count: float_values,
        });
    }
    if !source.keyword_events.is_empty() {
        ctx.warn(ConvertWarning::FieldDropped {
            kind: ObjectKind::Difficulty,
            field: "_specialEventsKeywordFilters",
            count: source.keyword_events.len(),
        });
    }

    ctx.warn_dropped(ObjectKind::Arc, source.arcs.len(), v1);
    ctx.warn_dropped(ObjectKind::Chain, source.chains.len(), v1);
    ctx.warn_dropped(ObjectKind::Waypoint, source.waypoints.len(), v1);
    ctx.warn_dropped(ObjectKind::ColorBoostEvent, source.color_boost_events.len(), v1);
    ctx.warn_dropped(ObjectKind::RotationEvent, source.rotation_events.len(), v1);
    ctx.warn_dropped(ObjectKind::BpmEvent, source.bpm_events.len(), v1);
    ctx.warn_dropped(
        ObjectKind::LightColorEventBoxGroup,
        source.light_color_event_box_groups.len(),
        v1,
    );
    ctx.warn_dropped(
        ObjectKind::LightRotationEventBoxGroup,
        source.light_rotation_event_box_groups.len(),
        v1,
    );
    ctx.warn_dropped(
        ObjectKind::LightTranslationEventBoxGroup,
        source.light_translation_event_box_groups.len(),
        v1,
    );

    target.custom_data = source
        .custom_data
        .iter()
        .filter(|(key, _)| KEPT_ROOT_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    if target.custom_data.len() < source.custom_data.len() {
        ctx.warn(ConvertWarning::CustomDataDropped {
            kind: ObjectKind::Difficulty,
            count: 1,
        });
    }
    target.legacy_info = Some(LegacyInfo::default());
    target
}
