//! Step between `3.2.0` and `4.0.0`.
//!
//! `4.x` stores the accumulated lane rotation on every object, `3.x` only as rotation events. BPM events live in the audio data file of `4.x`, outside the difficulty.

use itertools::Itertools;

use super::{Context, ConvertWarning, TargetVersion};
use crate::{
    beatmap::{
        CustomData, Difficulty, ExecutionTime, LightColorEvent, ObjectKind, ObjectRef,
        RotationEvent,
    },
    geometry::lane_rotation_at,
};

/// Tolerance below which an accumulated rotation counts as whole degrees.
const ROTATION_TOLERANCE: f64 = 1e-6;

/// Rotation events as `(time, late, rotation)`, sorted by time.
fn rotation_steps(events: &[RotationEvent]) -> Vec<(f64, bool, f64)> {
    events
        .iter()
        .map(|event| {
            (
                event.time,
                event.execution_time == ExecutionTime::Late,
                event.rotation,
            )
        })
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .collect()
}

/// Stores the lane rotation at each `(time, slot)` in whole degrees and warns about the rounded ones.
fn assign_lane_rotations<'a>(
    kind: ObjectKind,
    rotations: &[(f64, bool, f64)],
    slots: impl Iterator<Item = (f64, &'a mut i32)>,
    ctx: &mut Context,
) {
    let mut rounded = 0;
    for (time, slot) in slots {
        let exact = lane_rotation_at(rotations, time);
        *slot = exact.round() as i32;
        if (exact - exact.round()).abs() > ROTATION_TOLERANCE {
            rounded += 1;
        }
    }
    if rounded > 0 {
        ctx.warn(ConvertWarning::LaneRotationRounded {
            kind,
            count: rounded,
        });
    }
}

pub(super) fn upgrade(source: &Difficulty, ctx: &mut Context) -> Difficulty {
    let v4 = TargetVersion::V4;
    let mut target = source.clone();
    target.version = v4.version_string().to_owned();

    let rotations = rotation_steps(&source.rotation_events);
    if !rotations.is_empty() {
        assign_lane_rotations(
            ObjectKind::ColorNote,
            &rotations,
            target
                .color_notes
                .iter_mut()
                .map(|note| (note.time, &mut note.lane_rotation)),
            ctx,
        );
        assign_lane_rotations(
            ObjectKind::BombNote,
            &rotations,
            target
                .bomb_notes
                .iter_mut()
                .map(|bomb| (bomb.time, &mut bomb.lane_rotation)),
            ctx,
        );
        assign_lane_rotations(
            ObjectKind::Obstacle,
            &rotations,
            target
                .obstacles
                .iter_mut()
                .map(|obstacle| (obstacle.time, &mut obstacle.lane_rotation)),
            ctx,
        );
        assign_lane_rotations(
            ObjectKind::Arc,
            &rotations,
            target.arcs.iter_mut().flat_map(|arc| {
                [
                    (arc.time, &mut arc.lane_rotation),
                    (arc.tail_time, &mut arc.tail_lane_rotation),
                ]
            }),
            ctx,
        );
        assign_lane_rotations(
            ObjectKind::Chain,
            &rotations,
            target.chains.iter_mut().flat_map(|chain| {
                [
                    (chain.time, &mut chain.lane_rotation),
                    (chain.tail_time, &mut chain.tail_lane_rotation),
                ]
            }),
            ctx,
        );
        assign_lane_rotations(
            ObjectKind::Waypoint,
            &rotations,
            target
                .waypoints
                .iter_mut()
                .map(|waypoint| (waypoint.time, &mut waypoint.lane_rotation)),
            ctx,
        );
    }

    ctx.warn_dropped(ObjectKind::BpmEvent, target.bpm_events.len(), v4);
    target.bpm_events.clear();
    target.use_normal_events_as_compatible_events = false;
    target
}

pub(super) fn downgrade(source: &Difficulty, ctx: &mut Context) -> Difficulty {
    let mut target = source.clone();
    target.version = TargetVersion::V3.version_string().to_owned();

    if source.rotation_events.is_empty() {
        target.rotation_events = rotation_events_of(source);
        if !target.rotation_events.is_empty() {
            log::debug!(
                target: super::LOG_TARGET,
                "synthesized {} rotation events from object lane rotations",
                target.rotation_events.len()
            );
        }
    }
    warn_lane_rotations_dropped(source, &rotation_steps(&target.rotation_events), ctx);
    for note in &mut target.color_notes {
        note.lane_rotation = 0;
    }
    for bomb in &mut target.bomb_notes {
        bomb.lane_rotation = 0;
    }
    for obstacle in &mut target.obstacles {
        obstacle.lane_rotation = 0;
    }
    for arc in &mut target.arcs {
        arc.lane_rotation = 0;
        arc.tail_lane_rotation = 0;
    }
    for chain in &mut target.chains {
        chain.lane_rotation = 0;
        chain.tail_lane_rotation = 0;
    }
    for waypoint in &mut target.waypoints {
        waypoint.lane_rotation = 0;
    }

    let mut approximated = 0;
    let mut first_group = None;
    for (index, group) in target.light_color_event_box_groups.iter_mut().enumerate() {
        let events = group
            .boxes
            .iter_mut()
            .flat_map(|event_box| event_box.events.iter_mut())
            .filter(|event| !event.has_exact_transition());
        let mut in_group = 0;
        for event in events {
            (event.previous, event.easing) =
                LightColorEvent::fields_of_transition(event.transition());
            in_group += 1;
        }
        if in_group > 0 {
            approximated += in_group;
            first_group.get_or_insert(ObjectRef::new(
                ObjectKind::LightColorEventBoxGroup,
                index,
                group.time,
            ));
        }
    }
    if let Some(object) = first_group {
        ctx.warn(ConvertWarning::LightTransitionApproximated {
            object,
            count: approximated,
        });
    }
    target
}

/// Warns about objects whose lane rotation the `3.x` rotation events do not reproduce.
fn warn_lane_rotations_dropped(
    source: &Difficulty,
    rotations: &[(f64, bool, f64)],
    ctx: &mut Context,
) {
    let differs =
        |time: f64, rotation: i32| lane_rotation_at(rotations, time).round() as i32 != rotation;
    let counts = [
        (
            ObjectKind::ColorNote,
            source
                .color_notes
                .iter()
                .filter(|note| differs(note.time, note.lane_rotation))
                .count(),
        ),
        (
            ObjectKind::BombNote,
            source
                .bomb_notes
                .iter()
                .filter(|bomb| differs(bomb.time, bomb.lane_rotation))
                .count(),
        ),
        (
            ObjectKind::Obstacle,
            source
                .obstacles
                .iter()
                .filter(|obstacle| differs(obstacle.time, obstacle.lane_rotation))
                .count(),
        ),
        (
            ObjectKind::Arc,
            source
                .arcs
                .iter()
                .filter(|arc| {
                    differs(arc.time, arc.lane_rotation)
                        || differs(arc.tail_time, arc.tail_lane_rotation)
                })
                .count(),
        ),
        (
            ObjectKind::Chain,
            source
                .chains
                .iter()
                .filter(|chain| {
                    differs(chain.time, chain.lane_rotation)
                        || differs(chain.tail_time, chain.tail_lane_rotation)
                })
                .count(),
        ),
        (
            ObjectKind::Waypoint,
            source
                .waypoints
                .iter()
                .filter(|waypoint| differs(waypoint.time, waypoint.lane_rotation))
                .count(),
        ),
    ];
    for (kind, count) in counts {
        if count > 0 {
            ctx.warn(ConvertWarning::FieldDropped {
                kind,
                field: "r",
                count,
            });
        }
    }
}

/// Early rotation events reproducing the lane rotations stored on objects.
fn rotation_events_of(difficulty: &Difficulty) -> Vec<RotationEvent> {
    let rotations = difficulty
        .color_notes
        .iter()
        .map(|note| (note.time, note.lane_rotation))
        .chain(difficulty.bomb_notes.iter().map(|bomb| (bomb.time, bomb.lane_rotation)))
        .chain(
            difficulty
                .obstacles
                .iter()
                .map(|obstacle| (obstacle.time, obstacle.lane_rotation)),
        )
        .chain(difficulty.arcs.iter().map(|arc| (arc.time, arc.lane_rotation)))
        .chain(difficulty.chains.iter().map(|chain| (chain.time, chain.lane_rotation)))
        .sorted_by(|a, b| a.0.total_cmp(&b.0));
    let mut current = 0;
    let mut events = Vec::new();
    for (time, rotation) in rotations {
        if rotation != current {
            events.push(RotationEvent {
                time,
                execution_time: ExecutionTime::Early,
                rotation: f64::from(rotation - current),
                custom_data: CustomData::new(),
            });
            current = rotation;
        }
    }
    events
}
