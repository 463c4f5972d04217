//! Custom events: track animations, track assignments and fog.

use std::collections::HashSet;

use serde_json::Value;

use super::{
    ConvertWarning, Context,
    custom_data::{Direction, KeyRule, Reshape, rekey, scale_points},
};
use crate::{
    beatmap::{CustomData, ObjectKind, ObjectRef},
    geometry::{to_legacy_units, to_modern_units},
};

const ANIMATE_TRACK: &str = "AnimateTrack";
const ANIMATE_COMPONENT: &str = "AnimateComponent";
const ASSIGN_FOG_TRACK: &str = "AssignFogTrack";
const FOG_COMPONENT: &str = "BloomFogEnvironment";

/// Most repeats of a track animation expanded on downgrade.
const MAX_REPEAT: u32 = 1000;

const fn copy(modern: &'static str, legacy: &'static str) -> KeyRule {
    KeyRule {
        modern,
        legacy,
        reshape: Reshape::Copy,
    }
}

const ANIMATE_TRACK_KEYS: &[KeyRule] = &[
    copy("track", "_track"),
    copy("duration", "_duration"),
    copy("easing", "_easing"),
    copy("position", "_position"),
    copy("rotation", "_rotation"),
    copy("localRotation", "_localRotation"),
    copy("scale", "_scale"),
    copy("dissolve", "_dissolve"),
    copy("dissolveArrow", "_dissolveArrow"),
    copy("color", "_color"),
    copy("interactable", "_interactable"),
    copy("time", "_time"),
];

const ASSIGN_PATH_ANIMATION_KEYS: &[KeyRule] = &[
    copy("track", "_track"),
    copy("easing", "_easing"),
    copy("position", "_position"),
    copy("rotation", "_rotation"),
    copy("localRotation", "_localRotation"),
    copy("scale", "_scale"),
    copy("dissolve", "_dissolve"),
    copy("dissolveArrow", "_dissolveArrow"),
    copy("color", "_color"),
    copy("interactable", "_interactable"),
    copy("definitePosition", "_definitePosition"),
];

const ASSIGN_TRACK_PARENT_KEYS: &[KeyRule] = &[
    copy("childrenTracks", "_childrenTracks"),
    copy("parentTrack", "_parentTrack"),
    copy("worldPositionStays", "_worldPositionStays"),
];

const ASSIGN_PLAYER_TO_TRACK_KEYS: &[KeyRule] = &[
    copy("track", "_track"),
    copy("playerTrackObject", "_playerTrackObject"),
];

const FOG_TRACK_KEYS: &[KeyRule] = &[copy("track", "_track"), copy("duration", "_duration")];

const FOG_KEYS: &[KeyRule] = &[
    copy("attenuation", "_attenuation"),
    copy("height", "_height"),
    copy("offset", "_offset"),
    copy("startY", "_startY"),
];

fn data_keys(event_type: &str) -> Option<&'static [KeyRule]> {
    match event_type {
        ANIMATE_TRACK => Some(ANIMATE_TRACK_KEYS),
        "AssignPathAnimation" => Some(ASSIGN_PATH_ANIMATION_KEYS),
        "AssignTrackParent" => Some(ASSIGN_TRACK_PARENT_KEYS),
        "AssignPlayerToTrack" => Some(ASSIGN_PLAYER_TO_TRACK_KEYS),
        _ => None,
    }
}

/// Key names of one custom event in one key style.
struct EventKeys {
    time: &'static str,
    event_type: &'static str,
    data: &'static str,
    track: &'static str,
    position: &'static str,
}

const LEGACY_KEYS: EventKeys = EventKeys {
    time: "_time",
    event_type: "_type",
    data: "_data",
    track: "_track",
    position: "_position",
};

const MODERN_KEYS: EventKeys = EventKeys {
    time: "b",
    event_type: "t",
    data: "d",
    track: "track",
    position: "position",
};

const fn target_keys(direction: Direction) -> &'static EventKeys {
    match direction {
        Direction::ToLegacy => &LEGACY_KEYS,
        Direction::ToModern => &MODERN_KEYS,
    }
}

const fn source_keys(direction: Direction) -> &'static EventKeys {
    match direction {
        Direction::ToLegacy => &MODERN_KEYS,
        Direction::ToModern => &LEGACY_KEYS,
    }
}

struct RawEvent<'a> {
    time: f64,
    event_type: &'a str,
    data: CustomData,
}

fn read_event<'a>(event: &'a Value, keys: &EventKeys) -> Option<RawEvent<'a>> {
    let event_type = event.get(keys.event_type)?.as_str()?;
    let data = match event.get(keys.data) {
        Some(Value::Object(data)) => data.clone(),
        Some(Value::Null) | None => CustomData::new(),
        Some(_) => return None,
    };
    Some(RawEvent {
        time: event.get(keys.time).and_then(Value::as_f64).unwrap_or(0.0),
        event_type,
        data,
    })
}

fn write_event(keys: &EventKeys, time: f64, event_type: &str, data: CustomData) -> Value {
    let mut event = CustomData::new();
    event.insert(keys.time.to_owned(), Value::from(time));
    event.insert(keys.event_type.to_owned(), Value::from(event_type));
    event.insert(keys.data.to_owned(), Value::Object(data));
    Value::Object(event)
}

/// Copies only the keys named in `rules`.
fn pick(source: &CustomData, rules: &[KeyRule], direction: Direction, out: &mut CustomData) {
    for rule in rules {
        if let Some(value) = source.get(rule.source(direction)) {
            out.insert(rule.target(direction).to_owned(), value.clone());
        }
    }
}

/// Converts `customEvents` into `_customEvents`.
///
/// Repeating track animations are expanded, since `2.x` has no repeat.
pub(super) fn custom_events_to_legacy(events: &Value, ctx: &mut Context) -> Option<Value> {
    convert_custom_events(events, "customEvents", Direction::ToLegacy, ctx)
}

/// Converts `_customEvents` into `customEvents`.
pub(super) fn custom_events_to_modern(events: &Value, ctx: &mut Context) -> Option<Value> {
    convert_custom_events(events, "_customEvents", Direction::ToModern, ctx)
}

fn convert_custom_events(
    events: &Value,
    key: &'static str,
    direction: Direction,
    ctx: &mut Context,
) -> Option<Value> {
    let Value::Array(events) = events else {
        ctx.warn(ConvertWarning::MalformedCustomData { key, object: None });
        return None;
    };
    let source = source_keys(direction);
    let target = target_keys(direction);
    let mut converted = Vec::with_capacity(events.len());
    for (index, event) in events.iter().enumerate() {
        let Some(RawEvent {
            time,
            event_type,
            mut data,
        }) = read_event(event, source)
        else {
            ctx.warn(ConvertWarning::MalformedCustomData {
                key,
                object: Some(ObjectRef::untimed(ObjectKind::CustomEvent, index)),
            });
            continue;
        };
        let object = ObjectRef::new(ObjectKind::CustomEvent, index, time);
        match (direction, event_type) {
            (Direction::ToLegacy, ANIMATE_TRACK) => {
                let requested = data
                    .remove("repeat")
                    .and_then(|repeat| repeat.as_f64())
                    .map_or(0.0, |repeat| repeat.max(0.0));
                let repeat = if requested > f64::from(MAX_REPEAT) {
                    ctx.warn(ConvertWarning::RepeatClamped {
                        object,
                        requested,
                        limit: MAX_REPEAT,
                    });
                    MAX_REPEAT
                } else {
                    requested as u32
                };
                let duration = data.get("duration").and_then(Value::as_f64).unwrap_or(0.0);
                let data = rekey(&data, ANIMATE_TRACK_KEYS, direction);
                for i in 0..=repeat {
                    let at = time + duration * f64::from(i);
                    converted.push(write_event(target, at, ANIMATE_TRACK, data.clone()));
                }
                if repeat > 0 {
                    ctx.warn(ConvertWarning::RepeatExpanded {
                        object,
                        count: repeat as usize + 1,
                    });
                }
            }
            (Direction::ToLegacy, ANIMATE_COMPONENT) => {
                let Some(Value::Object(fog)) = data.get(FOG_COMPONENT) else {
                    ctx.warn(ConvertWarning::CustomEventDropped {
                        object,
                        event_type: event_type.to_owned(),
                    });
                    continue;
                };
                let mut fog_data = CustomData::new();
                pick(&data, FOG_TRACK_KEYS, direction, &mut fog_data);
                pick(fog, FOG_KEYS, direction, &mut fog_data);
                converted.push(write_event(target, time, ASSIGN_FOG_TRACK, fog_data));
            }
            (Direction::ToModern, ASSIGN_FOG_TRACK) => {
                let mut fog = CustomData::new();
                pick(&data, FOG_KEYS, direction, &mut fog);
                let mut component_data = CustomData::new();
                pick(&data, FOG_TRACK_KEYS, direction, &mut component_data);
                component_data.insert(FOG_COMPONENT.to_owned(), Value::Object(fog));
                converted.push(write_event(target, time, ANIMATE_COMPONENT, component_data));
            }
            (_, event_type) => match data_keys(event_type) {
                Some(rules) => {
                    converted.push(write_event(
                        target,
                        time,
                        event_type,
                        rekey(&data, rules, direction),
                    ));
                }
                None => {
                    ctx.warn(ConvertWarning::UnknownCustomEvent {
                        object,
                        event_type: event_type.to_owned(),
                    });
                    converted.push(write_event(target, time, event_type, data));
                }
            },
        }
    }
    Some(Value::Array(converted))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    None,
    Partial,
    All,
}

fn environment_coverage(track: Option<&Value>, tracks: &HashSet<String>) -> Coverage {
    match track {
        Some(Value::String(track)) if tracks.contains(track) => Coverage::All,
        Some(Value::Array(names)) => {
            let in_environment = names
                .iter()
                .filter(|name| name.as_str().is_some_and(|name| tracks.contains(name)))
                .count();
            if in_environment == 0 {
                Coverage::None
            } else if in_environment == names.len() {
                Coverage::All
            } else {
                Coverage::Partial
            }
        }
        _ => Coverage::None,
    }
}

/// Rescales the position of track animations on environment tracks, in already converted events.
///
/// Environment positions changed units between `2.x` and `3.x`, gameplay object positions did not, so only animations of tracks used by environment entries are touched.
pub(super) fn rescale_environment_tracks(
    events: &mut Value,
    tracks: &HashSet<String>,
    direction: Direction,
    ctx: &mut Context,
) {
    let Value::Array(events) = events else {
        return;
    };
    if tracks.is_empty() {
        return;
    }
    let keys = target_keys(direction);
    let scale = match direction {
        Direction::ToLegacy => to_legacy_units,
        Direction::ToModern => to_modern_units,
    };
    for (index, event) in events.iter_mut().enumerate() {
        if event.get(keys.event_type).and_then(Value::as_str) != Some(ANIMATE_TRACK) {
            continue;
        }
        let time = event.get(keys.time).and_then(Value::as_f64).unwrap_or(0.0);
        let object = ObjectRef::new(ObjectKind::CustomEvent, index, time);
        let Some(Value::Object(data)) = event.get_mut(keys.data) else {
            continue;
        };
        match environment_coverage(data.get(keys.track), tracks) {
            Coverage::None => {}
            Coverage::Partial => ctx.warn(ConvertWarning::PartialEnvironmentTrack { object }),
            Coverage::All => {
                if let Some(position) = data.get_mut(keys.position)
                    && !scale_points(position, scale)
                    && position.is_string()
                {
                    ctx.warn(ConvertWarning::PointDefinitionReference { object });
                }
            }
        }
    }
}
