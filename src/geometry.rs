//! Numeric helpers shared by the model and the converter: unit scaling, angle normalization and the discrete encodings of older schemas.

/// World units of `3.x` environment positions per unit of `2.x`.
pub const NOODLE_UNIT_FACTOR: f64 = 0.6;

/// Rotation in degrees of each `2.x` lane rotation value `0..=7`.
pub const LEGACY_ROTATION_VALUES: [f64; 8] = [-60.0, -45.0, -30.0, -15.0, 15.0, 30.0, 45.0, 60.0];

/// Legacy obstacle type of a full height wall.
pub const OBSTACLE_TYPE_FULL_HEIGHT: i32 = 0;
/// Legacy obstacle type of a crouch wall.
pub const OBSTACLE_TYPE_CROUCH: i32 = 1;
/// Legacy obstacle type of a freely placed wall (`2.6.0` only).
pub const OBSTACLE_TYPE_FREE: i32 = 2;

/// Scales a `2.x` environment position to `3.x` units.
#[must_use]
pub fn to_modern_units(value: f64) -> f64 {
    value * NOODLE_UNIT_FACTOR
}

/// Scales a `3.x` environment position to `2.x` units.
#[must_use]
pub fn to_legacy_units(value: f64) -> f64 {
    value / NOODLE_UNIT_FACTOR
}

/// [`to_modern_units`] on each component.
#[must_use]
pub fn vec3_to_modern_units(v: [f64; 3]) -> [f64; 3] {
    v.map(to_modern_units)
}

/// [`to_legacy_units`] on each component.
#[must_use]
pub fn vec3_to_legacy_units(v: [f64; 3]) -> [f64; 3] {
    v.map(to_legacy_units)
}

/// Normalizes a Noodle Extensions cut direction angle into `(0, 360]` for positive input.
///
/// Zero and negative input keep the historical behaviour of adding the remainder to 360, so `0` becomes `360`.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    if degrees > 0.0 {
        degrees % 360.0
    } else {
        360.0 + degrees % 360.0
    }
}

/// Angle of a Mapping Extensions precise cut direction `1000..=1360`.
#[must_use]
pub fn mapping_extensions_angle(direction: i32) -> f64 {
    f64::from(((direction % 1000) % 360) - 360).abs()
}

/// Decodes Mapping Extensions precision placement of a lane or row.
///
/// Values at or beyond ±1000 are thousandths of a lane shifted one lane away from zero, so `1000` and `-1000` are both lane `0`, `1500` is lane `0.5` and `-1500` is lane `-0.5`. Other values are plain lanes.
#[must_use]
pub fn mapping_extensions_position(value: i32) -> f64 {
    if value >= 1000 {
        f64::from(value) / 1000.0 - 1.0
    } else if value <= -1000 {
        f64::from(value) / 1000.0 + 1.0
    } else {
        f64::from(value)
    }
}

/// Encodes a lane or row as Mapping Extensions precision placement, the inverse of [`mapping_extensions_position`] on precise values.
#[must_use]
pub fn precise_position_value(position: f64) -> i32 {
    let thousandths = (position * 1000.0).round() as i32;
    if thousandths >= 0 {
        thousandths + 1000
    } else {
        thousandths - 1000
    }
}

/// Decodes a wall width in lanes. Mapping Extensions widths of 1000 and above are thousandths of a lane above `1000`.
#[must_use]
pub fn mapping_extensions_width(value: i32) -> f64 {
    if value >= 1000 {
        f64::from(value - 1000) / 1000.0
    } else {
        f64::from(value)
    }
}

/// Encodes a lane rotation in degrees as a `2.x` lane rotation event value.
///
/// The rotation is clamped to ±60 and bucketed by 15 degrees. Buckets below 6 are raised to at least 3 and higher ones lowered by 2, so for example -60 and -45 both give 3, 0 gives 4, 45 gives 5 and 60 gives 6.
#[must_use]
pub fn legacy_rotation_value(rotation: f64) -> i32 {
    let bucket = ((rotation.clamp(-60.0, 60.0) + 60.0) / 15.0).floor() as i32;
    if bucket < 6 { bucket.max(3) } else { bucket - 2 }
}

/// Decodes a `2.x` lane rotation event value.
///
/// Values `0..=7` index [`LEGACY_ROTATION_VALUES`] and Mapping Extensions values `1000..=1720` encode `value - 1360` degrees. Anything else has no meaning.
#[must_use]
pub fn rotation_from_legacy_value(value: i32) -> Option<f64> {
    match value {
        0..=7 => usize::try_from(value)
            .ok()
            .and_then(|index| LEGACY_ROTATION_VALUES.get(index))
            .copied(),
        1000..=1720 => Some(f64::from(value - 1360)),
        _ => None,
    }
}

/// Legacy obstacle type of a wall starting at `row` with `height`.
///
/// Mapping Extensions heights of 1000 and above are carried as the type itself.
#[must_use]
pub const fn legacy_obstacle_type(row: i32, height: i32) -> i32 {
    match (row, height) {
        (_, h) if h >= 1000 => h,
        (0, 5) => OBSTACLE_TYPE_FULL_HEIGHT,
        (2, 3) => OBSTACLE_TYPE_CROUCH,
        _ => OBSTACLE_TYPE_FREE,
    }
}

/// Row and height of a wall of the legacy type `obstacle_type`, if the type alone determines them.
#[must_use]
pub const fn placement_of_legacy_obstacle_type(obstacle_type: i32) -> Option<(i32, i32)> {
    match obstacle_type {
        OBSTACLE_TYPE_FULL_HEIGHT => Some((0, 5)),
        OBSTACLE_TYPE_CROUCH => Some((2, 3)),
        _ => None,
    }
}

/// Accumulated lane rotation at `time` given rotation events as `(time, late, rotation)`, sorted by time.
///
/// Early events apply to objects on their own beat, late events only to objects after it.
#[must_use]
pub fn lane_rotation_at(events: &[(f64, bool, f64)], time: f64) -> f64 {
    events
        .iter()
        .take_while(|(at, _, _)| *at <= time)
        .filter(|(at, late, _)| !late || *at < time)
        .map(|(_, _, rotation)| rotation)
        .sum()
}
