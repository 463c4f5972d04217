//! Gameplay objects: notes, bombs, walls, arcs, chains and waypoints.
//!
//! Positional fields are plain integers. Vanilla values stay in the 4 x 3 grid (lane `0..=3`, row `0..=2`), but Mapping Extensions deliberately stores values far outside it, so nothing here clamps.

use serde_json::Value;

use super::{CustomData, Timed};
use crate::geometry::{
    mapping_extensions_position, mapping_extensions_width, precise_position_value,
};

/// Number of lanes of the vanilla grid.
pub const LANE_COUNT: i32 = 4;

/// Cut angle in degrees of each vanilla direction code `0..=8`.
pub const NOTE_CUT_ANGLE: [f64; 9] = [180.0, 0.0, 270.0, 90.0, 225.0, 135.0, 315.0, 45.0, 0.0];

/// Direction code of a note that can be cut in any direction.
pub const DIRECTION_ANY: i32 = 8;

const fn mirror_direction(direction: i32) -> i32 {
    match direction {
        2 => 3,
        3 => 2,
        4 => 5,
        5 => 4,
        6 => 7,
        7 => 6,
        other => other,
    }
}

const fn is_precise(value: i32) -> bool {
    value <= -1000 || value >= 1000
}

/// Mirrors a lane around the centre of the grid. Mapping Extensions precise lanes stay precise.
fn mirror_lane(lane: i32) -> i32 {
    if is_precise(lane) {
        precise_position_value(f64::from(LANE_COUNT - 1) - mapping_extensions_position(lane))
    } else {
        LANE_COUNT - 1 - lane
    }
}

/// Replaces the x component of a point `[x, y, ..]`.
fn mirror_point(point: &mut Value, mirror_x: impl Fn(f64) -> f64) {
    if let Some(x) = point.as_array_mut().and_then(|point| point.first_mut())
        && let Some(current) = x.as_f64()
    {
        *x = Value::from(mirror_x(current));
    }
}

/// Mirrors every keyframe of an animation path. Point definition names are left alone.
fn mirror_path(path: &mut Value, mirror_x: impl Fn(f64) -> f64 + Copy) {
    let keyframes = path
        .as_array()
        .is_some_and(|frames| frames.first().is_some_and(Value::is_array));
    if !keyframes {
        mirror_point(path, mirror_x);
        return;
    }
    if let Some(frames) = path.as_array_mut() {
        for frame in frames {
            mirror_point(frame, mirror_x);
        }
    }
}

/// Mirrors the Noodle Extensions placement keys of `custom_data` in either key style.
///
/// `mirror_x` maps the x coordinate of the object; offsets are negated.
fn mirror_custom_positions(custom_data: &mut CustomData, mirror_x: impl Fn(f64) -> f64 + Copy) {
    for key in ["coordinates", "_position"] {
        if let Some(point) = custom_data.get_mut(key) {
            mirror_point(point, mirror_x);
        }
    }
    for key in ["animation", "_animation"] {
        let Some(Value::Object(animation)) = custom_data.get_mut(key) else {
            continue;
        };
        for key in ["definitePosition", "_definitePosition"] {
            if let Some(path) = animation.get_mut(key) {
                mirror_path(path, mirror_x);
            }
        }
        for key in ["offsetPosition", "_position"] {
            if let Some(path) = animation.get_mut(key) {
                mirror_path(path, |x| -x);
            }
        }
    }
}

/// Noodle Extensions x coordinate of a mirrored note, `0` being the left middle lane.
fn mirror_note_x(x: f64) -> f64 {
    -1.0 - x
}

const fn swap_color(color: i32) -> i32 {
    (1 + color) % 2
}

/// A note to be cut with the saber of its color.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorNote {
    /// Beat of the note.
    pub time: f64,
    /// Lane index, `0` is the outer left.
    pub lane: i32,
    /// Row index, `0` is the bottom row.
    pub row: i32,
    /// `0` for red (left), `1` for blue (right).
    pub color: i32,
    /// Cut direction code. `0..=8` in vanilla, `1000..=1360` encodes a precise angle for Mapping Extensions.
    pub direction: i32,
    /// Counter-clockwise angle offset in degrees.
    pub angle_offset: i32,
    /// Lane rotation in degrees at the time of the note.
    pub lane_rotation: i32,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl ColorNote {
    /// Horizontally mirrors the note, optionally swapping its color.
    ///
    /// Noodle Extensions placement in the custom data is mirrored along with the lane.
    pub fn mirror(&mut self, flip_color: bool) {
        self.lane = mirror_lane(self.lane);
        if flip_color {
            self.color = swap_color(self.color);
        }
        self.angle_offset = -self.angle_offset;
        self.direction = mirror_direction(self.direction);
        mirror_custom_positions(&mut self.custom_data, mirror_note_x);
    }

    /// Cut angle in degrees including the angle offset.
    ///
    /// Mapping Extensions precise directions are decoded with [`crate::geometry::mapping_extensions_angle`].
    #[must_use]
    pub fn angle(&self) -> f64 {
        if (1000..=1360).contains(&self.direction) {
            return crate::geometry::mapping_extensions_angle(self.direction);
        }
        let base = usize::try_from(self.direction)
            .ok()
            .and_then(|index| NOTE_CUT_ANGLE.get(index))
            .copied()
            .unwrap_or(0.0);
        base + f64::from(self.angle_offset)
    }

    /// Position in grid units centered between the two middle lanes, decoding Mapping Extensions precision placement.
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        grid_position(self.lane, self.row)
    }
}

impl Timed for ColorNote {
    fn time(&self) -> f64 {
        self.time
    }
}

/// A bomb that must not be hit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BombNote {
    /// Beat of the bomb.
    pub time: f64,
    /// Lane index.
    pub lane: i32,
    /// Row index.
    pub row: i32,
    /// Lane rotation in degrees at the time of the bomb.
    pub lane_rotation: i32,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl BombNote {
    /// Horizontally mirrors the bomb.
    pub fn mirror(&mut self) {
        self.lane = mirror_lane(self.lane);
        mirror_custom_positions(&mut self.custom_data, mirror_note_x);
    }

    /// Position in grid units, see [`ColorNote::position`].
    #[must_use]
    pub fn position(&self) -> (f64, f64) {
        grid_position(self.lane, self.row)
    }
}

impl Timed for BombNote {
    fn time(&self) -> f64 {
        self.time
    }
}

/// A wall.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Beat at which the wall starts.
    pub time: f64,
    /// Leftmost lane covered.
    pub lane: i32,
    /// Bottom row of the wall.
    pub row: i32,
    /// Length in beats.
    pub duration: f64,
    /// Number of lanes covered.
    pub width: i32,
    /// Height in rows. Full height walls are `5`, crouch walls `3` starting at row `2`.
    pub height: i32,
    /// Lane rotation in degrees at the time of the wall.
    pub lane_rotation: i32,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Default for Obstacle {
    fn default() -> Self {
        Self {
            time: 0.0,
            lane: 0,
            row: 0,
            duration: 1.0,
            width: 1,
            height: 5,
            lane_rotation: 0,
            custom_data: CustomData::new(),
        }
    }
}

impl Obstacle {
    /// Horizontally mirrors the wall, keeping the lanes it covers contiguous.
    ///
    /// Mapping Extensions precise lanes and widths are decoded, mirrored and re-encoded as a precise lane. Noodle Extensions coordinates use the custom width (`size` or `_scale`) when one is set.
    pub fn mirror(&mut self) {
        let width = mapping_extensions_width(self.width);
        if is_precise(self.lane) || self.width >= 1000 {
            let left = mapping_extensions_position(self.lane);
            self.lane = precise_position_value(f64::from(LANE_COUNT) - left - width);
        } else {
            self.lane = LANE_COUNT - self.lane - self.width;
        }
        let custom_width = ["size", "_scale"]
            .iter()
            .find_map(|key| self.custom_data.get(*key)?.get(0)?.as_f64())
            .unwrap_or(width);
        mirror_custom_positions(&mut self.custom_data, |x| -x - custom_width);
    }

    /// Whether the wall forces the player to crouch.
    #[must_use]
    pub const fn is_crouch(&self) -> bool {
        self.row == 2 && self.height == 3 && (self.width > 2 || (self.width == 2 && self.lane == 1))
    }
}

impl Timed for Obstacle {
    fn time(&self) -> f64 {
        self.time
    }
}

/// An arc connecting two notes, called a slider in earlier schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    /// Beat of the head.
    pub time: f64,
    /// Saber color.
    pub color: i32,
    /// Head lane.
    pub lane: i32,
    /// Head row.
    pub row: i32,
    /// Head cut direction.
    pub direction: i32,
    /// Head control point length multiplier.
    pub length_multiplier: f64,
    /// Beat of the tail.
    pub tail_time: f64,
    /// Tail lane.
    pub tail_lane: i32,
    /// Tail row.
    pub tail_row: i32,
    /// Tail cut direction.
    pub tail_direction: i32,
    /// Tail control point length multiplier.
    pub tail_length_multiplier: f64,
    /// Mid anchor mode, `0` straight, `1` clockwise, `2` counter-clockwise.
    pub mid_anchor: i32,
    /// Lane rotation of the head.
    pub lane_rotation: i32,
    /// Lane rotation of the tail.
    pub tail_lane_rotation: i32,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Default for Arc {
    fn default() -> Self {
        Self {
            time: 0.0,
            color: 0,
            lane: 0,
            row: 0,
            direction: 0,
            length_multiplier: 1.0,
            tail_time: 0.0,
            tail_lane: 0,
            tail_row: 0,
            tail_direction: 0,
            tail_length_multiplier: 1.0,
            mid_anchor: 0,
            lane_rotation: 0,
            tail_lane_rotation: 0,
            custom_data: CustomData::new(),
        }
    }
}

impl Arc {
    /// Horizontally mirrors head and tail, optionally swapping the color.
    pub fn mirror(&mut self, flip_color: bool) {
        self.lane = mirror_lane(self.lane);
        self.tail_lane = mirror_lane(self.tail_lane);
        mirror_custom_positions(&mut self.custom_data, mirror_note_x);
        if let Some(point) = self.custom_data.get_mut("tailCoordinates") {
            mirror_point(point, mirror_note_x);
        }
        if flip_color {
            self.color = swap_color(self.color);
        }
        self.direction = mirror_direction(self.direction);
        self.tail_direction = mirror_direction(self.tail_direction);
        self.mid_anchor = match self.mid_anchor {
            1 => 2,
            2 => 1,
            other => other,
        };
    }

    /// Whether the tail comes before the head.
    #[must_use]
    pub fn is_inverse(&self) -> bool {
        self.tail_time < self.time
    }
}

impl Timed for Arc {
    fn time(&self) -> f64 {
        self.time
    }
}

/// A chain of slices following a head note, called a burst slider in `3.x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    /// Beat of the head.
    pub time: f64,
    /// Saber color.
    pub color: i32,
    /// Head lane.
    pub lane: i32,
    /// Head row.
    pub row: i32,
    /// Head cut direction.
    pub direction: i32,
    /// Beat of the tail.
    pub tail_time: f64,
    /// Tail lane.
    pub tail_lane: i32,
    /// Tail row.
    pub tail_row: i32,
    /// Number of segments including the head.
    pub slice_count: i32,
    /// Squish factor of the segments.
    pub squish: f64,
    /// Lane rotation of the head.
    pub lane_rotation: i32,
    /// Lane rotation of the tail.
    pub tail_lane_rotation: i32,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Default for Chain {
    fn default() -> Self {
        Self {
            time: 0.0,
            color: 0,
            lane: 0,
            row: 0,
            direction: 0,
            tail_time: 0.0,
            tail_lane: 0,
            tail_row: 0,
            slice_count: 3,
            squish: 1.0,
            lane_rotation: 0,
            tail_lane_rotation: 0,
            custom_data: CustomData::new(),
        }
    }
}

impl Chain {
    /// Horizontally mirrors head and tail, optionally swapping the color.
    pub fn mirror(&mut self, flip_color: bool) {
        self.lane = mirror_lane(self.lane);
        self.tail_lane = mirror_lane(self.tail_lane);
        mirror_custom_positions(&mut self.custom_data, mirror_note_x);
        if let Some(point) = self.custom_data.get_mut("tailCoordinates") {
            mirror_point(point, mirror_note_x);
        }
        if flip_color {
            self.color = swap_color(self.color);
        }
        self.direction = mirror_direction(self.direction);
    }

    /// Whether the tail comes before the head.
    #[must_use]
    pub fn is_inverse(&self) -> bool {
        self.tail_time < self.time
    }
}

impl Timed for Chain {
    fn time(&self) -> f64 {
        self.time
    }
}

/// A waypoint, steering the player's view on 360 degree maps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waypoint {
    /// Beat of the waypoint.
    pub time: f64,
    /// Lane index.
    pub lane: i32,
    /// Row index.
    pub row: i32,
    /// Offset direction code.
    pub direction: i32,
    /// Lane rotation at the time of the waypoint.
    pub lane_rotation: i32,
    /// Metadata bag.
    pub custom_data: CustomData,
}

impl Timed for Waypoint {
    fn time(&self) -> f64 {
        self.time
    }
}

fn grid_position(lane: i32, row: i32) -> (f64, f64) {
    (
        mapping_extensions_position(lane) - 2.0,
        mapping_extensions_position(row),
    )
}
