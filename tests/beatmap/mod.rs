//! Tests for `beatmap_rs::beatmap`, `beatmap_rs::dialect` and `beatmap_rs::validity`.

mod dialect;
mod model;
mod validity;

use beatmap_rs::prelude::*;
use serde_json::Value;

/// Reads a JSON object literal as a custom data bag.
pub fn bag(value: Value) -> CustomData {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}
