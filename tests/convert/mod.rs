//! Tests for `beatmap_rs::convert`.

mod custom_events;
mod environment;
mod files;
mod modes;
mod rotation;
mod steps;
mod units;

use beatmap_rs::prelude::*;
use serde_json::Value;

/// Installs the test logger once, so that conversion logs show up in failing tests.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Converts `source` in strict mode, failing the test on error.
pub fn convert_strict(source: &Difficulty, target: TargetVersion) -> ConvertOutput {
    init_logger();
    match source.convert(target, ConvertOptions::STRICT) {
        Ok(output) => output,
        Err(e) => panic!("conversion to {target} failed: {e}"),
    }
}

/// Reads a JSON object literal as a custom data bag.
pub fn bag(value: Value) -> CustomData {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

/// Codes of `warnings`, in order.
pub fn codes(warnings: &[ConvertWarning]) -> Vec<&'static str> {
    warnings.iter().map(ConvertWarning::code).collect()
}
