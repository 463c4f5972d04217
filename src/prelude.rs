//! Prelude module for the crate.
//!
//! You can use `use beatmap_rs::prelude::*;` to import the model, the loaders, the classifiers and the converter at once.

// Re-export the canonical model
pub use crate::beatmap::{
    CustomData, Difficulty, KeyStyle, LegacyInfo, ObjectKind, ObjectRef, Timed,
    parse_major_version,
};

// Re-export game objects
pub use crate::beatmap::{Arc, BombNote, Chain, ColorNote, Obstacle, Waypoint};

// Re-export events
pub use crate::beatmap::{
    BasicEvent, BpmEvent, ColorBoostEvent, EventCategory, ExecutionTime, KeywordEvents,
    RotationEvent,
};

// Re-export lightshow groups
pub use crate::beatmap::{
    IndexFilter, LightColorEvent, LightColorEventBox, LightColorEventBoxGroup, LightRotationEvent,
    LightRotationEventBox, LightRotationEventBoxGroup, LightTranslationEvent,
    LightTranslationEventBox, LightTranslationEventBoxGroup,
};

// Re-export wire formats and loading errors
pub use crate::schema::{LegacyNote, LoadError, SchemaContainer, WireDifficulty};

// Re-export classifiers
pub use crate::{
    dialect::{Dialect, DialectCheck, difficulty_dialects},
    validity::Validity,
};

// Re-export conversion types and warnings
pub use crate::convert::{
    ConversionMode, ConvertError, ConvertOptions, ConvertOutput, ConvertWarning, TargetVersion,
};
