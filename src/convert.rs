//! Part: Convert a [`Difficulty`] between schema major versions.
//!
//! Conversion walks through adjacent major versions (`1 ↔ 2 ↔ 3 ↔ 4`), building a fresh [`Difficulty`] at each step, so any supported pair converts and the source is never touched. Data the target cannot express is dropped or approximated and reported as a [`ConvertWarning`]; the only hard failure inside a step is an environment enhancement that has neither a lookup id nor a geometry ([`ConvertError::UnrepresentableEnvironment`]).
//!
//! ```
//! use beatmap_rs::prelude::*;
//!
//! let mut source = Difficulty::new("2.6.0");
//! source.color_notes.push(ColorNote {
//!     time: 1.0,
//!     ..ColorNote::default()
//! });
//! let output = source
//!     .convert(TargetVersion::V3, ConvertOptions::default())
//!     .unwrap();
//! assert_eq!(output.difficulty.version, "3.2.0");
//! assert!(output.warnings.is_empty());
//! ```

mod custom_data;
mod custom_event;
mod environment;
mod v1_v2;
mod v2_v3;
mod v3_v4;

use std::fmt;

use thiserror::Error;

use crate::beatmap::{Difficulty, ObjectKind, ObjectRef};

const LOG_TARGET: &str = "beatmap_rs::convert";

/// How the converter reacts to input it cannot handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversionMode {
    /// Fails with a [`ConvertError`].
    #[default]
    Strict,
    /// Passes the offending data through unchanged and reports a [`ConvertWarning`].
    Lenient,
}

/// Options of [`Difficulty::convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConvertOptions {
    /// Reaction to unsupported versions and unrepresentable environment entries.
    pub mode: ConversionMode,
    /// Whether a downgrade was already confirmed by the caller. Only changes what is logged.
    pub skip_confirmation: bool,
}

impl ConvertOptions {
    /// Strict mode, downgrades not confirmed.
    pub const STRICT: Self = Self {
        mode: ConversionMode::Strict,
        skip_confirmation: false,
    };
    /// Lenient mode, downgrades not confirmed.
    pub const LENIENT: Self = Self {
        mode: ConversionMode::Lenient,
        skip_confirmation: false,
    };

    /// Sets the mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: ConversionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether the downgrade confirmation is skipped.
    #[must_use]
    pub const fn with_skip_confirmation(mut self, skip_confirmation: bool) -> Self {
        self.skip_confirmation = skip_confirmation;
        self
    }
}

/// Target schema of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetVersion {
    /// `1.5.0`.
    V1,
    /// `2.6.0`.
    V2,
    /// `3.2.0`.
    V3,
    /// `4.0.0`.
    V4,
}

impl TargetVersion {
    /// Major version number.
    #[must_use]
    pub const fn major(self) -> u32 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
        }
    }

    /// Version string written into converted difficulties.
    #[must_use]
    pub const fn version_string(self) -> &'static str {
        match self {
            Self::V1 => crate::schema::v1::VERSION,
            Self::V2 => crate::schema::v2::VERSION,
            Self::V3 => crate::schema::v3::VERSION,
            Self::V4 => crate::schema::v4::VERSION,
        }
    }

    /// Target of the major version `major`, if supported.
    #[must_use]
    pub const fn from_major(major: u32) -> Option<Self> {
        match major {
            1 => Some(Self::V1),
            2 => Some(Self::V2),
            3 => Some(Self::V3),
            4 => Some(Self::V4),
            _ => None,
        }
    }
}

impl fmt::Display for TargetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.version_string())
    }
}

/// Errors that abort a conversion. No partial output is returned.
#[derive(Debug, Clone, Error, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConvertError {
    /// The source major version is not 1, 2, 3 or 4.
    #[error("unsupported source version `{version}`")]
    UnsupportedVersion {
        /// The source version string.
        version: String,
    },
    /// An environment enhancement has neither `id` with `lookupMethod` nor `geometry`.
    #[error("environment entry #{index} has neither a lookup id nor a geometry")]
    UnrepresentableEnvironment {
        /// Index in the environment list.
        index: usize,
    },
}

/// Lossy steps taken during a conversion.
#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum ConvertWarning {
    /// The source version is unsupported and the difficulty was returned unchanged.
    #[error("unsupported source version `{version}`, difficulty left unchanged")]
    UnsupportedVersion {
        /// The source version string.
        version: String,
    },
    /// Objects of a kind the target cannot hold were dropped.
    #[error("dropped {count} {kind}(s), not supported by {target}")]
    ObjectsDropped {
        /// Kind of the dropped objects.
        kind: ObjectKind,
        /// How many were dropped.
        count: usize,
        /// Target version string.
        target: &'static str,
    },
    /// Custom data of objects was dropped because the target has none.
    #[error("dropped custom data of {count} {kind}(s)")]
    CustomDataDropped {
        /// Kind of the objects.
        kind: ObjectKind,
        /// How many objects lost custom data.
        count: usize,
    },
    /// A field the target cannot express was dropped.
    #[error("dropped `{field}` of {count} {kind}(s)")]
    FieldDropped {
        /// Kind of the objects.
        kind: ObjectKind,
        /// Name of the dropped field.
        field: &'static str,
        /// How many objects had a meaningful value.
        count: usize,
    },
    /// Root timing fields of `1.5.0` were dropped; later versions keep them in the info file.
    #[error("dropped root timing fields of 1.5.0")]
    LegacyInfoDropped,
    /// A freely placed wall was approximated by a full height or crouch wall.
    #[error("{object} approximated by a legacy wall type (crouch: {crouch})")]
    ObstacleApproximated {
        /// The wall.
        object: ObjectRef,
        /// Whether it became a crouch wall.
        crouch: bool,
    },
    /// A lane rotation was rounded to the nearest legacy rotation step.
    #[error("{object} rotation of {rotation} degrees written as {written} degrees")]
    RotationApproximated {
        /// The rotation event.
        object: ObjectRef,
        /// The source rotation.
        rotation: f64,
        /// The rotation the written legacy value stands for.
        written: f64,
    },
    /// Accumulated lane rotations with a fractional part were rounded to whole degrees.
    #[error("rounded the lane rotation of {count} {kind}(s) to whole degrees")]
    LaneRotationRounded {
        /// Kind of the objects.
        kind: ObjectKind,
        /// How many objects were rounded.
        count: usize,
    },
    /// A legacy lane rotation value has no meaning and the event was dropped.
    #[error("{object} has unrepresentable lane rotation value {value}, dropped")]
    RotationUnrepresentable {
        /// The event.
        object: ObjectRef,
        /// The legacy value.
        value: i32,
    },
    /// A repeating custom event was expanded into discrete events. This cannot be undone.
    #[error("{object} repeat expanded into {count} events")]
    RepeatExpanded {
        /// The custom event.
        object: ObjectRef,
        /// Number of emitted events.
        count: usize,
    },
    /// A track animation asked for more repeats than are expanded.
    #[error("{object} repeat of {requested} clamped to {limit}")]
    RepeatClamped {
        /// The custom event.
        object: ObjectRef,
        /// Requested number of repeats.
        requested: f64,
        /// Number of repeats expanded instead.
        limit: u32,
    },
    /// A geometry environment entry had a light type, which `2.x` cannot assign.
    #[error("{object} light type cannot be assigned to geometry in 2.x")]
    EnvironmentLightType {
        /// The environment entry.
        object: ObjectRef,
    },
    /// An environment entry had neither lookup id nor geometry and was passed through unchanged.
    #[error("{object} has neither a lookup id nor a geometry, passed through unchanged")]
    UnrepresentableEnvironment {
        /// The environment entry.
        object: ObjectRef,
    },
    /// An environment track animation refers to a point definition by name, whose points were not rescaled.
    #[error("{object} animates an environment track through a point definition, position not rescaled")]
    PointDefinitionReference {
        /// The custom event.
        object: ObjectRef,
    },
    /// A track animation covers environment and gameplay tracks at once and was not rescaled.
    #[error("{object} mixes environment and other tracks, position not rescaled")]
    PartialEnvironmentTrack {
        /// The custom event.
        object: ObjectRef,
    },
    /// A custom event type without a known mapping was passed through unchanged.
    #[error("{object} has unknown type `{event_type}`, passed through unchanged")]
    UnknownCustomEvent {
        /// The custom event.
        object: ObjectRef,
        /// Its type.
        event_type: String,
    },
    /// A custom event the target cannot express was dropped.
    #[error("{object} of type `{event_type}` dropped, not supported by the target")]
    CustomEventDropped {
        /// The custom event.
        object: ObjectRef,
        /// Its type.
        event_type: String,
    },
    /// Light color events with an easing the `3.x` transition code cannot express were approximated.
    #[error("approximated the transition of {count} light color event(s)")]
    LightTransitionApproximated {
        /// The first affected group.
        object: ObjectRef,
        /// How many events were approximated.
        count: usize,
    },
    /// Objects use extension values that an unmodded `1.5.0` game cannot play.
    #[error("{count} {kind}(s) are not vanilla and will not play as written in 1.5.0")]
    NonVanillaObjects {
        /// Kind of the objects.
        kind: ObjectKind,
        /// How many.
        count: usize,
    },
    /// A custom data entry did not have the expected shape and was dropped.
    #[error("malformed `{key}` entry in custom data dropped")]
    MalformedCustomData {
        /// The custom data key.
        key: &'static str,
        /// The entry, when it is an indexed object.
        object: Option<ObjectRef>,
    },
}

impl ConvertWarning {
    /// Stable machine-readable code of the warning.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion { .. } => "unsupported-version",
            Self::ObjectsDropped { .. } => "objects-dropped",
            Self::CustomDataDropped { .. } => "custom-data-dropped",
            Self::FieldDropped { .. } => "field-dropped",
            Self::LegacyInfoDropped => "legacy-info-dropped",
            Self::ObstacleApproximated { .. } => "obstacle-approximated",
            Self::RotationApproximated { .. } => "rotation-approximated",
            Self::LaneRotationRounded { .. } => "lane-rotation-rounded",
            Self::RotationUnrepresentable { .. } => "rotation-unrepresentable",
            Self::RepeatExpanded { .. } => "repeat-expanded",
            Self::RepeatClamped { .. } => "repeat-clamped",
            Self::EnvironmentLightType { .. } => "environment-light-type",
            Self::UnrepresentableEnvironment { .. } => "unrepresentable-environment",
            Self::PointDefinitionReference { .. } => "point-definition-reference",
            Self::PartialEnvironmentTrack { .. } => "partial-environment-track",
            Self::UnknownCustomEvent { .. } => "unknown-custom-event",
            Self::CustomEventDropped { .. } => "custom-event-dropped",
            Self::LightTransitionApproximated { .. } => "light-transition-approximated",
            Self::NonVanillaObjects { .. } => "non-vanilla-objects",
            Self::MalformedCustomData { .. } => "malformed-custom-data",
        }
    }

    /// The object the warning is about, if it concerns a single one.
    #[must_use]
    pub const fn object_ref(&self) -> Option<ObjectRef> {
        match self {
            Self::ObstacleApproximated { object, .. }
            | Self::RotationApproximated { object, .. }
            | Self::RotationUnrepresentable { object, .. }
            | Self::RepeatExpanded { object, .. }
            | Self::RepeatClamped { object, .. }
            | Self::EnvironmentLightType { object }
            | Self::UnrepresentableEnvironment { object }
            | Self::PointDefinitionReference { object }
            | Self::PartialEnvironmentTrack { object }
            | Self::UnknownCustomEvent { object, .. }
            | Self::CustomEventDropped { object, .. }
            | Self::LightTransitionApproximated { object, .. } => Some(*object),
            Self::MalformedCustomData { object, .. } => *object,
            Self::UnsupportedVersion { .. }
            | Self::ObjectsDropped { .. }
            | Self::CustomDataDropped { .. }
            | Self::FieldDropped { .. }
            | Self::LaneRotationRounded { .. }
            | Self::LegacyInfoDropped
            | Self::NonVanillaObjects { .. } => None,
        }
    }
}

/// Output of [`Difficulty::convert`].
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ConvertOutput {
    /// The converted difficulty, with every collection sorted by time.
    pub difficulty: Difficulty,
    /// Lossy steps taken, in the order they happened.
    pub warnings: Vec<ConvertWarning>,
}

/// State shared by the steps of one conversion.
struct Context {
    mode: ConversionMode,
    warnings: Vec<ConvertWarning>,
}

impl Context {
    const fn new(mode: ConversionMode) -> Self {
        Self {
            mode,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: ConvertWarning) {
        log::warn!(target: LOG_TARGET, "[{}] {warning}", warning.code());
        self.warnings.push(warning);
    }

    /// Warns about `count` objects of `kind` dropped, if any.
    fn warn_dropped(&mut self, kind: ObjectKind, count: usize, target: TargetVersion) {
        if count > 0 {
            self.warn(ConvertWarning::ObjectsDropped {
                kind,
                count,
                target: target.version_string(),
            });
        }
    }

    /// Handles an environment entry that has neither lookup id nor geometry.
    ///
    /// Returns `Ok` in lenient mode, where the entry is to be passed through unchanged.
    fn unrepresentable_environment(&mut self, index: usize) -> Result<(), ConvertError> {
        match self.mode {
            ConversionMode::Strict => {
                let error = ConvertError::UnrepresentableEnvironment { index };
                log::error!(target: LOG_TARGET, "{error}");
                Err(error)
            }
            ConversionMode::Lenient => {
                self.warn(ConvertWarning::UnrepresentableEnvironment {
                    object: ObjectRef::untimed(ObjectKind::Environment, index),
                });
                Ok(())
            }
        }
    }
}

impl Difficulty {
    /// Converts this difficulty to the schema of `target`.
    ///
    /// The source is left untouched and the output shares nothing with it. A source already at the target major version is returned as a copy.
    ///
    /// # Errors
    ///
    /// In [`ConversionMode::Strict`] only: [`ConvertError::UnsupportedVersion`] if the source major version is not 1 to 4, and [`ConvertError::UnrepresentableEnvironment`] for an environment entry with neither lookup id nor geometry.
    pub fn convert(
        &self,
        target: TargetVersion,
        options: ConvertOptions,
    ) -> Result<ConvertOutput, ConvertError> {
        let mut ctx = Context::new(options.mode);
        let Some(source) = self.major_version().and_then(TargetVersion::from_major) else {
            return match options.mode {
                ConversionMode::Strict => {
                    let error = ConvertError::UnsupportedVersion {
                        version: self.version.clone(),
                    };
                    log::error!(target: LOG_TARGET, "{error}");
                    Err(error)
                }
                ConversionMode::Lenient => {
                    ctx.warn(ConvertWarning::UnsupportedVersion {
                        version: self.version.clone(),
                    });
                    Ok(ConvertOutput {
                        difficulty: self.clone(),
                        warnings: ctx.warnings,
                    })
                }
            };
        };

        if target < source {
            if options.skip_confirmation {
                log::info!(target: LOG_TARGET, "converting {} to {target}, some data may be lost", self.version);
            } else {
                log::warn!(target: LOG_TARGET, "converting {} to {target} may lose data", self.version);
            }
        } else {
            log::info!(target: LOG_TARGET, "converting {} to {target}", self.version);
        }

        let mut current = self.clone();
        let mut major = source;
        while major != target {
            let (next, converted) = if major < target {
                match major {
                    TargetVersion::V1 => (TargetVersion::V2, v1_v2::upgrade(&current, &mut ctx)),
                    TargetVersion::V2 => (TargetVersion::V3, v2_v3::upgrade(&current, &mut ctx)?),
                    TargetVersion::V3 | TargetVersion::V4 => {
                        (TargetVersion::V4, v3_v4::upgrade(&current, &mut ctx))
                    }
                }
            } else {
                match major {
                    TargetVersion::V4 => (TargetVersion::V3, v3_v4::downgrade(&current, &mut ctx)),
                    TargetVersion::V3 => (TargetVersion::V2, v2_v3::downgrade(&current, &mut ctx)?),
                    TargetVersion::V2 | TargetVersion::V1 => {
                        (TargetVersion::V1, v1_v2::downgrade(&current, &mut ctx))
                    }
                }
            };
            log::debug!(target: LOG_TARGET, "converted step {major} to {next}");
            current = converted;
            major = next;
        }
        current.sort();

        Ok(ConvertOutput {
            difficulty: current,
            warnings: ctx.warnings,
        })
    }
}
