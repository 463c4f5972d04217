//! Wire formats of every schema version and their mapping to the canonical model.
//!
//! Each wire record type implements [`SchemaContainer`], a serialize/deserialize pair between the record and its canonical attributes. The records derive serde with the exact field names of their version and a container-level `#[serde(default)]`, so a missing field takes the value of the record's template ([`SchemaContainer::default_value`]).
//!
//! Containers never validate. Structurally odd input (a lane of 1500, a negative duration) is carried unchanged; [`crate::validity`] and [`crate::dialect`] decide what it means.
//!
//! # Round trip
//!
//! `deserialize(serialize(x)) == x` holds for every canonical value `x` that only uses fields the version can express. Fields a version cannot express are dropped when serializing and take their default when deserializing.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::beatmap::{BombNote, ColorNote, Difficulty, parse_major_version};

pub mod v1;
pub mod v2;
pub mod v3;
pub mod v4;

/// Bidirectional mapping between a version-specific wire record and its canonical attributes.
pub trait SchemaContainer: Default {
    /// The version-independent attributes this record maps to.
    type Canonical;

    /// Builds the wire record of `data`. Never fails: canonical fields with no wire representation are dropped.
    fn serialize(data: &Self::Canonical) -> Self;

    /// Reads the canonical attributes of this record.
    fn deserialize(&self) -> Self::Canonical;

    /// The template used for absent fields.
    #[must_use]
    fn default_value() -> Self {
        Self::default()
    }
}

/// A note of `1.5.0` or `2.x`, where bombs are notes of type `3`.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyNote {
    /// A color note.
    Color(ColorNote),
    /// A bomb.
    Bomb(BombNote),
}

/// Note type of a bomb in `1.5.0` and `2.x`.
pub const LEGACY_BOMB_TYPE: i32 = 3;

/// Errors on reading or writing a wire document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A field has the wrong type.
    #[error("invalid field `{path}`: {source}")]
    Field {
        /// JSON path to the field, such as `colorNotes[3].x`.
        path: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The document root is not an object.
    #[error("difficulty document must be a JSON object")]
    NotAnObject,
    /// The major version is not 1, 2, 3 or 4.
    #[error("unsupported beatmap version `{0}`")]
    UnsupportedVersion(String),
}

/// A difficulty in one of the wire formats.
#[derive(Debug, Clone, PartialEq)]
pub enum WireDifficulty {
    /// `1.5.0`.
    V1(v1::Difficulty),
    /// `2.x`.
    V2(v2::Difficulty),
    /// `3.x`.
    V3(v3::Difficulty),
    /// `4.x`, made of a beatmap file and a lightshow file.
    V4(v4::DifficultyFiles),
}

impl WireDifficulty {
    /// Parses a difficulty document, detecting its version.
    ///
    /// The version is read from `_version`, then `version`. Documents with neither are read as `2.x`, like the game does. A `4.x` document read this way has an empty lightshow; use [`Self::from_json_v4`] to read both files.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] on malformed JSON, mistyped fields or an unsupported version.
    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        Self::from_value(serde_json::from_str(source)?)
    }

    /// Like [`Self::from_json`], from an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] on mistyped fields or an unsupported version.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Some(object) = value.as_object() else {
            return Err(LoadError::NotAnObject);
        };
        let version = ["_version", "version"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_str))
            .map(str::to_owned);
        let major = match &version {
            Some(version) => parse_major_version(version)
                .ok_or_else(|| LoadError::UnsupportedVersion(version.clone()))?,
            None => 2,
        };
        log::debug!(target: "beatmap_rs::schema", "reading difficulty as major version {major}");
        Ok(match major {
            1 => Self::V1(from_value_with_path(value)?),
            2 => Self::V2(from_value_with_path(value)?),
            3 => Self::V3(from_value_with_path(value)?),
            4 => Self::V4(v4::DifficultyFiles {
                difficulty: from_value_with_path(value)?,
                lightshow: v4::Lightshow::default(),
            }),
            _ => {
                return Err(LoadError::UnsupportedVersion(
                    version.unwrap_or_default(),
                ));
            }
        })
    }

    /// Parses the beatmap and lightshow files of a `4.x` difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] on malformed JSON or mistyped fields.
    pub fn from_json_v4(beatmap: &str, lightshow: &str) -> Result<Self, LoadError> {
        Ok(Self::V4(v4::DifficultyFiles {
            difficulty: from_value_with_path(serde_json::from_str(beatmap)?)?,
            lightshow: from_value_with_path(serde_json::from_str(lightshow)?)?,
        }))
    }

    /// Version string of the document.
    #[must_use]
    pub fn version(&self) -> &str {
        match self {
            Self::V1(data) => &data.version,
            Self::V2(data) => &data.version,
            Self::V3(data) => &data.version,
            Self::V4(data) => &data.difficulty.version,
        }
    }

    /// The difficulty document, which is the beatmap file for `4.x`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if a value cannot be represented in JSON, such as a NaN time.
    pub fn to_value(&self) -> Result<Value, LoadError> {
        Ok(match self {
            Self::V1(data) => serde_json::to_value(data)?,
            Self::V2(data) => serde_json::to_value(data)?,
            Self::V3(data) => serde_json::to_value(data)?,
            Self::V4(data) => serde_json::to_value(&data.difficulty)?,
        })
    }

    /// The lightshow document of a `4.x` difficulty, `None` for older versions.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if a value cannot be represented in JSON.
    pub fn lightshow_value(&self) -> Result<Option<Value>, LoadError> {
        match self {
            Self::V4(data) => Ok(Some(serde_json::to_value(&data.lightshow)?)),
            _ => Ok(None),
        }
    }
}

fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, LoadError> {
    serde_path_to_error::deserialize(value).map_err(|err| LoadError::Field {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

impl Difficulty {
    /// Reads the canonical model of a wire document. Every collection comes out sorted by time.
    #[must_use]
    pub fn from_wire(wire: &WireDifficulty) -> Self {
        let mut difficulty = match wire {
            WireDifficulty::V1(data) => data.deserialize(),
            WireDifficulty::V2(data) => data.deserialize(),
            WireDifficulty::V3(data) => data.deserialize(),
            WireDifficulty::V4(data) => data.deserialize(),
        };
        difficulty.sort();
        difficulty
    }

    /// Builds the wire document of the version named by [`Self::version`]. Collections are written sorted by time.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedVersion`] if the major version is not 1, 2, 3 or 4.
    pub fn to_wire(&self) -> Result<WireDifficulty, LoadError> {
        let mut sorted = self.clone();
        sorted.sort();
        Ok(match self.major_version() {
            Some(1) => WireDifficulty::V1(v1::Difficulty::serialize(&sorted)),
            Some(2) => WireDifficulty::V2(v2::Difficulty::serialize(&sorted)),
            Some(3) => WireDifficulty::V3(v3::Difficulty::serialize(&sorted)),
            Some(4) => WireDifficulty::V4(v4::DifficultyFiles::serialize(&sorted)),
            _ => return Err(LoadError::UnsupportedVersion(self.version.clone())),
        })
    }

    /// Parses a difficulty document into the canonical model.
    ///
    /// # Errors
    ///
    /// See [`WireDifficulty::from_json`].
    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        WireDifficulty::from_json(source).map(|wire| Self::from_wire(&wire))
    }

    /// Writes the difficulty document of this difficulty's version.
    ///
    /// # Errors
    ///
    /// See [`Self::to_wire`] and [`WireDifficulty::to_value`].
    pub fn to_json_value(&self) -> Result<Value, LoadError> {
        self.to_wire()?.to_value()
    }
}
