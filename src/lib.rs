//! The model, wire formats and version converter of Beat Saber beatmap difficulties.
//!
//! This crate consists of four parts: the canonical model, the schema containers, the classifiers and the converter.
//!
//! `beatmap` module provides [`beatmap::Difficulty`], a version-independent representation of one difficulty that every supported schema (`1.5.0`, `2.6.0`, `3.x` and `4.0.0`) reads into and writes from.
//!
//! `schema` module provides the wire records of each version and the JSON loader and saver helpers. Loading and saving never touches the filesystem; callers pass strings or [`serde_json::Value`]s.
//!
//! `dialect` and `validity` modules classify objects by the community extensions they use (Chroma, Noodle Extensions and Mapping Extensions) and by whether an unmodded game plays them as written.
//!
//! `convert` module converts a difficulty between schema versions, reporting every lossy step as a warning.
//!
//! In detail, our policies are:
//!
//! - Never mutate the source of a conversion. Every converted object is a fresh allocation.
//! - Carry unknown custom data keys as they are.
//! - Do not validate while loading. Out-of-range values are extension data, not errors.
//! - Log through the [`log`] facade and leave installing a logger to the application.

pub mod beatmap;
pub mod convert;
pub mod dialect;
pub mod geometry;
pub mod prelude;
pub mod schema;
pub mod validity;
