//! Composes and paginates printable documents for an interactive
//! storytelling workspace: character profiles, character rosters, story
//! manuscripts and relationship networks.
//!
//! Data flows one way:
//!
//! ```text
//! domain snapshot -> content builder -> pagination -> renderer -> artifact
//! ```
//!
//! with the style resolver and a [`measure::MeasurementOracle`] consulted
//! during pagination. [`export::Exporter`] runs the whole pipeline.

pub mod content;
pub mod document;
pub mod domain;
pub mod error;
pub mod export;
pub mod measure;
pub mod pagination;
pub mod sinks;
pub mod style;

pub use error::ExportError;
pub use export::{Artifact, ExportKind, ExportRequest, Exporter};
