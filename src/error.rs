//! Error types raised by the export pipeline.
//!
//! Each stage raises its own typed error. Only the export orchestrator wraps
//! them, so callers see a single [`ExportError`] carrying the export kind and
//! the stage that failed first.

use crate::document::BlockId;
use crate::export::ExportKind;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The root entity an export cannot do without.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    Character,
    Characters,
    Story,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Character => write!(f, "character"),
            Entity::Characters => write!(f, "character roster"),
            Entity::Story => write!(f, "story"),
        }
    }
}

/// Raised by a content builder when the root entity of an export is absent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required {entity}")]
pub struct MissingRequiredDataError {
    pub entity: Entity,
}

impl MissingRequiredDataError {
    pub fn new(entity: Entity) -> Self {
        MissingRequiredDataError { entity }
    }
}

/// Raised when a required page-geometry value cannot be resolved.
///
/// Unknown cosmetic option ids never produce this error; they fall back to
/// their documented defaults instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleResolutionError {
    #[error("custom page size requires a positive page_width and page_height")]
    MissingCustomDimensions,

    #[error("margins leave no content area on a {width}x{height}pt page")]
    NoContentArea { width: f32, height: f32 },
}

/// Raised by a renderer back end.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("no pages to render")]
    NoPages,

    #[error("failed to encode document: {0}")]
    Encoding(String),
}

/// Raised when a metrics font cannot be loaded.
#[derive(Error, Debug)]
pub enum FontLoadError {
    #[error("failed to read font file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse font: {0}")]
    Parse(String),
}

/// Which axis a placed element overflowed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OverflowAxis {
    /// A single atomic piece is taller than the page content area.
    Vertical,
    /// A single word is wider than the line.
    Horizontal,
}

/// A non-fatal pagination problem.
///
/// The page is still produced; vertical overflow also sets
/// [`Page::overflowed`](crate::pagination::Page::overflowed).
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationOverflowWarning {
    /// 1-based ordinal of the affected page.
    pub page: usize,
    pub block: BlockId,
    pub axis: OverflowAxis,
    /// How far past the limit the element reaches, in points.
    pub excess: f32,
}

impl fmt::Display for PaginationOverflowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.axis {
            OverflowAxis::Vertical => "vertically",
            OverflowAxis::Horizontal => "horizontally",
        };
        write!(
            f,
            "block {} overflows page {} {} by {:.1}pt",
            self.block.0, self.page, axis, self.excess
        )
    }
}

/// The stage-level cause of a failed export.
#[derive(Error, Debug)]
pub enum ExportCause {
    #[error(transparent)]
    MissingRequiredData(#[from] MissingRequiredDataError),

    #[error(transparent)]
    StyleResolution(#[from] StyleResolutionError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The single error type presented to export callers.
#[derive(Error, Debug)]
#[error("failed to export {kind}: {cause}")]
pub struct ExportError {
    pub kind: ExportKind,
    #[source]
    pub cause: ExportCause,
}

impl ExportError {
    pub fn new(kind: ExportKind, cause: impl Into<ExportCause>) -> Self {
        ExportError {
            kind,
            cause: cause.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_describe_wrapped_errors() {
        let err = ExportError::new(
            ExportKind::StoryManuscript,
            MissingRequiredDataError::new(Entity::Story),
        );
        assert_eq!(
            err.to_string(),
            "failed to export story manuscript: missing required story"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn can_describe_overflow_warnings() {
        let warning = PaginationOverflowWarning {
            page: 3,
            block: BlockId(7),
            axis: OverflowAxis::Vertical,
            excess: 12.5,
        };
        assert_eq!(
            warning.to_string(),
            "block 7 overflows page 3 vertically by 12.5pt"
        );
    }
}
