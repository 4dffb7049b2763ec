use crate::error::RenderError;
use crate::document::Emphasis;
use crate::pagination::{Page, TextLine};
use crate::style::{PageGeometry, StyleSheet};
use serde::{Deserialize, Serialize};

mod text;
pub use text::*;

mod pdf;
pub use pdf::*;

/// The artifact formats a [`Sink`] can produce.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Pdf,
    Text,
}

#[derive(Debug, Clone)]
pub enum Sink {
    Pdf(PdfSink),
    Text(TextSink),
}

impl Sink {
    /// File extension (without the dot) of the artifacts this sink writes.
    pub fn extension(&self) -> &'static str {
        match self {
            Sink::Pdf(_) => "pdf",
            Sink::Text(_) => "txt",
        }
    }
}

impl From<Format> for Sink {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => Sink::Pdf(PdfSink::default()),
            Format::Text => Sink::Text(TextSink),
        }
    }
}

/// Split a field's lines into its label column and its value column.
pub(crate) fn field_columns(lines: &[TextLine]) -> (&[TextLine], &[TextLine]) {
    let split = lines
        .iter()
        .position(|line| line.emphasis != Emphasis::Strong)
        .unwrap_or(lines.len());
    lines.split_at(split)
}

pub trait Render {
    /// Encode laid-out pages. Renderers never touch the filesystem.
    fn render(
        &self,
        title: &str,
        pages: &[Page],
        style: &StyleSheet,
        geometry: &PageGeometry,
    ) -> Result<Vec<u8>, RenderError>;
}

impl Render for Sink {
    fn render(
        &self,
        title: &str,
        pages: &[Page],
        style: &StyleSheet,
        geometry: &PageGeometry,
    ) -> Result<Vec<u8>, RenderError> {
        if pages.is_empty() {
            return Err(RenderError::NoPages);
        }
        match self {
            Sink::Pdf(p) => p.render(title, pages, style, geometry),
            Sink::Text(t) => t.render(title, pages, style, geometry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, emphasis: Emphasis) -> TextLine {
        TextLine {
            text: text.to_string(),
            emphasis,
        }
    }

    #[test]
    fn can_split_field_columns() {
        let lines = vec![
            line("Mara of", Emphasis::Strong),
            line("the Vale", Emphasis::Strong),
            line("Protagonist", Emphasis::Normal),
        ];
        let (label, value) = field_columns(&lines);
        assert_eq!(label, &lines[..2]);
        assert_eq!(value, &lines[2..]);

        let (label, value) = field_columns(&lines[2..]);
        assert!(label.is_empty());
        assert_eq!(value.len(), 1);
    }
}
