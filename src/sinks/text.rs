//! Plain-text proofs.
//!
//! Writes the same pages the PDF sink would draw as monospaced text, which is
//! handy for checking where breaks fall without a PDF viewer. Pages are
//! separated by a form feed.

use super::{field_columns, Render};
use crate::document::{Block, Emphasis};
use crate::error::RenderError;
use crate::pagination::{Element, Page, TextLine};
use crate::style::{PageGeometry, StyleSheet};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextSink;

fn underline(lines: &[TextLine], c: char) -> String {
    let width = lines
        .iter()
        .map(|l| l.text.chars().count())
        .max()
        .unwrap_or(0);
    std::iter::repeat(c).take(width).collect()
}

fn render_element(out: &mut String, element: &Element) -> std::fmt::Result {
    match element {
        Element::Line(fragment) => writeln!(out, "{}", fragment.text),
        Element::Block { block, lines, .. } => match block {
            Block::Title { .. } => {
                for line in lines.iter() {
                    writeln!(out, "{}", line.text)?;
                }
                writeln!(out, "{}", underline(lines, '='))
            }
            Block::SectionHeader { .. } => {
                for line in lines.iter() {
                    writeln!(out, "{}", line.text)?;
                }
                writeln!(out, "{}", underline(lines, '-'))
            }
            Block::Field { label, .. } => {
                let indent = label.chars().count() + 2;
                let (_, value) = field_columns(lines);
                for (i, line) in value.iter().enumerate() {
                    if i == 0 {
                        writeln!(out, "{label}: {}", line.text)?;
                    } else {
                        writeln!(out, "{:indent$}{}", "", line.text)?;
                    }
                }
                Ok(())
            }
            Block::Card { .. } => {
                for line in lines.iter() {
                    match line.emphasis {
                        Emphasis::Strong => writeln!(out, "| **{}**", line.text)?,
                        Emphasis::Muted => writeln!(out, "| ({})", line.text)?,
                        Emphasis::Normal => writeln!(out, "| {}", line.text)?,
                    }
                }
                Ok(())
            }
            Block::Paragraph { .. } | Block::PageBreak => Ok(()),
        },
    }
}

fn render_page(out: &mut String, page: &Page) -> std::fmt::Result {
    writeln!(out, "{}", page.header_text)?;
    writeln!(out)?;
    for placed in page.content.iter() {
        render_element(out, &placed.element)?;
    }
    if page.overflowed {
        writeln!(out, "[content overflows this page]")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", page.footer_text)
}

impl Render for TextSink {
    fn render(
        &self,
        _title: &str,
        pages: &[Page],
        _style: &StyleSheet,
        _geometry: &PageGeometry,
    ) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();
        for (pi, page) in pages.iter().enumerate() {
            if pi > 0 {
                out.push('\u{c}');
            }
            render_page(&mut out, page).map_err(|e| RenderError::Encoding(e.to_string()))?;
        }
        log::debug!("rendered {} pages as text", pages.len());
        Ok(out.into_bytes())
    }
}
