use super::{field_columns, Render};
use crate::document::{Block, Emphasis};
use crate::error::RenderError;
use crate::measure::Font;
use crate::pagination::{Element, Page, Placed, TextLine};
use crate::style::{PageGeometry, Rgb, StyleSheet};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

pub mod fonts;

/// Share of the font size above the baseline.
const ASCENT: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct PdfSink {
    pub creator: String,
}

impl Default for PdfSink {
    fn default() -> Self {
        PdfSink {
            creator: format!("story-press {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Draws one page's content stream. Offsets in [`Placed`] run down from the
/// top edge; PDF space runs up from the bottom, so every y is flipped here.
struct Painter<'a> {
    style: &'a StyleSheet,
    geometry: &'a PageGeometry,
    content: Content,
}

impl<'a> Painter<'a> {
    fn new(style: &'a StyleSheet, geometry: &'a PageGeometry) -> Painter<'a> {
        Painter {
            style,
            geometry,
            content: Content::new(),
        }
    }

    fn y(&self, offset: f32) -> f32 {
        self.geometry.height - offset
    }

    fn fill(&mut self, color: Rgb) {
        let (r, g, b) = color.to_f32();
        self.content.set_fill_rgb(r, g, b);
    }

    fn stroke_color(&mut self, color: Rgb) {
        let (r, g, b) = color.to_f32();
        self.content.set_stroke_rgb(r, g, b);
    }

    /// Set one line of text whose line box starts at `top` and is `advance`
    /// tall.
    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        text: &str,
        font: Font,
        size: f32,
        color: Rgb,
        x: f32,
        top: f32,
        advance: f32,
    ) {
        if text.is_empty() {
            return;
        }
        let baseline = top + (advance - size) / 2.0 + size * ASCENT;
        self.fill(color);
        let y = self.y(baseline);
        self.content
            .begin_text()
            .set_font(fonts::resource_name(font), size)
            .next_line(x, y)
            .show(Str(&fonts::encode(text)))
            .end_text();
    }

    fn lines(
        &mut self,
        lines: &[TextLine],
        size: f32,
        x: f32,
        top: f32,
        height: f32,
        color_for: impl Fn(Emphasis) -> (Font, Rgb),
    ) {
        if lines.is_empty() {
            return;
        }
        let advance = height / lines.len() as f32;
        for (i, line) in lines.iter().enumerate() {
            let (font, color) = color_for(line.emphasis);
            self.text(&line.text, font, size, color, x, top + advance * i as f32, advance);
        }
    }

    fn background(&mut self) {
        if self.style.background_color == Rgb::WHITE {
            return;
        }
        self.fill(self.style.background_color);
        self.content
            .rect(0.0, 0.0, self.geometry.width, self.geometry.height)
            .fill_nonzero();
    }

    fn furniture(&mut self, page: &Page) {
        let size = (self.style.body_size * 0.75).round();
        let regular = Font::regular(self.style.font_family);
        let x = self.geometry.margin_left;
        let muted = self.style.muted_color;

        let header_top = (self.geometry.margin_top - size) / 2.0;
        self.text(&page.header_text, regular, size, muted, x, header_top, size);

        let footer_top = self.geometry.content_bottom() + (self.geometry.margin_bottom - size) / 2.0;
        self.text(&page.footer_text, regular, size, muted, x, footer_top, size);
    }

    fn placed(&mut self, placed: &Placed) {
        let style = self.style;
        let regular = Font::regular(style.font_family);
        let bold = Font::bold(style.font_family);
        let left = self.geometry.margin_left;
        let width = self.geometry.content_width();

        match &placed.element {
            Element::Line(fragment) => {
                self.text(
                    &fragment.text,
                    regular,
                    style.body_size,
                    style.text_color,
                    left,
                    placed.offset,
                    placed.height,
                );
            }
            Element::Block { block, lines, .. } => match block {
                Block::Title { .. } => {
                    self.lines(lines, style.title_size, left, placed.offset, placed.height, |_| {
                        (bold, style.primary_color)
                    });
                }
                Block::SectionHeader { .. } => {
                    let rule = if style.heading_rule {
                        style.body_size * 0.25
                    } else {
                        0.0
                    };
                    let text_height = placed.height - rule;
                    self.lines(lines, style.heading_size, left, placed.offset, text_height, |_| {
                        (bold, style.primary_color)
                    });
                    if style.heading_rule {
                        let y = self.y(placed.offset + text_height + rule / 2.0);
                        self.stroke_color(style.primary_color);
                        self.content
                            .set_line_width(0.75)
                            .move_to(left, y)
                            .line_to(left + width, y)
                            .stroke();
                    }
                }
                Block::Field { .. } => {
                    let (label, value) = field_columns(lines);
                    let advance = placed.height / label.len().max(value.len()).max(1) as f32;
                    let label_height = advance * label.len() as f32;
                    self.lines(label, style.body_size, left, placed.offset, label_height, |_| {
                        (bold, style.muted_color)
                    });
                    let value_x = left + width * style.field_label_ratio;
                    let value_height = advance * value.len() as f32;
                    self.lines(value, style.body_size, value_x, placed.offset, value_height, |_| {
                        (regular, style.text_color)
                    });
                }
                Block::Card { .. } => {
                    let bottom = self.y(placed.offset + placed.height);
                    match style.card_fill {
                        Some(fill) => {
                            self.fill(fill);
                            self.content
                                .rect(left, bottom, width, placed.height)
                                .fill_nonzero();
                        }
                        None => {
                            self.stroke_color(style.muted_color);
                            self.content
                                .set_line_width(0.5)
                                .rect(left, bottom, width, placed.height)
                                .stroke();
                        }
                    }
                    let padding = style.card_padding;
                    self.lines(
                        lines,
                        style.body_size,
                        left + padding,
                        placed.offset + padding,
                        placed.height - 2.0 * padding,
                        |emphasis| match emphasis {
                            Emphasis::Strong => (bold, style.text_color),
                            Emphasis::Normal => (regular, style.text_color),
                            Emphasis::Muted => (regular, style.muted_color),
                        },
                    );
                }
                Block::Paragraph { .. } | Block::PageBreak => {}
            },
        }
    }

    fn finish(self) -> Vec<u8> {
        self.content.finish()
    }
}

impl Render for PdfSink {
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

        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let tree_id = alloc();
        let info_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();
        let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().map(|(page, _)| *page))
            .count(pages.len() as i32);

        for (id, font) in [
            (regular_id, Font::regular(style.font_family)),
            (bold_id, Font::bold(style.font_family)),
        ] {
            pdf.type1_font(id)
                .base_font(Name(fonts::base_font(font)))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let media_box = Rect::new(0.0, 0.0, geometry.width, geometry.height);
        for (page, (page_id, content_id)) in pages.iter().zip(page_ids.iter()) {
            let mut painter = Painter::new(style, geometry);
            painter.background();
            painter.furniture(page);
            for placed in page.content.iter() {
                painter.placed(placed);
            }
            pdf.stream(*content_id, &painter.finish());

            let mut writer = pdf.page(*page_id);
            writer
                .media_box(media_box)
                .parent(tree_id)
                .contents(*content_id);
            writer
                .resources()
                .fonts()
                .pair(fonts::REGULAR, regular_id)
                .pair(fonts::BOLD, bold_id);
            writer.finish();
        }

        pdf.document_info(info_id)
            .title(TextStr(title))
            .creator(TextStr(&self.creator));

        let bytes = pdf.finish();
        log::debug!("rendered {} pages as pdf ({} bytes)", pages.len(), bytes.len());
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, Inline, Section};
    use crate::measure::TypewriterOracle;
    use crate::pagination::paginate;

    fn render(doc: &Document) -> Vec<u8> {
        let style = StyleSheet::default();
        let geometry = PageGeometry::new(595.28, 841.89, style.margins);
        let pagination = paginate(doc, &style, &geometry, &TypewriterOracle::standard_fonts());
        PdfSink::default()
            .render(&doc.title, &pagination.pages, &style, &geometry)
            .expect("can render pdf")
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle)
            .count()
    }

    #[test]
    fn can_render_pdf() {
        let mut doc = Document::new("The Salt Road");
        let mut section = Section::new("Chapter 1").with_label("1");
        section
            .push(Block::PageBreak)
            .push(Block::title("Chapter 1: Tides"))
            .push(Block::paragraph("The road shifted under her feet."))
            .push(Block::card(vec![Inline::strong("Mara Vell")]));
        doc.push_section(section);

        let bytes = render(&doc);
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(count(&bytes, b"/Type /Page") - count(&bytes, b"/Type /Pages"), 2);
        assert_eq!(count(&bytes, b"/Helvetica-Bold"), 1);
        assert!(count(&bytes, b"(The Salt Road)") >= 1);
    }

    #[test]
    fn long_field_labels_stay_in_their_column() {
        let label = vec!["Seraphine"; 12].join(" ");
        let mut doc = Document::new("Relationship Network");
        let mut section = Section::new("Characters");
        section.push(Block::field(label.clone(), "Protagonist"));
        doc.push_section(section);

        let bytes = render(&doc);
        assert_eq!(count(&bytes, format!("({label})").as_bytes()), 0);
        assert!(count(&bytes, b"(Seraphine") >= 2);
        assert_eq!(count(&bytes, b"(Protagonist)"), 1);
    }

    #[test]
    fn rendering_no_pages_is_an_error() {
        let result = PdfSink::default().render(
            "Nothing",
            &[],
            &StyleSheet::default(),
            &PageGeometry::new(100.0, 100.0, crate::style::Margins::all(10.0)),
        );
        assert!(matches!(result, Err(RenderError::NoPages)));
    }
}
