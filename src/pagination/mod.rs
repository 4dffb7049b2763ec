//! The pagination engine.
//!
//! Walks the blocks of a [`Document`] in order and packs them onto pages of a
//! fixed [`PageGeometry`]:
//!
//! - a page break closes the current page;
//! - atomic blocks (titles, headers, fields, cards) are measured and either
//!   fit in the space left on the page or move whole to a new page;
//! - section headers are held back until their first piece of content is
//!   known, and the two are placed together ("keep-with-next");
//! - paragraphs are wrapped into lines, and each line is placed like a small
//!   atomic block, so a paragraph may break between any two lines.
//!
//! A piece too tall for even an empty page is placed anyway. Its page is
//! flagged as overflowed and a [`PaginationOverflowWarning`] is reported; the
//! engine itself never fails.
//!
//! Pagination is a pure function of its inputs: the same document, style,
//! geometry and oracle always give the same pages.

pub mod furniture;
pub mod wrap;

use crate::document::{Block, BlockId, Document, Emphasis};
use crate::error::{OverflowAxis, PaginationOverflowWarning};
use crate::measure::{Font, MeasurementOracle};
use crate::style::{PageGeometry, StyleSheet};
use wrap::{wrap, wrap_or_blank, Wrapped, EPSILON};

/// One physical line of a paragraph.
#[derive(Clone, Debug, PartialEq)]
pub struct LineFragment {
    pub text: String,
    pub source: BlockId,
}

/// A pre-wrapped line of an atomic block.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub emphasis: Emphasis,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// An atomic block with the lines it was set in. For fields, the strong
    /// lines are the label wrapped into its column, followed by the value.
    Block {
        id: BlockId,
        block: Block,
        lines: Vec<TextLine>,
    },
    Line(LineFragment),
}

impl Element {
    pub fn block_id(&self) -> BlockId {
        match self {
            Element::Block { id, .. } => *id,
            Element::Line(fragment) => fragment.source,
        }
    }
}

/// An element at its position on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct Placed {
    pub element: Element,
    /// Distance from the top edge of the page to the top of the element.
    pub offset: f32,
    pub height: f32,
}

impl Placed {
    pub fn bottom(&self) -> f32 {
        self.offset + self.height
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// 1-based position in the document.
    pub ordinal: usize,
    pub content: Vec<Placed>,
    pub header_text: String,
    pub footer_text: String,
    /// Set when a single piece is taller than the page's content area.
    pub overflowed: bool,
    /// Running label of the section the page starts in.
    pub label: Option<String>,
}

impl Page {
    pub fn new(ordinal: usize, label: Option<String>) -> Page {
        Page {
            ordinal,
            content: Vec::new(),
            header_text: String::new(),
            footer_text: String::new(),
            overflowed: false,
            label,
        }
    }

    /// The deepest offset reached by the page's content.
    pub fn cursor(&self) -> f32 {
        self.content.last().map(Placed::bottom).unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pagination {
    pub pages: Vec<Page>,
    pub warnings: Vec<PaginationOverflowWarning>,
}

/// A measured element waiting to be placed.
struct Piece {
    element: Element,
    height: f32,
    /// Space above the piece unless it opens a page.
    gap: f32,
    section: Option<usize>,
    /// Horizontal overflow of the piece's widest line.
    overflow: Option<f32>,
}

/// Heights and line breaks for each kind of block.
struct Measurer<'a, O: ?Sized> {
    oracle: &'a O,
    style: &'a StyleSheet,
    width: f32,
}

impl<O: MeasurementOracle + ?Sized> Measurer<'_, O> {
    fn advance(&self, text: &str, font: Font, size: f32) -> f32 {
        self.oracle.measure(text, font, size).height * self.style.line_spacing
    }

    fn set_lines(
        &self,
        wrapped: &Wrapped,
        font: Font,
        size: f32,
        emphasis: Emphasis,
        lines: &mut Vec<TextLine>,
    ) -> f32 {
        let mut height = 0.0;
        for line in wrapped.lines.iter() {
            height += self.advance(line, font, size);
            lines.push(TextLine {
                text: line.clone(),
                emphasis,
            });
        }
        height
    }

    fn atomic(&self, id: BlockId, block: Block, section: Option<usize>) -> Piece {
        let family = self.style.font_family;
        let regular = Font::regular(family);
        let bold = Font::bold(family);
        let body = self.style.body_size;
        let mut lines: Vec<TextLine> = Vec::new();

        let (height, overflow) = match &block {
            Block::Title { text } => {
                let size = self.style.title_size;
                let wrapped = wrap_or_blank(self.oracle, text, bold, size, self.width);
                let height = self.set_lines(&wrapped, bold, size, Emphasis::Strong, &mut lines);
                (height, wrapped.overflow)
            }
            Block::SectionHeader { text } => {
                let size = self.style.heading_size;
                let wrapped = wrap_or_blank(self.oracle, text, bold, size, self.width);
                let mut height =
                    self.set_lines(&wrapped, bold, size, Emphasis::Strong, &mut lines);
                if self.style.heading_rule {
                    height += body * 0.25;
                }
                (height, wrapped.overflow)
            }
            Block::Field { label, value } => {
                let label_width = self.width * self.style.field_label_ratio;
                let value_width = self.width - label_width;
                let label = wrap_or_blank(self.oracle, label, bold, body, label_width);
                let value = wrap_or_blank(self.oracle, value, regular, body, value_width);
                let label_height =
                    self.set_lines(&label, bold, body, Emphasis::Strong, &mut lines);
                let value_height =
                    self.set_lines(&value, regular, body, Emphasis::Normal, &mut lines);
                (
                    label_height.max(value_height),
                    widest(label.overflow, value.overflow),
                )
            }
            Block::Card { lines: inlines } => {
                let inner = self.width - 2.0 * self.style.card_padding;
                let mut height = 2.0 * self.style.card_padding;
                let mut overflow: Option<f32> = None;
                for inline in inlines.iter() {
                    let font = match inline.emphasis {
                        Emphasis::Strong => bold,
                        _ => regular,
                    };
                    let wrapped = wrap_or_blank(self.oracle, &inline.text, font, body, inner);
                    height += self.set_lines(&wrapped, font, body, inline.emphasis, &mut lines);
                    overflow = widest(overflow, wrapped.overflow);
                }
                (height, overflow)
            }
            Block::Paragraph { .. } | Block::PageBreak => {
                unreachable!("only atomic blocks are measured whole")
            }
        };

        Piece {
            element: Element::Block { id, block, lines },
            height,
            gap: self.style.paragraph_spacing,
            section,
            overflow,
        }
    }

    fn paragraph(&self, id: BlockId, text: &str, section: Option<usize>) -> Vec<Piece> {
        let font = Font::regular(self.style.font_family);
        let size = self.style.body_size;
        let wrapped = wrap(self.oracle, text, font, size, self.width);

        wrapped
            .lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let excess = self.oracle.measure(&line, font, size).width - self.width;
                Piece {
                    height: self.advance(&line, font, size),
                    gap: if i == 0 {
                        self.style.paragraph_spacing
                    } else {
                        0.0
                    },
                    section,
                    overflow: (excess > EPSILON).then_some(excess),
                    element: Element::Line(LineFragment {
                        text: line,
                        source: id,
                    }),
                }
            })
            .collect()
    }
}

fn widest(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

/// Page-filling state.
struct Layout<'a> {
    geometry: &'a PageGeometry,
    document: &'a Document,
    pages: Vec<Page>,
    current: Page,
    /// Height used on the current page, from the top margin.
    used: f32,
    /// Headers waiting for their first piece of content.
    pending: Vec<Piece>,
    warnings: Vec<PaginationOverflowWarning>,
}

impl<'a> Layout<'a> {
    fn new(geometry: &'a PageGeometry, document: &'a Document) -> Layout<'a> {
        Layout {
            geometry,
            document,
            pages: Vec::new(),
            current: Page::new(1, None),
            used: 0.0,
            pending: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn ordinal(&self) -> usize {
        self.pages.len() + 1
    }

    fn close_page(&mut self) {
        if self.current.content.is_empty() {
            return;
        }
        let next = Page::new(self.ordinal() + 1, None);
        let page = std::mem::replace(&mut self.current, next);
        log::trace!(
            "closing page {} with {} elements",
            page.ordinal,
            page.content.len()
        );
        self.pages.push(page);
        self.used = 0.0;
    }

    fn push(&mut self, piece: Piece) {
        if matches!(
            piece.element,
            Element::Block {
                block: Block::SectionHeader { .. },
                ..
            }
        ) {
            self.pending.push(piece);
            return;
        }
        let mut group = std::mem::take(&mut self.pending);
        group.push(piece);
        self.place_group(group);
    }

    fn page_break(&mut self) {
        self.flush();
        self.close_page();
    }

    /// Place any held headers on their own; used when nothing follows them.
    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let group = std::mem::take(&mut self.pending);
            self.place_group(group);
        }
    }

    /// Place pieces that must share a page, starting a new page first when
    /// they do not fit on the current one.
    fn place_group(&mut self, group: Vec<Piece>) {
        let available = self.geometry.content_height();
        let needed: f32 = group
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let gap = if i == 0 && self.current.content.is_empty() {
                    0.0
                } else {
                    p.gap
                };
                gap + p.height
            })
            .sum();
        if !self.current.content.is_empty() && self.used + needed > available + EPSILON {
            self.close_page();
        }

        let limit = self.geometry.content_bottom();
        for piece in group {
            let gap = if self.current.content.is_empty() {
                self.current.label = piece
                    .section
                    .and_then(|si| self.document.sections[si].label.clone());
                0.0
            } else {
                piece.gap
            };
            let offset = self.geometry.margin_top + self.used + gap;
            self.used += gap + piece.height;
            let placed = Placed {
                element: piece.element,
                offset,
                height: piece.height,
            };
            let block = placed.element.block_id();
            let ordinal = self.current.ordinal;

            if let Some(excess) = piece.overflow {
                self.warn(PaginationOverflowWarning {
                    page: ordinal,
                    block,
                    axis: OverflowAxis::Horizontal,
                    excess,
                });
            }
            if placed.bottom() > limit + EPSILON && !self.current.overflowed {
                self.current.overflowed = true;
                self.warn(PaginationOverflowWarning {
                    page: ordinal,
                    block,
                    axis: OverflowAxis::Vertical,
                    excess: placed.bottom() - limit,
                });
            }
            self.current.content.push(placed);
        }
    }

    fn warn(&mut self, warning: PaginationOverflowWarning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    fn finish(mut self) -> Pagination {
        self.flush();
        self.close_page();
        Pagination {
            pages: self.pages,
            warnings: self.warnings,
        }
    }
}

/// Lay a document out into pages.
pub fn paginate<O: MeasurementOracle + ?Sized>(
    document: &Document,
    style: &StyleSheet,
    geometry: &PageGeometry,
    oracle: &O,
) -> Pagination {
    let measurer = Measurer {
        oracle,
        style,
        width: geometry.content_width(),
    };
    let mut layout = Layout::new(geometry, document);

    for (id, section, block) in document.blocks() {
        match block {
            Block::PageBreak => layout.page_break(),
            Block::Paragraph { text } => {
                for piece in measurer.paragraph(id, &text, section) {
                    layout.push(piece);
                }
            }
            block => layout.push(measurer.atomic(id, block, section)),
        }
    }

    let mut pagination = layout.finish();
    furniture::apply(&mut pagination.pages, &document.title, &document.furniture);
    log::debug!(
        "paginated `{}` into {} pages ({} warnings)",
        document.title,
        pagination.pages.len(),
        pagination.warnings.len()
    );
    pagination
}
