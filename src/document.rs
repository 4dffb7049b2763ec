//! The content model handed from the builders to the pagination engine.
//!
//! A [`Document`] is an ordered list of [`Section`]s, each an ordered list of
//! [`Block`]s. Blocks carry text only; how big they are and where they land is
//! decided later by [`crate::pagination`].

use serde::{Deserialize, Serialize};

/// Position of a block in document order.
///
/// The document title is always `BlockId(0)`; section blocks are numbered
/// from 1 in the order they appear, page breaks included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(pub usize);

impl BlockId {
    pub const TITLE: BlockId = BlockId(0);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    Strong,
    Normal,
    Muted,
}

/// One line of a card, before wrapping.
#[derive(Clone, Debug, PartialEq)]
pub struct Inline {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Inline {
    pub fn strong(text: impl Into<String>) -> Inline {
        Inline {
            text: text.into(),
            emphasis: Emphasis::Strong,
        }
    }

    pub fn normal(text: impl Into<String>) -> Inline {
        Inline {
            text: text.into(),
            emphasis: Emphasis::Normal,
        }
    }

    pub fn muted(text: impl Into<String>) -> Inline {
        Inline {
            text: text.into(),
            emphasis: Emphasis::Muted,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Title { text: String },
    SectionHeader { text: String },
    Paragraph { text: String },
    /// A key/value line; never split across pages.
    Field { label: String, value: String },
    /// A boxed group of lines; never split across pages.
    Card { lines: Vec<Inline> },
    PageBreak,
}

impl Block {
    pub fn title(text: impl Into<String>) -> Block {
        Block::Title { text: text.into() }
    }

    pub fn header(text: impl Into<String>) -> Block {
        Block::SectionHeader { text: text.into() }
    }

    /// A paragraph with its whitespace collapsed to single spaces, so that
    /// rejoining its wrapped lines reproduces the text exactly.
    pub fn paragraph(text: impl AsRef<str>) -> Block {
        Block::Paragraph {
            text: text
                .as_ref()
                .split_whitespace()
                .collect::<Vec<&str>>()
                .join(" "),
        }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Block {
        Block::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn card(lines: Vec<Inline>) -> Block {
        Block::Card { lines }
    }

    /// Whether the block must be placed in full on a single page.
    pub fn is_atomic(&self) -> bool {
        !matches!(self, Block::Paragraph { .. } | Block::PageBreak)
    }
}

/// How page numbers are written in headers and footers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageNumberStyle {
    #[default]
    Arabic,
    RomanLower,
    RomanUpper,
}

/// Header and footer templates supplied by the caller.
///
/// Templates support the placeholders `{title}`, `{page}`, `{pages}` and
/// `{label}`. `labelled_footer`, when set, replaces `footer` on pages that
/// begin inside a labelled section (e.g. a manuscript chapter).
#[derive(Clone, Debug, PartialEq)]
pub struct Furniture {
    pub header: String,
    pub footer: String,
    pub labelled_footer: Option<String>,
    pub number_style: PageNumberStyle,
}

impl Default for Furniture {
    fn default() -> Self {
        Furniture {
            header: "{title}".to_string(),
            footer: "Page {page}".to_string(),
            labelled_footer: None,
            number_style: PageNumberStyle::Arabic,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    /// Human readable name, used for logging and tests.
    pub name: String,
    /// Running label exposed to furniture templates as `{label}`.
    pub label: Option<String>,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Section {
        Section {
            name: name.into(),
            label: None,
            blocks: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Section {
        self.label = Some(label.into());
        self
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
    pub furniture: Furniture,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Document {
        Document {
            title: title.into(),
            sections: Vec::new(),
            furniture: Furniture::default(),
        }
    }

    pub fn with_furniture(mut self, furniture: Furniture) -> Document {
        self.furniture = furniture;
        self
    }

    /// Adds a section unless it has no blocks.
    pub fn push_section(&mut self, section: Section) -> &mut Self {
        if !section.blocks.is_empty() {
            self.sections.push(section);
        }
        self
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Every block in document order with its id, starting with the
    /// synthesized title block, alongside the index of its section.
    pub fn blocks(&self) -> Vec<(BlockId, Option<usize>, Block)> {
        let mut blocks = vec![(BlockId::TITLE, None, Block::title(self.title.clone()))];
        let mut next = 1;
        for (si, section) in self.sections.iter().enumerate() {
            for block in section.blocks.iter() {
                blocks.push((BlockId(next), Some(si), block.clone()));
                next += 1;
            }
        }
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_are_whitespace_normalised() {
        assert_eq!(
            Block::paragraph("  The   tide\n turned. "),
            Block::Paragraph {
                text: "The tide turned.".to_string()
            }
        );
    }

    #[test]
    fn empty_sections_are_skipped() {
        let mut doc = Document::new("Test");
        doc.push_section(Section::new("Empty"));
        let mut section = Section::new("Full");
        section.push(Block::header("Full"));
        doc.push_section(section);
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.section("Full").is_some());
    }

    #[test]
    fn blocks_are_numbered_after_the_title() {
        let mut doc = Document::new("Test");
        let mut section = Section::new("One");
        section
            .push(Block::PageBreak)
            .push(Block::title("Chapter 1"))
            .push(Block::paragraph("Hello"));
        doc.push_section(section);

        let ids: Vec<usize> = doc.blocks().iter().map(|(id, _, _)| id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(doc.blocks()[0].2, Block::title("Test"));
    }
}
