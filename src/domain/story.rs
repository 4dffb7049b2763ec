use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// One chapter of a manuscript, as saved by the chapter editor.
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Chapter {
    pub title: String,
    #[builder(default)]
    #[serde(default)]
    pub content: String,
    /// Explicit position in the story; chapters without one keep their
    /// snapshot order after all numbered chapters.
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub order: Option<u32>,
    /// Word count as reported by the editor; recomputed from the content when
    /// absent.
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub word_count: Option<usize>,
}

impl Chapter {
    pub fn words(&self) -> usize {
        self.word_count
            .unwrap_or_else(|| self.content.split_whitespace().count())
    }
}

#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Story {
    pub id: String,
    #[builder(default)]
    #[serde(default)]
    pub title: String,
    /// Theme or genre label, e.g. "fantasy".
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub genre: Option<String>,
    /// The free-text idea the story was generated from.
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub idea: Option<String>,
    #[builder(setter(each(name = "chapter", into)), default)]
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Story {
    /// Chapters in reading order: explicitly ordered chapters first (stable by
    /// `order`), then the rest in snapshot order.
    pub fn ordered_chapters(&self) -> Vec<&Chapter> {
        let mut chapters: Vec<&Chapter> = self.chapters.iter().collect();
        chapters.sort_by_key(|c| c.order.unwrap_or(u32::MAX));
        chapters
    }

    pub fn total_words(&self) -> usize {
        self.chapters.iter().map(Chapter::words).sum()
    }
}
