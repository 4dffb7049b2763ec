use super::{headed_section, paragraphs};
use crate::document::{Block, Document, Furniture, Inline, Section};
use crate::domain::{non_blank, Character, Story};
use crate::error::{Entity, MissingRequiredDataError};

pub const UNTITLED_STORY: &str = "Untitled Story";
pub const PENDING_CONTENT: &str = "[Story content will appear here as it's generated]";

/// Build the manuscript of a story: an overview, the cast, then every chapter
/// on its own pages.
pub fn story_manuscript(
    story: Option<&Story>,
    cast: &[Character],
) -> Result<Document, MissingRequiredDataError> {
    let story = story.ok_or(MissingRequiredDataError::new(Entity::Story))?;

    let title = match story.title.trim() {
        "" => UNTITLED_STORY,
        title => title,
    };
    let mut doc = Document::new(title).with_furniture(Furniture {
        labelled_footer: Some("Chapter {label} • Page {page}".to_string()),
        ..Furniture::default()
    });

    let chapters = story.ordered_chapters();

    let mut about = vec![Block::header("About This Story")];
    if let Some(genre) = non_blank(&story.genre) {
        about.push(Block::field("Genre", genre));
    }
    about.push(Block::field("Chapters", chapters.len().to_string()));
    about.push(Block::field("Word Count", story.total_words().to_string()));
    if !chapters.is_empty() {
        if let Some(idea) = non_blank(&story.idea) {
            about.push(Block::header("Premise"));
            about.extend(paragraphs(idea));
        }
    }
    doc.push_section(headed_section("About This Story", about));

    if !cast.is_empty() {
        let mut blocks = vec![Block::header("Dramatis Personae")];
        for character in cast {
            let mut card = vec![
                Inline::strong(character.name.trim()),
                Inline::muted(character.summary()),
            ];
            if let Some(appearance) = non_blank(&character.appearance) {
                card.push(Inline::muted(format!("Description: {appearance}")));
            }
            blocks.push(Block::card(card));
        }
        doc.push_section(headed_section("Dramatis Personae", blocks));
    }

    if chapters.is_empty() {
        let mut blocks = vec![Block::header("Story")];
        if let Some(idea) = non_blank(&story.idea) {
            blocks.extend(paragraphs(idea));
        }
        blocks.push(Block::paragraph(PENDING_CONTENT));
        doc.push_section(headed_section("Story", blocks));
    }

    for (i, chapter) in chapters.iter().enumerate() {
        let n = i + 1;
        let heading = match chapter.title.trim() {
            "" => format!("Chapter {n}"),
            title => format!("Chapter {n}: {title}"),
        };
        let mut section = Section::new(heading.clone()).with_label(n.to_string());
        section.push(Block::PageBreak).push(Block::title(heading));
        for paragraph in paragraphs(&chapter.content) {
            section.push(paragraph);
        }
        doc.push_section(section);
    }

    log::debug!(
        "built manuscript `{}` with {} chapters",
        doc.title,
        chapters.len()
    );
    Ok(doc)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::{ChapterBuilder, CharacterBuilder, StoryBuilder};
    use crate::measure::TypewriterOracle;
    use crate::pagination::{paginate, Element};
    use crate::style::StyleSheet;

    fn story(chapters: usize) -> Story {
        let mut builder = StoryBuilder::default();
        builder
            .id("s1")
            .title("The Salt Road")
            .genre("fantasy")
            .idea("A cartographer maps a road that moves.");
        for n in 1..=chapters {
            builder.chapter(
                ChapterBuilder::default()
                    .title(format!("Part {n}"))
                    .content("The road shifted.\n\nShe followed it.")
                    .build()
                    .expect("can build chapter"),
            );
        }
        builder.build().expect("can build story")
    }

    #[test]
    fn can_build_manuscript() {
        let doc = story_manuscript(Some(&story(2)), &[]).expect("can build manuscript");
        assert_eq!(doc.title, "The Salt Road");

        let about = doc.section("About This Story").expect("has overview");
        assert!(about.blocks.contains(&Block::field("Genre", "fantasy")));
        assert!(about.blocks.contains(&Block::field("Chapters", "2")));
        assert!(about.blocks.contains(&Block::field("Word Count", "12")));
        assert!(about.blocks.contains(&Block::header("Premise")));

        let chapter = doc.section("Chapter 2: Part 2").expect("has chapter two");
        assert_eq!(chapter.label.as_deref(), Some("2"));
        assert_eq!(
            chapter.blocks,
            vec![
                Block::PageBreak,
                Block::title("Chapter 2: Part 2"),
                Block::paragraph("The road shifted."),
                Block::paragraph("She followed it."),
            ]
        );
        assert!(doc.section("Story").is_none());
        assert!(doc.section("Dramatis Personae").is_none());
    }

    #[test]
    fn cast_cards_describe_appearance() {
        let cast = vec![
            CharacterBuilder::default()
                .id("c1")
                .name("Mara Vell")
                .occupation("cartographer")
                .appearance("Ink-stained fingers")
                .build()
                .expect("can build character"),
            CharacterBuilder::default()
                .id("c2")
                .name("Tobin")
                .appearance("   ")
                .build()
                .expect("can build character"),
        ];
        let doc = story_manuscript(Some(&story(1)), &cast).expect("can build manuscript");

        let personae = doc.section("Dramatis Personae").expect("has cast");
        assert_eq!(
            personae.blocks[1],
            Block::card(vec![
                Inline::strong("Mara Vell"),
                Inline::muted(cast[0].summary()),
                Inline::muted("Description: Ink-stained fingers"),
            ])
        );
        assert_eq!(
            personae.blocks[2],
            Block::card(vec![Inline::strong("Tobin"), Inline::muted(cast[1].summary())])
        );
    }

    #[test]
    fn stories_without_chapters_get_a_placeholder() {
        let mut story = story(0);
        story.title = "  ".to_string();
        let doc = story_manuscript(Some(&story), &[]).expect("can build manuscript");
        assert_eq!(doc.title, UNTITLED_STORY);

        let section = doc.section("Story").expect("has story section");
        assert_eq!(
            section.blocks.last(),
            Some(&Block::paragraph(PENDING_CONTENT))
        );
    }

    #[test]
    fn missing_story_is_an_error() {
        assert_eq!(
            story_manuscript(None, &[]),
            Err(MissingRequiredDataError::new(Entity::Story))
        );
    }

    #[test]
    fn every_chapter_opens_a_page() {
        let doc = story_manuscript(Some(&story(3)), &[]).expect("can build manuscript");
        let pagination = paginate(
            &doc,
            &StyleSheet::default(),
            &crate::style::PageGeometry::new(595.28, 841.89, crate::style::Margins::all(54.0)),
            &TypewriterOracle::standard_fonts(),
        );

        let openers: Vec<(usize, String)> = pagination
            .pages
            .iter()
            .filter_map(|page| match &page.content.first()?.element {
                Element::Block {
                    block: Block::Title { text },
                    ..
                } if text.starts_with("Chapter") => Some((page.ordinal, text.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            openers,
            vec![
                (2, "Chapter 1: Part 1".to_string()),
                (3, "Chapter 2: Part 2".to_string()),
                (4, "Chapter 3: Part 3".to_string()),
            ]
        );
        assert_eq!(pagination.pages[2].footer_text, "Chapter 2 • Page 3");
    }
}
