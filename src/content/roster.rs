use super::{basic_fields, narrative_groups};
use crate::document::{Block, Document, Furniture, Section};
use crate::domain::Character;
use crate::error::{Entity, MissingRequiredDataError};

pub const ROSTER_TITLE: &str = "Character Profiles";

/// Build one document holding every character's profile, each starting on a
/// new page. An empty roster is an error.
pub fn character_roster(characters: &[Character]) -> Result<Document, MissingRequiredDataError> {
    if characters.is_empty() {
        return Err(MissingRequiredDataError::new(Entity::Characters));
    }

    let mut doc = Document::new(ROSTER_TITLE).with_furniture(Furniture {
        labelled_footer: Some("{label} • Page {page}".to_string()),
        ..Furniture::default()
    });

    for (i, character) in characters.iter().enumerate() {
        let name = character.name.trim();
        let mut section = Section::new(name).with_label(name);
        if i > 0 {
            section.push(Block::PageBreak);
        }
        section
            .push(Block::title(name))
            .push(Block::header("Basic Information"));
        for field in basic_fields(character) {
            section.push(field);
        }
        for (_, blocks) in narrative_groups(character) {
            for block in blocks {
                section.push(block);
            }
        }
        doc.push_section(section);
    }

    log::debug!("built roster of {} characters", characters.len());
    Ok(doc)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::CharacterBuilder;

    fn character(id: &str, name: &str) -> Character {
        CharacterBuilder::default()
            .id(id)
            .name(name)
            .background("Born somewhere.")
            .build()
            .expect("can build character")
    }

    #[test]
    fn can_build_roster() {
        let doc = character_roster(&[character("a", "Mara"), character("b", "Tobin")])
            .expect("can build roster");
        assert_eq!(doc.title, ROSTER_TITLE);
        assert_eq!(doc.sections.len(), 2);

        let first = &doc.sections[0];
        assert_eq!(first.label.as_deref(), Some("Mara"));
        assert_eq!(first.blocks[0], Block::title("Mara"));

        let second = &doc.sections[1];
        assert_eq!(second.blocks[0], Block::PageBreak);
        assert_eq!(second.blocks[1], Block::title("Tobin"));
        assert!(second.blocks.contains(&Block::header("Background")));
    }

    #[test]
    fn empty_roster_is_an_error() {
        assert_eq!(
            character_roster(&[]),
            Err(MissingRequiredDataError::new(Entity::Characters))
        );
    }
}
