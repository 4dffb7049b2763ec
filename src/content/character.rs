use super::{basic_fields, headed_section, narrative_groups, relationship_card};
use crate::document::{Block, Document};
use crate::domain::{Character, Relationship};
use crate::error::{Entity, MissingRequiredDataError};

/// Build the profile document for a single character.
///
/// Only relationships involving the character are shown; `cast` is used to
/// resolve the names of the other side of each one.
pub fn character_profile(
    character: Option<&Character>,
    relationships: &[Relationship],
    cast: &[Character],
) -> Result<Document, MissingRequiredDataError> {
    let character = character.ok_or(MissingRequiredDataError::new(Entity::Character))?;

    let mut doc = Document::new(character.name.trim());

    let mut info = vec![Block::header("Basic Information")];
    info.extend(basic_fields(character));
    doc.push_section(headed_section("Basic Information", info));

    for (name, blocks) in narrative_groups(character) {
        doc.push_section(headed_section(name, blocks));
    }

    let cards: Vec<Block> = relationships
        .iter()
        .filter(|r| r.involves(&character.id))
        .map(|r| relationship_card(r, character, cast))
        .collect();
    if !cards.is_empty() {
        let mut blocks = vec![Block::header("Relationships")];
        blocks.extend(cards);
        doc.push_section(headed_section("Relationships", blocks));
    }

    log::debug!(
        "built profile for `{}` with {} sections",
        character.name,
        doc.sections.len()
    );
    Ok(doc)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::Inline;
    use crate::domain::{CharacterBuilder, RelationshipBuilder};

    fn mara() -> Character {
        CharacterBuilder::default()
            .id("c1")
            .name("Mara Vell")
            .age(31u32)
            .role("Protagonist")
            .personality("Restless and curious.")
            .background("Raised on the salt flats.\n\nLeft at sixteen.")
            .build()
            .expect("can build character")
    }

    #[test]
    fn can_build_profile_without_relationships() {
        let doc = character_profile(Some(&mara()), &[], &[]).expect("can build profile");
        assert_eq!(doc.title, "Mara Vell");

        let names: Vec<&str> = doc.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Basic Information", "Personality", "Background"]);
        assert!(doc.section("Relationships").is_none());
        assert!(doc.section("Appearance").is_none());

        let background = doc.section("Background").expect("has background");
        assert_eq!(background.blocks.len(), 3);
        assert_eq!(background.blocks[0], Block::header("Background"));
    }

    #[test]
    fn can_build_profile_with_one_narrative_field() {
        let character = CharacterBuilder::default()
            .id("c2")
            .name("Tobin")
            .motivation("Find his brother.")
            .build()
            .expect("can build character");
        let doc = character_profile(Some(&character), &[], &[]).expect("can build profile");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(
            doc.section("Basic Information").map(|s| s.blocks.clone()),
            Some(vec![
                Block::header("Basic Information"),
                Block::field("Name", "Tobin")
            ])
        );
    }

    #[test]
    fn missing_character_is_an_error() {
        assert_eq!(
            character_profile(None, &[], &[]),
            Err(MissingRequiredDataError::new(Entity::Character))
        );
    }

    #[test]
    fn relationships_are_cards_named_after_the_other_side() {
        let mara = mara();
        let tobin = CharacterBuilder::default()
            .id("c2")
            .name("Tobin")
            .build()
            .expect("can build character");
        let relationships = vec![
            RelationshipBuilder::default()
                .from("c2")
                .to("c1")
                .kind("sibling")
                .strength(8u8)
                .description("Not on speaking terms.")
                .build()
                .expect("can build relationship"),
            RelationshipBuilder::default()
                .from("c3")
                .to("c4")
                .kind("rival")
                .build()
                .expect("can build relationship"),
        ];
        let cast = vec![mara.clone(), tobin];

        let doc = character_profile(Some(&mara), &relationships, &cast).expect("can build");
        let section = doc.section("Relationships").expect("has relationships");
        assert_eq!(section.blocks.len(), 2);
        assert_eq!(
            section.blocks[1],
            Block::card(vec![
                Inline::strong("Tobin"),
                Inline::normal("Relationship: sibling"),
                Inline::normal("Strength: 8/10"),
                Inline::muted("Not on speaking terms."),
            ])
        );
    }

    #[test]
    fn supplemental_sections_appear_when_populated() {
        let character = CharacterBuilder::default()
            .id("c5")
            .name("Ysolde")
            .fatal_flaw("Pride")
            .ability("Speaks to ravens")
            .ability(" ")
            .build()
            .expect("can build character");
        let doc = character_profile(Some(&character), &[], &[]).expect("can build profile");
        assert!(doc.section("Flaws").is_some());
        let abilities = doc.section("Special Abilities").expect("has abilities");
        assert_eq!(
            abilities.blocks,
            vec![
                Block::header("Special Abilities"),
                Block::field("Ability 1", "Speaks to ravens")
            ]
        );
    }
}
