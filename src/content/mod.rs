//! Content model builders.
//!
//! Each export kind has a builder that turns borrowed domain snapshots into a
//! [`Document`](crate::document::Document). Builders only decide *what* is
//! said and in which order; sizes and page positions are left to the
//! pagination engine.

mod character;
pub use character::character_profile;

mod roster;
pub use roster::character_roster;

mod manuscript;
pub use manuscript::story_manuscript;

mod network;
pub use network::relationship_network;

use crate::document::{Block, Inline, Section};
use crate::domain::{display_name, non_blank, Character, Relationship};

/// Split free text into paragraph blocks at blank lines.
pub(crate) fn paragraphs(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(Block::paragraph(current.join(" ")));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(Block::paragraph(current.join(" ")));
    }
    blocks
}

/// The key/value facts shown under "Basic Information".
pub(crate) fn basic_fields(character: &Character) -> Vec<Block> {
    let mut fields = vec![Block::field("Name", character.name.trim())];
    if let Some(age) = character.age {
        fields.push(Block::field("Age", age.to_string()));
    }
    let optional = [
        ("Role", &character.role),
        ("Archetype", &character.archetype),
        ("Occupation", &character.occupation),
    ];
    for (label, value) in optional {
        if let Some(value) = non_blank(value) {
            fields.push(Block::field(label, value));
        }
    }
    if let Some(traits) = character.traits() {
        fields.push(Block::field("Personality Traits", traits));
    }
    if let Some(style) = non_blank(&character.speaking_style) {
        fields.push(Block::field("Speaking Style", style));
    }
    fields
}

/// One titled group of blocks per populated narrative field, in profile
/// order. Each group opens with its section header.
pub(crate) fn narrative_groups(character: &Character) -> Vec<(&'static str, Vec<Block>)> {
    let narratives = [
        ("Personality", &character.personality),
        ("Background", &character.background),
        ("Appearance", &character.appearance),
        ("Motivation", &character.motivation),
        ("Flaws", &character.fatal_flaw),
    ];

    let mut groups = Vec::new();
    for (name, text) in narratives {
        let Some(text) = non_blank(text) else {
            continue;
        };
        let mut blocks = vec![Block::header(name)];
        blocks.extend(paragraphs(text));
        groups.push((name, blocks));
    }

    let abilities: Vec<&str> = character
        .special_abilities
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect();
    if !abilities.is_empty() {
        let mut blocks = vec![Block::header("Special Abilities")];
        for (i, ability) in abilities.into_iter().enumerate() {
            blocks.push(Block::field(format!("Ability {}", i + 1), ability));
        }
        groups.push(("Special Abilities", blocks));
    }
    groups
}

/// A section holding a single header and its blocks.
pub(crate) fn headed_section(name: &str, blocks: Vec<Block>) -> Section {
    let mut section = Section::new(name);
    section.blocks = blocks;
    section
}

/// A relationship as seen from one of the characters in it.
pub(crate) fn relationship_card(
    relationship: &Relationship,
    viewpoint: &Character,
    cast: &[Character],
) -> Block {
    let other = relationship.counterpart(&viewpoint.id);
    let mut lines = vec![
        Inline::strong(display_name(cast, other)),
        Inline::normal(format!("Relationship: {}", relationship.kind.trim())),
        Inline::normal(format!("Strength: {}/10", relationship.strength())),
    ];
    if let Some(description) = non_blank(&relationship.description) {
        lines.push(Inline::muted(description));
    }
    Block::card(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_split_paragraphs_at_blank_lines() {
        let text = "The tide turned.\nThe boats came in.\n\n   \nMorning broke.\n";
        assert_eq!(
            paragraphs(text),
            vec![
                Block::paragraph("The tide turned. The boats came in."),
                Block::paragraph("Morning broke."),
            ]
        );
        assert!(paragraphs("\n \n").is_empty());
    }
}
