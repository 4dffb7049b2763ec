use super::headed_section;
use crate::document::{Block, Document, Inline};
use crate::domain::{display_name, non_blank, Character, Relationship};

pub const NETWORK_TITLE: &str = "Relationship Network";

/// Build the overview of every character and the relationships between them.
///
/// Never fails: with nothing to show the document holds only its title.
pub fn relationship_network(characters: &[Character], relationships: &[Relationship]) -> Document {
    let mut doc = Document::new(NETWORK_TITLE);

    if !characters.is_empty() {
        let mut blocks = vec![Block::header("Characters")];
        for character in characters {
            blocks.push(Block::field(character.name.trim(), character.summary()));
        }
        doc.push_section(headed_section("Characters", blocks));
    }

    if !relationships.is_empty() {
        let total: u32 = relationships.iter().map(|r| r.strength() as u32).sum();
        let average = total as f32 / relationships.len() as f32;

        let mut blocks = vec![
            Block::header("Network Summary"),
            Block::field("Relationships", relationships.len().to_string()),
            Block::field("Average Strength", format!("{average:.1}/10")),
        ];
        if let Some(strongest) = strongest(relationships) {
            blocks.push(Block::field(
                "Strongest Bond",
                format!(
                    "{} & {} ({}, {}/10)",
                    display_name(characters, &strongest.from),
                    display_name(characters, &strongest.to),
                    strongest.kind.trim(),
                    strongest.strength()
                ),
            ));
        }
        doc.push_section(headed_section("Network Summary", blocks));

        let mut blocks = vec![Block::header("Relationship Dynamics")];
        blocks.extend(relationships.iter().map(|r| dynamics_card(r, characters)));
        doc.push_section(headed_section("Relationship Dynamics", blocks));
    }

    log::debug!(
        "built network of {} characters and {} relationships",
        characters.len(),
        relationships.len()
    );
    doc
}

/// The first of the strongest relationships.
fn strongest(relationships: &[Relationship]) -> Option<&Relationship> {
    relationships
        .iter()
        .fold(None, |best: Option<&Relationship>, r| match best {
            Some(b) if b.strength() >= r.strength() => Some(b),
            _ => Some(r),
        })
}

fn dynamics_card(relationship: &Relationship, cast: &[Character]) -> Block {
    let mut lines = vec![
        Inline::strong(format!(
            "{} → {}",
            display_name(cast, &relationship.from),
            display_name(cast, &relationship.to)
        )),
        Inline::normal(format!("Type: {}", relationship.kind.trim())),
        Inline::normal(format!("Strength: {}/10", relationship.strength())),
    ];
    if let Some(description) = non_blank(&relationship.description) {
        lines.push(Inline::muted(description));
    }
    Block::card(lines)
}
