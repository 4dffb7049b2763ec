//! Read-only snapshots of the storytelling domain.
//!
//! These are the plain records supplied by the character, story, and
//! relationship stores of the host application. Nothing in this crate mutates
//! them; every export builds its document from a borrowed snapshot.

mod character;
pub use character::*;

mod relationship;
pub use relationship::*;

mod story;
pub use story::*;

use serde::{Deserialize, Serialize};

/// Everything the host application knows about one project, as loaded from a
/// JSON snapshot by the command line tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub stories: Vec<Story>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Library {
    pub fn character(&self, id: &CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| &c.id == id)
    }

    pub fn story(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }
}

/// Resolve a character id to a display name, falling back to the raw id when
/// the character is not part of the supplied cast.
pub fn display_name<'a>(cast: &'a [Character], id: &'a CharacterId) -> &'a str {
    cast.iter()
        .find(|c| &c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or(id.0.as_str())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_load_library_snapshot() {
        let json = r#"{
            "characters": [{ "id": "c1", "name": "Mara Vell", "age": 31 }],
            "stories": [{ "id": "s1", "title": "The Salt Road", "chapters": [] }],
            "relationships": [{ "from": "c1", "to": "c2", "kind": "rival", "strength": 14 }]
        }"#;
        let library: Library = serde_json::from_str(json).expect("can parse library");
        assert_eq!(library.characters[0].age, Some(31));
        assert!(library.story("s1").is_some());
        assert_eq!(library.relationships[0].strength(), 10);
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let cast = vec![CharacterBuilder::default()
            .id("c1")
            .name("Mara Vell")
            .build()
            .expect("can build character")];
        assert_eq!(display_name(&cast, &CharacterId::from("c1")), "Mara Vell");
        assert_eq!(display_name(&cast, &CharacterId::from("c9")), "c9");
    }
}
