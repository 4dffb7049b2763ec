use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the character store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub String);

impl<S: Into<String>> From<S> for CharacterId {
    fn from(s: S) -> Self {
        CharacterId(s.into())
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A character as edited in the character form.
///
/// Only `id` and `name` are required; every narrative field is optional and
/// an empty string is treated the same as an absent one.
#[derive(Builder, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub age: Option<u32>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub role: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub archetype: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub occupation: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub personality: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub background: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub appearance: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub motivation: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub primary_trait: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub secondary_trait: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub fatal_flaw: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub speaking_style: Option<String>,
    #[builder(setter(each(name = "ability", into)), default)]
    #[serde(default)]
    pub special_abilities: Vec<String>,
}

impl Character {
    /// Personality traits joined for display, e.g. `Brave, Witty`.
    pub fn traits(&self) -> Option<String> {
        let traits: Vec<&str> = [&self.primary_trait, &self.secondary_trait]
            .into_iter()
            .filter_map(non_blank)
            .collect();
        if traits.is_empty() {
            None
        } else {
            Some(traits.join(", "))
        }
    }

    /// A one-line summary such as `Protagonist · Cartographer · Age 31`.
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(role) = non_blank(&self.role) {
            parts.push(role.to_string());
        }
        if let Some(archetype) = non_blank(&self.archetype) {
            parts.push(archetype.to_string());
        }
        if let Some(occupation) = non_blank(&self.occupation) {
            parts.push(occupation.to_string());
        }
        if let Some(age) = self.age {
            parts.push(format!("Age {age}"));
        }
        if parts.is_empty() {
            "No details recorded".to_string()
        } else {
            parts.join(" · ")
        }
    }
}

/// Returns the trimmed contents of an optional text field, or `None` when it
/// is absent or blank.
pub fn non_blank(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
