use super::CharacterId;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

pub const MIN_STRENGTH: u8 = 1;
pub const MAX_STRENGTH: u8 = 10;

/// A directed link between two characters as recorded by the relationship
/// manager. Strength is nominally 1–10; out-of-range values are clamped when
/// read through [`Relationship::strength`].
#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Relationship {
    pub from: CharacterId,
    pub to: CharacterId,
    /// Free-form type label such as "mentor" or "rival".
    pub kind: String,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub description: Option<String>,
    #[builder(default = "5", setter(name = "strength"))]
    #[serde(default = "default_strength", rename = "strength")]
    raw_strength: u8,
}

fn default_strength() -> u8 {
    5
}

impl Relationship {
    pub fn strength(&self) -> u8 {
        self.raw_strength.clamp(MIN_STRENGTH, MAX_STRENGTH)
    }

    pub fn involves(&self, id: &CharacterId) -> bool {
        &self.from == id || &self.to == id
    }

    /// The other end of the relationship, as seen from `id`.
    pub fn counterpart(&self, id: &CharacterId) -> &CharacterId {
        if &self.from == id {
            &self.to
        } else {
            &self.from
        }
    }
}
