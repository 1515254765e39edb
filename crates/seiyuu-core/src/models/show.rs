use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use seiyuu_api::anilist::types::{CharacterEdge, RoleClassification, NO_NAME};

/// One character a voice actor performed in a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRoleEntry {
    pub character_id: Option<u64>,
    pub role: RoleClassification,
    pub name: String,
}

impl CharacterRoleEntry {
    pub fn from_edge(edge: &CharacterEdge) -> Self {
        Self {
            character_id: edge.node.as_ref().map(|n| n.id),
            role: RoleClassification::from_edge(edge.role),
            name: edge
                .node
                .as_ref()
                .map_or(NO_NAME, |n| n.display_name())
                .to_string(),
        }
    }
}

/// A show and its cast, grouped by voice actor id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: u64,
    pub preferred_title: String,
    pub cast: BTreeMap<u64, Vec<CharacterRoleEntry>>,
}
