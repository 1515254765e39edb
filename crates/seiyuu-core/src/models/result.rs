use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::seiyuu::VoiceActorSummary;
use super::show::{CharacterRoleEntry, Show};

/// Ordering of the voice-actor summaries in a [`QueryResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryOrder {
    /// Most roles first; ties keep encounter order.
    #[default]
    TotalRolesDesc,
    /// Order in which voice actors were first seen.
    Encounter,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    pub seiyuu_summaries: Vec<VoiceActorSummary>,
    pub shows: BTreeMap<u64, Show>,
}

/// A role of one voice actor, joined with the show it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleRow<'a> {
    pub show_id: u64,
    pub show_preferred_title: &'a str,
    #[serde(flatten)]
    pub entry: &'a CharacterRoleEntry,
}

impl QueryResult {
    pub fn summary(&self, voice_actor_id: u64) -> Option<&VoiceActorSummary> {
        self.seiyuu_summaries
            .iter()
            .find(|s| s.id == voice_actor_id)
    }

    /// Every role of `voice_actor_id`, in show-id order.
    pub fn roles_for(&self, voice_actor_id: u64) -> Vec<RoleRow<'_>> {
        self.shows
            .values()
            .filter_map(|show| {
                show.cast
                    .get(&voice_actor_id)
                    .map(|entries| (show, entries))
            })
            .flat_map(|(show, entries)| {
                entries.iter().map(move |entry| RoleRow {
                    show_id: show.id,
                    show_preferred_title: &show.preferred_title,
                    entry,
                })
            })
            .collect()
    }
}
