//! Role counting across a season's shows.

use std::collections::{BTreeMap, HashMap, HashSet};

use seiyuu_api::anilist::types::{
    CharacterEdge, MediaTitle, RoleClassification, SeasonMedia, NO_TITLE,
};

use crate::models::{CharacterRoleEntry, QueryResult, Show, SummaryOrder, VoiceActorSummary};

/// A show with its complete list of cast edges.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCast {
    pub id: u64,
    pub title: Option<MediaTitle>,
    pub edges: Vec<CharacterEdge>,
}

impl ShowCast {
    pub fn preferred_title(&self) -> &str {
        self.title.as_ref().map_or(NO_TITLE, MediaTitle::preferred)
    }
}

impl From<SeasonMedia> for ShowCast {
    fn from(media: SeasonMedia) -> Self {
        Self {
            id: media.id,
            title: media.title,
            edges: media.characters.edges,
        }
    }
}

/// Build the voice-actor summaries and per-show casts for `shows`.
///
/// A voice actor listed more than once for the same character is counted
/// once for that character; the same actor on two characters counts twice.
pub fn aggregate(shows: &[ShowCast], order: SummaryOrder) -> QueryResult {
    let mut summaries: Vec<VoiceActorSummary> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();
    let mut result_shows = BTreeMap::new();

    for show in shows {
        let mut cast: BTreeMap<u64, Vec<CharacterRoleEntry>> = BTreeMap::new();

        for edge in &show.edges {
            let role = RoleClassification::from_edge(edge.role);
            let entry = CharacterRoleEntry::from_edge(edge);
            let mut counted = HashSet::new();

            for voice_actor in &edge.voice_actors {
                if !counted.insert(voice_actor.id) {
                    continue;
                }

                cast.entry(voice_actor.id).or_default().push(entry.clone());

                let slot = match index.get(&voice_actor.id) {
                    Some(&slot) => {
                        summaries[slot].fill_profile(voice_actor);
                        slot
                    }
                    None => {
                        index.insert(voice_actor.id, summaries.len());
                        summaries.push(VoiceActorSummary::new(voice_actor));
                        summaries.len() - 1
                    }
                };
                summaries[slot].record(role, show.id);
            }
        }

        result_shows.insert(
            show.id,
            Show {
                id: show.id,
                preferred_title: show.preferred_title().to_string(),
                cast,
            },
        );
    }

    if order == SummaryOrder::TotalRolesDesc {
        summaries.sort_by(|a, b| b.all_roles.cmp(&a.all_roles));
    }

    QueryResult {
        seiyuu_summaries: summaries,
        shows: result_shows,
    }
}
