use serde::{Deserialize, Serialize};

use seiyuu_api::anilist::types::{RoleClassification, VoiceActor};

/// Running role counts for one voice actor across a season.
///
/// `all_roles` always equals the sum of the four classification counts, and
/// `show_ids` holds one entry per counted role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceActorSummary {
    pub id: u64,

    pub main_roles: u32,
    pub supporting_roles: u32,
    pub background_roles: u32,
    pub unclassified_roles: u32,
    pub all_roles: u32,

    pub full_name: Option<String>,
    pub image: Option<String>,
    pub site_url: Option<String>,
    pub show_ids: Vec<u64>,
}

impl VoiceActorSummary {
    /// An empty summary for a newly seen voice actor.
    pub fn new(voice_actor: &VoiceActor) -> Self {
        Self {
            id: voice_actor.id,
            main_roles: 0,
            supporting_roles: 0,
            background_roles: 0,
            unclassified_roles: 0,
            all_roles: 0,
            full_name: voice_actor.full_name().map(str::to_owned),
            image: voice_actor.image_url().map(str::to_owned),
            site_url: voice_actor.site_url.clone(),
            show_ids: Vec::new(),
        }
    }

    /// Count one role in `show_id`.
    pub fn record(&mut self, role: RoleClassification, show_id: u64) {
        match role {
            RoleClassification::Main => self.main_roles += 1,
            RoleClassification::Supporting => self.supporting_roles += 1,
            RoleClassification::Background => self.background_roles += 1,
            RoleClassification::Unclassified => self.unclassified_roles += 1,
        }
        self.all_roles += 1;
        self.show_ids.push(show_id);
    }

    /// Fill in profile fields a previous sighting did not carry.
    pub fn fill_profile(&mut self, voice_actor: &VoiceActor) {
        if self.full_name.is_none() {
            self.full_name = voice_actor.full_name().map(str::to_owned);
        }
        if self.image.is_none() {
            self.image = voice_actor.image_url().map(str::to_owned);
        }
        if self.site_url.is_none() {
            self.site_url = voice_actor.site_url.clone();
        }
    }
}
