pub mod result;
pub mod seiyuu;
pub mod show;

pub use result::{QueryResult, RoleRow, SummaryOrder};
pub use seiyuu::VoiceActorSummary;
pub use seiyuu_api::anilist::types::{MediaSeason, RoleClassification};
pub use show::{CharacterRoleEntry, Show};
