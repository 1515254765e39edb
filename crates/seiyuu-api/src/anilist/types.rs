use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Shown when a show has no title in any language.
pub const NO_TITLE: &str = "[No title]";

/// Shown when a character has neither a full nor a native name.
pub const NO_NAME: &str = "[No name]";

// ── GraphQL response wrappers ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: u32,
    pub per_page: u32,
    pub current_page: u32,
    pub last_page: u32,
    pub has_next_page: bool,
}

// ── Season listing ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SeasonPageResponse {
    #[serde(rename = "Page")]
    pub page: SeasonPageData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonPageData {
    pub page_info: PageInfo,
    pub media: Vec<SeasonMedia>,
}

/// One show from the season listing, with its first page of cast edges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeasonMedia {
    pub id: u64,
    pub title: Option<MediaTitle>,
    pub characters: CharacterConnection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaTitle {
    pub english: Option<String>,
    pub romaji: Option<String>,
    pub native: Option<String>,
}

impl MediaTitle {
    /// English, then romaji, then native.
    pub fn preferred(&self) -> &str {
        self.english
            .as_deref()
            .or(self.romaji.as_deref())
            .or(self.native.as_deref())
            .unwrap_or(NO_TITLE)
    }
}

impl SeasonMedia {
    pub fn preferred_title(&self) -> &str {
        self.title.as_ref().map_or(NO_TITLE, MediaTitle::preferred)
    }
}

// ── Per-show character listing ───────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MediaCharactersResponse {
    #[serde(rename = "Media")]
    pub media: MediaCharacters,
}

#[derive(Debug, Deserialize)]
pub struct MediaCharacters {
    pub id: u64,
    pub characters: CharacterConnection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterConnection {
    pub page_info: PageInfo,
    pub edges: Vec<CharacterEdge>,
}

/// A character and the voice actors credited for it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterEdge {
    pub role: Option<RoleClassification>,
    pub voice_actors: Vec<VoiceActor>,
    pub node: Option<CharacterNode>,
}

/// Billing tier of a character. Unknown upstream values map to `Unclassified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleClassification {
    Main,
    Supporting,
    Background,
    #[serde(other)]
    Unclassified,
}

impl RoleClassification {
    pub fn from_edge(role: Option<Self>) -> Self {
        role.unwrap_or(Self::Unclassified)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceActor {
    pub id: u64,
    pub name: Option<StaffName>,
    pub image: Option<StaffImage>,
    pub site_url: Option<String>,
}

impl VoiceActor {
    pub fn full_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| n.full.as_deref())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.large.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StaffName {
    pub full: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StaffImage {
    pub large: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CharacterNode {
    pub id: u64,
    pub name: Option<CharacterName>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CharacterName {
    pub full: Option<String>,
    pub native: Option<String>,
}

impl CharacterNode {
    /// Full name, then native name.
    pub fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(|n| n.full.as_deref().or(n.native.as_deref()))
            .unwrap_or(NO_NAME)
    }
}

// ── Seasons ──────────────────────────────────────────────────────

/// Anime season (quarter of the year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl MediaSeason {
    /// Convert to AniList GraphQL `MediaSeason` enum value.
    pub fn to_anilist_str(self) -> &'static str {
        match self {
            Self::Winter => "WINTER",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
            Self::Fall => "FALL",
        }
    }

    /// Determine the current anime season from the current month.
    pub fn current() -> Self {
        Self::from_month(chrono::Utc::now().month())
    }

    fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }
}

impl fmt::Display for MediaSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winter => write!(f, "Winter"),
            Self::Spring => write!(f, "Spring"),
            Self::Summer => write!(f, "Summer"),
            Self::Fall => write!(f, "Fall"),
        }
    }
}

impl FromStr for MediaSeason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WINTER" => Ok(Self::Winter),
            "SPRING" => Ok(Self::Spring),
            "SUMMER" => Ok(Self::Summer),
            "FALL" | "AUTUMN" => Ok(Self::Fall),
            other => Err(format!("unknown season: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_season_page() {
        let json = r#"{
            "data": {
                "Page": {
                    "pageInfo": {
                        "total": 1, "perPage": 50, "currentPage": 1,
                        "lastPage": 1, "hasNextPage": false
                    },
                    "media": [
                        {
                            "id": 108725,
                            "title": {
                                "english": "The Promised Neverland Season 2",
                                "romaji": "Yakusoku no Neverland 2",
                                "native": "約束のネバーランド 2"
                            },
                            "characters": {
                                "pageInfo": {
                                    "total": 1, "perPage": 25, "currentPage": 1,
                                    "lastPage": 1, "hasNextPage": false
                                },
                                "edges": [
                                    {
                                        "role": "MAIN",
                                        "voiceActors": [
                                            {
                                                "id": 95869,
                                                "name": { "full": "Sumire Morohoshi" },
                                                "image": { "large": "https://s4.anilist.co/file/anilistcdn/staff/large/95869.jpg" },
                                                "siteUrl": "https://anilist.co/staff/95869"
                                            }
                                        ],
                                        "node": { "id": 124463, "name": { "full": "Emma", "native": "エマ" } }
                                    }
                                ]
                            }
                        }
                    ]
                }
            }
        }"#;

        let resp: GraphQLResponse<SeasonPageResponse> = serde_json::from_str(json).unwrap();
        let page = resp.data.page;
        assert!(!page.page_info.has_next_page);
        assert_eq!(page.media.len(), 1);

        let show = &page.media[0];
        assert_eq!(show.id, 108725);
        assert_eq!(show.preferred_title(), "The Promised Neverland Season 2");

        let edge = &show.characters.edges[0];
        assert_eq!(edge.role, Some(RoleClassification::Main));
        assert_eq!(edge.voice_actors[0].full_name(), Some("Sumire Morohoshi"));
        assert_eq!(edge.node.as_ref().map(|n| n.display_name()), Some("Emma"));
    }

    #[test]
    fn test_deserialize_minimal_edge() {
        let json = r#"{ "role": null, "voiceActors": [{ "id": 1 }], "node": null }"#;
        let edge: CharacterEdge = serde_json::from_str(json).unwrap();
        assert_eq!(RoleClassification::from_edge(edge.role), RoleClassification::Unclassified);
        assert!(edge.voice_actors[0].full_name().is_none());
        assert!(edge.voice_actors[0].image_url().is_none());
    }

    #[test]
    fn test_unknown_role_is_unclassified() {
        let role: RoleClassification = serde_json::from_str(r#""CAMEO""#).unwrap();
        assert_eq!(role, RoleClassification::Unclassified);
    }

    #[test]
    fn test_missing_page_info_fails() {
        let json = r#"{ "edges": [] }"#;
        assert!(serde_json::from_str::<CharacterConnection>(json).is_err());
    }

    #[test]
    fn test_title_fallback() {
        let title = MediaTitle {
            english: Some("Foo".into()),
            romaji: Some("Bar".into()),
            native: None,
        };
        assert_eq!(title.preferred(), "Foo");

        let title = MediaTitle {
            native: Some("Baz".into()),
            ..Default::default()
        };
        assert_eq!(title.preferred(), "Baz");

        assert_eq!(MediaTitle::default().preferred(), NO_TITLE);
    }

    #[test]
    fn test_character_name_fallback() {
        let node = CharacterNode {
            id: 1,
            name: Some(CharacterName {
                full: None,
                native: Some("エマ".into()),
            }),
        };
        assert_eq!(node.display_name(), "エマ");

        let node = CharacterNode { id: 2, name: None };
        assert_eq!(node.display_name(), NO_NAME);
    }

    #[test]
    fn test_season_parsing() {
        assert_eq!("winter".parse::<MediaSeason>(), Ok(MediaSeason::Winter));
        assert_eq!("FALL".parse::<MediaSeason>(), Ok(MediaSeason::Fall));
        assert!("monsoon".parse::<MediaSeason>().is_err());
        assert_eq!(MediaSeason::from_month(2), MediaSeason::Winter);
        assert_eq!(MediaSeason::from_month(11), MediaSeason::Fall);
    }
}
