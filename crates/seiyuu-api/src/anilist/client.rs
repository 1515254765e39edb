use serde::{Deserialize, Serialize};

use super::error::AniListError;
use super::paginate::{Page, PagedQuery, PaginationSettings, Paginator};
use super::transport::ReqwestTransport;
use super::types::{
    CharacterEdge, GraphQLResponse, MediaCharactersResponse, MediaSeason, SeasonMedia,
    SeasonPageResponse,
};
use crate::traits::{GraphQLRequest, GraphQLTransport, ProgressObserver};

const SEASON_QUERY: &str = r#"
query ($season: MediaSeason, $seasonYear: Int, $page: Int, $perPage: Int, $charactersPerPage: Int) {
    Page(page: $page, perPage: $perPage) {
        pageInfo { total perPage currentPage lastPage hasNextPage }
        media(season: $season, seasonYear: $seasonYear, type: ANIME, sort: START_DATE) {
            id
            title {
                english(stylised: true)
                romaji(stylised: true)
                native(stylised: true)
            }
            characters(page: 1, perPage: $charactersPerPage) {
                pageInfo { total perPage currentPage lastPage hasNextPage }
                edges {
                    role
                    voiceActors(language: JAPANESE) {
                        id
                        name { full }
                        image { large }
                        siteUrl
                    }
                    node {
                        id
                        name { full native }
                    }
                }
            }
        }
    }
}
"#;

const CHARACTERS_QUERY: &str = r#"
query ($id: Int, $page: Int, $perPage: Int) {
    Media(id: $id) {
        id
        characters(page: $page, perPage: $perPage) {
            pageInfo { total perPage currentPage lastPage hasNextPage }
            edges {
                role
                voiceActors(language: JAPANESE) {
                    id
                    name { full }
                    image { large }
                    siteUrl
                }
                node {
                    id
                    name { full native }
                }
            }
        }
    }
}
"#;

/// Which season to list. Without a season the whole year is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonVariables {
    pub season_year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<MediaSeason>,
}

/// Page sizes and pacing for an [`AniListClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub media_per_page: u32,
    pub characters_per_page: u32,
    pub pagination: PaginationSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            // AniList caps perPage at 50.
            media_per_page: 50,
            characters_per_page: 25,
            pagination: PaginationSettings::default(),
        }
    }
}

struct SeasonQuery {
    variables: SeasonVariables,
    per_page: u32,
    characters_per_page: u32,
}

impl PagedQuery for SeasonQuery {
    type Item = SeasonMedia;

    fn operation(&self) -> &'static str {
        "SeasonMedia"
    }

    fn request(&self, page: u32) -> GraphQLRequest {
        let mut variables = serde_json::json!({
            "seasonYear": self.variables.season_year,
            "page": page,
            "perPage": self.per_page,
            "charactersPerPage": self.characters_per_page,
        });
        if let Some(season) = self.variables.season {
            variables["season"] = serde_json::json!(season.to_anilist_str());
        }
        GraphQLRequest {
            query: SEASON_QUERY,
            variables,
        }
    }

    fn extract(&self, body: serde_json::Value) -> Result<Page<SeasonMedia>, AniListError> {
        let resp: GraphQLResponse<SeasonPageResponse> = serde_json::from_value(body)
            .map_err(|e| AniListError::Parse(format!("{}: {e}", self.operation())))?;
        Ok(Page {
            items: resp.data.page.media,
            page_info: resp.data.page.page_info,
        })
    }
}

struct CharactersQuery {
    media_id: u64,
    per_page: u32,
}

impl PagedQuery for CharactersQuery {
    type Item = CharacterEdge;

    fn operation(&self) -> &'static str {
        "MediaCharacters"
    }

    fn request(&self, page: u32) -> GraphQLRequest {
        GraphQLRequest {
            query: CHARACTERS_QUERY,
            variables: serde_json::json!({
                "id": self.media_id,
                "page": page,
                "perPage": self.per_page,
            }),
        }
    }

    fn extract(&self, body: serde_json::Value) -> Result<Page<CharacterEdge>, AniListError> {
        let resp: GraphQLResponse<MediaCharactersResponse> = serde_json::from_value(body)
            .map_err(|e| AniListError::Parse(format!("{}: {e}", self.operation())))?;
        let characters = resp.data.media.characters;
        Ok(Page {
            items: characters.edges,
            page_info: characters.page_info,
        })
    }
}

/// AniList GraphQL API client for season cast listings.
pub struct AniListClient<T = ReqwestTransport> {
    transport: T,
    settings: ClientSettings,
}

impl AniListClient<ReqwestTransport> {
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::default(), ClientSettings::default())
    }
}

impl Default for AniListClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GraphQLTransport> AniListClient<T> {
    pub fn with_transport(transport: T, settings: ClientSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn paginator<'a>(&'a self, observer: &'a dyn ProgressObserver) -> Paginator<'a, T> {
        Paginator::new(&self.transport, self.settings.pagination, observer)
    }

    /// List the shows of a season, each with its first page of cast edges.
    /// `quick` stops after the first page of shows.
    pub async fn fetch_season(
        &self,
        variables: SeasonVariables,
        quick: bool,
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<SeasonMedia>, AniListError> {
        tracing::debug!(
            season = ?variables.season,
            year = variables.season_year,
            quick,
            "Fetching season listing"
        );
        let query = SeasonQuery {
            variables,
            per_page: self.settings.media_per_page,
            characters_per_page: self.settings.characters_per_page,
        };
        self.paginator(observer).depaginate(&query, 1, quick).await
    }

    /// List every cast edge of one show. `quick` stops after the first page.
    pub async fn fetch_characters(
        &self,
        media_id: u64,
        quick: bool,
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<CharacterEdge>, AniListError> {
        tracing::debug!(media_id, quick, "Fetching character listing");
        let query = CharactersQuery {
            media_id,
            per_page: self.settings.characters_per_page,
        };
        self.paginator(observer).depaginate(&query, 1, quick).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use reqwest::header::HeaderMap;
    use serde_json::json;

    use super::*;
    use crate::traits::{NoopObserver, RawResponse};

    struct ScriptedTransport {
        responses: Mutex<VecDeque<serde_json::Value>>,
        requests: Mutex<Vec<GraphQLRequest>>,
    }

    impl ScriptedTransport {
        fn new(bodies: Vec<serde_json::Value>) -> Self {
            Self {
                responses: Mutex::new(bodies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl GraphQLTransport for ScriptedTransport {
        async fn execute(&self, request: &GraphQLRequest) -> Result<RawResponse, AniListError> {
            self.requests.lock().unwrap().push(request.clone());
            let body = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left");
            Ok(RawResponse {
                status: 200,
                headers: HeaderMap::new(),
                body,
            })
        }
    }

    fn page_info(current: u32, last: u32) -> serde_json::Value {
        json!({
            "total": last * 2,
            "perPage": 2,
            "currentPage": current,
            "lastPage": last,
            "hasNextPage": current < last,
        })
    }

    fn edge(character_id: u64, voice_actor_id: u64) -> serde_json::Value {
        json!({
            "role": "SUPPORTING",
            "voiceActors": [{ "id": voice_actor_id, "name": { "full": "VA" } }],
            "node": { "id": character_id, "name": { "full": "Character" } }
        })
    }

    #[test]
    fn test_season_request_variables() {
        let query = SeasonQuery {
            variables: SeasonVariables {
                season_year: 2021,
                season: Some(MediaSeason::Winter),
            },
            per_page: 50,
            characters_per_page: 25,
        };
        let req = query.request(3);
        assert_eq!(req.variables["season"], "WINTER");
        assert_eq!(req.variables["seasonYear"], 2021);
        assert_eq!(req.variables["page"], 3);
        assert_eq!(req.variables["perPage"], 50);
        assert_eq!(req.variables["charactersPerPage"], 25);
    }

    #[test]
    fn test_whole_year_omits_season() {
        let query = SeasonQuery {
            variables: SeasonVariables {
                season_year: 2021,
                season: None,
            },
            per_page: 50,
            characters_per_page: 25,
        };
        let req = query.request(1);
        assert!(req.variables.get("season").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_characters_depaginates() {
        let transport = ScriptedTransport::new(vec![
            json!({ "data": { "Media": { "id": 7, "characters": {
                "pageInfo": page_info(1, 2),
                "edges": [edge(1, 100), edge(2, 101)]
            } } } }),
            json!({ "data": { "Media": { "id": 7, "characters": {
                "pageInfo": page_info(2, 2),
                "edges": [edge(3, 100)]
            } } } }),
        ]);
        let client = AniListClient::with_transport(transport, ClientSettings::default());

        let edges = client.fetch_characters(7, false, &NoopObserver).await.unwrap();

        let ids: Vec<u64> = edges.iter().map(|e| e.node.as_ref().unwrap().id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let requests = client.transport().requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].variables["id"], 7);
        assert_eq!(requests[1].variables["page"], 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_season_quick_reads_one_page() {
        let transport = ScriptedTransport::new(vec![json!({ "data": { "Page": {
            "pageInfo": page_info(1, 4),
            "media": [{
                "id": 42,
                "title": { "romaji": "Hataraku Saibou!!" },
                "characters": { "pageInfo": page_info(1, 1), "edges": [edge(1, 100)] }
            }]
        } } })]);
        let client = AniListClient::with_transport(transport, ClientSettings::default());

        let media = client
            .fetch_season(
                SeasonVariables {
                    season_year: 2021,
                    season: Some(MediaSeason::Winter),
                },
                true,
                &NoopObserver,
            )
            .await
            .unwrap();

        assert_eq!(media.len(), 1);
        assert_eq!(media[0].preferred_title(), "Hataraku Saibou!!");
        assert_eq!(client.transport().requests.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shape_error_names_operation() {
        let transport = ScriptedTransport::new(vec![json!({ "data": { "Media": null } })]);
        let client = AniListClient::with_transport(transport, ClientSettings::default());

        let err = client
            .fetch_characters(7, false, &NoopObserver)
            .await
            .unwrap_err();
        match err {
            AniListError::Parse(message) => assert!(message.starts_with("MediaCharacters")),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}
