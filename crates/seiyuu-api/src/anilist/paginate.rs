//! Generic depagination over AniList `pageInfo` listings.
//!
//! Both the season listing and the per-show character listing go through
//! [`Paginator::depaginate`]; a [`PagedQuery`] supplies the request for a
//! page number and pulls `{items, pageInfo}` out of the response body.

use std::time::Duration;

use reqwest::header::HeaderMap;
use tracing::{debug, warn};

use super::error::AniListError;
use super::types::PageInfo;
use crate::traits::{GraphQLRequest, GraphQLTransport, ProgressObserver, RawResponse};

/// Epoch-seconds time at which the rate-limit window resets.
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Upper bound on pages per listing, in case the server never reports a last page.
const MAX_PAGES: u32 = 10_000;

const TOO_MANY_REQUESTS: u16 = 429;

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

/// A paged GraphQL listing.
pub trait PagedQuery {
    type Item;

    /// Name used in log events.
    fn operation(&self) -> &'static str;

    /// Build the request for `page` (1-based).
    fn request(&self, page: u32) -> GraphQLRequest;

    /// Extract the page's items and `pageInfo` from a successful response body.
    fn extract(&self, body: serde_json::Value) -> Result<Page<Self::Item>, AniListError>;
}

/// Request pacing and rate-limit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    /// Pause between two successful page fetches.
    pub inter_page_delay: Duration,
    /// Longest rate-limit pause we are willing to wait out.
    pub rate_limit_ceiling: Duration,
    /// Pause used when the reset header is missing or unparseable.
    pub rate_limit_fallback: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            inter_page_delay: Duration::from_millis(125),
            rate_limit_ceiling: Duration::from_secs(90),
            rate_limit_fallback: Duration::from_secs(60),
        }
    }
}

/// Drives a [`PagedQuery`] to completion, one request at a time.
pub struct Paginator<'a, T> {
    transport: &'a T,
    settings: PaginationSettings,
    observer: &'a dyn ProgressObserver,
}

impl<'a, T: GraphQLTransport> Paginator<'a, T> {
    pub fn new(
        transport: &'a T,
        settings: PaginationSettings,
        observer: &'a dyn ProgressObserver,
    ) -> Self {
        Self {
            transport,
            settings,
            observer,
        }
    }

    /// Concatenate the items of every page from `start_page` through the last
    /// page, in page order. With `first_page_only`, stop after one page.
    pub async fn depaginate<Q: PagedQuery>(
        &self,
        query: &Q,
        start_page: u32,
        first_page_only: bool,
    ) -> Result<Vec<Q::Item>, AniListError> {
        let operation = query.operation();
        let mut items = Vec::new();
        let mut page = start_page.max(1);

        for _ in 0..MAX_PAGES {
            let fetched = self.fetch_page(query, page).await?;
            let info = fetched.page_info;
            debug!(
                operation,
                page = info.current_page,
                last_page = info.last_page,
                per_page = info.per_page,
                total = info.total,
                has_next_page = info.has_next_page,
                "Fetched page"
            );

            items.extend(fetched.items);
            if !info.has_next_page || first_page_only {
                return Ok(items);
            }

            if !self.settings.inter_page_delay.is_zero() {
                tokio::time::sleep(self.settings.inter_page_delay).await;
            }
            page += 1;
        }

        Err(AniListError::Parse(format!(
            "{operation}: still reporting further pages after {MAX_PAGES} pages"
        )))
    }

    /// Fetch a single page, waiting out rate limits below the ceiling.
    async fn fetch_page<Q: PagedQuery>(
        &self,
        query: &Q,
        page: u32,
    ) -> Result<Page<Q::Item>, AniListError> {
        let operation = query.operation();
        let request = query.request(page);

        loop {
            let resp = self.transport.execute(&request).await?;

            if resp.status == TOO_MANY_REQUESTS {
                let delay = retry_delay(
                    &resp.headers,
                    chrono::Utc::now().timestamp(),
                    self.settings.rate_limit_fallback,
                );
                if delay > self.settings.rate_limit_ceiling {
                    warn!(
                        operation,
                        page,
                        retry_after_secs = delay.as_secs(),
                        "Rate limit pause exceeds ceiling, giving up"
                    );
                    return Err(AniListError::RateLimited {
                        retry_after_secs: delay.as_secs(),
                        ceiling_secs: self.settings.rate_limit_ceiling.as_secs(),
                    });
                }

                warn!(
                    operation,
                    page,
                    retry_after_secs = delay.as_secs(),
                    "Rate limited, backing off"
                );
                self.observer.rate_limit_update(true, Some(delay));
                tokio::time::sleep(delay + Duration::from_secs(1)).await;
                continue;
            }

            if !resp.is_success() {
                warn!(operation, page, status = resp.status, "AniList API error");
                return Err(api_error(resp));
            }

            self.observer.rate_limit_update(false, None);
            return query.extract(resp.body);
        }
    }
}

/// Seconds until the `X-RateLimit-Reset` epoch time, or `fallback` when the
/// header is missing or not an integer. Resets in the past give zero.
pub fn retry_delay(headers: &HeaderMap, now_epoch_secs: i64, fallback: Duration) -> Duration {
    headers
        .get(RATE_LIMIT_RESET_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
        .map(|reset| Duration::from_secs(reset.saturating_sub(now_epoch_secs).max(0) as u64))
        .unwrap_or(fallback)
}

fn api_error(resp: RawResponse) -> AniListError {
    let message = match resp.body {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    };
    AniListError::Api {
        status: resp.status,
        message,
    }
}
