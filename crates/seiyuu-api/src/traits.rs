//! Capabilities the fetch pipeline depends on but does not implement.
//!
//! The HTTP executor and the progress sink are injected so the paginator
//! can be driven by scripted transports in tests and by any UI layer in
//! production.

use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::anilist::AniListError;

/// A GraphQL request body: `{ "query": ..., "variables": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: &'static str,
    pub variables: serde_json::Value,
}

/// Raw response handed back by a transport, before any status handling.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one GraphQL POST and returns status, headers and parsed body.
///
/// Non-success statuses are NOT errors at this level; only transport
/// failures are.
pub trait GraphQLTransport: Send + Sync {
    fn execute(
        &self,
        request: &GraphQLRequest,
    ) -> impl Future<Output = Result<RawResponse, AniListError>> + Send;
}

/// Event sink for fetch progress and rate-limit pauses.
pub trait ProgressObserver: Send + Sync {
    /// `completed` of `total` shows have been fully resolved.
    fn update(&self, completed: usize, total: usize);

    /// Rate limiting started (`active`, with the pause length) or ended.
    fn rate_limit_update(&self, active: bool, retry_after: Option<Duration>);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn update(&self, _completed: usize, _total: usize) {}

    fn rate_limit_update(&self, _active: bool, _retry_after: Option<Duration>) {}
}
