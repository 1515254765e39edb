use std::time::Duration;

use seiyuu_api::ProgressObserver;

/// Reports progress and rate-limit pauses as log events.
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn update(&self, completed: usize, total: usize) {
        tracing::info!(completed, total, "Casts resolved");
    }

    fn rate_limit_update(&self, active: bool, retry_after: Option<Duration>) {
        if active {
            let secs = retry_after.map(|d| d.as_secs()).unwrap_or_default();
            tracing::warn!(retry_after_secs = secs, "Rate limited by AniList, waiting");
        } else {
            tracing::trace!("Not rate limited");
        }
    }
}
