use tracing::{debug, info};

use seiyuu_api::anilist::client::SeasonVariables;
use seiyuu_api::{AniListClient, GraphQLTransport, ProgressObserver};

use crate::aggregate::{aggregate, ShowCast};
use crate::error::SeiyuuError;
use crate::models::{QueryResult, SummaryOrder};

/// Inputs for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Read only the first page of shows and of each show's cast.
    pub quick: bool,
    pub variables: SeasonVariables,
    pub order: SummaryOrder,
}

/// Fetch a season, complete every show's cast and aggregate role counts.
///
/// Shows are resolved one after another so that at most one request is in
/// flight. `observer.update` fires once with zero and then once per show.
/// Any fetch failure aborts the whole run.
pub async fn run_query<T: GraphQLTransport>(
    client: &AniListClient<T>,
    options: &QueryOptions,
    observer: &dyn ProgressObserver,
) -> Result<QueryResult, SeiyuuError> {
    let media = client
        .fetch_season(options.variables, options.quick, observer)
        .await?;

    let total = media.len();
    info!(total, "Shows this season");
    observer.update(0, total);

    let mut shows = Vec::with_capacity(total);
    for (index, medium) in media.into_iter().enumerate() {
        let info = medium.characters.page_info;
        debug!(
            media_id = medium.id,
            page = info.current_page,
            last_page = info.last_page,
            total = info.total,
            has_next_page = info.has_next_page,
            "Resolving cast"
        );

        let mut show = ShowCast::from(medium);
        // In quick mode the embedded page already is the first page.
        if info.has_next_page && !options.quick {
            show.edges = client.fetch_characters(show.id, false, observer).await?;
            debug!(media_id = show.id, edges = show.edges.len(), "Cast depaginated");
        }
        shows.push(show);

        observer.update(index + 1, total);
    }

    shows.retain(|show| !show.edges.is_empty());
    info!(
        with_cast = shows.len(),
        total, "Shows for which character info is available"
    );

    Ok(aggregate(&shows, options.order))
}
