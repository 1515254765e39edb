//! Plain-text rendering of a query result.

use std::collections::BTreeSet;
use std::fmt::Write;

use seiyuu_core::models::{QueryResult, VoiceActorSummary};

const NAME_WIDTH: usize = 28;

/// Pad or cut `s` to exactly `width` characters.
fn fit(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count > width {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{cut}…")
    } else {
        format!("{s}{}", " ".repeat(width - count))
    }
}

fn distinct_shows(summary: &VoiceActorSummary) -> usize {
    summary.show_ids.iter().collect::<BTreeSet<_>>().len()
}

/// Table of the first `limit` voice actors, in result order.
pub fn table(result: &QueryResult, limit: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {}  {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
        "#",
        fit("Voice actor", NAME_WIDTH),
        "All",
        "Main",
        "Supp",
        "Bg",
        "N/A",
        "Shows"
    );

    for (rank, s) in result.seiyuu_summaries.iter().take(limit).enumerate() {
        let name = s
            .full_name
            .clone()
            .unwrap_or_else(|| format!("#{}", s.id));
        let _ = writeln!(
            out,
            "{:>4}  {}  {:>5} {:>5} {:>5} {:>5} {:>5} {:>5}",
            rank + 1,
            fit(&name, NAME_WIDTH),
            s.all_roles,
            s.main_roles,
            s.supporting_roles,
            s.background_roles,
            s.unclassified_roles,
            distinct_shows(s)
        );
    }

    let _ = writeln!(
        out,
        "{} voice actors across {} shows",
        result.seiyuu_summaries.len(),
        result.shows.len()
    );
    out
}
