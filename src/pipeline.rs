//! End-to-end run: load collections, aggregate, rank, write reports

use crate::aggregate::{count_posts, join_users_with_counts, top_active};
use crate::config::Config;
use crate::error::Result;
use crate::records::{decode_posts, decode_users, EnrichedUserRecord};
use crate::report::{export_table, remove_stale, ACTIVITY_CSV, ACTIVITY_JSON, USERS_LIST_CSV};
use crate::source::{cache_or_fetch, save_local, Freshness, Origin, RecordSource};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What a run loaded, derived and wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub users_origin: Origin,
    pub posts_origin: Origin,
    pub users_decoded: usize,
    pub posts_decoded: usize,
    /// Raw elements that did not decode, across both collections
    pub malformed: usize,
    pub enriched: Vec<EnrichedUserRecord>,
    pub ranked: Vec<EnrichedUserRecord>,
    /// Output files written on this run
    pub written: Vec<PathBuf>,
}

impl RunSummary {
    /// Both collections were available from some source.
    pub fn is_complete(&self) -> bool {
        self.users_origin != Origin::Unavailable && self.posts_origin != Origin::Unavailable
    }
}

/// Create the data and output directories.
pub fn prepare_dirs(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.data_dir)?;
    fs::create_dir_all(&config.output_dir)?;
    Ok(())
}

/// Run the whole pipeline once.
///
/// Only directory setup can fail; unavailable collections are treated as
/// empty and reported through [`RunSummary::is_complete`].
pub async fn run(
    config: &Config,
    source: &dyn RecordSource,
    freshness: &dyn Freshness,
) -> Result<RunSummary> {
    info!("Application started");
    prepare_dirs(config)?;

    let users = cache_or_fetch(&config.users_path(), &config.users_url, source, freshness).await;
    let posts = cache_or_fetch(&config.posts_path(), &config.posts_url, source, freshness).await;
    info!("Users loaded from {}, posts loaded from {}", users.origin, posts.origin);
    for (name, loaded) in [("users", &users), ("posts", &posts)] {
        if !loaded.is_available() {
            warn!("No {} available from the endpoint or a local copy", name);
        }
    }

    let decoded_users = decode_users(users.records.as_deref());
    let decoded_posts = decode_posts(posts.records.as_deref());

    let counts = count_posts(&decoded_posts.records);
    let enriched = join_users_with_counts(&decoded_users.records, &counts, config.missing_count);
    let ranked = top_active(&enriched, config.top_n);
    info!(
        "Ranked {} of {} enriched record(s)",
        ranked.len(),
        enriched.len()
    );

    let mut written = Vec::new();
    let activity_json = config.output_dir.join(ACTIVITY_JSON);
    if save_local(&activity_json, Some(&ranked)) {
        written.push(activity_json);
    }
    for (path, rows) in [
        (config.output_dir.join(ACTIVITY_CSV), &ranked),
        (config.output_dir.join(USERS_LIST_CSV), &enriched),
    ] {
        if write_report(&path, rows) {
            written.push(path);
        }
    }

    let summary = RunSummary {
        users_origin: users.origin,
        posts_origin: posts.origin,
        users_decoded: decoded_users.records.len(),
        posts_decoded: decoded_posts.records.len(),
        malformed: decoded_users.skipped + decoded_posts.skipped,
        enriched,
        ranked,
        written,
    };

    if !summary.is_complete() {
        warn!("Run finished without complete source data");
    }
    info!("Application finished");
    Ok(summary)
}

/// Export `rows`, or drop the previous run's file when there are none so the
/// output directory never mixes runs.
fn write_report<T: Serialize>(path: &Path, rows: &[T]) -> bool {
    if rows.is_empty() {
        remove_stale(path);
    }
    export_table(path, rows)
}
