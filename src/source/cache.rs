//! Cache-or-fetch strategy for the raw collections

use super::client::RecordSource;
use super::local::{load_local, save_local};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

/// Decides whether a local copy may be used instead of fetching.
pub trait Freshness {
    fn is_fresh(&self, path: &Path) -> bool;
}

impl<F> Freshness for F
where
    F: Fn(&Path) -> bool,
{
    fn is_fresh(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Stock freshness predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Any existing local copy is reused
    Reuse,
    /// Local copies older than the given age are fetched again
    MaxAge(Duration),
    /// Always fetch
    Refresh,
}

impl Freshness for CachePolicy {
    fn is_fresh(&self, path: &Path) -> bool {
        match self {
            CachePolicy::Reuse => path.exists(),
            CachePolicy::Refresh => false,
            CachePolicy::MaxAge(ttl) => {
                let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
                    return false;
                };
                let age = SystemTime::now()
                    .duration_since(modified)
                    .unwrap_or(Duration::ZERO);
                age <= *ttl
            }
        }
    }
}

/// Where a collection came from on this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fresh local copy
    Cache,
    /// Fetched and persisted
    Remote,
    /// Fetch failed; an outdated local copy was used
    StaleCache,
    /// Neither source had data
    Unavailable,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Origin::Cache => "local copy",
            Origin::Remote => "remote",
            Origin::StaleCache => "stale local copy",
            Origin::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

/// A raw collection together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub records: Option<Vec<Value>>,
    pub origin: Origin,
}

impl Loaded {
    pub fn is_available(&self) -> bool {
        self.origin != Origin::Unavailable
    }
}

/// Read `path` when `freshness` accepts it, otherwise fetch `endpoint` and
/// persist the result to `path`.
///
/// A failed fetch falls back to whatever local copy exists.
pub async fn cache_or_fetch(
    path: &Path,
    endpoint: &str,
    source: &dyn RecordSource,
    freshness: &dyn Freshness,
) -> Loaded {
    if freshness.is_fresh(path) {
        info!("Using local copy {}", path.display());
        if let Some(records) = load_local::<Vec<Value>>(path) {
            return Loaded {
                records: Some(records),
                origin: Origin::Cache,
            };
        }
        warn!(
            "Local copy {} could not be read, fetching instead",
            path.display()
        );
    } else {
        info!("No usable local copy at {}, fetching", path.display());
    }

    if let Some(records) = source.fetch(endpoint).await {
        save_local(path, Some(&records));
        return Loaded {
            records: Some(records),
            origin: Origin::Remote,
        };
    }

    if path.exists() {
        if let Some(records) = load_local::<Vec<Value>>(path) {
            warn!("Fetch failed, falling back to {}", path.display());
            return Loaded {
                records: Some(records),
                origin: Origin::StaleCache,
            };
        }
    }

    warn!("No data available for {}", endpoint);
    Loaded {
        records: None,
        origin: Origin::Unavailable,
    }
}
