//! Record sources: remote endpoints and local JSON copies
//!
//! - [`RecordSource`] - fetches raw record arrays, [`HttpSource`] over HTTP
//!   and [`MockSource`] for tests
//! - [`load_local`] / [`save_local`] - JSON persistence that never raises
//! - [`cache_or_fetch`] - explicit choice between the local copy and the
//!   remote endpoint, driven by a [`Freshness`] predicate

pub mod cache;
pub mod client;
pub mod local;

pub use cache::{cache_or_fetch, CachePolicy, Freshness, Loaded, Origin};
pub use client::{HttpSource, MockSource, RecordSource};
pub use local::{load_local, read_json, save_local, write_json};
