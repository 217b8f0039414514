//! # user-activity
//!
//! Fetches users and their posts, counts posts per user, ranks the most
//! active users and writes the result as JSON and CSV reports.
//!
//! ## Usage
//!
//! ```bash
//! user-activity [run] [--top N] [--refresh] [--max-age 1h] [--drop-missing]
//! user-activity show
//! ```
//!
//! ## Modules
//!
//! - `aggregate` - Post counting, user/count join and top-N ranking
//! - `config` - Layered configuration (defaults, TOML, environment)
//! - `error` - Error taxonomy shared by every module
//! - `logging` - Subscriber setup for the binary
//! - `pipeline` - One end-to-end run
//! - `records` - Typed users, posts and enriched records
//! - `report` - CSV export and terminal tables
//! - `source` - Remote fetch, local JSON copies and the cache-or-fetch choice
pub mod aggregate;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod records;
pub mod report;
pub mod source;

pub use error::{Error, Result};
