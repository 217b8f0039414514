//! Top-N selection

use crate::records::EnrichedUserRecord;
use tracing::debug;

/// The `n` most active users, highest `posts_count` first.
///
/// The sort is stable, so users with equal counts keep their input order.
pub fn top_active(records: &[EnrichedUserRecord], n: usize) -> Vec<EnrichedUserRecord> {
    if n == 0 || records.is_empty() {
        return Vec::new();
    }

    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.posts_count.cmp(&a.posts_count));
    ranked.truncate(n);

    debug!("Selected top {} of {} record(s)", ranked.len(), records.len());
    ranked
}
