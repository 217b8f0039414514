//! Post counting

use crate::records::{ActivityCount, Post};
use tracing::{debug, info, warn};

/// Count posts per owning user id.
///
/// Posts without a `userId` are not attributed to anyone.
pub fn count_posts(posts: &[Post]) -> ActivityCount {
    if posts.is_empty() {
        warn!("No posts data provided to create posts count");
        return ActivityCount::new();
    }

    let mut counts = ActivityCount::new();
    let mut unowned = 0usize;
    for post in posts {
        match post.user_id {
            Some(user_id) => *counts.entry(user_id).or_insert(0) += 1,
            None => unowned += 1,
        }
    }

    if unowned > 0 {
        debug!("{} post(s) had no userId and were not counted", unowned);
    }
    info!("Counted posts for {} user(s)", counts.len());
    counts
}
