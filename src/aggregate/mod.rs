//! Activity aggregation
//!
//! Pure functions that turn decoded users and posts into ranked activity
//! records:
//!
//! - [`count_posts`] - post count per user id
//! - [`join_users_with_counts`] - users joined with their counts
//! - [`top_active`] - the most active users, ties kept in input order
//!
//! # Example
//!
//! ```rust
//! use user_activity::aggregate::{count_posts, join_users_with_counts, top_active, MissingCountPolicy};
//! use user_activity::records::{Address, Post, User};
//!
//! let users = vec![User {
//!     id: 1,
//!     name: "A".to_string(),
//!     email: "a@x.com".to_string(),
//!     address: Some(Address { city: Some("X".to_string()) }),
//! }];
//! let posts = vec![Post::by(1), Post::by(1)];
//!
//! let counts = count_posts(&posts);
//! let enriched = join_users_with_counts(&users, &counts, MissingCountPolicy::ZeroFill);
//! let top = top_active(&enriched, 5);
//! assert_eq!(top[0].posts_count, 2);
//! ```

pub mod count;
pub mod join;
pub mod rank;

pub use count::count_posts;
pub use join::{build_enriched_record, join_users_with_counts, MissingCountPolicy};
pub use rank::top_active;
