//! Joining users with their post counts

use crate::error::{Error, Result};
use crate::records::{ActivityCount, EnrichedUserRecord, User};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// What to do with a user that has no entry in the [`ActivityCount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingCountPolicy {
    /// Keep the user with `posts_count = 0`.
    #[default]
    ZeroFill,
    /// Leave the user out of the enriched list.
    Drop,
}

impl std::str::FromStr for MissingCountPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero-fill" | "zero" => Ok(Self::ZeroFill),
            "drop" => Ok(Self::Drop),
            other => Err(Error::Config(format!(
                "Unknown missing count policy '{other}' (expected 'zero-fill' or 'drop')"
            ))),
        }
    }
}

impl MissingCountPolicy {
    /// Resolve a looked-up count under this policy.
    pub fn resolve(self, count: Option<usize>) -> Option<usize> {
        match (self, count) {
            (_, Some(count)) => Some(count),
            (Self::ZeroFill, None) => Some(0),
            (Self::Drop, None) => None,
        }
    }
}

/// Build one enriched record.
///
/// Returns `Ok(None)` when either input is absent. A user without
/// `address.city` is a [`Error::MissingField`].
pub fn build_enriched_record(
    user: Option<&User>,
    count: Option<usize>,
) -> Result<Option<EnrichedUserRecord>> {
    let (Some(user), Some(count)) = (user, count) else {
        debug!("No user or count provided, record not built");
        return Ok(None);
    };

    let address = user.address.as_ref().ok_or(Error::MissingField {
        user_id: user.id,
        field: "address",
    })?;
    let city = address.city.as_ref().ok_or(Error::MissingField {
        user_id: user.id,
        field: "address.city",
    })?;

    Ok(Some(EnrichedUserRecord {
        user_id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        city: city.clone(),
        posts_count: count,
    }))
}

/// Join every user with its count, in user order.
///
/// Users whose record cannot be built are logged and skipped. Duplicate user
/// ids keep only the first occurrence that yields a record (or is dropped by
/// the policy) so `user_id` stays unique.
pub fn join_users_with_counts(
    users: &[User],
    counts: &ActivityCount,
    policy: MissingCountPolicy,
) -> Vec<EnrichedUserRecord> {
    if users.is_empty() || counts.is_empty() {
        warn!("No data provided to create users posts list");
        return Vec::new();
    }

    let mut seen = std::collections::HashSet::with_capacity(users.len());
    let mut enriched = Vec::with_capacity(users.len());

    for user in users {
        if seen.contains(&user.id) {
            warn!("Duplicate user id {}, keeping the first occurrence", user.id);
            continue;
        }

        let count = policy.resolve(counts.get(&user.id).copied());
        match build_enriched_record(Some(user), count) {
            Ok(Some(record)) => {
                seen.insert(user.id);
                enriched.push(record);
            }
            Ok(None) => {
                seen.insert(user.id);
                debug!("User {} has no posts, dropped", user.id);
            }
            // a broken record does not claim its id
            Err(e) if e.is_structural() => warn!("Skipping user {}: {}", user.id, e),
            Err(e) => error!("Failed to build record for user {}: {}", user.id, e),
        }
    }

    info!("Users posts list created with {} record(s)", enriched.len());
    enriched
}
