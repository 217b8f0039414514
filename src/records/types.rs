//! Type definitions for fetched and derived records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A user as returned by the users endpoint.
///
/// Only the fields the reports need are typed; anything else in the payload
/// is ignored. `address` and its `city` are optional so a malformed record
/// surfaces as a [`crate::error::Error::MissingField`] instead of failing the
/// whole collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<Address>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Address {
    #[serde(default)]
    pub city: Option<String>,
}

/// A post as returned by the posts endpoint. Only the owner matters here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Post {
    #[serde(rename = "userId", default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub id: Option<u64>,
}

/// Post count per user id. Users without posts have no entry.
pub type ActivityCount = HashMap<u64, usize>;

/// A user joined with its post count.
///
/// Field order is the column order of the CSV reports.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnrichedUserRecord {
    pub user_id: u64,
    pub name: String,
    pub email: String,
    pub city: String,
    pub posts_count: usize,
}

impl User {
    /// City from the nested address, if both are present.
    pub fn city(&self) -> Option<&str> {
        self.address.as_ref()?.city.as_deref()
    }
}

impl Post {
    #[must_use]
    pub fn by(user_id: u64) -> Self {
        Self {
            user_id: Some(user_id),
            id: None,
        }
    }
}
