//! # Domain Models
//!
//! These structs represent the core entities of Rusty-Jokes.
//! We use UUID v7 for time-ordered, globally unique identification.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// A registered user. Jokes, ratings and comments only point back at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Avatar URL, if the user uploaded one
    pub image: Option<String>,
}

/// The primary content entity. Owned by its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joke {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Bumped on edit; the feed is ordered by this
    pub updated_at: DateTime<Utc>,
}

/// A star value in `1..=5`. Cannot be constructed with anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Stars(u8);

impl Stars {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Returned when a value falls outside `1..=5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarsOutOfRange(pub i64);

impl fmt::Display for StarsOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rating must be between {} and {}, got {}", Stars::MIN, Stars::MAX, self.0)
    }
}

impl std::error::Error for StarsOutOfRange {}

impl TryFrom<i64> for Stars {
    type Error = StarsOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Stars::MIN)..=i64::from(Stars::MAX)).contains(&value) {
            Ok(Stars(value as u8))
        } else {
            Err(StarsOutOfRange(value))
        }
    }
}

impl From<Stars> for u8 {
    fn from(stars: Stars) -> u8 {
        stars.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// At most one per (user_id, joke_id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub joke_id: Uuid,
    pub value: Stars,
}

/// At most one per (user_id, joke_id), same as [`Rating`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub joke_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A joke row joined with its author, as shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub joke: Joke,
    pub username: String,
    pub image: Option<String>,
}

/// A comment row joined with its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentEntry {
    pub comment: Comment,
    pub username: String,
    pub image: Option<String>,
}
