//! rusty-jokes/crates/rj-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Rusty-Jokes:
//! interaction upserts, rating statistics and relative timestamps.

pub mod models;
pub mod traits;
pub mod error;
pub mod validation;
pub mod interaction;
pub mod stats;
pub mod time_ago;
pub mod jokes;
pub mod users;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;
pub use interaction::{record_interaction, InteractionOutcome, Upsert};
pub use stats::RatingStats;
pub use time_ago::time_ago;
pub use users::require_user;
