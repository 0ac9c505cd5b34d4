//! Strive DB - Database layer using native_db
//!
//! Provides persistent storage for the five collections (users, teams,
//! activities, leaderboard entries, workouts), the cross-collection
//! read queries behind the computed API fields, and the team assignment
//! operation.

mod assign;
mod error;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use store::Store;
