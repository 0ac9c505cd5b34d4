//! Strive Core - Domain types and rules for the fitness tracker
//!
//! This crate provides the storage- and transport-agnostic pieces:
//! - Record types for the five collections (users, teams, activities,
//!   leaderboard entries, workouts)
//! - The member-list normalizer that turns loosely shaped payloads into
//!   a canonical list of usernames
//! - Field validation and the calorie estimation rule

mod calories;
mod identity;
mod membership;
mod record;
mod validate;

pub use calories::{estimate_calories, CALORIES_PER_MINUTE};
pub use identity::RecordId;
pub use membership::normalize_list;
pub use record::{Activity, LeaderboardEntry, Team, User, Workout};
pub use validate::{check_duration, check_email, require_text, ValidationError};
