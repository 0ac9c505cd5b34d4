//! Record types for the five collections

use crate::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this user
    pub id: RecordId,
    /// Login name, unique across users
    pub username: String,
    /// Email address, unique across users
    pub email: String,
    /// Stored exactly as supplied; there is no credential handling
    pub password: String,
}

/// A team holding its member list inline
///
/// Membership is a plain list of usernames on the team record. A username
/// is supposed to appear in at most one team; only the assignment
/// operation enforces that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier for this team
    pub id: RecordId,
    /// Team name, unique across teams
    pub name: String,
    /// Usernames of the members, in join order
    pub members: Vec<String>,
}

impl Team {
    /// Check whether a username is in the member list
    pub fn has_member(&self, username: &str) -> bool {
        self.members.iter().any(|m| m == username)
    }
}

/// A single logged activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier for this activity
    pub id: RecordId,
    /// Username of the user who logged it; not checked against the
    /// users collection
    pub user: String,
    /// Free-text kind, e.g. "running"
    pub activity_type: String,
    /// Duration in minutes
    pub duration: f64,
    /// Day the activity took place
    pub date: NaiveDate,
}

/// A leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Unique identifier for this entry
    pub id: RecordId,
    /// Username the score belongs to
    pub user: String,
    /// Accumulated score
    pub score: i64,
}

/// A workout plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier for this workout
    pub id: RecordId,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Exercise names, in execution order
    pub exercises: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_member() {
        let team = Team {
            id: RecordId::new(1),
            name: "Dawn Patrol".to_string(),
            members: vec!["mara".to_string(), "jonas".to_string()],
        };
        assert!(team.has_member("mara"));
        assert!(!team.has_member("mar"));
        assert!(!team.has_member("lena"));
    }
}
