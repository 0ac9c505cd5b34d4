//! Stored record types for the five collections.

use chrono::NaiveDate;
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use strive_core::{Activity, LeaderboardEntry, RecordId, Team, User, Workout};

/// Stored user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredUser {
    /// Primary key - user ID.
    #[primary_key]
    pub id: u64,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl StoredUser {
    /// Create from a domain user.
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.raw(),
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
        }
    }

    /// Convert to a domain user.
    pub fn to_user(&self) -> User {
        User {
            id: RecordId::new(self.id),
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Stored team row; members are kept canonical (a plain list of
/// usernames) by the write paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredTeam {
    /// Primary key - team ID.
    #[primary_key]
    pub id: u64,
    pub name: String,
    pub members: Vec<String>,
}

impl StoredTeam {
    /// Create from a domain team.
    pub fn from_team(team: &Team) -> Self {
        Self {
            id: team.id.raw(),
            name: team.name.clone(),
            members: team.members.clone(),
        }
    }

    /// Convert to a domain team.
    pub fn to_team(&self) -> Team {
        Team {
            id: RecordId::new(self.id),
            name: self.name.clone(),
            members: self.members.clone(),
        }
    }
}

/// Stored activity row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredActivity {
    /// Primary key - activity ID.
    #[primary_key]
    pub id: u64,
    /// Username that logged the activity.
    #[secondary_key]
    pub user: String,
    pub activity_type: String,
    pub duration: f64,
    pub date: NaiveDate,
}

impl StoredActivity {
    /// Create from a domain activity.
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            id: activity.id.raw(),
            user: activity.user.clone(),
            activity_type: activity.activity_type.clone(),
            duration: activity.duration,
            date: activity.date,
        }
    }

    /// Convert to a domain activity.
    pub fn to_activity(&self) -> Activity {
        Activity {
            id: RecordId::new(self.id),
            user: self.user.clone(),
            activity_type: self.activity_type.clone(),
            duration: self.duration,
            date: self.date,
        }
    }
}

/// Stored leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 4, version = 1)]
#[native_db]
pub struct StoredLeaderboardEntry {
    /// Primary key - entry ID.
    #[primary_key]
    pub id: u64,
    pub user: String,
    pub score: i64,
}

impl StoredLeaderboardEntry {
    /// Create from a domain entry.
    pub fn from_entry(entry: &LeaderboardEntry) -> Self {
        Self {
            id: entry.id.raw(),
            user: entry.user.clone(),
            score: entry.score,
        }
    }

    /// Convert to a domain entry.
    pub fn to_entry(&self) -> LeaderboardEntry {
        LeaderboardEntry {
            id: RecordId::new(self.id),
            user: self.user.clone(),
            score: self.score,
        }
    }
}

/// Stored workout row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 5, version = 1)]
#[native_db]
pub struct StoredWorkout {
    /// Primary key - workout ID.
    #[primary_key]
    pub id: u64,
    pub name: String,
    pub description: String,
    pub exercises: Vec<String>,
}

impl StoredWorkout {
    /// Create from a domain workout.
    pub fn from_workout(workout: &Workout) -> Self {
        Self {
            id: workout.id.raw(),
            name: workout.name.clone(),
            description: workout.description.clone(),
            exercises: workout.exercises.clone(),
        }
    }

    /// Convert to a domain workout.
    pub fn to_workout(&self) -> Workout {
        Workout {
            id: RecordId::new(self.id),
            name: self.name.clone(),
            description: self.description.clone(),
            exercises: self.exercises.clone(),
        }
    }
}
