//! Demo fixtures for local development.
//!
//! `populate` wipes the store and loads a small superhero-themed data
//! set: eight users split over two teams, one activity and one
//! leaderboard row per user, and four workout plans.

use chrono::NaiveDate;
use strive_core::{Activity, LeaderboardEntry, RecordId, Team, User, Workout};
use strive_db::{Result, Store};

/// Replace whatever is in the store with the demo data set.
pub fn populate(store: &Store) -> Result<()> {
    store.clear_all()?;

    let users: &[(&str, &str, &str)] = &[
        ("tony_stark", "tony@avengers.com", "ironman123"),
        ("peter_parker", "peter@avengers.com", "spidey123"),
        ("natasha_romanoff", "natasha@avengers.com", "blackwidow123"),
        ("bruce_banner", "bruce@avengers.com", "hulk123"),
        ("bruce_wayne", "bruce@gotham.com", "batman123"),
        ("clark_kent", "clark@dailyplanet.com", "superman123"),
        ("diana_prince", "diana@themyscira.com", "wonderwoman123"),
        ("barry_allen", "barry@centralcity.com", "flash123"),
    ];
    for (username, email, password) in users {
        store.insert_user(User {
            id: RecordId::default(),
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })?;
    }

    let teams: &[(&str, &[&str])] = &[
        (
            "Team Marvel",
            &["tony_stark", "peter_parker", "natasha_romanoff", "bruce_banner"],
        ),
        (
            "Team DC",
            &["bruce_wayne", "clark_kent", "diana_prince", "barry_allen"],
        ),
    ];
    for (name, members) in teams {
        store.insert_team(Team {
            id: RecordId::default(),
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        })?;
    }

    let activities: &[(&str, &str, f64, u32)] = &[
        ("tony_stark", "Running", 30.0, 20),
        ("peter_parker", "Cycling", 45.0, 21),
        ("natasha_romanoff", "Martial Arts", 60.0, 22),
        ("bruce_banner", "Yoga", 50.0, 23),
        ("bruce_wayne", "Strength Training", 75.0, 20),
        ("clark_kent", "Running", 20.0, 21),
        ("diana_prince", "Archery", 40.0, 22),
        ("barry_allen", "Sprinting", 15.0, 23),
    ];
    for (user, kind, duration, day) in activities {
        store.insert_activity(Activity {
            id: RecordId::default(),
            user: user.to_string(),
            activity_type: kind.to_string(),
            duration: *duration,
            date: NaiveDate::from_ymd_opt(2026, 2, *day).expect("valid fixture date"),
        })?;
    }

    let scores: &[(&str, i64)] = &[
        ("tony_stark", 900),
        ("peter_parker", 850),
        ("natasha_romanoff", 950),
        ("bruce_banner", 800),
        ("bruce_wayne", 980),
        ("clark_kent", 870),
        ("diana_prince", 930),
        ("barry_allen", 910),
    ];
    for (user, score) in scores {
        store.insert_leaderboard_entry(LeaderboardEntry {
            id: RecordId::default(),
            user: user.to_string(),
            score: *score,
        })?;
    }

    let workouts: &[(&str, &str, &[&str])] = &[
        (
            "Iron Man Conditioning",
            "High-intensity full-body workout inspired by Tony Stark",
            &["push-ups", "pull-ups", "plank", "burpees", "deadlifts"],
        ),
        (
            "Spider Agility Drill",
            "Agility and flexibility workout inspired by Spider-Man",
            &["jump rope", "lateral shuffles", "box jumps", "stretching"],
        ),
        (
            "Bat Endurance Circuit",
            "Endurance and strength circuit inspired by Batman",
            &["chin-ups", "dips", "running", "squats", "resistance training"],
        ),
        (
            "Speed Force Cardio",
            "Lightning-fast cardio session inspired by The Flash",
            &["sprints", "high knees", "treadmill intervals", "cycling"],
        ),
    ];
    for (name, description, exercises) in workouts {
        store.insert_workout(Workout {
            id: RecordId::default(),
            name: name.to_string(),
            description: description.to_string(),
            exercises: exercises.iter().map(|e| e.to_string()).collect(),
        })?;
    }

    tracing::info!("demo data loaded");
    Ok(())
}
