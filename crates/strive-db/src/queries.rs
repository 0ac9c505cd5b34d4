//! Read-time queries across collections.
//!
//! Derived data is never stored. A user's team and a leaderboard row's
//! calorie total are recomputed from the related collections on every
//! read, so there is no cache to invalidate.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use std::collections::BTreeMap;
use strive_core::{estimate_calories, Activity, LeaderboardEntry, RecordId, Team};

impl Store {
    /// Find the team whose member list contains the username.
    ///
    /// Teams are scanned in ID order, so if a username erroneously sits
    /// in several teams the lowest ID wins. That ordering is incidental;
    /// [`Store::membership_violations`] reports such data.
    pub fn team_for_member(&self, username: &str) -> Result<Option<Team>> {
        Ok(self
            .all_teams()?
            .into_iter()
            .find(|t| t.has_member(username)))
    }

    /// Team name for a username, or `"N/A"` when the user has no team.
    pub fn team_name_for_member(&self, username: &str) -> Result<String> {
        Ok(self
            .team_for_member(username)?
            .map(|t| t.name)
            .unwrap_or_else(|| "N/A".to_string()))
    }

    /// All activities logged under a username.
    pub fn activities_for(&self, username: &str) -> Result<Vec<Activity>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredActivity>(StoredActivityKey::user)?;
        let iter = scan.start_with(username)?;
        let rows: std::result::Result<Vec<StoredActivity>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        // start_with matches by prefix; keep exact usernames only
        Ok(rows
            .into_iter()
            .filter(|a| a.user == username)
            .map(|a| a.to_activity())
            .collect())
    }

    /// Estimated calories burned by a username across all activities.
    pub fn total_calories_for(&self, username: &str) -> Result<i64> {
        let minutes = self
            .activities_for(username)?
            .into_iter()
            .map(|a| a.duration);
        Ok(estimate_calories(minutes))
    }

    /// All leaderboard entries, highest score first; ties keep ID order.
    pub fn leaderboard_sorted(&self) -> Result<Vec<LeaderboardEntry>> {
        let mut entries = self.all_leaderboard_entries()?;
        entries.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.raw().cmp(&b.id.raw())));
        Ok(entries)
    }

    /// Usernames that appear in more than one member list, with the IDs
    /// of the teams carrying them (a team repeats when it lists the same
    /// name twice).
    pub fn membership_violations(&self) -> Result<Vec<(String, Vec<RecordId>)>> {
        let mut seen: BTreeMap<String, Vec<RecordId>> = BTreeMap::new();
        for team in self.all_teams()? {
            for member in &team.members {
                seen.entry(member.clone()).or_default().push(team.id);
            }
        }
        Ok(seen
            .into_iter()
            .filter(|(_, teams)| teams.len() > 1)
            .collect())
    }

    /// True when a user other than `exclude` already has this username.
    pub fn username_taken(&self, username: &str, exclude: Option<RecordId>) -> Result<bool> {
        Ok(self
            .all_users()?
            .iter()
            .any(|u| u.username == username && Some(u.id) != exclude))
    }

    /// True when a user other than `exclude` already has this email.
    pub fn email_taken(&self, email: &str, exclude: Option<RecordId>) -> Result<bool> {
        Ok(self
            .all_users()?
            .iter()
            .any(|u| u.email == email && Some(u.id) != exclude))
    }

    /// True when a team other than `exclude` already has this name.
    pub fn team_name_taken(&self, name: &str, exclude: Option<RecordId>) -> Result<bool> {
        Ok(self
            .all_teams()?
            .iter()
            .any(|t| t.name == name && Some(t.id) != exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use strive_core::User;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn activity(user: &str, minutes: f64) -> Activity {
        Activity {
            id: RecordId::default(),
            user: user.to_string(),
            activity_type: "running".to_string(),
            duration: minutes,
            date: day(10),
        }
    }

    fn team(name: &str, members: &[&str]) -> Team {
        Team {
            id: RecordId::default(),
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_team_for_member() {
        let store = Store::in_memory().unwrap();
        store.insert_team(team("Dawn Patrol", &["mara"])).unwrap();
        let hit = store.insert_team(team("Night Shift", &["lena"])).unwrap();

        let found = store.team_for_member("lena").unwrap().unwrap();
        assert_eq!(found.id, hit.id);
        assert!(store.team_for_member("nobody").unwrap().is_none());
    }

    #[test]
    fn test_team_name_sentinel() {
        let store = Store::in_memory().unwrap();
        store.insert_team(team("Dawn Patrol", &["mara"])).unwrap();
        assert_eq!(store.team_name_for_member("mara").unwrap(), "Dawn Patrol");
        assert_eq!(store.team_name_for_member("lena").unwrap(), "N/A");
    }

    #[test]
    fn test_activities_for_matches_exact_username() {
        let store = Store::in_memory().unwrap();
        store.insert_activity(activity("ann", 30.0)).unwrap();
        store.insert_activity(activity("anna", 60.0)).unwrap();

        let anns = store.activities_for("ann").unwrap();
        assert_eq!(anns.len(), 1);
        assert_eq!(anns[0].duration, 30.0);
    }

    #[test]
    fn test_total_calories() {
        let store = Store::in_memory().unwrap();
        store.insert_activity(activity("mara", 30.0)).unwrap();
        store.insert_activity(activity("mara", 45.0)).unwrap();
        store.insert_activity(activity("lena", 90.0)).unwrap();

        assert_eq!(store.total_calories_for("mara").unwrap(), 750);
        assert_eq!(store.total_calories_for("nobody").unwrap(), 0);
    }

    #[test]
    fn test_leaderboard_sorted() {
        let store = Store::in_memory().unwrap();
        let entry = |user: &str, score: i64| LeaderboardEntry {
            id: RecordId::default(),
            user: user.to_string(),
            score,
        };
        store.insert_leaderboard_entry(entry("mara", 70)).unwrap();
        store.insert_leaderboard_entry(entry("lena", 95)).unwrap();
        store.insert_leaderboard_entry(entry("jonas", 70)).unwrap();

        let sorted = store.leaderboard_sorted().unwrap();
        let order: Vec<&str> = sorted.iter().map(|e| e.user.as_str()).collect();
        assert_eq!(order, vec!["lena", "mara", "jonas"]);
    }

    #[test]
    fn test_membership_violations() {
        let store = Store::in_memory().unwrap();
        let a = store
            .insert_team(team("Dawn Patrol", &["mara", "jonas"]))
            .unwrap();
        let b = store
            .insert_team(team("Night Shift", &["mara", "lena"]))
            .unwrap();

        let violations = store.membership_violations().unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].0, "mara");
        assert_eq!(violations[0].1, vec![a.id, b.id]);
    }

    #[test]
    fn test_uniqueness_checks_exclude_self() {
        let store = Store::in_memory().unwrap();
        let mara = store
            .insert_user(User {
                id: RecordId::default(),
                username: "mara".to_string(),
                email: "mara@example.com".to_string(),
                password: "pw".to_string(),
            })
            .unwrap();

        assert!(store.username_taken("mara", None).unwrap());
        assert!(!store.username_taken("mara", Some(mara.id)).unwrap());
        assert!(!store.username_taken("lena", None).unwrap());
        assert!(store.email_taken("mara@example.com", None).unwrap());
    }
}
