//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use native_db::*;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;
use strive_core::{Activity, LeaderboardEntry, RecordId, Team, User, Workout};

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredUser>().unwrap();
    models.define::<StoredTeam>().unwrap();
    models.define::<StoredActivity>().unwrap();
    models.define::<StoredLeaderboardEntry>().unwrap();
    models.define::<StoredWorkout>().unwrap();
    models
});

/// Fresh-ID counters, one per collection.
#[derive(Default)]
struct NextIds {
    user: AtomicU64,
    team: AtomicU64,
    activity: AtomicU64,
    entry: AtomicU64,
    workout: AtomicU64,
}

/// Database store for the five collections.
///
/// IDs are assigned by the store: each collection has its own counter,
/// seeded from the largest persisted ID when the database is opened.
pub struct Store {
    pub(crate) db: Database<'static>,
    next: NextIds,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Self::with_db(db)
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Self::with_db(db)
    }

    fn with_db(db: Database<'static>) -> Result<Self> {
        let store = Self {
            db,
            next: NextIds::default(),
        };
        store.seed_counters()?;
        Ok(store)
    }

    fn seed_counters(&self) -> Result<()> {
        let users = self.all_users()?.iter().map(|u| u.id.raw()).max();
        let teams = self.all_teams()?.iter().map(|t| t.id.raw()).max();
        let activities = self.all_activities()?.iter().map(|a| a.id.raw()).max();
        let entries = self
            .all_leaderboard_entries()?
            .iter()
            .map(|e| e.id.raw())
            .max();
        let workouts = self.all_workouts()?.iter().map(|w| w.id.raw()).max();

        self.next.user.store(next_after(users), Ordering::SeqCst);
        self.next.team.store(next_after(teams), Ordering::SeqCst);
        self.next
            .activity
            .store(next_after(activities), Ordering::SeqCst);
        self.next.entry.store(next_after(entries), Ordering::SeqCst);
        self.next
            .workout
            .store(next_after(workouts), Ordering::SeqCst);
        Ok(())
    }

    // --- users ---

    /// Insert a new user, assigning a fresh ID.
    pub fn insert_user(&self, mut user: User) -> Result<User> {
        user.id = RecordId::new(self.next.user.fetch_add(1, Ordering::SeqCst));
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredUser::from_user(&user))?;
        rw.commit()?;
        Ok(user)
    }

    /// Load a user by ID.
    pub fn get_user(&self, id: RecordId) -> Result<Option<User>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredUser> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_user()))
    }

    /// Overwrite an existing user.
    pub fn update_user(&self, user: &User) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let existing: Option<StoredUser> = rw.get().primary(user.id.raw())?;
        if existing.is_none() {
            return Err(Error::not_found("User"));
        }
        rw.upsert(StoredUser::from_user(user))?;
        rw.commit()?;
        Ok(())
    }

    /// Delete a user by ID.
    pub fn delete_user(&self, id: RecordId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredUser> = rw.get().primary(id.raw())?;
        match stored {
            Some(s) => {
                rw.remove(s)?;
                rw.commit()?;
                Ok(())
            }
            None => Err(Error::not_found("User")),
        }
    }

    /// Load all users in ID order.
    pub fn all_users(&self) -> Result<Vec<User>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredUser>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredUser>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|s| s.to_user()).collect())
    }

    // --- teams ---

    /// Insert a new team, assigning a fresh ID.
    pub fn insert_team(&self, mut team: Team) -> Result<Team> {
        team.id = RecordId::new(self.next.team.fetch_add(1, Ordering::SeqCst));
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredTeam::from_team(&team))?;
        rw.commit()?;
        Ok(team)
    }

    /// Load a team by ID.
    pub fn get_team(&self, id: RecordId) -> Result<Option<Team>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredTeam> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_team()))
    }

    /// Overwrite an existing team.
    pub fn update_team(&self, team: &Team) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let existing: Option<StoredTeam> = rw.get().primary(team.id.raw())?;
        if existing.is_none() {
            return Err(Error::not_found("Team"));
        }
        rw.upsert(StoredTeam::from_team(team))?;
        rw.commit()?;
        Ok(())
    }

    /// Delete a team by ID.
    pub fn delete_team(&self, id: RecordId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredTeam> = rw.get().primary(id.raw())?;
        match stored {
            Some(s) => {
                rw.remove(s)?;
                rw.commit()?;
                Ok(())
            }
            None => Err(Error::not_found("Team")),
        }
    }

    /// Load all teams in ID order.
    pub fn all_teams(&self) -> Result<Vec<Team>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredTeam>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredTeam>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|s| s.to_team()).collect())
    }

    // --- activities ---

    /// Insert a new activity, assigning a fresh ID.
    pub fn insert_activity(&self, mut activity: Activity) -> Result<Activity> {
        activity.id = RecordId::new(self.next.activity.fetch_add(1, Ordering::SeqCst));
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredActivity::from_activity(&activity))?;
        rw.commit()?;
        Ok(activity)
    }

    /// Load an activity by ID.
    pub fn get_activity(&self, id: RecordId) -> Result<Option<Activity>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredActivity> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_activity()))
    }

    /// Overwrite an existing activity.
    pub fn update_activity(&self, activity: &Activity) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let existing: Option<StoredActivity> = rw.get().primary(activity.id.raw())?;
        if existing.is_none() {
            return Err(Error::not_found("Activity"));
        }
        rw.upsert(StoredActivity::from_activity(activity))?;
        rw.commit()?;
        Ok(())
    }

    /// Delete an activity by ID.
    pub fn delete_activity(&self, id: RecordId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredActivity> = rw.get().primary(id.raw())?;
        match stored {
            Some(s) => {
                rw.remove(s)?;
                rw.commit()?;
                Ok(())
            }
            None => Err(Error::not_found("Activity")),
        }
    }

    /// Load all activities in ID order.
    pub fn all_activities(&self) -> Result<Vec<Activity>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredActivity>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredActivity>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|s| s.to_activity()).collect())
    }

    // --- leaderboard entries ---

    /// Insert a new leaderboard entry, assigning a fresh ID.
    pub fn insert_leaderboard_entry(&self, mut entry: LeaderboardEntry) -> Result<LeaderboardEntry> {
        entry.id = RecordId::new(self.next.entry.fetch_add(1, Ordering::SeqCst));
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredLeaderboardEntry::from_entry(&entry))?;
        rw.commit()?;
        Ok(entry)
    }

    /// Load a leaderboard entry by ID.
    pub fn get_leaderboard_entry(&self, id: RecordId) -> Result<Option<LeaderboardEntry>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredLeaderboardEntry> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_entry()))
    }

    /// Overwrite an existing leaderboard entry.
    pub fn update_leaderboard_entry(&self, entry: &LeaderboardEntry) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let existing: Option<StoredLeaderboardEntry> = rw.get().primary(entry.id.raw())?;
        if existing.is_none() {
            return Err(Error::not_found("Leaderboard entry"));
        }
        rw.upsert(StoredLeaderboardEntry::from_entry(entry))?;
        rw.commit()?;
        Ok(())
    }

    /// Delete a leaderboard entry by ID.
    pub fn delete_leaderboard_entry(&self, id: RecordId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredLeaderboardEntry> = rw.get().primary(id.raw())?;
        match stored {
            Some(s) => {
                rw.remove(s)?;
                rw.commit()?;
                Ok(())
            }
            None => Err(Error::not_found("Leaderboard entry")),
        }
    }

    /// Load all leaderboard entries in ID order.
    pub fn all_leaderboard_entries(&self) -> Result<Vec<LeaderboardEntry>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredLeaderboardEntry>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredLeaderboardEntry>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|s| s.to_entry()).collect())
    }

    // --- workouts ---

    /// Insert a new workout, assigning a fresh ID.
    pub fn insert_workout(&self, mut workout: Workout) -> Result<Workout> {
        workout.id = RecordId::new(self.next.workout.fetch_add(1, Ordering::SeqCst));
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredWorkout::from_workout(&workout))?;
        rw.commit()?;
        Ok(workout)
    }

    /// Load a workout by ID.
    pub fn get_workout(&self, id: RecordId) -> Result<Option<Workout>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredWorkout> = r.get().primary(id.raw())?;
        Ok(stored.map(|s| s.to_workout()))
    }

    /// Overwrite an existing workout.
    pub fn update_workout(&self, workout: &Workout) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let existing: Option<StoredWorkout> = rw.get().primary(workout.id.raw())?;
        if existing.is_none() {
            return Err(Error::not_found("Workout"));
        }
        rw.upsert(StoredWorkout::from_workout(workout))?;
        rw.commit()?;
        Ok(())
    }

    /// Delete a workout by ID.
    pub fn delete_workout(&self, id: RecordId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredWorkout> = rw.get().primary(id.raw())?;
        match stored {
            Some(s) => {
                rw.remove(s)?;
                rw.commit()?;
                Ok(())
            }
            None => Err(Error::not_found("Workout")),
        }
    }

    /// Load all workouts in ID order.
    pub fn all_workouts(&self) -> Result<Vec<Workout>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredWorkout>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredWorkout>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.into_iter().map(|s| s.to_workout()).collect())
    }

    /// Remove every record from all five collections.
    pub fn clear_all(&self) -> Result<()> {
        let user_ids: Vec<u64> = self.all_users()?.iter().map(|u| u.id.raw()).collect();
        let team_ids: Vec<u64> = self.all_teams()?.iter().map(|t| t.id.raw()).collect();
        let activity_ids: Vec<u64> = self.all_activities()?.iter().map(|a| a.id.raw()).collect();
        let entry_ids: Vec<u64> = self
            .all_leaderboard_entries()?
            .iter()
            .map(|e| e.id.raw())
            .collect();
        let workout_ids: Vec<u64> = self.all_workouts()?.iter().map(|w| w.id.raw()).collect();

        let rw = self.db.rw_transaction()?;
        for id in user_ids {
            if let Some(row) = rw.get().primary::<StoredUser>(id)? {
                rw.remove(row)?;
            }
        }
        for id in team_ids {
            if let Some(row) = rw.get().primary::<StoredTeam>(id)? {
                rw.remove(row)?;
            }
        }
        for id in activity_ids {
            if let Some(row) = rw.get().primary::<StoredActivity>(id)? {
                rw.remove(row)?;
            }
        }
        for id in entry_ids {
            if let Some(row) = rw.get().primary::<StoredLeaderboardEntry>(id)? {
                rw.remove(row)?;
            }
        }
        for id in workout_ids {
            if let Some(row) = rw.get().primary::<StoredWorkout>(id)? {
                rw.remove(row)?;
            }
        }
        rw.commit()?;
        Ok(())
    }
}

fn next_after(max_id: Option<u64>) -> u64 {
    max_id.map_or(1, |m| m + 1)
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User {
            id: RecordId::default(),
            username: name.to_string(),
            email: format!("{name}@example.com"),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = Store::in_memory().unwrap();
        let a = store.insert_user(user("mara")).unwrap();
        let b = store.insert_user(user("jonas")).unwrap();
        assert_eq!(a.id.raw(), 1);
        assert_eq!(b.id.raw(), 2);
    }

    #[test]
    fn test_user_round_trip() {
        let store = Store::in_memory().unwrap();
        let created = store.insert_user(user("mara")).unwrap();

        let loaded = store.get_user(created.id).unwrap().unwrap();
        assert_eq!(loaded, created);

        let mut renamed = loaded.clone();
        renamed.email = "mara@strive.test".to_string();
        store.update_user(&renamed).unwrap();
        assert_eq!(
            store.get_user(created.id).unwrap().unwrap().email,
            "mara@strive.test"
        );

        store.delete_user(created.id).unwrap();
        assert!(store.get_user(created.id).unwrap().is_none());
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = Store::in_memory().unwrap();
        let ghost = User {
            id: RecordId::new(99),
            username: "ghost".to_string(),
            email: "ghost@example.com".to_string(),
            password: "pw".to_string(),
        };
        assert!(matches!(
            store.update_user(&ghost),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let store = Store::in_memory().unwrap();
        assert!(matches!(
            store.delete_team(RecordId::new(7)),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_clear_all() {
        let store = Store::in_memory().unwrap();
        store.insert_user(user("mara")).unwrap();
        store
            .insert_team(Team {
                id: RecordId::default(),
                name: "Dawn Patrol".to_string(),
                members: vec!["mara".to_string()],
            })
            .unwrap();
        store.clear_all().unwrap();
        assert!(store.all_users().unwrap().is_empty());
        assert!(store.all_teams().unwrap().is_empty());
    }
}
