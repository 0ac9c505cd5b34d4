//! The team assignment operation.
//!
//! Moving a user between teams is the one write that touches several
//! records. It runs in a single write transaction: the engine admits one
//! writer at a time, so two concurrent moves cannot interleave their
//! read-modify-write of a team's member list.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use strive_core::{RecordId, User};

impl Store {
    /// Move a user into a team, or with `None` out of all teams.
    ///
    /// The username is first dropped from every member list it appears
    /// in, including duplicate occurrences. With a target team given,
    /// the username is then appended to that team's list. If the target
    /// does not exist the removals are committed anyway and the call
    /// fails: a failed move leaves the user unassigned rather than back
    /// in the old team.
    pub fn assign_team(&self, user_id: RecordId, team_id: Option<RecordId>) -> Result<User> {
        let rw = self.db.rw_transaction()?;

        let stored: Option<StoredUser> = rw.get().primary(user_id.raw())?;
        let user = match stored {
            Some(s) => s.to_user(),
            None => return Err(Error::not_found("User")),
        };

        let teams: Vec<StoredTeam> = {
            let scan = rw.scan().primary::<StoredTeam>()?;
            let iter = scan.all()?;
            let rows: std::result::Result<Vec<StoredTeam>, _> = iter.collect();
            rows.map_err(|e| Error::Database(e.to_string()))?
        };

        for mut team in teams {
            if team.members.iter().any(|m| m == &user.username) {
                team.members.retain(|m| m != &user.username);
                rw.upsert(team)?;
            }
        }

        if let Some(team_id) = team_id {
            let target: Option<StoredTeam> = rw.get().primary(team_id.raw())?;
            match target {
                Some(mut team) => {
                    if !team.members.iter().any(|m| m == &user.username) {
                        team.members.push(user.username.clone());
                        rw.upsert(team)?;
                    }
                }
                None => {
                    // keep the removals even though the move failed
                    rw.commit()?;
                    return Err(Error::not_found("Team"));
                }
            }
        }

        rw.commit()?;
        Ok(user)
    }
}
