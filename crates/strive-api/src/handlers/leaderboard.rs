//! /api/leaderboard/ handlers

use super::take_text;
use crate::error::ApiError;
use crate::respond;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use strive_core::{LeaderboardEntry, RecordId};
use strive_db::Store;

/// Inbound fields; a missing score defaults to zero.
#[derive(Debug, Deserialize)]
pub struct LeaderboardPayload {
    pub user: Option<String>,
    pub score: Option<i64>,
}

/// Outbound leaderboard row with both computed fields attached.
#[derive(Debug, Serialize)]
pub struct LeaderboardView {
    pub id: String,
    pub user: String,
    pub score: i64,
    /// Team name, or "N/A" when the user is in no team
    pub team: String,
    /// Estimated calories across all of the user's activities
    pub total_calories: i64,
}

fn view(store: &Store, entry: &LeaderboardEntry) -> Result<LeaderboardView, ApiError> {
    Ok(LeaderboardView {
        id: entry.id.to_string(),
        user: entry.user.clone(),
        score: entry.score,
        team: store.team_name_for_member(&entry.user)?,
        total_calories: store.total_calories_for(&entry.user)?,
    })
}

fn validate(
    payload: &LeaderboardPayload,
    exclude: Option<RecordId>,
) -> Result<LeaderboardEntry, ApiError> {
    let mut errors = Vec::new();
    let user = take_text("user", payload.user.as_deref(), &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(LeaderboardEntry {
        id: exclude.unwrap_or_default(),
        user,
        score: payload.score.unwrap_or(0),
    })
}

/// GET /api/leaderboard/ - rows sorted by descending score.
pub fn list(store: &Store) -> Result<Response<Full<Bytes>>, ApiError> {
    let mut views = Vec::new();
    for entry in store.leaderboard_sorted()? {
        views.push(view(store, &entry)?);
    }
    Ok(respond::json(StatusCode::OK, &views))
}

/// POST /api/leaderboard/
pub fn create(store: &Store, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let payload: LeaderboardPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let entry = validate(&payload, None)?;
    let created = store.insert_leaderboard_entry(entry)?;
    Ok(respond::json(StatusCode::CREATED, &view(store, &created)?))
}

/// GET /api/leaderboard/{id}/
pub fn retrieve(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    let entry = store
        .get_leaderboard_entry(id)?
        .ok_or_else(|| strive_db::Error::not_found("Leaderboard entry"))?;
    Ok(respond::json(StatusCode::OK, &view(store, &entry)?))
}

/// PUT /api/leaderboard/{id}/
pub fn update(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    store
        .get_leaderboard_entry(id)?
        .ok_or_else(|| strive_db::Error::not_found("Leaderboard entry"))?;
    let payload: LeaderboardPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let entry = validate(&payload, Some(id))?;
    store.update_leaderboard_entry(&entry)?;
    Ok(respond::json(StatusCode::OK, &view(store, &entry)?))
}

/// PATCH /api/leaderboard/{id}/
pub fn patch(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let existing = store
        .get_leaderboard_entry(id)?
        .ok_or_else(|| strive_db::Error::not_found("Leaderboard entry"))?;
    let payload: LeaderboardPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let merged = LeaderboardPayload {
        user: payload.user.or(Some(existing.user)),
        score: payload.score.or(Some(existing.score)),
    };
    let entry = validate(&merged, Some(id))?;
    store.update_leaderboard_entry(&entry)?;
    Ok(respond::json(StatusCode::OK, &view(store, &entry)?))
}

/// DELETE /api/leaderboard/{id}/
pub fn destroy(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    store.delete_leaderboard_entry(id)?;
    Ok(respond::no_content())
}
