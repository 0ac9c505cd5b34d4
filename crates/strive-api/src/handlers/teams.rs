//! /api/teams/ handlers

use super::take_text;
use crate::error::ApiError;
use crate::respond;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strive_core::{normalize_list, RecordId, Team, ValidationError};
use strive_db::Store;

/// Inbound fields; `members` accepts any JSON shape and is normalized
/// before anything touches the store.
#[derive(Debug, Deserialize)]
pub struct TeamPayload {
    pub name: Option<String>,
    pub members: Option<Value>,
}

/// Outbound team record; members are always a list of strings.
#[derive(Debug, Serialize)]
pub struct TeamView {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
}

fn view(team: &Team) -> TeamView {
    TeamView {
        id: team.id.to_string(),
        name: team.name.clone(),
        members: team.members.clone(),
    }
}

fn validate(
    store: &Store,
    payload: &TeamPayload,
    exclude: Option<RecordId>,
) -> Result<Team, ApiError> {
    let mut errors = Vec::new();

    let name = take_text("name", payload.name.as_deref(), &mut errors);
    if !name.is_empty() && store.team_name_taken(&name, exclude)? {
        errors.push(ValidationError::new(
            "name",
            "A team with this name already exists.",
        ));
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let members = payload
        .members
        .as_ref()
        .map(normalize_list)
        .unwrap_or_default();
    Ok(Team {
        id: exclude.unwrap_or_default(),
        name,
        members,
    })
}

/// GET /api/teams/
pub fn list(store: &Store) -> Result<Response<Full<Bytes>>, ApiError> {
    let views: Vec<TeamView> = store.all_teams()?.iter().map(view).collect();
    Ok(respond::json(StatusCode::OK, &views))
}

/// POST /api/teams/
pub fn create(store: &Store, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let payload: TeamPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let team = validate(store, &payload, None)?;
    let created = store.insert_team(team)?;
    Ok(respond::json(StatusCode::CREATED, &view(&created)))
}

/// GET /api/teams/{id}/
pub fn retrieve(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    let team = store
        .get_team(id)?
        .ok_or_else(|| strive_db::Error::not_found("Team"))?;
    Ok(respond::json(StatusCode::OK, &view(&team)))
}

/// PUT /api/teams/{id}/
pub fn update(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    store
        .get_team(id)?
        .ok_or_else(|| strive_db::Error::not_found("Team"))?;
    let payload: TeamPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let team = validate(store, &payload, Some(id))?;
    store.update_team(&team)?;
    Ok(respond::json(StatusCode::OK, &view(&team)))
}

/// PATCH /api/teams/{id}/
pub fn patch(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let existing = store
        .get_team(id)?
        .ok_or_else(|| strive_db::Error::not_found("Team"))?;
    let payload: TeamPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let merged = TeamPayload {
        name: payload.name.or(Some(existing.name)),
        members: payload.members.or_else(|| {
            Some(Value::Array(
                existing.members.into_iter().map(Value::String).collect(),
            ))
        }),
    };
    let team = validate(store, &merged, Some(id))?;
    store.update_team(&team)?;
    Ok(respond::json(StatusCode::OK, &view(&team)))
}

/// DELETE /api/teams/{id}/
pub fn destroy(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    store.delete_team(id)?;
    Ok(respond::no_content())
}
