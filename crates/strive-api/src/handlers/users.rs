//! /api/users/ handlers

use super::take_text;
use crate::error::ApiError;
use crate::respond;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use strive_core::{check_email, RecordId, User, ValidationError};
use strive_db::Store;

/// Inbound fields for create, replace, and patch.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Outbound user record: string ID plus the computed team reference.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub team: Option<TeamRef>,
}

/// The `{id, name}` pair naming a user's current team.
#[derive(Debug, Serialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
}

/// Attach the computed team field; recomputed on every read.
pub(crate) fn view(store: &Store, user: &User) -> Result<UserView, ApiError> {
    let team = store.team_for_member(&user.username)?.map(|t| TeamRef {
        id: t.id.to_string(),
        name: t.name,
    });
    Ok(UserView {
        id: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        password: user.password.clone(),
        team,
    })
}

fn validate(
    store: &Store,
    payload: &UserPayload,
    exclude: Option<RecordId>,
) -> Result<User, ApiError> {
    let mut errors = Vec::new();

    let username = take_text("username", payload.username.as_deref(), &mut errors);
    let email = take_text("email", payload.email.as_deref(), &mut errors);
    let password = take_text("password", payload.password.as_deref(), &mut errors);

    if !email.is_empty() {
        if let Some(e) = check_email("email", &email) {
            errors.push(e);
        }
    }
    if !username.is_empty() && store.username_taken(&username, exclude)? {
        errors.push(ValidationError::new(
            "username",
            "A user with this username already exists.",
        ));
    }
    if !email.is_empty() && store.email_taken(&email, exclude)? {
        errors.push(ValidationError::new(
            "email",
            "A user with this email already exists.",
        ));
    }

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    Ok(User {
        id: exclude.unwrap_or_default(),
        username,
        email,
        password,
    })
}

/// GET /api/users/
pub fn list(store: &Store) -> Result<Response<Full<Bytes>>, ApiError> {
    let mut views = Vec::new();
    for user in store.all_users()? {
        views.push(view(store, &user)?);
    }
    Ok(respond::json(StatusCode::OK, &views))
}

/// POST /api/users/
pub fn create(store: &Store, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let payload: UserPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let user = validate(store, &payload, None)?;
    let created = store.insert_user(user)?;
    Ok(respond::json(StatusCode::CREATED, &view(store, &created)?))
}

/// GET /api/users/{id}/
pub fn retrieve(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    let user = store
        .get_user(id)?
        .ok_or_else(|| strive_db::Error::not_found("User"))?;
    Ok(respond::json(StatusCode::OK, &view(store, &user)?))
}

/// PUT /api/users/{id}/
pub fn update(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    store
        .get_user(id)?
        .ok_or_else(|| strive_db::Error::not_found("User"))?;
    let payload: UserPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let user = validate(store, &payload, Some(id))?;
    store.update_user(&user)?;
    Ok(respond::json(StatusCode::OK, &view(store, &user)?))
}

/// PATCH /api/users/{id}/
pub fn patch(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let existing = store
        .get_user(id)?
        .ok_or_else(|| strive_db::Error::not_found("User"))?;
    let payload: UserPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let merged = UserPayload {
        username: payload.username.or(Some(existing.username)),
        email: payload.email.or(Some(existing.email)),
        password: payload.password.or(Some(existing.password)),
    };
    let user = validate(store, &merged, Some(id))?;
    store.update_user(&user)?;
    Ok(respond::json(StatusCode::OK, &view(store, &user)?))
}

/// DELETE /api/users/{id}/
pub fn destroy(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    store.delete_user(id)?;
    Ok(respond::no_content())
}
