//! /api/activities/ handlers

use super::take_text;
use crate::error::ApiError;
use crate::respond;
use chrono::NaiveDate;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use strive_core::{check_duration, Activity, RecordId, ValidationError};
use strive_db::Store;

/// Inbound fields for create, replace, and patch.
#[derive(Debug, Deserialize)]
pub struct ActivityPayload {
    pub user: Option<String>,
    pub activity_type: Option<String>,
    pub duration: Option<f64>,
    pub date: Option<NaiveDate>,
}

/// Outbound activity record.
#[derive(Debug, Serialize)]
pub struct ActivityView {
    pub id: String,
    pub user: String,
    pub activity_type: String,
    pub duration: f64,
    pub date: NaiveDate,
}

fn view(activity: &Activity) -> ActivityView {
    ActivityView {
        id: activity.id.to_string(),
        user: activity.user.clone(),
        activity_type: activity.activity_type.clone(),
        duration: activity.duration,
        date: activity.date,
    }
}

fn validate(payload: &ActivityPayload, exclude: Option<RecordId>) -> Result<Activity, ApiError> {
    let mut errors = Vec::new();

    let user = take_text("user", payload.user.as_deref(), &mut errors);
    let activity_type = take_text("activity_type", payload.activity_type.as_deref(), &mut errors);

    let duration = match payload.duration {
        Some(d) => {
            if let Some(e) = check_duration("duration", d) {
                errors.push(e);
            }
            d
        }
        None => {
            errors.push(ValidationError::new("duration", "This field is required."));
            0.0
        }
    };
    if payload.date.is_none() {
        errors.push(ValidationError::new("date", "This field is required."));
    }

    match (errors.is_empty(), payload.date) {
        (true, Some(date)) => Ok(Activity {
            id: exclude.unwrap_or_default(),
            user,
            activity_type,
            duration,
            date,
        }),
        _ => Err(ApiError::Validation(errors)),
    }
}

/// GET /api/activities/
pub fn list(store: &Store) -> Result<Response<Full<Bytes>>, ApiError> {
    let views: Vec<ActivityView> = store.all_activities()?.iter().map(view).collect();
    Ok(respond::json(StatusCode::OK, &views))
}

/// POST /api/activities/
pub fn create(store: &Store, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let payload: ActivityPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let activity = validate(&payload, None)?;
    let created = store.insert_activity(activity)?;
    Ok(respond::json(StatusCode::CREATED, &view(&created)))
}

/// GET /api/activities/{id}/
pub fn retrieve(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    let activity = store
        .get_activity(id)?
        .ok_or_else(|| strive_db::Error::not_found("Activity"))?;
    Ok(respond::json(StatusCode::OK, &view(&activity)))
}

/// PUT /api/activities/{id}/
pub fn update(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    store
        .get_activity(id)?
        .ok_or_else(|| strive_db::Error::not_found("Activity"))?;
    let payload: ActivityPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let activity = validate(&payload, Some(id))?;
    store.update_activity(&activity)?;
    Ok(respond::json(StatusCode::OK, &view(&activity)))
}

/// PATCH /api/activities/{id}/
pub fn patch(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let existing = store
        .get_activity(id)?
        .ok_or_else(|| strive_db::Error::not_found("Activity"))?;
    let payload: ActivityPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let merged = ActivityPayload {
        user: payload.user.or(Some(existing.user)),
        activity_type: payload.activity_type.or(Some(existing.activity_type)),
        duration: payload.duration.or(Some(existing.duration)),
        date: payload.date.or(Some(existing.date)),
    };
    let activity = validate(&merged, Some(id))?;
    store.update_activity(&activity)?;
    Ok(respond::json(StatusCode::OK, &view(&activity)))
}

/// DELETE /api/activities/{id}/
pub fn destroy(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    store.delete_activity(id)?;
    Ok(respond::no_content())
}
