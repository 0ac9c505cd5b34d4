//! /api/workouts/ handlers

use super::take_text;
use crate::error::ApiError;
use crate::respond;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strive_core::{normalize_list, RecordId, Workout};
use strive_db::Store;

/// Inbound fields; `exercises` accepts any JSON shape and is normalized
/// before anything touches the store.
#[derive(Debug, Deserialize)]
pub struct WorkoutPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub exercises: Option<Value>,
}

/// Outbound workout record; exercises are always a list of strings.
#[derive(Debug, Serialize)]
pub struct WorkoutView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub exercises: Vec<String>,
}

fn view(workout: &Workout) -> WorkoutView {
    WorkoutView {
        id: workout.id.to_string(),
        name: workout.name.clone(),
        description: workout.description.clone(),
        exercises: workout.exercises.clone(),
    }
}

fn validate(payload: &WorkoutPayload, exclude: Option<RecordId>) -> Result<Workout, ApiError> {
    let mut errors = Vec::new();

    let name = take_text("name", payload.name.as_deref(), &mut errors);
    let description = take_text("description", payload.description.as_deref(), &mut errors);

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let exercises = payload
        .exercises
        .as_ref()
        .map(normalize_list)
        .unwrap_or_default();
    Ok(Workout {
        id: exclude.unwrap_or_default(),
        name,
        description,
        exercises,
    })
}

/// GET /api/workouts/
pub fn list(store: &Store) -> Result<Response<Full<Bytes>>, ApiError> {
    let views: Vec<WorkoutView> = store.all_workouts()?.iter().map(view).collect();
    Ok(respond::json(StatusCode::OK, &views))
}

/// POST /api/workouts/
pub fn create(store: &Store, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let payload: WorkoutPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let workout = validate(&payload, None)?;
    let created = store.insert_workout(workout)?;
    Ok(respond::json(StatusCode::CREATED, &view(&created)))
}

/// GET /api/workouts/{id}/
pub fn retrieve(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    let workout = store
        .get_workout(id)?
        .ok_or_else(|| strive_db::Error::not_found("Workout"))?;
    Ok(respond::json(StatusCode::OK, &view(&workout)))
}

/// PUT /api/workouts/{id}/
pub fn update(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    store
        .get_workout(id)?
        .ok_or_else(|| strive_db::Error::not_found("Workout"))?;
    let payload: WorkoutPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let workout = validate(&payload, Some(id))?;
    store.update_workout(&workout)?;
    Ok(respond::json(StatusCode::OK, &view(&workout)))
}

/// PATCH /api/workouts/{id}/
pub fn patch(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let existing = store
        .get_workout(id)?
        .ok_or_else(|| strive_db::Error::not_found("Workout"))?;
    let payload: WorkoutPayload =
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?;
    let merged = WorkoutPayload {
        name: payload.name.or(Some(existing.name)),
        description: payload.description.or(Some(existing.description)),
        exercises: payload.exercises.or_else(|| {
            Some(Value::Array(
                existing.exercises.into_iter().map(Value::String).collect(),
            ))
        }),
    };
    let workout = validate(&merged, Some(id))?;
    store.update_workout(&workout)?;
    Ok(respond::json(StatusCode::OK, &view(&workout)))
}

/// DELETE /api/workouts/{id}/
pub fn destroy(store: &Store, id: RecordId) -> Result<Response<Full<Bytes>>, ApiError> {
    store.delete_workout(id)?;
    Ok(respond::no_content())
}
