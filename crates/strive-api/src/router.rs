//! Method and path dispatch for the API surface.
//!
//! Routes are flat enough that a hand-rolled match over path segments
//! beats a routing table: `/` and `/api/` for discovery, `/api/{collection}/`
//! for list and create, `/api/{collection}/{id}/` for the item verbs,
//! and `/api/users/{id}/assign_team/` for the one extra operation.

use crate::error::ApiError;
use crate::handlers::{activities, assign, leaderboard, root, teams, users, workouts};
use crate::respond;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{header, Method, Request, Response, StatusCode};
use strive_core::RecordId;
use strive_db::Store;

/// Handle one request against the store.
///
/// Generic over the body so the server can pass `Incoming` and tests
/// can pass `Full<Bytes>`.
pub async fn route<B: Body>(store: &Store, req: Request<B>) -> Response<Full<Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return respond::error(StatusCode::BAD_REQUEST, "could not read request body"),
    };

    match dispatch(store, &method, &path, host.as_deref(), &body) {
        Ok(resp) => resp,
        Err(e) => e.into_response(),
    }
}

fn dispatch(
    store: &Store,
    method: &Method,
    path: &str,
    host: Option<&str>,
    body: &[u8],
) -> Result<Response<Full<Bytes>>, ApiError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        // the bare root serves the same discovery document as /api/
        [] | ["api"] => match *method {
            Method::GET => Ok(root::discovery(host)),
            _ => Err(ApiError::MethodNotAllowed),
        },
        ["api", collection] => collection_routes(store, method, collection, body),
        ["api", collection, raw_id] => item_routes(store, method, collection, raw_id, body),
        ["api", "users", raw_id, "assign_team"] => match *method {
            Method::POST => {
                // an unparseable ID names no user
                let id: RecordId = raw_id
                    .parse()
                    .map_err(|_| strive_db::Error::not_found("User"))?;
                assign::assign(store, id, body)
            }
            _ => Err(ApiError::MethodNotAllowed),
        },
        _ => Err(ApiError::RouteNotFound),
    }
}

/// List and create: `/api/{collection}/`.
fn collection_routes(
    store: &Store,
    method: &Method,
    collection: &str,
    body: &[u8],
) -> Result<Response<Full<Bytes>>, ApiError> {
    match collection {
        "users" => match *method {
            Method::GET => users::list(store),
            Method::POST => users::create(store, body),
            _ => Err(ApiError::MethodNotAllowed),
        },
        "teams" => match *method {
            Method::GET => teams::list(store),
            Method::POST => teams::create(store, body),
            _ => Err(ApiError::MethodNotAllowed),
        },
        "activities" => match *method {
            Method::GET => activities::list(store),
            Method::POST => activities::create(store, body),
            _ => Err(ApiError::MethodNotAllowed),
        },
        "leaderboard" => match *method {
            Method::GET => leaderboard::list(store),
            Method::POST => leaderboard::create(store, body),
            _ => Err(ApiError::MethodNotAllowed),
        },
        "workouts" => match *method {
            Method::GET => workouts::list(store),
            Method::POST => workouts::create(store, body),
            _ => Err(ApiError::MethodNotAllowed),
        },
        _ => Err(ApiError::RouteNotFound),
    }
}

/// Item verbs: `/api/{collection}/{id}/`.
fn item_routes(
    store: &Store,
    method: &Method,
    collection: &str,
    raw_id: &str,
    body: &[u8],
) -> Result<Response<Full<Bytes>>, ApiError> {
    let noun = match collection {
        "users" => "User",
        "teams" => "Team",
        "activities" => "Activity",
        "leaderboard" => "Leaderboard entry",
        "workouts" => "Workout",
        _ => return Err(ApiError::RouteNotFound),
    };
    // an unparseable ID names no record, same response as an unknown one
    let id: RecordId = raw_id
        .parse()
        .map_err(|_| strive_db::Error::not_found(noun))?;

    match collection {
        "users" => match *method {
            Method::GET => users::retrieve(store, id),
            Method::PUT => users::update(store, id, body),
            Method::PATCH => users::patch(store, id, body),
            Method::DELETE => users::destroy(store, id),
            _ => Err(ApiError::MethodNotAllowed),
        },
        "teams" => match *method {
            Method::GET => teams::retrieve(store, id),
            Method::PUT => teams::update(store, id, body),
            Method::PATCH => teams::patch(store, id, body),
            Method::DELETE => teams::destroy(store, id),
            _ => Err(ApiError::MethodNotAllowed),
        },
        "activities" => match *method {
            Method::GET => activities::retrieve(store, id),
            Method::PUT => activities::update(store, id, body),
            Method::PATCH => activities::patch(store, id, body),
            Method::DELETE => activities::destroy(store, id),
            _ => Err(ApiError::MethodNotAllowed),
        },
        "leaderboard" => match *method {
            Method::GET => leaderboard::retrieve(store, id),
            Method::PUT => leaderboard::update(store, id, body),
            Method::PATCH => leaderboard::patch(store, id, body),
            Method::DELETE => leaderboard::destroy(store, id),
            _ => Err(ApiError::MethodNotAllowed),
        },
        "workouts" => match *method {
            Method::GET => workouts::retrieve(store, id),
            Method::PUT => workouts::update(store, id, body),
            Method::PATCH => workouts::patch(store, id, body),
            Method::DELETE => workouts::destroy(store, id),
            _ => Err(ApiError::MethodNotAllowed),
        },
        _ => unreachable!("collection checked above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Drive the router with an in-test request and decode the response.
    async fn send(
        store: &Store,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let bytes = body
            .map(|v| Bytes::from(serde_json::to_vec(&v).unwrap()))
            .unwrap_or_default();
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "testserver")
            .body(Full::new(bytes))
            .unwrap();
        let resp = route(store, req).await;
        let status = resp.status();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    async fn get(store: &Store, path: &str) -> (StatusCode, Value) {
        send(store, Method::GET, path, None).await
    }

    async fn post(store: &Store, path: &str, body: Value) -> (StatusCode, Value) {
        send(store, Method::POST, path, Some(body)).await
    }

    fn store() -> Store {
        Store::in_memory().unwrap()
    }

    #[tokio::test]
    async fn test_discovery_document() {
        let store = store();
        let (status, doc) = get(&store, "/api/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["users"], "http://testserver/api/users/");
        assert_eq!(doc["teams"], "http://testserver/api/teams/");
        assert_eq!(doc["workouts"], "http://testserver/api/workouts/");
    }

    #[tokio::test]
    async fn test_bare_root_serves_discovery() {
        let store = store();
        let (status, doc) = get(&store, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["users"], "http://testserver/api/users/");
        let (status, _) = send(&store, Method::POST, "/", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_unknown_route_and_wrong_method() {
        let store = store();
        let (status, _) = get(&store, "/api/nonsense/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&store, Method::DELETE, "/api/users/", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_user_crud_cycle() {
        let store = store();
        let (status, created) = post(
            &store,
            "/api/users/",
            json!({"username": "mara", "email": "mara@example.com", "password": "pw"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["username"], "mara");
        assert_eq!(created["team"], Value::Null);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = get(&store, &format!("/api/users/{id}/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["email"], "mara@example.com");

        let (status, patched) = send(
            &store,
            Method::PATCH,
            &format!("/api/users/{id}/"),
            Some(json!({"email": "m@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["email"], "m@example.com");
        assert_eq!(patched["username"], "mara");

        let (status, _) = send(&store, Method::DELETE, &format!("/api/users/{id}/"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = get(&store, &format!("/api/users/{id}/")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = store();
        let payload = json!({"username": "mara", "email": "mara@example.com", "password": "pw"});
        let (status, _) = post(&store, "/api/users/", payload.clone()).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = post(
            &store,
            "/api/users/",
            json!({"username": "mara", "email": "other@example.com", "password": "pw"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["username"].is_string());
    }

    #[tokio::test]
    async fn test_missing_fields_are_reported_per_field() {
        let store = store();
        let (status, body) = post(&store, "/api/users/", json!({"username": "mara"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["email"].is_string());
        assert!(body["errors"]["password"].is_string());
    }

    #[tokio::test]
    async fn test_team_members_arrive_normalized() {
        let store = store();
        // stringified list, the legacy shape
        let (status, created) = post(
            &store,
            "/api/teams/",
            json!({"name": "Dawn Patrol", "members": "[\"mara\", \"jonas\"]"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["members"], json!(["mara", "jonas"]));
    }

    #[tokio::test]
    async fn test_assign_team_end_to_end() {
        let store = store();
        let (_, team) = post(&store, "/api/teams/", json!({"name": "Alpha", "members": []})).await;
        let (_, user) = post(
            &store,
            "/api/users/",
            json!({"username": "alice", "email": "alice@example.com", "password": "pw"}),
        )
        .await;
        let user_id = user["id"].as_str().unwrap().to_string();
        let team_id = team["id"].as_str().unwrap().to_string();

        let (status, assigned) = post(
            &store,
            &format!("/api/users/{user_id}/assign_team/"),
            json!({"team_id": team_id}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(assigned["team"]["name"], "Alpha");
        assert_eq!(assigned["team"]["id"], team_id);

        let (_, fetched) = get(&store, &format!("/api/users/{user_id}/")).await;
        assert_eq!(fetched["team"]["name"], "Alpha");

        // null target unassigns
        let (status, unassigned) = post(
            &store,
            &format!("/api/users/{user_id}/assign_team/"),
            json!({"team_id": null}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(unassigned["team"], Value::Null);

        let (_, fetched) = get(&store, &format!("/api/users/{user_id}/")).await;
        assert_eq!(fetched["team"], Value::Null);
    }

    #[tokio::test]
    async fn test_assign_to_missing_team_is_404() {
        let store = store();
        let (_, user) = post(
            &store,
            "/api/users/",
            json!({"username": "alice", "email": "alice@example.com", "password": "pw"}),
        )
        .await;
        let user_id = user["id"].as_str().unwrap().to_string();

        let (status, body) = post(
            &store,
            &format!("/api/users/{user_id}/assign_team/"),
            json!({"team_id": 999}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Team not found");
    }

    #[tokio::test]
    async fn test_leaderboard_carries_computed_fields() {
        let store = store();
        post(&store, "/api/teams/", json!({"name": "Alpha", "members": ["mara"]})).await;
        post(
            &store,
            "/api/activities/",
            json!({"user": "mara", "activity_type": "running", "duration": 30.0, "date": "2025-03-10"}),
        )
        .await;
        post(
            &store,
            "/api/activities/",
            json!({"user": "mara", "activity_type": "rowing", "duration": 45.0, "date": "2025-03-11"}),
        )
        .await;
        post(&store, "/api/leaderboard/", json!({"user": "mara", "score": 70})).await;
        post(&store, "/api/leaderboard/", json!({"user": "lena", "score": 95})).await;

        let (status, rows) = get(&store, "/api/leaderboard/").await;
        assert_eq!(status, StatusCode::OK);
        // sorted by descending score
        assert_eq!(rows[0]["user"], "lena");
        assert_eq!(rows[0]["team"], "N/A");
        assert_eq!(rows[0]["total_calories"], 0);
        assert_eq!(rows[1]["user"], "mara");
        assert_eq!(rows[1]["team"], "Alpha");
        assert_eq!(rows[1]["total_calories"], 750);
    }

    #[tokio::test]
    async fn test_leaderboard_score_defaults_to_zero() {
        let store = store();
        let (status, created) = post(&store, "/api/leaderboard/", json!({"user": "mara"})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["score"], 0);
    }

    #[tokio::test]
    async fn test_workout_exercises_arrive_normalized() {
        let store = store();
        let (status, created) = post(
            &store,
            "/api/workouts/",
            json!({
                "name": "Morning Circuit",
                "description": "Short full-body session",
                "exercises": "[\"push-ups\", \"plank\"]"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["exercises"], json!(["push-ups", "plank"]));
    }

    #[tokio::test]
    async fn test_workout_requires_name_and_description() {
        let store = store();
        let (status, body) = post(&store, "/api/workouts/", json!({"name": "Morning Circuit"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["description"].is_string());
    }

    #[tokio::test]
    async fn test_unparseable_id_is_404() {
        let store = store();
        let (status, _) = get(&store, "/api/users/abc/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get(&store, "/api/workouts/-1/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ids_are_strings_in_every_view() {
        let store = store();
        let (_, activity) = post(
            &store,
            "/api/activities/",
            json!({"user": "mara", "activity_type": "running", "duration": 30.0, "date": "2025-03-10"}),
        )
        .await;
        assert!(activity["id"].is_string());

        let (_, listed) = get(&store, "/api/activities/").await;
        assert!(listed[0]["id"].is_string());
    }

    #[tokio::test]
    async fn test_put_replaces_whole_record() {
        let store = store();
        let (_, created) = post(
            &store,
            "/api/activities/",
            json!({"user": "mara", "activity_type": "running", "duration": 30.0, "date": "2025-03-10"}),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        // PUT with a missing required field fails, unlike PATCH
        let (status, body) = send(
            &store,
            Method::PUT,
            &format!("/api/activities/{id}/"),
            Some(json!({"user": "mara", "activity_type": "rowing", "duration": 20.0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"]["date"].is_string());

        let (status, replaced) = send(
            &store,
            Method::PUT,
            &format!("/api/activities/{id}/"),
            Some(json!({"user": "mara", "activity_type": "rowing", "duration": 20.0, "date": "2025-03-12"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(replaced["activity_type"], "rowing");
    }
}
