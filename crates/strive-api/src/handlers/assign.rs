//! POST /api/users/{id}/assign_team/
//!
//! The one non-CRUD operation: move a user into a team, or out of all
//! teams when no target is given. The heavy lifting lives in the store's
//! `assign_team`; this module only shapes the request and response.

use crate::error::ApiError;
use crate::handlers::users;
use crate::respond;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use strive_core::RecordId;
use strive_db::Store;

/// Request body; `team_id` may be a number, a string holding a number,
/// null, or absent. Null and absent both mean "unassign".
#[derive(Debug, Default, Deserialize)]
pub struct AssignPayload {
    #[serde(default)]
    pub team_id: Option<Value>,
}

/// Interpret the loosely typed `team_id` field.
///
/// Clients see string IDs in responses, so both `"3"` and `3` are
/// accepted. Anything unparseable names no team and gets the same 404
/// an unknown ID would.
fn target_team(raw: Option<&Value>) -> Result<Option<RecordId>, ApiError> {
    let id = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse::<u64>().ok(),
        Some(_) => None,
    };
    match id {
        Some(id) => Ok(Some(RecordId::new(id))),
        None => Err(strive_db::Error::not_found("Team").into()),
    }
}

/// POST /api/users/{id}/assign_team/
pub fn assign(store: &Store, id: RecordId, body: &[u8]) -> Result<Response<Full<Bytes>>, ApiError> {
    let payload: AssignPayload = if body.is_empty() {
        AssignPayload::default()
    } else {
        serde_json::from_slice(body).map_err(|_| ApiError::MalformedBody)?
    };
    let target = target_team(payload.team_id.as_ref())?;
    let user = store.assign_team(id, target)?;
    // serialize through the user view so the response carries the new team
    Ok(respond::json(StatusCode::OK, &users::view(store, &user)?))
}
