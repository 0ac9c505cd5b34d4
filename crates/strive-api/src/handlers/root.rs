//! Discovery document at the API root

use crate::respond;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use indexmap::IndexMap;

/// GET /api/ - map of collection name to list URL, in a fixed order.
///
/// URLs are absolute when the request carried a Host header, path-only
/// otherwise.
pub fn discovery(host: Option<&str>) -> Response<Full<Bytes>> {
    let base = match host {
        Some(h) => format!("http://{h}"),
        None => String::new(),
    };
    let mut doc = IndexMap::new();
    for name in ["users", "teams", "activities", "leaderboard", "workouts"] {
        doc.insert(name, format!("{base}/api/{name}/"));
    }
    respond::json(StatusCode::OK, &doc)
}
