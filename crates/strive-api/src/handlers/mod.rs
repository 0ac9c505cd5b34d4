//! Request handlers, one module per collection

pub mod activities;
pub mod assign;
pub mod leaderboard;
pub mod root;
pub mod teams;
pub mod users;
pub mod workouts;

use strive_core::{require_text, ValidationError};

/// Pull a required text field, recording a violation and yielding an
/// empty placeholder when the field is absent or blank.
pub(crate) fn take_text(
    field: &'static str,
    value: Option<&str>,
    errors: &mut Vec<ValidationError>,
) -> String {
    match require_text(field, value) {
        Ok(v) => v,
        Err(e) => {
            errors.push(e);
            String::new()
        }
    }
}
