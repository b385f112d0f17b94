//! View controllers.
//!
//! Controllers hold the state of one view and decide what a user action
//! means, but never perform I/O on their own schedule. Each action is split
//! in two:
//!
//! - `begin_*` validates, flips the busy flag and returns the request to
//!   issue (or `None` when nothing should be sent)
//! - `finish_*` consumes the API outcome and resets the busy flag on every
//!   path
//!
//! The front end runs the request in between, typically on a background
//! task. The `async` helpers (`submit`, `load`, `delete`) chain the three
//! steps inline.

pub mod auth_form;
pub mod dashboard;
pub mod fields;

pub use auth_form::{AuthFlow, AuthForm, FieldErrors};
pub use dashboard::{DashboardController, Mutation, PositionField, PositionForm};
pub use fields::{can_add_field_char, can_add_password_char, can_add_username_char};

use crate::api::{ApiError, ApiResponse};
use crate::error::ClientError;

/// Split an API outcome into an accepted response or a classified failure.
/// `on_reject` decides what a non-success status means for the caller.
fn classify<F>(outcome: Result<ApiResponse, ApiError>, on_reject: F) -> Result<ApiResponse, ClientError>
where
    F: FnOnce(&ApiResponse) -> ClientError,
{
    match outcome {
        Ok(response) if response.is_success() => Ok(response),
        Ok(response) => Err(on_reject(&response)),
        Err(e) => Err(e.into()),
    }
}

/// Rejection of a call whose message is not shown to the user
fn request_error(response: &ApiResponse) -> ClientError {
    response.status_error().into()
}
