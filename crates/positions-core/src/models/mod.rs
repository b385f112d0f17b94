//! Data models shared by the API client, token store and controllers.
//!
//! - `credential`: the bearer token and display name kept between runs
//! - `position`: position records as returned by the API, and write bodies
//! - `auth`: login/register request and response payloads

pub mod auth;
pub mod credential;
pub mod position;

pub use auth::{AuthRequest, AuthResponse};
pub use credential::Credential;
pub use position::{Position, PositionInput};
