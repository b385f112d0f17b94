//! REST API client module for the position-management service.
//!
//! This module provides the `ApiClient` for the external API: login and
//! registration, plus create/read/update/delete of position records.
//!
//! Authenticated calls carry the bearer token read from the `TokenStore`
//! at the moment the request is built.

pub mod client;
pub mod error;
pub mod response;

pub use client::ApiClient;
pub use error::ApiError;
pub use response::ApiResponse;
