//! Core library for the positions client.
//!
//! This crate holds everything that does not depend on a terminal:
//!
//! - `auth`: persistent token storage and the per-view session guard
//! - `api`: the HTTP client for the external position-management API
//! - `controllers`: form and list state for the login, register and dashboard views
//! - `config`: user configuration and API base resolution
//! - `models`: credential, position and auth payload types
//!
//! The front end (see the `positions-tui` crate) owns rendering and input and
//! drives the controllers defined here.

pub mod api;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod route;

pub use api::{ApiClient, ApiError, ApiResponse};
pub use auth::{GuardState, SessionGuard, StorageError, TokenStore};
pub use config::Config;
pub use error::ClientError;
pub use models::{Credential, Position, PositionInput};
pub use route::{Access, Route};
