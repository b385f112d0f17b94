//! Content renderers for each view. Each one draws into the main content
//! area; the frame, status bar and overlays belong to `render`.

pub mod auth;
pub mod dashboard;
pub mod intro;
