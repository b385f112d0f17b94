//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Frame layout, status bar and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `views`: Per-view content (intro, login/register, dashboard)

pub mod input;
pub mod render;
pub mod styles;
pub mod views;
