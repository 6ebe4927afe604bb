//! Application module for the labyrinth demo.
//!
//! This module contains the application shell that owns the window, the
//! renderer, and the scene state, and routes window events into them.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds all application state
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`update`]: Contains the per-frame redraw logic
//!
//! # Event Flow
//!
//! 1. **Input Events**: Keyboard events are mapped to game keys and applied
//!    to the scene state
//! 2. **Rendering**: Each redraw renders the shadow pass, the color pass,
//!    and the text overlay, then presents
//!
//! The demo runs on a single thread; every system is updated synchronously
//! from the event loop.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
