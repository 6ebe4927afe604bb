//! Labyrinth - a first-person maze demo.
//!
//! This is the main entry point for the labyrinth demo. The player walks a
//! fixed maze in first person, steps and turns on the keyboard, and wins by
//! reaching the treasure cell while a roaming light orbits overhead and casts
//! real-time shadows.
//!
//! # Features
//! - **3D Graphics**: Real-time rendering with WGPU, including a shadow map
//!   pass rendered from the light's point of view
//! - **Grid Collision**: Axis-aligned footprint tests validate every step
//!   against the maze walls before it is applied
//! - **Win Detection**: Stepping onto the goal cell raises a win banner; the
//!   scene stays live and `r` restarts from the beginning
//!
//! # Architecture
//! The application follows a modular architecture:
//! - `app/`: Application state management and event handling
//! - `game/`: Player pose, collision, light, and key mapping
//! - `maze/`: The fixed wall layout and positions derived from it
//! - `renderer/`: Graphics rendering pipeline and text overlay
//! - `math/`: Mathematical utilities for 3D graphics
//!
//! # Controls
//! `w`/`s` step, `a`/`d` turn, `n` toggles the light orbit, `r` restarts,
//! escape quits.

#![warn(missing_docs)]
pub mod app;
pub mod game;
pub mod math;
pub mod maze;
pub mod renderer;

use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Main entry point for the labyrinth demo.
///
/// Installs the tracing subscriber, then hands control to the winit event
/// loop. Optional heap profiling is available behind the `dhat-heap`
/// feature.
fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    #[cfg(not(target_arch = "wasm32"))]
    {
        pollster::block_on(run());
    }
}

/// Creates the event loop and runs the application until the window closes.
async fn run() {
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            tracing::error!(error = %err, "error creating event loop");
            return;
        }
    };

    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = app::App::new();

    event_loop.run_app(&mut app).expect("Failed to run app");
}
