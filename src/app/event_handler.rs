//! Event handler module for the labyrinth demo.
//!
//! Contains the App struct and its event handling logic.

use crate::app::app_state::AppState;
use crate::game::keys::{self, GameKey};
use std::sync::Arc;
use tracing::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// Main application struct that manages the window lifecycle and event
/// handling.
///
/// This struct implements the [`ApplicationHandler`] trait to handle all
/// window events. It manages the WGPU instance, application state, and
/// window lifecycle.
///
/// # Lifecycle
/// 1. Created with `App::new()` - initializes WGPU instance
/// 2. Window is set via `set_window()` - creates surface and application state
/// 3. Events are handled via `ApplicationHandler` trait methods
/// 4. Application runs until the window is closed or escape is pressed
#[derive(Default)]
pub struct App {
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// The current application state, None until initialized.
    pub state: Option<AppState>,
    /// The application window, None until set.
    pub window: Option<Arc<Window>>,
}

impl App {
    /// Creates a new [`App`] instance with default WGPU configuration.
    pub fn new() -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            window: None,
        }
    }

    /// Asynchronously sets up the application window and initializes the
    /// renderer and scene.
    ///
    /// # Panics
    /// - If surface creation fails
    /// - If renderer initialization fails
    pub async fn set_window(&mut self, window: Window) {
        let window = Arc::new(window);
        let initial_width = 1080;
        let initial_height = 600;

        let _ = window.request_inner_size(PhysicalSize::new(initial_width, initial_height));

        let surface = self
            .instance
            .create_surface(window.clone())
            .expect("Failed to create surface!");

        let state = AppState::new(
            &self.instance,
            surface,
            &window,
            initial_width,
            initial_height,
        )
        .await
        .unwrap_or_else(|err| panic!("Failed to initialize renderer: {err}"));

        self.window.get_or_insert(window);
        self.state.get_or_insert(state);
    }

    /// Handles window resize events.
    ///
    /// Only processes the resize if both dimensions are greater than 0; a
    /// minimized window reports a zero size the surface cannot take.
    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            let state = match &mut self.state {
                Some(state) => state,
                None => {
                    error!("cannot resize surface without state initialized");
                    return;
                }
            };
            state.resize_surface(width, height);
        }
    }
}

impl ApplicationHandler for App {
    /// Handles application resume events by creating the window.
    ///
    /// # Panics
    /// - If window creation fails
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes().with_title("Labyrinth");
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                panic!("Failed to create window: {}", err);
            }
        };
        pollster::block_on(self.set_window(window));
    }

    /// Handles window events: keyboard input, resize, close requests, and
    /// redraws.
    ///
    /// Key presses are mapped to game keys and applied to the scene. OS key
    /// repeat is honored only for keys that act on repeat (held movement
    /// keys keep stepping; the light toggle and restart fire once per
    /// press).
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let state = match self.state.as_mut() {
            Some(state) => state,
            None => {
                panic!("State not initialized");
            }
        };

        match event {
            WindowEvent::CloseRequested => {
                info!("close requested, stopping");

                // Ensure all GPU operations are complete before shutting down
                state.wgpu_renderer.cleanup();

                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                self.handle_resized(new_size.width, new_size.height);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: key,
                        state: key_state,
                        repeat,
                        ..
                    },
                ..
            } => {
                if let Some(game_key) = keys::winit_key_to_game_key(&key) {
                    if key_state == ElementState::Pressed
                        && (!repeat || game_key.acts_on_repeat())
                    {
                        match game_key {
                            GameKey::Quit => {
                                state.wgpu_renderer.cleanup();
                                event_loop.exit();
                            }
                            other => state.scene.handle_key(other),
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.handle_redraw();
            }

            _ => {}
        }
    }
}
