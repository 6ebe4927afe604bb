//! AppState module for the labyrinth demo.
//!
//! This module defines the [`AppState`] struct, which holds all state required
//! for a running session: the renderer, the scene, and the text overlay.

use crate::game::SceneState;
use crate::renderer::text::TextRenderer;
use crate::renderer::wgpu_lib::{RendererInitError, WgpuRenderer};
use winit::window::Window;

/// Holds all state required for a running session.
pub struct AppState {
    /// The WGPU renderer for the maze scene.
    pub wgpu_renderer: WgpuRenderer,
    /// The mutable scene: player pose, light, and win state.
    pub scene: SceneState,
    /// The text renderer for the controls hint and win banner.
    pub text_renderer: TextRenderer,
}

impl AppState {
    /// Asynchronously creates a new [`AppState`] with an initialized renderer
    /// and a scene at its starting state.
    ///
    /// # Arguments
    /// - `instance`: The WGPU instance.
    /// - `surface`: The WGPU surface for rendering.
    /// - `window`: The application window.
    /// - `width`: Initial window width.
    /// - `height`: Initial window height.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        window: &Window,
        width: u32,
        height: u32,
    ) -> Result<Self, RendererInitError> {
        let wgpu_renderer = WgpuRenderer::new(instance, surface, width, height).await?;

        let text_renderer = TextRenderer::new(
            &wgpu_renderer.device,
            &wgpu_renderer.queue,
            wgpu_renderer.surface_config.format,
            window,
        );

        Ok(Self {
            wgpu_renderer,
            scene: SceneState::new(),
            text_renderer,
        })
    }

    /// Resizes the WGPU surface and updates the configuration.
    ///
    /// # Arguments
    /// - `width`: New width of the surface.
    /// - `height`: New height of the surface.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.surface_config.width = width;
        self.wgpu_renderer.surface_config.height = height;
        self.wgpu_renderer.surface.configure(
            &self.wgpu_renderer.device,
            &self.wgpu_renderer.surface_config,
        );

        self.text_renderer.resize(
            &self.wgpu_renderer.queue,
            glyphon::Resolution { width, height },
        );
    }
}
