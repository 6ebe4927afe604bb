//! WGPU-based renderer for the labyrinth demo.
//!
//! This module provides [`WgpuRenderer`], which owns the surface, device, and
//! queue and orchestrates the per-frame render: a depth-only shadow pass from
//! the light's viewpoint followed by the shaded color pass from the camera.
//!
//! # Usage
//! Create a [`WgpuRenderer`] via [`WgpuRenderer::new`] and call
//! [`WgpuRenderer::update_canvas`] each frame with the current scene state.

use crate::game::SceneState;
use crate::renderer::scene_renderer::SceneRenderer;
use thiserror::Error;
use tracing::{info, warn};
use wgpu::{SurfaceTexture, TextureView};

/// Failures while bringing up the GPU. All of them are fatal; the demo has
/// no software fallback.
#[derive(Debug, Error)]
pub enum RendererInitError {
    #[error("no suitable graphics adapter found")]
    AdapterUnavailable,
    #[error("device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("surface does not support {0:?}")]
    UnsupportedSurfaceFormat(wgpu::TextureFormat),
    #[error("adapter cannot compare-sample depth textures")]
    ComparisonSamplingUnavailable,
}

/// Main WGPU renderer for the demo.
///
/// Owns the surface and device plus the [`SceneRenderer`] holding all scene
/// geometry and pipelines.
pub struct WgpuRenderer {
    /// The WGPU surface for presenting rendered frames.
    pub surface: wgpu::Surface<'static>,
    /// The surface configuration (format, size, etc.).
    pub surface_config: wgpu::SurfaceConfiguration,
    /// The WGPU device for resource creation.
    pub device: wgpu::Device,
    /// The WGPU queue for submitting commands.
    pub queue: wgpu::Queue,
    /// Shadow and color passes over the maze scene.
    pub scene_renderer: SceneRenderer,
}

impl WgpuRenderer {
    /// Initializes a new [`WgpuRenderer`] and all associated GPU resources.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
    ) -> Result<Self, RendererInitError> {
        let adapter = Self::create_adapter(instance, &surface).await?;
        Self::check_downlevel_flags(adapter.get_downlevel_capabilities().flags)?;

        let (device, queue) = Self::create_device(&adapter).await?;
        let surface_config = Self::create_surface_config(&surface, &adapter, width, height)?;

        surface.configure(&device, &surface_config);

        let scene_renderer = SceneRenderer::new(&device, &surface_config);
        info!(
            adapter = %adapter.get_info().name,
            format = ?surface_config.format,
            "renderer initialized"
        );

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            scene_renderer,
        })
    }

    /// Renders the current frame to the surface: shadow pass, then color
    /// pass. Returns the surface view so overlay passes can draw on top, and
    /// the surface texture for presenting once the encoder is submitted.
    pub fn update_canvas(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        state: &SceneState,
    ) -> Result<(TextureView, SurfaceTexture), String> {
        let (surface_texture, surface_view) = self.get_surface_texture_and_view()?;
        let depth_texture_view = self.update_depth_texture();

        let aspect = self.surface_config.width as f32 / self.surface_config.height as f32;
        self.scene_renderer
            .upload_frame_state(&self.queue, state, aspect);
        self.scene_renderer.render_shadow_pass(encoder);
        self.scene_renderer
            .render_color_pass(encoder, &surface_view, &depth_texture_view);

        Ok((surface_view, surface_texture))
    }

    /// Blocks until outstanding GPU work finishes so the surface can be
    /// dropped cleanly on shutdown.
    pub fn cleanup(&self) {
        self.device.poll(wgpu::Maintain::Wait);
    }

    // Private helper methods

    /// The shadow lookup needs comparison samplers; refuse the adapter up
    /// front rather than failing pipeline creation later.
    fn check_downlevel_flags(flags: wgpu::DownlevelFlags) -> Result<(), RendererInitError> {
        if !flags.contains(wgpu::DownlevelFlags::COMPARISON_SAMPLERS) {
            return Err(RendererInitError::ComparisonSamplingUnavailable);
        }
        Ok(())
    }

    async fn create_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
    ) -> Result<wgpu::Adapter, RendererInitError> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(surface),
            })
            .await
            .ok_or(RendererInitError::AdapterUnavailable)
    }

    async fn create_device(
        adapter: &wgpu::Adapter,
    ) -> Result<(wgpu::Device, wgpu::Queue), RendererInitError> {
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: Default::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;
        Ok((device, queue))
    }

    fn create_surface_config(
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration, RendererInitError> {
        let selected = wgpu::TextureFormat::Bgra8UnormSrgb;
        let capabilities = surface.get_capabilities(adapter);
        let format = capabilities
            .formats
            .iter()
            .find(|&&f| f == selected)
            .copied()
            .ok_or(RendererInitError::UnsupportedSurfaceFormat(selected))?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 0,
            alpha_mode: capabilities.alpha_modes[0],
            view_formats: vec![],
        })
    }

    fn get_surface_texture_and_view(&self) -> Result<(SurfaceTexture, TextureView), String> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            // Outdated surfaces show up during resizing and minimization;
            // the caller skips the frame and the next one reconfigures.
            Err(wgpu::SurfaceError::Outdated) => {
                warn!("wgpu surface outdated");
                return Err("WGPU surface outdated".to_string());
            }
            Err(err) => {
                return Err(format!("failed to acquire next swap chain texture: {err}"));
            }
        };

        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        Ok((surface_texture, surface_view))
    }

    fn update_depth_texture(&mut self) -> TextureView {
        let (width, height) = (self.surface_config.width, self.surface_config.height);
        self.scene_renderer
            .update_depth_texture(&self.device, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that the capability probe refuses flag sets without comparison
    /// sampling and passes full ones, before any GPU resource exists.
    #[test]
    fn test_downlevel_probe() {
        let missing = WgpuRenderer::check_downlevel_flags(wgpu::DownlevelFlags::empty());
        assert!(matches!(
            missing,
            Err(RendererInitError::ComparisonSamplingUnavailable)
        ));

        assert!(WgpuRenderer::check_downlevel_flags(wgpu::DownlevelFlags::all()).is_ok());
        assert!(
            WgpuRenderer::check_downlevel_flags(wgpu::DownlevelFlags::COMPARISON_SAMPLERS).is_ok()
        );
    }
}
