//! Per-frame redraw logic for the App struct.

use tracing::warn;

use super::event_handler::App;

impl App {
    /// Renders one frame.
    ///
    /// # Rendering Pipeline
    /// 1. **Scene**: [`crate::renderer::wgpu_lib::WgpuRenderer::update_canvas`]
    ///    records the shadow pass and the color pass
    /// 2. **Overlays**: the text renderer draws the controls hint and, on the
    ///    win screen, the banner, loading the surface instead of clearing it
    /// 3. **Submission**: commands are submitted and the frame presented
    ///
    /// Requests the next redraw itself, so the scene keeps animating without
    /// input. Skips the frame entirely while minimized or when the surface
    /// texture cannot be acquired.
    pub fn handle_redraw(&mut self) {
        let window = self
            .window
            .as_ref()
            .expect("Window must be initialized before use");
        if window.is_minimized().unwrap_or(false) {
            return;
        }

        let state = self
            .state
            .as_mut()
            .expect("State must be initialized before use");

        let mut encoder = state
            .wgpu_renderer
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        let (surface_view, surface_texture) = match state
            .wgpu_renderer
            .update_canvas(&mut encoder, &state.scene)
        {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "failed to update canvas, skipping frame");
                return;
            }
        };

        state.text_renderer.sync_screen(state.scene.current_screen);
        state.text_renderer.resize(
            &state.wgpu_renderer.queue,
            glyphon::Resolution {
                width: state.wgpu_renderer.surface_config.width,
                height: state.wgpu_renderer.surface_config.height,
            },
        );
        if let Err(err) = state.text_renderer.prepare(
            &state.wgpu_renderer.device,
            &state.wgpu_renderer.queue,
            &state.wgpu_renderer.surface_config,
        ) {
            warn!(error = %err, "failed to prepare text renderer");
        }

        {
            let mut text_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                label: Some("Text Render Pass"),
                occlusion_query_set: None,
            });
            if let Err(err) = state.text_renderer.render(&mut text_pass) {
                warn!(error = %err, "failed to render text");
            }
        }

        window.request_redraw();

        state.wgpu_renderer.queue.submit(Some(encoder.finish()));
        surface_texture.present();

        // Poll the device so finished work is reclaimed; this also avoids
        // surface semaphore errors at shutdown.
        state.wgpu_renderer.device.poll(wgpu::Maintain::Poll);

        state.text_renderer.trim();
    }
}
