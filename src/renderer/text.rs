//! Glyphon text overlay: the controls hint and the win banner.
//!
//! Text draws in its own render pass after the scene, loading the surface
//! instead of clearing it. The hint sits in the bottom-left corner at all
//! times; the banner appears centered while the win screen is up.

use crate::game::CurrentScreen;
use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer as GlyphonTextRenderer, Viewport, Weight,
};
use std::collections::HashMap;
use tracing::warn;
use winit::window::Window;

const HINT_ID: &str = "controls_hint";
const BANNER_ID: &str = "win_banner";

const HINT_TEXT: &str = "w/s step   a/d turn   n light   r restart   esc quit";
const BANNER_TEXT: &str = "Treasure found!  r to restart";

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub line_height: f32,
    pub color: Color,
    pub weight: Weight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 20.0,
            color: Color::rgb(255, 255, 255),
            weight: Weight::NORMAL,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextPosition {
    pub x: f32,
    pub y: f32,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
}

#[derive(Debug)]
pub struct TextBuffer {
    pub buffer: Buffer,
    pub style: TextStyle,
    pub position: TextPosition,
    pub visible: bool,
}

pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    text_renderer: GlyphonTextRenderer,
    text_buffers: HashMap<String, TextBuffer>,
    window_scale_factor: f32,
    window_size: winit::dpi::PhysicalSize<u32>,
}

impl TextRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, surface_format);
        let text_renderer =
            GlyphonTextRenderer::new(&mut atlas, device, wgpu::MultisampleState::default(), None);

        let mut renderer = Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            text_renderer,
            text_buffers: HashMap::new(),
            window_scale_factor: window.scale_factor() as f32,
            window_size: window.inner_size(),
        };

        let size = renderer.window_size;
        renderer.create_text_buffer(
            HINT_ID,
            HINT_TEXT,
            TextStyle {
                color: Color::rgb(210, 210, 210),
                ..TextStyle::default()
            },
            hint_position(size.height),
        );
        renderer.create_text_buffer(
            BANNER_ID,
            BANNER_TEXT,
            TextStyle {
                font_size: 42.0,
                line_height: 52.0,
                color: Color::rgb(255, 214, 120),
                weight: Weight::BOLD,
            },
            banner_position(size.width, size.height),
        );
        // The banner only shows once the goal is reached.
        if let Some(banner) = renderer.text_buffers.get_mut(BANNER_ID) {
            banner.visible = false;
        }

        renderer
    }

    /// Shows or hides the win banner to match the current screen.
    pub fn sync_screen(&mut self, screen: CurrentScreen) {
        if let Some(banner) = self.text_buffers.get_mut(BANNER_ID) {
            banner.visible = screen == CurrentScreen::Won;
        }
    }

    fn create_text_buffer(
        &mut self,
        id: &str,
        text: &str,
        style: TextStyle,
        position: TextPosition,
    ) {
        let metrics = Metrics::new(style.font_size, style.line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        let width = position.max_width.unwrap_or(self.window_size.width as f32);
        let height = position
            .max_height
            .unwrap_or(self.window_size.height as f32);
        buffer.set_size(&mut self.font_system, Some(width), Some(height));

        let attrs = Attrs::new().family(Family::SansSerif).weight(style.weight);
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        self.text_buffers.insert(
            id.to_string(),
            TextBuffer {
                buffer,
                style,
                position,
                visible: true,
            },
        );
    }

    fn update_position(&mut self, id: &str, position: TextPosition) {
        let Some(text_buffer) = self.text_buffers.get_mut(id) else {
            warn!(id, "text buffer not found");
            return;
        };
        if text_buffer.position.max_width != position.max_width
            || text_buffer.position.max_height != position.max_height
        {
            let width = position.max_width.unwrap_or(self.window_size.width as f32);
            let height = position
                .max_height
                .unwrap_or(self.window_size.height as f32);
            text_buffer
                .buffer
                .set_size(&mut self.font_system, Some(width), Some(height));
        }
        text_buffer.position = position;
    }

    /// Resizes the viewport and re-anchors the overlays.
    pub fn resize(&mut self, queue: &wgpu::Queue, resolution: Resolution) {
        self.viewport.update(queue, resolution);
        self.window_size = winit::dpi::PhysicalSize::new(resolution.width, resolution.height);
        self.update_position(HINT_ID, hint_position(resolution.height));
        self.update_position(
            BANNER_ID,
            banner_position(resolution.width, resolution.height),
        );
    }

    /// Shapes and uploads every visible overlay for this frame.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_config: &wgpu::SurfaceConfiguration,
    ) -> Result<(), glyphon::PrepareError> {
        let text_areas: Vec<TextArea> = self
            .text_buffers
            .values()
            .filter(|buffer| buffer.visible)
            .map(|buffer| TextArea {
                buffer: &buffer.buffer,
                left: buffer.position.x,
                top: buffer.position.y,
                scale: self.window_scale_factor,
                bounds: TextBounds {
                    left: buffer.position.x as i32,
                    top: buffer.position.y as i32,
                    right: (buffer.position.x
                        + buffer
                            .position
                            .max_width
                            .unwrap_or(surface_config.width as f32))
                        as i32,
                    bottom: (buffer.position.y
                        + buffer
                            .position
                            .max_height
                            .unwrap_or(surface_config.height as f32))
                        as i32,
                },
                default_color: buffer.style.color,
                custom_glyphs: &[],
            })
            .collect();

        self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            text_areas,
            &mut self.swash_cache,
        )?;
        Ok(())
    }

    pub fn render(
        &mut self,
        render_pass: &mut wgpu::RenderPass,
    ) -> Result<(), glyphon::RenderError> {
        self.text_renderer
            .render(&self.atlas, &self.viewport, render_pass)?;
        Ok(())
    }

    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}

fn hint_position(height: u32) -> TextPosition {
    TextPosition {
        x: 20.0,
        y: height as f32 - 44.0,
        max_width: Some(640.0),
        max_height: Some(30.0),
    }
}

fn banner_position(width: u32, height: u32) -> TextPosition {
    TextPosition {
        x: width as f32 / 2.0 - 300.0,
        y: height as f32 / 2.0 - 90.0,
        max_width: Some(640.0),
        max_height: Some(60.0),
    }
}
