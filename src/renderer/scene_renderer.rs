//! Two-pass renderer for the labyrinth scene.
//!
//! The `SceneRenderer` draws the world twice per frame:
//! 1. **Depth pass**: walls and floor rendered from the light's viewpoint
//!    into a square shadow map. No fragment stage, depth only.
//! 2. **Color pass**: the full scene from the camera. Walls and floor sample
//!    the shadow map through a comparison sampler; torches, the avatar, the
//!    treasure, and the light marker draw on top without shadow tests.
//!
//! Static geometry lives in world-space vertex buffers built once at
//! startup and drawn with an identity model matrix. The moving models each
//! own a small uniform buffer holding their model matrix, rewritten every
//! frame.

use crate::game::SceneState;
use crate::game::light::SunLight;
use crate::game::player::EYE_HEIGHT;
use crate::maze::GOAL_POSITION;
use crate::math::mat::Mat4;
use crate::renderer::pipeline_builder::{BindGroupLayoutBuilder, PipelineBuilder};
use crate::renderer::primitives::{self, ModelUniforms, SceneUniforms, Vertex};
use std::f32::consts::{FRAC_PI_4, PI};
use wgpu::util::DeviceExt;

/// Side length of the square shadow map.
const SHADOW_MAP_SIZE: u32 = 2048;

/// Camera frustum: fairly wide lens, near plane close enough to keep walls
/// solid at touching distance, far plane past the maze diagonal.
const CAMERA_FOV: f32 = PI / 2.5;
const CAMERA_NEAR: f32 = 0.01;
const CAMERA_FAR: f32 = 100.0;

const LIGHT_MARKER_SCALE: f32 = 0.5;
const TREASURE_SCALE: f32 = 0.5;

/// A mesh the renderer can draw: its vertices plus the uniform buffer and
/// bind group carrying its model matrix.
struct Model {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
}

impl Model {
    fn new(
        device: &wgpu::Device,
        model_layout: &wgpu::BindGroupLayout,
        vertices: &[Vertex],
        label: &str,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let model_buffer =
            ModelUniforms::new(Mat4::identity().into()).create_buffer(device, label);
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
            label: Some(label),
        });
        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            model_buffer,
            model_bind_group,
        }
    }

    fn write_model(&self, queue: &wgpu::Queue, model: &Mat4) {
        let uniforms = ModelUniforms::new((*model).into());
        queue.write_buffer(&self.model_buffer, 0, uniforms.as_bytes());
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(1, &self.model_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

/// Renderer owning both pipelines, the shadow map, and every mesh in the
/// scene.
pub struct SceneRenderer {
    scene_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    /// Group 0 of the color pass: uniforms plus shadow map and sampler.
    scene_bind_group: wgpu::BindGroup,
    /// Group 0 of the depth pass: the same uniform buffer, nothing else.
    /// The depth pass cannot bind the shadow map it is writing to.
    shadow_scene_bind_group: wgpu::BindGroup,
    shadow_view: wgpu::TextureView,
    /// Walls and floor, the only shadow casters.
    static_scene: Model,
    torches: Model,
    avatar: Model,
    treasure: Model,
    light_marker: Model,
    depth_texture: Option<wgpu::Texture>,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, surface_config: &wgpu::SurfaceConfiguration) -> Self {
        let scene_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Scene Bind Group Layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
            .with_depth_texture(1, wgpu::ShaderStages::FRAGMENT)
            .with_comparison_sampler(2, wgpu::ShaderStages::FRAGMENT)
            .build();
        let shadow_scene_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Shadow Scene Bind Group Layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX)
            .build();
        let model_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Model Bind Group Layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX)
            .build();

        let scene_pipeline = PipelineBuilder::new(device, surface_config.format)
            .with_label("Scene Pipeline")
            .with_shader(include_str!("shaders/scene.wgsl"))
            .with_vertex_buffer(Vertex::desc())
            .with_bind_group_layout(&scene_layout)
            .with_bind_group_layout(&model_layout)
            .with_depth_stencil(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth24Plus,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            })
            .build();

        let shadow_pipeline = PipelineBuilder::new(device, surface_config.format)
            .with_label("Shadow Pipeline")
            .with_shader(include_str!("shaders/shadow.wgsl"))
            .with_vertex_buffer(Vertex::desc())
            .with_bind_group_layout(&shadow_scene_layout)
            .with_bind_group_layout(&model_layout)
            .with_depth_stencil(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            })
            .without_color_target()
            .build();

        let shadow_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Map"),
            size: wgpu::Extent3d {
                width: SHADOW_MAP_SIZE,
                height: SHADOW_MAP_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let shadow_view = shadow_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let scene_uniform_buffer = SceneUniforms::new().create_buffer(device);

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &scene_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
            label: Some("Scene Bind Group"),
        });
        let shadow_scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &shadow_scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
            label: Some("Shadow Scene Bind Group"),
        });

        let static_scene = Model::new(
            device,
            &model_layout,
            &primitives::build_static_scene(),
            "Static Scene",
        );
        let torches = Model::new(
            device,
            &model_layout,
            &primitives::build_torch_vertices(),
            "Torches",
        );
        let avatar = Model::new(
            device,
            &model_layout,
            &primitives::avatar_vertices(),
            "Avatar",
        );
        let treasure = Model::new(
            device,
            &model_layout,
            &primitives::treasure_vertices(),
            "Treasure",
        );
        let light_marker = Model::new(
            device,
            &model_layout,
            &primitives::light_marker_vertices(),
            "Light Marker",
        );

        Self {
            scene_pipeline,
            shadow_pipeline,
            scene_uniform_buffer,
            scene_bind_group,
            shadow_scene_bind_group,
            shadow_view,
            static_scene,
            torches,
            avatar,
            treasure,
            light_marker,
            depth_texture: None,
        }
    }

    /// Recreates the window depth buffer when the surface size changes and
    /// returns a view of it.
    pub fn update_depth_texture(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let stale = match &self.depth_texture {
            Some(texture) => texture.width() != width || texture.height() != height,
            None => true,
        };
        if stale {
            self.depth_texture = Some(device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Depth24Plus,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            }));
        }
        self.depth_texture
            .as_ref()
            .expect("depth texture was just created")
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Uploads the per-frame uniforms: camera and light matrices, light
    /// state, and the model matrices of the moving meshes.
    pub fn upload_frame_state(&self, queue: &wgpu::Queue, state: &SceneState, aspect: f32) {
        let elapsed_ms = state.elapsed_ms();

        let projection = Mat4::perspective(CAMERA_FOV, aspect, CAMERA_NEAR, CAMERA_FAR);
        let view_proj = projection.multiply(&state.player.camera_transform);

        let light_view_proj = SunLight::projection().multiply(&state.light.view(elapsed_ms));
        let light_position = state.light.position(elapsed_ms);

        let camera_position = [
            state.player.position.x(),
            state.player.position.y() + EYE_HEIGHT,
            state.player.position.z(),
        ];

        let uniforms = SceneUniforms {
            view_proj: view_proj.into(),
            light_view_proj: light_view_proj.into(),
            light_position: light_position.into(),
            light_intensity: state.light.intensity(elapsed_ms),
            camera_position,
            time_ms: elapsed_ms,
        };
        queue.write_buffer(&self.scene_uniform_buffer, 0, uniforms.as_bytes());

        self.avatar.write_model(queue, &state.player.avatar_transform);

        // The treasure bobs above the goal cell.
        let bob = FRAC_PI_4 + FRAC_PI_4 * (2.0 * elapsed_ms / 1000.0).sin();
        let treasure_model = Mat4::translation(GOAL_POSITION[0], bob, GOAL_POSITION[2])
            .multiply(&Mat4::scaling(TREASURE_SCALE, TREASURE_SCALE, TREASURE_SCALE));
        self.treasure.write_model(queue, &treasure_model);

        let light_model =
            Mat4::translation(light_position.x(), light_position.y(), light_position.z())
                .multiply(&Mat4::scaling(
                    LIGHT_MARKER_SCALE,
                    LIGHT_MARKER_SCALE,
                    LIGHT_MARKER_SCALE,
                ));
        self.light_marker.write_model(queue, &light_model);
    }

    /// Records the depth pass: walls and floor from the light's viewpoint.
    pub fn render_shadow_pass(&self, encoder: &mut wgpu::CommandEncoder) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.shadow_pipeline);
        pass.set_bind_group(0, &self.shadow_scene_bind_group, &[]);
        self.static_scene.draw(&mut pass);
    }

    /// Records the color pass: the whole scene from the camera, with the
    /// shadow map bound for the wall and floor materials.
    pub fn render_color_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.02,
                        g: 0.02,
                        b: 0.03,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.scene_pipeline);
        pass.set_bind_group(0, &self.scene_bind_group, &[]);
        self.static_scene.draw(&mut pass);
        self.torches.draw(&mut pass);
        self.avatar.draw(&mut pass);
        self.treasure.draw(&mut pass);
        self.light_marker.draw(&mut pass);
    }
}
