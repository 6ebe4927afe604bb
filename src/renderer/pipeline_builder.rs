//! # WGPU Pipeline Builder Utilities
//!
//! This module provides builder patterns for creating WGPU render pipelines
//! and bind group layouts, reducing boilerplate in the scene renderer.
//!
//! ## Key Components
//!
//! - [`PipelineBuilder`] - Fluent API for creating render pipelines
//! - [`BindGroupLayoutBuilder`] - Fluent API for creating bind group layouts
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! let layout = BindGroupLayoutBuilder::new(&device)
//!     .with_label("Scene Bind Group Layout")
//!     .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
//!     .with_depth_texture(1, wgpu::ShaderStages::FRAGMENT)
//!     .with_comparison_sampler(2, wgpu::ShaderStages::FRAGMENT)
//!     .build();
//!
//! let pipeline = PipelineBuilder::new(&device, surface_format)
//!     .with_label("Scene Pipeline")
//!     .with_shader(shader_source)
//!     .with_vertex_buffer(Vertex::desc())
//!     .with_bind_group_layout(&layout)
//!     .build();
//! ```

/// Builder for creating render pipelines with the patterns used by the scene
/// renderer.
///
/// Defaults: `vs_main`/`fs_main` entry points, `REPLACE` blending, back-face
/// culling, triangle lists, counter-clockwise front faces, no depth testing.
/// A pipeline built with [`without_color_target`](Self::without_color_target)
/// has no fragment stage at all, which is what the shadow depth pass wants.
pub struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    surface_format: wgpu::TextureFormat,
    label: Option<&'a str>,
    shader_source: Option<&'a str>,
    vertex_buffers: Vec<wgpu::VertexBufferLayout<'a>>,
    bind_group_layouts: Vec<&'a wgpu::BindGroupLayout>,
    depth_stencil: Option<wgpu::DepthStencilState>,
    color_target: bool,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(device: &'a wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            surface_format,
            label: None,
            shader_source: None,
            vertex_buffers: Vec::new(),
            bind_group_layouts: Vec::new(),
            depth_stencil: None,
            color_target: true,
        }
    }

    /// Set the label used for the pipeline, shader module, and layout.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the WGSL shader source. Required.
    pub fn with_shader(mut self, source: &'a str) -> Self {
        self.shader_source = Some(source);
        self
    }

    /// Add a vertex buffer layout. Can be called multiple times.
    pub fn with_vertex_buffer(mut self, layout: wgpu::VertexBufferLayout<'a>) -> Self {
        self.vertex_buffers.push(layout);
        self
    }

    /// Add a bind group layout. Group indices follow call order.
    pub fn with_bind_group_layout(mut self, layout: &'a wgpu::BindGroupLayout) -> Self {
        self.bind_group_layouts.push(layout);
        self
    }

    /// Set depth and stencil testing configuration.
    pub fn with_depth_stencil(mut self, depth_stencil: wgpu::DepthStencilState) -> Self {
        self.depth_stencil = Some(depth_stencil);
        self
    }

    /// Drop the fragment stage entirely. The pipeline then renders only to
    /// its depth attachment, as in the shadow pass.
    pub fn without_color_target(mut self) -> Self {
        self.color_target = false;
        self
    }

    /// Build the render pipeline with the configured parameters.
    ///
    /// # Panics
    ///
    /// Panics if no shader source was provided.
    pub fn build(self) -> wgpu::RenderPipeline {
        let shader_source = self.shader_source.expect("Shader source must be provided");

        let shader = self
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: self.label,
                source: wgpu::ShaderSource::Wgsl(shader_source.into()),
            });

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: self.label,
                bind_group_layouts: &self.bind_group_layouts,
                push_constant_ranges: &[],
            });

        let targets = [Some(wgpu::ColorTargetState {
            format: self.surface_format,
            blend: Some(wgpu::BlendState::REPLACE),
            write_mask: wgpu::ColorWrites::ALL,
        })];
        let fragment = self.color_target.then_some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &targets,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        });

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: self.label,
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &self.vertex_buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment,
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: self.depth_stencil,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
    }
}

/// Builder for creating bind group layouts with the resource types the scene
/// renderer binds: uniform buffers, the shadow depth texture, and the
/// comparison sampler that reads it.
pub struct BindGroupLayoutBuilder<'a> {
    device: &'a wgpu::Device,
    entries: Vec<wgpu::BindGroupLayoutEntry>,
    label: Option<&'a str>,
}

impl<'a> BindGroupLayoutBuilder<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self {
            device,
            entries: Vec::new(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Add a uniform buffer binding.
    ///
    /// In WGSL:
    /// ```wgsl
    /// @group(0) @binding(0) var<uniform> uniforms: MyUniforms;
    /// ```
    pub fn with_uniform_buffer(mut self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    /// Add a depth texture binding, sampled with depth comparison.
    ///
    /// In WGSL:
    /// ```wgsl
    /// @group(0) @binding(1) var shadow_map: texture_depth_2d;
    /// ```
    pub fn with_depth_texture(mut self, binding: u32, visibility: wgpu::ShaderStages) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Depth,
            },
            count: None,
        });
        self
    }

    /// Add a comparison sampler binding, for `textureSampleCompareLevel`.
    ///
    /// In WGSL:
    /// ```wgsl
    /// @group(0) @binding(2) var shadow_sampler: sampler_comparison;
    /// ```
    pub fn with_comparison_sampler(
        mut self,
        binding: u32,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        self.entries.push(wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
            count: None,
        });
        self
    }

    pub fn build(self) -> wgpu::BindGroupLayout {
        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &self.entries,
                label: self.label,
            })
    }
}
