//! Mesh and uniform primitives for the scene renderer.
//!
//! This module provides the [`Vertex`] format shared by every pipeline, the
//! uniform structs uploaded each frame, and the geometry bakers that turn the
//! maze into vertex data. Static geometry (walls, floor, torches) is baked in
//! world space once at startup and drawn with an identity model matrix; the
//! moving models (avatar, treasure, light marker) reuse unit meshes and get
//! their placement from per-model uniforms.

use crate::maze::{self, MAZE_GRID, WALL_HALF_WIDTH};
use wgpu::util::DeviceExt;

/// Material id for the ground slab. Lit, shadow-receiving.
pub const MATERIAL_FLOOR: u32 = 0;
/// Material id for wall cubes. Lit, shadow-receiving.
pub const MATERIAL_WALL: u32 = 1;
/// Material id for torch handles. Lit, no shadow test.
pub const MATERIAL_WOOD: u32 = 2;
/// Material id for torch flames. Animated, unlit.
pub const MATERIAL_FIRE: u32 = 3;
/// Material id for the player's avatar cube.
pub const MATERIAL_PERSON: u32 = 4;
/// Material id for the light marker sphere. Pure emissive.
pub const MATERIAL_LIGHT: u32 = 5;
/// Material id for the goal treasure chest.
pub const MATERIAL_TREASURE: u32 = 6;

const WALL_COLOR: [u8; 4] = [150, 75, 0, 255];
const FLOOR_COLOR: [u8; 4] = [170, 170, 170, 255];
const WOOD_COLOR: [u8; 4] = [121, 85, 58, 255];
const FIRE_COLOR: [u8; 4] = [255, 160, 40, 255];
const PERSON_COLOR: [u8; 4] = [153, 40, 40, 255];
const LIGHT_COLOR: [u8; 4] = [255, 255, 255, 255];
const TREASURE_COLOR: [u8; 4] = [186, 140, 66, 255];

/// Center and half-extents of the ground slab. It spans the whole maze with
/// its top face just under the walk plane.
const FLOOR_CENTER: [f32; 3] = [20.0, -1.0, -20.0];
const FLOOR_HALF_EXTENTS: [f32; 3] = [20.0, 0.2, 20.0];

const TORCH_WOOD_HALF_EXTENTS: [f32; 3] = [0.08, 0.3, 0.08];
const TORCH_FLAME_RADIUS: f32 = 0.2;
/// Flame center height above the torch base.
const TORCH_FLAME_LIFT: f32 = 0.5;

/// Vertex data for every mesh in the scene.
///
/// Each vertex carries:
/// - `position`: 3D position (world space for baked geometry, model space
///   for unit meshes).
/// - `normal`: outward surface normal.
/// - `color`: RGBA color (as 4 normalized u8 values).
/// - `material`: material id selecting lighting constants in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [u8; 4],
    pub material: u32,
}

impl Vertex {
    /// Returns the vertex buffer layout for use in a wgpu pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: (2 * std::mem::size_of::<[f32; 3]>()) as wgpu::BufferAddress,
                    shader_location: 2,
                    // 4 unsigned bytes, normalized to 0.0..1.0 in the shader
                    format: wgpu::VertexFormat::Unorm8x4,
                },
                wgpu::VertexAttribute {
                    offset: (2 * std::mem::size_of::<[f32; 3]>()
                        + std::mem::size_of::<[u8; 4]>())
                        as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Uint32,
                },
            ],
        }
    }
}

/// Pushes one quad as two triangles. `corners` walk the face so that the
/// winding is counter-clockwise seen from the `normal` side.
fn push_quad(
    out: &mut Vec<Vertex>,
    corners: [[f32; 3]; 4],
    normal: [f32; 3],
    color: [u8; 4],
    material: u32,
) {
    for index in [0, 1, 2, 0, 2, 3] {
        out.push(Vertex {
            position: corners[index],
            normal,
            color,
            material,
        });
    }
}

/// Pushes an axis-aligned cuboid centered at `center`, 36 vertices.
pub fn push_cuboid(
    out: &mut Vec<Vertex>,
    center: [f32; 3],
    half: [f32; 3],
    color: [u8; 4],
    material: u32,
) {
    let [cx, cy, cz] = center;
    let [hx, hy, hz] = half;
    let (x0, x1) = (cx - hx, cx + hx);
    let (y0, y1) = (cy - hy, cy + hy);
    let (z0, z1) = (cz - hz, cz + hz);

    // +X
    push_quad(
        out,
        [[x1, y0, z0], [x1, y1, z0], [x1, y1, z1], [x1, y0, z1]],
        [1.0, 0.0, 0.0],
        color,
        material,
    );
    // -X
    push_quad(
        out,
        [[x0, y0, z1], [x0, y1, z1], [x0, y1, z0], [x0, y0, z0]],
        [-1.0, 0.0, 0.0],
        color,
        material,
    );
    // +Y
    push_quad(
        out,
        [[x0, y1, z1], [x1, y1, z1], [x1, y1, z0], [x0, y1, z0]],
        [0.0, 1.0, 0.0],
        color,
        material,
    );
    // -Y
    push_quad(
        out,
        [[x0, y0, z0], [x1, y0, z0], [x1, y0, z1], [x0, y0, z1]],
        [0.0, -1.0, 0.0],
        color,
        material,
    );
    // +Z
    push_quad(
        out,
        [[x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1]],
        [0.0, 0.0, 1.0],
        color,
        material,
    );
    // -Z
    push_quad(
        out,
        [[x1, y0, z0], [x0, y0, z0], [x0, y1, z0], [x1, y1, z0]],
        [0.0, 0.0, -1.0],
        color,
        material,
    );
}

/// Pushes a UV sphere centered at `center`. Normals point outward; each
/// vertex normal is the unit vector from the center, so lighting is smooth.
pub fn push_sphere(
    out: &mut Vec<Vertex>,
    center: [f32; 3],
    radius: f32,
    stacks: u32,
    sectors: u32,
    color: [u8; 4],
    material: u32,
) {
    use std::f32::consts::PI;

    let point = |stack: u32, sector: u32| -> ([f32; 3], [f32; 3]) {
        let phi = PI * stack as f32 / stacks as f32;
        let theta = 2.0 * PI * sector as f32 / sectors as f32;
        let normal = [
            phi.sin() * theta.cos(),
            phi.cos(),
            phi.sin() * theta.sin(),
        ];
        let position = [
            center[0] + radius * normal[0],
            center[1] + radius * normal[1],
            center[2] + radius * normal[2],
        ];
        (position, normal)
    };

    for stack in 0..stacks {
        for sector in 0..sectors {
            let (p00, n00) = point(stack, sector);
            let (p10, n10) = point(stack + 1, sector);
            let (p11, n11) = point(stack + 1, sector + 1);
            let (p01, n01) = point(stack, sector + 1);

            for (position, normal) in [(p00, n00), (p01, n01), (p11, n11)] {
                out.push(Vertex {
                    position,
                    normal,
                    color,
                    material,
                });
            }
            for (position, normal) in [(p00, n00), (p11, n11), (p10, n10)] {
                out.push(Vertex {
                    position,
                    normal,
                    color,
                    material,
                });
            }
        }
    }
}

/// Bakes the shadow-casting geometry: one cube per maze cell plus the ground
/// slab, all in world space. This buffer is drawn in both render passes.
pub fn build_static_scene() -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for cell in MAZE_GRID.cells() {
        let center: [f32; 3] = cell.world_position().into();
        push_cuboid(
            &mut vertices,
            center,
            [WALL_HALF_WIDTH; 3],
            WALL_COLOR,
            MATERIAL_WALL,
        );
    }
    push_cuboid(
        &mut vertices,
        FLOOR_CENTER,
        FLOOR_HALF_EXTENTS,
        FLOOR_COLOR,
        MATERIAL_FLOOR,
    );
    vertices
}

/// Bakes the torches: a thin wooden post and a flame sphere per torch, in
/// world space. Drawn only in the color pass, so torches cast no shadows.
pub fn build_torch_vertices() -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for base in maze::torch_positions() {
        push_cuboid(
            &mut vertices,
            base,
            TORCH_WOOD_HALF_EXTENTS,
            WOOD_COLOR,
            MATERIAL_WOOD,
        );
        let flame_center = [base[0], base[1] + TORCH_FLAME_LIFT, base[2]];
        push_sphere(
            &mut vertices,
            flame_center,
            TORCH_FLAME_RADIUS,
            8,
            12,
            FIRE_COLOR,
            MATERIAL_FIRE,
        );
    }
    vertices
}

/// Unit cube for the avatar, placed by its model matrix.
pub fn avatar_vertices() -> Vec<Vertex> {
    let mut vertices = Vec::new();
    push_cuboid(
        &mut vertices,
        [0.0; 3],
        [1.0; 3],
        PERSON_COLOR,
        MATERIAL_PERSON,
    );
    vertices
}

/// Unit cube for the treasure chest at the goal.
pub fn treasure_vertices() -> Vec<Vertex> {
    let mut vertices = Vec::new();
    push_cuboid(
        &mut vertices,
        [0.0; 3],
        [1.0; 3],
        TREASURE_COLOR,
        MATERIAL_TREASURE,
    );
    vertices
}

/// Unit sphere marking the light's position.
pub fn light_marker_vertices() -> Vec<Vertex> {
    let mut vertices = Vec::new();
    push_sphere(
        &mut vertices,
        [0.0; 3],
        1.0,
        16,
        24,
        LIGHT_COLOR,
        MATERIAL_LIGHT,
    );
    vertices
}

/// Per-frame uniforms shared by the whole scene.
///
/// Field order matches the WGSL struct byte for byte: two mat4x4 then two
/// vec3/f32 pairs, 160 bytes total.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    /// Camera projection * view.
    pub view_proj: [[f32; 4]; 4],
    /// Light projection * view, for the shadow lookup.
    pub light_view_proj: [[f32; 4]; 4],
    pub light_position: [f32; 3],
    pub light_intensity: f32,
    pub camera_position: [f32; 3],
    /// Scene clock in milliseconds, drives the flame shader.
    pub time_ms: f32,
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneUniforms {
    pub fn new() -> Self {
        bytemuck::Zeroable::zeroed()
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn create_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: self.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }
}

/// Per-model uniforms: just the model matrix.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    pub model: [[f32; 4]; 4],
}

impl ModelUniforms {
    pub fn new(model: [[f32; 4]; 4]) -> Self {
        Self { model }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn create_buffer(&self, device: &wgpu::Device, label: &str) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: self.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Checks every triangle winds counter-clockwise around its stored
    /// normal, so back-face culling keeps the outside visible.
    fn assert_outward_winding(vertices: &[Vertex]) {
        assert_eq!(vertices.len() % 3, 0);
        for triangle in vertices.chunks(3) {
            let e1 = sub(triangle[1].position, triangle[0].position);
            let e2 = sub(triangle[2].position, triangle[0].position);
            let face_normal = cross(e1, e2);
            // Degenerate triangles (sphere poles) are fine to skip.
            if dot(face_normal, face_normal) < 1e-12 {
                continue;
            }
            let agreement = dot(face_normal, triangle[0].normal);
            assert!(
                agreement > 0.0,
                "triangle at {:?} winds against its normal",
                triangle[0].position
            );
        }
    }

    /// Tests the GPU-facing struct sizes against the WGSL declarations.
    #[test]
    fn test_buffer_layout_sizes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::size_of::<SceneUniforms>(), 160);
        assert_eq!(std::mem::size_of::<ModelUniforms>(), 64);
    }

    /// Tests cuboid baking: 36 vertices, unit normals, outward winding.
    #[test]
    fn test_cuboid_geometry() {
        let mut vertices = Vec::new();
        push_cuboid(
            &mut vertices,
            [1.0, 2.0, 3.0],
            [2.0, 0.5, 1.0],
            WALL_COLOR,
            MATERIAL_WALL,
        );
        assert_eq!(vertices.len(), 36);
        for vertex in &vertices {
            let n = vertex.normal;
            assert!((dot(n, n) - 1.0).abs() < 1e-6);
        }
        assert_outward_winding(&vertices);
    }

    /// Tests sphere baking: vertices on the radius, normals radial.
    #[test]
    fn test_sphere_geometry() {
        let center = [0.0, 5.0, 0.0];
        let mut vertices = Vec::new();
        push_sphere(&mut vertices, center, 2.0, 8, 12, FIRE_COLOR, MATERIAL_FIRE);
        assert_eq!(vertices.len(), (8 * 12 * 6) as usize);
        for vertex in &vertices {
            let offset = sub(vertex.position, center);
            assert!((dot(offset, offset).sqrt() - 2.0).abs() < 1e-4);
            assert!((dot(vertex.normal, vertex.normal) - 1.0).abs() < 1e-5);
        }
        assert_outward_winding(&vertices);
    }

    /// Tests the baked scene: one cube per deduplicated cell plus the floor.
    #[test]
    fn test_static_scene_contents() {
        let vertices = build_static_scene();
        assert_eq!(vertices.len(), (MAZE_GRID.cells().len() + 1) * 36);

        let floor_count = vertices
            .iter()
            .filter(|v| v.material == MATERIAL_FLOOR)
            .count();
        assert_eq!(floor_count, 36);

        // The floor's top face sits just under the walk plane.
        let floor_top = vertices
            .iter()
            .filter(|v| v.material == MATERIAL_FLOOR)
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((floor_top - (-0.8)).abs() < 1e-6);
    }

    /// Tests torch baking: a post and a flame per torch position.
    #[test]
    fn test_torch_contents() {
        let vertices = build_torch_vertices();
        let torch_count = maze::torch_positions().len();
        let per_torch = 36 + (8 * 12 * 6) as usize;
        assert_eq!(vertices.len(), torch_count * per_torch);

        // Flames float above their posts.
        let lowest_flame = vertices
            .iter()
            .filter(|v| v.material == MATERIAL_FIRE)
            .map(|v| v.position[1])
            .fold(f32::MAX, f32::min);
        assert!(lowest_flame > 0.5);
    }
}
