use crate::math::vec::Vec3;

// Column-major storage: m.0[c] is column c, so translation lives in m.0[3].
// This matches the WGSL mat4x4<f32> memory layout byte for byte.

#[repr(transparent)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn perspective(
        field_of_view_y_in_radians: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Mat4 {
        let f = 1.0 / (field_of_view_y_in_radians * 0.5).tan();
        let range_reciprocal = 1.0 / (z_near - z_far);

        Mat4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, z_far * range_reciprocal, -1.0],
            [0.0, 0.0, z_far * z_near * range_reciprocal, 0.0],
        ])
        // Depth lands in [0, 1]: z = -z_near maps to 0, z = -z_far to 1.
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
        Mat4([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle_in_radians: f32) -> Mat4 {
        let c = angle_in_radians.cos();
        let s = angle_in_radians.sin();
        Mat4([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed view matrix looking from `eye` toward `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let side = forward.cross(&up).normalize();
        let true_up = side.cross(&forward);

        Mat4([
            [side.x(), true_up.x(), -forward.x(), 0.0],
            [side.y(), true_up.y(), -forward.y(), 0.0],
            [side.z(), true_up.z(), -forward.z(), 0.0],
            [
                -side.dot(&eye),
                -true_up.dot(&eye),
                forward.dot(&eye),
                1.0,
            ],
        ])
    }

    /// `a.multiply(&b)` is the product A·B: applied to a point, B acts first.
    pub fn multiply(&self, b: &Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (i, column) in result.iter_mut().enumerate() {
            for (j, cell) in column.iter_mut().enumerate() {
                *cell = (0..4).map(|k| b.0[i][k] * self.0[k][j]).sum();
            }
        }
        Mat4(result)
    }

    /// Inverse of an affine transform (linear part inverted via its adjugate,
    /// translation negated through it). Not valid for projective matrices.
    pub fn inverse(&self) -> Mat4 {
        let m = self.0;

        // Linear 3x3 part in row/column indexing, translation from the last column.
        let a = [
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ];
        let t = [m[3][0], m[3][1], m[3][2]];

        let det = a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
            - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
            + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0]);

        if det.abs() < f32::EPSILON {
            return Mat4::identity(); // Fallback if singular
        }

        let inv_det = 1.0 / det;
        let mut a_inv = [[0.0; 3]; 3];

        a_inv[0][0] = (a[1][1] * a[2][2] - a[1][2] * a[2][1]) * inv_det;
        a_inv[0][1] = -(a[0][1] * a[2][2] - a[0][2] * a[2][1]) * inv_det;
        a_inv[0][2] = (a[0][1] * a[1][2] - a[0][2] * a[1][1]) * inv_det;
        a_inv[1][0] = -(a[1][0] * a[2][2] - a[1][2] * a[2][0]) * inv_det;
        a_inv[1][1] = (a[0][0] * a[2][2] - a[0][2] * a[2][0]) * inv_det;
        a_inv[1][2] = -(a[0][0] * a[1][2] - a[0][2] * a[1][0]) * inv_det;
        a_inv[2][0] = (a[1][0] * a[2][1] - a[1][1] * a[2][0]) * inv_det;
        a_inv[2][1] = -(a[0][0] * a[2][1] - a[0][1] * a[2][0]) * inv_det;
        a_inv[2][2] = (a[0][0] * a[1][1] - a[0][1] * a[1][0]) * inv_det;

        let new_t = [
            -(a_inv[0][0] * t[0] + a_inv[0][1] * t[1] + a_inv[0][2] * t[2]),
            -(a_inv[1][0] * t[0] + a_inv[1][1] * t[1] + a_inv[1][2] * t[2]),
            -(a_inv[2][0] * t[0] + a_inv[2][1] * t[1] + a_inv[2][2] * t[2]),
        ];

        Mat4([
            [a_inv[0][0], a_inv[1][0], a_inv[2][0], 0.0],
            [a_inv[0][1], a_inv[1][1], a_inv[2][1], 0.0],
            [a_inv[0][2], a_inv[1][2], a_inv[2][2], 0.0],
            [new_t[0], new_t[1], new_t[2], 1.0],
        ])
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(matrix: [[f32; 4]; 4]) -> Self {
        Mat4(matrix)
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(matrix: Mat4) -> Self {
        matrix.0
    }
}
