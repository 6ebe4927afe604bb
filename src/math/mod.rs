//! Matrix and vector math for camera, lighting, and model transforms.
//!
//! The [`mat`] and [`vec`] types match the memory layout WGSL expects, so
//! they can be written into uniform buffers directly.

pub mod mat;
pub mod vec;

/// Converts degrees to radians, discarding whole turns first.
///
/// # Example
/// ```
/// use labyrinth::math::deg_to_rad;
///
/// assert_eq!(deg_to_rad(180.0), std::f32::consts::PI);
/// assert_eq!(deg_to_rad(540.0), std::f32::consts::PI);
/// ```
pub fn deg_to_rad(degrees: f32) -> f32 {
    (degrees % 360.0) * (std::f32::consts::PI / 180.0)
}
