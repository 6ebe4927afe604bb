//! The roaming sun light and its shadow-casting frustum.
//!
//! A single point light arcs over the maze on a slow orbit, dipping below
//! the horizon once per period so the maze falls dark half the time. The
//! light doubles as the shadow camera: its view and projection matrices
//! feed the depth-only pass, so everything it illuminates can also shadow.

use crate::math::deg_to_rad;
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;

/// Milliseconds per radian of orbit phase.
const ORBIT_PACE_MS: f32 = 4500.0;

/// Where the light parks when the orbit is paused.
const RESTING_POSITION: [f32; 3] = [10.0, 5.0, 0.0];

/// Point the light always aims at, near the center of the maze.
const LIGHT_TARGET: [f32; 3] = [10.0, 0.0, -10.0];

/// Light brightness while above the horizon. Attenuation in the shader
/// divides by squared distance, so this is large.
const FULL_INTENSITY: f32 = 10_000.0;

/// Wide cone so the shadow frustum covers the whole maze from up close.
const LIGHT_FOV_DEGREES: f32 = 170.0;

/// The orbiting sun. Holds only the orbit toggle; position and intensity
/// are pure functions of elapsed time so rendering stays stateless.
pub struct SunLight {
    orbiting: bool,
}

impl SunLight {
    pub fn new() -> Self {
        Self { orbiting: true }
    }

    /// Pauses or resumes the orbit.
    pub fn toggle_orbit(&mut self) {
        self.orbiting = !self.orbiting;
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    /// World position at `elapsed_ms`. While paused the light sits at
    /// [`RESTING_POSITION`]; while orbiting it sweeps an arc that rises
    /// from one end of the maze and sets at the other.
    pub fn position(&self, elapsed_ms: f32) -> Vec3 {
        if !self.orbiting {
            return Vec3::from(RESTING_POSITION);
        }
        let phase = elapsed_ms / ORBIT_PACE_MS;
        Vec3::new(15.0 - 5.0 * phase.cos(), 5.0 * phase.sin(), 2.0)
    }

    /// Intensity at `elapsed_ms`. Zero while the orbiting light is below
    /// the horizon; a paused light never sets.
    pub fn intensity(&self, elapsed_ms: f32) -> f32 {
        if self.orbiting && (elapsed_ms / ORBIT_PACE_MS).sin() <= 0.0 {
            return 0.0;
        }
        FULL_INTENSITY
    }

    /// View matrix from the light's position toward [`LIGHT_TARGET`].
    pub fn view(&self, elapsed_ms: f32) -> Mat4 {
        Mat4::look_at(
            self.position(elapsed_ms),
            Vec3::from(LIGHT_TARGET),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    /// Projection for the shadow pass. Square aspect to match the square
    /// shadow map; the far plane comfortably spans the maze diagonal.
    pub fn projection() -> Mat4 {
        Mat4::perspective(deg_to_rad(LIGHT_FOV_DEGREES), 1.0, 0.5, 500.0)
    }
}

impl Default for SunLight {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    /// Tests that a paused light holds position and never goes dark.
    #[test]
    fn test_paused_light_is_steady() {
        let mut light = SunLight::new();
        light.toggle_orbit();
        assert!(!light.is_orbiting());

        for elapsed_ms in [0.0, 9_000.0, 40_000.0] {
            assert_eq!(
                <[f32; 3]>::from(light.position(elapsed_ms)),
                RESTING_POSITION
            );
            assert_eq!(light.intensity(elapsed_ms), FULL_INTENSITY);
        }
    }

    /// Tests the orbit path at the start and the high point of the arc.
    #[test]
    fn test_orbit_path() {
        let light = SunLight::new();

        let dawn = light.position(0.0);
        assert!((dawn.x() - 10.0).abs() < 1e-4);
        assert!(dawn.y().abs() < 1e-4);
        assert!((dawn.z() - 2.0).abs() < 1e-4);

        let noon = light.position(ORBIT_PACE_MS * FRAC_PI_2);
        assert!((noon.x() - 15.0).abs() < 1e-3);
        assert!((noon.y() - 5.0).abs() < 1e-3);
    }

    /// Tests that intensity drops to zero below the horizon and comes back.
    #[test]
    fn test_orbiting_light_sets_and_rises() {
        let light = SunLight::new();
        let half_period = ORBIT_PACE_MS * std::f32::consts::PI;

        assert_eq!(light.intensity(ORBIT_PACE_MS * FRAC_PI_2), FULL_INTENSITY);
        assert_eq!(light.intensity(half_period + ORBIT_PACE_MS), 0.0);
        assert_eq!(
            light.intensity(2.0 * half_period + ORBIT_PACE_MS),
            FULL_INTENSITY
        );
    }

    /// Tests that the light view matrix looks straight at the target.
    #[test]
    fn test_view_centers_target() {
        let mut light = SunLight::new();
        light.toggle_orbit();
        let view = light.view(0.0);

        // The target should land on the view-space -Z axis.
        let target = LIGHT_TARGET;
        let x = view.0[0][0] * target[0] + view.0[1][0] * target[1] + view.0[2][0] * target[2]
            + view.0[3][0];
        let y = view.0[0][1] * target[0] + view.0[1][1] * target[1] + view.0[2][1] * target[2]
            + view.0[3][1];
        let z = view.0[0][2] * target[0] + view.0[1][2] * target[1] + view.0[2][2] * target[2]
            + view.0[3][2];
        assert!(x.abs() < 1e-4);
        assert!(y.abs() < 1e-4);
        assert!(z < 0.0);
    }
}
