//! Player pose and movement validation.
//!
//! This module defines [`PlayerPose`], which tracks the player's position and
//! facing together with the two transforms derived from them, and the commit
//! logic that validates a proposed move against the maze.
//!
//! # Overview
//!
//! The player system handles:
//! - **Pose**: ground-plane position plus a yaw angle; facing is the unit XZ
//!   vector derived from yaw
//! - **Derived transforms**: the avatar's model matrix and the camera's view
//!   matrix, rebuilt from position and yaw on every change so the two can
//!   never drift apart
//! - **Proposal and commit**: moves and turns produce a candidate pose;
//!   [`PlayerPose::commit`] applies a candidate only after the collision
//!   check passes
//!
//! # Coordinate System
//!
//! Right-handed, +Y up. Yaw 0 faces +X; positive yaw turns left (toward -Z).
//! The walk plane is y = 0; the camera rides [`EYE_HEIGHT`] above it and the
//! avatar cube hangs half a unit below it.

use crate::game::collision::{CollisionChecker, Footprint};
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

/// Distance covered by one forward or backward step.
pub const STEP_LENGTH: f32 = 0.12;

/// Angle of one rotate-left or rotate-right turn.
pub const TURN_ANGLE: f32 = PI / 16.0;

/// Half-width of the player's collision footprint (half the avatar scale).
pub const PLAYER_HALF_WIDTH: f32 = 0.15;

/// Camera height above the walk plane.
pub const EYE_HEIGHT: f32 = 0.8;

/// Starting position, one cell in from the maze's near corner.
pub const START_POSITION: [f32; 3] = [2.0, 0.0, -2.0];

const AVATAR_SCALE: f32 = 0.3;
const AVATAR_DROP: f32 = 0.5;

/// Result of committing a proposed pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was legal and the pose was updated.
    Accepted,
    /// The move hit a wall; the pose is unchanged.
    Rejected,
    /// The move reached the goal; the pose is unchanged (a winning move is
    /// never applied, the pose freezes at its last accepted position).
    Won,
}

/// The player's placement in the world and the transforms derived from it.
///
/// Position and yaw are the source of truth. The avatar and camera matrices
/// are reconstructed from them whenever either changes, and the camera is
/// exactly the inverse of the viewer's world pose, so updating one without
/// the other is impossible by construction.
#[derive(Debug, Clone)]
pub struct PlayerPose {
    /// World position on the walk plane (y stays 0).
    pub position: Vec3,
    yaw: f32,
    /// Model matrix for drawing the avatar cube.
    pub avatar_transform: Mat4,
    /// View matrix: the inverse of the viewer's world pose.
    pub camera_transform: Mat4,
}

impl PlayerPose {
    /// The initial pose: standing at [`START_POSITION`] facing +X.
    pub fn start() -> Self {
        Self::at(Vec3::from(START_POSITION), 0.0)
    }

    /// Builds the pose at an arbitrary position and yaw.
    ///
    /// The avatar cube is shrunk to [`AVATAR_SCALE`], dropped half a unit
    /// below the walk plane, and yawed a quarter turn past facing so its
    /// face points the way the player looks. The camera sits [`EYE_HEIGHT`]
    /// above the position; its view matrix is the inverse of that world
    /// pose.
    pub fn at(position: Vec3, yaw: f32) -> Self {
        let avatar_transform =
            Mat4::translation(position.x(), position.y() - AVATAR_DROP, position.z())
                .multiply(&Mat4::rotation_y(yaw + FRAC_PI_2))
                .multiply(&Mat4::scaling(AVATAR_SCALE, AVATAR_SCALE, AVATAR_SCALE));

        let viewer_pose = Mat4::translation(position.x(), position.y() + EYE_HEIGHT, position.z())
            .multiply(&Mat4::rotation_y(yaw - FRAC_PI_2));

        Self {
            position,
            yaw,
            avatar_transform,
            camera_transform: viewer_pose.inverse(),
        }
    }

    /// Unit facing vector in the XZ plane.
    pub fn facing(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Current yaw angle in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Candidate pose one step along facing. `sign` is +1.0 for forward,
    /// -1.0 for backward. The current pose is not modified.
    pub fn stepped(&self, sign: f32) -> Self {
        Self::at(self.position + self.facing() * (STEP_LENGTH * sign), self.yaw)
    }

    /// Pose turned in place by `angle` radians (positive turns left).
    ///
    /// Turning pivots around the current position: the avatar spins where it
    /// stands and the camera counter-rotates by the negated angle, so the
    /// world appears to swing around a stationary viewer.
    pub fn rotated(&self, angle: f32) -> Self {
        Self::at(self.position, self.yaw + angle)
    }

    /// Collision footprint at this pose. The ground plane maps world (x, z)
    /// to (x, -z); the footprint ignores yaw.
    pub fn footprint(&self) -> Footprint {
        Footprint::square(
            [self.position.x(), -self.position.z()],
            PLAYER_HALF_WIDTH,
        )
    }

    /// Validates `candidate` and applies it if legal.
    ///
    /// The wall check runs first and wins: a candidate that is both inside a
    /// wall and on the goal is `Rejected`, not `Won`. On `Accepted` the
    /// whole pose is replaced in one assignment, so position, avatar, and
    /// camera always change together.
    pub fn commit(&mut self, candidate: PlayerPose, checker: &CollisionChecker) -> MoveOutcome {
        let footprint = candidate.footprint();
        if checker.is_blocked(&footprint) {
            return MoveOutcome::Rejected;
        }
        if checker.reaches_goal(&footprint) {
            return MoveOutcome::Won;
        }
        *self = candidate;
        MoveOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mat_close(actual: &Mat4, expected: &Mat4) {
        for c in 0..4 {
            for r in 0..4 {
                assert!(
                    (actual.0[c][r] - expected.0[c][r]).abs() < 1e-5,
                    "matrices differ at [{}][{}]: {} vs {}",
                    c,
                    r,
                    actual.0[c][r],
                    expected.0[c][r]
                );
            }
        }
    }

    /// Tests the initial avatar and camera transforms entry by entry.
    #[test]
    fn test_start_pose_transforms() {
        let pose = PlayerPose::start();

        let avatar = Mat4::translation(2.0, -0.5, -2.0)
            .multiply(&Mat4::rotation_y(FRAC_PI_2))
            .multiply(&Mat4::scaling(0.3, 0.3, 0.3));
        assert_mat_close(&pose.avatar_transform, &avatar);

        let camera = Mat4::rotation_y(FRAC_PI_2).multiply(&Mat4::translation(-2.0, -0.8, 2.0));
        assert_mat_close(&pose.camera_transform, &camera);

        let facing = pose.facing();
        assert!((facing.x() - 1.0).abs() < 1e-6);
        assert!(facing.z().abs() < 1e-6);
    }

    /// Tests that proposing a move leaves the current pose untouched.
    #[test]
    fn test_proposals_are_pure() {
        let pose = PlayerPose::start();
        let _ = pose.stepped(1.0);
        let _ = pose.rotated(TURN_ANGLE);

        assert_eq!(<[f32; 3]>::from(pose.position), START_POSITION);
        assert_eq!(pose.yaw(), 0.0);
    }

    /// Tests that 32 left turns of pi/16 restore the facing vector.
    #[test]
    fn test_full_rotation_restores_facing() {
        let mut pose = PlayerPose::start();
        let original = pose.facing();
        for _ in 0..32 {
            pose = pose.rotated(TURN_ANGLE);
        }
        let restored = pose.facing();
        assert!((restored.x() - original.x()).abs() < 1e-6);
        assert!((restored.z() - original.z()).abs() < 1e-6);
    }

    /// Tests that the camera matrix is the inverse of the viewer's world
    /// pose at an arbitrary position and yaw.
    #[test]
    fn test_camera_inverts_viewer_pose() {
        let pose = PlayerPose::at(Vec3::new(6.5, 0.0, -11.0), 0.9);
        let viewer = Mat4::translation(6.5, EYE_HEIGHT, -11.0)
            .multiply(&Mat4::rotation_y(0.9 - FRAC_PI_2));
        let round_trip = pose.camera_transform.multiply(&viewer);
        assert_mat_close(&round_trip, &Mat4::identity());
    }

    /// Tests that reconstructing transforms from position and yaw agrees
    /// with composing the incremental turn and step updates directly onto
    /// the previous matrices.
    #[test]
    fn test_reconstruction_matches_incremental_updates() {
        let pose = PlayerPose::start();
        let p = pose.position;

        // Turn left: rotate the avatar in place, counter-rotate the camera.
        let pivot_in = Mat4::translation(p.x(), p.y(), p.z());
        let pivot_out = Mat4::translation(-p.x(), -p.y(), -p.z());
        let avatar_turned = pivot_in
            .multiply(&Mat4::rotation_y(TURN_ANGLE))
            .multiply(&pivot_out)
            .multiply(&pose.avatar_transform);
        let camera_turned = pose.camera_transform.multiply(
            &pivot_in
                .multiply(&Mat4::rotation_y(-TURN_ANGLE))
                .multiply(&pivot_out),
        );

        let turned = pose.rotated(TURN_ANGLE);
        assert_mat_close(&turned.avatar_transform, &avatar_turned);
        assert_mat_close(&turned.camera_transform, &camera_turned);

        // Step forward: translate the avatar, counter-translate the camera.
        let step = turned.facing() * STEP_LENGTH;
        let avatar_stepped = Mat4::translation(step.x(), step.y(), step.z())
            .multiply(&turned.avatar_transform);
        let camera_stepped = turned
            .camera_transform
            .multiply(&Mat4::translation(-step.x(), -step.y(), -step.z()));

        let stepped = turned.stepped(1.0);
        assert_mat_close(&stepped.avatar_transform, &avatar_stepped);
        assert_mat_close(&stepped.camera_transform, &camera_stepped);
    }

    /// Tests the wall-before-goal ordering of commit.
    #[test]
    fn test_commit_checks_walls_before_goal() {
        // A goal footprint buried inside a wall: the wall check must win.
        let walls = vec![Footprint::square([4.0, 2.0], 1.0)];
        let goal = Footprint::square([4.0, 2.0], 1.0);
        let checker = CollisionChecker::new(walls, goal);

        let mut pose = PlayerPose::at(Vec3::new(4.0, 0.0, -2.0), 0.0);
        let candidate = pose.clone();
        assert_eq!(pose.commit(candidate, &checker), MoveOutcome::Rejected);
    }
}
