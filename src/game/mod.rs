//! Scene state management module.
//!
//! This module defines the [`SceneState`] struct, which tracks all mutable
//! state for the demo loop:
//! - The player pose and the collision checker that validates its moves.
//! - The orbiting light.
//! - Which screen is showing (playing, or the win banner).
//! - The scene clock that drives the light orbit and animated models.

pub mod collision;
pub mod keys;
pub mod light;
pub mod player;

use self::collision::{CollisionChecker, Footprint};
use self::keys::GameKey;
use self::light::SunLight;
use self::player::{MoveOutcome, PlayerPose, TURN_ANGLE};
use crate::maze::{GOAL_POSITION, MAZE_GRID, WALL_HALF_WIDTH};
use std::time::Instant;
use tracing::{debug, info};

/// Which overlay the frame shows. Movement stays live on the win screen;
/// only a restart leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Playing,
    Won,
}

/// Represents the entire mutable state of the demo.
///
/// This struct is updated on every key action and read every frame. It
/// contains:
/// - The player and the transforms derived from their pose.
/// - The collision checker built once from the maze grid.
/// - The light and the clock feeding its orbit.
pub struct SceneState {
    /// The player's pose and derived transforms.
    pub player: PlayerPose,
    /// The roaming light.
    pub light: SunLight,
    /// Wall and goal footprints for move validation.
    pub collision: CollisionChecker,
    /// Which screen is showing.
    pub current_screen: CurrentScreen,
    started_at: Instant,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneState {
    /// Creates the scene at its starting state. The collision checker is
    /// built here, once, from the maze's wall footprints and the goal cell.
    pub fn new() -> Self {
        let goal = Footprint::square(
            [GOAL_POSITION[0], -GOAL_POSITION[2]],
            WALL_HALF_WIDTH,
        );
        Self {
            player: PlayerPose::start(),
            light: SunLight::new(),
            collision: CollisionChecker::new(MAZE_GRID.footprints(), goal),
            current_screen: CurrentScreen::Playing,
            started_at: Instant::now(),
        }
    }

    /// Milliseconds since the scene started. Drives the light orbit and the
    /// animated models.
    pub fn elapsed_ms(&self) -> f32 {
        self.started_at.elapsed().as_secs_f32() * 1000.0
    }

    /// Applies one key action to the scene.
    pub fn handle_key(&mut self, key: GameKey) {
        match key {
            GameKey::StepForward => self.try_move(self.player.stepped(1.0)),
            GameKey::StepBackward => self.try_move(self.player.stepped(-1.0)),
            GameKey::RotateLeft => self.try_move(self.player.rotated(TURN_ANGLE)),
            GameKey::RotateRight => self.try_move(self.player.rotated(-TURN_ANGLE)),
            GameKey::ToggleLight => {
                self.light.toggle_orbit();
                info!(orbiting = self.light.is_orbiting(), "light orbit toggled");
            }
            GameKey::Restart => self.restart(),
            // Quit never reaches the scene; the app shell exits first.
            GameKey::Quit => {}
        }
    }

    /// Runs a candidate pose through the collision checker and applies it
    /// if legal. Reaching the goal raises the win screen but leaves the
    /// pose where it was.
    fn try_move(&mut self, candidate: PlayerPose) {
        match self.player.commit(candidate, &self.collision) {
            MoveOutcome::Accepted => {
                debug!(
                    x = self.player.position.x(),
                    z = self.player.position.z(),
                    yaw = self.player.yaw(),
                    "move accepted"
                );
            }
            MoveOutcome::Rejected => debug!("move blocked by wall"),
            MoveOutcome::Won => {
                if self.current_screen != CurrentScreen::Won {
                    info!("goal reached");
                }
                self.current_screen = CurrentScreen::Won;
            }
        }
    }

    /// Puts the whole scene back to its starting state: player at the maze
    /// entrance, light orbiting, clock rezeroed, win screen cleared.
    pub fn restart(&mut self) {
        *self = Self::new();
        info!("scene restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec::Vec3;
    use std::f32::consts::FRAC_PI_2;

    /// Plane coordinates of the player for assertions: world (x, z) maps to
    /// (x, -z) on the ground plane.
    fn plane_position(state: &SceneState) -> (f32, f32) {
        (state.player.position.x(), -state.player.position.z())
    }

    /// Steps forward until a move is rejected, returning the accepted count.
    fn walk_until_blocked(state: &mut SceneState) -> u32 {
        let mut accepted = 0;
        for _ in 0..1_000 {
            match state
                .player
                .commit(state.player.stepped(1.0), &state.collision)
            {
                MoveOutcome::Accepted => accepted += 1,
                MoveOutcome::Rejected => return accepted,
                MoveOutcome::Won => panic!("walk reached the goal unexpectedly"),
            }
        }
        panic!("walk was never blocked");
    }

    /// Tests that the starting pose stands on open floor.
    #[test]
    fn test_start_is_legal() {
        let state = SceneState::new();
        let footprint = state.player.footprint();
        assert!(!state.collision.is_blocked(&footprint));
        assert!(!state.collision.reaches_goal(&footprint));
    }

    /// Tests the corridor east of the start: the walk is accepted step by
    /// step until the far wall, and the pose stops just short of it.
    #[test]
    fn test_walk_east_until_wall() {
        let mut state = SceneState::new();
        let accepted = walk_until_blocked(&mut state);
        assert_eq!(accepted, 140);

        let (px, pz) = plane_position(&state);
        assert!((px - 18.8).abs() < 1e-3);
        assert!((pz - 2.0).abs() < 1e-3);

        // Once blocked, repeating the same step stays blocked.
        for _ in 0..3 {
            let outcome = state
                .player
                .commit(state.player.stepped(1.0), &state.collision);
            assert_eq!(outcome, MoveOutcome::Rejected);
        }
        assert!((plane_position(&state).0 - 18.8).abs() < 1e-3);
    }

    /// Tests walking up the first column after a quarter turn left.
    #[test]
    fn test_walk_north_until_wall() {
        let mut state = SceneState::new();
        for _ in 0..8 {
            state.handle_key(GameKey::RotateLeft);
        }
        assert!((state.player.yaw() - FRAC_PI_2).abs() < 1e-5);

        let accepted = walk_until_blocked(&mut state);
        assert_eq!(accepted, 73);
        assert!((plane_position(&state).1 - 10.76).abs() < 1e-3);
    }

    /// Tests the win: approaching the goal cell, the winning step is
    /// reported but never applied, so the pose stays outside the goal.
    #[test]
    fn test_goal_approach_discards_winning_step() {
        let mut state = SceneState::new();
        state.player = PlayerPose::at(Vec3::new(34.0, 0.0, -6.0), FRAC_PI_2);

        let mut accepted = 0;
        let outcome = loop {
            match state
                .player
                .commit(state.player.stepped(1.0), &state.collision)
            {
                MoveOutcome::Accepted => accepted += 1,
                other => break other,
            }
        };
        assert_eq!(outcome, MoveOutcome::Won);
        assert_eq!(accepted, 23);
        assert!((plane_position(&state).1 - 8.76).abs() < 1e-3);
    }

    /// Tests that winning raises the win screen, movement stays live on it,
    /// and restart returns to the start of the maze.
    #[test]
    fn test_win_screen_and_restart() {
        let mut state = SceneState::new();
        state.player = PlayerPose::at(Vec3::new(34.0, 0.0, -8.8), FRAC_PI_2);

        state.handle_key(GameKey::StepForward);
        assert_eq!(state.current_screen, CurrentScreen::Won);
        assert!((plane_position(&state).1 - 8.8).abs() < 1e-4);

        // Movement is still live on the win screen.
        state.handle_key(GameKey::StepBackward);
        assert!((plane_position(&state).1 - 8.68).abs() < 1e-3);
        assert_eq!(state.current_screen, CurrentScreen::Won);

        state.handle_key(GameKey::Restart);
        assert_eq!(state.current_screen, CurrentScreen::Playing);
        let (px, pz) = plane_position(&state);
        assert!((px - 2.0).abs() < 1e-6);
        assert!((pz - 2.0).abs() < 1e-6);
    }

    /// Tests the light toggle action and that restart puts the light back
    /// in orbit.
    #[test]
    fn test_restart_resets_light_toggle() {
        let mut state = SceneState::new();
        assert!(state.light.is_orbiting());
        state.handle_key(GameKey::ToggleLight);
        assert!(!state.light.is_orbiting());
        state.handle_key(GameKey::Restart);
        assert!(state.light.is_orbiting());
    }
}
