//! Keyboard input handling.
//!
//! This module defines the [`GameKey`] enum for abstracting game actions from
//! physical keys, and the mapping from winit key events to those actions.
//! Movement is discrete: each press (or OS key repeat) fires one action, so
//! there is no held-key set to track.

use winit::keyboard;

/// Enum representing all in-game actions that can be triggered by keyboard
/// input.
///
/// This abstraction keeps the game logic decoupled from physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Step forward along the facing direction (W).
    StepForward,
    /// Step backward against the facing direction (S).
    StepBackward,
    /// Turn left in place (A).
    RotateLeft,
    /// Turn right in place (D).
    RotateRight,
    /// Pause or resume the light's orbit (N).
    ToggleLight,
    /// Restart from the starting pose (R).
    Restart,
    /// Quit the game (Escape).
    Quit,
}

impl GameKey {
    /// Whether holding the key should keep firing the action via OS key
    /// repeat. True for movement so a held key walks or turns smoothly;
    /// false for toggles, which would otherwise flicker under repeat.
    pub fn acts_on_repeat(self) -> bool {
        matches!(
            self,
            GameKey::StepForward
                | GameKey::StepBackward
                | GameKey::RotateLeft
                | GameKey::RotateRight
        )
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to a [`GameKey`] if it matches a
/// mapped action.
///
/// Each action is bound to exactly one key: the movement and toggle
/// characters, plus escape to quit.
pub fn winit_key_to_game_key(key: &keyboard::Key) -> Option<GameKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            Escape => GameKey::Quit,
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "w" => GameKey::StepForward,
            "s" => GameKey::StepBackward,
            "a" => GameKey::RotateLeft,
            "d" => GameKey::RotateRight,
            "n" => GameKey::ToggleLight,
            "r" => GameKey::Restart,
        }),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{Key, NamedKey, SmolStr};

    /// Tests the character mappings, including upper-case variants.
    #[test]
    fn test_character_keys_map_to_actions() {
        let cases = [
            ("w", GameKey::StepForward),
            ("S", GameKey::StepBackward),
            ("a", GameKey::RotateLeft),
            ("D", GameKey::RotateRight),
            ("n", GameKey::ToggleLight),
            ("r", GameKey::Restart),
        ];
        for (ch, expected) in cases {
            let key = Key::Character(SmolStr::new(ch));
            assert_eq!(winit_key_to_game_key(&key), Some(expected));
        }
    }

    /// Tests the escape mapping.
    #[test]
    fn test_escape_maps_to_quit() {
        assert_eq!(
            winit_key_to_game_key(&Key::Named(NamedKey::Escape)),
            Some(GameKey::Quit)
        );
    }

    /// Tests that unmapped keys produce no action. Each action has exactly
    /// one key, so the arrows stay unbound.
    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(
            winit_key_to_game_key(&Key::Character(SmolStr::new("z"))),
            None
        );
        assert_eq!(winit_key_to_game_key(&Key::Named(NamedKey::Space)), None);
        assert_eq!(winit_key_to_game_key(&Key::Named(NamedKey::ArrowUp)), None);
    }

    /// Tests the repeat routing: movement repeats, toggles do not.
    #[test]
    fn test_repeat_routing() {
        assert!(GameKey::StepForward.acts_on_repeat());
        assert!(GameKey::RotateRight.acts_on_repeat());
        assert!(!GameKey::ToggleLight.acts_on_repeat());
        assert!(!GameKey::Restart.acts_on_repeat());
        assert!(!GameKey::Quit.acts_on_repeat());
    }
}
