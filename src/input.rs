//! Keyboard to intent mapping

use crate::sim::Intent;

/// Whether a key went down or came up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// Map a `KeyboardEvent.key` value to an intent
pub fn map_key(phase: KeyPhase, key: &str) -> Option<Intent> {
    use KeyPhase::*;
    let intent = match (phase, key) {
        (Down, " " | "Spacebar") => Intent::Fire,
        (Up, " " | "Spacebar") => Intent::FireRelease,
        (Down, "ArrowLeft" | "Left") => Intent::RotateLeft,
        (Down, "ArrowRight" | "Right") => Intent::RotateRight,
        (Up, "ArrowLeft" | "Left" | "ArrowRight" | "Right") => Intent::RotateStop,
        (Down, "ArrowUp" | "Up") => Intent::ThrustOn,
        (Up, "ArrowUp" | "Up") => Intent::ThrustOff,
        (Down, "Enter") => Intent::Restart,
        _ => return None,
    };
    Some(intent)
}

/// Map a legacy `KeyboardEvent.keyCode`, for browsers that leave `key` empty
pub fn map_key_code(phase: KeyPhase, code: u32) -> Option<Intent> {
    let key = match code {
        13 => "Enter",
        32 => " ",
        37 => "ArrowLeft",
        38 => "ArrowUp",
        39 => "ArrowRight",
        _ => return None,
    };
    map_key(phase, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table() {
        let cases = [
            (KeyPhase::Down, " ", Some(Intent::Fire)),
            (KeyPhase::Up, " ", Some(Intent::FireRelease)),
            (KeyPhase::Down, "ArrowLeft", Some(Intent::RotateLeft)),
            (KeyPhase::Down, "ArrowRight", Some(Intent::RotateRight)),
            (KeyPhase::Up, "ArrowLeft", Some(Intent::RotateStop)),
            (KeyPhase::Up, "ArrowRight", Some(Intent::RotateStop)),
            (KeyPhase::Down, "ArrowUp", Some(Intent::ThrustOn)),
            (KeyPhase::Up, "ArrowUp", Some(Intent::ThrustOff)),
            (KeyPhase::Down, "Enter", Some(Intent::Restart)),
            (KeyPhase::Up, "Enter", None),
            (KeyPhase::Down, "ArrowDown", None),
            (KeyPhase::Down, "a", None),
        ];
        for (phase, key, expected) in cases {
            assert_eq!(map_key(phase, key), expected, "{phase:?} {key:?}");
        }
    }

    #[test]
    fn test_legacy_codes() {
        assert_eq!(map_key_code(KeyPhase::Down, 32), Some(Intent::Fire));
        assert_eq!(map_key_code(KeyPhase::Down, 37), Some(Intent::RotateLeft));
        assert_eq!(map_key_code(KeyPhase::Up, 38), Some(Intent::ThrustOff));
        assert_eq!(map_key_code(KeyPhase::Up, 39), Some(Intent::RotateStop));
        assert_eq!(map_key_code(KeyPhase::Down, 13), Some(Intent::Restart));
        assert_eq!(map_key_code(KeyPhase::Down, 40), None);
    }
}
