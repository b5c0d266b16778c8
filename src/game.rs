use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{PatchError, Result};

/// Value written over the frame-rate throttle.
pub const FPS_PATCHED: [u8; 2] = [0x25, 0x63];
/// Value the frame-rate throttle holds in an unmodified ROM.
// Unverified: not yet checked against a clean dump.
pub const FPS_ORIGINAL: [u8; 2] = [0x26, 0x63];

pub const FPS_WINDOW: u64 = FPS_PATCHED.len() as u64;
pub const SHINY_WINDOW: u64 = 1;

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameProfile {
    pub id: &'static str,
    pub fps_patch_offset: u64,
    pub shiny_patch_offset: u64,
    /// Header title followed by the game code.
    pub expected_signature: &'static [u8],
    /// SHA-1 of the whole image, lower-case hex.
    pub expected_content_hash: &'static str,
    pub expected_size: u64,
}

// Frame-rate offsets, signatures and sizes are known values. The shiny offsets
// and content hashes are unverified placeholders until checked against clean
// dumps (`gen4-patcher info <rom>` prints the digests).
#[rustfmt::skip]
pub const GAMES: &[GameProfile] = &[
    GameProfile {
        id: "Diamond",
        fps_patch_offset: 0x4DB0,
        shiny_patch_offset: 0x0007_0082, // unverified
        expected_signature: b"POKEMON D\0\0\0ADAE",
        expected_content_hash: "6ef2e7d50e4b1c2b9bd2e8a7bc1e08b3a2b7c4b4", // unverified
        expected_size: 64 * MIB,
    },
    GameProfile {
        id: "Pearl",
        fps_patch_offset: 0x4DB0,
        shiny_patch_offset: 0x0007_0082, // unverified
        expected_signature: b"POKEMON P\0\0\0APAE",
        expected_content_hash: "0bbd5e4f1ee3b8ad2e7b0a9ef8e15a1e1c1e0b6b", // unverified
        expected_size: 64 * MIB,
    },
    GameProfile {
        id: "Platinum",
        fps_patch_offset: 0x4DF8,
        shiny_patch_offset: 0x0007_6B96, // unverified
        expected_signature: b"POKEMON PL\0\0CPUE",
        expected_content_hash: "ce81046eda7d232513069519cb2085349896dec7", // unverified
        expected_size: 128 * MIB,
    },
    GameProfile {
        id: "HeartGold",
        fps_patch_offset: 0x4E28,
        shiny_patch_offset: 0x0006_FD36, // unverified
        expected_signature: b"POKEMON HG\0\0IPKE",
        expected_content_hash: "4fcded0e2713dc03929845de631d0932ea2b5a37", // unverified
        expected_size: 128 * MIB,
    },
    GameProfile {
        id: "SoulSilver",
        fps_patch_offset: 0x4E28,
        shiny_patch_offset: 0x0006_FD36, // unverified
        expected_signature: b"POKEMON SS\0\0IPGE",
        expected_content_hash: "f8dc38ea20c17541a43b58c5e6d18c1732c7e582", // unverified
        expected_size: 128 * MIB,
    },
];

/// Registered game ids, in display order.
pub fn list_games() -> impl Iterator<Item = &'static str> {
    GAMES.iter().map(|g| g.id)
}

pub fn lookup(id: &str) -> Result<&'static GameProfile> {
    find(GAMES, id)
}

/// Looks `id` up in `games`, ignoring ASCII case.
pub fn find(games: &'static [GameProfile], id: &str) -> Result<&'static GameProfile> {
    games
        .iter()
        .find(|g| g.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| PatchError::UnknownGame(id.to_owned()))
}

/// Finds the registered game whose signature starts the file, if any.
pub fn detect(path: &Path) -> Result<Option<&'static GameProfile>> {
    let header_len = GAMES.iter().map(|g| g.expected_signature.len()).max().unwrap_or(0);

    let mut header = Vec::with_capacity(header_len);
    File::open(path)?.take(header_len as u64).read_to_end(&mut header)?;

    Ok(GAMES.iter().find(|g| header.starts_with(g.expected_signature)))
}

impl GameProfile {
    fn fps_window(&self) -> (u64, u64) {
        (self.fps_patch_offset, self.fps_patch_offset + FPS_WINDOW)
    }

    fn shiny_window(&self) -> (u64, u64) {
        (self.shiny_patch_offset, self.shiny_patch_offset + SHINY_WINDOW)
    }

    /// Checks the profile's own consistency: every window lies inside the
    /// image and the two patch windows are disjoint.
    pub fn check_layout(&self) -> std::result::Result<(), String> {
        if self.id.is_empty()
            || self.expected_signature.is_empty()
            || self.expected_content_hash.is_empty()
            || self.expected_size == 0
        {
            return Err(format!("{}: empty field", self.id));
        }

        let (fps_start, fps_end) = self.fps_window();
        let (shiny_start, shiny_end) = self.shiny_window();

        if self.expected_signature.len() as u64 > self.expected_size
            || fps_end > self.expected_size
            || shiny_end > self.expected_size
        {
            return Err(format!("{}: window outside of image", self.id));
        }

        if fps_start < shiny_end && shiny_start < fps_end {
            return Err(format!("{}: patch windows overlap", self.id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_registry_layout() {
        for game in GAMES {
            assert_eq!(game.check_layout(), Ok(()));
        }
    }

    #[test]
    fn test_registry_ids_unique() {
        let ids: HashSet<_> = list_games().map(str::to_ascii_lowercase).collect();
        assert_eq!(ids.len(), GAMES.len());
    }

    #[test]
    fn test_registry_hashes_are_lowercase_sha1() {
        for game in GAMES {
            assert_eq!(game.expected_content_hash.len(), 40);
            assert!(game
                .expected_content_hash
                .chars()
                .all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn test_list_games_order() {
        let ids: Vec<_> = list_games().collect();
        assert_eq!(ids, ["Diamond", "Pearl", "Platinum", "HeartGold", "SoulSilver"]);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Platinum").unwrap().fps_patch_offset, 0x4DF8);
        assert_eq!(lookup("heartgold").unwrap().id, "HeartGold");

        let err = lookup("Emerald").unwrap_err();
        assert_eq!(err.kind(), "unknown-game");
    }

    #[test]
    fn test_overlapping_windows_rejected() {
        let game = GameProfile {
            id: "Test",
            fps_patch_offset: 0x20,
            shiny_patch_offset: 0x21,
            expected_signature: b"TEST",
            expected_content_hash: "00",
            expected_size: 0x40,
        };
        assert!(game.check_layout().is_err());

        let game = GameProfile { shiny_patch_offset: 0x22, ..game };
        assert_eq!(game.check_layout(), Ok(()));

        let game = GameProfile { shiny_patch_offset: 0x40, ..game };
        assert!(game.check_layout().is_err());
    }

    #[test]
    fn test_detect() {
        let mut rom = NamedTempFile::new().unwrap();
        rom.write_all(b"POKEMON HG\0\0IPKE01").unwrap();
        rom.write_all(&[0; 64]).unwrap();
        assert_eq!(detect(rom.path()).unwrap().map(|g| g.id), Some("HeartGold"));

        let mut other = NamedTempFile::new().unwrap();
        other.write_all(b"POKEMON\0").unwrap();
        assert_eq!(detect(other.path()).unwrap(), None);
    }
}
