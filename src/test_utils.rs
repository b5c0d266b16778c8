use std::io::{self, Cursor, Read, Write};

use sha1::{Digest, Sha1};
use tempfile::NamedTempFile;

use crate::game::{GameProfile, FPS_ORIGINAL};

pub const TEST_SIZE: u64 = 0x200;

/// A small synthetic image: signature, original frame-rate bytes at 0x40,
/// shiny byte 8 at 0x80, filler elsewhere.
pub fn test_image() -> Vec<u8> {
    let mut data: Vec<u8> = (0..TEST_SIZE).map(|i| (i * 7) as u8).collect();
    data[..8].copy_from_slice(b"TESTROM!");
    data[0x40..0x42].copy_from_slice(&FPS_ORIGINAL);
    data[0x80] = 8;
    data
}

/// Leaks the hash string so the profile can stay `&'static` like the registry.
pub fn test_profile(image: &[u8]) -> GameProfile {
    let hash = sha1_hex(&mut Cursor::new(image)).unwrap();
    GameProfile {
        id: "Test",
        fps_patch_offset: 0x40,
        shiny_patch_offset: 0x80,
        expected_signature: b"TESTROM!",
        expected_content_hash: Box::leak(hash.into_boxed_str()),
        expected_size: TEST_SIZE,
    }
}

pub fn write_rom(data: &[u8]) -> NamedTempFile {
    let mut rom = NamedTempFile::new().unwrap();
    rom.write_all(data).unwrap();
    rom.flush().unwrap();
    rom
}

pub fn sha1_hex<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut hasher = Sha1::new();
    io::copy(reader, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}
