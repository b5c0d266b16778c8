use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use log::debug;

use crate::checksum::RomDigest;
use crate::error::{PatchError, Result};
use crate::game::GameProfile;

/// Confirms `path` holds an untouched image of `profile`.
///
/// Checks run cheapest first and stop at the first failure: file type,
/// header signature, size, then a full content hash. Nothing is written.
pub fn validate(path: &Path, profile: &GameProfile) -> Result<()> {
    let mut f = open_regular_file(path)?;

    check_signature(&mut f, profile)?;
    check_size(&f, profile)?;
    check_hash(&mut f, profile)?;

    debug!("{:?} is a valid {} image", path, profile.id);
    Ok(())
}

fn open_regular_file(path: &Path) -> Result<File> {
    let not_a_file = |e: io::Error| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => PatchError::NotAFile(path.to_owned()),
        _ => PatchError::Io(e),
    };

    if !fs::metadata(path).map_err(not_a_file)?.is_file() {
        return Err(PatchError::NotAFile(path.to_owned()));
    }

    File::open(path).map_err(not_a_file)
}

fn check_signature(f: &mut File, profile: &GameProfile) -> Result<()> {
    let expected = profile.expected_signature;

    let mut found = Vec::with_capacity(expected.len());
    f.by_ref().take(expected.len() as u64).read_to_end(&mut found)?;

    if found != expected {
        return Err(PatchError::SignatureMismatch {
            expected: expected.to_vec(),
            found,
        });
    }
    Ok(())
}

fn check_size(f: &File, profile: &GameProfile) -> Result<()> {
    let found = f.metadata()?.len();
    if found != profile.expected_size {
        return Err(PatchError::SizeMismatch {
            expected: profile.expected_size,
            found,
        });
    }
    Ok(())
}

fn check_hash(f: &mut File, profile: &GameProfile) -> Result<()> {
    f.seek(SeekFrom::Start(0))?;
    let digest = RomDigest::from_reader(f)?;

    if !digest.sha1.eq_ignore_ascii_case(profile.expected_content_hash) {
        return Err(PatchError::HashMismatch {
            expected: profile.expected_content_hash.to_owned(),
            found: digest.sha1,
        });
    }
    Ok(())
}
