use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::error::{PatchError, Result};

pub mod fps;
pub mod shiny;

pub use fps::FpsPatch;
pub use shiny::{ShinyOdds, ShinyPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    Patched,
    Already,
}

impl fmt::Display for PatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PatchStatus::Patched => write!(f, "patched"),
            PatchStatus::Already => write!(f, "already-applied"),
        }
    }
}

pub trait Patch {
    fn name(&self) -> &'static str;

    /// Applies the patch to an open image. Every read happens before the
    /// single write, so an error leaves `rom` untouched.
    fn apply_to<F: Read + Write + Seek>(&self, rom: &mut F) -> Result<PatchStatus>;

    fn apply(&self, path: &Path) -> Result<PatchStatus> {
        let mut f = open_rom(path)?;
        self.apply_to(&mut f)
    }
}

pub(crate) fn open_rom(path: &Path) -> Result<File> {
    if !path.is_file() {
        return Err(PatchError::NotAFile(path.to_owned()));
    }
    Ok(OpenOptions::new().read(true).write(true).open(path)?)
}

pub fn apply_fps_patch(path: &Path, offset: u64) -> Result<PatchStatus> {
    FpsPatch { offset }.apply(path)
}

pub fn apply_shiny_patch(path: &Path, offset: u64, value: u8) -> Result<PatchStatus> {
    ShinyPatch { offset, value }.apply(path)
}

/// Per-patch results of one run. `None` means the patch was not requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOutcome {
    pub fps: Option<PatchStatus>,
    pub shiny: Option<PatchStatus>,
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(status) = self.fps {
            parts.push(format!("frame rate: {}", status));
        }
        if let Some(status) = self.shiny {
            parts.push(format!("shiny rate: {}", status));
        }

        if parts.is_empty() {
            write!(f, "nothing requested")
        } else {
            write!(f, "{}", parts.join(", "))
        }
    }
}
