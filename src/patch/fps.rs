use std::io::{Read, Seek, Write};

use log::debug;

use crate::error::{PatchError, Result};
use crate::game::{FPS_ORIGINAL, FPS_PATCHED};
use crate::patch::{Patch, PatchStatus};
use crate::utils::{WindowExt, WindowWriteExt};

/// Removes the frame-rate throttle. Only writes over the known original
/// value; anything else is refused.
#[derive(Debug, Clone, Copy)]
pub struct FpsPatch {
    pub offset: u64,
}

impl Patch for FpsPatch {
    fn name(&self) -> &'static str {
        "frame rate"
    }

    fn apply_to<F: Read + Write + Seek>(&self, rom: &mut F) -> Result<PatchStatus> {
        let mut current = [0; 2];
        rom.read_window(self.offset, &mut current)?;

        if current == FPS_PATCHED {
            debug!("Frame-rate patch already present at 0x{:X}", self.offset);
            return Ok(PatchStatus::Already);
        }

        if current != FPS_ORIGINAL {
            return Err(PatchError::PreconditionFailed {
                offset: self.offset,
                found: current,
            });
        }

        rom.write_window(self.offset, &FPS_PATCHED)?;
        debug!("Frame-rate patch written at 0x{:X}", self.offset);
        Ok(PatchStatus::Patched)
    }
}
