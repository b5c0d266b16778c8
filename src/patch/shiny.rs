use std::fmt;
use std::io::{Read, Seek, Write};

use log::debug;

use crate::error::Result;
use crate::patch::{Patch, PatchStatus};
use crate::utils::{WindowExt, WindowWriteExt};

/// The shiny byte is a numerator over this denominator.
pub const SHINY_DENOMINATOR: u32 = 65536;

/// Overwrites the shiny-rate numerator. There is no precondition: any
/// current value is replaced.
#[derive(Debug, Clone, Copy)]
pub struct ShinyPatch {
    pub offset: u64,
    pub value: u8,
}

impl ShinyPatch {
    pub fn odds(&self) -> ShinyOdds {
        ShinyOdds(self.value)
    }
}

impl Patch for ShinyPatch {
    fn name(&self) -> &'static str {
        "shiny rate"
    }

    fn apply_to<F: Read + Write + Seek>(&self, rom: &mut F) -> Result<PatchStatus> {
        // Read first so an offset past the end fails instead of growing the file.
        let previous = rom.read_u8_at(self.offset)?;
        rom.write_u8_at(self.offset, self.value)?;

        debug!(
            "Shiny rate at 0x{:X}: {} -> {} ({})",
            self.offset,
            previous,
            self.value,
            self.odds()
        );
        Ok(PatchStatus::Patched)
    }
}

/// Display form of a shiny-rate numerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShinyOdds(pub u8);

impl ShinyOdds {
    /// `n` in "1 in n", or `None` when the rate is zero.
    pub fn one_in(&self) -> Option<u32> {
        match self.0 {
            0 => None,
            v => Some((f64::from(SHINY_DENOMINATOR) / f64::from(v)).round() as u32),
        }
    }

    pub fn percentage(&self) -> f64 {
        f64::from(self.0) / f64::from(SHINY_DENOMINATOR) * 100.0
    }

    pub fn ratio(&self) -> String {
        match self.one_in() {
            Some(n) => format!("1:{}", n),
            None => "0".to_owned(),
        }
    }
}

impl fmt::Display for ShinyOdds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({:.4}%)", self.ratio(), self.percentage())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::backup;
    use crate::patch::apply_shiny_patch;
    use crate::test_utils::{test_image, write_rom};
    use std::fs;
    use std::io::Cursor;

    #[test]
    fn test_default_rate_odds() {
        let odds = ShinyOdds(8);
        assert_eq!(odds.one_in(), Some(8192));
        assert_eq!(odds.ratio(), "1:8192");
        assert_eq!(format!("{:.4}", odds.percentage()), "0.0122");
        assert_eq!(odds.to_string(), "1:8192 (0.0122%)");
    }

    #[test]
    fn test_zero_rate_odds() {
        let odds = ShinyOdds(0);
        assert_eq!(odds.one_in(), None);
        assert_eq!(odds.percentage(), 0.0);
        assert_eq!(odds.to_string(), "0 (0.0000%)");
    }

    #[test]
    fn test_odds_round() {
        assert_eq!(ShinyOdds(3).ratio(), "1:21845");
        assert_eq!(ShinyOdds(255).ratio(), "1:257");
        assert_eq!(ShinyOdds(1).ratio(), "1:65536");
    }

    #[test]
    fn test_writes_value() {
        let rom = write_rom(&test_image());

        assert_eq!(apply_shiny_patch(rom.path(), 0x80, 0x40).unwrap(), PatchStatus::Patched);
        assert_eq!(fs::read(rom.path()).unwrap()[0x80], 0x40);

        assert_eq!(apply_shiny_patch(rom.path(), 0x80, 0x40).unwrap(), PatchStatus::Patched);
        let data = fs::read(rom.path()).unwrap();
        assert_eq!(data[0x80], 0x40);
        assert_eq!(data.len(), test_image().len());
    }

    #[test]
    fn test_backup_unaffected_by_patch() {
        let image = test_image();
        let rom = write_rom(&image);
        let copy = backup(rom.path()).unwrap();

        apply_shiny_patch(rom.path(), 0x80, 0xFF).unwrap();
        assert_eq!(fs::read(&copy).unwrap(), image);
        assert_eq!(fs::read(rom.path()).unwrap()[0x80], 0xFF);

        fs::remove_file(copy).unwrap();
    }

    #[test]
    fn test_offset_past_end_does_not_grow() {
        let mut rom = Cursor::new(vec![0u8; 4]);
        let err = ShinyPatch { offset: 4, value: 1 }.apply_to(&mut rom).unwrap_err();
        assert_eq!(err.kind(), "io-error");
        assert_eq!(rom.into_inner().len(), 4);
    }
}
