use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::backup;
use crate::error::{PatchError, Result};
use crate::game::{self, GameProfile, GAMES};
use crate::patch::{FpsPatch, Patch, PatchOutcome, PatchStatus, ShinyPatch};
use crate::prompter::{BackupChoice, Prompter};
use crate::rom_validator;

const ROM_EXTENSIONS: &[&str] = &["nds"];

/// One patch run, fully resolved and range-checked.
#[derive(Debug, Clone)]
pub struct PatchRequest {
    pub path: PathBuf,
    pub game: &'static GameProfile,
    pub apply_fps: bool,
    pub apply_shiny: bool,
    pub shiny_value: u8,
}

/// How a patch session ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Patched {
        outcome: PatchOutcome,
        backup: Option<PathBuf>,
    },
    Cancelled,
}

/// Entry point for the shell: game listing, validation, backup and patching
/// against one registry.
pub struct RomManager {
    games: &'static [GameProfile],
}

impl Default for RomManager {
    fn default() -> Self {
        Self::new(GAMES)
    }
}

impl RomManager {
    pub fn new(games: &'static [GameProfile]) -> Self {
        Self { games }
    }

    pub fn list_games(&self) -> Vec<&'static str> {
        self.games.iter().map(|g| g.id).collect()
    }

    pub fn game(&self, game_id: &str) -> Result<&'static GameProfile> {
        game::find(self.games, game_id)
    }

    pub fn run_validation(&self, path: &Path, game_id: &str) -> Result<()> {
        let game = self.game(game_id)?;
        info!("Validating {:?} as {}", path, game.id);
        rom_validator::validate(path, game)
    }

    pub fn run_backup(&self, path: &Path) -> Result<PathBuf> {
        backup::backup(path)
    }

    /// Builds a request, rejecting an empty one and shiny values that do not
    /// fit in a byte.
    pub fn request(
        &self,
        path: &Path,
        game_id: &str,
        apply_fps: bool,
        apply_shiny: bool,
        shiny_value: u32,
    ) -> Result<PatchRequest> {
        let game = self.game(game_id)?;
        if !apply_fps && !apply_shiny {
            return Err(PatchError::InvalidArgument("no patch selected".to_owned()));
        }
        let shiny_value = u8::try_from(shiny_value).map_err(|_| {
            PatchError::InvalidArgument(format!("shiny value {} is outside 0..=255", shiny_value))
        })?;

        Ok(PatchRequest {
            path: path.to_owned(),
            game,
            apply_fps,
            apply_shiny,
            shiny_value,
        })
    }

    /// Applies the requested patches, frame rate first. The first failure
    /// ends the run; the shiny patch is never written after a refused
    /// frame-rate patch.
    pub fn run_patches(&self, request: &PatchRequest) -> Result<PatchOutcome> {
        let mut outcome = PatchOutcome::default();

        if request.apply_fps {
            let patch = FpsPatch {
                offset: request.game.fps_patch_offset,
            };
            outcome.fps = Some(apply_logged(&patch, &request.path)?);
        }

        if request.apply_shiny {
            let patch = ShinyPatch {
                offset: request.game.shiny_patch_offset,
                value: request.shiny_value,
            };
            outcome.shiny = Some(apply_logged(&patch, &request.path)?);
            info!("Shiny odds are now {}", patch.odds());
        }

        Ok(outcome)
    }

    /// The whole flow: pick a file, validate it, ask about a backup, patch.
    ///
    /// `rom` skips the file prompt and `backup` skips the backup prompt when
    /// given. A declined backup still patches; a cancelled one (or no file)
    /// ends the session without touching anything.
    pub fn run_session<P: Prompter>(
        &self,
        prompter: &P,
        game_id: &str,
        rom: Option<PathBuf>,
        backup: Option<BackupChoice>,
        apply_fps: bool,
        shiny_value: Option<u32>,
    ) -> Result<SessionEnd> {
        let game = self.game(game_id)?;

        let path = match rom.or_else(|| prompter.pick_rom(game)) {
            Some(path) => path,
            None => return Ok(SessionEnd::Cancelled),
        };

        if !extension_matches(&path, ROM_EXTENSIONS) {
            warn!("{:?} does not look like a Nintendo DS ROM", path);
        }

        let request = self.request(
            &path,
            game.id,
            apply_fps,
            shiny_value.is_some(),
            shiny_value.unwrap_or_default(),
        )?;
        self.run_validation(&path, game.id)?;

        let backup = match backup.unwrap_or_else(|| prompter.confirm_backup(&path)) {
            BackupChoice::Yes => Some(self.run_backup(&path)?),
            BackupChoice::No => None,
            BackupChoice::Cancel => {
                info!("Patching {:?} cancelled", path);
                return Ok(SessionEnd::Cancelled);
            }
        };

        let outcome = self.run_patches(&request)?;
        Ok(SessionEnd::Patched { outcome, backup })
    }
}

fn apply_logged<P: Patch>(patch: &P, path: &Path) -> Result<PatchStatus> {
    let status = patch.apply(path)?;
    info!("{} patch: {}", patch.name(), status);
    Ok(status)
}

fn extension_matches(path: &Path, extensions: &[&str]) -> bool {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    extensions.contains(&extension.as_str())
}
