//! Validation and in-place patching of Gen 4 Pokémon DS ROMs.

pub mod backup;
pub mod checksum;
pub mod error;
pub mod game;
pub mod patch;
pub mod prompter;
pub mod rom_manager;
pub mod rom_validator;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use error::{PatchError, Result};
pub use game::GameProfile;
pub use rom_manager::{PatchRequest, RomManager, SessionEnd};
