use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use gen4_patcher::checksum::RomDigest;
use gen4_patcher::game;
use gen4_patcher::patch::ShinyOdds;
use gen4_patcher::prompter::{BackupChoice, CliPrompter};
use gen4_patcher::{RomManager, SessionEnd};

#[derive(Parser)]
#[command(name = "gen4-patcher")]
#[command(about = "60 FPS and shiny-rate patcher for Gen 4 Pokémon DS ROMs")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported games
    List,
    /// Show size, checksums and detected game of a ROM
    Info { rom: PathBuf },
    /// Validate a ROM and apply patches to it in place
    Patch {
        /// Game id, as printed by `list`
        game: String,
        /// ROM file; asked for interactively when omitted
        rom: Option<PathBuf>,
        /// Leave the frame-rate throttle alone
        #[arg(long)]
        no_fps: bool,
        /// Shiny-rate numerator out of 65536 (vanilla is 8)
        #[arg(long, value_name = "0..255")]
        shiny: Option<u32>,
        /// Back up to <ROM>.bak before patching
        #[arg(long, value_enum, default_value_t = BackupMode::Ask)]
        backup: BackupMode,
    },
    /// Show the odds a shiny-rate numerator gives
    Odds { value: u8 },
}

#[derive(Clone, Copy, ValueEnum)]
enum BackupMode {
    Yes,
    No,
    Ask,
}

impl BackupMode {
    fn preset(self) -> Option<BackupChoice> {
        match self {
            BackupMode::Yes => Some(BackupChoice::Yes),
            BackupMode::No => Some(BackupChoice::No),
            BackupMode::Ask => None,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    pretty_env_logger::init();

    let rom_manager = RomManager::default();

    match args.command {
        Command::List => {
            for id in rom_manager.list_games() {
                println!("{}", id);
            }
        }
        Command::Info { rom } => {
            let digest = RomDigest::from_path(&rom)?;
            println!("File:  {}", rom.display());
            println!("Size:  {} bytes", digest.size);
            println!("CRC32: {:08x}", digest.crc32);
            println!("SHA-1: {}", digest.sha1);
            match game::detect(&rom)? {
                Some(game) if game.expected_content_hash.eq_ignore_ascii_case(&digest.sha1) => {
                    println!("Game:  {} (verified)", game.id)
                }
                Some(game) => println!("Game:  {} (header only, content differs)", game.id),
                None => println!("Game:  unknown"),
            }
        }
        Command::Patch {
            game,
            rom,
            no_fps,
            shiny,
            backup,
        } => {
            let end = rom_manager.run_session(&CliPrompter, &game, rom, backup.preset(), !no_fps, shiny)?;
            match end {
                SessionEnd::Patched { outcome, backup } => {
                    if let Some(backup) = backup {
                        println!("Backup written to {}", backup.display());
                    }
                    println!("Done: {}", outcome);
                    if let (Some(_), Some(value)) = (outcome.shiny, shiny) {
                        // In range: run_session already rejected anything wider than a byte.
                        println!("Shiny odds: {}", ShinyOdds(value as u8));
                    }
                }
                SessionEnd::Cancelled => println!("Cancelled, ROM left unchanged"),
            }
        }
        Command::Odds { value } => println!("{}", ShinyOdds(value)),
    }

    Ok(())
}
