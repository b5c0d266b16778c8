use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::game::GameProfile;

/// Answer to "back up before patching?". `No` patches without a backup,
/// `Cancel` abandons the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupChoice {
    Yes,
    No,
    Cancel,
}

impl BackupChoice {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(BackupChoice::Yes),
            "n" | "no" => Some(BackupChoice::No),
            "c" | "cancel" => Some(BackupChoice::Cancel),
            _ => None,
        }
    }
}

/// User decisions the patch flow needs. Each returns a value; nothing is shown
/// or asked by the core itself.
pub trait Prompter {
    /// `None` when the user gives up on choosing a file.
    fn pick_rom(&self, game: &GameProfile) -> Option<PathBuf>;

    fn confirm_backup(&self, path: &Path) -> BackupChoice;
}

/// Asks on stdin/stdout.
pub struct CliPrompter;

impl CliPrompter {
    /// `None` on end of input.
    fn ask(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_owned()),
        }
    }
}

impl Prompter for CliPrompter {
    fn pick_rom(&self, game: &GameProfile) -> Option<PathBuf> {
        let answer = self.ask(&format!("Path to the Pokémon {} ROM (*.nds, empty to cancel): ", game.id))?;
        if answer.is_empty() {
            None
        } else {
            Some(PathBuf::from(answer))
        }
    }

    fn confirm_backup(&self, path: &Path) -> BackupChoice {
        loop {
            let answer = match self.ask(&format!("Back up {:?} before patching? [y]es/[n]o/[c]ancel: ", path)) {
                Some(answer) => answer,
                None => return BackupChoice::Cancel,
            };
            match BackupChoice::parse(&answer) {
                Some(choice) => return choice,
                None => eprintln!("Please answer yes, no or cancel"),
            }
        }
    }
}
