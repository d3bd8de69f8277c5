use super::{Command, CommandError};
use std::env;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    /// `$HOME`, or the platform's idea of it when unset.
    fn home_dir(&self) -> Result<PathBuf, CommandError> {
        env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or_else(|| CommandError::ExecutionError("cd: HOME not set".to_string()))
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], _out: &mut dyn Write) -> Result<(), CommandError> {
        let target = match args.first() {
            Some(path) => PathBuf::from(path),
            None => self.home_dir()?,
        };

        env::set_current_dir(&target).map_err(|e| {
            CommandError::ExecutionError(format!("cd: {}: {}", target.display(), e))
        })
    }
}
