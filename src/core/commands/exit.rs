use std::io::Write;

use super::{Command, CommandError};

/// `quit` / `exit`.
#[derive(Debug, Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        out.flush()?;
        tracing::debug!("exiting on user request");
        std::process::exit(0);
    }
}
