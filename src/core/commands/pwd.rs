use std::env;
use std::io::Write;

use super::{Command, CommandError};

#[derive(Debug, Clone)]
pub struct PwdCommand;

impl Command for PwdCommand {
    fn execute(&self, _args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let cwd = env::current_dir()
            .map_err(|e| CommandError::ExecutionError(format!("pwd: {}", e)))?;
        writeln!(out, "{}", cwd.display())?;
        Ok(())
    }
}
