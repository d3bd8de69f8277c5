use std::env;
use std::io::Write;

use super::{Command, CommandError};

/// Prints the process environment, one `KEY=VALUE` per line.
#[derive(Debug, Clone)]
pub struct EnvironCommand;

impl Command for EnvironCommand {
    fn execute(&self, _args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        for (key, value) in env::vars_os() {
            writeln!(out, "{}={}", key.to_string_lossy(), value.to_string_lossy())?;
        }
        Ok(())
    }
}
