use std::io::Write;

use super::{Command, CommandError};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

#[derive(Debug, Clone)]
pub struct ClrCommand;

impl Command for ClrCommand {
    fn execute(&self, _args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        write!(out, "{}", CLEAR_SCREEN)?;
        out.flush()?;
        Ok(())
    }
}
