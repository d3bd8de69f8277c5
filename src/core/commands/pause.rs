use std::io::Write;

use super::CommandError;
use crate::input::{LineSource, ReadOutcome};

/// Blocks until the user presses Enter.
///
/// Reads through the shell's own line source, so a line already buffered by
/// the prompt reader is the acknowledgment. Ctrl-C also counts; the raised
/// flag is left for the loop to acknowledge.
#[derive(Debug, Clone)]
pub struct PauseCommand;

impl PauseCommand {
    pub fn wait_for_enter(
        &self,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        write!(out, "Press Enter to continue...")?;
        out.flush()?;

        match input.read_line() {
            Ok(ReadOutcome::Line(_)) | Ok(ReadOutcome::Interrupted) => Ok(()),
            Ok(ReadOutcome::Eof) => {
                writeln!(out)?;
                Ok(())
            }
            Err(e) => Err(CommandError::ExecutionError(format!("pause: {}", e))),
        }
    }
}
