use std::io::{self, Write};

use crate::error::ShellError;

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<(), ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> Result<(), ShellError> {
        // Blank lines just re-prompt
        let Some(command) = self.tokenizer.tokenize(line)? else {
            return Ok(());
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();

        if self.flags.is_set("debug") {
            writeln!(out, "Command: {}", command.name)?;
            for arg in &command.arguments {
                writeln!(out, "Arg: {}", arg)?;
            }
        }

        self.executor.execute(&command, &mut self.reader, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
