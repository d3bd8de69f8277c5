use std::io::{self, Write};

mod executor;
mod prompt;

pub use prompt::Prompt;

use crate::{
    core::commands::CommandExecutor,
    error::ShellError,
    flags::Flags,
    input::{InputError, LineReader, ReadOutcome, Tokenizer},
    process::{signal, InterruptFlag},
};

use executor::CommandHandler;

/// Consecutive read failures tolerated before the loop gives up.
const MAX_READ_FAILURES: usize = 8;

pub struct Shell {
    pub(crate) reader: LineReader<'static, io::Stdin>,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) executor: CommandExecutor,
    pub(crate) prompt: Prompt,
    pub(crate) flags: Flags,
    pub(crate) interrupted: &'static InterruptFlag,
}

impl Shell {
    /// Installs the SIGINT handler first; without it the loop is unsafe to run.
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        signal::setup_signal_handlers()?;

        let interrupted = signal::interrupt_flag();
        let reader = LineReader::new(io::stdin(), interrupted);
        let tokenizer = Tokenizer::new(reader.max_len());

        Ok(Shell {
            reader,
            tokenizer,
            executor: CommandExecutor::new(&flags),
            prompt: Prompt::new(&flags),
            flags,
            interrupted,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        tracing::info!(pid = std::process::id(), "shell started");
        let mut read_failures = 0;

        loop {
            if self.interrupted.take() {
                println!();
                continue;
            }

            print!("{}", self.prompt.render());
            io::stdout().flush()?;

            match self.reader.read_line() {
                Ok(ReadOutcome::Line(line)) => {
                    read_failures = 0;
                    if let Err(e) = self.execute_command(&line) {
                        self.report(&e);
                    }
                }
                Ok(ReadOutcome::Interrupted) => continue,
                Ok(ReadOutcome::Eof) => {
                    println!();
                    break;
                }
                Err(InputError::Io(e)) => {
                    read_failures += 1;
                    tracing::warn!(attempt = read_failures, "read failed: {}", e);
                    if read_failures >= MAX_READ_FAILURES {
                        return Err(InputError::Io(e).into());
                    }
                    self.report(&InputError::Io(e).into());
                }
                Err(e) => self.report(&e.into()),
            }
        }

        tracing::info!("end of input");
        Ok(())
    }

    fn report(&self, error: &ShellError) {
        if !self.flags.is_set("quiet") {
            eprintln!("{}", error);
        }
    }
}
