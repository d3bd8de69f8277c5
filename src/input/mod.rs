mod reader;
mod tokenizer;

pub use reader::{max_line_length, LineReader, ReadOutcome};
pub use tokenizer::{CommandLine, Tokenizer};

use std::fmt;

/// Anything that hands out input lines the way the prompt reader does.
///
/// Builtins that wait on the user read through this so they share the
/// loop's buffering and its Ctrl-C handling.
pub trait LineSource {
    fn read_line(&mut self) -> Result<ReadOutcome, InputError>;
}

#[derive(Debug)]
pub enum InputError {
    Io(std::io::Error),
    LineTooLong(usize),
    TooManyTokens(usize),
    TokenTooLong(usize),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io(e) => write!(f, "read error: {}", e),
            InputError::LineTooLong(max) => {
                write!(f, "input line exceeds {} bytes, discarded", max)
            }
            InputError::TooManyTokens(max) => write!(f, "more than {} words on one line", max),
            InputError::TokenTooLong(max) => write!(f, "word longer than {} bytes", max),
        }
    }
}

impl std::error::Error for InputError {}

impl From<std::io::Error> for InputError {
    fn from(e: std::io::Error) -> Self {
        InputError::Io(e)
    }
}
