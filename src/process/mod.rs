use std::fmt;

pub mod executor;
pub mod signal;

pub use executor::{ExitOutcome, ProcessLauncher};
pub use signal::InterruptFlag;

#[derive(Debug)]
pub enum ProcessError {
    EmptyCommand,
    InvalidArgument(String),
    ForkFailed(nix::Error),
    WaitFailed(nix::Error),
    SignalError(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::EmptyCommand => write!(f, "no program to run"),
            ProcessError::InvalidArgument(arg) => {
                write!(f, "argument contains an interior NUL byte: {:?}", arg)
            }
            ProcessError::ForkFailed(e) => write!(f, "fork failed: {}", e),
            ProcessError::WaitFailed(e) => write!(f, "waitpid failed: {}", e),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
