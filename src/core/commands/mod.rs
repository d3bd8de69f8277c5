use std::collections::BTreeMap;
use std::io::Write;

mod cd;
mod clr;
mod dir;
mod echo;
mod environ;
mod exit;
mod help;
mod pause;
mod pwd;

pub use cd::CdCommand;
pub use clr::ClrCommand;
pub use dir::DirCommand;
pub use echo::EchoCommand;
pub use environ::EnvironCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use pause::PauseCommand;
pub use pwd::PwdCommand;

use crate::flags::Flags;
use crate::input::{CommandLine, LineSource};
use crate::process::{ProcessError, ProcessLauncher};

#[derive(Debug)]
pub enum CommandError {
    Usage(String),
    ExecutionError(String),
    Allocation(String),
    IoError(std::io::Error),
    ProcessError(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Usage(msg) => write!(f, "{}", msg),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
            CommandError::Allocation(msg) => write!(f, "allocation failed: {}", msg),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::ProcessError(err) => write!(f, "Process error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

/// A builtin. Output goes to `out` so callers decide where it lands.
pub trait Command {
    fn execute(&self, args: &[String], out: &mut dyn Write) -> Result<(), CommandError>;
}

/// How many arguments a builtin accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    None,
    AtMostOne,
    Any,
}

impl Arity {
    fn accepts(self, count: usize) -> bool {
        match self {
            Arity::None => count == 0,
            Arity::AtMostOne => count <= 1,
            Arity::Any => true,
        }
    }
}

#[derive(Debug, Clone)]
pub enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Clr(ClrCommand),
    Environ(EnvironCommand),
    Dir(DirCommand),
    Echo(EchoCommand),
    Pwd(PwdCommand),
    Help(HelpCommand),
    Pause(PauseCommand),
}

impl CommandType {
    fn arity(&self) -> Arity {
        match self {
            CommandType::Cd(_) | CommandType::Dir(_) => Arity::AtMostOne,
            CommandType::Echo(_) | CommandType::Exit(_) => Arity::Any,
            CommandType::Clr(_)
            | CommandType::Environ(_)
            | CommandType::Pwd(_)
            | CommandType::Help(_)
            | CommandType::Pause(_) => Arity::None,
        }
    }

    fn usage(&self) -> &'static str {
        match self {
            CommandType::Cd(_) => "myshell: cd: too many arguments",
            CommandType::Dir(_) => "Usage: dir [path]",
            CommandType::Clr(_) => "Usage: clr",
            CommandType::Environ(_) => "Usage: environ",
            CommandType::Pwd(_) => "Usage: pwd",
            CommandType::Help(_) => "Usage: help",
            CommandType::Pause(_) => "Usage: pause",
            CommandType::Echo(_) => "Usage: echo [text...]",
            CommandType::Exit(_) => "Usage: quit",
        }
    }

    /// Runs the builtin. `input` is the shell's own line source, used by
    /// builtins that wait on the user.
    fn invoke(
        &self,
        args: &[String],
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, out),
            CommandType::Exit(cmd) => cmd.execute(args, out),
            CommandType::Clr(cmd) => cmd.execute(args, out),
            CommandType::Environ(cmd) => cmd.execute(args, out),
            CommandType::Dir(cmd) => cmd.execute(args, out),
            CommandType::Echo(cmd) => cmd.execute(args, out),
            CommandType::Pwd(cmd) => cmd.execute(args, out),
            CommandType::Help(cmd) => cmd.execute(args, out),
            CommandType::Pause(cmd) => cmd.wait_for_enter(input, out),
        }
    }
}

/// Routes a command line to a builtin or, failing that, to a child process.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    process_launcher: ProcessLauncher,
}

impl CommandExecutor {
    pub fn new(flags: &Flags) -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("quit", CommandType::Exit(ExitCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("clr", CommandType::Clr(ClrCommand));
        commands.insert("environ", CommandType::Environ(EnvironCommand));
        commands.insert("dir", CommandType::Dir(DirCommand));
        commands.insert("echo", CommandType::Echo(EchoCommand));
        commands.insert("pwd", CommandType::Pwd(PwdCommand));
        commands.insert("help", CommandType::Help(HelpCommand));
        commands.insert("pause", CommandType::Pause(PauseCommand));

        Self {
            commands,
            process_launcher: ProcessLauncher::new(flags),
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<&CommandType> {
        self.commands.get(name)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn execute(
        &self,
        command: &CommandLine,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        match self.resolve(&command.name) {
            Some(builtin) => {
                if !builtin.arity().accepts(command.arguments.len()) {
                    return Err(CommandError::Usage(builtin.usage().to_string()));
                }
                tracing::debug!(name = %command.name, "builtin");
                builtin.invoke(&command.arguments, input, out)
            }
            None => {
                tracing::debug!(name = %command.name, "external");
                out.flush()?;
                self.process_launcher.spawn_process(&command.argv())?;
                Ok(())
            }
        }
    }
}

/// Serializes tests that read or change the working directory.
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
