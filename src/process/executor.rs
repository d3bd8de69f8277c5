use std::ffi::CString;
use std::fmt;
use std::io::{self, IsTerminal, Write};
use std::os::fd::AsFd;

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{execvp, fork, getpgrp, setpgid, tcsetpgrp, ForkResult, Pid};

use super::{signal, ProcessError};
use crate::flags::Flags;

/// How a waited-on child ended, or why the wait returned early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Exited(i32),
    Signaled(Signal),
    /// Stopped (e.g. Ctrl-Z). There is no job control, so the shell takes
    /// the terminal back and leaves the process stopped.
    Stopped(Signal),
}

impl ExitOutcome {
    pub fn terminated_normally(&self) -> bool {
        matches!(self, ExitOutcome::Exited(_))
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExitOutcome::Exited(code) => Some(*code),
            ExitOutcome::Signaled(_) | ExitOutcome::Stopped(_) => None,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }

    fn from_wait_status(status: WaitStatus) -> Option<Self> {
        match status {
            WaitStatus::Exited(_, code) => Some(ExitOutcome::Exited(code)),
            WaitStatus::Signaled(_, sig, _) => Some(ExitOutcome::Signaled(sig)),
            WaitStatus::Stopped(_, sig) => Some(ExitOutcome::Stopped(sig)),
            _ => None,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Exited(code) => write!(f, "Exit status: {}", code),
            ExitOutcome::Signaled(sig) => write!(f, "Terminated by signal: {}", sig),
            ExitOutcome::Stopped(sig) => write!(f, "Stopped by signal: {}", sig),
        }
    }
}

/// Runs external programs in their own process group and waits for them.
#[derive(Clone)]
pub struct ProcessLauncher {
    quiet_mode: bool,
}

impl ProcessLauncher {
    pub fn new(flags: &Flags) -> Self {
        ProcessLauncher {
            quiet_mode: flags.is_set("quiet"),
        }
    }

    /// Forks, execs `argv[0]` with `argv` in the child and blocks until it
    /// terminates or stops. Anything but a clean exit is printed.
    pub fn spawn_process(&self, argv: &[String]) -> Result<ExitOutcome, ProcessError> {
        let c_args = to_c_args(argv)?;
        let owns_terminal = io::stdin().is_terminal();

        // Nothing buffered may be written twice once the address space is copied.
        io::stdout().flush().ok();
        io::stderr().flush().ok();

        // SAFETY: the interpreter is single threaded, and the child only runs
        // `child_setup` before exec or `_exit`.
        match unsafe { fork() }.map_err(ProcessError::ForkFailed)? {
            ForkResult::Child => child_setup(&c_args, owns_terminal),
            ForkResult::Parent { child } => {
                tracing::debug!(pid = child.as_raw(), program = %argv[0], "spawned");
                // Either side may win this race; both calls name the same group.
                setpgid(child, child).ok();
                if owns_terminal {
                    give_terminal_to(child);
                }

                let result = wait_for(child);

                if owns_terminal {
                    give_terminal_to(getpgrp());
                }

                let outcome = result?;
                tracing::debug!(pid = child.as_raw(), ?outcome, "reaped");
                if !outcome.success() && !self.quiet_mode {
                    println!("{}", outcome);
                }
                Ok(outcome)
            }
        }
    }
}

fn to_c_args(argv: &[String]) -> Result<Vec<CString>, ProcessError> {
    if argv.is_empty() {
        return Err(ProcessError::EmptyCommand);
    }
    argv.iter()
        .map(|arg| {
            CString::new(arg.as_bytes()).map_err(|_| ProcessError::InvalidArgument(arg.clone()))
        })
        .collect()
}

fn give_terminal_to(pgrp: Pid) {
    if let Err(e) = tcsetpgrp(io::stdin().as_fd(), pgrp) {
        tracing::warn!(pgrp = pgrp.as_raw(), "tcsetpgrp failed: {}", e);
    }
}

/// Blocks on exactly this pid until it terminates or stops. Interrupts
/// during the wait are left on the flag for the loop and the wait is resumed.
fn wait_for(child: Pid) -> Result<ExitOutcome, ProcessError> {
    loop {
        match waitpid(child, Some(WaitPidFlag::WUNTRACED)) {
            Ok(status) => {
                if let Some(outcome) = ExitOutcome::from_wait_status(status) {
                    return Ok(outcome);
                }
            }
            Err(Errno::EINTR) => continue,
            Err(e) => return Err(ProcessError::WaitFailed(e)),
        }
    }
}

/// New group, default signals, new image. Never returns into the shell.
fn child_setup(argv: &[CString], owns_terminal: bool) -> ! {
    if let Err(e) = setpgid(Pid::from_raw(0), Pid::from_raw(0)) {
        eprintln!("setpgid failed: {}", e);
        child_exit();
    }
    if owns_terminal {
        // SIGTTOU is still ignored here, so a background group may take the tty.
        tcsetpgrp(io::stdin().as_fd(), getpgrp()).ok();
    }

    if let Err(e) = signal::restore_default_handlers() {
        eprintln!("Signal error in child: {}", e);
        child_exit();
    }

    let err = match execvp(&argv[0], argv) {
        Ok(never) => match never {},
        Err(e) => e,
    };
    eprintln!("{}: {}", argv[0].to_string_lossy(), describe_exec_error(err));
    child_exit()
}

fn describe_exec_error(err: Errno) -> String {
    match err {
        Errno::ENOENT => "command not found".to_string(),
        Errno::EACCES => "permission denied".to_string(),
        other => other.desc().to_string(),
    }
}

fn child_exit() -> ! {
    io::stderr().flush().ok();
    // SAFETY: `_exit` skips the parent's atexit handlers and stdio buffers.
    unsafe { libc::_exit(libc::EXIT_FAILURE) }
}
