//! Interrupt handling for the interpreter process.
//!
//! SIGINT never terminates the shell. The handler only stores `true` into a
//! process-wide [`InterruptFlag`]; the main loop reads and clears it once per
//! iteration. The handler is installed without `SA_RESTART`, so a blocking
//! `read(2)` on stdin returns `EINTR` as soon as the signal lands.

use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{sigaction, signal, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::process::ProcessError;

/// A single word written from signal context and consumed by the loop.
#[derive(Debug)]
pub struct InterruptFlag {
    raised: AtomicBool,
}

impl Default for InterruptFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptFlag {
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }

    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Clears the flag, returning whether it was set.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::SeqCst)
    }
}

static INTERRUPTED: InterruptFlag = InterruptFlag::new();

/// The flag set by the installed SIGINT handler.
pub fn interrupt_flag() -> &'static InterruptFlag {
    &INTERRUPTED
}

extern "C" fn handle_sigint(_: libc::c_int) {
    // Only an atomic store is async-signal-safe here.
    INTERRUPTED.raise();
}

/// Installs the SIGINT handler and ignores SIGTTOU and SIGTSTP.
///
/// Every other signal is blocked while the handler runs. Failure here is
/// fatal to startup.
pub fn setup_signal_handlers() -> Result<(), ProcessError> {
    let action = SigAction::new(
        SigHandler::Handler(handle_sigint),
        SaFlags::empty(),
        SigSet::all(),
    );

    // SAFETY: the handler touches nothing but an atomic.
    unsafe { sigaction(Signal::SIGINT, &action) }
        .map_err(|e| ProcessError::SignalError(format!("sigaction(SIGINT): {}", e)))?;

    // SIGTTOU: reclaiming the terminal from a background group would stop us.
    // SIGTSTP: with no job control nothing could resume a stopped shell.
    for sig in [Signal::SIGTTOU, Signal::SIGTSTP] {
        unsafe { signal(sig, SigHandler::SigIgn) }
            .map_err(|e| ProcessError::SignalError(format!("signal({}): {}", sig, e)))?;
    }

    tracing::debug!("SIGINT handler installed");
    Ok(())
}

/// Puts SIGINT, SIGTTOU and SIGTSTP back to their default dispositions.
///
/// Called in a freshly forked child before it replaces its image.
pub fn restore_default_handlers() -> Result<(), ProcessError> {
    for sig in [Signal::SIGINT, Signal::SIGTTOU, Signal::SIGTSTP] {
        // SAFETY: SIG_DFL installs no Rust code.
        unsafe { signal(sig, SigHandler::SigDfl) }
            .map_err(|e| ProcessError::SignalError(format!("signal({}): {}", sig, e)))?;
    }
    Ok(())
}
