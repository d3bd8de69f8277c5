use std::io::Write;

use super::{Command, CommandError};

#[derive(Debug, Clone)]
pub struct EchoCommand;

/// Joins arguments with single spaces, failing instead of aborting when
/// the allocation cannot be made.
pub(crate) fn join_args(args: &[String]) -> Result<String, CommandError> {
    let len = args.iter().map(String::len).sum::<usize>() + args.len().saturating_sub(1);
    let mut joined = String::new();
    joined
        .try_reserve_exact(len)
        .map_err(|e| CommandError::Allocation(format!("echo: {}", e)))?;

    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            joined.push(' ');
        }
        joined.push_str(arg);
    }
    Ok(joined)
}

impl Command for EchoCommand {
    fn execute(&self, args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let text = join_args(args)?;
        writeln!(out, "{}", text)?;
        Ok(())
    }
}
