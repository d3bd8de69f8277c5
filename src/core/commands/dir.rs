use std::fs;
use std::io::Write;
use std::path::Path;

use super::{Command, CommandError};

/// Lists a directory's entries by name; the current directory by default.
#[derive(Debug, Clone)]
pub struct DirCommand;

impl Command for DirCommand {
    fn execute(&self, args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        let path = Path::new(args.first().map(String::as_str).unwrap_or("."));
        let entries = fs::read_dir(path)
            .map_err(|e| CommandError::ExecutionError(format!("dir: {}: {}", path.display(), e)))?;

        let mut names = Vec::new();
        for entry in entries {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();

        for name in names {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }
}
