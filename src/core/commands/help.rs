use std::io::Write;

use super::{Command, CommandError};

const HELP_TEXT: &str = "\
myshell builtins:
  cd [dir]      change directory (default: $HOME)
  clr           clear the screen
  dir [dir]     list the contents of a directory (default: .)
  echo [text]   print text, words separated by single spaces
  environ       list the environment
  help          show this help
  pause         wait until Enter is pressed
  pwd           print the working directory
  quit, exit    leave the shell

Any other command is run as an external program found on $PATH.
Ctrl-C at the prompt starts a new line; while a program runs it goes
to that program only.";

#[derive(Debug, Clone)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, _args: &[String], out: &mut dyn Write) -> Result<(), CommandError> {
        writeln!(out, "{}", HELP_TEXT)?;
        Ok(())
    }
}
