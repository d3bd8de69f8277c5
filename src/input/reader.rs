use std::io::{ErrorKind, Read};

use super::{InputError, LineSource};
use crate::process::InterruptFlag;

const FALLBACK_LINE_MAX: usize = 131_072;
const CHUNK_SIZE: usize = 4096;

/// The platform's maximum command-line length (`ARG_MAX`).
pub fn max_line_length() -> usize {
    // SAFETY: sysconf only reads a system constant.
    let limit = unsafe { libc::sysconf(libc::_SC_ARG_MAX) };
    if limit > 0 {
        limit as usize
    } else {
        FALLBACK_LINE_MAX
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// One line, newline stripped.
    Line(String),
    /// The read was cut short by SIGINT; the flag is still raised.
    Interrupted,
    Eof,
}

/// Reads newline-terminated lines straight from a raw source.
///
/// `BufRead::read_line` retries on `EINTR`, which would swallow Ctrl-C at an
/// idle prompt, so buffering is done here instead.
pub struct LineReader<'a, R> {
    inner: R,
    flag: &'a InterruptFlag,
    pending: Vec<u8>,
    discarding: bool,
    max_len: usize,
}

impl<'a, R: Read> LineReader<'a, R> {
    pub fn new(inner: R, flag: &'a InterruptFlag) -> Self {
        Self {
            inner,
            flag,
            pending: Vec::new(),
            discarding: false,
            max_len: max_line_length(),
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn read_line(&mut self) -> Result<ReadOutcome, InputError> {
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let rest = self.pending.split_off(pos + 1);
                let mut line = std::mem::replace(&mut self.pending, rest);
                line.pop();
                return self.finish_line(line);
            }

            if self.pending.len() > self.max_len {
                self.pending.clear();
                self.discarding = true;
            }

            if self.flag.is_raised() {
                self.reset();
                return Ok(ReadOutcome::Interrupted);
            }

            match self.inner.read(&mut chunk) {
                Ok(0) if self.pending.is_empty() && !self.discarding => {
                    return Ok(ReadOutcome::Eof);
                }
                Ok(0) => {
                    let line = std::mem::take(&mut self.pending);
                    return self.finish_line(line);
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {
                    // Some other signal: just read again. Ours is caught above.
                    continue;
                }
                Err(e) => return Err(InputError::Io(e)),
            }
        }
    }

    fn finish_line(&mut self, line: Vec<u8>) -> Result<ReadOutcome, InputError> {
        if std::mem::take(&mut self.discarding) || line.len() > self.max_len {
            return Err(InputError::LineTooLong(self.max_len));
        }
        let line = match String::from_utf8(line) {
            Ok(line) => line,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Ok(ReadOutcome::Line(line))
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.discarding = false;
    }
}

impl<R: Read> LineSource for LineReader<'_, R> {
    fn read_line(&mut self) -> Result<ReadOutcome, InputError> {
        LineReader::read_line(self)
    }
}
