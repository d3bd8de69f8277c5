use super::InputError;

/// A command name and its arguments, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub name: String,
    pub arguments: Vec<String>,
}

impl CommandLine {
    /// The full token sequence, name first, as passed to `execvp`.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(self.arguments.iter().cloned())
            .collect()
    }
}

/// Splits a line on whitespace runs. No quoting, no escapes.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    max_tokens: usize,
    max_token_len: usize,
}

impl Tokenizer {
    pub fn new(limit: usize) -> Self {
        Self {
            max_tokens: limit,
            max_token_len: limit,
        }
    }

    /// Returns `None` for a blank line.
    pub fn tokenize(&self, line: &str) -> Result<Option<CommandLine>, InputError> {
        let mut tokens = Vec::new();
        for token in line.trim().split_whitespace() {
            if tokens.len() == self.max_tokens {
                return Err(InputError::TooManyTokens(self.max_tokens));
            }
            if token.len() > self.max_token_len {
                return Err(InputError::TokenTooLong(self.max_token_len));
            }
            tokens.push(token.to_string());
        }

        let mut tokens = tokens.into_iter();
        Ok(tokens.next().map(|name| CommandLine {
            name,
            arguments: tokens.collect(),
        }))
    }
}
