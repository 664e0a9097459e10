//! A single external invocation

use std::fmt;

use serde::Serialize;

use crate::config::CommandPrefix;

/// Program plus arguments of one pipeline command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Build a command from a configured prefix followed by `extra` arguments
    ///
    /// Returns `None` when the prefix is empty.
    pub fn from_prefix<I, S>(prefix: &CommandPrefix, extra: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let program = prefix.program()?.to_string();
        let mut args = prefix.args().to_vec();
        args.extend(extra.into_iter().map(Into::into));
        Some(Self { program, args })
    }

    /// Full argument vector including the program
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-quoted command line, suitable for copy and paste
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Quote `word` for a POSIX shell when it contains anything but safe characters
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
        });
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}
