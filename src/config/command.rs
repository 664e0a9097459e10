//! Command prefix configuration values
//!
//! A command prefix is the program (and any leading arguments) used to invoke a
//! tool, e.g. `pip`, `python3 -m pip` or `["sudo", "apt-get"]`. In YAML and in
//! environment variables it may be written either as a single whitespace-separated
//! string or as a list of arguments.

use std::fmt;

use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Program plus leading arguments of an external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPrefix(Vec<String>);

impl CommandPrefix {
    /// Create a prefix from an argument vector
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    /// Parse a whitespace-separated command line
    pub fn parse(line: &str) -> Self {
        Self::new(line.split_whitespace())
    }

    /// The program to execute, if any
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Arguments following the program
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CommandPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

impl<'de> Deserialize<'de> for CommandPrefix {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CommandPrefixVisitor;

        impl<'de> Visitor<'de> for CommandPrefixVisitor {
            type Value = CommandPrefix;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a command line string or a list of arguments")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(CommandPrefix::parse(value))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut args = Vec::new();
                while let Some(arg) = seq.next_element::<String>()? {
                    args.push(arg);
                }
                Ok(CommandPrefix(args))
            }
        }

        deserializer.deserialize_any(CommandPrefixVisitor)
    }
}
