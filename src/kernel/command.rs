//! Commands the root service exposes to a host.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RootCommand {
    Root(PathBuf),
    Interpreter(PathBuf),
    DebugConfig(PathBuf),
    TestConfig(PathBuf),
    /// Clear the root cache. The only way cached roots are ever dropped.
    Invalidate,
    Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    UnexpectedArgument { command: &'static str, arg: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "empty command"),
            CommandError::Unknown(name) => write!(f, "unknown command: {}", name),
            CommandError::MissingArgument(command) => {
                write!(f, "`{}` needs a path argument", command)
            }
            CommandError::UnexpectedArgument { command, arg } => {
                write!(f, "`{}` takes no arguments (got `{}`)", command, arg)
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl RootCommand {
    pub const NAMES: &'static [&'static str] = &[
        "root",
        "interpreter",
        "debug-config",
        "test-config",
        "invalidate",
        "stats",
    ];

    /// Parse one command line: a name, then everything after the first run of
    /// whitespace as the (single) path argument, so paths may contain spaces.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim())),
            None => (line, None),
        };
        Self::from_parts(name, arg)
    }

    pub fn from_parts(name: &str, arg: Option<&str>) -> Result<Self, CommandError> {
        let arg = arg.filter(|a| !a.is_empty());
        let path = |command: &'static str| {
            arg.map(PathBuf::from)
                .ok_or(CommandError::MissingArgument(command))
        };
        let no_arg = |command: &'static str, cmd: RootCommand| match arg {
            Some(arg) => Err(CommandError::UnexpectedArgument {
                command,
                arg: arg.to_string(),
            }),
            None => Ok(cmd),
        };

        match name {
            "root" => path("root").map(Self::Root),
            "interpreter" | "python" => path("interpreter").map(Self::Interpreter),
            "debug-config" => path("debug-config").map(Self::DebugConfig),
            "test-config" => path("test-config").map(Self::TestConfig),
            "invalidate" => no_arg("invalidate", Self::Invalidate),
            "stats" => no_arg("stats", Self::Stats),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Root(_) => "root",
            Self::Interpreter(_) => "interpreter",
            Self::DebugConfig(_) => "debug-config",
            Self::TestConfig(_) => "test-config",
            Self::Invalidate => "invalidate",
            Self::Stats => "stats",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/command.rs"]
mod tests;
