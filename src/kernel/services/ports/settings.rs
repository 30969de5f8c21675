use serde::{Deserialize, Serialize};

use crate::kernel::interpreter::{DEFAULT_FALLBACK_INTERPRETER, DEFAULT_VENV_DIRS};
use crate::kernel::project_root::DEFAULT_MARKERS;

/// User settings, read from `settings.json`. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Project-root markers, checked in order in every directory.
    pub markers: Vec<String>,
    /// Virtual-environment directory names under a project root.
    pub venv_dirs: Vec<String>,
    /// Interpreter name used when no venv interpreter is found.
    pub fallback_interpreter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            venv_dirs: DEFAULT_VENV_DIRS.iter().map(|d| d.to_string()).collect(),
            fallback_interpreter: DEFAULT_FALLBACK_INTERPRETER.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
