//! Setup data handed to the debug adapter and test runner configurators.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::kernel::interpreter::InterpreterPath;
use crate::kernel::project_root::ResolvedRoot;

fn working_dir(root: &ResolvedRoot, start_dir: &Path) -> PathBuf {
    root.root().unwrap_or(start_dir).to_path_buf()
}

/// Launch request for a python debug adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugLaunchConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub request: String,
    pub program: PathBuf,
    pub python_path: String,
    pub cwd: PathBuf,
    pub console: String,
}

impl DebugLaunchConfig {
    /// Launch `file` with `interpreter`, running from the project root (or the
    /// file's directory when there is no root).
    pub fn for_file(file: &Path, interpreter: &InterpreterPath, root: &ResolvedRoot) -> Self {
        let start_dir = file.parent().unwrap_or(file);
        Self {
            name: "Launch file".to_string(),
            kind: "python".to_string(),
            request: "launch".to_string(),
            program: file.to_path_buf(),
            python_path: interpreter.as_command(),
            cwd: working_dir(root, start_dir),
            console: "integratedTerminal".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunnerConfig {
    pub runner: String,
    pub python: String,
    pub cwd: PathBuf,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl TestRunnerConfig {
    /// `pytest` run through `interpreter`. `target` narrows the run to one file.
    pub fn pytest(
        interpreter: &InterpreterPath,
        root: &ResolvedRoot,
        start_dir: &Path,
        target: Option<&Path>,
    ) -> Self {
        let args = target
            .map(|t| vec![t.to_string_lossy().to_string()])
            .unwrap_or_default();
        Self {
            runner: "pytest".to_string(),
            python: interpreter.as_command(),
            cwd: working_dir(root, start_dir),
            args,
        }
    }

    /// Full argv: `<python> -m pytest [args...]`.
    pub fn command_line(&self) -> Vec<String> {
        let mut argv = vec![self.python.clone(), "-m".to_string(), self.runner.clone()];
        argv.extend(self.args.iter().cloned());
        argv
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/launch.rs"]
mod tests;
