use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::kernel::project_root::ResolvedRoot;
use crate::kernel::root_cache::RootCache;
use crate::kernel::services::ports::FsProbe;

/// Interpreter name handed to the `PATH` search when no venv interpreter exists.
pub const DEFAULT_FALLBACK_INTERPRETER: &str = "python3";

/// Venv directory names probed under a project root, in order.
pub const DEFAULT_VENV_DIRS: &[&str] = &[".venv"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterPath {
    /// Absolute path of the interpreter inside a project venv.
    Venv(PathBuf),
    /// Bare command name, resolved through `PATH` by whoever runs it.
    Fallback(String),
}

impl InterpreterPath {
    /// Program to hand to a subprocess, byte-exact.
    pub fn program(&self) -> &OsStr {
        match self {
            Self::Venv(path) => path.as_os_str(),
            Self::Fallback(name) => OsStr::new(name),
        }
    }

    /// Text form for output and JSON configs. Lossy for non-UTF-8 paths; use
    /// [`Self::program`] to spawn.
    pub fn as_command(&self) -> String {
        match self {
            Self::Venv(path) => path.to_string_lossy().to_string(),
            Self::Fallback(name) => name.clone(),
        }
    }

    pub fn is_venv(&self) -> bool {
        matches!(self, Self::Venv(_))
    }
}

impl fmt::Display for InterpreterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Venv(path) => write!(f, "{}", path.display()),
            Self::Fallback(name) => f.write_str(name),
        }
    }
}

/// Interpreter path inside the venv directory `venv_dir` of `root`.
pub fn venv_interpreter(root: &Path, venv_dir: &str) -> PathBuf {
    #[cfg(windows)]
    {
        root.join(venv_dir).join("Scripts").join("python.exe")
    }

    #[cfg(not(windows))]
    {
        root.join(venv_dir).join("bin").join("python")
    }
}

/// Picks the interpreter for a start directory: the project venv if there is
/// one, the fallback name otherwise. Never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterLocator {
    venv_dirs: Vec<String>,
    fallback: String,
}

impl Default for InterpreterLocator {
    fn default() -> Self {
        Self::new(
            DEFAULT_VENV_DIRS.iter().map(|d| d.to_string()).collect(),
            DEFAULT_FALLBACK_INTERPRETER,
        )
    }
}

impl InterpreterLocator {
    pub fn new(venv_dirs: Vec<String>, fallback: impl Into<String>) -> Self {
        Self {
            venv_dirs,
            fallback: fallback.into(),
        }
    }

    pub fn fallback(&self) -> InterpreterPath {
        InterpreterPath::Fallback(self.fallback.clone())
    }

    pub fn locate<P: FsProbe>(
        &self,
        cache: &mut RootCache<P>,
        start_dir: &Path,
    ) -> InterpreterPath {
        let root = cache.get_root(start_dir);
        self.locate_in_root(cache.probe(), &root)
    }

    pub fn locate_for_file<P: FsProbe>(
        &self,
        cache: &mut RootCache<P>,
        file: &Path,
    ) -> InterpreterPath {
        let root = cache.get_root_for_file(file);
        self.locate_in_root(cache.probe(), &root)
    }

    /// Venv interpreter under an already resolved root, or the fallback.
    pub fn locate_in_root<P>(&self, probe: &P, root: &ResolvedRoot) -> InterpreterPath
    where
        P: FsProbe + ?Sized,
    {
        let Some(root) = root.root() else {
            return self.fallback();
        };

        for venv_dir in &self.venv_dirs {
            let candidate = venv_interpreter(root, venv_dir);
            if probe.is_executable(&candidate) {
                tracing::debug!(interpreter = %candidate.display(), "using venv interpreter");
                return InterpreterPath::Venv(candidate);
            }
        }

        tracing::debug!(root = %root.display(), fallback = %self.fallback, "no venv interpreter");
        self.fallback()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/interpreter.rs"]
mod tests;
