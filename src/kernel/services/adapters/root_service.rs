//! Root service: owns the root cache and answers host commands.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::probe::LocalFsProbe;
use crate::kernel::command::RootCommand;
use crate::kernel::interpreter::{InterpreterLocator, InterpreterPath};
use crate::kernel::launch::{DebugLaunchConfig, TestRunnerConfig};
use crate::kernel::project_root::{normalize_lexically, MarkerSet, ResolvedRoot};
use crate::kernel::root_cache::{CacheStats, RootCache};
use crate::kernel::services::ports::{FsProbe, Settings};

pub struct RootService<P = LocalFsProbe> {
    cache: RootCache<P>,
    locator: InterpreterLocator,
    cwd: PathBuf,
    /// Host path -> start directory, so a repeated path skips the `is_dir` check.
    /// Cleared together with the root cache.
    start_dirs: FxHashMap<PathBuf, PathBuf>,
}

impl RootService<LocalFsProbe> {
    pub fn from_settings(settings: &Settings, cwd: PathBuf) -> Self {
        Self::with_probe(LocalFsProbe, settings, cwd)
    }
}

impl<P: FsProbe> RootService<P> {
    pub fn with_probe(probe: P, settings: &Settings, cwd: PathBuf) -> Self {
        let markers = MarkerSet::new(settings.markers.iter().cloned());
        let locator = InterpreterLocator::new(
            settings.venv_dirs.clone(),
            settings.fallback_interpreter.clone(),
        );
        Self {
            cache: RootCache::with_probe(probe, markers),
            locator,
            cwd,
            start_dirs: FxHashMap::default(),
        }
    }

    pub fn cache(&self) -> &RootCache<P> {
        &self.cache
    }

    /// `path` joined onto the working directory and lexically normalized.
    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            normalize_lexically(path)
        } else {
            normalize_lexically(&self.cwd.join(path))
        }
    }

    /// Directory to start resolving from: `path` itself if it is a directory,
    /// otherwise its parent. Only the first call for a path touches the
    /// filesystem.
    pub fn start_dir_for(&mut self, path: &Path) -> PathBuf {
        let path = self.absolute(path);
        if let Some(start) = self.start_dirs.get(&path) {
            return start.clone();
        }

        let start = if self.cache.probe().is_dir(&path) {
            path.clone()
        } else {
            match path.parent() {
                Some(parent) => parent.to_path_buf(),
                None => path.clone(),
            }
        };
        self.start_dirs.insert(path, start.clone());
        start
    }

    pub fn resolve_root(&mut self, path: &Path) -> ResolvedRoot {
        let start = self.start_dir_for(path);
        self.cache.get_root(&start)
    }

    pub fn locate_interpreter(&mut self, path: &Path) -> InterpreterPath {
        let start = self.start_dir_for(path);
        self.locator.locate(&mut self.cache, &start)
    }

    pub fn debug_config(&mut self, file: &Path) -> DebugLaunchConfig {
        let file = self.absolute(file);
        let start = self.start_dir_for(&file);
        let root = self.cache.get_root(&start);
        let interpreter = self.locator.locate_in_root(self.cache.probe(), &root);
        DebugLaunchConfig::for_file(&file, &interpreter, &root)
    }

    pub fn test_config(&mut self, path: &Path) -> TestRunnerConfig {
        let path = self.absolute(path);
        let start = self.start_dir_for(&path);
        let root = self.cache.get_root(&start);
        let interpreter = self.locator.locate_in_root(self.cache.probe(), &root);
        let target = (start != path).then_some(path.as_path());
        TestRunnerConfig::pytest(&interpreter, &root, &start, target)
    }

    pub fn invalidate(&mut self) {
        self.start_dirs.clear();
        self.cache.invalidate();
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Run a command and render its output, if it has any.
    pub fn execute(&mut self, command: &RootCommand) -> Option<String> {
        tracing::debug!(command = command.name(), "execute");
        match command {
            RootCommand::Root(path) => Some(match self.resolve_root(path) {
                ResolvedRoot::Found { root, .. } => root.display().to_string(),
                ResolvedRoot::NotFound => "none".to_string(),
            }),
            RootCommand::Interpreter(path) => Some(self.locate_interpreter(path).as_command()),
            RootCommand::DebugConfig(file) => Some(to_json(&self.debug_config(file))),
            RootCommand::TestConfig(path) => Some(to_json(&self.test_config(path))),
            RootCommand::Invalidate => {
                self.invalidate();
                None
            }
            RootCommand::Stats => {
                let stats = self.stats();
                Some(format!(
                    "entries={} hits={} misses={}",
                    stats.entries, stats.hits, stats.misses
                ))
            }
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/root_service.rs"]
mod tests;
