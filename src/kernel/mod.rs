//! Headless core: root resolution, the root cache, interpreter lookup.

pub mod command;
pub mod interpreter;
pub mod launch;
pub mod project_root;
pub mod root_cache;
pub mod services;

pub use command::{CommandError, RootCommand};
pub use interpreter::{InterpreterLocator, InterpreterPath};
pub use launch::{DebugLaunchConfig, TestRunnerConfig};
pub use project_root::{normalize_lexically, resolve_root, MarkerSet, ResolvedRoot};
pub use root_cache::{CacheStats, RootCache, SharedRootCache};
