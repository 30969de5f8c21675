//! zroot - project root resolution
//!
//! Layout:
//! - kernel: root resolution, the root cache and interpreter lookup
//! - kernel::services::ports: contracts (FsProbe, Settings)
//! - kernel::services::adapters: local implementations (filesystem, settings files, RootService)

pub mod kernel;

pub use kernel::services::adapters::RootService;
pub use kernel::{
    resolve_root, InterpreterLocator, InterpreterPath, MarkerSet, ResolvedRoot, RootCache,
    RootCommand,
};
