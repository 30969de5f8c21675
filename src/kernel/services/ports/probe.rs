//! Filesystem probe contract.
//!
//! Every filesystem touch made by root resolution and interpreter lookup goes
//! through this trait, so a host (or a test) can swap the implementation.

use std::path::Path;
use std::sync::Arc;

/// Existence-only questions about filesystem entries.
///
/// Implementations must never fail: any I/O error (permission denied, broken
/// symlink, ...) answers `false`.
pub trait FsProbe {
    /// `true` if `path` names any entry (file or directory). Symlinks are followed.
    fn exists(&self, path: &Path) -> bool;

    /// `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// `true` if `path` is a regular file the current user could execute.
    fn is_executable(&self, path: &Path) -> bool;
}

impl<P: FsProbe + ?Sized> FsProbe for &P {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn is_executable(&self, path: &Path) -> bool {
        (**self).is_executable(path)
    }
}

impl<P: FsProbe + ?Sized> FsProbe for Arc<P> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn is_executable(&self, path: &Path) -> bool {
        (**self).is_executable(path)
    }
}
