use std::path::Path;

use crate::kernel::services::ports::FsProbe;

/// Probe backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFsProbe;

impl FsProbe for LocalFsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.try_exists().unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_executable(&self, path: &Path) -> bool {
        let Ok(meta) = std::fs::metadata(path) else {
            return false;
        };
        if !meta.is_file() {
            return false;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            meta.permissions().mode() & 0o111 != 0
        }

        #[cfg(not(unix))]
        {
            true
        }
    }
}

#[cfg(test)]
pub(crate) use counting::CountingProbe;


#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/probe.rs"]
mod tests;
