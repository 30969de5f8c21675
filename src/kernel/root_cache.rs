use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rustc_hash::FxHashMap;

use crate::kernel::project_root::{
    normalize_lexically, resolve_root, MarkerSet, ResolvedRoot,
};
use crate::kernel::services::adapters::probe::LocalFsProbe;
use crate::kernel::services::ports::FsProbe;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Memoized root lookups, keyed by start directory.
///
/// Negative results are cached too. Entries never expire: if a marker is
/// created or removed after a directory was looked up, the cached answer stays
/// until [`RootCache::invalidate`] is called.
#[derive(Debug)]
pub struct RootCache<P = LocalFsProbe> {
    probe: P,
    markers: MarkerSet,
    entries: FxHashMap<PathBuf, ResolvedRoot>,
    hits: u64,
    misses: u64,
}

impl RootCache<LocalFsProbe> {
    pub fn new(markers: MarkerSet) -> Self {
        Self::with_probe(LocalFsProbe, markers)
    }
}

impl<P: FsProbe> RootCache<P> {
    pub fn with_probe(probe: P, markers: MarkerSet) -> Self {
        Self {
            probe,
            markers,
            entries: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Cached root for `start_dir`, resolving (and caching) on first use.
    /// Keys are lexically normalized, so `/p/.` and `/p` share an entry.
    pub fn get_root(&mut self, start_dir: &Path) -> ResolvedRoot {
        let start_dir = &normalize_lexically(start_dir);
        if let Some(hit) = self.entries.get(start_dir) {
            self.hits += 1;
            tracing::trace!(dir = %start_dir.display(), "root cache hit");
            return hit.clone();
        }

        self.misses += 1;
        let resolved = resolve_root(&self.probe, start_dir, &self.markers);
        self.entries.insert(start_dir.to_path_buf(), resolved.clone());
        resolved
    }

    /// Same as [`Self::get_root`], keyed on the file's containing directory.
    pub fn get_root_for_file(&mut self, file: &Path) -> ResolvedRoot {
        match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.get_root(parent),
            _ => self.get_root(file),
        }
    }

    pub fn cached(&self, start_dir: &Path) -> Option<&ResolvedRoot> {
        self.entries.get(&normalize_lexically(start_dir))
    }

    /// Drop every entry. Only ever triggered by the user.
    pub fn invalidate(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
        tracing::info!(dropped, "root cache invalidated");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// [`RootCache`] behind a mutex, for hosts that look roots up from several
/// threads. The lock is held across lookup and insert, so concurrent callers
/// for one directory resolve it once.
#[derive(Debug)]
pub struct SharedRootCache<P = LocalFsProbe> {
    inner: Mutex<RootCache<P>>,
}

impl<P: FsProbe> SharedRootCache<P> {
    pub fn new(cache: RootCache<P>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    pub fn get_root(&self, start_dir: &Path) -> ResolvedRoot {
        self.lock().get_root(start_dir)
    }

    pub fn invalidate(&self) {
        self.lock().invalidate();
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// Run `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut RootCache<P>) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    fn lock(&self) -> MutexGuard<'_, RootCache<P>> {
        // A panic mid-lookup can at worst leave one entry missing.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/root_cache.rs"]
mod tests;
