use std::path::{Component, Path, PathBuf};

use crate::kernel::services::ports::FsProbe;

/// Markers used when settings do not name any.
pub const DEFAULT_MARKERS: &[&str] = &[
    ".git",
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "requirements.txt",
    "Pipfile",
    "poetry.lock",
    ".venv",
];

/// Ordered list of entry names whose presence marks a project root.
///
/// Only plain entry names are kept: anything empty, `.`/`..`, or containing a
/// path separator is dropped on construction and can never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    names: Vec<String>,
}

impl MarkerSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|name| {
                let ok = is_entry_name(name);
                if !ok {
                    tracing::warn!(marker = %name, "ignoring marker that is not a plain entry name");
                }
                ok
            })
            .collect();
        Self { names }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS.iter().copied())
    }
}

fn is_entry_name(name: &str) -> bool {
    if name.chars().any(std::path::is_separator) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Drop `.` components and fold `..` into its parent, without touching the
/// filesystem. `..` at the filesystem root stays at the root; leading `..` of a
/// relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Outcome of a root lookup. "No root" is an ordinary value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedRoot {
    Found { root: PathBuf, marker: String },
    NotFound,
}

impl ResolvedRoot {
    pub fn root(&self) -> Option<&Path> {
        match self {
            Self::Found { root, .. } => Some(root),
            Self::NotFound => None,
        }
    }

    /// The marker that selected the root (the first configured one present there).
    pub fn marker(&self) -> Option<&str> {
        match self {
            Self::Found { marker, .. } => Some(marker),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Walk from `start_dir` towards the filesystem root and return the first
/// directory holding any marker.
///
/// `start_dir` is normalized lexically first, so a trailing `..` means its
/// parent rather than being stripped as one component. `start_dir` itself is
/// checked first; inside one directory markers are tried in configured order.
/// The walk stops at the filesystem root. This never reads or writes a cache;
/// see [`crate::kernel::root_cache::RootCache`].
pub fn resolve_root<P>(probe: &P, start_dir: &Path, markers: &MarkerSet) -> ResolvedRoot
where
    P: FsProbe + ?Sized,
{
    if markers.is_empty() {
        return ResolvedRoot::NotFound;
    }

    let start = normalize_lexically(start_dir);
    let mut cur = start.as_path();
    loop {
        if let Some(marker) = markers.iter().find(|name| probe.exists(&cur.join(name))) {
            tracing::debug!(
                start = %start_dir.display(),
                root = %cur.display(),
                marker,
                "project root resolved"
            );
            return ResolvedRoot::Found {
                root: cur.to_path_buf(),
                marker: marker.to_string(),
            };
        }

        match cur.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => cur = parent,
            _ => break,
        }
    }

    tracing::debug!(start = %start_dir.display(), "no project root found");
    ResolvedRoot::NotFound
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/project_root.rs"]
mod tests;
