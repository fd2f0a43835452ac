//! Executable lookup with a `PATH` fallback.
//!
//! Registered targets resolve through the registry. An unqualified name the
//! registry does not know may still name a system tool, so it is searched for
//! on `PATH` before giving up.

use camino::Utf8PathBuf;
use log::debug;
use targetinfo::{TargetRegistry, Tree};

/// Abstraction for searching `PATH`.
#[cfg_attr(test, mockall::automock)]
pub trait ExecutableSearch {
    /// Absolute path of the executable called `name`, if one is found.
    fn find(&self, name: &str) -> Option<Utf8PathBuf>;
}

/// Searches the process `PATH` with the `which` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutableSearch;

impl ExecutableSearch for SystemExecutableSearch {
    fn find(&self, name: &str) -> Option<Utf8PathBuf> {
        let path = which::which(name).ok()?;
        Utf8PathBuf::from_path_buf(path).ok()
    }
}

/// Absolute executable path of `target` in `tree`.
///
/// Qualified UIDs and names with a path separator are never searched for on
/// `PATH`.
#[must_use]
pub fn locate(
    registry: &TargetRegistry,
    target: &str,
    tree: Tree,
    search: &dyn ExecutableSearch,
) -> Option<Utf8PathBuf> {
    if let Some(path) = registry.executable_path(target, tree) {
        return Some(path);
    }
    if !searchable(target) {
        return None;
    }
    let found = search.find(target);
    if let Some(path) = &found {
        debug!("`{target}` is not registered; using {path} from PATH");
    }
    found
}

fn searchable(target: &str) -> bool {
    !target.is_empty() && !target.contains("::") && !target.contains(std::path::is_separator)
}
