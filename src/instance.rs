//! Process-wide registry instance.
//!
//! Programs that can name their manifest at startup should build a
//! [`TargetRegistry`] and hand it to [`install`]. Code that only has ambient
//! configuration can call [`instance`], which loads the registry from the
//! environment the first time it is needed. Either way exactly one registry
//! is ever stored; concurrent first callers block until it is ready.

use log::warn;
use once_cell::sync::OnceCell;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::registry::TargetRegistry;

/// A write-once slot for a registry.
///
/// The process-wide instance is a static `RegistryCell`; tests and embedders
/// can create their own.
#[derive(Debug, Default)]
pub struct RegistryCell {
    cell: OnceCell<TargetRegistry>,
}

impl RegistryCell {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Store `registry` unless the slot is already filled.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyInitialised`] when a registry was
    /// installed or loaded earlier.
    pub fn install(&self, registry: TargetRegistry) -> Result<&TargetRegistry> {
        self.cell
            .set(registry)
            .map_err(|_| RegistryError::AlreadyInitialised)?;
        self.cell.get().ok_or(RegistryError::AlreadyInitialised)
    }

    /// Returns the stored registry without initialising it.
    #[must_use]
    pub fn get(&self) -> Option<&TargetRegistry> {
        self.cell.get()
    }

    /// Returns the stored registry, loading it from `config` on first use.
    ///
    /// A failed load leaves the slot empty so a later call may retry.
    ///
    /// # Errors
    ///
    /// Returns the load error from [`RegistryConfig::load_registry`].
    pub fn try_get_or_load(&self, config: &RegistryConfig) -> Result<&TargetRegistry> {
        self.cell.get_or_try_init(|| config.load_registry())
    }

    /// Returns the stored registry, loading it from `config` on first use.
    ///
    /// When the metadata cannot be loaded a warning is logged and
    /// [`RegistryConfig::fallback_registry`] is stored instead, so lookups
    /// keep working and report every target as unknown.
    #[must_use]
    pub fn get_or_load(&self, config: &RegistryConfig) -> &TargetRegistry {
        self.cell.get_or_init(|| {
            config.load_registry().unwrap_or_else(|err| {
                warn!("using an empty target registry: {err}");
                config.fallback_registry()
            })
        })
    }
}

static GLOBAL: RegistryCell = RegistryCell::new();

/// Seed the process-wide registry.
///
/// # Errors
///
/// Returns [`RegistryError::AlreadyInitialised`] when the registry has
/// already been installed or loaded.
pub fn install(registry: TargetRegistry) -> Result<&'static TargetRegistry> {
    GLOBAL.install(registry)
}

/// The process-wide registry, loaded from the environment on first access.
///
/// See [`RegistryCell::get_or_load`] for the behaviour when the manifest is
/// missing or invalid.
#[must_use]
pub fn instance() -> &'static TargetRegistry {
    GLOBAL.get_or_load(&RegistryConfig::from_env())
}

/// The process-wide registry, surfacing load failures.
///
/// # Errors
///
/// Returns the error from [`RegistryConfig::load_registry`] when the
/// registry has not been initialised yet and cannot be loaded.
pub fn try_instance() -> Result<&'static TargetRegistry> {
    GLOBAL.try_get_or_load(&RegistryConfig::from_env())
}
