//! Target manifest loading and validation.
//!
//! The build configuration step writes a TOML manifest listing every
//! executable target the project knows about. The manifest names the
//! project's own namespace and one `[[target]]` table per target:
//!
//! ```toml
//! namespace = "utilitiestest"
//!
//! [[target]]
//! name = "helloworld"
//! build_dir = "/build/utilitiestest/bin"
//! install_dir = "/usr/local/bin/utilitiestest"
//!
//! [[target]]
//! namespace = "basis"
//! name = "basisproject.sh"
//! executable = "basisproject"
//! build_dir = "/opt/basis/bin"
//! ```
//!
//! Targets without a `namespace` belong to the project; an empty namespace
//! places the target in the global namespace. A target without
//! `install_dir` is external: it is used from where it already lives.

use std::collections::HashSet;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;
use targetinfo_common::{SEPARATOR, TargetUid};

use crate::error::MetadataError;

/// Parsed contents of a target manifest.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TargetManifest {
    /// Namespace assumed for unqualified target names.
    pub namespace: String,
    /// Declared targets, in manifest order.
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetDescriptor>,
}

/// One target as declared in the manifest.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TargetDescriptor {
    /// Namespace of the target. Omitted means the project namespace; empty
    /// means the global namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Bare target name.
    pub name: String,
    /// Executable file name, including any platform suffix. Defaults to the
    /// target name.
    #[serde(default)]
    pub executable: Option<String>,
    /// Directory holding the executable in the build tree.
    pub build_dir: Utf8PathBuf,
    /// Directory holding the executable after installation. Omitted for
    /// external targets.
    #[serde(default)]
    pub install_dir: Option<Utf8PathBuf>,
}

impl TargetDescriptor {
    /// Describe a project target built into `build_dir`.
    ///
    /// The result has no installation directory, so it is external until
    /// [`Self::installed_in`] names one.
    #[must_use]
    pub fn new(name: impl Into<String>, build_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            executable: None,
            build_dir: build_dir.into(),
            install_dir: None,
        }
    }

    /// Place the target in `namespace`; empty means the global namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the executable file name.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    /// Set the installation directory.
    #[must_use]
    pub fn installed_in(mut self, install_dir: impl Into<Utf8PathBuf>) -> Self {
        self.install_dir = Some(install_dir.into());
        self
    }

    /// Canonical UID of this descriptor within a project namespace.
    #[must_use]
    pub fn uid(&self, project_namespace: &str) -> TargetUid {
        let namespace = self.namespace.as_deref().unwrap_or(project_namespace);
        TargetUid::qualified(namespace, &self.name)
    }

    /// Executable file name, falling back to the target name.
    #[must_use]
    pub fn executable(&self) -> &str {
        self.executable.as_deref().unwrap_or(&self.name)
    }

    /// Returns `true` when the target is not built by this project.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.install_dir.is_none()
    }
}

impl TargetManifest {
    /// Parse a manifest from TOML text.
    ///
    /// The result is not validated; see [`Self::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Parse`] when the text is not a manifest.
    pub fn from_toml_str(source: &str) -> Result<Self, MetadataError> {
        toml::from_str(source).map_err(|source| MetadataError::Parse { path: None, source })
    }

    /// Read, parse, and validate the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Io`] when the file cannot be read, and parse
    /// or validation errors otherwise.
    pub fn load(path: &Utf8Path) -> Result<Self, MetadataError> {
        let contents = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_owned(),
            source,
        })?;
        let manifest: Self = toml::from_str(&contents).map_err(|source| MetadataError::Parse {
            path: Some(path.to_owned()),
            source,
        })?;
        manifest.validate()?;

        debug!(
            "read {} target(s) for namespace `{}` from {path}",
            manifest.targets.len(),
            manifest.namespace
        );
        Ok(manifest)
    }

    /// Replace the project namespace.
    ///
    /// Targets without an explicit namespace follow the new value.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Check the manifest against the registry's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: an invalid project namespace, an
    /// empty or qualified target name, a qualified target namespace, an empty
    /// executable, a relative directory, or a duplicated UID.
    pub fn validate(&self) -> Result<(), MetadataError> {
        validate_namespace(&self.namespace)?;

        let mut seen = HashSet::with_capacity(self.targets.len());
        for (index, target) in self.targets.iter().enumerate() {
            validate_target(index, target, &self.namespace)?;

            let uid = target.uid(&self.namespace);
            if !seen.insert(uid.clone()) {
                return Err(MetadataError::DuplicateTarget { uid });
            }
        }
        Ok(())
    }
}

/// Check that `namespace` can serve as a project namespace.
///
/// # Errors
///
/// Returns [`MetadataError::InvalidNamespace`] when the namespace is empty or
/// contains `::`.
///
/// # Examples
///
/// ```
/// use targetinfo::manifest::validate_namespace;
///
/// assert!(validate_namespace("utilitiestest").is_ok());
/// assert!(validate_namespace("a::b").is_err());
/// assert!(validate_namespace("").is_err());
/// ```
pub fn validate_namespace(namespace: &str) -> Result<(), MetadataError> {
    if namespace.is_empty() || namespace.contains(SEPARATOR) {
        return Err(MetadataError::InvalidNamespace {
            namespace: namespace.to_owned(),
        });
    }
    Ok(())
}

fn validate_target(
    index: usize,
    target: &TargetDescriptor,
    project_namespace: &str,
) -> Result<(), MetadataError> {
    if target.name.is_empty() {
        return Err(MetadataError::EmptyName { index });
    }
    if target.name.contains(SEPARATOR) {
        return Err(MetadataError::InvalidName {
            name: target.name.clone(),
        });
    }
    if let Some(namespace) = target.namespace.as_deref()
        && namespace.contains(SEPARATOR)
    {
        return Err(MetadataError::InvalidTargetNamespace {
            name: target.name.clone(),
            namespace: namespace.to_owned(),
        });
    }

    let uid = target.uid(project_namespace);
    if target.executable().is_empty() {
        return Err(MetadataError::EmptyExecutable { uid });
    }
    ensure_absolute(&uid, "build", &target.build_dir)?;
    if let Some(install_dir) = &target.install_dir {
        ensure_absolute(&uid, "installation", install_dir)?;
    }
    Ok(())
}

fn ensure_absolute(
    uid: &TargetUid,
    kind: &'static str,
    path: &Utf8Path,
) -> Result<(), MetadataError> {
    if is_absolute(path) {
        return Ok(());
    }
    Err(MetadataError::RelativeDirectory {
        uid: uid.clone(),
        kind,
        path: path.to_owned(),
    })
}

/// Accepts host-absolute paths as well as `/`-rooted paths on Windows, which
/// build metadata commonly writes with forward slashes.
fn is_absolute(path: &Utf8Path) -> bool {
    path.is_absolute() || path.has_root()
}
