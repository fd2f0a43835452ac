//! Catalogue of executable targets and the lookups built on it.
//!
//! A [`TargetRegistry`] maps canonical target UIDs to [`TargetRecord`]s. It is
//! built once from a validated [`TargetManifest`] and never changes
//! afterwards, so lookups take `&self` and can be shared across threads
//! without locking.
//!
//! Every lookup accepts either a bare name or a UID and normalises it against
//! the registry's own namespace first. Unknown targets are reported as
//! `None` or `false`; lookups never fail.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace};
use targetinfo_common::{TargetUid, normalise};

use crate::config::DEFAULT_NAMESPACE;
use crate::error::MetadataError;
use crate::manifest::{TargetDescriptor, TargetManifest, validate_namespace};

/// Everything the registry knows about one target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetRecord {
    uid: TargetUid,
    executable: String,
    build_dir: Utf8PathBuf,
    install_dir: Utf8PathBuf,
    external: bool,
}

impl TargetRecord {
    fn from_descriptor(descriptor: &TargetDescriptor, project_namespace: &str) -> Self {
        Self {
            uid: descriptor.uid(project_namespace),
            executable: descriptor.executable().to_owned(),
            build_dir: descriptor.build_dir.clone(),
            install_dir: descriptor
                .install_dir
                .clone()
                .unwrap_or_else(|| descriptor.build_dir.clone()),
            external: descriptor.is_external(),
        }
    }

    /// Canonical, namespace-qualified UID.
    #[must_use]
    pub fn uid(&self) -> &TargetUid {
        &self.uid
    }

    /// Executable file name, including any platform suffix.
    #[must_use]
    pub fn executable_name(&self) -> &str {
        &self.executable
    }

    /// Directory holding the executable in the build tree.
    #[must_use]
    pub fn build_directory(&self) -> &Utf8Path {
        &self.build_dir
    }

    /// Directory holding the executable after installation.
    ///
    /// Equal to [`Self::build_directory`] for external targets.
    #[must_use]
    pub fn installation_directory(&self) -> &Utf8Path {
        &self.install_dir
    }

    /// Returns `true` when the target is referenced but not built here.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.external
    }

    /// Directory for the requested tree.
    #[must_use]
    pub fn directory(&self, tree: Tree) -> &Utf8Path {
        match tree {
            Tree::Build => &self.build_dir,
            Tree::Installation => &self.install_dir,
        }
    }

    /// Absolute path of the executable in the requested tree.
    #[must_use]
    pub fn executable_path(&self, tree: Tree) -> Utf8PathBuf {
        self.directory(tree).join(&self.executable)
    }
}

/// Selects between the build tree and the installation tree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Tree {
    /// Location of freshly built executables.
    Build,
    /// Location after installation.
    #[default]
    Installation,
}

/// Read-only catalogue of known executable targets.
///
/// # Examples
///
/// ```
/// use targetinfo::{TargetManifest, TargetRegistry};
///
/// let manifest = TargetManifest::from_toml_str(concat!(
///     "namespace = \"utilitiestest\"\n",
///     "[[target]]\n",
///     "namespace = \"basis\"\n",
///     "name = \"basisproject.sh\"\n",
///     "build_dir = \"/opt/basis/bin\"\n",
/// ))?;
/// let registry = TargetRegistry::from_manifest(&manifest)?;
///
/// assert_eq!(registry.normalise("basisproject.sh").as_str(), "utilitiestest::basisproject.sh");
/// assert!(!registry.is_known("basisproject.sh"));
/// assert!(registry.is_known("basis::basisproject.sh"));
/// assert_eq!(
///     registry.build_directory("basis::basisproject.sh"),
///     registry.installation_directory("basis::basisproject.sh"),
/// );
/// # Ok::<(), targetinfo::MetadataError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TargetRegistry {
    namespace: String,
    records: BTreeMap<TargetUid, TargetRecord>,
}

impl TargetRegistry {
    /// Create a registry with no targets.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::InvalidNamespace`] when `namespace` is empty
    /// or contains `::`.
    pub fn empty(namespace: impl Into<String>) -> Result<Self, MetadataError> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        Ok(Self {
            namespace,
            records: BTreeMap::new(),
        })
    }

    /// Start assembling a registry for `namespace` target by target.
    ///
    /// # Examples
    ///
    /// ```
    /// use targetinfo::{TargetDescriptor, TargetRegistry};
    ///
    /// let registry = TargetRegistry::builder("utilitiestest")
    ///     .target(TargetDescriptor::new("helloworld", "/build/bin").installed_in("/usr/local/bin"))
    ///     .target(TargetDescriptor::new("basisproject.sh", "/opt/basis/bin").in_namespace("basis"))
    ///     .build()?;
    ///
    /// assert!(registry.is_known("helloworld"));
    /// assert!(registry.is_known("basis::basisproject.sh"));
    /// # Ok::<(), targetinfo::MetadataError>(())
    /// ```
    #[must_use]
    pub fn builder(namespace: impl Into<String>) -> TargetRegistryBuilder {
        TargetRegistryBuilder {
            manifest: TargetManifest {
                namespace: namespace.into(),
                targets: Vec::new(),
            },
        }
    }

    /// Build a registry from a manifest, validating it first.
    ///
    /// # Errors
    ///
    /// Returns the manifest's validation error, if any.
    pub fn from_manifest(manifest: &TargetManifest) -> Result<Self, MetadataError> {
        manifest.validate()?;

        let records: BTreeMap<TargetUid, TargetRecord> = manifest
            .targets
            .iter()
            .map(|descriptor| {
                let record = TargetRecord::from_descriptor(descriptor, &manifest.namespace);
                (record.uid.clone(), record)
            })
            .collect();

        debug!(
            "registered {} target(s) for namespace `{}`",
            records.len(),
            manifest.namespace
        );
        Ok(Self {
            namespace: manifest.namespace.clone(),
            records,
        })
    }

    /// Namespace assumed for unqualified names.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Canonical UID for `name` within this registry's namespace.
    ///
    /// Pure string canonicalisation: the result need not be a known target.
    #[must_use]
    pub fn normalise(&self, name: &str) -> TargetUid {
        normalise(name, &self.namespace)
    }

    /// Look up the record for a name or UID.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&TargetRecord> {
        let uid = self.normalise(name);
        let record = self.records.get(&uid);
        if record.is_none() {
            trace!("unknown target `{uid}`");
        }
        record
    }

    /// Returns `true` when `name` resolves to a registered target.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.record(name).is_some()
    }

    /// Executable file name of a known target.
    #[must_use]
    pub fn executable_name(&self, name: &str) -> Option<&str> {
        self.record(name).map(TargetRecord::executable_name)
    }

    /// Build-tree directory of a known target.
    #[must_use]
    pub fn build_directory(&self, name: &str) -> Option<&Utf8Path> {
        self.record(name).map(TargetRecord::build_directory)
    }

    /// Installation directory of a known target.
    #[must_use]
    pub fn installation_directory(&self, name: &str) -> Option<&Utf8Path> {
        self.record(name).map(TargetRecord::installation_directory)
    }

    /// Absolute executable path of a known target in the requested tree.
    #[must_use]
    pub fn executable_path(&self, name: &str, tree: Tree) -> Option<Utf8PathBuf> {
        self.record(name).map(|record| record.executable_path(tree))
    }

    /// Records ordered by UID.
    pub fn targets(&self) -> impl Iterator<Item = &TargetRecord> {
        self.records.values()
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no targets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for TargetRegistry {
    /// An empty registry for [`DEFAULT_NAMESPACE`].
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            records: BTreeMap::new(),
        }
    }
}

/// Collects target descriptors for [`TargetRegistry::builder`].
///
/// [`Self::build`] applies the same validation as
/// [`TargetRegistry::from_manifest`].
#[derive(Clone, Debug)]
pub struct TargetRegistryBuilder {
    manifest: TargetManifest,
}

impl TargetRegistryBuilder {
    /// Add one target.
    #[must_use]
    pub fn target(mut self, descriptor: TargetDescriptor) -> Self {
        self.manifest.targets.push(descriptor);
        self
    }

    /// Add several targets in order.
    #[must_use]
    pub fn targets(mut self, descriptors: impl IntoIterator<Item = TargetDescriptor>) -> Self {
        self.manifest.targets.extend(descriptors);
        self
    }

    /// Validate the collected targets and build the registry.
    ///
    /// # Errors
    ///
    /// Returns the first validation error, as
    /// [`TargetManifest::validate`] reports it.
    pub fn build(self) -> Result<TargetRegistry, MetadataError> {
        TargetRegistry::from_manifest(&self.manifest)
    }
}
