//! Error types for loading target metadata.
//!
//! Lookups against a built registry never fail; these errors only arise while
//! reading and validating the manifest that seeds it, or when the
//! process-wide instance is seeded twice.

use camino::Utf8PathBuf;
use targetinfo_common::TargetUid;
use thiserror::Error;

/// Errors raised while reading or validating a target manifest.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The manifest file could not be read.
    #[error("failed to read target manifest {path}")]
    Io {
        /// Path of the manifest.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid TOML or does not match the expected shape.
    #[error("invalid target manifest{}: {source}", path_suffix(.path.as_ref()))]
    Parse {
        /// Path of the manifest, when it was read from disk.
        path: Option<Utf8PathBuf>,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// The self-namespace is empty or contains `::`.
    #[error("invalid project namespace `{namespace}`: must be non-empty and must not contain `::`")]
    InvalidNamespace {
        /// The rejected namespace.
        namespace: String,
    },

    /// A target was declared without a name.
    #[error("target #{index} has an empty name")]
    EmptyName {
        /// Zero-based position of the target in the manifest.
        index: usize,
    },

    /// A target name contains `::`.
    #[error("target name `{name}` must not contain `::`; use the `namespace` field instead")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// A target namespace contains `::`.
    #[error("namespace `{namespace}` of target `{name}` must not contain `::`")]
    InvalidTargetNamespace {
        /// Bare name of the target.
        name: String,
        /// The rejected namespace.
        namespace: String,
    },

    /// A target declares an empty executable file name.
    #[error("target {uid} has an empty executable name")]
    EmptyExecutable {
        /// Canonical UID of the target.
        uid: TargetUid,
    },

    /// A build or installation directory is not absolute.
    #[error("{kind} directory of target {uid} must be absolute, got `{path}`")]
    RelativeDirectory {
        /// Canonical UID of the target.
        uid: TargetUid,
        /// Which directory was rejected (`build` or `installation`).
        kind: &'static str,
        /// The rejected path.
        path: Utf8PathBuf,
    },

    /// Two descriptors resolve to the same canonical UID.
    #[error("target {uid} is declared more than once")]
    DuplicateTarget {
        /// The duplicated UID.
        uid: TargetUid,
    },
}

fn path_suffix(path: Option<&Utf8PathBuf>) -> String {
    path.map_or_else(String::new, |path| format!(" {path}"))
}

/// Errors raised while building or installing a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The target manifest could not be loaded.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// No manifest location was configured.
    #[error("no target manifest configured; set TARGETINFO_MANIFEST or pass --manifest")]
    NoManifest,

    /// The process-wide registry was already initialised.
    #[error("the process-wide target registry is already initialised")]
    AlreadyInitialised,
}

/// Result type alias using [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;
