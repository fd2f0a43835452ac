//! Resolve logical executable targets to build and installation paths.
//!
//! Build tooling refers to executables by target UID (`namespace::name`) or
//! by bare name within the calling project's namespace. A
//! [`TargetRegistry`], seeded from a [`TargetManifest`] written by the build
//! configuration step, answers which targets exist and where their
//! executables live before and after installation.
//!
//! # Modules
//!
//! - [`config`] - Environment configuration locating the manifest
//! - [`error`] - Metadata and registry error types
//! - [`instance`] - The process-wide registry
//! - [`manifest`] - Manifest parsing and validation
//! - [`registry`] - The registry and its lookups

pub mod config;
pub mod error;
pub mod instance;
pub mod manifest;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{MetadataError, RegistryError, Result};
pub use instance::{RegistryCell, install, instance, try_instance};
pub use manifest::{TargetDescriptor, TargetManifest};
pub use registry::{TargetRecord, TargetRegistry, TargetRegistryBuilder, Tree};
pub use targetinfo_common::{TargetUid, normalise};
