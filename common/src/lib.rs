//! Shared primitives for naming executable targets: the [`TargetUid`]
//! newtype and the namespace rules used to canonicalise target references.

pub mod uid;

pub use uid::{SEPARATOR, TargetUid, normalise};
