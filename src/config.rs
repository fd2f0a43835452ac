//! Environment-driven configuration for locating target metadata.
//!
//! Build scripts point the registry at its manifest through
//! `TARGETINFO_MANIFEST` and may override the project namespace with
//! `TARGETINFO_NAMESPACE`. Command-line tools layer their own flags on top by
//! editing the loaded [`RegistryConfig`] before calling
//! [`RegistryConfig::load_registry`].

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{RegistryError, Result};
use crate::manifest::TargetManifest;
use crate::registry::TargetRegistry;

/// Environment variable naming the target manifest.
pub const MANIFEST_ENV: &str = "TARGETINFO_MANIFEST";

/// Environment variable overriding the project namespace.
pub const NAMESPACE_ENV: &str = "TARGETINFO_NAMESPACE";

/// Namespace used when nothing else names one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Where the registry's metadata comes from.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Path of the target manifest.
    pub manifest: Option<Utf8PathBuf>,
    /// Override for the manifest's project namespace.
    ///
    /// Whitespace-only values are treated as absent so templated
    /// environments can leave the variable blank.
    pub namespace: Option<String>,
}

impl RegistryConfig {
    /// Read the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var_os(key).and_then(|value| value.into_string().ok()))
    }

    /// Read the configuration through the supplied variable lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use targetinfo::RegistryConfig;
    ///
    /// let config = RegistryConfig::from_env_with(|key| match key {
    ///     "TARGETINFO_MANIFEST" => Some("/build/targets.toml".to_owned()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.manifest.as_deref().map(|p| p.as_str()), Some("/build/targets.toml"));
    /// assert!(config.namespace().is_none());
    /// ```
    #[must_use]
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let manifest = lookup(MANIFEST_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(Utf8PathBuf::from);
        let namespace = lookup(NAMESPACE_ENV);
        Self {
            manifest,
            namespace,
        }
    }

    /// Returns the namespace override, if present.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Returns the configured manifest path, if any.
    #[must_use]
    pub fn manifest(&self) -> Option<&Utf8Path> {
        self.manifest.as_deref()
    }

    /// Namespace for a registry built without a manifest.
    #[must_use]
    pub fn fallback_namespace(&self) -> &str {
        self.namespace().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Empty registry served when the manifest cannot be loaded.
    ///
    /// An override that is not a valid project namespace is ignored with a
    /// warning, leaving [`DEFAULT_NAMESPACE`].
    #[must_use]
    pub fn fallback_registry(&self) -> TargetRegistry {
        TargetRegistry::empty(self.fallback_namespace()).unwrap_or_else(|err| {
            warn!("ignoring namespace override: {err}");
            TargetRegistry::default()
        })
    }

    /// Load the manifest and build a registry from it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NoManifest`] when no manifest is configured,
    /// and [`RegistryError::Metadata`] when it cannot be loaded or fails
    /// validation.
    pub fn load_registry(&self) -> Result<TargetRegistry> {
        let path = self.manifest().ok_or(RegistryError::NoManifest)?;
        let mut manifest = TargetManifest::load(path)?;
        if let Some(namespace) = self.namespace() {
            debug!(
                "overriding namespace `{}` with `{namespace}`",
                manifest.namespace
            );
            manifest = manifest.with_namespace(namespace);
        }
        Ok(TargetRegistry::from_manifest(&manifest)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: Vec<(&'static str, &'static str)>) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&'static str, &'static str> = pairs.into_iter().collect();
        move |key| vars.get(key).map(|value| (*value).to_owned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = RegistryConfig::from_env_with(lookup_from(vec![]));
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.fallback_namespace(), DEFAULT_NAMESPACE);
    }

    #[rstest]
    #[case::set("utilitiestest", Some("utilitiestest"))]
    #[case::padded("  utilitiestest \n", Some("utilitiestest"))]
    #[case::blank("   ", None)]
    #[case::empty("", None)]
    fn namespace_override_is_trimmed(#[case] raw: &'static str, #[case] expected: Option<&str>) {
        let config = RegistryConfig::from_env_with(lookup_from(vec![(NAMESPACE_ENV, raw)]));
        assert_eq!(config.namespace(), expected);
    }

    #[test]
    fn blank_manifest_is_treated_as_absent() {
        let config = RegistryConfig::from_env_with(lookup_from(vec![(MANIFEST_ENV, " ")]));
        assert!(config.manifest().is_none());
    }

    #[test]
    fn deserialises_from_toml() {
        let config: RegistryConfig =
            toml::from_str("manifest = \"/build/targets.toml\"\nnamespace = \"utilitiestest\"\n")
                .expect("expected configuration to parse");
        assert_eq!(config.manifest(), Some(Utf8Path::new("/build/targets.toml")));
        assert_eq!(config.namespace(), Some("utilitiestest"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = toml::from_str::<RegistryConfig>("unexpected = true\n")
            .expect_err("expected unknown field to be rejected");
        assert!(err.to_string().contains("unexpected"));
    }

    #[rstest]
    #[case::configured(Some("utilitiestest"), "utilitiestest")]
    #[case::absent(None, DEFAULT_NAMESPACE)]
    #[case::qualified(Some("a::b"), DEFAULT_NAMESPACE)]
    fn fallback_registry_has_valid_namespace(
        #[case] namespace: Option<&str>,
        #[case] expected: &str,
    ) {
        let config = RegistryConfig {
            manifest: None,
            namespace: namespace.map(str::to_owned),
        };
        let registry = config.fallback_registry();
        assert!(registry.is_empty());
        assert_eq!(registry.namespace(), expected);

        let uid = registry.normalise("x");
        assert_eq!(uid.namespace(), Some(registry.namespace()));
        assert_eq!(uid.name(), "x");
    }

    #[test]
    fn load_registry_requires_manifest() {
        let err = RegistryConfig::default()
            .load_registry()
            .expect_err("expected missing manifest to fail");
        assert!(matches!(err, RegistryError::NoManifest));
    }

    #[test]
    fn load_registry_applies_namespace_override() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("targets.toml"))
            .expect("utf-8 temp path");
        std::fs::write(
            &path,
            "namespace = \"utilitiestest\"\n[[target]]\nname = \"helloworld\"\nbuild_dir = \"/build/bin\"\n",
        )
        .expect("write manifest");

        let config = RegistryConfig {
            manifest: Some(path),
            namespace: Some("renamed".to_owned()),
        };
        let registry = config.load_registry().expect("expected registry to load");
        assert_eq!(registry.namespace(), "renamed");
        assert!(registry.is_known("renamed::helloworld"));
        assert!(registry.is_known("helloworld"));
        assert!(!registry.is_known("utilitiestest::helloworld"));
    }
}
