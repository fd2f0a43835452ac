//! Output formatting for target listing.
//!
//! This module formats the registry's targets for human-readable or JSON
//! output.

use serde::Serialize;
use targetinfo::{TargetRecord, TargetRegistry};

/// Format registered targets for human-readable output.
///
/// # Examples
///
/// ```
/// use targetinfo::TargetRegistry;
/// use targetinfo_cli::list_output::format_human;
///
/// let output = format_human(&TargetRegistry::empty("utilitiestest")?);
/// assert!(output.contains("No targets registered"));
/// # Ok::<(), targetinfo::MetadataError>(())
/// ```
#[must_use]
pub fn format_human(registry: &TargetRegistry) -> String {
    if registry.is_empty() {
        return format!(
            "No targets registered for namespace {}.\n",
            registry.namespace()
        );
    }

    let mut output = format!("Targets for namespace {}:\n", registry.namespace());
    for record in registry.targets() {
        let external = if record.is_external() { " (external)" } else { "" };
        output.push('\n');
        output.push_str(&format!("  {}{external}\n", record.uid()));
        output.push_str(&format!("    executable: {}\n", record.executable_name()));
        output.push_str(&format!("    build:      {}\n", record.build_directory()));
        output.push_str(&format!(
            "    install:    {}\n",
            record.installation_directory()
        ));
    }
    output
}

/// Format registered targets as JSON.
///
/// # Examples
///
/// ```
/// use targetinfo::TargetRegistry;
/// use targetinfo_cli::list_output::format_json;
///
/// let json = format_json(&TargetRegistry::empty("utilitiestest")?);
/// assert!(json.contains("\"targets\""));
/// # Ok::<(), targetinfo::MetadataError>(())
/// ```
#[must_use]
pub fn format_json(registry: &TargetRegistry) -> String {
    let json_data = RegistryJson::from_registry(registry);
    serde_json::to_string_pretty(&json_data).unwrap_or_else(|_| "{}".to_owned())
}

/// JSON-serializable view of a registry.
#[derive(Debug, Serialize)]
pub struct RegistryJson<'a> {
    /// Project namespace.
    pub namespace: &'a str,
    /// Registered targets ordered by UID.
    pub targets: Vec<TargetEntry<'a>>,
}

impl<'a> RegistryJson<'a> {
    fn from_registry(registry: &'a TargetRegistry) -> Self {
        Self {
            namespace: registry.namespace(),
            targets: registry.targets().map(TargetEntry::from).collect(),
        }
    }
}

/// JSON entry for a single target.
#[derive(Debug, Serialize)]
pub struct TargetEntry<'a> {
    /// Canonical UID.
    pub uid: &'a str,
    /// Executable file name.
    pub executable: &'a str,
    /// Build-tree directory.
    pub build_dir: &'a str,
    /// Installation directory.
    pub install_dir: &'a str,
    /// Whether the target is built elsewhere.
    pub external: bool,
}

impl<'a> From<&'a TargetRecord> for TargetEntry<'a> {
    fn from(record: &'a TargetRecord) -> Self {
        Self {
            uid: record.uid().as_str(),
            executable: record.executable_name(),
            build_dir: record.build_directory().as_str(),
            install_dir: record.installation_directory().as_str(),
            external: record.is_external(),
        }
    }
}
