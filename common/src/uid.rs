//! Semantic wrapper for target identifiers.
//!
//! A target UID has the shape `[namespace::]name`. Qualified UIDs carry a
//! namespace on the left of the first `::`, which may be empty to denote the
//! global namespace. Unqualified names are resolved against a caller-supplied
//! namespace by [`normalise`].

use serde::Serialize;
use std::fmt;

/// Separator between the namespace and the bare target name.
pub const SEPARATOR: &str = "::";

/// A target identifier, either as entered by a user or in canonical form.
///
/// The wrapper performs no validation: any string, including the empty one,
/// may be wrapped. [`normalise`] produces the canonical form used as a
/// registry key.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetUid(String);

impl TargetUid {
    /// Create a UID from raw text without normalising it.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    /// Build a qualified UID from its namespace and bare name.
    ///
    /// ```
    /// use targetinfo_common::TargetUid;
    ///
    /// assert_eq!(TargetUid::qualified("basis", "basisproject.sh").as_str(), "basis::basisproject.sh");
    /// assert_eq!(TargetUid::qualified("", "hello").as_str(), "::hello");
    /// ```
    #[must_use]
    pub fn qualified(namespace: &str, name: &str) -> Self {
        Self(format!("{namespace}{SEPARATOR}{name}"))
    }

    /// Get the UID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns `true` for the empty UID.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when the UID names its namespace explicitly.
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        self.0.contains(SEPARATOR)
    }

    /// Returns the namespace component of a qualified UID.
    ///
    /// `Some("")` denotes the global namespace; `None` means the UID is
    /// unqualified.
    ///
    /// ```
    /// use targetinfo_common::TargetUid;
    ///
    /// assert_eq!(TargetUid::from("hammer::hammer").namespace(), Some("hammer"));
    /// assert_eq!(TargetUid::from("::hello").namespace(), Some(""));
    /// assert_eq!(TargetUid::from("helloworld").namespace(), None);
    /// ```
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(SEPARATOR).map(|(namespace, _)| namespace)
    }

    /// Returns the bare target name, stripped of any namespace.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split_once(SEPARATOR).map_or(&self.0, |(_, name)| name)
    }
}

/// Canonicalise `name` against the `namespace` of the calling project.
///
/// Empty input stays empty. Names without `::` are placed in `namespace`.
/// Anything already qualified, including explicit global references such as
/// `::hello`, is returned unchanged. The function never inspects which
/// targets exist.
///
/// ```
/// use targetinfo_common::normalise;
///
/// assert_eq!(normalise("basisproject.sh", "utilitiestest").as_str(), "utilitiestest::basisproject.sh");
/// assert_eq!(normalise("::hello", "utilitiestest").as_str(), "::hello");
/// assert_eq!(normalise("hammer::hammer", "utilitiestest").as_str(), "hammer::hammer");
/// assert!(normalise("", "utilitiestest").is_empty());
/// ```
#[must_use]
pub fn normalise(name: &str, namespace: &str) -> TargetUid {
    if name.is_empty() || name.contains(SEPARATOR) {
        return TargetUid::from(name);
    }
    TargetUid::qualified(namespace, name)
}

impl AsRef<str> for TargetUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetUid {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for TargetUid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TargetUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
