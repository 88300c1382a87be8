// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Canonical on-disk paths for files referenced by the configuration.
//!
//! Certificates, CA bundles, `crt-list` maps and error pages are all referenced by a
//! logical name. The file distribution layer writes them below one configuration
//! root; the compiler only needs to know that root to reference them.

use crate::constants::DEFAULT_CONFIG_ROOT;

/// Resolves logical file names to paths below a fixed configuration root.
///
/// Resolution is a pure string transform: no filesystem access, no existence checks.
///
/// # Example
///
/// ```rust
/// use haproxy_operator::haproxy::PathResolver;
///
/// let paths = PathResolver::new("/usr/local/etc/haproxy");
/// assert_eq!(paths.resolve("test.crt"), "/usr/local/etc/haproxy/test.crt");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResolver {
    root: String,
}

impl PathResolver {
    /// Create a resolver for `root`. A trailing `/` is ignored.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    /// The configuration root, without a trailing `/`.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Join `name` onto the configuration root.
    #[must_use]
    pub fn resolve(&self, name: &str) -> String {
        format!("{}/{}", self.root, name)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_ROOT)
    }
}
