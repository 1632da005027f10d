//! Configuration for icon resolution

use std::path::PathBuf;

/// Configuration for icon set lookup paths and fallback behavior.
///
/// Constructed once at process start and bundled into an
/// [`IconContext`](crate::context::IconContext); never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Icon set prefix used when a name carries no explicit `prefix:`
    pub default_set: String,
    /// Directory holding vendored `{prefix}.json` files
    pub vendor_dir: PathBuf,
    /// Directory holding bundled `{prefix}.json.gz` archives
    pub bundled_dir: PathBuf,
    /// Query the remote icon API when every local source misses
    pub fallback_to_api: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            default_set: "lucide".to_string(),
            vendor_dir: PathBuf::from("vendor/icons"),
            bundled_dir: PathBuf::from("data"),
            fallback_to_api: false,
        }
    }
}

impl Configuration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default icon set prefix
    pub fn with_default_set(mut self, set: impl Into<String>) -> Self {
        self.default_set = set.into();
        self
    }

    /// Set the vendored icon set directory
    pub fn with_vendor_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.vendor_dir = dir.into();
        self
    }

    /// Set the bundled archive directory
    pub fn with_bundled_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundled_dir = dir.into();
        self
    }

    /// Enable or disable the remote API fallback
    pub fn with_api_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_api = enabled;
        self
    }
}
