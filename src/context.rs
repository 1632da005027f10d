//! Process context bundling configuration, cache, and resolver

use crate::api::{ApiClient, FallbackSource};
use crate::cache::Cache;
use crate::config::Configuration;
use crate::error::IconResult;
use crate::render::render;
use crate::resolver::Resolver;
use crate::types::{IconRecord, RenderOptions};

/// Everything one process needs for icon resolution, bundled together.
///
/// Construct once at startup and share by reference across threads. A
/// fresh context is a fully isolated instance, so tests never touch
/// shared mutable state.
pub struct IconContext {
    config: Configuration,
    cache: Cache,
    resolver: Resolver,
}

impl IconContext {
    /// Context with the given configuration. The remote fallback source
    /// is attached only when `fallback_to_api` is enabled.
    pub fn new(config: Configuration) -> Self {
        let resolver = if config.fallback_to_api {
            Resolver::with_fallback(Box::new(ApiClient::new()))
        } else {
            Resolver::new()
        };
        Self {
            config,
            cache: Cache::new(),
            resolver,
        }
    }

    /// Context with a caller-supplied fallback source, for embedders with
    /// their own transport (and for tests).
    pub fn with_fallback(config: Configuration, source: Box<dyn FallbackSource>) -> Self {
        Self {
            config,
            cache: Cache::new(),
            resolver: Resolver::with_fallback(source),
        }
    }

    /// Resolve an icon by name through the cascade
    pub fn resolve(&self, name: &str) -> IconResult<Option<IconRecord>> {
        self.resolver.resolve(name, &self.config, &self.cache)
    }

    /// Resolve and render in one step. `Ok(None)` means the icon was not
    /// found in any source; what to show instead is the caller's call.
    pub fn svg(&self, name: &str, options: &RenderOptions) -> IconResult<Option<String>> {
        Ok(self.resolve(name)?.map(|record| render(&record, options)))
    }

    /// Drop all loaded sets and cached icons, forcing re-parse and
    /// re-resolution on next access
    pub fn reset(&self) {
        self.resolver.clear();
        self.cache.clear();
    }

    /// The context's configuration
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// The resolved-icon cache
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// The resolver and its set registry
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }
}

impl Default for IconContext {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}
