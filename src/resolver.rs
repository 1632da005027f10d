//! Icon resolution cascade and loaded-set registry

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::FallbackSource;
use crate::cache::Cache;
use crate::config::Configuration;
use crate::error::IconResult;
use crate::set::IconSet;
use crate::types::IconRecord;

/// Central orchestrator for icon resolution.
///
/// Follows a resolution cascade, short-circuiting at the first hit:
///
/// 1. **In-memory cache**: instant return for previously resolved icons
/// 2. **Already-loaded set**: set parsed earlier by this resolver
/// 3. **Vendored JSON**: full set files on disk
/// 4. **Bundled gzip**: archives shipped with the application
/// 5. **Fallback source**: remote single-icon fetch, when configured
///
/// Once a set is loaded it stays in the registry so the JSON is parsed at
/// most once per resolver. Concurrent first access to the same prefix may
/// parse the set twice; parsing is side-effect-free and the registry
/// converges on one winner, so this race is allowed rather than prevented
/// with per-key locking.
pub struct Resolver {
    loaded_sets: Mutex<HashMap<String, Arc<IconSet>>>,
    fallback: Option<Box<dyn FallbackSource>>,
}

impl Resolver {
    /// Resolver with no remote fallback source
    pub fn new() -> Self {
        Self {
            loaded_sets: Mutex::new(HashMap::new()),
            fallback: None,
        }
    }

    /// Resolver that consults the given fallback source after every local
    /// source has missed
    pub fn with_fallback(source: Box<dyn FallbackSource>) -> Self {
        Self {
            loaded_sets: Mutex::new(HashMap::new()),
            fallback: Some(source),
        }
    }

    /// Resolve an icon by name through the cascade.
    ///
    /// Successful lookups are written to `cache` before returning; misses
    /// are never cached, so a later retry (say, after vendoring the set)
    /// can succeed. Returns `Ok(None)` when no source has the icon; an
    /// error only for a present-but-unparseable dataset.
    pub fn resolve(
        &self,
        name: &str,
        config: &Configuration,
        cache: &Cache,
    ) -> IconResult<Option<IconRecord>> {
        let (prefix, icon_name) = parse_name(name, &config.default_set);

        if let Some(cached) = cache.get(&prefix, &icon_name) {
            return Ok(Some(cached));
        }

        let mut record = self.resolve_from_loaded_set(&prefix, &icon_name);
        if record.is_none() {
            record = self.resolve_from_vendor(&prefix, &icon_name, config)?;
        }
        if record.is_none() {
            record = self.resolve_from_bundled(&prefix, &icon_name, config)?;
        }
        if record.is_none() {
            // Single-icon fetch: cached below, but the set is not registered.
            record = self
                .fallback
                .as_ref()
                .and_then(|source| source.fetch_icon(&prefix, &icon_name));
        }

        if let Some(ref record) = record {
            cache.set(&prefix, &icon_name, record.clone());
        }

        Ok(record)
    }

    /// Whether a set for this prefix is currently registered
    pub fn is_loaded(&self, prefix: &str) -> bool {
        self.loaded_sets.lock().contains_key(prefix)
    }

    /// Drop all loaded sets, forcing a re-parse on next access. Does not
    /// touch the cache, which has its own lifecycle.
    pub fn clear(&self) {
        self.loaded_sets.lock().clear();
    }

    fn resolve_from_loaded_set(&self, prefix: &str, name: &str) -> Option<IconRecord> {
        let set = self.loaded_sets.lock().get(prefix).cloned();
        set.and_then(|set| set.icon(name))
    }

    fn resolve_from_vendor(
        &self,
        prefix: &str,
        name: &str,
        config: &Configuration,
    ) -> IconResult<Option<IconRecord>> {
        // Parse outside the lock; only the registry write is serialized.
        let Some(set) = IconSet::from_vendor(prefix, &config.vendor_dir)? else {
            return Ok(None);
        };
        Ok(self.register(prefix, set).icon(name))
    }

    fn resolve_from_bundled(
        &self,
        prefix: &str,
        name: &str,
        config: &Configuration,
    ) -> IconResult<Option<IconRecord>> {
        let Some(set) = IconSet::from_bundled(prefix, &config.bundled_dir)? else {
            return Ok(None);
        };
        Ok(self.register(prefix, set).icon(name))
    }

    fn register(&self, prefix: &str, set: IconSet) -> Arc<IconSet> {
        let set = Arc::new(set);
        self.loaded_sets
            .lock()
            .insert(prefix.to_string(), Arc::clone(&set));
        set
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Split an icon name into `(prefix, local name)`.
///
/// Surrounding whitespace is trimmed; a name without a `:` separator
/// belongs to the default set.
pub fn parse_name(name: &str, default_set: &str) -> (String, String) {
    let name = name.trim();
    match name.split_once(':') {
        Some((prefix, icon)) => (prefix.to_string(), icon.to_string()),
        None => (default_set.to_string(), name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn vendor_fixture(dir: &std::path::Path) {
        std::fs::write(
            dir.join("lucide.json"),
            r#"{"icons": {"check": {"body": "<path/>"}}}"#,
        )
        .unwrap();
    }

    fn config_for(dir: &std::path::Path) -> Configuration {
        Configuration::new()
            .with_vendor_dir(dir)
            .with_bundled_dir(dir)
    }

    /// Fallback source that counts how often it is queried.
    struct CountingSource {
        calls: std::sync::Arc<AtomicUsize>,
        record: Option<IconRecord>,
    }

    impl CountingSource {
        fn returning(record: Option<IconRecord>) -> (Self, std::sync::Arc<AtomicUsize>) {
            let calls = std::sync::Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: std::sync::Arc::clone(&calls),
                    record,
                },
                calls,
            )
        }
    }

    impl FallbackSource for CountingSource {
        fn fetch_icon(&self, _prefix: &str, _name: &str) -> Option<IconRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.record.clone()
        }
    }

    #[test]
    fn parse_name_splits_on_first_colon() {
        assert_eq!(
            parse_name("lucide:check", "lucide"),
            ("lucide".to_string(), "check".to_string())
        );
        assert_eq!(
            parse_name("mdi:a:b", "lucide"),
            ("mdi".to_string(), "a:b".to_string())
        );
    }

    #[test]
    fn parse_name_defaults_prefix_and_trims() {
        assert_eq!(
            parse_name("  check \n", "lucide"),
            ("lucide".to_string(), "check".to_string())
        );
    }

    #[test]
    fn resolves_from_vendor_and_registers_set() {
        let dir = tempfile::tempdir().unwrap();
        vendor_fixture(dir.path());
        let config = config_for(dir.path());
        let resolver = Resolver::new();
        let cache = Cache::new();

        let record = resolver
            .resolve("lucide:check", &config, &cache)
            .unwrap()
            .unwrap();
        assert_eq!(record.body, "<path/>");
        assert!(resolver.is_loaded("lucide"));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn second_resolve_hits_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        vendor_fixture(dir.path());
        let config = config_for(dir.path());
        let resolver = Resolver::new();
        let cache = Cache::new();

        resolver.resolve("lucide:check", &config, &cache).unwrap();

        // Remove every non-cache source: the only way the second call can
        // succeed is through the cache.
        std::fs::remove_file(dir.path().join("lucide.json")).unwrap();
        resolver.clear();

        let record = resolver
            .resolve("lucide:check", &config, &cache)
            .unwrap()
            .unwrap();
        assert_eq!(record.body, "<path/>");
    }

    #[test]
    fn missing_icon_resolves_to_none_and_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        vendor_fixture(dir.path());
        let config = config_for(dir.path());
        let resolver = Resolver::new();
        let cache = Cache::new();

        assert!(resolver
            .resolve("lucide:nope", &config, &cache)
            .unwrap()
            .is_none());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn resolves_from_bundled_archive() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let json = r#"{"icons": {"star": {"body": "<path/>"}}}"#;
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(json.as_bytes()).unwrap();
        std::fs::write(dir.path().join("mdi.json.gz"), encoder.finish().unwrap()).unwrap();

        let config = config_for(dir.path());
        let resolver = Resolver::new();
        let cache = Cache::new();

        assert!(resolver
            .resolve("mdi:star", &config, &cache)
            .unwrap()
            .is_some());
        assert!(resolver.is_loaded("mdi"));
    }

    #[test]
    fn vendor_beats_bundled() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        vendor_fixture(dir.path());
        let bundled = r#"{"icons": {"check": {"body": "<rect/>"}}}"#;
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(bundled.as_bytes()).unwrap();
        std::fs::write(dir.path().join("lucide.json.gz"), encoder.finish().unwrap()).unwrap();

        let config = config_for(dir.path());
        let resolver = Resolver::new();
        let cache = Cache::new();

        let record = resolver
            .resolve("lucide:check", &config, &cache)
            .unwrap()
            .unwrap();
        assert_eq!(record.body, "<path/>");
    }

    #[test]
    fn malformed_vendor_file_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lucide.json"), "{oops").unwrap();
        let config = config_for(dir.path());
        let resolver = Resolver::new();
        let cache = Cache::new();

        assert!(resolver.resolve("lucide:check", &config, &cache).is_err());
    }

    #[test]
    fn fallback_result_is_cached_but_set_not_registered() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let (source, calls) = CountingSource::returning(Some(IconRecord {
            body: "<path/>".to_string(),
            width: 24,
            height: 24,
        }));
        let resolver = Resolver::with_fallback(Box::new(source));
        let cache = Cache::new();

        assert!(resolver
            .resolve("remote:icon", &config, &cache)
            .unwrap()
            .is_some());
        assert!(!resolver.is_loaded("remote"));
        assert_eq!(cache.size(), 1);

        // Second resolve is served from the cache, not the source.
        resolver.resolve("remote:icon", &config, &cache).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fallback_miss_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());
        let (source, _calls) = CountingSource::returning(None);
        let resolver = Resolver::with_fallback(Box::new(source));
        let cache = Cache::new();

        assert!(resolver
            .resolve("remote:icon", &config, &cache)
            .unwrap()
            .is_none());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn clear_forces_vendor_reread() {
        let dir = tempfile::tempdir().unwrap();
        vendor_fixture(dir.path());
        let config = config_for(dir.path());
        let resolver = Resolver::new();
        let cache = Cache::new();

        resolver.resolve("lucide:check", &config, &cache).unwrap();
        assert!(resolver.is_loaded("lucide"));

        resolver.clear();
        assert!(!resolver.is_loaded("lucide"));

        // Different icon (cache miss) reloads the set from disk.
        std::fs::write(
            dir.path().join("lucide.json"),
            r#"{"icons": {"x": {"body": "<line/>"}}}"#,
        )
        .unwrap();
        let record = resolver
            .resolve("lucide:x", &config, &cache)
            .unwrap()
            .unwrap();
        assert_eq!(record.body, "<line/>");
    }
}
