//! Thread-safe in-memory cache for resolved icons

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::types::IconRecord;

/// Memoization of fully resolved icons, keyed by `"prefix:name"`.
///
/// A single mutex guards all operations; lookups are cheap and cache hits
/// dominate, so a read/write split buys nothing here. Entries are never
/// evicted except by an explicit [`clear`](Cache::clear); the keyspace is
/// bounded by the distinct icons a process ever requests.
#[derive(Debug, Default)]
pub struct Cache {
    store: Mutex<HashMap<String, IconRecord>>,
}

impl Cache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve a cached record, or `None` if not present
    pub fn get(&self, prefix: &str, name: &str) -> Option<IconRecord> {
        self.store.lock().get(&cache_key(prefix, name)).cloned()
    }

    /// Store a record and return it. Callers only ever see snapshots, so
    /// an entry never mutates after insertion.
    pub fn set(&self, prefix: &str, name: &str, record: IconRecord) -> IconRecord {
        self.store
            .lock()
            .insert(cache_key(prefix, name), record.clone());
        record
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    /// Number of cached entries
    pub fn size(&self) -> usize {
        self.store.lock().len()
    }
}

fn cache_key(prefix: &str, name: &str) -> String {
    format!("{prefix}:{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(body: &str) -> IconRecord {
        IconRecord {
            body: body.to_string(),
            width: 24,
            height: 24,
        }
    }

    #[test]
    fn set_then_get_returns_equal_record() {
        let cache = Cache::new();
        let stored = cache.set("lucide", "check", record("<path/>"));
        assert_eq!(cache.get("lucide", "check"), Some(stored));
    }

    #[test]
    fn get_missing_returns_none() {
        let cache = Cache::new();
        assert!(cache.get("lucide", "check").is_none());
    }

    #[test]
    fn keys_are_namespaced_by_prefix() {
        let cache = Cache::new();
        cache.set("lucide", "check", record("<path/>"));
        assert!(cache.get("mdi", "check").is_none());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = Cache::new();
        cache.set("lucide", "check", record("<path/>"));
        cache.clear();
        assert!(cache.get("lucide", "check").is_none());
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn size_counts_distinct_keys() {
        let cache = Cache::new();
        cache.set("lucide", "check", record("<path/>"));
        cache.set("lucide", "check", record("<rect/>"));
        cache.set("lucide", "x", record("<path/>"));
        assert_eq!(cache.size(), 2);
    }

    #[test]
    fn concurrent_sets_and_gets_keep_size_consistent() {
        let cache = Arc::new(Cache::new());
        let threads: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let name = format!("icon-{t}-{i}");
                        cache.set("set", &name, record("<path/>"));
                        assert!(cache.get("set", &name).is_some());
                    }
                })
            })
            .collect();

        for handle in threads {
            handle.join().unwrap();
        }
        assert_eq!(cache.size(), 800);
    }
}
