//! In-memory memoization of normalized addresses.
//!
//! Lead exports repeat the same address string many times (households,
//! multiple contacts per office). Normalization is a pure function of the
//! input string, so each distinct input is normalized once and the result
//! reused.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::normalize::AddressNormalizer;
use crate::tagger::{AddressTagger, UsAddressTagger};

/// An [`AddressNormalizer`] with a per-input result cache.
#[derive(Debug)]
pub struct CachedNormalizer<T = UsAddressTagger> {
    inner: AddressNormalizer<T>,
    cache: Mutex<BTreeMap<String, String>>,
    hits: Mutex<u64>,
}

impl Default for CachedNormalizer {
    fn default() -> Self {
        Self::new(AddressNormalizer::default())
    }
}

impl<T: AddressTagger> CachedNormalizer<T> {
    /// Wraps `inner` with an empty cache.
    #[must_use]
    pub const fn new(inner: AddressNormalizer<T>) -> Self {
        Self {
            inner,
            cache: Mutex::new(BTreeMap::new()),
            hits: Mutex::new(0),
        }
    }

    /// Normalizes `raw`, consulting the cache first.
    ///
    /// A poisoned lock only disables caching; the result is always
    /// computed.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        if let Ok(cache) = self.cache.lock()
            && let Some(hit) = cache.get(raw)
        {
            if let Ok(mut hits) = self.hits.lock() {
                *hits += 1;
            }
            return hit.clone();
        }

        let normalized = self.inner.normalize(raw);
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(raw.to_string(), normalized.clone());
        }
        normalized
    }

    /// Number of distinct inputs cached so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().map_or(0, |c| c.len())
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lookups answered from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.lock().map_or(0, |h| *h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_distinct_inputs() {
        let cached: CachedNormalizer = CachedNormalizer::default();
        assert_eq!(cached.normalize("1 N Main St"), "1 North Main Street");
        assert_eq!(cached.normalize("1 N Main St"), "1 North Main Street");
        assert_eq!(cached.normalize("PO BOX 5"), "PO Box 5");
        assert_eq!(cached.len(), 2);
        assert_eq!(cached.hits(), 1);
    }

    #[test]
    fn cached_and_uncached_agree() {
        let cached: CachedNormalizer = CachedNormalizer::default();
        let plain: AddressNormalizer = AddressNormalizer::default();
        for raw in ["", "9 s elm ave", "PO Box 1", "zzz !!", "9 s elm ave"] {
            assert_eq!(cached.normalize(raw), plain.normalize(raw), "{raw:?}");
        }
    }

    #[test]
    fn shared_across_threads() {
        let cached: CachedNormalizer = CachedNormalizer::default();
        let inputs = ["123 N Main St Apt 4", "PO BOX 552", "9 s elm ave"];

        let results: Vec<Vec<String>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        inputs
                            .iter()
                            .map(|raw| cached.normalize(raw))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for result in &results {
            assert_eq!(
                result,
                &["123 North Main Street Apartment 4", "PO Box 552", "9 South elm Avenue"]
            );
        }
        assert_eq!(cached.len(), 3);
    }
}
