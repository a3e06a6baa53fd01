use super::self_prelude::*;
use parking_lot::Mutex;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_BUILD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one schema build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildId(u64);

impl BuildId {
    pub fn next() -> Self {
        Self(NEXT_BUILD_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey {
    pub build: BuildId,
    pub paginator: PaginatorId,
}

/// Generated types memoized by build and paginator identity.
///
/// Entries are never evicted. Racing constructors may both run, but only
/// the first insert is kept and every caller gets that one.
pub struct TypeCache<T> {
    entries: Mutex<HashMap<TypeKey, Arc<T>>>,
}

impl<T> Default for TypeCache<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T> TypeCache<T> {
    pub fn get(&self, key: TypeKey) -> Option<Arc<T>> {
        self.entries.lock().get(&key).cloned()
    }

    /// Returns the cached entry, constructing it if needed. The flag is
    /// `true` only for the caller whose value was inserted.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: TypeKey,
        construct: impl FnOnce() -> Result<T, E>,
    ) -> Result<(Arc<T>, bool), E> {
        if let Some(existing) = self.get(key) {
            return Ok((existing, false));
        }
        // Constructors may re-enter the cache for other keys, so the lock is
        // not held while constructing.
        let value = Arc::new(construct()?);
        match self.entries.lock().entry(key) {
            Entry::Occupied(entry) => Ok((entry.get().clone(), false)),
            Entry::Vacant(entry) => Ok((entry.insert(value).clone(), true)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{post_paginator, tag_paginator};
    use std::convert::Infallible;

    #[test]
    fn memoizes_by_identity() {
        let cache = TypeCache::<String>::default();
        let build = BuildId::next();
        let post = post_paginator();
        let other_post = post_paginator();
        let key = |paginator: &PaginatorHandle| TypeKey {
            build,
            paginator: paginator.id(),
        };

        let (first, inserted) = cache
            .get_or_try_insert_with(key(&post), || Ok::<_, Infallible>("post".to_string()))
            .unwrap();
        assert!(inserted);
        let (second, inserted) = cache
            .get_or_try_insert_with(key(&post.clone()), || {
                Ok::<_, Infallible>("again".to_string())
            })
            .unwrap();
        assert!(!inserted);
        assert!(Arc::ptr_eq(&first, &second));

        let (other, inserted) = cache
            .get_or_try_insert_with(key(&other_post), || Ok::<_, Infallible>("post".to_string()))
            .unwrap();
        assert!(inserted);
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn separate_builds_do_not_share() {
        let cache = TypeCache::<u8>::default();
        let tag = tag_paginator();
        let a = TypeKey {
            build: BuildId::next(),
            paginator: tag.id(),
        };
        let b = TypeKey {
            build: BuildId::next(),
            paginator: tag.id(),
        };
        cache.get_or_try_insert_with(a, || Ok::<_, Infallible>(1)).unwrap();
        assert!(cache.get(b).is_none());
    }

    #[test]
    fn failed_construction_is_not_cached() {
        let cache = TypeCache::<u8>::default();
        let key = TypeKey {
            build: BuildId::next(),
            paginator: tag_paginator().id(),
        };
        assert_eq!(cache.get_or_try_insert_with(key, || Err("boom")), Err("boom"));
        assert!(cache.is_empty());
    }
}
