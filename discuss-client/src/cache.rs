use std::collections::BTreeSet;

use discuss_api::{UserVote, VoteKind};

/// Durable storage key holding the JSON array of collapsed thread ids.
pub const COLLAPSED_THREADS_KEY: &str = "collapsedThreads";

/// Browser-profile-scoped key-value storage.
///
/// Implementations must not panic when storage is disabled or full: reads
/// degrade to `None` and writes to an error the callers log and drop.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("durable storage unavailable: {0}")]
pub struct StoreError(pub String);

/// Last known vote direction per entity, persisted across reloads.
///
/// Write-only-forward: records are overwritten on every vote response but
/// never deleted. A server-reported neutral vote is stored explicitly as
/// `"0"` so a later reload does not paint a stale direction.
pub struct VoteCache<S> {
    store: S,
}

impl<S: KvStore> VoteCache<S> {
    pub fn new(store: S) -> VoteCache<S> {
        VoteCache { store }
    }

    fn key(kind: VoteKind, id: &str) -> String {
        format!("discuss_{}_vote_{}", kind.as_str(), id)
    }

    /// Persist the server's resulting vote. Never fails: a storage error
    /// is logged and the vote is simply not remembered across reloads.
    pub fn record(&self, kind: VoteKind, id: &str, vote: UserVote) {
        let key = Self::key(kind, id);
        if let Err(e) = self.store.set(&key, vote.as_stored()) {
            tracing::warn!(%key, %e, "failed to persist vote");
        }
    }

    pub fn lookup(&self, kind: VoteKind, id: &str) -> Option<UserVote> {
        UserVote::from_stored(&self.store.get(&Self::key(kind, id))?)
    }
}

/// The set of threads the user has collapsed, persisted across reloads.
pub struct CollapsedThreads<S> {
    store: S,
    threads: BTreeSet<String>,
}

impl<S: KvStore> CollapsedThreads<S> {
    pub fn load(store: S) -> CollapsedThreads<S> {
        let threads = match store.get(COLLAPSED_THREADS_KEY) {
            None => BTreeSet::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    tracing::warn!(%e, "discarding unreadable collapsed-thread set");
                    BTreeSet::new()
                }
            },
        };
        CollapsedThreads { store, threads }
    }

    pub fn contains(&self, thread_id: &str) -> bool {
        self.threads.contains(thread_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.threads.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Record a thread as collapsed. Returns whether the set changed.
    pub fn collapse(&mut self, thread_id: &str) -> bool {
        let inserted = self.threads.insert(thread_id.to_string());
        if inserted {
            self.persist();
        }
        inserted
    }

    /// Record a thread as expanded. Returns whether the set changed.
    pub fn expand(&mut self, thread_id: &str) -> bool {
        let removed = self.threads.remove(thread_id);
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        let ids: Vec<&str> = self.threads.iter().map(String::as_str).collect();
        let raw = match serde_json::to_string(&ids) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(%e, "failed to serialize collapsed-thread set");
                return;
            }
        };
        if let Err(e) = self.store.set(COLLAPSED_THREADS_KEY, &raw) {
            tracing::warn!(%e, "failed to persist collapsed-thread set");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, collections::HashMap, rc::Rc};

    #[derive(Clone, Default)]
    struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

    impl KvStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Storage with its quota exhausted (or disabled outright).
    struct BrokenStore;

    impl KvStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError("quota exceeded".to_string()))
        }
    }

    #[test]
    fn vote_cache_round_trips_under_per_entity_keys() {
        let store = MemoryStore::default();
        let cache = VoteCache::new(store.clone());
        cache.record(VoteKind::Post, "42", UserVote::Up);
        cache.record(VoteKind::Comment, "17", UserVote::Down);

        assert_eq!(store.get("discuss_post_vote_42").as_deref(), Some("1"));
        assert_eq!(store.get("discuss_comment_vote_17").as_deref(), Some("-1"));
        assert_eq!(cache.lookup(VoteKind::Post, "42"), Some(UserVote::Up));
        assert_eq!(cache.lookup(VoteKind::Comment, "17"), Some(UserVote::Down));
        assert_eq!(cache.lookup(VoteKind::Post, "99"), None);
    }

    #[test]
    fn vote_cache_overwrites_and_stores_neutral() {
        let store = MemoryStore::default();
        let cache = VoteCache::new(store.clone());
        cache.record(VoteKind::Post, "42", UserVote::Up);
        cache.record(VoteKind::Post, "42", UserVote::Neutral);
        assert_eq!(store.get("discuss_post_vote_42").as_deref(), Some("0"));
        assert_eq!(cache.lookup(VoteKind::Post, "42"), Some(UserVote::Neutral));
    }

    #[test]
    fn vote_cache_is_a_noop_on_broken_storage() {
        let cache = VoteCache::new(BrokenStore);
        cache.record(VoteKind::Post, "42", UserVote::Up);
        assert_eq!(cache.lookup(VoteKind::Post, "42"), None);
    }

    #[test]
    fn collapse_is_idempotent() {
        let mut set = CollapsedThreads::load(MemoryStore::default());
        assert!(set.collapse("17"));
        assert!(!set.collapse("17"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("17"));
    }

    #[test]
    fn collapse_then_expand_restores_prior_contents() {
        let mut set = CollapsedThreads::load(MemoryStore::default());
        set.collapse("3");
        let before: Vec<String> = set.iter().map(String::from).collect();
        set.collapse("17");
        set.expand("17");
        let after: Vec<String> = set.iter().map(String::from).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn collapsed_set_survives_reload() {
        let store = MemoryStore::default();
        {
            let mut set = CollapsedThreads::load(store.clone());
            set.collapse("17");
            set.collapse("3");
            set.expand("3");
        }
        let reloaded = CollapsedThreads::load(store.clone());
        assert!(reloaded.contains("17"));
        assert!(!reloaded.contains("3"));
        assert_eq!(store.get(COLLAPSED_THREADS_KEY).as_deref(), Some(r#"["17"]"#));
    }

    #[test]
    fn unreadable_stored_set_degrades_to_empty() {
        let store = MemoryStore::default();
        store.set(COLLAPSED_THREADS_KEY, "{not json").unwrap();
        let set = CollapsedThreads::load(store);
        assert!(set.is_empty());
    }

    #[test]
    fn collapsed_set_keeps_working_on_broken_storage() {
        let mut set = CollapsedThreads::load(BrokenStore);
        assert!(set.collapse("17"));
        assert!(set.contains("17"));
        assert!(set.expand("17"));
        assert!(set.is_empty());
    }
}
