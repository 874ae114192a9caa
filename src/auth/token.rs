//! In-memory cache of recently resolved auth keys

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use crate::storage::TokenKind;
use crate::types::UserId;

/// Bounded LRU of auth key → owning user id.
///
/// A hit saves the join through the token table, nothing more: callers still
/// load the user row and must [`evict`](Self::evict) keys they revoke.
pub struct TokenCache {
    entries: Mutex<LruCache<String, (TokenKind, UserId)>>,
}

impl TokenCache {
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &str, kind: TokenKind) -> Option<UserId> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some((cached_kind, user)) if *cached_kind == kind => Some(*user),
            _ => None,
        }
    }

    pub fn insert(&self, key: String, kind: TokenKind, user: UserId) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.put(key, (kind, user));
    }

    pub fn evict(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.pop(key);
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
