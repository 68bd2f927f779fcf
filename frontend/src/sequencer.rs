use std::collections::HashMap;
use std::hash::Hash;

/// Handed out for every request; only the newest ticket per key is current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket<K> {
    pub key: K,
    pub number: u64,
}

/// Orders in-flight requests per key so that a response is only applied when
/// no newer request for the same key has been issued since.
#[derive(Debug)]
pub struct RequestSequencer<K> {
    next: u64,
    latest: HashMap<K, u64>,
}

impl<K: Hash + Eq + Copy> RequestSequencer<K> {
    pub fn new() -> Self {
        RequestSequencer {
            next: 1,
            latest: HashMap::new(),
        }
    }

    pub fn issue(&mut self, key: K) -> Ticket<K> {
        let number = self.next;
        self.next += 1;
        self.latest.insert(key, number);

        Ticket { key, number }
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.latest.get(&ticket.key) == Some(&ticket.number)
    }

    /// Marks the ticket's request as completed. Returns whether its response
    /// should be applied. Numbers are global, so a stale ticket stays stale
    /// after the current one has been finished and forgotten.
    pub fn finish(&mut self, ticket: Ticket<K>) -> bool {
        if self.is_current(&ticket) {
            self.latest.remove(&ticket.key);
            true
        } else {
            false
        }
    }

    /// Whether some request for `key` has been issued and not yet finished
    /// as current.
    pub fn is_pending(&self, key: &K) -> bool {
        self.latest.contains_key(key)
    }
}

impl<K: Hash + Eq + Copy> Default for RequestSequencer<K> {
    fn default() -> Self {
        Self::new()
    }
}
