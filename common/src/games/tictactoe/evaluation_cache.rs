use std::collections::HashMap;

use super::types::Board;

pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    board: u16,
    maximizing: bool,
}

impl CacheKey {
    pub fn new(board: &Board, maximizing: bool) -> Self {
        Self {
            board: board.key(),
            maximizing,
        }
    }
}

/// Memo of search scores keyed by board and side to move.
///
/// Purely a speed-up: the table is wiped as soon as it holds more than
/// `capacity` entries, and losing entries never changes a search result.
#[derive(Debug)]
pub struct EvaluationCache {
    entries: HashMap<CacheKey, i32>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for EvaluationCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl EvaluationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY) + 1),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<i32> {
        match self.entries.get(key) {
            Some(&score) => {
                self.hits += 1;
                Some(score)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: CacheKey, score: i32) {
        self.entries.insert(key, score);
        if self.entries.len() > self.capacity {
            self.entries.clear();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
