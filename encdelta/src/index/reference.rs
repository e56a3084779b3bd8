use std::collections::HashMap;
use std::hash::Hash;

use fxhash::FxBuildHasher;

use crate::token::RowToken;

/// Content-addressed store for rows that are identified by their content
/// rather than by a definition (`MemberRef`, `TypeSpec`, `MethodSpec`,
/// `StandAloneSig`): two equal keys always resolve to the same row, so a
/// signature referenced from several places is only emitted once.
pub struct ReferenceIndex<K, T> {
    entries: HashMap<K, T, FxBuildHasher>,
    order: Vec<(K, T)>,
    next_row_id: u32,
}

impl<K, T> ReferenceIndex<K, T>
where
    K: Clone + Eq + Hash,
    T: RowToken,
{
    pub fn new(first_new_row_id: u32) -> Self {
        Self { entries: HashMap::default(), order: Vec::new(), next_row_id: first_new_row_id }
    }

    /// Returns the existing row for `key`, or allocates a new one.
    pub fn get_or_add(&mut self, key: K) -> T {
        if let Some(token) = self.entries.get(&key) {
            return *token;
        }
        let token = T::from_row_id(self.next_row_id);
        self.next_row_id += 1;
        self.entries.insert(key.clone(), token);
        self.order.push((key, token));
        token
    }

    pub fn rows(&self) -> &[(K, T)] {
        &self.order
    }
}
