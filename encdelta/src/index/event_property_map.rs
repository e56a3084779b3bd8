use std::collections::HashMap;

use fxhash::FxBuildHasher;

use crate::token::{RowToken, TypeDefToken};

/// Resolves the `EventMap`/`PropertyMap` row that owns a type's events or
/// properties, creating one lazily the first time the type gains an event or
/// property it did not have before.
///
/// A type that already had events (or properties) in an earlier generation
/// keeps its existing map row forever — `EventMap`/`PropertyMap` rows are
/// never updated, only created once per type.
pub struct EventPropertyMapIndex<M> {
    baseline: HashMap<TypeDefToken, M, FxBuildHasher>,
    added: HashMap<TypeDefToken, M, FxBuildHasher>,
    next_row_id: u32,
}

impl<M> EventPropertyMapIndex<M>
where
    M: RowToken,
{
    pub fn new(first_new_row_id: u32, baseline: HashMap<TypeDefToken, M, FxBuildHasher>) -> Self {
        Self { baseline, added: HashMap::default(), next_row_id: first_new_row_id }
    }

    pub fn get_or_create(&mut self, owner: TypeDefToken) -> M {
        if let Some(token) = self.added.get(&owner) {
            return *token;
        }
        if let Some(token) = self.baseline.get(&owner) {
            return *token;
        }
        let token = M::from_row_id(self.next_row_id);
        self.next_row_id += 1;
        self.added.insert(owner, token);
        token
    }

    /// Map rows created this generation, ready for `EncLog` `AddX` entries.
    pub fn added_rows(&self) -> impl Iterator<Item = (TypeDefToken, M)> + '_ {
        self.added.iter().map(|(&k, &v)| (k, v))
    }
}
