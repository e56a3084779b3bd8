use std::collections::HashMap;
use std::hash::Hash;

use fxhash::FxBuildHasher;

use crate::token::{MetadataToken, RowToken};

/// Tracks, for one definition kind (types, methods, fields, ...), which
/// definitions got a brand-new row this generation versus which kept an
/// existing row whose contents changed.
///
/// Row ids handed out by [`DefinitionIndex::add`] are sequential starting at
/// the table's first free row id, matching row-id continuation: this
/// generation's new rows always sort after every row the baseline already
/// knows about.
pub struct DefinitionIndex<D, T> {
    added: Vec<(D, MetadataToken, T)>,
    added_lookup: HashMap<D, T, FxBuildHasher>,
    updated: HashMap<D, T, FxBuildHasher>,
    /// Resolutions served by the definition map this generation, cached so a
    /// second call for the same definition never re-queries it.
    memo: HashMap<D, T, FxBuildHasher>,
    by_row: HashMap<u32, D, FxBuildHasher>,
    next_row_id: u32,
}

impl<D, T> DefinitionIndex<D, T>
where
    D: Copy + Eq + Hash,
    T: RowToken,
{
    pub fn new(first_new_row_id: u32) -> Self {
        Self {
            added: Vec::new(),
            added_lookup: HashMap::default(),
            updated: HashMap::default(),
            memo: HashMap::default(),
            by_row: HashMap::default(),
            next_row_id: first_new_row_id,
        }
    }

    /// Allocates a fresh row for `def`, owned by `owner` (the `TypeDef` a new
    /// field or method belongs to, the `EventMap`/`PropertyMap` row a new
    /// event or property belongs to, or the enclosing `Module`/`TypeDef` a
    /// new type belongs to).
    pub fn add(&mut self, def: D, owner: MetadataToken) -> T {
        let token = T::from_row_id(self.next_row_id);
        self.next_row_id += 1;
        self.added.push((def, owner, token));
        self.added_lookup.insert(def, token);
        self.by_row.insert(token.row_id(), def);
        token
    }

    /// Records that `def`'s existing row (already resolved via the
    /// definition map) changed content this generation; it keeps `token`.
    pub fn add_updated(&mut self, def: D, token: T) {
        self.updated.insert(def, token);
        self.by_row.insert(token.row_id(), def);
    }

    pub fn try_get_added(&self, def: D) -> Option<T> {
        self.added_lookup.get(&def).copied()
    }

    pub fn try_get_updated(&self, def: D) -> Option<T> {
        self.updated.get(&def).copied()
    }

    /// True when `def` got a brand-new row this generation, as opposed to
    /// reusing a row it already had.
    pub fn is_fresh(&self, def: D) -> bool {
        self.added_lookup.contains_key(&def)
    }

    /// New rows in allocation order, paired with the owner token each one was
    /// added under, ready for `EncLog`'s `(owner, AddX)` + `(child, Default)`
    /// pairing.
    pub fn added_rows_with_owner(&self) -> impl Iterator<Item = (MetadataToken, T)> + '_ {
        self.added.iter().map(|&(_, owner, token)| (owner, token))
    }

    /// New rows in allocation order, without the owner.
    pub fn added_rows(&self) -> impl Iterator<Item = (D, T)> + '_ {
        self.added.iter().map(|&(def, _, token)| (def, token))
    }

    /// Existing rows marked changed this generation, ready for `EncLog`
    /// `Default` entries.
    pub fn updated_rows(&self) -> impl Iterator<Item = (D, T)> + '_ {
        self.updated.iter().map(|(&d, &t)| (d, t))
    }

    /// Resolves `def`'s row id, trying in order: this delta's own additions,
    /// this delta's updates, the baseline's additions from earlier
    /// generations, and finally the definition map — memoizing a definition
    /// map hit so a later call for the same `def` does not re-query it.
    pub fn try_get(
        &mut self,
        def: D,
        baseline_added: &HashMap<D, T, FxBuildHasher>,
        definition_map: impl FnOnce(D) -> Option<T>,
    ) -> Option<T> {
        if let Some(token) = self.try_get_added(def) {
            return Some(token);
        }
        if let Some(token) = self.try_get_updated(def) {
            return Some(token);
        }
        if let Some(&token) = baseline_added.get(&def) {
            return Some(token);
        }
        if let Some(&token) = self.memo.get(&def) {
            return Some(token);
        }
        let token = definition_map(def)?;
        self.memo.insert(def, token);
        Some(token)
    }

    /// Every row this generation knows about for this table, added and
    /// updated together, frozen and sorted strictly ascending by row id —
    /// used when emitting rows in id order.
    pub fn sorted_rows(&self) -> Vec<(D, T)> {
        let mut rows: Vec<(D, T)> = self.added_rows().chain(self.updated_rows()).collect();
        rows.sort_by_key(|&(_, token)| token.row_id());
        rows
    }

    /// The definition that owns `row_id`, the reverse of `add`/`add_updated`.
    pub fn get(&self, row_id: u32) -> Option<D> {
        self.by_row.get(&row_id).copied()
    }
}
