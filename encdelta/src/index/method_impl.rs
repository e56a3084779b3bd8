use std::collections::HashMap;

use fxhash::FxBuildHasher;

use crate::token::{MethodDefToken, MethodImplToken, RowToken};

/// `MethodImpl` rows for one delta, keyed by `(implementing method, Nth
/// override declared on it)`. A method can carry more than one explicit
/// override (one `MethodImpl` row each); re-adding the same method bumps the
/// occurrence counter instead of colliding.
pub struct MethodImplIndex {
    occurrences: HashMap<MethodDefToken, u32, FxBuildHasher>,
    rows: Vec<(MethodDefToken, u32, MethodImplToken)>,
    next_row_id: u32,
}

impl MethodImplIndex {
    /// `baseline` is every `(method, occurrence) -> row` pair emitted in an
    /// earlier generation, so a method that already has overrides keeps
    /// numbering its occurrences upward instead of restarting at 0.
    pub fn new(first_new_row_id: u32, baseline: &HashMap<(MethodDefToken, u32), MethodImplToken, FxBuildHasher>) -> Self {
        let mut occurrences: HashMap<MethodDefToken, u32, FxBuildHasher> = HashMap::default();
        for &(method, occurrence) in baseline.keys() {
            let next = occurrence + 1;
            let entry = occurrences.entry(method).or_insert(0);
            if next > *entry {
                *entry = next;
            }
        }
        Self { occurrences, rows: Vec::new(), next_row_id: first_new_row_id }
    }

    /// Allocates a new `MethodImpl` row for `method`, returning the
    /// occurrence index (0 for the method's first override ever, or one past
    /// the highest occurrence the baseline already has for it).
    pub fn add(&mut self, method: MethodDefToken) -> (u32, MethodImplToken) {
        let occurrence = self.occurrences.entry(method).or_insert(0);
        let this_occurrence = *occurrence;
        *occurrence += 1;

        let token = MethodImplToken::from_row_id(self.next_row_id);
        self.next_row_id += 1;
        self.rows.push((method, this_occurrence, token));
        (this_occurrence, token)
    }

    pub fn rows(&self) -> &[(MethodDefToken, u32, MethodImplToken)] {
        &self.rows
    }
}
