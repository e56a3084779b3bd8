//! The change oracle capability.
//!
//! `SymbolChanges` is deliberately narrow: a tagged sum plus the handful of
//! predicates the change driver and reference visitor actually call, rather
//! than a generic "symbol observer" — there is exactly one concrete oracle
//! shape this crate needs.

use crate::ids::{EventDefId, FieldDefId, MethodDefId, PropertyDefId, TypeDefId};

/// How a definition compares to the baseline generation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ChangeKind {
    /// Brand new in this generation; needs a fresh row and an `AddX` EncLog entry.
    Added,
    /// Pre-existing row whose content changed; keeps its row id, needs only a `Default` EncLog entry.
    Updated,
    /// Unchanged itself, but something in its transitive closure (a member, a nested type) changed.
    ContainsChanges,
    /// Untouched; the driver must not recurse into it.
    None,
}

/// Supplied ready-made by the compiler's change-detection pass, which lives
/// outside this crate. One oracle instance serves a single delta.
pub trait SymbolChanges {
    fn type_change(&self, ty: TypeDefId) -> ChangeKind;
    fn method_change(&self, method: MethodDefId) -> ChangeKind;
    fn field_change(&self, field: FieldDefId) -> ChangeKind;
    fn event_change(&self, event: EventDefId) -> ChangeKind;
    fn property_change(&self, property: PropertyDefId) -> ChangeKind;

    /// True when `method` is newly introduced in this generation (used by the
    /// reference visitor to decide whether a `MethodImpl` needs re-emitting,
    /// and by the "reference to added member" diagnostic check).
    fn is_method_added(&self, method: MethodDefId) -> bool {
        matches!(self.method_change(method), ChangeKind::Added)
    }

    /// True when `ty` is newly introduced in this generation.
    fn is_type_added(&self, ty: TypeDefId) -> bool {
        matches!(self.type_change(ty), ChangeKind::Added)
    }

    /// Top-level types whose transitive closure contains at least one change.
    /// The change driver walks exactly this set.
    fn changed_top_level_types(&self) -> Vec<TypeDefId>;
}
