//! The merged emit baseline carried from one generation to the next.
//!
//! `EmitBaseline` is the one piece of state that outlives a single delta: it
//! is produced by [`crate::merge`] after a successful emit and fed back in as
//! the starting point for the next one.

use std::collections::HashMap;

use fxhash::FxBuildHasher;
use uuid::Uuid;

use crate::ids::{MethodDefId, TypeDefId};
use crate::module_builder::LocalSlotInfo;
use crate::synth_local::SynthesizedLocalKind;
use crate::token::{EventMapToken, MethodDefToken, MethodImplToken, PropertyMapToken, TableKind, TypeDefToken};

/// Identifies one method body across generations: `ordinal` is stable for
/// the method's lifetime, `generation` is the delta that last changed it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MethodDebugId {
    pub ordinal: u32,
    pub generation: u32,
}

/// Per-method debug-info carried forward so the next generation's local
/// signature can reuse slot assignments instead of renumbering locals.
#[derive(Debug, Clone)]
pub struct MethodDebugInfo {
    pub debug_id: MethodDebugId,
    pub local_slots: Vec<LocalSlotInfo>,
    pub lambda_debug_info: Vec<crate::module_builder::LambdaDebugInfo>,
    pub closure_debug_info: Vec<crate::module_builder::ClosureDebugInfo>,
    pub state_machine_type_name: Option<String>,
    pub state_machine_hoisted_local_slots: Vec<LocalSlotInfo>,
    pub state_machine_awaiter_slots: Vec<SynthesizedLocalKind>,
}

/// State merged forward after every successful delta emit.
///
/// `ordinal` counts generations from the baseline compile (generation 0,
/// which this crate never produces — it always starts from `ordinal >= 1`).
/// `enc_id` identifies this generation; `enc_base_id` is the generation's
/// `enc_id` that directly precedes it, chaining every delta back to the
/// original compile.
pub struct EmitBaseline {
    pub ordinal: u32,
    pub enc_id: Uuid,
    pub enc_base_id: Uuid,

    /// Next free row id per table, across every generation so far.
    pub table_sizes: HashMap<TableKind, u32, FxBuildHasher>,
    pub blob_heap_len: u32,
    pub string_heap_len: u32,
    pub user_string_heap_len: u32,
    pub guid_heap_len: u32,

    /// Definitions added in some earlier generation, keyed by kind.
    pub added_types: HashMap<TypeDefId, TypeDefToken, FxBuildHasher>,
    pub added_methods: HashMap<MethodDefId, MethodDefToken, FxBuildHasher>,

    pub type_to_event_map: HashMap<TypeDefToken, EventMapToken, FxBuildHasher>,
    pub type_to_property_map: HashMap<TypeDefToken, PropertyMapToken, FxBuildHasher>,

    /// Every `MethodImpl` row emitted so far, keyed by `(method, occurrence)`.
    pub method_impls: HashMap<(MethodDefToken, u32), MethodImplToken, FxBuildHasher>,

    pub method_debug_info: HashMap<MethodDefToken, MethodDebugInfo, FxBuildHasher>,

    /// Anonymous/synthesized types keyed by their structural shape, so an
    /// equivalent anonymous type introduced again in a later generation
    /// reuses the same `TypeDef` row instead of duplicating it.
    pub anonymous_type_map: HashMap<String, TypeDefToken, FxBuildHasher>,

    /// Names already handed out for synthesized members this generation's
    /// predecessors created, so a new synthesized member never collides with
    /// one from an earlier generation.
    pub synthesized_member_names: HashMap<String, u32, FxBuildHasher>,
}

impl EmitBaseline {
    /// The baseline a writer starts from when there is no prior delta: every
    /// table starts at row id 1 (row id 0 is reserved across all CLI metadata
    /// tables), every heap is empty, `enc_base_id` equals `enc_id` since this
    /// is itself generation 1.
    pub fn initial(enc_id: Uuid, table_sizes: HashMap<TableKind, u32, FxBuildHasher>) -> Self {
        Self {
            ordinal: 1,
            enc_id,
            enc_base_id: enc_id,
            table_sizes,
            blob_heap_len: 0,
            string_heap_len: 0,
            user_string_heap_len: 0,
            guid_heap_len: 0,
            added_types: HashMap::default(),
            added_methods: HashMap::default(),
            type_to_event_map: HashMap::default(),
            type_to_property_map: HashMap::default(),
            method_impls: HashMap::default(),
            method_debug_info: HashMap::default(),
            anonymous_type_map: HashMap::default(),
            synthesized_member_names: HashMap::default(),
        }
    }

    pub fn next_row_id(&self, table: TableKind) -> u32 {
        self.table_sizes.get(&table).copied().unwrap_or(1)
    }
}
