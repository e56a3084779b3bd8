//! Baseline merging.
//!
//! Folds a finished delta's indices back into the previous generation's
//! [`EmitBaseline`], producing the baseline the next delta starts from.
//! Nothing here re-derives anything the driver already decided — it only
//! carries forward what must survive to the next generation.

use uuid::Uuid;

use crate::baseline::{EmitBaseline, MethodDebugInfo};
use crate::driver::DeltaIndices;
use crate::token::{MethodDefToken, TableKind};

/// Produces the next generation's baseline from this generation's finished
/// indices and debug info.
pub fn merge(
    mut previous: EmitBaseline,
    indices: &DeltaIndices,
    method_debug_info: Vec<(MethodDefToken, MethodDebugInfo)>,
    new_enc_id: Uuid,
    heap_lengths: (u32, u32, u32, u32),
) -> EmitBaseline {
    for (def, token) in indices.types.added_rows() {
        previous.added_types.insert(def, token);
    }
    for (def, token) in indices.methods.added_rows() {
        previous.added_methods.insert(def, token);
    }
    for (owner, map_token) in indices.event_maps.added_rows() {
        previous.type_to_event_map.insert(owner, map_token);
    }
    for (owner, map_token) in indices.property_maps.added_rows() {
        previous.type_to_property_map.insert(owner, map_token);
    }
    for &(method, occurrence, row) in indices.method_impls.rows() {
        previous.method_impls.insert((method, occurrence), row);
    }
    for (token, info) in method_debug_info {
        previous.method_debug_info.insert(token, info);
    }

    previous.table_sizes.insert(TableKind::TypeDef, next_size(&previous, TableKind::TypeDef, indices.types.added_rows().count()));
    previous.table_sizes.insert(TableKind::MethodDef, next_size(&previous, TableKind::MethodDef, indices.methods.added_rows().count()));
    previous.table_sizes.insert(TableKind::Field, next_size(&previous, TableKind::Field, indices.fields.added_rows().count()));
    previous.table_sizes.insert(TableKind::Event, next_size(&previous, TableKind::Event, indices.events.added_rows().count()));
    previous.table_sizes.insert(TableKind::Property, next_size(&previous, TableKind::Property, indices.properties.added_rows().count()));
    previous.table_sizes.insert(TableKind::Param, next_size(&previous, TableKind::Param, indices.params.rows().len()));
    previous.table_sizes.insert(TableKind::GenericParam, next_size(&previous, TableKind::GenericParam, indices.generic_params.rows().len()));
    previous.table_sizes.insert(TableKind::MethodImpl, next_size(&previous, TableKind::MethodImpl, indices.method_impls.rows().len()));
    previous.table_sizes.insert(TableKind::StandAloneSig, next_size(&previous, TableKind::StandAloneSig, indices.local_signatures.rows().len()));
    previous.table_sizes.insert(TableKind::AssemblyRef, next_size(&previous, TableKind::AssemblyRef, indices.assembly_refs.rows().len()));
    previous.table_sizes.insert(TableKind::ModuleRef, next_size(&previous, TableKind::ModuleRef, indices.module_refs.rows().len()));
    previous.table_sizes.insert(TableKind::TypeRef, next_size(&previous, TableKind::TypeRef, indices.type_refs.rows().len()));
    previous.table_sizes.insert(TableKind::TypeSpec, next_size(&previous, TableKind::TypeSpec, indices.type_specs.rows().len()));
    previous.table_sizes.insert(TableKind::MemberRef, next_size(&previous, TableKind::MemberRef, indices.member_refs.rows().len()));
    previous.table_sizes.insert(TableKind::MethodSpec, next_size(&previous, TableKind::MethodSpec, indices.method_specs.rows().len()));

    let (blob, string, user_string, guid) = heap_lengths;
    previous.blob_heap_len += blob;
    previous.string_heap_len += string;
    previous.user_string_heap_len += user_string;
    previous.guid_heap_len += guid;

    previous.enc_base_id = previous.enc_id;
    previous.enc_id = new_enc_id;
    previous.ordinal += 1;
    previous
}

fn next_size(baseline: &EmitBaseline, table: TableKind, added: usize) -> u32 {
    baseline.next_row_id(table) + added as u32
}
