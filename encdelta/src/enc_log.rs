//! `EncLog`/`EncMap` construction.
//!
//! `EncLog` is the ordered edit stream the runtime replays to patch its
//! in-memory tables; `EncMap` is the same tokens sorted ascending, which is
//! what the runtime actually binary-searches when resolving a token against
//! this generation. Both are built in one pass over a finished
//! [`DeltaIndices`], grouped by table kind in the fixed order a runtime
//! expects to replay them in: reference tables first (`AssemblyRef`,
//! `ModuleRef`, `MemberRef`, `MethodSpec`, `TypeRef`, `TypeSpec`), then
//! `StandAloneSig`, then `TypeDef`, then `EventMap`/`PropertyMap`, then the
//! four member tables (`Field`, `Event`, `Property`, `Method`), then `Param`,
//! then the tail tables (`GenericParam`, `MethodImpl`). This pass never runs
//! interleaved with the change driver's walk — it only reads what the driver
//! already finished recording.

use std::collections::HashSet;

use crate::driver::DeltaIndices;
use crate::errors::{DeltaError, Result};
use crate::token::{MetadataToken, MetadataTokenKind};

/// The operation an `EncLog` row records against its token's row.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EncFuncCode {
    /// An existing row's content changed, or the row is part of the tail /
    /// content-addressed tables that are always `Default`; no structural
    /// change to the table this row's own token belongs to.
    Default = 0,
    AddMethod = 1,
    AddField = 2,
    AddParameter = 3,
    AddProperty = 4,
    AddEvent = 5,
    AddClass = 6,
    AddPropertyMap = 7,
    AddEventMap = 8,
    AddMethodImpl = 9,
    AddGenericParam = 10,
    AddGenericParamConstraint = 11,
    AddInterfaceImpl = 12,
}

impl EncFuncCode {
    /// The `AddX` code recorded against the *owner* of a newly added row of
    /// table `child_kind`.
    fn for_added_child(child_kind: MetadataTokenKind) -> Self {
        match child_kind {
            MetadataTokenKind::MethodDef => EncFuncCode::AddMethod,
            MetadataTokenKind::Field => EncFuncCode::AddField,
            MetadataTokenKind::Param => EncFuncCode::AddParameter,
            MetadataTokenKind::Property => EncFuncCode::AddProperty,
            MetadataTokenKind::Event => EncFuncCode::AddEvent,
            MetadataTokenKind::TypeDef => EncFuncCode::AddClass,
            MetadataTokenKind::PropertyMap => EncFuncCode::AddPropertyMap,
            MetadataTokenKind::EventMap => EncFuncCode::AddEventMap,
            other => panic!("table {other:?} is never added via an owner-paired EncLog entry"),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EncLogRow {
    pub token: MetadataToken,
    pub func_code: EncFuncCode,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EncMapRow {
    pub token: MetadataToken,
}

/// Appends a plain `Default` row — used for tables whose new rows never pair
/// with an owner: the content-addressed reference tables, `StandAloneSig`,
/// and the tail tables `GenericParam`/`MethodImpl`.
fn push_new_row(log: &mut Vec<EncLogRow>, row_tokens: &mut Vec<MetadataToken>, token: MetadataToken) {
    log.push(EncLogRow { token, func_code: EncFuncCode::Default });
    row_tokens.push(token);
}

/// Appends the `(owner, AddX)` + `(child, Default)` pair a newly added row
/// produces.
fn push_added_pair(log: &mut Vec<EncLogRow>, row_tokens: &mut Vec<MetadataToken>, owner: MetadataToken, child: MetadataToken) {
    log.push(EncLogRow { token: owner, func_code: EncFuncCode::for_added_child(child.kind()) });
    log.push(EncLogRow { token: child, func_code: EncFuncCode::Default });
    row_tokens.push(child);
}

/// Builds the `EncLog`/`EncMap` pair for a finished delta.
///
/// Fails with [`DeltaError::InvariantViolation`] if two distinct rows this
/// generation touches resolve to the same token — that can only mean two
/// different definitions computed the same row id, which is a bug upstream
/// of this pass, not something to paper over by silently collapsing it.
pub fn build(indices: &DeltaIndices) -> Result<(Vec<EncLogRow>, Vec<EncMapRow>)> {
    let mut log = Vec::new();
    let mut row_tokens = Vec::new();

    for &(_, token) in indices.assembly_refs.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for &(_, token) in indices.module_refs.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for &(_, token) in indices.member_refs.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for &(_, token) in indices.method_specs.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for &(_, token) in indices.type_refs.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for &(_, token) in indices.type_specs.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for &(_, token) in indices.local_signatures.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }

    for (owner, token) in indices.types.added_rows_with_owner() {
        push_added_pair(&mut log, &mut row_tokens, owner, token.into());
    }
    for (_, token) in indices.types.updated_rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }

    for (owner, token) in indices.event_maps.added_rows() {
        push_added_pair(&mut log, &mut row_tokens, owner.into(), token.into());
    }
    for (owner, token) in indices.property_maps.added_rows() {
        push_added_pair(&mut log, &mut row_tokens, owner.into(), token.into());
    }

    for (owner, token) in indices.fields.added_rows_with_owner() {
        push_added_pair(&mut log, &mut row_tokens, owner, token.into());
    }
    for (_, token) in indices.fields.updated_rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for (owner, token) in indices.events.added_rows_with_owner() {
        push_added_pair(&mut log, &mut row_tokens, owner, token.into());
    }
    for (_, token) in indices.events.updated_rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for (owner, token) in indices.properties.added_rows_with_owner() {
        push_added_pair(&mut log, &mut row_tokens, owner, token.into());
    }
    for (_, token) in indices.properties.updated_rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for (owner, token) in indices.methods.added_rows_with_owner() {
        push_added_pair(&mut log, &mut row_tokens, owner, token.into());
    }
    for (_, token) in indices.methods.updated_rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }

    for &(owner, token) in indices.params.rows() {
        push_added_pair(&mut log, &mut row_tokens, owner, token.into());
    }

    for &token in indices.generic_params.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }
    for &(_, _, token) in indices.method_impls.rows() {
        push_new_row(&mut log, &mut row_tokens, token.into());
    }

    let mut seen = HashSet::with_capacity(row_tokens.len());
    for token in &row_tokens {
        if !seen.insert(*token) {
            return Err(DeltaError::invariant(format!("two definitions both resolved to row {token:?}")));
        }
    }

    let mut map_tokens: Vec<MetadataToken> = log.iter().map(|row| row.token).collect();
    map_tokens.sort_by_key(|token| token.raw());
    map_tokens.dedup();
    let enc_map = map_tokens.into_iter().map(|token| EncMapRow { token }).collect();

    Ok((log, enc_map))
}
