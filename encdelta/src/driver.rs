//! The change driver.
//!
//! Walks the types the oracle says changed, in oracle-reported order, and
//! decides for each definition whether it needs a fresh row, a content
//! update to an existing row, or nothing at all. This is the one module that
//! talks to every capability at once; everything downstream (`EncLog`,
//! locals, the merged baseline) is assembled from what it records. `EncLog`
//! construction itself happens afterwards, in [`crate::enc_log::build`], as
//! its own pass over the finished [`DeltaIndices`] — this module never
//! touches an `EncLog` row directly.

use bumpalo::Bump;

use crate::base_writer::BaseMetadataWriter;
use crate::baseline::{EmitBaseline, MethodDebugId, MethodDebugInfo};
use crate::cancellation::CancellationToken;
use crate::change::{ChangeKind, SymbolChanges};
use crate::coded_index::{MemberRefParent, MethodDefOrRef, ResolutionScope};
use crate::definition_map::DefinitionMap;
use crate::errors::{DeltaError, Result};
use crate::ids::{EventDefId, FieldDefId, MethodDefId, PropertyDefId, TypeDefId};
use crate::index::{DefinitionIndex, EventPropertyMapIndex, MethodImplIndex, OwnedSequentialRowIndex, ReferenceIndex, SequentialRowIndex};
use crate::locals::serialize_local_signature;
use crate::module_builder::{ExternalReference, ModuleBuilder};
use crate::token::{
    AssemblyRefToken, EventMapToken, EventToken, FieldToken, GenericParamToken, MemberRefToken, MethodDefToken, MethodSpecToken, ModuleRefToken,
    ModuleToken, ParamToken, PropertyMapToken, PropertyToken, StandAloneSigToken, TableKind, TypeDefToken, TypeRefToken, TypeSpecToken,
};

/// Every row-allocating index a delta emit touches, seeded from the previous
/// generation's table sizes.
pub struct DeltaIndices {
    pub types: DefinitionIndex<TypeDefId, TypeDefToken>,
    pub methods: DefinitionIndex<MethodDefId, MethodDefToken>,
    pub fields: DefinitionIndex<FieldDefId, FieldToken>,
    pub events: DefinitionIndex<EventDefId, EventToken>,
    pub properties: DefinitionIndex<PropertyDefId, PropertyToken>,
    pub params: OwnedSequentialRowIndex<ParamToken>,
    pub generic_params: SequentialRowIndex<GenericParamToken>,
    pub event_maps: EventPropertyMapIndex<EventMapToken>,
    pub property_maps: EventPropertyMapIndex<PropertyMapToken>,
    pub method_impls: MethodImplIndex,
    pub local_signatures: ReferenceIndex<Vec<u8>, StandAloneSigToken>,
    pub assembly_refs: ReferenceIndex<String, AssemblyRefToken>,
    pub module_refs: ReferenceIndex<String, ModuleRefToken>,
    pub type_refs: ReferenceIndex<(ResolutionScope, String, String), TypeRefToken>,
    pub type_specs: ReferenceIndex<Vec<u8>, TypeSpecToken>,
    pub member_refs: ReferenceIndex<(MemberRefParent, String, Vec<u8>), MemberRefToken>,
    pub method_specs: ReferenceIndex<(MethodDefOrRef, Vec<u8>), MethodSpecToken>,
}

impl DeltaIndices {
    pub fn new(baseline: &EmitBaseline) -> Self {
        Self {
            types: DefinitionIndex::new(baseline.next_row_id(TableKind::TypeDef)),
            methods: DefinitionIndex::new(baseline.next_row_id(TableKind::MethodDef)),
            fields: DefinitionIndex::new(baseline.next_row_id(TableKind::Field)),
            events: DefinitionIndex::new(baseline.next_row_id(TableKind::Event)),
            properties: DefinitionIndex::new(baseline.next_row_id(TableKind::Property)),
            params: OwnedSequentialRowIndex::new(baseline.next_row_id(TableKind::Param)),
            generic_params: SequentialRowIndex::new(baseline.next_row_id(TableKind::GenericParam)),
            event_maps: EventPropertyMapIndex::new(baseline.next_row_id(TableKind::EventMap), baseline.type_to_event_map.clone()),
            property_maps: EventPropertyMapIndex::new(baseline.next_row_id(TableKind::PropertyMap), baseline.type_to_property_map.clone()),
            method_impls: MethodImplIndex::new(baseline.next_row_id(TableKind::MethodImpl), &baseline.method_impls),
            local_signatures: ReferenceIndex::new(baseline.next_row_id(TableKind::StandAloneSig)),
            assembly_refs: ReferenceIndex::new(baseline.next_row_id(TableKind::AssemblyRef)),
            module_refs: ReferenceIndex::new(baseline.next_row_id(TableKind::ModuleRef)),
            type_refs: ReferenceIndex::new(baseline.next_row_id(TableKind::TypeRef)),
            type_specs: ReferenceIndex::new(baseline.next_row_id(TableKind::TypeSpec)),
            member_refs: ReferenceIndex::new(baseline.next_row_id(TableKind::MemberRef)),
            method_specs: ReferenceIndex::new(baseline.next_row_id(TableKind::MethodSpec)),
        }
    }
}

/// Walks the oracle's changed-type set and populates a [`DeltaIndices`].
pub struct ChangeDriver<'a, C, D, M, W> {
    pub changes: &'a C,
    pub definitions: &'a D,
    pub module: &'a M,
    pub writer: &'a mut W,
    pub baseline: &'a EmitBaseline,
    pub indices: DeltaIndices,
    pub method_debug_info: Vec<(MethodDefToken, MethodDebugInfo)>,
    /// `(owning type, method)` pairs that got a row or a body this
    /// generation, for the reference visitor to sweep afterwards.
    pub touched_methods: Vec<(TypeDefId, MethodDefId)>,
    arena: Bump,
}

impl<'a, C, D, M, W> ChangeDriver<'a, C, D, M, W>
where
    C: SymbolChanges,
    D: DefinitionMap,
    M: ModuleBuilder,
    W: BaseMetadataWriter,
{
    pub fn new(changes: &'a C, definitions: &'a D, module: &'a M, writer: &'a mut W, baseline: &'a EmitBaseline) -> Self {
        Self {
            indices: DeltaIndices::new(baseline),
            method_debug_info: Vec::new(),
            touched_methods: Vec::new(),
            changes,
            definitions,
            module,
            writer,
            baseline,
            arena: Bump::new(),
        }
    }

    /// Walks every changed top-level type. When `cooperative_cancellation`
    /// is set, checks `cancellation` between types rather than only once up
    /// front — a type's member walk itself is never interrupted mid-way.
    pub fn run(&mut self, cancellation: &CancellationToken, cooperative_cancellation: bool) -> Result<()> {
        let module_owner: crate::token::MetadataToken = ModuleToken::new(1).into();
        for ty in self.changes.changed_top_level_types() {
            if cooperative_cancellation {
                cancellation.check()?;
            }
            let kind = self.changes.type_change(ty);
            self.visit_type(ty, kind, module_owner)?;
        }
        Ok(())
    }

    /// Resolves `ty`'s row: this delta's own additions, this delta's
    /// updates, the baseline's prior-generation additions, or (memoized) the
    /// definition map.
    fn resolve_type_token(&mut self, ty: TypeDefId) -> Result<TypeDefToken> {
        let definitions = self.definitions;
        let baseline_added = &self.baseline.added_types;
        self.indices
            .types
            .try_get(ty, baseline_added, |def| definitions.try_get_type(def))
            .ok_or_else(|| DeltaError::invariant("type has no prior row in this delta, the baseline, or the definition map"))
    }

    fn resolve_method_token(&mut self, method: MethodDefId) -> Result<MethodDefToken> {
        let definitions = self.definitions;
        let baseline_added = &self.baseline.added_methods;
        self.indices
            .methods
            .try_get(method, baseline_added, |def| definitions.try_get_method(def))
            .ok_or_else(|| DeltaError::invariant("method has no prior row in this delta, the baseline, or the definition map"))
    }

    fn visit_type(&mut self, ty: TypeDefId, kind: ChangeKind, owner: crate::token::MetadataToken) -> Result<()> {
        match kind {
            ChangeKind::None => Ok(()),
            ChangeKind::Added => {
                let token = self.indices.types.add(ty, owner);
                self.emit_generic_parameters_for_type(ty);
                self.visit_all_members(ty, token, true)
            }
            ChangeKind::Updated => {
                let token = self.resolve_type_token(ty)?;
                self.indices.types.add_updated(ty, token);
                self.visit_all_members(ty, token, false)
            }
            ChangeKind::ContainsChanges => {
                let token = self.resolve_type_token(ty)?;
                self.visit_all_members(ty, token, false)
            }
        }
    }

    /// `force`: when the owning type is brand-new, every member is emitted
    /// regardless of what the oracle reports for it individually.
    fn visit_all_members(&mut self, ty: TypeDefId, ty_token: TypeDefToken, force: bool) -> Result<()> {
        for field in self.module.fields(ty) {
            let kind = if force { ChangeKind::Added } else { self.changes.field_change(field) };
            self.visit_field(ty_token, field, kind)?;
        }
        for event in self.module.events(ty) {
            let kind = if force { ChangeKind::Added } else { self.changes.event_change(event) };
            self.visit_event(ty_token, event, kind)?;
        }
        for property in self.module.properties(ty) {
            let kind = if force { ChangeKind::Added } else { self.changes.property_change(property) };
            self.visit_property(ty_token, property, kind)?;
        }
        for method in self.module.methods(ty) {
            let kind = if force { ChangeKind::Added } else { self.changes.method_change(method) };
            self.visit_method(ty, ty_token, method, kind)?;
        }
        self.emit_explicit_overrides(ty);

        for nested in self.module.nested_types(ty) {
            let kind = if force { ChangeKind::Added } else { self.changes.type_change(nested) };
            self.visit_type(nested, kind, ty_token.into())?;
        }
        Ok(())
    }

    fn visit_field(&mut self, ty_token: TypeDefToken, field: FieldDefId, kind: ChangeKind) -> Result<()> {
        match kind {
            ChangeKind::Added => {
                self.indices.fields.add(field, ty_token.into());
                Ok(())
            }
            ChangeKind::Updated => {
                let definitions = self.definitions;
                let token = self
                    .indices
                    .fields
                    .try_get(field, &Default::default(), |def| definitions.try_get_field(def))
                    .ok_or_else(|| DeltaError::invariant("updated field has no prior row"))?;
                self.indices.fields.add_updated(field, token);
                Ok(())
            }
            ChangeKind::ContainsChanges | ChangeKind::None => Ok(()),
        }
    }

    fn visit_event(&mut self, ty_token: TypeDefToken, event: EventDefId, kind: ChangeKind) -> Result<()> {
        match kind {
            ChangeKind::Added => {
                let map_token = self.indices.event_maps.get_or_create(ty_token);
                self.indices.events.add(event, map_token.into());
                Ok(())
            }
            ChangeKind::Updated => {
                let definitions = self.definitions;
                let token = self
                    .indices
                    .events
                    .try_get(event, &Default::default(), |def| definitions.try_get_event(def))
                    .ok_or_else(|| DeltaError::invariant("updated event has no prior row"))?;
                self.indices.events.add_updated(event, token);
                Ok(())
            }
            ChangeKind::ContainsChanges | ChangeKind::None => Ok(()),
        }
    }

    fn visit_property(&mut self, ty_token: TypeDefToken, property: PropertyDefId, kind: ChangeKind) -> Result<()> {
        match kind {
            ChangeKind::Added => {
                let map_token = self.indices.property_maps.get_or_create(ty_token);
                self.indices.properties.add(property, map_token.into());
                Ok(())
            }
            ChangeKind::Updated => {
                let definitions = self.definitions;
                let token = self
                    .indices
                    .properties
                    .try_get(property, &Default::default(), |def| definitions.try_get_property(def))
                    .ok_or_else(|| DeltaError::invariant("updated property has no prior row"))?;
                self.indices.properties.add_updated(property, token);
                Ok(())
            }
            ChangeKind::ContainsChanges | ChangeKind::None => Ok(()),
        }
    }

    fn visit_method(&mut self, ty: TypeDefId, ty_token: TypeDefToken, method: MethodDefId, kind: ChangeKind) -> Result<()> {
        let token = match kind {
            ChangeKind::Added => {
                let token = self.indices.methods.add(method, ty_token.into());
                self.emit_generic_parameters_for_method(method);
                token
            }
            ChangeKind::Updated => {
                let token = self.resolve_method_token(method)?;
                self.indices.methods.add_updated(method, token);
                token
            }
            ChangeKind::ContainsChanges | ChangeKind::None => return Ok(()),
        };

        self.emit_parameters_for_method(method, token);
        self.emit_method_body(method, token);
        self.emit_external_references(method);
        self.touched_methods.push((ty, method));
        Ok(())
    }

    fn emit_parameters_for_method(&mut self, method: MethodDefId, method_token: MethodDefToken) {
        for _ in self.module.method_parameters(method) {
            self.indices.params.add(method_token.into());
        }
    }

    fn emit_generic_parameters_for_type(&mut self, ty: TypeDefId) {
        for _ in self.module.generic_parameters(ty) {
            self.indices.generic_params.add();
        }
    }

    fn emit_generic_parameters_for_method(&mut self, method: MethodDefId) {
        for _ in self.module.method_generic_parameters(method) {
            self.indices.generic_params.add();
        }
    }

    fn emit_explicit_overrides(&mut self, ty: TypeDefId) {
        for over in self.module.explicit_overrides(ty) {
            let touched = self.changes.is_method_added(over.implementing_method)
                || self.indices.methods.try_get_updated(over.implementing_method).is_some();
            if !touched {
                continue;
            }
            let Some(method_token) = self
                .indices
                .methods
                .try_get_added(over.implementing_method)
                .or_else(|| self.indices.methods.try_get_updated(over.implementing_method))
            else {
                continue;
            };
            self.indices.method_impls.add(method_token);
        }
    }

    fn emit_method_body(&mut self, method: MethodDefId, token: MethodDefToken) {
        let Some(body) = self.module.method_body(method) else {
            return;
        };
        let (bytes, local_debug_info) = serialize_local_signature(&body.locals, self.writer, &self.arena);
        if !body.locals.is_empty() {
            self.writer.intern_blob(&bytes);
            self.indices.local_signatures.get_or_add(bytes);
        }

        let local_slots = local_debug_info
            .into_iter()
            .filter_map(|info| match info {
                crate::locals::EncLocalInfo::LongLived(slot) => Some(slot),
                crate::locals::EncLocalInfo::Temporary => None,
            })
            .collect();

        let state_machine = self.module.state_machine_info(method);
        self.method_debug_info.push((
            token,
            MethodDebugInfo {
                debug_id: MethodDebugId { ordinal: self.module.method_ordinal(method), generation: self.baseline.ordinal + 1 },
                local_slots,
                lambda_debug_info: self.module.lambda_debug_info(method),
                closure_debug_info: self.module.closure_debug_info(method),
                state_machine_type_name: state_machine.as_ref().map(|info| info.state_machine_type_name.clone()),
                state_machine_hoisted_local_slots: state_machine.map(|info| info.hoisted_local_slots).unwrap_or_default(),
                state_machine_awaiter_slots: Vec::new(),
            },
        ));
    }

    fn emit_external_references(&mut self, method: MethodDefId) {
        for reference in self.module.method_external_references(method) {
            match reference {
                ExternalReference::AssemblyRef(name) => {
                    self.indices.assembly_refs.get_or_add(name);
                }
                ExternalReference::ModuleRef(name) => {
                    self.indices.module_refs.get_or_add(name);
                }
                ExternalReference::TypeRef { scope, namespace, name } => {
                    self.indices.type_refs.get_or_add((scope, namespace, name));
                }
                ExternalReference::TypeSpec(signature) => {
                    self.indices.type_specs.get_or_add(signature);
                }
                ExternalReference::MemberRef { parent, name, signature } => {
                    self.indices.member_refs.get_or_add((parent, name, signature));
                }
                ExternalReference::MethodSpec { method, instantiation } => {
                    self.indices.method_specs.get_or_add((method, instantiation));
                }
            }
        }
    }
}
