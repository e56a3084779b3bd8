//! Fakes shared by the integration tests.

use std::collections::HashMap;

use encdelta::base_writer::{BaseMetadataWriter, HeapIndex};
use encdelta::change::{ChangeKind, SymbolChanges};
use encdelta::definition_map::DefinitionMap;
use encdelta::ids::{EventDefId, FieldDefId, GenericParamDefId, MethodDefId, ParamDefId, PropertyDefId, TypeDefId};
use encdelta::module_builder::{
    ClosureDebugInfo, DefinitionReference, ExplicitOverride, ExternalReference, LambdaDebugInfo, MethodBody, MethodParameter, ModuleBuilder,
    StateMachineInfo, TypeHandle,
};
use encdelta::token::{EventToken, FieldToken, MethodDefToken, PropertyToken, TableKind, TypeDefToken};

#[derive(Default)]
pub struct FakeChanges {
    pub types: HashMap<TypeDefId, ChangeKind>,
    pub methods: HashMap<MethodDefId, ChangeKind>,
    pub fields: HashMap<FieldDefId, ChangeKind>,
    pub events: HashMap<EventDefId, ChangeKind>,
    pub properties: HashMap<PropertyDefId, ChangeKind>,
    pub changed_top_level_types: Vec<TypeDefId>,
}

impl SymbolChanges for FakeChanges {
    fn type_change(&self, ty: TypeDefId) -> ChangeKind {
        self.types.get(&ty).copied().unwrap_or(ChangeKind::None)
    }
    fn method_change(&self, method: MethodDefId) -> ChangeKind {
        self.methods.get(&method).copied().unwrap_or(ChangeKind::None)
    }
    fn field_change(&self, field: FieldDefId) -> ChangeKind {
        self.fields.get(&field).copied().unwrap_or(ChangeKind::None)
    }
    fn event_change(&self, event: EventDefId) -> ChangeKind {
        self.events.get(&event).copied().unwrap_or(ChangeKind::None)
    }
    fn property_change(&self, property: PropertyDefId) -> ChangeKind {
        self.properties.get(&property).copied().unwrap_or(ChangeKind::None)
    }
    fn changed_top_level_types(&self) -> Vec<TypeDefId> {
        self.changed_top_level_types.clone()
    }
}

#[derive(Default)]
pub struct FakeDefinitionMap {
    pub types: HashMap<TypeDefId, TypeDefToken>,
    pub methods: HashMap<MethodDefId, MethodDefToken>,
    pub fields: HashMap<FieldDefId, FieldToken>,
    pub events: HashMap<EventDefId, EventToken>,
    pub properties: HashMap<PropertyDefId, PropertyToken>,
}

impl DefinitionMap for FakeDefinitionMap {
    fn try_get_type(&self, def: TypeDefId) -> Option<TypeDefToken> {
        self.types.get(&def).copied()
    }
    fn try_get_method(&self, def: MethodDefId) -> Option<MethodDefToken> {
        self.methods.get(&def).copied()
    }
    fn try_get_field(&self, def: FieldDefId) -> Option<FieldToken> {
        self.fields.get(&def).copied()
    }
    fn try_get_event(&self, def: EventDefId) -> Option<EventToken> {
        self.events.get(&def).copied()
    }
    fn try_get_property(&self, def: PropertyDefId) -> Option<PropertyToken> {
        self.properties.get(&def).copied()
    }
}

#[derive(Default)]
pub struct FakeModuleBuilder {
    pub events: HashMap<TypeDefId, Vec<EventDefId>>,
    pub fields: HashMap<TypeDefId, Vec<FieldDefId>>,
    pub methods: HashMap<TypeDefId, Vec<MethodDefId>>,
    pub properties: HashMap<TypeDefId, Vec<PropertyDefId>>,
    pub explicit_overrides: HashMap<TypeDefId, Vec<ExplicitOverride>>,
    pub generic_parameters: HashMap<TypeDefId, Vec<GenericParamDefId>>,
    pub method_generic_parameters: HashMap<MethodDefId, Vec<GenericParamDefId>>,
    pub method_parameters: HashMap<MethodDefId, Vec<MethodParameter>>,
    pub method_ordinals: HashMap<MethodDefId, u32>,
    pub method_bodies: HashMap<MethodDefId, MethodBody>,
    pub method_references: HashMap<MethodDefId, Vec<DefinitionReference>>,
    pub nested_types: HashMap<TypeDefId, Vec<TypeDefId>>,
    pub method_external_references: HashMap<MethodDefId, Vec<ExternalReference>>,
}

impl ModuleBuilder for FakeModuleBuilder {
    fn events(&self, ty: TypeDefId) -> Vec<EventDefId> {
        self.events.get(&ty).cloned().unwrap_or_default()
    }
    fn fields(&self, ty: TypeDefId) -> Vec<FieldDefId> {
        self.fields.get(&ty).cloned().unwrap_or_default()
    }
    fn methods(&self, ty: TypeDefId) -> Vec<MethodDefId> {
        self.methods.get(&ty).cloned().unwrap_or_default()
    }
    fn properties(&self, ty: TypeDefId) -> Vec<PropertyDefId> {
        self.properties.get(&ty).cloned().unwrap_or_default()
    }
    fn explicit_overrides(&self, ty: TypeDefId) -> Vec<ExplicitOverride> {
        self.explicit_overrides.get(&ty).cloned().unwrap_or_default()
    }
    fn generic_parameters(&self, ty: TypeDefId) -> Vec<GenericParamDefId> {
        self.generic_parameters.get(&ty).cloned().unwrap_or_default()
    }
    fn method_generic_parameters(&self, method: MethodDefId) -> Vec<GenericParamDefId> {
        self.method_generic_parameters.get(&method).cloned().unwrap_or_default()
    }
    fn method_parameters(&self, method: MethodDefId) -> Vec<MethodParameter> {
        self.method_parameters.get(&method).cloned().unwrap_or_default()
    }
    fn method_ordinal(&self, method: MethodDefId) -> u32 {
        self.method_ordinals.get(&method).copied().unwrap_or(method.0)
    }
    fn method_body(&self, method: MethodDefId) -> Option<MethodBody> {
        self.method_bodies.get(&method).cloned()
    }
    fn is_implicit(&self, _method: MethodDefId) -> bool {
        false
    }
    fn lambda_debug_info(&self, _method: MethodDefId) -> Vec<LambdaDebugInfo> {
        vec![]
    }
    fn closure_debug_info(&self, _method: MethodDefId) -> Vec<ClosureDebugInfo> {
        vec![]
    }
    fn state_machine_info(&self, _method: MethodDefId) -> Option<StateMachineInfo> {
        None
    }
    fn method_references(&self, method: MethodDefId) -> Vec<DefinitionReference> {
        self.method_references.get(&method).cloned().unwrap_or_default()
    }
    fn nested_types(&self, ty: TypeDefId) -> Vec<TypeDefId> {
        self.nested_types.get(&ty).cloned().unwrap_or_default()
    }
    fn method_external_references(&self, method: MethodDefId) -> Vec<ExternalReference> {
        self.method_external_references.get(&method).cloned().unwrap_or_default()
    }
}

/// A base writer that hands out ever-increasing heap indices and tracks how
/// many bytes each heap grew by, without needing real row byte formats.
#[derive(Default)]
pub struct FakeBaseWriter {
    next_blob: u32,
    blob_bytes: u32,
}

impl BaseMetadataWriter for FakeBaseWriter {
    fn intern_blob(&mut self, bytes: &[u8]) -> HeapIndex {
        let index = HeapIndex(self.next_blob);
        self.next_blob += 1;
        self.blob_bytes += bytes.len() as u32;
        index
    }
    fn intern_string(&mut self, _value: &str) -> HeapIndex {
        HeapIndex(0)
    }
    fn intern_user_string(&mut self, _value: &str) -> HeapIndex {
        HeapIndex(0)
    }
    fn intern_guid(&mut self, _value: uuid::Uuid) -> HeapIndex {
        HeapIndex(0)
    }
    fn serialize_type_signature(&mut self, ty: TypeHandle, out: &mut Vec<u8>) {
        out.push(ty.0 as u8);
    }
    fn next_table_size(&self, _table: TableKind) -> u32 {
        1
    }
    fn blob_heap_len(&self) -> u32 {
        self.blob_bytes
    }
    fn string_heap_len(&self) -> u32 {
        0
    }
    fn user_string_heap_len(&self) -> u32 {
        0
    }
    fn guid_heap_len(&self) -> u32 {
        0
    }
}

#[allow(dead_code)]
pub fn param(id: u32) -> ParamDefId {
    ParamDefId::new(id)
}
