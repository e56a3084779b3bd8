//! The module builder capability.
//!
//! Owns the lowered, post-binding view of the edited module: which members a
//! type has, what a method's parameter and generic-parameter lists look like,
//! and — for a method with a body — the lowered IL and locals. This crate
//! never lowers anything itself; it only walks what the builder already
//! produced and decides what needs a row.

use crate::coded_index::{MemberRefParent, MethodDefOrRef, ResolutionScope};
use crate::ids::{EventDefId, FieldDefId, GenericParamDefId, MethodDefId, ParamDefId, PropertyDefId, TypeDefId};
use crate::token::MetadataToken;

/// A reference from one method body to another definition in the same
/// module, as opposed to a reference that resolves outside it (the BCL, a
/// referenced assembly) which the "reference to an added member" check has
/// no opinion about.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DefinitionReference {
    Method(MethodDefId),
    Field(FieldDefId),
    Property(PropertyDefId),
    Type(TypeDefId),
}

/// A reference from a method body to something this module does not itself
/// define: another assembly, an external module, or a member/type/generic
/// instantiation that resolves outside this delta. Content-addressed: two
/// references with equal content resolve to the same row.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ExternalReference {
    AssemblyRef(String),
    ModuleRef(String),
    TypeRef { scope: ResolutionScope, namespace: String, name: String },
    TypeSpec(Vec<u8>),
    MemberRef { parent: MemberRefParent, name: String, signature: Vec<u8> },
    MethodSpec { method: MethodDefOrRef, instantiation: Vec<u8> },
}

/// An explicit interface/virtual override declared on a type, independent of
/// the slot the overriding method already occupies via `MethodSemantics`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ExplicitOverride {
    pub implementing_method: MethodDefId,
    pub declaration: MetadataToken,
}

/// One entry in a method's parameter list, including the synthetic "return
/// parameter" slot some builders expose uniformly at index 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MethodParameter {
    pub id: ParamDefId,
    pub is_return_parameter: bool,
    pub has_custom_attributes: bool,
}

/// An opaque handle to a type as the module builder represents it — a
/// `TypeDef`, a generic instantiation, an array, a primitive, anything a
/// local or parameter can be typed with. Only `BaseMetadataWriter` knows how
/// to turn one into signature bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TypeHandle(pub u32);

/// A local slot's identity, used to carry a local's debugger-visible role
/// forward from one generation's body to the next.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LocalSlotInfo {
    pub kind: crate::synth_local::SynthesizedLocalKind,
    pub ordinal: u32,
    pub syntax_offset: i32,
}

bitflags::bitflags! {
    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    pub struct LocalAttributes: u16 {
        const PINNED = 0x1;
    }
}

/// A single declared local in a method body, as the builder emits it.
#[derive(Debug, Clone)]
pub struct LocalDecl {
    pub ty: TypeHandle,
    pub attributes: LocalAttributes,
    pub custom_modifiers: Vec<TypeHandle>,
    /// Present for long-lived synthesized locals and user locals the
    /// debugger needs to re-bind across generations; absent for lowering
    /// temporaries.
    pub slot: Option<LocalSlotInfo>,
    /// Carried over verbatim from a previous generation's signature blob
    /// when this local's shape did not change; `None` asks the caller to
    /// serialize `ty` and `custom_modifiers` fresh.
    pub cached_signature: Option<Vec<u8>>,
}

/// A lowered method body ready for local-signature and EnC-map emission.
#[derive(Debug, Clone, Default)]
pub struct MethodBody {
    pub locals: Vec<LocalDecl>,
}

/// Lambda/local-function debug info correlating a closure to its containing
/// method across generations.
#[derive(Debug, Clone)]
pub struct LambdaDebugInfo {
    pub syntax_offset: i32,
    pub closure_ordinal: i32,
}

/// Display-class debug info for a closure captured by one or more lambdas.
#[derive(Debug, Clone)]
pub struct ClosureDebugInfo {
    pub syntax_offset: i32,
    pub captured_variables: Vec<String>,
}

/// State-machine (iterator/async) rewrite info for a method that was lowered
/// into a separate state machine type.
#[derive(Debug, Clone)]
pub struct StateMachineInfo {
    pub state_machine_type_name: String,
    pub hoisted_local_slots: Vec<LocalSlotInfo>,
    pub awaiter_slots: Vec<TypeHandle>,
}

/// The lowered, post-binding view of the module being edited.
///
/// One instance serves a single delta; all queries are relative to the
/// generation currently being emitted.
pub trait ModuleBuilder {
    fn events(&self, ty: TypeDefId) -> Vec<EventDefId>;
    fn fields(&self, ty: TypeDefId) -> Vec<FieldDefId>;
    fn methods(&self, ty: TypeDefId) -> Vec<MethodDefId>;
    fn properties(&self, ty: TypeDefId) -> Vec<PropertyDefId>;

    /// Types nested directly inside `ty`. `ChangeKind::ContainsChanges` on a
    /// nested type is only meaningful because the driver recurses here: a
    /// closure or state-machine type nested inside an edited method's
    /// declaring type is exactly the common case this walks.
    fn nested_types(&self, ty: TypeDefId) -> Vec<TypeDefId>;

    /// Explicit overrides declared directly on `ty`, in declaration order.
    fn explicit_overrides(&self, ty: TypeDefId) -> Vec<ExplicitOverride>;

    /// `ty`'s full generic parameter list, outer (containing type's) params
    /// first, then `ty`'s own, in the order they must be emitted.
    fn generic_parameters(&self, ty: TypeDefId) -> Vec<GenericParamDefId>;
    fn method_generic_parameters(&self, method: MethodDefId) -> Vec<GenericParamDefId>;
    fn method_parameters(&self, method: MethodDefId) -> Vec<MethodParameter>;

    /// Stable per-method ordinal used to build `MethodDebugId`; the same
    /// method keeps the same ordinal across every generation its body is
    /// re-emitted in.
    fn method_ordinal(&self, method: MethodDefId) -> u32;

    /// `None` for methods with no body (abstract, extern, a property/event
    /// accessor the builder does not materialize a body for).
    fn method_body(&self, method: MethodDefId) -> Option<MethodBody>;

    /// True for compiler-synthesized members (backing fields, default
    /// constructors) that never carry user-authored custom attributes.
    fn is_implicit(&self, method: MethodDefId) -> bool;

    fn lambda_debug_info(&self, method: MethodDefId) -> Vec<LambdaDebugInfo>;
    fn closure_debug_info(&self, method: MethodDefId) -> Vec<ClosureDebugInfo>;
    fn state_machine_info(&self, method: MethodDefId) -> Option<StateMachineInfo>;

    /// In-module definitions `method`'s lowered body refers to. Excludes
    /// anything that resolves outside this module, which no generation of
    /// this crate can have added.
    fn method_references(&self, method: MethodDefId) -> Vec<DefinitionReference>;

    /// References `method`'s lowered body makes to something outside this
    /// module — the complement of `method_references`. Each distinct
    /// reference gets its own `AssemblyRef`/`ModuleRef`/`TypeRef`/`TypeSpec`/
    /// `MemberRef`/`MethodSpec` row, content-addressed so the same reference
    /// used twice only ever allocates one row.
    fn method_external_references(&self, method: MethodDefId) -> Vec<ExternalReference>;
}
