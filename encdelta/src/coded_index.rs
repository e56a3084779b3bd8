//! Coded indices used to content-address reference rows.
//!
//! A full metadata writer packs these into compressed wire integers because
//! it has to read/write the bytes of a `#~` stream directly. This crate never
//! touches that byte encoding — row bytes are produced by the
//! `BaseMetadataWriter` collaborator from the definitions these enums
//! describe — so a plain tagged union is the right shape here: it is exactly
//! as content-addressable (`Eq + Hash`) and carries no packing concerns.

use crate::token::{MetadataToken, MethodDefToken, ModuleRefToken, ModuleToken, TypeDefToken, TypeRefToken, TypeSpecToken};

/// The owner of a `MemberRef` row (ECMA-335 §II.24.2.6 `MemberRefParent`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MemberRefParent {
    TypeDef(TypeDefToken),
    TypeRef(TypeRefToken),
    ModuleRef(ModuleRefToken),
    MethodDef(MethodDefToken),
    TypeSpec(TypeSpecToken),
}

impl From<MemberRefParent> for MetadataToken {
    fn from(value: MemberRefParent) -> Self {
        match value {
            MemberRefParent::TypeDef(t) => t.into(),
            MemberRefParent::TypeRef(t) => t.into(),
            MemberRefParent::ModuleRef(t) => t.into(),
            MemberRefParent::MethodDef(t) => t.into(),
            MemberRefParent::TypeSpec(t) => t.into(),
        }
    }
}

/// The scope a `TypeRef` resolves against (ECMA-335 §II.24.2.6 `ResolutionScope`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResolutionScope {
    Module(ModuleToken),
    ModuleRef(ModuleRefToken),
    AssemblyRef(crate::token::AssemblyRefToken),
    TypeRef(TypeRefToken),
}

impl From<ResolutionScope> for MetadataToken {
    fn from(value: ResolutionScope) -> Self {
        match value {
            ResolutionScope::Module(t) => t.into(),
            ResolutionScope::ModuleRef(t) => t.into(),
            ResolutionScope::AssemblyRef(t) => t.into(),
            ResolutionScope::TypeRef(t) => t.into(),
        }
    }
}

/// The generic method a `MethodSpec` instantiates (ECMA-335 §II.24.2.6 `MethodDefOrRef`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MethodDefOrRef {
    MethodDef(MethodDefToken),
    MemberRef(crate::token::MemberRefToken),
}

impl From<MethodDefOrRef> for MetadataToken {
    fn from(value: MethodDefOrRef) -> Self {
        match value {
            MethodDefOrRef::MethodDef(t) => t.into(),
            MethodDefOrRef::MemberRef(t) => t.into(),
        }
    }
}
