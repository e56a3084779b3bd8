//! Metadata tokens and table identifiers.
//!
//! `MetadataToken` packs an 8-bit table code with a 24-bit row id exactly as
//! ECMA-335 §II.22.1.8 describes; the per-table newtypes (`TypeDefToken`,
//! `MethodDefToken`, ...) exist so the rest of the crate cannot accidentally
//! mix up row ids belonging to different tables. Discriminants below are
//! fixed wire values, not something this crate is free to renumber.

use paste::paste;

/// A metadata table, identified by its ECMA-335 table number.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TableKind {
    Module = 0x00,
    TypeRef = 0x01,
    TypeDef = 0x02,
    Field = 0x04,
    MethodDef = 0x06,
    Param = 0x08,
    InterfaceImpl = 0x09,
    MemberRef = 0x0a,
    Constant = 0x0b,
    CustomAttribute = 0x0c,
    FieldMarshal = 0x0d,
    DeclSecurity = 0x0e,
    ClassLayout = 0x0f,
    FieldLayout = 0x10,
    StandAloneSig = 0x11,
    EventMap = 0x12,
    Event = 0x14,
    PropertyMap = 0x15,
    Property = 0x17,
    MethodSemantics = 0x18,
    MethodImpl = 0x19,
    ModuleRef = 0x1a,
    TypeSpec = 0x1b,
    ImplMap = 0x1c,
    FieldRva = 0x1d,
    EncLog = 0x1e,
    EncMap = 0x1f,
    Assembly = 0x20,
    AssemblyRef = 0x23,
    File = 0x26,
    ExportedType = 0x27,
    ManifestResource = 0x28,
    NestedClass = 0x29,
    GenericParam = 0x2a,
    MethodSpec = 0x2b,
    GenericParamConstraint = 0x2c,
}

/// Implemented by the plain row structs that back each table index, binding a
/// row type to its table number. Usually derived via `#[derive(TableRow)]`.
pub trait TableRow {
    const KIND: TableKind;
}

/// Implemented by every per-table token newtype so index structures can stay
/// generic over which table they key rows by.
pub trait RowToken: Copy + Eq + std::hash::Hash {
    fn from_row_id(row_id: u32) -> Self;
    fn row_id(self) -> u32;
}

macro_rules! define_metadata_token {
    ($($id: ident = $discriminant: literal),* $(,)?) => {
        #[repr(u32)]
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub enum MetadataTokenKind {
            $($id = $discriminant),*
        }

        /// A 32-bit `(table, row id)` pair, as embedded in IL and signatures.
        #[repr(transparent)]
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        pub struct MetadataToken(u32);

        impl MetadataToken {
            pub fn kind(&self) -> MetadataTokenKind {
                let discriminant = (self.0 & 0xFF00_0000) >> 24;
                match discriminant {
                    $($discriminant => MetadataTokenKind::$id,)*
                    _ => unreachable!("invalid metadata token {:#010x}", self.0),
                }
            }

            /// The 1-based row id encoded in this token.
            #[inline]
            pub fn row_id(&self) -> u32 {
                self.0 & 0x00FF_FFFF
            }

            #[inline]
            pub fn raw(&self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Debug for MetadataToken {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "MetadataToken::{:?}({})", self.kind(), self.row_id())
            }
        }

        paste! {
            $(
                #[repr(transparent)]
                #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
                pub struct [<$id Token>](pub u32);

                impl [<$id Token>] {
                    pub const fn new(row_id: u32) -> Self {
                        Self(row_id)
                    }
                }

                impl From<[<$id Token>]> for MetadataToken {
                    fn from(value: [<$id Token>]) -> Self {
                        MetadataToken(((MetadataTokenKind::$id as u32) << 24) | value.0)
                    }
                }

                impl TryFrom<MetadataToken> for [<$id Token>] {
                    type Error = ();
                    fn try_from(value: MetadataToken) -> Result<Self, Self::Error> {
                        match value.kind() {
                            MetadataTokenKind::$id => Ok(Self(value.row_id())),
                            _ => Err(()),
                        }
                    }
                }

                impl RowToken for [<$id Token>] {
                    fn from_row_id(row_id: u32) -> Self {
                        Self(row_id)
                    }

                    fn row_id(self) -> u32 {
                        self.0
                    }
                }
            )*
        }
    };
}

define_metadata_token! {
    Module = 0x00,
    TypeRef = 0x01,
    TypeDef = 0x02,
    Field = 0x04,
    MethodDef = 0x06,
    Param = 0x08,
    InterfaceImpl = 0x09,
    MemberRef = 0x0a,
    Constant = 0x0b,
    CustomAttribute = 0x0c,
    DeclSecurity = 0x0e,
    ClassLayout = 0x0f,
    FieldLayout = 0x10,
    StandAloneSig = 0x11,
    EventMap = 0x12,
    Event = 0x14,
    PropertyMap = 0x15,
    Property = 0x17,
    MethodSemantics = 0x18,
    MethodImpl = 0x19,
    ModuleRef = 0x1a,
    TypeSpec = 0x1b,
    ImplMap = 0x1c,
    FieldRva = 0x1d,
    EncLog = 0x1e,
    EncMap = 0x1f,
    Assembly = 0x20,
    AssemblyRef = 0x23,
    NestedClass = 0x29,
    GenericParam = 0x2a,
    MethodSpec = 0x2b,
    GenericParamConstraint = 0x2c,
}
