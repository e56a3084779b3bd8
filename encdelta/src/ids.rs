//! Opaque definition handles.
//!
//! The delta writer never inspects a definition's shape — it only needs a
//! stable, hashable identity to key its indices by: a narrow capability,
//! not a generic symbol observer. The hosting compiler's binder owns the
//! real symbol representation; these newtypes are what crosses the boundary.

macro_rules! define_def_id {
    ($($name:ident),* $(,)?) => {$(
        #[repr(transparent)]
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                Self(id)
            }
        }
    )*};
}

define_def_id!(
    TypeDefId,
    MethodDefId,
    FieldDefId,
    EventDefId,
    PropertyDefId,
    ParamDefId,
    GenericParamDefId,
);
