//! The definition map capability.
//!
//! Resolves a definition that has existed since generation 0 to the row id
//! it was assigned in the original (full) metadata emit. A `DefinitionIndex`
//! consults this only as the last resolution step, after checking this
//! delta's own additions and the baseline's additions from earlier deltas.

use crate::ids::{EventDefId, FieldDefId, MethodDefId, PropertyDefId, TypeDefId};
use crate::token::{EventToken, FieldToken, MethodDefToken, PropertyToken, TypeDefToken};

pub trait DefinitionMap {
    fn try_get_type(&self, def: TypeDefId) -> Option<TypeDefToken>;
    fn try_get_method(&self, def: MethodDefId) -> Option<MethodDefToken>;
    fn try_get_field(&self, def: FieldDefId) -> Option<FieldToken>;
    fn try_get_event(&self, def: EventDefId) -> Option<EventToken>;
    fn try_get_property(&self, def: PropertyDefId) -> Option<PropertyToken>;
}
