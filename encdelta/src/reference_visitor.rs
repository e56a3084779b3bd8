//! The reference visitor.
//!
//! Runs after the change driver has decided which definitions are added.
//! Its only job is the "reference to an added member" check: a method body
//! emitted this generation must not refer to a member that has no row in
//! the process the delta is being applied to, which is exactly the members
//! this generation itself is adding.

use crate::change::{ChangeKind, SymbolChanges};
use crate::diagnostics::{AddedMember, Diagnostic, DiagnosticsSink};
use crate::ids::{MethodDefId, TypeDefId};
use crate::module_builder::{DefinitionReference, ModuleBuilder};

pub struct ReferenceVisitor<'a, C, M, S> {
    changes: &'a C,
    module: &'a M,
    sink: &'a mut S,
}

impl<'a, C, M, S> ReferenceVisitor<'a, C, M, S>
where
    C: SymbolChanges,
    M: ModuleBuilder,
    S: DiagnosticsSink,
{
    pub fn new(changes: &'a C, module: &'a M, sink: &'a mut S) -> Self {
        Self { changes, module, sink }
    }

    /// Checks every reference made by each `(owning type, method)` pair that
    /// got a body this generation.
    pub fn sweep(&mut self, touched_methods: &[(TypeDefId, MethodDefId)]) {
        for &(owner, method) in touched_methods {
            for reference in self.module.method_references(method) {
                if self.is_added(reference) {
                    self.sink.report(Diagnostic::ReferenceToAddedMember { referencing_type: owner, member: as_added_member(reference) });
                }
            }
        }
    }

    fn is_added(&self, reference: DefinitionReference) -> bool {
        match reference {
            DefinitionReference::Method(m) => self.changes.is_method_added(m),
            DefinitionReference::Field(f) => matches!(self.changes.field_change(f), ChangeKind::Added),
            DefinitionReference::Property(p) => matches!(self.changes.property_change(p), ChangeKind::Added),
            DefinitionReference::Type(t) => self.changes.is_type_added(t),
        }
    }
}

fn as_added_member(reference: DefinitionReference) -> AddedMember {
    match reference {
        DefinitionReference::Method(m) => AddedMember::Method(m),
        DefinitionReference::Field(f) => AddedMember::Field(f),
        DefinitionReference::Property(p) => AddedMember::Property(p),
        DefinitionReference::Type(t) => AddedMember::Type(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CountingSink;
    use crate::ids::FieldDefId;

    struct FakeChanges;
    impl SymbolChanges for FakeChanges {
        fn type_change(&self, _ty: TypeDefId) -> ChangeKind {
            ChangeKind::None
        }
        fn method_change(&self, method: MethodDefId) -> ChangeKind {
            if method.0 == 99 {
                ChangeKind::Added
            } else {
                ChangeKind::Updated
            }
        }
        fn field_change(&self, _field: FieldDefId) -> ChangeKind {
            ChangeKind::None
        }
        fn event_change(&self, _event: crate::ids::EventDefId) -> ChangeKind {
            ChangeKind::None
        }
        fn property_change(&self, _property: crate::ids::PropertyDefId) -> ChangeKind {
            ChangeKind::None
        }
        fn changed_top_level_types(&self) -> Vec<TypeDefId> {
            vec![]
        }
    }

    struct FakeModule;
    impl ModuleBuilder for FakeModule {
        fn events(&self, _ty: TypeDefId) -> Vec<crate::ids::EventDefId> {
            vec![]
        }
        fn fields(&self, _ty: TypeDefId) -> Vec<FieldDefId> {
            vec![]
        }
        fn methods(&self, _ty: TypeDefId) -> Vec<MethodDefId> {
            vec![]
        }
        fn properties(&self, _ty: TypeDefId) -> Vec<crate::ids::PropertyDefId> {
            vec![]
        }
        fn explicit_overrides(&self, _ty: TypeDefId) -> Vec<crate::module_builder::ExplicitOverride> {
            vec![]
        }
        fn generic_parameters(&self, _ty: TypeDefId) -> Vec<crate::ids::GenericParamDefId> {
            vec![]
        }
        fn method_generic_parameters(&self, _method: MethodDefId) -> Vec<crate::ids::GenericParamDefId> {
            vec![]
        }
        fn method_parameters(&self, _method: MethodDefId) -> Vec<crate::module_builder::MethodParameter> {
            vec![]
        }
        fn method_ordinal(&self, _method: MethodDefId) -> u32 {
            0
        }
        fn method_body(&self, _method: MethodDefId) -> Option<crate::module_builder::MethodBody> {
            None
        }
        fn is_implicit(&self, _method: MethodDefId) -> bool {
            false
        }
        fn lambda_debug_info(&self, _method: MethodDefId) -> Vec<crate::module_builder::LambdaDebugInfo> {
            vec![]
        }
        fn closure_debug_info(&self, _method: MethodDefId) -> Vec<crate::module_builder::ClosureDebugInfo> {
            vec![]
        }
        fn state_machine_info(&self, _method: MethodDefId) -> Option<crate::module_builder::StateMachineInfo> {
            None
        }
        fn method_references(&self, method: MethodDefId) -> Vec<DefinitionReference> {
            if method.0 == 1 {
                vec![DefinitionReference::Method(MethodDefId::new(99))]
            } else {
                vec![]
            }
        }
        fn nested_types(&self, _ty: TypeDefId) -> Vec<TypeDefId> {
            vec![]
        }
        fn method_external_references(&self, _method: MethodDefId) -> Vec<crate::module_builder::ExternalReference> {
            vec![]
        }
    }

    #[test]
    fn flags_a_reference_to_a_freshly_added_method() {
        let changes = FakeChanges;
        let module = FakeModule;
        let mut sink = CountingSink::default();
        let mut visitor = ReferenceVisitor::new(&changes, &module, &mut sink);
        visitor.sweep(&[(TypeDefId::new(1), MethodDefId::new(1))]);
        assert_eq!(sink.count, 1);
    }

    #[test]
    fn does_not_flag_a_reference_to_an_unchanged_method() {
        let changes = FakeChanges;
        let module = FakeModule;
        let mut sink = CountingSink::default();
        let mut visitor = ReferenceVisitor::new(&changes, &module, &mut sink);
        visitor.sweep(&[(TypeDefId::new(1), MethodDefId::new(2))]);
        assert_eq!(sink.count, 0);
    }
}
