//! Diagnostics raised while building a delta.
//!
//! None of these are fatal on their own — they are collected and handed to
//! the host, which decides whether a given diagnostic should fail the emit.
//! Only an internal invariant violation (see [`crate::errors`]) aborts the
//! writer outright.

use crate::ids::{FieldDefId, MethodDefId, PropertyDefId, TypeDefId};

/// A problem discovered while walking the change set or its references.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Diagnostic {
    /// A reference row points at a member that was itself added in this
    /// generation — illegal, because references must resolve against the
    /// baseline the running process already has loaded.
    ReferenceToAddedMember { referencing_type: TypeDefId, member: AddedMember },
}

/// The kind of member a [`Diagnostic::ReferenceToAddedMember`] points at.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AddedMember {
    Method(MethodDefId),
    Field(FieldDefId),
    Property(PropertyDefId),
    Type(TypeDefId),
}

/// Where diagnostics are reported as they are discovered.
pub trait DiagnosticsSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A sink that only remembers whether anything was ever reported, for hosts
/// that only need a yes/no answer.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub count: u32,
}

impl DiagnosticsSink for CountingSink {
    fn report(&mut self, _diagnostic: Diagnostic) {
        self.count += 1;
    }
}
