//! Incremental CLI (ECMA-335) metadata delta construction for Edit-and-Continue
//! updates to an already-loaded managed assembly.
//!
//! Given a baseline (what the process currently has loaded), a change set
//! (which definitions the host's compiler says changed) and a lowered view of
//! the edited module, this crate decides which rows a new generation needs,
//! builds the `EncLog`/`EncMap` pair that describes them, and folds the
//! result into an [`EmitBaseline`] the next delta starts from. It never
//! encodes a row to bytes itself or touches a PE file; those are the
//! [`base_writer::BaseMetadataWriter`] collaborator's job.

pub mod base_writer;
pub mod baseline;
pub mod cancellation;
pub mod change;
pub mod coded_index;
pub mod definition_map;
pub mod diagnostics;
pub mod driver;
pub mod enc_log;
pub mod errors;
pub mod ids;
pub mod index;
pub mod locals;
pub mod merge;
pub mod module_builder;
pub mod naming;
pub mod reference_visitor;
pub mod synth_local;
pub mod token;
pub mod writer;

pub use baseline::EmitBaseline;
pub use change::{ChangeKind, SymbolChanges};
pub use definition_map::DefinitionMap;
pub use diagnostics::{Diagnostic, DiagnosticsSink};
pub use errors::{DeltaError, Result};
pub use module_builder::ModuleBuilder;
pub use writer::{DeltaMetadataWriter, DeltaResult, EmitOptions};
