//! The delta metadata writer.
//!
//! Orchestrates one generation's emit: run the change driver, sweep
//! references for diagnostics, then fold the result into the next
//! generation's baseline. This is the crate's single public entry point;
//! everything else is a collaborator it composes.

use uuid::Uuid;

use crate::base_writer::BaseMetadataWriter;
use crate::baseline::{EmitBaseline, MethodDebugInfo};
use crate::cancellation::CancellationToken;
use crate::change::SymbolChanges;
use crate::definition_map::DefinitionMap;
use crate::diagnostics::DiagnosticsSink;
use crate::driver::{ChangeDriver, DeltaIndices};
use crate::enc_log::{EncLogRow, EncMapRow};
use crate::errors::Result;
use crate::module_builder::ModuleBuilder;
use crate::reference_visitor::ReferenceVisitor;
use crate::token::MethodDefToken;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Knobs that do not change the shape of the emitted delta, only how it is
/// produced.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Stop as soon as the cancellation token observes a cancel request
    /// between top-level types, rather than only checking once up front.
    pub cooperative_cancellation: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { cooperative_cancellation: true }
    }
}

/// Everything produced by one call to [`DeltaMetadataWriter::emit`].
pub struct DeltaResult {
    pub enc_log: Vec<EncLogRow>,
    pub enc_map: Vec<EncMapRow>,
    pub indices: DeltaIndices,
    pub method_debug_info: Vec<(MethodDefToken, MethodDebugInfo)>,
    pub baseline: EmitBaseline,
}

pub struct DeltaMetadataWriter {
    options: EmitOptions,
}

impl DeltaMetadataWriter {
    pub fn new(options: EmitOptions) -> Self {
        Self { options }
    }

    #[cfg_attr(feature = "tracing", instrument(skip_all))]
    pub fn emit<C, D, M, W, S>(
        &self,
        changes: &C,
        definitions: &D,
        module: &M,
        base_writer: &mut W,
        sink: &mut S,
        baseline: EmitBaseline,
        new_enc_id: Uuid,
        cancellation: &CancellationToken,
    ) -> Result<DeltaResult>
    where
        C: SymbolChanges,
        D: DefinitionMap,
        M: ModuleBuilder,
        W: BaseMetadataWriter,
        S: DiagnosticsSink,
    {
        cancellation.check()?;

        let mut driver = ChangeDriver::new(changes, definitions, module, base_writer, &baseline);
        driver.run(cancellation, self.options.cooperative_cancellation)?;

        cancellation.check()?;
        let mut visitor = ReferenceVisitor::new(changes, module, sink);
        visitor.sweep(&driver.touched_methods);

        let heap_lengths =
            (driver.writer.blob_heap_len(), driver.writer.string_heap_len(), driver.writer.user_string_heap_len(), driver.writer.guid_heap_len());

        cancellation.check()?;
        let (enc_log, enc_map) = crate::enc_log::build(&driver.indices)?;
        let indices = driver.indices;
        let method_debug_info = driver.method_debug_info;

        let merged_baseline = crate::merge::merge(baseline, &indices, method_debug_info.clone(), new_enc_id, heap_lengths);

        Ok(DeltaResult { enc_log, enc_map, indices, method_debug_info, baseline: merged_baseline })
    }
}
