//! Local-variable signature emission.
//!
//! Builds the `LOCAL_SIG` blob for one method body and, alongside it, the
//! per-local debug info ([`EncLocalInfo`]) that feeds back into
//! [`crate::baseline::MethodDebugInfo`] for the next generation. Scratch
//! space while a single method's signature is under construction comes from
//! an arena so repeated emits don't pay a heap allocation per local.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::base_writer::BaseMetadataWriter;
use crate::module_builder::{LocalAttributes, LocalDecl};

const ELEMENT_TYPE_LOCAL_SIG: u8 = 0x07;
const ELEMENT_TYPE_PINNED: u8 = 0x45;

/// Debug info for one local in emission order, matching `locals` passed to
/// [`serialize_local_signature`] index for index.
#[derive(Debug, Clone)]
pub enum EncLocalInfo {
    /// A lowering temp: present in the signature, absent from debug info.
    Temporary,
    /// A long-lived local the debugger can re-bind across generations.
    LongLived(crate::module_builder::LocalSlotInfo),
}

fn write_compressed_u32(out: &mut BumpVec<u8>, value: u32) {
    if value <= 0x7F {
        out.push(value as u8);
    } else if value <= 0x3FFF {
        out.push(0x80 | (value >> 8) as u8);
        out.push((value & 0xFF) as u8);
    } else {
        out.push(0xC0 | (value >> 24) as u8);
        out.push(((value >> 16) & 0xFF) as u8);
        out.push(((value >> 8) & 0xFF) as u8);
        out.push((value & 0xFF) as u8);
    }
}

/// Serializes `locals` into a `LOCAL_SIG` blob, interning it and the
/// `StandAloneSig` row that carries it.
///
/// Each local's type is either appended verbatim from
/// [`LocalDecl::cached_signature`], when the builder says its shape did not
/// change, or serialized fresh via `writer`.
pub fn serialize_local_signature(
    locals: &[LocalDecl],
    writer: &mut impl BaseMetadataWriter,
    arena: &Bump,
) -> (Vec<u8>, Vec<EncLocalInfo>) {
    let mut bytes = BumpVec::new_in(arena);
    bytes.push(ELEMENT_TYPE_LOCAL_SIG);
    write_compressed_u32(&mut bytes, locals.len() as u32);

    let mut debug_info = Vec::with_capacity(locals.len());

    for local in locals {
        for modifier in &local.custom_modifiers {
            writer.serialize_type_signature(*modifier, &mut bytes);
        }
        if local.attributes.contains(LocalAttributes::PINNED) {
            bytes.push(ELEMENT_TYPE_PINNED);
        }
        match &local.cached_signature {
            Some(cached) => bytes.extend_from_slice(cached),
            None => writer.serialize_type_signature(local.ty, &mut bytes),
        }

        debug_info.push(match local.slot {
            Some(slot) => EncLocalInfo::LongLived(slot),
            None => EncLocalInfo::Temporary,
        });
    }

    (bytes.into_iter().collect(), debug_info)
}
