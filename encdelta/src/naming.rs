//! Synthesized-local naming.
//!
//! A long-lived synthesized local gets a name encoding `(kind, unique_id)` so
//! the next generation's local-signature serializer can recognize the same
//! local again by name and reattach its slot, rather than by position.

use crate::synth_local::SynthesizedLocalKind;

const PREFIX: &str = "CS$";

/// Builds the debugger-visible name for a long-lived synthesized local.
/// Returns `None` for kinds that are never named (temporaries).
pub fn synthesized_local_name(kind: SynthesizedLocalKind, unique_id: u32) -> Option<String> {
    if !kind.is_long_lived() {
        return None;
    }
    Some(format!("{PREFIX}{}${:04}", kind.wire_value(), unique_id))
}

/// Recovers `(kind, unique_id)` from a name produced by
/// [`synthesized_local_name`]. Any other string, including one for a
/// non-long-lived kind, fails to parse.
pub fn parse_synthesized_local_name(name: &str) -> Option<(SynthesizedLocalKind, u32)> {
    let rest = name.strip_prefix(PREFIX)?;
    let (kind_str, id_str) = rest.split_once('$')?;
    if id_str.len() != 4 {
        return None;
    }
    let kind_value: i32 = kind_str.parse().ok()?;
    let kind = SynthesizedLocalKind::from_wire(kind_value)?;
    if !kind.is_long_lived() {
        return None;
    }
    let unique_id: u32 = id_str.parse().ok()?;
    Some((kind, unique_id))
}
