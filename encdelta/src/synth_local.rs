//! Synthesized-local kinds.
//!
//! These discriminants are part of the on-disk contract with the debugger
//! and EnC engine: a later session recovers `(kind, unique_id)` from a local's
//! name (see [`crate::naming`]) and must map `kind` back to the same
//! semantic role every time. Do not renumber an existing wire value; add new
//! ones past the current range.

const FOREACH_ARRAY_INDEX_BASE: i32 = 5;
const FOREACH_ARRAY_INDEX_DIMENSIONS: i32 = 10;
const FOREACH_ARRAY_INDEX_MAX_WIRE: i32 = FOREACH_ARRAY_INDEX_BASE + FOREACH_ARRAY_INDEX_DIMENSIONS - 1;
const FOREACH_ARRAY_LIMIT: i32 = 15;

/// The semantic role of a compiler-synthesized local.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SynthesizedLocalKind {
    /// A lowering temp with no debugger-visible identity. Never named.
    LoweringTemp,
    Lock,
    Using,
    ConditionalBranchDiscriminator,
    ForEachEnumerator,
    ForEachArray,
    /// The loop index for dimension `N` of a multi-dimensional `foreach`,
    /// `N < 10`. Wire value is `5 + N`.
    ForEachArrayIndex(u8),
    FixedString,
    LockTaken,
    UsingDisposable,
    TryAwaitPendingCaughtException,
    TryAwaitPendingException,
    ExceptionFilterAwaitHoistedExceptionLocal,
    /// Caches a delegate instance; named even in release builds.
    CachedDelegate,
    /// Backing local for a lambda/local-function display class; named even
    /// in release builds.
    DisplayClass,
}

impl SynthesizedLocalKind {
    pub fn from_wire(value: i32) -> Option<Self> {
        use SynthesizedLocalKind::*;
        Some(match value {
            -1 => LoweringTemp,
            0 => Lock,
            1 => Using,
            2 => ConditionalBranchDiscriminator,
            3 => ForEachEnumerator,
            4 => ForEachArray,
            FOREACH_ARRAY_INDEX_BASE..=FOREACH_ARRAY_INDEX_MAX_WIRE => ForEachArrayIndex((value - FOREACH_ARRAY_INDEX_BASE) as u8),
            FOREACH_ARRAY_LIMIT => FixedString,
            16 => LockTaken,
            17 => UsingDisposable,
            18 => TryAwaitPendingCaughtException,
            19 => TryAwaitPendingException,
            20 => ExceptionFilterAwaitHoistedExceptionLocal,
            21 => CachedDelegate,
            22 => DisplayClass,
            _ => return None,
        })
    }

    pub fn wire_value(self) -> i32 {
        use SynthesizedLocalKind::*;
        match self {
            LoweringTemp => -1,
            Lock => 0,
            Using => 1,
            ConditionalBranchDiscriminator => 2,
            ForEachEnumerator => 3,
            ForEachArray => 4,
            ForEachArrayIndex(dimension) => {
                assert!((dimension as i32) < FOREACH_ARRAY_INDEX_DIMENSIONS, "only up to 10 foreach array dimensions are wire-assignable");
                FOREACH_ARRAY_INDEX_BASE + dimension as i32
            }
            FixedString => FOREACH_ARRAY_LIMIT,
            LockTaken => 16,
            UsingDisposable => 17,
            TryAwaitPendingCaughtException => 18,
            TryAwaitPendingException => 19,
            ExceptionFilterAwaitHoistedExceptionLocal => 20,
            CachedDelegate => 21,
            DisplayClass => 22,
        }
    }

    /// Long-lived kinds get a slot in `MethodDebugInfo::localSlots` and, per
    /// debug-information settings, a name; [`SynthesizedLocalKind::LoweringTemp`]
    /// never does.
    pub const fn is_long_lived(self) -> bool {
        !matches!(self, SynthesizedLocalKind::LoweringTemp)
    }

    /// Kinds the debugger relies on even when no debug information is being
    /// emitted at all.
    pub const fn needs_name_in_release(self) -> bool {
        matches!(self, SynthesizedLocalKind::CachedDelegate | SynthesizedLocalKind::DisplayClass)
    }
}
