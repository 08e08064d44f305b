//! Error type shared by every fallible operation in this crate.
//!
//! Mirrors the closed error enumeration of the reviewed access layer
//! (`Memory`, `BadParam`, `OutOfRange`, `BlockOverflow`, `Init`) as a plain
//! Rust enum with a hand-written `Display` impl, the same idiom used by
//! this workspace's frame-format error type.

use core::fmt;

/// Errors returned by the access-layer primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// Allocation or size overflow (e.g. growth past a structure's `max_size`).
    Memory,
    /// Caller supplied an out-of-range selector, mode, or constructor parameter.
    BadParam,
    /// Access index past valid data.
    OutOfRange,
    /// A `write` would exceed the current block's input capacity.
    BlockOverflow,
    /// Operation requires state that is not currently held (e.g. a moved-out chain).
    Init,
}

impl AccessError {
    /// Short, stable name for this error kind.
    pub fn name(&self) -> &'static str {
        match self {
            AccessError::Memory => "Memory",
            AccessError::BadParam => "BadParam",
            AccessError::OutOfRange => "OutOfRange",
            AccessError::BlockOverflow => "BlockOverflow",
            AccessError::Init => "Init",
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::error::Error for AccessError {}

/// Standard result type for this crate's fallible operations.
pub type Result<T> = std::result::Result<T, AccessError>;
