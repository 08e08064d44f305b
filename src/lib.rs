//! tcmplx-access — compression access layer.
//!
//! Sliding-window ring buffer, hash-chain match finder, block-level command
//! encoding, static dictionary, and context modeling primitives for a
//! Brotli-style text compressor. This crate provides the access layer only:
//! it does not choose an entropy coder or assemble a full compressed
//! stream, matching the scope of the reviewed C++ library it is ported
//! from.

pub mod block;
pub mod ctxt;
pub mod dict;
pub mod error;
pub mod hashchain;
pub mod ring;

pub use error::{AccessError, Result};
pub use ring::Ring;

pub use hashchain::{HashChain, NPOS};

pub use block::{
    add_copy, add_dict_reference, read_distance, read_length, BlockBuffer, BlockString, Distance,
    BLOCK_STRING_MAX_CAPACITY, INPUT_BLOCK_SIZE_MAX, MATCH_SIZE_MAX,
};

pub use dict::{resolve as resolve_dict_reference, Transform, Word, MAX_WORD_LEN, MIN_WORD_LEN};

pub use ctxt::{
    apply_move_to_front, distance_context, literal_context, revert_move_to_front, subdivide,
    ContextMap, ContextMode, ContextSpan, SpanMode, SPAN_COUNT,
};

// ─────────────────────────────────────────────────────────────────────────
// Version
// ─────────────────────────────────────────────────────────────────────────

pub const VERSION_MAJOR: i32 = 0;
pub const VERSION_MINOR: i32 = 1;
pub const VERSION_RELEASE: i32 = 0;
pub const VERSION_NUMBER: i32 = VERSION_MAJOR * 100 * 100 + VERSION_MINOR * 100 + VERSION_RELEASE;
pub const VERSION_STRING: &str = "0.1.0";

/// Returns the library version number (e.g. 100 for v0.1.0).
pub fn version_number() -> i32 {
    VERSION_NUMBER
}

/// Returns the library version string (e.g. `"0.1.0"`).
pub fn version_string() -> &'static str {
    VERSION_STRING
}
