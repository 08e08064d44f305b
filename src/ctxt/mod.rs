//! Context modeling: the literal/distance context map with move-to-front
//! coding, and the span classifier that picks literal-context modes for
//! runs of a buffer.
//!
//! Grounded on `ctxtmap.cpp` (map + MTF) and `ctxtspan.cpp` (classifier).

pub mod lut;
pub mod map;
pub mod span;

pub use map::{
    apply_move_to_front, distance_context, literal_context, revert_move_to_front, ContextMap,
    ContextMode,
};
pub use span::{guess, select, subdivide, ContextScore, ContextSpan, SpanMode, SPAN_COUNT};
