//! Block-level match finding and command-stream encoding.
//!
//! `string` is the growable byte buffer used for both staged input and
//! emitted output; `command` encodes/decodes the literal and copy command
//! bytes; `buffer` ties a [`crate::hashchain::HashChain`] and two `string`s
//! together into the match-finder proper.

pub mod buffer;
pub mod command;
pub mod string;

pub use buffer::{BlockBuffer, INPUT_BLOCK_SIZE_MAX};
pub use command::{add_copy, add_dict_reference, read_distance, read_length, Distance, MATCH_SIZE_MAX};
pub use string::{BlockString, BLOCK_STRING_MAX_CAPACITY};
