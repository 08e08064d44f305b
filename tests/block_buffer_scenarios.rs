// Scenario tests for BlockBuffer mirroring the reviewed source's own
// worked examples: a pure literal block, and a dictionary-reference copy
// command built directly from the command-stream encoder.

use tcmplx_access::{add_dict_reference, BlockBuffer, BlockString};

#[test]
fn scenario_three_byte_literal_block() {
    let mut bb = BlockBuffer::new(64, 64, 4, false).unwrap();
    bb.write(b"Abc").unwrap();
    bb.flush().unwrap();
    assert_eq!(bb.str(), &[0x03, 0x41, 0x62, 0x63]);
}

#[test]
fn scenario_dictionary_reference_copy_command() {
    let mut out = BlockString::new();
    add_dict_reference(&mut out, 4, 5, 2).unwrap();
    assert_eq!(out.data(), &[0x84, 0x05, 0x00, 0x02]);
}

#[test]
fn write_past_block_capacity_fails_and_leaves_input_untouched() {
    let mut bb = BlockBuffer::new(4, 64, 4, false).unwrap();
    bb.write(b"abcd").unwrap();
    let before = bb.input_data().to_vec();
    assert!(bb.write(b"e").is_err());
    assert_eq!(bb.input_data(), &before[..]);
}
