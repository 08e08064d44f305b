//! Match-finder and command emitter.
//!
//! Owns a [`HashChain`] plus two [`BlockString`]s (`input`, `output`).
//! [`BlockBuffer::flush`] runs the three-state lazy match-finder
//! (`try_block` in blockbuf.cpp) over the staged input, appending literal
//! and copy commands to `output`.

use crate::error::{AccessError, Result};
use crate::hashchain::{HashChain, NPOS};

use super::command::{add_copy, update_literal, MATCH_SIZE_MAX};
use super::string::BlockString;

/// Upper bound on `input_block_size`.
pub const INPUT_BLOCK_SIZE_MAX: usize = 0x3FFF_FFFF;

/// Owns the hash chain and the input/output staging buffers for one
/// match-finder session.
pub struct BlockBuffer {
    chain: Option<HashChain>,
    input: BlockString,
    output: BlockString,
    use_bdict: bool,
    input_block_size: usize,
}

impl BlockBuffer {
    /// Creates a block buffer with the given ring extent `n`, hash-chain
    /// length `chain_length`, and `input_block_size` cap (truncated to
    /// `min(input_block_size, INPUT_BLOCK_SIZE_MAX)`).
    pub fn new(input_block_size: usize, n: usize, chain_length: usize, use_bdict: bool) -> Result<Self> {
        let input_block_size = input_block_size.min(INPUT_BLOCK_SIZE_MAX);
        let chain = HashChain::new(n, chain_length)?;
        let mut input = BlockString::new();
        input.reserve(input_block_size)?;
        let mut output = BlockString::new();
        output.reserve(input_block_size * 2)?;
        Ok(BlockBuffer {
            chain: Some(chain),
            input,
            output,
            use_bdict,
            input_block_size,
        })
    }

    #[inline]
    pub fn use_bdict(&self) -> bool {
        self.use_bdict
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.input_block_size
    }

    #[inline]
    pub fn input_size(&self) -> usize {
        self.input.size()
    }

    #[inline]
    pub fn input_data(&self) -> &[u8] {
        self.input.data()
    }

    #[inline]
    pub fn str(&self) -> &[u8] {
        self.output.data()
    }

    #[inline]
    pub fn extent(&self) -> usize {
        self.chain.as_ref().map(|c| c.extent()).unwrap_or(0)
    }

    #[inline]
    pub fn ring_size(&self) -> usize {
        self.chain.as_ref().map(|c| c.ring_size()).unwrap_or(0)
    }

    pub fn peek(&self, i: usize) -> Result<u8> {
        self.output.get(i)
    }

    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Appends `src` to the staged input. Fails with `BlockOverflow`
    /// (leaving input untouched) if it would not fit in the remaining
    /// block capacity.
    pub fn write(&mut self, src: &[u8]) -> Result<()> {
        if src.len() > self.input_block_size - self.input.size() {
            return Err(AccessError::BlockOverflow);
        }
        for &b in src {
            self.input.push_back(b)?;
        }
        Ok(())
    }

    /// Pushes bytes into the hash chain without emitting commands, used to
    /// resynchronise the window when external blocks are inserted out of
    /// band.
    pub fn bypass(&mut self, src: &[u8]) -> Result<()> {
        let chain = self.chain.as_mut().ok_or(AccessError::Init)?;
        for &b in src {
            chain.push_front(b)?;
        }
        Ok(())
    }

    /// Appends the staged input verbatim to output (a stored/uncompressed
    /// block), still threading bytes through the hash chain.
    pub fn noconv_block(&mut self) -> Result<()> {
        let input_bytes = self.input.data().to_vec();
        {
            let chain = self.chain.as_mut().ok_or(AccessError::Init)?;
            for &b in &input_bytes {
                chain.push_front(b)?;
            }
        }
        for b in input_bytes {
            self.output.push_back(b)?;
        }
        Ok(())
    }

    /// Runs the match-finder over the staged input, appending commands to
    /// `output`; on success the input is cleared.
    pub fn flush(&mut self) -> Result<()> {
        self.try_block()?;
        self.input.clear();
        Ok(())
    }

    fn try_block(&mut self) -> Result<()> {
        let input = self.input.data().to_vec();
        let n = input.len();

        #[derive(Clone, Copy, PartialEq, Eq)]
        enum State {
            Idle,
            Single,
            Lazy,
        }

        let mut state = State::Idle;
        let mut j = self.output.size();
        let mut v: u32 = 0;
        let mut other_v: u32 = 0;
        let mut match_size: u32 = 0;
        let mut other_match_size: u32 = 0;
        let mut skipped_byte: u8 = 0;

        // Each outer iteration advances `i`; a state transition that should
        // re-examine the *same* byte under the new state falls through via
        // the inner `loop`, mirroring the reviewed source's switch-case
        // fallthrough between Lazy -> Single -> Idle.
        let mut i = 0usize;
        'outer: while i < n {
            loop {
                match state {
                    State::Lazy => {
                        let q = self.ring_byte(v)?;
                        let oq = self.ring_byte(other_v)?;
                        if q != input[i] {
                            j = update_literal(&mut self.output, skipped_byte, j)?;
                            v = other_v;
                            match_size = other_match_size;
                            state = State::Single;
                            continue;
                        } else if oq != input[i] || match_size >= MATCH_SIZE_MAX {
                            state = State::Single;
                            continue;
                        } else {
                            match_size += 1;
                            other_match_size += 1;
                            self.push_chain(input[i])?;
                            i += 1;
                            continue 'outer;
                        }
                    }
                    State::Single => {
                        let q = self.ring_byte(v)?;
                        if q == input[i] && match_size < MATCH_SIZE_MAX {
                            match_size += 1;
                            self.push_chain(input[i])?;
                            i += 1;
                            continue 'outer;
                        } else {
                            add_copy(&mut self.output, match_size, v)?;
                            j = self.output.size();
                            state = State::Idle;
                            continue;
                        }
                    }
                    State::Idle => {
                        if i <= n.saturating_sub(4) {
                            // HashChain::find takes its query in forward
                            // (oldest-to-newest) order, matching the slice
                            // it was read from.
                            let triple = [input[i], input[i + 1], input[i + 2]];
                            let cand = self.find(&triple)?;
                            if cand != NPOS {
                                let other_triple = [input[i + 1], input[i + 2], input[i + 3]];
                                let other_cand = self.find(&other_triple)?;
                                v = cand;
                                skipped_byte = input[i];
                                match_size = 3;
                                if other_cand != NPOS {
                                    other_v = other_cand + 1;
                                    other_match_size = 2;
                                    state = State::Lazy;
                                } else {
                                    other_match_size = 0;
                                    state = State::Single;
                                }
                                self.push_chain(input[i])?;
                                self.push_chain(input[i + 1])?;
                                self.push_chain(input[i + 2])?;
                                i += 3;
                                continue 'outer;
                            }
                        }
                        j = update_literal(&mut self.output, input[i], j)?;
                        self.push_chain(input[i])?;
                        i += 1;
                        continue 'outer;
                    }
                }
            }
        }

        if state != State::Idle {
            add_copy(&mut self.output, match_size, v)?;
        }
        debug_assert!(i >= n, "try_block must consume the full staged input");
        Ok(())
    }

    fn ring_byte(&self, v: u32) -> Result<u8> {
        let chain = self.chain.as_ref().ok_or(AccessError::Init)?;
        chain.ring().get(v as usize)
    }

    fn push_chain(&mut self, b: u8) -> Result<()> {
        let chain = self.chain.as_mut().ok_or(AccessError::Init)?;
        chain.push_front(b)
    }

    fn find(&self, b: &[u8; 3]) -> Result<u32> {
        let chain = self.chain.as_ref().ok_or(AccessError::Init)?;
        Ok(chain.find(b, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_only_block_roundtrips_as_inserts() {
        let mut bb = BlockBuffer::new(64, 64, 4, false).unwrap();
        bb.write(b"Abc").unwrap();
        bb.flush().unwrap();
        assert_eq!(bb.str(), &[0x03, 0x41, 0x62, 0x63]);
    }

    #[test]
    fn write_past_block_size_fails_without_mutating_input() {
        let mut bb = BlockBuffer::new(4, 64, 4, false).unwrap();
        bb.write(b"abcd").unwrap();
        let before = bb.input_size();
        assert!(matches!(bb.write(b"e"), Err(AccessError::BlockOverflow)));
        assert_eq!(bb.input_size(), before);
    }

    /// Decodes a command stream back into the literal bytes it represents,
    /// resolving copy commands against the bytes decoded so far (mirroring
    /// how an external decoder would reconstruct the source).
    fn decode(stream: &[u8]) -> Vec<u8> {
        use super::super::command::{read_distance, read_length, Distance};
        let mut out = Vec::new();
        let mut pos = 0usize;
        while pos < stream.len() {
            let x = stream[pos];
            if x & 0x80 == 0x80 {
                let (len, consumed) = read_length(stream, pos).unwrap();
                pos += consumed;
                let (dist, consumed) = read_distance(stream, pos).unwrap();
                pos += consumed;
                match dist {
                    Distance::Plain(d) => {
                        // `d` is the ring index captured at match start, held
                        // fixed as more bytes are appended (the same way
                        // `try_block` keeps re-reading `ring[v]` while the
                        // ring's own "now" advances underneath it).
                        let start = out.len() - d as usize - 1;
                        for k in 0..len as usize {
                            out.push(out[start + k]);
                        }
                    }
                    Distance::Dictionary { .. } => unreachable!("no dictionary refs in these tests"),
                }
            } else {
                let (len, consumed) = read_length(stream, pos).unwrap();
                pos += consumed;
                out.extend_from_slice(&stream[pos..pos + len as usize]);
                pos += len as usize;
            }
        }
        out
    }

    #[test]
    fn copy_emits_exact_bytes_for_repeated_four_byte_block() {
        // "abcdabcd": the second "abcd" is found via the hash chain once
        // enough history exists, and folds into a single copy command.
        let mut bb = BlockBuffer::new(64, 64, 4, false).unwrap();
        bb.write(b"abcdabcd").unwrap();
        bb.flush().unwrap();
        assert_eq!(
            bb.str(),
            &[0x04, 0x61, 0x62, 0x63, 0x64, 0x84, 0x80, 0x03]
        );
        assert_eq!(decode(bb.str()), b"abcdabcd");
    }

    #[test]
    fn copy_round_trip_on_repeated_block() {
        let a = b"helloworld";
        let mut doubled = a.to_vec();
        doubled.extend_from_slice(a);
        let mut bb = BlockBuffer::new(64, 64, 8, false).unwrap();
        bb.write(&doubled).unwrap();
        bb.flush().unwrap();
        assert_eq!(decode(bb.str()), doubled);
        // the repeat must have folded into at least one copy command rather
        // than twenty more literal bytes.
        assert!(bb.str().len() < doubled.len() + 2);
    }

    #[test]
    fn no_match_possible_yields_pure_literal_stream() {
        let input = b"Abc";
        let mut bb = BlockBuffer::new(64, 64, 4, false).unwrap();
        bb.write(input).unwrap();
        bb.flush().unwrap();
        assert_eq!(decode(bb.str()), input);
    }
}
