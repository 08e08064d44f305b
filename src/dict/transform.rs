//! Dictionary word transforms.
//!
//! Grounded on `bdict_cb.cpp`'s 21-entry callback table: the identity
//! transform, two case-folding ("ferment") variants, and `DropFront`/
//! `DropBack` by 1..9 bytes. The public dictionary API in the reviewed
//! header documents a wider selector range than this table actually backs;
//! only the 21 primitives with a grounded implementation are carried here.

use super::word::Word;

/// One of the 21 grounded dictionary-word transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    FermentOne,
    FermentAll,
    DropFront(u8),
    DropBack(u8),
}

/// Upper bound on bytes `FermentAll` will write, which re-applies the brew
/// step across the whole word rather than copying a tail verbatim.
pub const TRANSFORM_DEST_MAX: usize = 34;

/// Upper bound on bytes `FermentOne` will write: the brew step runs once,
/// then the remainder of the word is copied verbatim up to this cap.
const FERMENT_ONE_DEST_MAX: usize = 37;

impl Transform {
    /// Selector index into the reviewed source's `bdict_cblist` (0..21).
    pub fn from_index(k: u8) -> Option<Self> {
        Some(match k {
            0 => Transform::Identity,
            1 => Transform::FermentOne,
            2 => Transform::FermentAll,
            3..=11 => Transform::DropFront(k - 2),
            12..=20 => Transform::DropBack(k - 11),
            _ => return None,
        })
    }

    /// Applies the transform to `word`, returning the transformed bytes.
    pub fn apply(self, word: &Word) -> Vec<u8> {
        match self {
            Transform::Identity => word.as_bytes().to_vec(),
            Transform::FermentOne => ferment(word.as_bytes(), false, FERMENT_ONE_DEST_MAX),
            Transform::FermentAll => ferment(word.as_bytes(), true, TRANSFORM_DEST_MAX),
            Transform::DropFront(n) => {
                let n = n as usize;
                let src = word.as_bytes();
                if n >= src.len() {
                    Vec::new()
                } else {
                    src[n..].to_vec()
                }
            }
            Transform::DropBack(n) => {
                let n = n as usize;
                let src = word.as_bytes();
                if n >= src.len() {
                    Vec::new()
                } else {
                    src[..src.len() - n].to_vec()
                }
            }
        }
    }
}

/// UTF-8-aware case toggle ("brew" in the reviewed source). Applied once at
/// the front of the word when `all` is false, or repeatedly across the
/// whole word when `all` is true; the remainder (or, for the `false` case,
/// everything past the first code point) is copied verbatim. Output is
/// capped at `dest_max` bytes: 37 for the single-brew case (`bdict_cb_brew_one`
/// copies its tail under that bound), 34 for the repeated-brew case
/// (`bdict_cb_brew_all`'s own cap, [`TRANSFORM_DEST_MAX`]).
fn ferment(src: &[u8], all: bool, dest_max: usize) -> Vec<u8> {
    let mut dst = Vec::with_capacity(src.len());
    let mut i = 0usize;
    let mut toggled_once = false;

    while i < src.len() && dst.len() < dest_max {
        if !all && toggled_once {
            dst.push(src[i]);
            i += 1;
            continue;
        }

        let b0 = src[i];
        if b0 < 192 {
            if (97..=122).contains(&b0) {
                dst.push(b0 ^ 32);
            } else {
                dst.push(b0);
            }
            i += 1;
        } else if b0 < 224 {
            dst.push(b0);
            if i + 1 < src.len() {
                dst.push(src[i + 1] ^ 32);
            }
            i += 2;
        } else {
            dst.push(b0);
            if i + 1 < src.len() {
                dst.push(src[i + 1]);
            }
            if i + 2 < src.len() {
                dst.push(src[i + 2] ^ 5);
            }
            i += 3;
        }
        toggled_once = true;
    }

    if dst.len() < dest_max {
        let remaining = dest_max - dst.len();
        let tail = &src[i.min(src.len())..];
        dst.extend_from_slice(&tail[..tail.len().min(remaining)]);
    }
    dst
}
