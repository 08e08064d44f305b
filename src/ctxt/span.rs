//! Context span classifier: scores a byte range under each
//! [`ContextMode`] and subdivides a buffer into up to
//! [`SPAN_COUNT`] adjacent runs sharing a mode.
//!
//! Equivalent to `ctxtspan.cpp`'s `ctxtspan_guess`/`ctxtspan_select`/
//! `ctxtspan_subdivide`.

use super::lut::LUT2;
use super::map::ContextMode;

/// Number of spans `subdivide` partitions a buffer into before merging.
pub const SPAN_COUNT: usize = 8;

const UTF_POINT: u32 = 6;
const CEIL: u32 = 6;

/// Per-mode accumulated score, indexed in `[LSB6, MSB6, UTF8, Signed]` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextScore {
    vec: [u32; 4],
}

impl ContextScore {
    pub fn new() -> Self {
        ContextScore::default()
    }

    #[inline]
    fn idx(mode: ContextMode) -> usize {
        match mode {
            ContextMode::Lsb6 => 0,
            ContextMode::Msb6 => 1,
            ContextMode::Utf8 => 2,
            ContextMode::Signed => 3,
        }
    }

    #[inline]
    pub fn get(&self, mode: ContextMode) -> u32 {
        self.vec[Self::idx(mode)]
    }

    #[inline]
    fn add(&mut self, mode: ContextMode, amount: u32) {
        self.vec[Self::idx(mode)] += amount;
    }
}

fn subscore(sub: u32, add: u32) -> u32 {
    if add > sub {
        CEIL
    } else {
        CEIL + add - sub
    }
}

fn absdiff(a: u32, b: u32) -> u32 {
    if a > b {
        a - b
    } else {
        b - a
    }
}

/// Scans `buf`, accumulating each mode's score onto `score` in place (the
/// reviewed source treats this as an accumulator, not a fresh computation,
/// which the hierarchical merge in [`subdivide`] relies on).
pub fn guess(score: &mut ContextScore, buf: &[u8]) {
    let mut last: u8 = 0;
    let mut utf8count: u8 = 0;
    for &current in buf {
        let lsb_tmp = last ^ current;
        score.add(
            ContextMode::Lsb6,
            subscore((lsb_tmp & 0xC0).count_ones() * 3, (lsb_tmp & 0x3F).count_ones()),
        );
        score.add(
            ContextMode::Msb6,
            subscore((lsb_tmp & 0x03).count_ones() * 3, (lsb_tmp & 0xFC).count_ones()),
        );

        let last_lut2 = LUT2[last as usize] as u32;
        let lut2 = LUT2[current as usize] as u32;
        score.add(ContextMode::Signed, 7 - absdiff(lut2, last_lut2));

        if utf8count > 0 {
            let ok = current & 0xC0 == 0x80;
            utf8count = if ok { utf8count - 1 } else { 0 };
            if ok {
                score.add(ContextMode::Utf8, UTF_POINT);
            }
        } else if current >= 0xF0 {
            utf8count = 3;
            score.add(ContextMode::Utf8, UTF_POINT);
        } else if current >= 0xE0 {
            utf8count = 2;
            score.add(ContextMode::Utf8, UTF_POINT);
        } else if current >= 0xC0 {
            utf8count = 1;
            score.add(ContextMode::Utf8, UTF_POINT);
        } else if current < 0x80 {
            score.add(ContextMode::Utf8, UTF_POINT);
        }

        last = current;
    }
}

/// Picks the mode with the strictly greatest score, ties resolving to the
/// earliest mode in `[Lsb6, Msb6, Utf8, Signed]` order.
pub fn select(score: &ContextScore) -> ContextMode {
    const ORDER: [ContextMode; 4] =
        [ContextMode::Lsb6, ContextMode::Msb6, ContextMode::Utf8, ContextMode::Signed];
    let mut best = ContextMode::Lsb6;
    let mut best_score = 0u32;
    for &mode in &ORDER {
        let s = score.get(mode);
        if s > best_score {
            best = mode;
            best_score = s;
        }
    }
    best
}

/// A sentinel mode used to pad unused tail entries in [`ContextSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanMode {
    Mode(ContextMode),
    ModeMax,
}

/// Up to [`SPAN_COUNT`] adjacent runs, each with a start offset and chosen
/// mode. Unused trailing entries carry `offset = total_bytes` and
/// `mode = ModeMax`.
#[derive(Debug, Clone)]
pub struct ContextSpan {
    pub offsets: [usize; SPAN_COUNT],
    pub modes: [SpanMode; SPAN_COUNT],
    pub count: usize,
    pub total_bytes: usize,
}

/// Partitions `buf` into [`SPAN_COUNT`] equal-sized spans, scores and
/// mode-selects each, then hierarchically merges adjacent spans whose
/// cross-difference seam cost stays within `margin`.
pub fn subdivide(buf: &[u8], margin: u32) -> ContextSpan {
    let buf_len = buf.len();
    let span_len = buf_len / SPAN_COUNT;

    let mut scores = [ContextScore::new(); SPAN_COUNT];
    let mut groups = [0u8; SPAN_COUNT];
    let mut stops = [0usize; SPAN_COUNT];
    let mut offsets = [0usize; SPAN_COUNT];
    let mut modes = [ContextMode::Lsb6; SPAN_COUNT];

    for i in 0..SPAN_COUNT {
        groups[i] = i as u8;
        offsets[i] = span_len * i;
        stops[i] = if i + 1 >= SPAN_COUNT { buf_len } else { span_len * (i + 1) };
    }

    for i in 0..SPAN_COUNT {
        let start = offsets[i];
        let stop = stops[i];
        guess(&mut scores[i], &buf[start..stop]);
        modes[i] = select(&scores[i]);
    }

    for bit in 0..4u32 {
        let substep = 1usize << bit;
        let step = substep << 1;
        let mut i = 0usize;
        while i < SPAN_COUNT {
            let inner = substep >> 1;
            let next = i + substep;

            if groups[i] != groups[i + inner] || groups[next] != groups[next + inner] {
                i += step;
                continue;
            }

            if modes[i] != modes[next] {
                let cross_diff = absdiff(scores[i].get(modes[i]), scores[i].get(modes[next]))
                    + absdiff(scores[next].get(modes[i]), scores[next].get(modes[next]));
                if cross_diff > margin {
                    i += step;
                    continue;
                }
            }

            for j in i..i + step {
                groups[j] = i as u8;
            }
            let start = offsets[i];
            let stop = stops[i];
            guess(&mut scores[i], &buf[start..stop]);
            let mode = select(&scores[i]);
            modes[i] = mode;
            modes[next] = mode;
            stops[i] = stops[next];
            offsets[next] = stops[next];

            i += step;
        }
    }

    let mut results = ContextSpan {
        offsets: [0; SPAN_COUNT],
        modes: [SpanMode::ModeMax; SPAN_COUNT],
        count: 0,
        total_bytes: buf_len,
    };
    let mut last_group: i32 = -1;
    for i in 0..SPAN_COUNT {
        if i32::from(groups[i]) == last_group || offsets[i] == stops[i] {
            continue;
        }
        last_group = i32::from(groups[i]);
        let current = results.count;
        results.offsets[current] = offsets[i];
        results.modes[current] = SpanMode::Mode(modes[i]);
        results.count += 1;
    }
    for i in results.count..SPAN_COUNT {
        results.offsets[i] = buf_len;
        results.modes[i] = SpanMode::ModeMax;
    }
    debug_assert!(results.count <= SPAN_COUNT);
    debug_assert!(results.offsets[..results.count].windows(2).all(|w| w[0] < w[1]));
    results
}
