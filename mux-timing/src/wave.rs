/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Waveform encoding for the diagram lanes.
//!
//! A lane starts as one [`Level`] per tick.  Two transformations turn it into
//! the compact form the diagram tool draws:
//!
//! 1. **Boundary extension** – one extra sample on each side, so the first and
//!    last columns line up with the padded tick and label lanes
//!    ([`wraparound`] repeats the edge samples, [`periodic_wraparound`] shows
//!    the neighbouring cycles).
//! 2. **Run compression** – [`compress`] keeps the first sample and replaces
//!    every sample equal to its predecessor with [`WaveStep::Hold`].
//!
//! Characters only appear in [`SignalTrace::render`]; everything before that
//! works on typed values.

use std::fmt;

// ── Levels and steps ──────────────────────────────────────────────────────────

/// Logic level of a signal during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// One column of a compressed waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStep<T> {
    /// A literal sample.
    Value(T),
    /// Same as the previous column.
    Hold,
}

/// Which level means "asserted".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    pub fn level(self, asserted: bool) -> Level {
        match (self, asserted) {
            (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => Level::High,
            (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => Level::Low,
        }
    }
}

/// Glyph set used when rendering levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyphs {
    /// `1` / `0` – plain data-style levels.
    Binary,
    /// `h` / `l` – levels drawn with edge arrows, used for the strobe.
    Strobe,
}

impl Glyphs {
    pub fn glyph(self, level: Level) -> char {
        match (self, level) {
            (Glyphs::Binary, Level::High) => '1',
            (Glyphs::Binary, Level::Low) => '0',
            (Glyphs::Strobe, Level::High) => 'h',
            (Glyphs::Strobe, Level::Low) => 'l',
        }
    }
}

/// Continuation marker for [`WaveStep::Hold`].
pub const HOLD_GLYPH: char = '.';

// ── Sequence transformations ──────────────────────────────────────────────────

/// Repeat the first sample in front and the last sample behind.
///
/// An empty input stays empty.
pub fn wraparound<T: Copy>(samples: &[T]) -> Vec<T> {
    match (samples.first(), samples.last()) {
        (Some(&first), Some(&last)) => {
            let mut out = Vec::with_capacity(samples.len() + 2);
            out.push(first);
            out.extend_from_slice(samples);
            out.push(last);
            out
        }
        _ => Vec::new(),
    }
}

/// Put the last sample in front and the first sample behind, as seen when the
/// cycle repeats.  An empty input stays empty.
pub fn periodic_wraparound<T: Copy>(samples: &[T]) -> Vec<T> {
    match (samples.first(), samples.last()) {
        (Some(&first), Some(&last)) => {
            let mut out = Vec::with_capacity(samples.len() + 2);
            out.push(last);
            out.extend_from_slice(samples);
            out.push(first);
            out
        }
        _ => Vec::new(),
    }
}

/// Run-compress `samples`.  Sequences shorter than three are kept literal.
pub fn compress<T: Copy + PartialEq>(samples: &[T]) -> Vec<WaveStep<T>> {
    if samples.len() <= 2 {
        return samples.iter().copied().map(WaveStep::Value).collect();
    }

    let mut steps = Vec::with_capacity(samples.len());
    steps.push(WaveStep::Value(samples[0]));
    for pair in samples.windows(2) {
        steps.push(if pair[1] == pair[0] {
            WaveStep::Hold
        } else {
            WaveStep::Value(pair[1])
        });
    }
    steps
}

/// Inverse of [`compress`].  A leading `Hold` has nothing to repeat and is
/// dropped.
pub fn expand<T: Copy>(steps: &[WaveStep<T>]) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(steps.len());
    for step in steps {
        match *step {
            WaveStep::Value(v) => out.push(v),
            WaveStep::Hold => {
                if let Some(&prev) = out.last() {
                    out.push(prev);
                }
            }
        }
    }
    out
}

// ── SignalTrace ───────────────────────────────────────────────────────────────

/// How a lane's edges are extended before compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// See [`wraparound`].
    Repeat,
    /// See [`periodic_wraparound`].
    Periodic,
}

/// A compressed, boundary-extended lane.  `len() == ticks + 2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalTrace {
    steps: Vec<WaveStep<Level>>,
    glyphs: Glyphs,
}

impl SignalTrace {
    pub fn from_samples(samples: &[Level], boundary: Boundary, glyphs: Glyphs) -> Self {
        let extended = match boundary {
            Boundary::Repeat => wraparound(samples),
            Boundary::Periodic => periodic_wraparound(samples),
        };
        Self {
            steps: compress(&extended),
            glyphs,
        }
    }

    pub fn steps(&self) -> &[WaveStep<Level>] {
        &self.steps
    }

    /// Boundary-extended levels, one per column.
    pub fn levels(&self) -> Vec<Level> {
        expand(&self.steps)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Text form, e.g. `1......0.1........`.
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(|step| match step {
                WaveStep::Value(level) => self.glyphs.glyph(*level),
                WaveStep::Hold => HOLD_GLYPH,
            })
            .collect()
    }
}

impl fmt::Display for SignalTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ── Lane builders ─────────────────────────────────────────────────────────────

/// A signal asserted for `width` ticks beginning at `start`.
///
/// The window wraps past the end of the cycle into tick 0.
pub fn window_trace(
    total_ticks: usize,
    start: usize,
    width: usize,
    polarity: Polarity,
) -> SignalTrace {
    let samples: Vec<Level> = (0..total_ticks)
        .map(|tick| {
            let active = (0..width).any(|k| (start + k) % total_ticks == tick);
            polarity.level(active)
        })
        .collect();

    SignalTrace::from_samples(&samples, Boundary::Repeat, Glyphs::Binary)
}

/// The two-phase strobe: low for `[0, mid_tick)`, high for the remainder.
pub fn strobe_trace(total_ticks: usize, mid_tick: usize) -> SignalTrace {
    let samples: Vec<Level> = (0..total_ticks)
        .map(|tick| if tick < mid_tick { Level::Low } else { Level::High })
        .collect();

    SignalTrace::from_samples(&samples, Boundary::Periodic, Glyphs::Strobe)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
