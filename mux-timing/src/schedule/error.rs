/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for schedule derivation.
//!
//! Derivation is all-or-nothing: any variant aborts the run before a
//! [`TickSchedule`](super::TickSchedule) exists, so no partial diagram is ever
//! produced.

use thiserror::Error;

use super::ConstraintKind;

/// Error returned by [`ScheduleDeriver::derive()`](super::ScheduleDeriver::derive).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The bus does not complete a whole number of ticks in one processor
    /// cycle.
    #[error(
        "configuration error: cpu period {cpu_period_ns}ns / bus period {bus_period_ns}ns = {ratio} \
         is not a whole number of bus ticks"
    )]
    NonIntegerRatio {
        cpu_period_ns: f64,
        bus_period_ns: f64,
        ratio: f64,
    },

    /// The cycle ratio is whole but larger than the drawable tick limit.
    #[error("configuration error: {ratio} bus ticks per cpu cycle exceeds the limit of {limit}")]
    TooManyTicks { ratio: f64, limit: usize },

    /// A constraint resolves to a tick outside the processor cycle.
    ///
    /// `offset` is signed because the from-the-end constraint can count back
    /// past tick 0.
    #[error("constraint {constraint} resolves to tick {offset}, outside the cycle of {total_ticks} ticks")]
    OffsetOutOfRange {
        constraint: ConstraintKind,
        offset: i64,
        total_ticks: usize,
    },
}
