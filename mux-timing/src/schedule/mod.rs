/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule derivation: clock rates and nanosecond constraints in, bus tick
//! offsets out.
//!
//! [`ScheduleDeriver`] converts a [`TimingConfig`] into a [`TickSchedule`]:
//! the number of bus ticks per processor cycle, the strobe midpoint, and the
//! tick at which each constraint is satisfied, placed into a label slot array
//! one entry per tick.
//!
//! ```text
//! tick    0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15
//! phase   |<------ phi1 (low) ------->|   |<------ phi2 (high) ------>|
//! label           1DHR           ADS         2DHR    MDS     DSR
//! ```
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | Inputs | Explicit [`TimingConfig`] value — no global constants, schedules can be derived side by side |
//! | Failure | `Result<TickSchedule, ScheduleError>` — nothing partial escapes |
//! | Label collisions | Every slot keeps all its constraints; [`CollisionPolicy`] only changes the rendered label, and each collision is logged |
//!
//! # Example
//! ```rust
//! use mux_timing::config::TimingConfig;
//! use mux_timing::schedule::{ConstraintKind, ScheduleDeriver};
//!
//! let schedule = ScheduleDeriver::new(TimingConfig::default()).derive().unwrap();
//! assert_eq!(schedule.total_ticks, 16);
//! assert_eq!(schedule.mid_tick, 8);
//! assert_eq!(schedule.offset(ConstraintKind::AddressSetup), Some(6));
//! ```

pub mod error;
pub mod math;

pub use error::ScheduleError;

use std::fmt;

use tracing::{debug, info, warn};

pub use crate::config::CollisionPolicy;
use crate::config::TimingConfig;
use math::{ceil_ticks, checked_ratio, mid_tick, period_ns};

// ── ConstraintKind ────────────────────────────────────────────────────────────

/// The fixed vocabulary of timing constraints placed on the tick track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Address setup, measured from tick 0.
    AddressSetup,
    /// Data hold after the phi1 edge, measured from tick 0.
    DataHoldPre,
    /// Data hold after the phi2 edge, measured from the midpoint.
    DataHoldPost,
    /// Minimum data setup, measured from the midpoint.
    MinDataSetup,
    /// Combined data strobe / chip select release, counted back from the end
    /// of the cycle.
    DataStrobeRelease,
}

impl ConstraintKind {
    /// All constraints in placement order.  Later entries are written to the
    /// label track after earlier ones.
    pub const ALL: [ConstraintKind; 5] = [
        ConstraintKind::AddressSetup,
        ConstraintKind::DataHoldPre,
        ConstraintKind::DataHoldPost,
        ConstraintKind::MinDataSetup,
        ConstraintKind::DataStrobeRelease,
    ];

    /// Short label drawn on the `div` lane.
    pub fn label(self) -> &'static str {
        match self {
            ConstraintKind::AddressSetup => "ADS",
            ConstraintKind::DataHoldPre => "1DHR",
            ConstraintKind::DataHoldPost => "2DHR",
            ConstraintKind::MinDataSetup => "MDS",
            ConstraintKind::DataStrobeRelease => "DSR",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── LabelSlot ─────────────────────────────────────────────────────────────────

/// Constraints landing on one tick, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSlot {
    constraints: Vec<ConstraintKind>,
}

impl LabelSlot {
    pub fn constraints(&self) -> &[ConstraintKind] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// `true` when more than one constraint resolved to this tick.
    pub fn is_collision(&self) -> bool {
        self.constraints.len() > 1
    }

    /// Text drawn for this slot under `policy`.  Empty slots render as `""`.
    pub fn render(&self, policy: CollisionPolicy) -> String {
        match policy {
            CollisionPolicy::Merge => self
                .constraints
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
                .join("/"),
            CollisionPolicy::LastWins => self
                .constraints
                .last()
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
        }
    }
}

// ── TickSchedule ──────────────────────────────────────────────────────────────

/// Derived, read-only result of one derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSchedule {
    /// Processor clock period in ns.
    pub cpu_period_ns: f64,
    /// Bus clock period in ns.
    pub bus_period_ns: f64,
    /// Bus ticks per processor cycle.  Always `>= 1`.
    pub total_ticks: usize,
    /// Start of the first strobe phase.  Always `0`.
    pub phase1_tick: usize,
    /// Start of the second strobe phase, `ceil(total_ticks / 2)`.
    pub mid_tick: usize,
    /// Start of the address output enable window (the ADS offset).
    pub address_setup_tick: usize,
    /// Tick offset of every constraint, in placement order.
    pub offsets: Vec<(ConstraintKind, usize)>,
    /// One slot per tick; `labels.len() == total_ticks`.
    pub labels: Vec<LabelSlot>,
    /// How colliding labels are rendered.
    pub collision_policy: CollisionPolicy,
}

impl TickSchedule {
    /// Tick offset of `kind`.
    pub fn offset(&self, kind: ConstraintKind) -> Option<usize> {
        self.offsets
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, tick)| *tick)
    }

    /// Rendered label for every tick under the schedule's collision policy.
    pub fn label_strings(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|slot| slot.render(self.collision_policy))
            .collect()
    }

    /// Ticks that hold more than one constraint.
    pub fn collisions(&self) -> impl Iterator<Item = (usize, &LabelSlot)> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_collision())
    }
}

// ── ScheduleDeriver ───────────────────────────────────────────────────────────

/// Derives a [`TickSchedule`] from a [`TimingConfig`].
///
/// Holds only its input; [`derive`](Self::derive) allocates everything it
/// returns, so one deriver can be called any number of times.
#[derive(Debug, Clone)]
pub struct ScheduleDeriver {
    config: TimingConfig,
}

impl ScheduleDeriver {
    /// The config is expected to have passed
    /// [`TimingConfig::validate`](crate::config::TimingConfig::validate).
    pub fn new(config: TimingConfig) -> Self {
        Self { config }
    }

    /// Derive the tick schedule.
    ///
    /// # Errors
    /// * [`ScheduleError::NonIntegerRatio`] – the bus does not fit a whole
    ///   number of ticks into one processor cycle.
    /// * [`ScheduleError::TooManyTicks`] – the ratio exceeds
    ///   [`math::MAX_TOTAL_TICKS`].
    /// * [`ScheduleError::OffsetOutOfRange`] – a constraint is too long to be
    ///   met inside one processor cycle.
    pub fn derive(&self) -> Result<TickSchedule, ScheduleError> {
        let rates = &self.config.rates;
        let c = &self.config.constraints;

        let cpu_period_ns = period_ns(rates.cpu_rate_mhz);
        let bus_period_ns = period_ns(rates.bus_rate_mhz);

        let total_ticks = checked_ratio(cpu_period_ns, bus_period_ns)?;
        let mid = mid_tick(total_ticks);

        info!(
            cpu_period_ns,
            bus_period_ns,
            total_ticks,
            mid_tick = mid,
            "Derived cycle division"
        );

        // Saturating: an absurd duration must still land out of range
        let ticks =
            |ns: f64| i64::try_from(ceil_ticks(ns, bus_period_ns)).unwrap_or(i64::MAX);
        let (total, mid_i) = (total_ticks as i64, mid as i64);

        let raw = [
            (ConstraintKind::AddressSetup, ticks(c.t_address_setup)),
            (ConstraintKind::DataHoldPre, ticks(c.t_data_hold_pre)),
            (
                ConstraintKind::DataHoldPost,
                mid_i.saturating_add(ticks(c.t_data_hold_post)),
            ),
            (
                ConstraintKind::MinDataSetup,
                mid_i.saturating_add(ticks(c.t_min_data_setup)),
            ),
            (
                ConstraintKind::DataStrobeRelease,
                total.saturating_sub(ticks(c.t_data_strobe).max(ticks(c.t_chip_select))),
            ),
        ];

        let mut offsets = Vec::with_capacity(raw.len());
        for (constraint, offset) in raw {
            if !(0..total).contains(&offset) {
                warn!(%constraint, offset, total_ticks, "Constraint falls outside the cycle");
                return Err(ScheduleError::OffsetOutOfRange {
                    constraint,
                    offset,
                    total_ticks,
                });
            }
            debug!(%constraint, tick = offset, "  constraint offset");
            offsets.push((constraint, offset as usize));
        }

        let labels = Self::place_labels(total_ticks, &offsets);
        let address_setup_tick = offsets[0].1;

        Ok(TickSchedule {
            cpu_period_ns,
            bus_period_ns,
            total_ticks,
            phase1_tick: 0,
            mid_tick: mid,
            address_setup_tick,
            offsets,
            labels,
            collision_policy: self.config.collision_policy,
        })
    }

    /// Build the per-tick label array.  Offsets are already range-checked.
    fn place_labels(total_ticks: usize, offsets: &[(ConstraintKind, usize)]) -> Vec<LabelSlot> {
        let mut labels = vec![LabelSlot::default(); total_ticks];

        for &(constraint, tick) in offsets {
            let slot = &mut labels[tick];
            if let Some(previous) = slot.constraints.last() {
                warn!(
                    tick,
                    %previous,
                    %constraint,
                    "Label collision: several constraints resolve to the same tick"
                );
            }
            slot.constraints.push(constraint);
        }

        labels
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
