/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! WaveDrom diagram assembly.
//!
//! Five lanes, each `total_ticks + 2` columns wide (one boundary column on
//! either side of the cycle):
//!
//! | Lane | Content |
//! |---|---|
//! | *(unnamed)* | tick index: `n-1, 0, 1, …, n-1, 0` |
//! | `div` | constraint labels, empty boundary columns |
//! | `clk` | one bus clock pulse per column |
//! | `phi2` | processor strobe, switching at the midpoint |
//! | `CPU_A_nOE` | address output enable, low for two ticks from ADS |

use serde::Serialize;

use crate::schedule::TickSchedule;
use crate::wave::{strobe_trace, window_trace, Polarity, SignalTrace};

pub const DIV_LANE: &str = "div";
pub const CLOCK_LANE: &str = "clk";
pub const STROBE_LANE: &str = "phi2";
pub const ADDRESS_ENABLE_LANE: &str = "CPU_A_nOE";

/// Ticks the address output enable stays asserted.
pub const ADDRESS_ENABLE_WIDTH: usize = 2;

/// One cell of a lane's `data` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DataCell {
    Tick(usize),
    Label(String),
}

/// One lane (`signal` entry) of the diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lane {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub wave: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataCell>,
}

impl Lane {
    fn named(name: &str, wave: String) -> Self {
        Self {
            name: Some(name.to_string()),
            wave,
            data: Vec::new(),
        }
    }

    fn trace(name: &str, trace: &SignalTrace) -> Self {
        Self::named(name, trace.render())
    }
}

/// Top-level WaveDrom document: `{"signal": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagram {
    pub signal: Vec<Lane>,
}

impl Diagram {
    pub fn from_schedule(schedule: &TickSchedule) -> Self {
        let n = schedule.total_ticks;
        let data_wave = "=".repeat(n + 2);

        let tick_lane = Lane {
            name: None,
            wave: data_wave.clone(),
            data: std::iter::once(n - 1)
                .chain(0..n)
                .chain(std::iter::once(0))
                .map(DataCell::Tick)
                .collect(),
        };

        let div_lane = Lane {
            data: std::iter::once(String::new())
                .chain(schedule.label_strings())
                .chain(std::iter::once(String::new()))
                .map(DataCell::Label)
                .collect(),
            ..Lane::named(DIV_LANE, data_wave)
        };

        let clock_lane = Lane::named(CLOCK_LANE, format!("p{}", ".".repeat(n + 1)));

        let strobe = strobe_trace(n, schedule.mid_tick);

        let address_enable = window_trace(
            n,
            schedule.address_setup_tick,
            ADDRESS_ENABLE_WIDTH,
            Polarity::ActiveLow,
        );

        Self {
            signal: vec![
                tick_lane,
                div_lane,
                clock_lane,
                Lane::trace(STROBE_LANE, &strobe),
                Lane::trace(ADDRESS_ENABLE_LANE, &address_enable),
            ],
        }
    }

    /// Compact JSON on a single line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn lane(&self, name: &str) -> Option<&Lane> {
        self.signal
            .iter()
            .find(|lane| lane.name.as_deref() == Some(name))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
