/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Human-readable output document.
//!
//! The document echoes every specified input, the values derived from them,
//! and finally the diagram JSON:
//!
//! ```text
//! ==================== SPECIFIED VALUES =================================
//! CPU_speed       :           8 MHz
//! FB_speed        :         128 MHz
//! T_ADS           :          40ns
//! ...
//! ==================== CALCULATED VALUES ================================
//! CPU_period      :         125ns
//! FB_period       :      7.8125ns
//! D_TOTAL         :          16
//! ...
//! {"signal":[...]}
//! ```

use crate::config::TimingConfig;
use crate::diagram::Diagram;
use crate::schedule::TickSchedule;

pub const SPECIFIED_HEADER: &str =
    "==================== SPECIFIED VALUES =================================";
pub const CALCULATED_HEADER: &str =
    "==================== CALCULATED VALUES ================================";

/// Field width and significant digits of every echoed number.
const WIDTH: usize = 12;
const PRECISION: usize = 10;

/// Format `value` like C's `%{width}.{precision}g`: at most `precision`
/// significant digits, trailing zeros removed, scientific notation for very
/// large or small magnitudes, right-aligned in `width` columns.
pub fn format_sig(value: f64, width: usize, precision: usize) -> String {
    format!("{:>width$}", sig_digits(value, precision.max(1)))
}

fn sig_digits(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Exponent after rounding to `precision` digits, e.g. "9.999999999e2"
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn value_line(name: &str, value: f64, unit: &str) -> String {
    format!("{:<16}:{}{}", name, format_sig(value, WIDTH, PRECISION), unit)
}

fn tick_line(name: &str, tick: usize) -> String {
    format!("{:<16}:{:>WIDTH$}", name, tick)
}

/// Lines echoing the configured rates and constraints.
pub fn specified_values(config: &TimingConfig) -> Vec<String> {
    let r = &config.rates;
    let c = &config.constraints;
    vec![
        SPECIFIED_HEADER.to_string(),
        value_line("CPU_speed", r.cpu_rate_mhz, " MHz"),
        value_line("FB_speed", r.bus_rate_mhz, " MHz"),
        String::new(),
        value_line("T_ADS", c.t_address_setup, "ns"),
        value_line("T_1DHR", c.t_data_hold_pre, "ns"),
        value_line("T_2DHR", c.t_data_hold_post, "ns"),
        value_line("T_MDS", c.t_min_data_setup, "ns"),
        value_line("T_DSR", c.t_data_strobe, "ns"),
        value_line("T_PCS", c.t_chip_select, "ns"),
    ]
}

/// Lines echoing the derived periods and tick offsets.
pub fn calculated_values(schedule: &TickSchedule) -> Vec<String> {
    let mut lines = vec![
        CALCULATED_HEADER.to_string(),
        value_line("CPU_period", schedule.cpu_period_ns, "ns"),
        value_line("FB_period", schedule.bus_period_ns, "ns"),
        String::new(),
        tick_line("D_TOTAL", schedule.total_ticks),
        tick_line("D_PHI1", schedule.phase1_tick),
        tick_line("D_PHI2", schedule.mid_tick),
    ];
    lines.extend(
        schedule
            .offsets
            .iter()
            .map(|(kind, tick)| tick_line(&format!("D_{}", kind.label()), *tick)),
    );
    for (tick, slot) in schedule.collisions() {
        let names: Vec<_> = slot.constraints().iter().map(|c| c.label()).collect();
        lines.push(format!("WARNING: tick {} shared by {}", tick, names.join(", ")));
    }
    lines
}

/// Full output document, newline-terminated.
pub fn render_document(
    config: &TimingConfig,
    schedule: &TickSchedule,
    diagram: &Diagram,
    pretty: bool,
) -> serde_json::Result<String> {
    let json = if pretty {
        diagram.to_json_pretty()?
    } else {
        diagram.to_json()?
    };

    let mut lines = specified_values(config);
    lines.push(String::new());
    lines.extend(calculated_values(schedule));
    lines.push(String::new());
    lines.push(json);

    let mut doc = lines.join("\n");
    doc.push('\n');
    Ok(doc)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
