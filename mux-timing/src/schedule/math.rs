/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pure arithmetic helpers: clock periods, the cycle ratio check and ceiling
//! conversion of nanosecond durations into bus ticks.
//!
//! These are free functions rather than methods so they can be used and tested
//! independently of the `ScheduleDeriver`.

use super::ScheduleError;

/// Whole-number tolerance, in units of the quotient's own precision.
///
/// A quotient of two rounded periods carries at most a couple of ULPs of
/// representation error (e.g. `4.000000000000001`); anything further from an
/// integer is a genuine fraction.
pub const ULP_TOLERANCE: f64 = 8.0;

/// Largest accepted number of bus ticks per processor cycle.  Keeps the label
/// array and the diagram lanes at a drawable size.
pub const MAX_TOTAL_TICKS: usize = 65_536;

/// Clock period in nanoseconds for a rate in MHz.
pub fn period_ns(rate_mhz: f64) -> f64 {
    1000.0 / rate_mhz
}

/// Returns `Some(n)` when `value` is within tolerance of the integer `n`.
fn as_whole(value: f64) -> Option<f64> {
    let rounded = value.round();
    if (value - rounded).abs() <= ULP_TOLERANCE * f64::EPSILON * value.abs().max(1.0) {
        Some(rounded)
    } else {
        None
    }
}

/// Number of bus ticks in one processor cycle.
///
/// # Errors
/// * [`ScheduleError::NonIntegerRatio`] unless `cpu_period_ns / bus_period_ns`
///   is a positive whole number.
/// * [`ScheduleError::TooManyTicks`] if that number exceeds [`MAX_TOTAL_TICKS`].
pub fn checked_ratio(cpu_period_ns: f64, bus_period_ns: f64) -> Result<usize, ScheduleError> {
    let ratio = cpu_period_ns / bus_period_ns;

    match as_whole(ratio) {
        Some(n) if n > MAX_TOTAL_TICKS as f64 => Err(ScheduleError::TooManyTicks {
            ratio,
            limit: MAX_TOTAL_TICKS,
        }),
        Some(n) if n >= 1.0 => Ok(n as usize),
        _ => Err(ScheduleError::NonIntegerRatio {
            cpu_period_ns,
            bus_period_ns,
            ratio,
        }),
    }
}

/// Minimum whole number of bus ticks covering `duration_ns`.
///
/// A quotient that is already whole (to tolerance) is not bumped up to the
/// next tick.
pub fn ceil_ticks(duration_ns: f64, bus_period_ns: f64) -> usize {
    let ticks = duration_ns / bus_period_ns;
    as_whole(ticks).unwrap_or_else(|| ticks.ceil()).max(0.0) as usize
}

/// Tick at which the strobe enters its second phase: `ceil(total / 2)`.
pub fn mid_tick(total_ticks: usize) -> usize {
    total_ticks.div_ceil(2)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── period_ns ─────────────────────────────────────────────────────────────

    #[test]
    fn period_of_reference_clocks() {
        assert_eq!(period_ns(8.0), 125.0);
        assert_eq!(period_ns(128.0), 7.8125);
        assert_eq!(period_ns(100.0), 10.0);
    }

    // ── checked_ratio ─────────────────────────────────────────────────────────

    #[test]
    fn ratio_of_exact_multiples() {
        assert_eq!(checked_ratio(125.0, 7.8125).unwrap(), 16);
        assert_eq!(checked_ratio(period_ns(2.0), period_ns(48.0)).unwrap(), 24);
        assert_eq!(checked_ratio(period_ns(8.0), period_ns(8.0)).unwrap(), 1);
    }

    #[test]
    fn ratio_tolerates_float_noise() {
        // 1000/3 and 1000/12 do not divide exactly in binary floating point
        assert_eq!(checked_ratio(period_ns(3.0), period_ns(12.0)).unwrap(), 4);
        assert_eq!(checked_ratio(period_ns(7.0), period_ns(21.0)).unwrap(), 3);
    }

    #[test]
    fn non_integer_ratio_is_rejected() {
        let result = checked_ratio(period_ns(8.0), period_ns(100.0));
        match result {
            Err(ScheduleError::NonIntegerRatio { ratio, .. }) => assert_eq!(ratio, 12.5),
            other => panic!("expected NonIntegerRatio, got {other:?}"),
        }
    }

    #[test]
    fn large_ratio_with_small_fraction_is_rejected() {
        let result = checked_ratio(period_ns(8.0), period_ns(8.0 * 12_500.01));
        assert!(matches!(result, Err(ScheduleError::NonIntegerRatio { .. })));
        let result = checked_ratio(period_ns(8.0), period_ns(8.0 * 12_500_000.01));
        assert!(matches!(result, Err(ScheduleError::NonIntegerRatio { .. })));
    }

    #[test]
    fn ratio_above_tick_limit_is_rejected() {
        let limit = MAX_TOTAL_TICKS as f64;
        assert_eq!(
            checked_ratio(period_ns(1.0), period_ns(limit)).unwrap(),
            MAX_TOTAL_TICKS
        );
        assert!(matches!(
            checked_ratio(period_ns(1.0), period_ns(2.0 * limit)),
            Err(ScheduleError::TooManyTicks { limit: MAX_TOTAL_TICKS, .. })
        ));
        // far beyond usize range of a label array
        assert!(matches!(
            checked_ratio(period_ns(1.0), period_ns(2f64.powi(62))),
            Err(ScheduleError::TooManyTicks { .. })
        ));
    }

    #[test]
    fn bus_slower_than_cpu_is_rejected() {
        // ratio 0.5 rounds to a whole number of zero ticks
        assert!(checked_ratio(period_ns(16.0), period_ns(8.0)).is_err());
        assert!(checked_ratio(period_ns(100.0), period_ns(8.0)).is_err());
    }

    #[test]
    fn every_integer_multiple_gives_that_multiple() {
        for cpu in [1.0, 2.0, 5.0, 8.0, 12.5] {
            for n in 1..=64usize {
                let bus = cpu * n as f64;
                assert_eq!(
                    checked_ratio(period_ns(cpu), period_ns(bus)).unwrap(),
                    n,
                    "cpu={cpu} bus={bus}"
                );
            }
        }
    }

    // ── ceil_ticks ────────────────────────────────────────────────────────────

    #[test]
    fn ceil_ticks_rounds_up() {
        assert_eq!(ceil_ticks(40.0, 7.8125), 6);
        assert_eq!(ceil_ticks(10.0, 7.8125), 2);
        assert_eq!(ceil_ticks(30.0, 7.8125), 4);
        assert_eq!(ceil_ticks(1.0, 7.8125), 1);
    }

    #[test]
    fn ceil_ticks_exact_boundary_stays() {
        assert_eq!(ceil_ticks(15.625, 7.8125), 2);
        assert_eq!(ceil_ticks(30.0, 10.0), 3);
        assert_eq!(ceil_ticks(0.0, 7.8125), 0);
    }

    #[test]
    fn ceil_ticks_rounds_up_small_fractions_of_large_counts() {
        assert_eq!(ceil_ticks(1_000_000.0005, 1.0), 1_000_001);
        assert_eq!(ceil_ticks(40_000.001, 7.8125), 5_121);
    }

    #[test]
    fn ceil_ticks_ignores_float_noise() {
        // 2 × (1000/3) is a whole two ticks
        assert_eq!(ceil_ticks(2000.0 / 3.0, period_ns(3.0)), 2);
    }

    // ── mid_tick ──────────────────────────────────────────────────────────────

    #[test]
    fn mid_tick_is_ceiling_half() {
        for total in 1..=32usize {
            let mid = mid_tick(total);
            assert!(mid > 0 && mid <= total, "total={total} mid={mid}");
            assert_eq!(mid, (total as f64 / 2.0).ceil() as usize);
        }
    }

    #[test]
    fn mid_tick_reference_value() {
        assert_eq!(mid_tick(16), 8);
        assert_eq!(mid_tick(15), 8);
        assert_eq!(mid_tick(1), 1);
    }
}
