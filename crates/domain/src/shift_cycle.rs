// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift cycle activity calculation.
//!
//! This module is the single home of the on/off cycle date arithmetic.
//! Every consumer (availability resolution, schedule assembly, the freeze
//! job) calls these functions rather than reimplementing the modulo math,
//! so live endpoints and frozen snapshots can never diverge.

use crate::types::{Porter, Shift};
use time::Date;

/// Computes the zero-based position of `target` within a repeating cycle.
///
/// The position is the day difference from `ground_zero` plus `offset_days`,
/// normalized into `[0, cycle_length)`. Normalization uses Euclidean
/// remainder so dates before the ground zero still produce a valid
/// non-negative position.
///
/// # Arguments
///
/// * `target` - The date to classify
/// * `ground_zero` - The cycle reference date (position 0 before offset)
/// * `offset_days` - Day offset added to the raw difference
/// * `cycle_length` - Full cycle length in days; must be positive
///
/// # Panics
///
/// Debug builds assert that `cycle_length` is positive. A nonpositive
/// cycle length is prevented upstream by shift validation and is treated
/// as a precondition violation, not a recoverable error.
#[must_use]
pub fn cycle_position(target: Date, ground_zero: Date, offset_days: i64, cycle_length: i64) -> i64 {
    debug_assert!(cycle_length > 0, "cycle length must be positive");
    let days_diff: i64 = (target - ground_zero).whole_days();
    (days_diff + offset_days).rem_euclid(cycle_length)
}

/// Returns whether `shift` is on a working day on `date`.
///
/// The shift is active when its cycle position falls inside the leading
/// `days_on` block of the cycle.
#[must_use]
pub fn is_shift_active(date: Date, shift: &Shift) -> bool {
    let position: i64 = cycle_position(
        date,
        shift.ground_zero_date,
        i64::from(shift.shift_offset),
        shift.cycle_length(),
    );
    position < i64::from(shift.days_on)
}

/// Returns whether `porter` is on a working day of `shift` on `date`.
///
/// Identical to [`is_shift_active`] except the ground zero is first advanced
/// by the porter's personal offset. Advancing the ground zero by `k` days is
/// the same as subtracting `k` from the day difference, so this holds:
///
/// `is_porter_active_on_shift(date, porter, shift)
///     == is_shift_active(date - porter_offset days, shift)`
#[must_use]
pub fn is_porter_active_on_shift(date: Date, porter: &Porter, shift: &Shift) -> bool {
    let offset: i64 = i64::from(shift.shift_offset) - i64::from(porter.porter_offset);
    let position: i64 = cycle_position(date, shift.ground_zero_date, offset, shift.cycle_length());
    position < i64::from(shift.days_on)
}
