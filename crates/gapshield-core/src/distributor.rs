//! Placement of gap start offsets inside the waking-hours window.

use crate::config::ceil_minutes;
use crate::rng::{random_int_from_seed, SeededRandom};

/// Place `gap_count` start offsets (minutes from the window start) so that
/// a gap of up to `reserved_duration_ms` starting at each offset ends inside
/// the window and at least `min_spacing_ms` before the next one starts.
///
/// Both reservations are taken up front in whole minutes; the leftover slack
/// is split into `gap_count + 1` random partitions (one before each gap plus
/// a trailing one) and accumulated, so the offsets come out strictly
/// increasing without any reordering.
///
/// Feasibility is the caller's job. If the reservations do not fit, the
/// slack is treated as zero and gaps are packed from the window start.
pub fn distribute_gaps_with_spacing(
    rng: &mut SeededRandom,
    gap_count: usize,
    total_window_minutes: i64,
    min_spacing_ms: i64,
    reserved_duration_ms: i64,
) -> Vec<i64> {
    if gap_count == 0 {
        return Vec::new();
    }

    let duration_minutes = ceil_minutes(reserved_duration_ms).max(1);
    let spacing_minutes = ceil_minutes(min_spacing_ms);

    if gap_count == 1 {
        let last_start = (total_window_minutes - duration_minutes).max(0);
        return vec![random_int_from_seed(rng, 0, last_start)];
    }

    let count = gap_count as i64;
    let reserved = count * duration_minutes + (count - 1) * spacing_minutes;
    debug_assert!(
        reserved <= total_window_minutes,
        "gap layout needs {reserved} minutes, window has {total_window_minutes}"
    );
    let slack = (total_window_minutes - reserved).max(0);

    // 1 - draw is in (0, 1], so the weight sum is never zero.
    let weights: Vec<f64> = (0..=gap_count).map(|_| 1.0 - rng.next_f64()).collect();
    let total_weight: f64 = weights.iter().sum();

    let mut offsets = Vec::with_capacity(gap_count);
    let mut cursor = 0i64;
    let mut used = 0i64;
    for weight in &weights[..gap_count] {
        let share = ((slack as f64) * weight / total_weight).floor() as i64;
        let share = share.min(slack - used);
        used += share;
        cursor += share;
        offsets.push(cursor);
        cursor += duration_minutes + spacing_minutes;
    }
    offsets
}
