//! Moving min/max envelope over irregularly sampled observations
//!
//! Windows of width `W` are anchored at `min + k*S` for every `k` whose window
//! still ends at or before the last sample. Each non-empty window yields one
//! point at its midpoint carrying the smallest and largest value inside
//! `[ws, ws + W]`. NaN values are skipped, so a window holding only NaN
//! yields no point. Input must already be sorted by time.

use serde::Serialize;
use shared::{DurationMs, Observation, TimeMs};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("envelope window must be positive, got {0}")]
    InvalidWindow(DurationMs),
    #[error("envelope slide must be in (0, {window}], got {slide}")]
    InvalidSlide {
        slide: DurationMs,
        window: DurationMs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvelopePoint {
    pub time: TimeMs,
    pub lower: f64,
    pub upper: f64,
}

/// Window geometry for [`compute_envelope`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeParams {
    window: DurationMs,
    slide: DurationMs,
    band_padding: f64,
}

impl EnvelopeParams {
    pub fn new(window: DurationMs, slide: DurationMs) -> Result<Self, EnvelopeError> {
        if window.millis() <= 0 {
            return Err(EnvelopeError::InvalidWindow(window));
        }
        if slide.millis() <= 0 || slide > window {
            return Err(EnvelopeError::InvalidSlide { slide, window });
        }
        Ok(EnvelopeParams {
            window,
            slide,
            band_padding: 0.0,
        })
    }

    /// Scale bounds outward: `lower * (1 - padding)`, `upper * (1 + padding)`.
    pub fn with_band_padding(mut self, padding: f64) -> Self {
        self.band_padding = padding;
        self
    }

    pub fn window(&self) -> DurationMs {
        self.window
    }

    pub fn slide(&self) -> DurationMs {
        self.slide
    }

    pub fn band_padding(&self) -> f64 {
        self.band_padding
    }
}

/// Indices into the sweep's current window whose values are monotonic, so the
/// front is always the window extreme.
#[derive(Debug, Default)]
struct MonotonicQueue {
    indices: VecDeque<usize>,
}

impl MonotonicQueue {
    /// `dominates(a, b)` is true when `a` makes `b` irrelevant as an extreme.
    fn push(&mut self, index: usize, values: &[Observation], dominates: impl Fn(f64, f64) -> bool) {
        let value = values[index].value;
        while let Some(&back) = self.indices.back() {
            if dominates(value, values[back].value) {
                self.indices.pop_back();
            } else {
                break;
            }
        }
        self.indices.push_back(index);
    }

    fn evict_before(&mut self, start: usize) {
        while self.indices.front().is_some_and(|&front| front < start) {
            self.indices.pop_front();
        }
    }

    fn front(&self) -> Option<usize> {
        self.indices.front().copied()
    }
}

/// Compute the envelope of `observations`, which must be sorted by time.
///
/// Runs a single two-pointer sweep: as the window slides forward, samples
/// enter at the right edge and leave at the left edge exactly once, and the
/// monotonic queues keep the window minimum and maximum at their fronts.
pub fn compute_envelope(observations: &[Observation], params: &EnvelopeParams) -> Vec<EnvelopePoint> {
    let (Some(first), Some(last)) = (observations.first(), observations.last()) else {
        return Vec::new();
    };
    let (min_time, max_time) = (first.time, last.time);

    let mut points = Vec::new();
    let mut lows = MonotonicQueue::default();
    let mut highs = MonotonicQueue::default();
    let mut enter = 0;
    let mut leave = 0;
    let mut window_start = min_time;

    while let Some(window_end) = window_start.checked_add(params.window) {
        if window_end > max_time {
            break;
        }

        while enter < observations.len() && observations[enter].time <= window_end {
            if !observations[enter].value.is_nan() {
                lows.push(enter, observations, |new, old| new <= old);
                highs.push(enter, observations, |new, old| new >= old);
            }
            enter += 1;
        }
        while leave < enter && observations[leave].time < window_start {
            leave += 1;
        }
        lows.evict_before(leave);
        highs.evict_before(leave);

        if let (Some(low), Some(high)) = (lows.front(), highs.front()) {
            points.push(EnvelopePoint {
                time: window_start + params.window.half(),
                lower: observations[low].value * (1.0 - params.band_padding),
                upper: observations[high].value * (1.0 + params.band_padding),
            });
        }

        match window_start.checked_add(params.slide) {
            Some(next) => window_start = next,
            None => break,
        }
    }

    // Band paths are drawn in time order.
    points.sort_by_key(|point| point.time);
    log::trace!(
        "envelope over {} samples: {} points (window {}, slide {})",
        observations.len(),
        points.len(),
        params.window,
        params.slide
    );
    points
}

/// Smallest and largest value, ignoring NaN. `None` when nothing usable remains.
pub fn value_extent(observations: &[Observation]) -> Option<(f64, f64)> {
    observations
        .iter()
        .map(|observation| observation.value)
        .filter(|value| !value.is_nan())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(pairs: &[(i64, f64)]) -> Vec<Observation> {
        pairs.iter().map(|&(t, v)| Observation::new(t, v)).collect()
    }

    fn params(window: i64, slide: i64) -> EnvelopeParams {
        EnvelopeParams::new(DurationMs(window), DurationMs(slide)).unwrap()
    }

    /// Straightforward rescan of every window.
    fn naive(observations: &[Observation], params: &EnvelopeParams) -> Vec<EnvelopePoint> {
        let mut points = Vec::new();
        let (Some(first), Some(last)) = (observations.first(), observations.last()) else {
            return points;
        };
        let mut ws = first.time;
        while ws + params.window() <= last.time {
            let we = ws + params.window();
            let values: Vec<f64> = observations
                .iter()
                .filter(|o| o.time >= ws && o.time <= we && !o.value.is_nan())
                .map(|o| o.value)
                .collect();
            if !values.is_empty() {
                points.push(EnvelopePoint {
                    time: ws + params.window().half(),
                    lower: values.iter().copied().fold(f64::INFINITY, f64::min),
                    upper: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                });
            }
            ws = ws + params.slide();
        }
        points
    }

    #[test]
    fn reference_scenario() {
        let observations = obs(&[(0, 1.0), (1, 5.0), (9, 3.0), (10, 8.0), (19, 2.0)]);
        let points = compute_envelope(&observations, &params(10, 5));
        assert_eq!(
            points,
            vec![
                EnvelopePoint { time: TimeMs(5), lower: 1.0, upper: 8.0 },
                EnvelopePoint { time: TimeMs(10), lower: 3.0, upper: 8.0 },
            ]
        );
    }

    #[test]
    fn empty_input_gives_empty_envelope() {
        assert!(compute_envelope(&[], &params(10, 5)).is_empty());
    }

    #[test]
    fn span_shorter_than_window_gives_nothing() {
        let observations = obs(&[(0, 1.0), (5, 2.0)]);
        assert!(compute_envelope(&observations, &params(10, 5)).is_empty());
    }

    #[test]
    fn empty_windows_are_skipped() {
        // Gap between 2 and 100: windows anchored at 3..=89 see nothing.
        let observations = obs(&[(0, 1.0), (2, 4.0), (100, 7.0), (112, 3.0)]);
        let window_params = params(10, 1);
        let points = compute_envelope(&observations, &window_params);
        assert_eq!(points, naive(&observations, &window_params));
        assert!(points.iter().all(|p| p.time < TimeMs(8) || p.time > TimeMs(94)));
    }

    #[test]
    fn boundary_samples_count_in_both_adjacent_windows() {
        let observations = obs(&[(0, 1.0), (10, 9.0), (20, 2.0)]);
        let points = compute_envelope(&observations, &params(10, 10));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].upper, 9.0);
        assert_eq!(points[1].upper, 9.0);
        assert_eq!(points[1].lower, 2.0);
    }

    #[test]
    fn matches_naive_rescan_on_irregular_series() {
        let observations: Vec<Observation> = (0..200)
            .map(|i: i64| {
                let time = i * 13 + (i * i) % 13;
                Observation::new(time, ((i * 37) % 23) as f64 - 11.0)
            })
            .collect();
        for (window, slide) in [(50, 50), (50, 7), (31, 1), (100, 33)] {
            let window_params = params(window, slide);
            assert_eq!(
                compute_envelope(&observations, &window_params),
                naive(&observations, &window_params),
                "window {window}, slide {slide}"
            );
        }
    }

    #[test]
    fn duplicate_timestamps_are_all_counted() {
        let observations = obs(&[(0, 3.0), (0, -1.0), (5, 2.0), (5, 10.0), (10, 0.0)]);
        let points = compute_envelope(&observations, &params(10, 5));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].lower, -1.0);
        assert_eq!(points[0].upper, 10.0);
    }

    #[test]
    fn nan_values_do_not_shadow_neighbours() {
        let observations = obs(&[(0, 5.0), (1, f64::NAN), (2, 1.0), (3, 9.0)]);
        let points = compute_envelope(&observations, &params(3, 1));
        assert_eq!(
            points,
            vec![EnvelopePoint { time: TimeMs(1), lower: 1.0, upper: 9.0 }]
        );
    }

    #[test]
    fn all_nan_window_is_skipped() {
        let observations = obs(&[(0, 2.0), (5, f64::NAN), (6, f64::NAN), (20, 4.0)]);
        let window_params = params(4, 4);
        let points = compute_envelope(&observations, &window_params);
        assert_eq!(points, naive(&observations, &window_params));
        assert!(points.iter().all(|p| !p.lower.is_nan() && !p.upper.is_nan()));
        assert!(!points.iter().any(|p| p.time == TimeMs(6)));
    }

    #[test]
    fn band_padding_scales_bounds() {
        let observations = obs(&[(0, 10.0), (10, 20.0)]);
        let padded = params(10, 10).with_band_padding(0.5);
        let points = compute_envelope(&observations, &padded);
        assert_eq!(points[0].lower, 5.0);
        assert_eq!(points[0].upper, 30.0);
    }

    #[test]
    fn rejects_invalid_params() {
        assert_eq!(
            EnvelopeParams::new(DurationMs(0), DurationMs(0)),
            Err(EnvelopeError::InvalidWindow(DurationMs(0)))
        );
        assert!(matches!(
            EnvelopeParams::new(DurationMs(10), DurationMs(11)),
            Err(EnvelopeError::InvalidSlide { .. })
        ));
        assert!(EnvelopeParams::new(DurationMs(10), DurationMs(10)).is_ok());
    }

    #[test]
    fn extent_skips_nan() {
        let observations = obs(&[(0, f64::NAN), (1, 4.0), (2, -2.0)]);
        assert_eq!(value_extent(&observations), Some((-2.0, 4.0)));
        assert_eq!(value_extent(&[]), None);
    }
}
