//! Affine mappings between data domains and pixel ranges
//!
//! Tick generation and "nice" domain rounding belong to the renderer and are not here.

use shared::{TimeDomain, TimeMs};

/// Monotonic, invertible mapping between a data domain and a pixel range.
pub trait ScaleMapper {
    type Value;

    fn forward(&self, value: Self::Value) -> f64;
    fn invert(&self, pixel: f64) -> Self::Value;
}

/// Continuous linear scale over `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// Position of `value` within `[a, b]` as a fraction. A degenerate interval
/// puts everything in the middle.
fn normalize(value: f64, (a, b): (f64, f64)) -> f64 {
    let width = b - a;
    if width == 0.0 {
        0.5
    } else {
        (value - a) / width
    }
}

fn interpolate(t: f64, (a, b): (f64, f64)) -> f64 {
    a + t * (b - a)
}

impl ScaleMapper for LinearScale {
    type Value = f64;

    fn forward(&self, value: f64) -> f64 {
        interpolate(normalize(value, self.domain), self.range)
    }

    fn invert(&self, pixel: f64) -> f64 {
        interpolate(normalize(pixel, self.range), self.domain)
    }
}

/// Linear scale whose domain is a [`TimeDomain`]. Inverted positions are
/// rounded to the nearest millisecond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: TimeDomain,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: TimeDomain, range: (f64, f64)) -> Self {
        TimeScale {
            domain,
            linear: LinearScale::new((domain.start.as_f64(), domain.end.as_f64()), range),
        }
    }

    pub fn domain(&self) -> TimeDomain {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.linear.range()
    }

    /// Milliseconds covered by one pixel. Zero-width ranges report zero.
    pub fn ms_per_pixel(&self) -> f64 {
        let (r0, r1) = self.linear.range();
        let width = r1 - r0;
        if width == 0.0 {
            0.0
        } else {
            self.domain.span().millis() as f64 / width
        }
    }
}

impl ScaleMapper for TimeScale {
    type Value = TimeMs;

    fn forward(&self, value: TimeMs) -> f64 {
        self.linear.forward(value.as_f64())
    }

    fn invert(&self, pixel: f64) -> TimeMs {
        TimeMs::from_f64(self.linear.invert(pixel))
    }
}
