use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

mod config;

pub use config::{
    ConfigError, LayoutSection, PeripheryConfig, TrackConfig, DEFAULT_SLIDE_MS, DEFAULT_WINDOW_SIZE_MS,
};

// ===== TIME TYPES =====

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// A point in time as milliseconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct TimeMs(pub i64);

impl TimeMs {
    pub const ZERO: TimeMs = TimeMs(0);

    pub fn from_millis(millis: i64) -> Self {
        TimeMs(millis)
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Rounds a fractional millisecond position back onto the integer grid.
    pub fn from_f64(millis: f64) -> Self {
        TimeMs(millis.round() as i64)
    }

    pub fn duration_since(self, earlier: TimeMs) -> DurationMs {
        DurationMs(self.0.saturating_sub(earlier.0))
    }

    pub fn checked_add(self, duration: DurationMs) -> Option<TimeMs> {
        self.0.checked_add(duration.0).map(TimeMs)
    }
}

impl Add<DurationMs> for TimeMs {
    type Output = TimeMs;

    fn add(self, rhs: DurationMs) -> TimeMs {
        TimeMs(self.0.saturating_add(rhs.0))
    }
}

impl Sub<DurationMs> for TimeMs {
    type Output = TimeMs;

    fn sub(self, rhs: DurationMs) -> TimeMs {
        TimeMs(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for TimeMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Signed span of time in milliseconds. Padding may be negative, so this is not unsigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct DurationMs(pub i64);

impl DurationMs {
    pub const ZERO: DurationMs = DurationMs(0);

    pub fn from_millis(millis: i64) -> Self {
        DurationMs(millis)
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn half(self) -> DurationMs {
        DurationMs(self.0 / 2)
    }
}

impl Neg for DurationMs {
    type Output = DurationMs;

    fn neg(self) -> DurationMs {
        DurationMs(self.0.saturating_neg())
    }
}

impl fmt::Display for DurationMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.0;
        if ms != 0 && ms % MS_PER_DAY == 0 {
            write!(f, "{}d", ms / MS_PER_DAY)
        } else if ms != 0 && ms % MS_PER_HOUR == 0 {
            write!(f, "{}h", ms / MS_PER_HOUR)
        } else if ms != 0 && ms % MS_PER_SECOND == 0 {
            write!(f, "{}s", ms / MS_PER_SECOND)
        } else {
            write!(f, "{}ms", ms)
        }
    }
}

/// Inclusive time interval `[start, end]`.
///
/// `start <= end` is the caller's responsibility; nothing here reorders or
/// rejects an inverted domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeDomain {
    pub start: TimeMs,
    pub end: TimeMs,
}

impl TimeDomain {
    pub fn new(start: TimeMs, end: TimeMs) -> Self {
        TimeDomain { start, end }
    }

    pub fn from_millis(start: i64, end: i64) -> Self {
        TimeDomain::new(TimeMs(start), TimeMs(end))
    }

    pub fn span(self) -> DurationMs {
        self.end.duration_since(self.start)
    }

    /// `[start - padding, end + padding]`. Negative padding shrinks the domain.
    pub fn padded(self, padding: DurationMs) -> Self {
        TimeDomain {
            start: self.start - padding,
            end: self.end + padding,
        }
    }

    pub fn contains(self, time: TimeMs) -> bool {
        time >= self.start && time <= self.end
    }

    pub fn shifted(self, offset: DurationMs) -> Self {
        TimeDomain {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

impl fmt::Display for TimeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

// ===== DATA TYPES =====

/// One sample of a channel. Values are not validated; NaN flows through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub time: TimeMs,
    pub value: f64,
}

impl Observation {
    pub fn new(time: i64, value: f64) -> Self {
        Observation {
            time: TimeMs(time),
            value,
        }
    }
}

/// Identifies a track on the proposal bus.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TrackId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track#{}", self.0)
    }
}

// ===== PROPOSAL TYPES =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalKind {
    Pan,
    Zoom,
}

/// Requested change to the shared time domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomainChange {
    /// Horizontal translation in focus-panel pixels.
    Pan { shift: f64 },
    /// Edge displacements as fractions of each domain's span; always `delta_left == -delta_right`.
    Zoom { delta_left: f64, delta_right: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainProposal {
    pub id: u64,
    #[serde(flatten)]
    pub change: DomainChange,
}

impl DomainProposal {
    pub fn kind(&self) -> ProposalKind {
        match self.change {
            DomainChange::Pan { .. } => ProposalKind::Pan,
            DomainChange::Zoom { .. } => ProposalKind::Zoom,
        }
    }

    pub fn shift(&self) -> Option<f64> {
        match self.change {
            DomainChange::Pan { shift } => Some(shift),
            DomainChange::Zoom { .. } => None,
        }
    }

    pub fn zoom_deltas(&self) -> Option<(f64, f64)> {
        match self.change {
            DomainChange::Pan { .. } => None,
            DomainChange::Zoom {
                delta_left,
                delta_right,
            } => Some((delta_left, delta_right)),
        }
    }
}

/// A proposal tagged with the track that published it. Ids are only ordered per publisher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackProposal {
    pub track: TrackId,
    pub proposal: DomainProposal,
}
