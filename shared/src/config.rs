use crate::{DurationMs, TimeDomain, MS_PER_DAY};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WINDOW_SIZE_MS: i64 = 10 * MS_PER_DAY;
pub const DEFAULT_SLIDE_MS: i64 = 2 * MS_PER_DAY;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("d_zoom must be a positive finite number, got {0}")]
    InvalidZoomStep(f64),
    #[error("window_size_ms must be positive, got {0}")]
    InvalidWindowSize(i64),
    #[error("slide_ms must be in (0, window_size_ms = {window}], got {slide}")]
    InvalidSlide { slide: i64, window: i64 },
    #[error("expected {expected} time domains for {contexts_per_side} contexts per side, got {actual}")]
    DomainCount {
        contexts_per_side: usize,
        expected: usize,
        actual: usize,
    },
    #[error("layout dimension `{name}` must be positive, got {value}")]
    InvalidLayout { name: &'static str, value: f64 },
}

/// Options every track of a view shares.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrackConfig {
    pub contexts_per_side: usize,
    pub d_zoom: f64,
    #[serde(default)]
    pub padding_ms: i64,
    #[serde(default = "default_window_size_ms")]
    pub window_size_ms: i64,
    #[serde(default = "default_slide_ms")]
    pub slide_ms: i64,
    #[serde(default)]
    pub apply_context_encodings_uniformly: bool,
}

fn default_window_size_ms() -> i64 {
    DEFAULT_WINDOW_SIZE_MS
}

fn default_slide_ms() -> i64 {
    DEFAULT_SLIDE_MS
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            contexts_per_side: 1,
            d_zoom: 0.1,
            padding_ms: 0,
            window_size_ms: DEFAULT_WINDOW_SIZE_MS,
            slide_ms: DEFAULT_SLIDE_MS,
            apply_context_encodings_uniformly: false,
        }
    }
}

impl TrackConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.d_zoom.is_finite() && self.d_zoom > 0.0) {
            return Err(ConfigError::InvalidZoomStep(self.d_zoom));
        }
        if self.window_size_ms <= 0 {
            return Err(ConfigError::InvalidWindowSize(self.window_size_ms));
        }
        if self.slide_ms <= 0 || self.slide_ms > self.window_size_ms {
            return Err(ConfigError::InvalidSlide {
                slide: self.slide_ms,
                window: self.window_size_ms,
            });
        }
        Ok(())
    }

    /// Number of panels in a track: every context on both sides plus the focus.
    pub fn panel_count(&self) -> usize {
        2 * self.contexts_per_side + 1
    }

    pub fn padding(&self) -> DurationMs {
        DurationMs(self.padding_ms)
    }

    pub fn window_size(&self) -> DurationMs {
        DurationMs(self.window_size_ms)
    }

    pub fn slide(&self) -> DurationMs {
        DurationMs(self.slide_ms)
    }
}

/// Pixel geometry of one track.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutSection {
    pub focus_width: f64,
    pub context_width: f64,
    pub track_height: f64,
    pub offset_top: f64,
    pub offset_bottom: f64,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            focus_width: 400.0,
            context_width: 120.0,
            track_height: 80.0,
            offset_top: 10.0,
            offset_bottom: 10.0,
        }
    }
}

impl LayoutSection {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("focus_width", self.focus_width),
            ("context_width", self.context_width),
            ("track_height", self.track_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidLayout { name, value });
            }
        }
        Ok(())
    }

    pub fn focus_range(&self) -> (f64, f64) {
        (0.0, self.focus_width)
    }

    pub fn context_range(&self) -> (f64, f64) {
        (0.0, self.context_width)
    }

    /// Vertical pixel range, bottom first so larger values draw higher.
    pub fn value_range(&self) -> (f64, f64) {
        (self.track_height - self.offset_bottom, self.offset_top)
    }
}

/// Top-level view configuration as read from a TOML file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PeripheryConfig {
    pub track: TrackConfig,
    #[serde(default)]
    pub layout: LayoutSection,
    pub time_domains: Vec<TimeDomain>,
}

impl PeripheryConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PeripheryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.track.validate()?;
        self.layout.validate()?;
        let expected = self.track.panel_count();
        if self.time_domains.len() != expected {
            return Err(ConfigError::DomainCount {
                contexts_per_side: self.track.contexts_per_side,
                expected,
                actual: self.time_domains.len(),
            });
        }
        Ok(())
    }
}
