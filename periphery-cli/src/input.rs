use anyhow::{Context, Result};
use periphery::visualizer::interaction::{GestureSource, ZoomTransform};
use serde::Deserialize;
use shared::{Observation, PeripheryConfig};
use std::path::Path;

/// One recorded zoom-behaviour event, replayed against `track`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GestureStep {
    pub track: u32,
    pub scale: f64,
    #[serde(default)]
    pub translation: f64,
    #[serde(default)]
    pub source: GestureSource,
}

impl GestureStep {
    pub fn transform(&self) -> ZoomTransform {
        ZoomTransform::new(self.scale, self.translation)
    }
}

pub fn load_config(path: &Path) -> Result<PeripheryConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = PeripheryConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

pub fn load_observations(path: &Path) -> Result<Vec<Observation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read observations: {}", path.display()))?;
    parse_observations(&content)
        .with_context(|| format!("Failed to parse observations: {}", path.display()))
}

pub fn load_gestures(path: &Path) -> Result<Vec<GestureStep>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read gestures: {}", path.display()))?;
    let steps = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse gestures: {}", path.display()))?;
    Ok(steps)
}

/// Parse a JSON array of `{ "time": ms, "value": v }` objects.
///
/// Out-of-order input is sorted by time; samples sharing a timestamp keep
/// their file order.
pub fn parse_observations(content: &str) -> Result<Vec<Observation>> {
    let mut observations: Vec<Observation> = serde_json::from_str(content)?;
    if observations.windows(2).any(|pair| pair[0].time > pair[1].time) {
        log::warn!("observations are not time-sorted, sorting {} samples", observations.len());
        observations.sort_by_key(|o| o.time);
    }
    Ok(observations)
}
