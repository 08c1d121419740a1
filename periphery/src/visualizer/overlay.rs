//! Overlay capability for panel rendering
//!
//! A panel is drawn as an ordered stack of overlays. Each overlay turns the
//! panel's observations into pixel-space geometry; the renderer only strokes
//! or fills what it gets back.

use crate::visualizer::timeline::{
    compute_envelope, EnvelopeParams, EnvelopePoint, LinearScale, ScaleMapper, TimeScale,
};
use shared::{Observation, TimeDomain};
use std::fmt;
use std::sync::Arc;

/// Scales of one panel: time horizontally, value vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelScales {
    pub time: TimeScale,
    pub value: LinearScale,
}

impl PanelScales {
    pub fn point(&self, observation: &Observation) -> (f64, f64) {
        (
            self.time.forward(observation.time),
            self.value.forward(observation.value),
        )
    }
}

/// Pixel-space geometry produced by an overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Connected line through the points, in order.
    Polyline(Vec<(f64, f64)>),
    /// Filled area between two edges sharing x positions.
    Band {
        upper: Vec<(f64, f64)>,
        lower: Vec<(f64, f64)>,
    },
}

impl Shape {
    pub fn is_empty(&self) -> bool {
        match self {
            Shape::Polyline(points) => points.is_empty(),
            Shape::Band { upper, .. } => upper.is_empty(),
        }
    }
}

pub trait Overlay: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn render(&self, observations: &[Observation], domain: TimeDomain, scales: &PanelScales) -> Shape;
}

/// Ordered overlays of one panel, bottom first.
pub type OverlayStack = Vec<Arc<dyn Overlay>>;

/// Raw samples joined in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineOverlay;

impl Overlay for LineOverlay {
    fn name(&self) -> &'static str {
        "line"
    }

    fn render(&self, observations: &[Observation], _domain: TimeDomain, scales: &PanelScales) -> Shape {
        Shape::Polyline(observations.iter().map(|o| scales.point(o)).collect())
    }
}

/// Moving min/max band.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeOverlay {
    params: EnvelopeParams,
}

impl EnvelopeOverlay {
    pub fn new(params: EnvelopeParams) -> Self {
        EnvelopeOverlay { params }
    }
}

impl Overlay for EnvelopeOverlay {
    fn name(&self) -> &'static str {
        "envelope"
    }

    fn render(&self, observations: &[Observation], _domain: TimeDomain, scales: &PanelScales) -> Shape {
        let points = compute_envelope(observations, &self.params);
        let x = |point: &EnvelopePoint| scales.time.forward(point.time);
        Shape::Band {
            upper: points
                .iter()
                .map(|p| (x(p), scales.value.forward(p.upper)))
                .collect(),
            lower: points
                .iter()
                .map(|p| (x(p), scales.value.forward(p.lower)))
                .collect(),
        }
    }
}
