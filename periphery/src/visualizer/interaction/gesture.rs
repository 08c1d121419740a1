//! Zoom transform classification
//!
//! The pointer layer reports a cumulative `{scale, translation}` transform on
//! every wheel or drag event. Two consecutive transforms tell whether the user
//! panned or zoomed: a pan leaves the scale untouched. A transform that changes
//! both is treated purely as a zoom and its translation is dropped; gestures
//! are never split into a combined pan and zoom.

use serde::Deserialize;

/// Cumulative pointer transform of the focus panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub scale: f64,
    pub translation: f64,
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform {
        scale: 1.0,
        translation: 0.0,
    };

    pub fn new(scale: f64, translation: f64) -> Self {
        ZoomTransform { scale, translation }
    }
}

impl Default for ZoomTransform {
    fn default() -> Self {
        ZoomTransform::IDENTITY
    }
}

/// Where a transform came from. Brush selections drive the zoom behaviour
/// programmatically and must not echo back as proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureSource {
    #[default]
    Pointer,
    Brush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Scale grew.
    In,
    /// Scale unchanged.
    None,
    /// Scale shrank.
    Out,
}

impl ZoomDirection {
    /// `-1` for zoom in, `0` for none, `+1` for zoom out.
    pub fn sign(self) -> f64 {
        match self {
            ZoomDirection::In => -1.0,
            ZoomDirection::None => 0.0,
            ZoomDirection::Out => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureClassification {
    pub is_pan: bool,
    pub zoom_direction: ZoomDirection,
}

/// Compare two consecutive transforms by scale alone.
pub fn classify(previous: ZoomTransform, current: ZoomTransform) -> GestureClassification {
    if current.scale == previous.scale {
        GestureClassification {
            is_pan: true,
            zoom_direction: ZoomDirection::None,
        }
    } else if current.scale > previous.scale {
        GestureClassification {
            is_pan: false,
            zoom_direction: ZoomDirection::In,
        }
    } else {
        GestureClassification {
            is_pan: false,
            zoom_direction: ZoomDirection::Out,
        }
    }
}

/// Transient gesture memory of one track.
///
/// Created when the track mounts, updated once per emitted proposal and
/// dropped with the track. Never shared between tracks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub last_scale: f64,
    pub last_translation: f64,
    pub last_proposal_id: u64,
}

impl Default for GestureState {
    fn default() -> Self {
        GestureState {
            last_scale: ZoomTransform::IDENTITY.scale,
            last_translation: ZoomTransform::IDENTITY.translation,
            last_proposal_id: 0,
        }
    }
}

impl GestureState {
    pub fn last_transform(&self) -> ZoomTransform {
        ZoomTransform::new(self.last_scale, self.last_translation)
    }

    /// Remember `transform` as the baseline for the next gesture.
    pub fn record(&mut self, transform: ZoomTransform, proposal_id: u64) {
        self.last_scale = transform.scale;
        self.last_translation = transform.translation;
        self.last_proposal_id = proposal_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_scale_is_pan() {
        let classification = classify(ZoomTransform::new(1.0, 0.0), ZoomTransform::new(1.0, 15.0));
        assert!(classification.is_pan);
        assert_eq!(classification.zoom_direction, ZoomDirection::None);
    }

    #[test]
    fn growing_scale_zooms_in() {
        let classification = classify(ZoomTransform::new(1.0, 0.0), ZoomTransform::new(1.5, 0.0));
        assert!(!classification.is_pan);
        assert_eq!(classification.zoom_direction, ZoomDirection::In);
        assert_eq!(classification.zoom_direction.sign(), -1.0);
    }

    #[test]
    fn shrinking_scale_zooms_out() {
        let classification = classify(ZoomTransform::new(2.0, 0.0), ZoomTransform::new(1.0, 0.0));
        assert_eq!(classification.zoom_direction, ZoomDirection::Out);
        assert_eq!(classification.zoom_direction.sign(), 1.0);
    }

    #[test]
    fn combined_change_is_classified_by_scale() {
        let classification = classify(ZoomTransform::new(1.0, 0.0), ZoomTransform::new(1.2, 40.0));
        assert!(!classification.is_pan);
        assert_eq!(classification.zoom_direction, ZoomDirection::In);
    }

    #[test]
    fn state_starts_at_identity() {
        let state = GestureState::default();
        assert_eq!(state.last_transform(), ZoomTransform::IDENTITY);
        assert_eq!(state.last_proposal_id, 0);
    }
}
