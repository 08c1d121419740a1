//! Gesture to domain proposal translation
//!
//! Pans carry the pixel translation since the last recorded transform. Zooms
//! carry a fixed step `d_zoom` applied with opposite signs to the two domain
//! edges, so the domain grows or shrinks about its center.

use super::gesture::{classify, GestureClassification, GestureState, ZoomTransform};
use shared::{DomainChange, DomainProposal};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProposalBuilder {
    d_zoom: f64,
}

impl ProposalBuilder {
    pub fn new(d_zoom: f64) -> Self {
        ProposalBuilder { d_zoom }
    }

    pub fn d_zoom(&self) -> f64 {
        self.d_zoom
    }

    /// Build the proposal for `current` without touching `state`.
    ///
    /// Returns `None` when neither scale nor translation moved since the last
    /// recorded transform.
    pub fn propose(
        &self,
        classification: GestureClassification,
        state: &GestureState,
        current: ZoomTransform,
    ) -> Option<DomainProposal> {
        let scale_changed = current.scale != state.last_scale;
        let translation_changed = current.translation != state.last_translation;
        if !scale_changed && !translation_changed {
            return None;
        }

        let change = if classification.is_pan {
            DomainChange::Pan {
                shift: current.translation - state.last_translation,
            }
        } else {
            let step = classification.zoom_direction.sign() * self.d_zoom;
            DomainChange::Zoom {
                delta_left: step,
                delta_right: -step,
            }
        };

        Some(DomainProposal {
            id: state.last_proposal_id + 1,
            change,
        })
    }

    /// Classify `current` against `state`, build the proposal and record the
    /// new baseline when one is emitted.
    pub fn advance(&self, state: &mut GestureState, current: ZoomTransform) -> Option<DomainProposal> {
        let classification = classify(state.last_transform(), current);
        let proposal = self.propose(classification, state, current)?;
        state.record(current, proposal.id);
        Some(proposal)
    }
}
