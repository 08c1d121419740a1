//! Applying bus proposals to a track's copy of the time domains
//!
//! Every track keeps its own domain list and folds in proposals as they
//! arrive. Ids are only ordered per publisher, so each publisher's last applied
//! id is remembered and anything not newer is dropped.

use super::scale::TimeScale;
use shared::{DomainChange, DurationMs, TimeDomain, TimeMs, TrackId, TrackProposal};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct SyncedDomains {
    domains: Vec<TimeDomain>,
    focus_index: usize,
    focus_width: f64,
    applied: HashMap<TrackId, u64>,
}

impl SyncedDomains {
    /// `focus_index` is the number of contexts per side; `focus_width` the
    /// pixel width pan shifts are measured in.
    pub fn new(domains: Vec<TimeDomain>, focus_index: usize, focus_width: f64) -> Self {
        SyncedDomains {
            domains,
            focus_index,
            focus_width,
            applied: HashMap::new(),
        }
    }

    pub fn domains(&self) -> &[TimeDomain] {
        &self.domains
    }

    pub fn focus(&self) -> Option<TimeDomain> {
        self.domains.get(self.focus_index).copied()
    }

    pub fn last_applied(&self, track: TrackId) -> Option<u64> {
        self.applied.get(&track).copied()
    }

    /// Apply `proposal` unless an equal or newer id from the same publisher
    /// was already applied. Returns whether it was applied.
    pub fn apply(&mut self, proposal: &TrackProposal) -> bool {
        let id = proposal.proposal.id;
        if self
            .last_applied(proposal.track)
            .is_some_and(|last| id <= last)
        {
            log::debug!(
                "ignoring stale proposal #{id} from {} (already at #{:?})",
                proposal.track,
                self.last_applied(proposal.track)
            );
            return false;
        }
        self.applied.insert(proposal.track, id);

        match proposal.proposal.change {
            DomainChange::Pan { shift } => self.pan(shift),
            DomainChange::Zoom {
                delta_left,
                delta_right,
            } => self.zoom(delta_left, delta_right),
        }
        true
    }

    /// Dragging content right by `shift` pixels reveals earlier time, so every
    /// domain moves back by the matching focus-scale duration.
    fn pan(&mut self, shift: f64) {
        let Some(focus) = self.focus() else {
            return;
        };
        let scale = TimeScale::new(focus, (0.0, self.focus_width));
        let offset = DurationMs((-shift * scale.ms_per_pixel()).round() as i64);
        for domain in &mut self.domains {
            *domain = domain.shifted(offset);
        }
    }

    /// Both edges move earlier by their delta times the domain's span. With
    /// `delta_left == -delta_right` the domain grows or shrinks about its center.
    fn zoom(&mut self, delta_left: f64, delta_right: f64) {
        for domain in &mut self.domains {
            let span = domain.span().millis() as f64;
            let start = domain.start.as_f64() - delta_left * span;
            let end = domain.end.as_f64() - delta_right * span;
            *domain = TimeDomain::new(TimeMs::from_f64(start), TimeMs::from_f64(end));
        }
    }
}
