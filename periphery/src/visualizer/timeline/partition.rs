//! Focus/context partitioning of a track's time domains
//!
//! A track shows `contexts_per_side` context panels on each side of one focus
//! panel. The domain list is ordered left to right with the focus in the
//! middle; every panel filters the track's observations against its own
//! domain widened by the configured padding.

use shared::{DurationMs, Observation, TimeDomain};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("need at least {required} entries for {contexts_per_side} contexts per side, got {actual}")]
    TooFewEntries {
        contexts_per_side: usize,
        required: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelRole {
    LeftContext(usize),
    Focus,
    RightContext(usize),
}

impl PanelRole {
    pub fn is_focus(self) -> bool {
        matches!(self, PanelRole::Focus)
    }
}

impl fmt::Display for PanelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelRole::LeftContext(i) => write!(f, "left[{i}]"),
            PanelRole::Focus => write!(f, "focus"),
            PanelRole::RightContext(i) => write!(f, "right[{i}]"),
        }
    }
}

/// Left contexts, focus and right contexts, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<T> {
    pub left: Vec<T>,
    pub focus: T,
    pub right: Vec<T>,
}

impl<T> Partition<T> {
    /// Split `items` around index `contexts_per_side`. Whatever follows the
    /// focus becomes the right side.
    pub fn split(items: Vec<T>, contexts_per_side: usize) -> Result<Self, PartitionError> {
        let required = contexts_per_side + 1;
        if items.len() < required {
            return Err(PartitionError::TooFewEntries {
                contexts_per_side,
                required,
                actual: items.len(),
            });
        }
        let mut left = items;
        let mut right = left.split_off(contexts_per_side);
        // `right` is non-empty: it holds at least the focus.
        let focus = right.remove(0);
        Ok(Partition { left, focus, right })
    }

    pub fn panel_count(&self) -> usize {
        self.left.len() + 1 + self.right.len()
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Partition<U> {
        Partition {
            left: self.left.iter().map(&mut f).collect(),
            focus: f(&self.focus),
            right: self.right.iter().map(&mut f).collect(),
        }
    }

    /// Every panel with its role, left to right.
    pub fn iter(&self) -> impl Iterator<Item = (PanelRole, &T)> {
        let left = self
            .left
            .iter()
            .enumerate()
            .map(|(i, item)| (PanelRole::LeftContext(i), item));
        let right = self
            .right
            .iter()
            .enumerate()
            .map(|(i, item)| (PanelRole::RightContext(i), item));
        left.chain(std::iter::once((PanelRole::Focus, &self.focus)))
            .chain(right)
    }

    pub fn get(&self, role: PanelRole) -> Option<&T> {
        match role {
            PanelRole::LeftContext(i) => self.left.get(i),
            PanelRole::Focus => Some(&self.focus),
            PanelRole::RightContext(i) => self.right.get(i),
        }
    }
}

/// A panel's nominal domain and the padded domain used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelWindow {
    pub domain: TimeDomain,
    pub padded: TimeDomain,
}

impl PanelWindow {
    pub fn new(domain: TimeDomain, padding: DurationMs) -> Self {
        PanelWindow {
            domain,
            padded: domain.padded(padding),
        }
    }

    /// Observations inside the padded domain, in their original order.
    pub fn select(&self, observations: &[Observation]) -> Vec<Observation> {
        observations
            .iter()
            .filter(|observation| self.padded.contains(observation.time))
            .copied()
            .collect()
    }
}

/// Pad every domain and split them into left contexts, focus and right contexts.
pub fn partition_domains(
    domains: &[TimeDomain],
    contexts_per_side: usize,
    padding: DurationMs,
) -> Result<Partition<PanelWindow>, PartitionError> {
    let windows = domains
        .iter()
        .map(|&domain| PanelWindow::new(domain, padding))
        .collect();
    Partition::split(windows, contexts_per_side)
}

/// Per-panel observation subsets for a partition of windows.
pub fn partition_observations(
    windows: &Partition<PanelWindow>,
    observations: &[Observation],
) -> Partition<Vec<Observation>> {
    windows.map(|window| window.select(observations))
}

/// What a context side uses: one template shared by `count` panels, or one
/// entry per panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextSlots<T> {
    Uniform { template: T, count: usize },
    PerPanel(Vec<T>),
}

impl<T> ContextSlots<T> {
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            ContextSlots::Uniform { template, count } => (index < *count).then_some(template),
            ContextSlots::PerPanel(items) => items.get(index),
        }
    }
}

/// Per-panel rendering stacks for one track.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingPlan<T> {
    pub left: ContextSlots<T>,
    pub focus: T,
    pub right: ContextSlots<T>,
}

impl<T: Clone> EncodingPlan<T> {
    /// In uniform mode `encodings` is read as `[left template, .., focus, .., right template]`:
    /// the first entry serves every left context, the last every right context
    /// and the middle one the focus. Otherwise entries map one-to-one onto panels.
    pub fn new(
        encodings: Vec<T>,
        contexts_per_side: usize,
        uniform: bool,
    ) -> Result<Self, PartitionError> {
        if !uniform {
            let partition = Partition::split(encodings, contexts_per_side)?;
            return Ok(EncodingPlan {
                left: ContextSlots::PerPanel(partition.left),
                focus: partition.focus,
                right: ContextSlots::PerPanel(partition.right),
            });
        }

        let too_few = |required| PartitionError::TooFewEntries {
            contexts_per_side,
            required,
            actual: encodings.len(),
        };
        let focus = encodings
            .get(encodings.len() / 2)
            .cloned()
            .ok_or_else(|| too_few(1))?;
        if contexts_per_side == 0 {
            return Ok(EncodingPlan {
                left: ContextSlots::PerPanel(Vec::new()),
                focus,
                right: ContextSlots::PerPanel(Vec::new()),
            });
        }
        if encodings.len() < 3 {
            return Err(too_few(3));
        }
        match (encodings.first(), encodings.last()) {
            (Some(left), Some(right)) => Ok(EncodingPlan {
                left: ContextSlots::Uniform {
                    template: left.clone(),
                    count: contexts_per_side,
                },
                focus,
                right: ContextSlots::Uniform {
                    template: right.clone(),
                    count: contexts_per_side,
                },
            }),
            _ => Err(too_few(3)),
        }
    }
}

impl<T> EncodingPlan<T> {
    pub fn get(&self, role: PanelRole) -> Option<&T> {
        match role {
            PanelRole::LeftContext(i) => self.left.get(i),
            PanelRole::Focus => Some(&self.focus),
            PanelRole::RightContext(i) => self.right.get(i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TimeMs;

    fn domains(n: i64) -> Vec<TimeDomain> {
        (0..n)
            .map(|i| TimeDomain::from_millis(i * 100, i * 100 + 99))
            .collect()
    }

    #[test]
    fn splits_three_domains_around_focus() {
        let d = domains(3);
        let partition = partition_domains(&d, 1, DurationMs::ZERO).unwrap();
        assert_eq!(partition.left.len(), 1);
        assert_eq!(partition.left[0].domain, d[0]);
        assert_eq!(partition.focus.domain, d[1]);
        assert_eq!(partition.right[0].domain, d[2]);
        assert_eq!(partition.focus.padded, d[1]);
    }

    #[test]
    fn zero_contexts_gives_focus_only() {
        let d = domains(1);
        let partition = partition_domains(&d, 0, DurationMs::ZERO).unwrap();
        assert!(partition.left.is_empty());
        assert!(partition.right.is_empty());
        assert_eq!(partition.focus.domain, d[0]);
        assert_eq!(partition.panel_count(), 1);
    }

    #[test]
    fn too_few_domains_is_an_error() {
        let d = domains(2);
        assert_eq!(
            partition_domains(&d, 2, DurationMs::ZERO),
            Err(PartitionError::TooFewEntries {
                contexts_per_side: 2,
                required: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn padding_is_applied_to_every_panel() {
        let d = domains(5);
        let partition = partition_domains(&d, 2, DurationMs(7)).unwrap();
        for (_, window) in partition.iter() {
            assert_eq!(window.padded.start, window.domain.start - DurationMs(7));
            assert_eq!(window.padded.end, window.domain.end + DurationMs(7));
        }
    }

    #[test]
    fn iter_yields_display_order() {
        let partition = Partition::split(vec!['a', 'b', 'c', 'd', 'e'], 2).unwrap();
        let roles: Vec<_> = partition.iter().map(|(role, &c)| (role, c)).collect();
        assert_eq!(
            roles,
            vec![
                (PanelRole::LeftContext(0), 'a'),
                (PanelRole::LeftContext(1), 'b'),
                (PanelRole::Focus, 'c'),
                (PanelRole::RightContext(0), 'd'),
                (PanelRole::RightContext(1), 'e'),
            ]
        );
    }

    #[test]
    fn filtering_is_inclusive_and_stable() {
        let window = PanelWindow::new(TimeDomain::from_millis(10, 20), DurationMs(5));
        let observations = vec![
            Observation::new(25, 1.0),
            Observation::new(4, 2.0),
            Observation::new(5, 3.0),
            Observation::new(26, 4.0),
            Observation::new(15, 5.0),
        ];
        let selected = window.select(&observations);
        let values: Vec<f64> = selected.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn negative_padding_excludes_edges() {
        let window = PanelWindow::new(TimeDomain::from_millis(0, 10), DurationMs(-1));
        let observations = vec![Observation::new(0, 1.0), Observation::new(5, 2.0)];
        let selected = window.select(&observations);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].time, TimeMs(5));
    }

    #[test]
    fn empty_panel_gets_empty_subset() {
        let d = domains(3);
        let partition = partition_domains(&d, 1, DurationMs::ZERO).unwrap();
        let subsets = partition_observations(&partition, &[Observation::new(150, 1.0)]);
        assert!(subsets.left[0].is_empty());
        assert_eq!(subsets.focus.len(), 1);
        assert!(subsets.right[0].is_empty());
    }

    #[test]
    fn uniform_plan_replicates_side_templates() {
        let plan = EncodingPlan::new(vec!["left", "focus", "right"], 3, true).unwrap();
        assert_eq!(plan.get(PanelRole::LeftContext(2)), Some(&"left"));
        assert_eq!(plan.get(PanelRole::Focus), Some(&"focus"));
        assert_eq!(plan.get(PanelRole::RightContext(0)), Some(&"right"));
    }

    #[test]
    fn uniform_plan_stops_at_context_count() {
        let plan = EncodingPlan::new(vec!["left", "focus", "right"], 2, true).unwrap();
        assert_eq!(
            plan.left,
            ContextSlots::Uniform { template: "left", count: 2 }
        );
        assert_eq!(plan.get(PanelRole::LeftContext(1)), Some(&"left"));
        assert_eq!(plan.get(PanelRole::LeftContext(2)), None);
        assert_eq!(plan.get(PanelRole::RightContext(2)), None);
    }

    #[test]
    fn per_panel_plan_follows_partition() {
        let plan = EncodingPlan::new(vec![1, 2, 3, 4, 5], 2, false).unwrap();
        assert_eq!(plan.get(PanelRole::LeftContext(1)), Some(&2));
        assert_eq!(plan.get(PanelRole::Focus), Some(&3));
        assert_eq!(plan.get(PanelRole::RightContext(1)), Some(&5));
        assert_eq!(plan.get(PanelRole::RightContext(2)), None);
    }

    #[test]
    fn uniform_plan_without_contexts_uses_single_entry() {
        let plan = EncodingPlan::new(vec!["only"], 0, true).unwrap();
        assert_eq!(plan.get(PanelRole::Focus), Some(&"only"));
        assert_eq!(plan.get(PanelRole::LeftContext(0)), None);
    }
}
