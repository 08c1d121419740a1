//! One synchronized focus+context view of a single channel
//!
//! A track owns its gesture state and its copy of the time domains. Gestures
//! on the focus panel become proposals on the bus; proposals from every track
//! (this one included) come back through the track's inbox and are applied
//! when the host calls [`Track::sync`], normally once per frame.

use crate::dataflow::ProposalBus;
use crate::visualizer::interaction::{
    hover_readout, GestureSource, GestureState, HoverReadout, ProposalBuilder, ZoomTransform,
};
use crate::visualizer::overlay::{
    EnvelopeOverlay, LineOverlay, OverlayStack, PanelScales, Shape,
};
use crate::visualizer::timeline::envelope::value_extent;
use crate::visualizer::timeline::{
    partition_domains, partition_observations, EncodingPlan, EnvelopeError, EnvelopeParams,
    LinearScale, PanelRole, PanelWindow, Partition, PartitionError, SyncedDomains, TimeScale,
};
use futures::channel::mpsc::UnboundedReceiver;
use futures::{FutureExt, StreamExt};
use shared::{
    ConfigError, DomainProposal, LayoutSection, Observation, TimeDomain, TrackConfig, TrackId,
    TrackProposal,
};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Partition(#[from] PartitionError),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Everything a renderer needs for one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub role: PanelRole,
    pub window: PanelWindow,
    pub observations: Vec<Observation>,
    pub scales: PanelScales,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPanel {
    pub role: PanelRole,
    pub shapes: Vec<(&'static str, Shape)>,
}

#[derive(Debug)]
pub struct Track {
    id: TrackId,
    config: TrackConfig,
    layout: LayoutSection,
    gesture: GestureState,
    builder: ProposalBuilder,
    bus: ProposalBus,
    inbox: UnboundedReceiver<TrackProposal>,
    domains: SyncedDomains,
}

impl Track {
    /// Validate the configuration, subscribe to `bus` and start from `time_domains`.
    pub fn mount(
        id: TrackId,
        config: TrackConfig,
        layout: LayoutSection,
        time_domains: Vec<TimeDomain>,
        bus: &ProposalBus,
    ) -> Result<Self, TrackError> {
        config.validate()?;
        layout.validate()?;
        let expected = config.panel_count();
        if time_domains.len() != expected {
            return Err(ConfigError::DomainCount {
                contexts_per_side: config.contexts_per_side,
                expected,
                actual: time_domains.len(),
            }
            .into());
        }

        let domains = SyncedDomains::new(time_domains, config.contexts_per_side, layout.focus_width);
        log::debug!("mounting {id} with {expected} panel(s)");
        Ok(Track {
            id,
            builder: ProposalBuilder::new(config.d_zoom),
            gesture: GestureState::default(),
            inbox: bus.subscribe(id),
            bus: bus.clone(),
            config,
            layout,
            domains,
        })
    }

    pub fn id(&self) -> TrackId {
        self.id
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn gesture_state(&self) -> &GestureState {
        &self.gesture
    }

    pub fn time_domains(&self) -> &[TimeDomain] {
        self.domains.domains()
    }

    /// Handle a zoom-behaviour event on the focus panel. Returns the proposal
    /// that was published, if any.
    pub fn on_zoom(&mut self, source: GestureSource, transform: ZoomTransform) -> Option<DomainProposal> {
        if source == GestureSource::Brush {
            log::debug!("{} ignoring brush-driven transform", self.id);
            return None;
        }
        let proposal = self.builder.advance(&mut self.gesture, transform)?;
        log::debug!("{} proposing {:?}", self.id, proposal);
        self.bus.publish(TrackProposal {
            track: self.id,
            proposal,
        });
        Some(proposal)
    }

    /// Apply every proposal delivered since the last call. Returns how many
    /// changed the domains.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        while let Some(Some(proposal)) = self.inbox.next().now_or_never() {
            if self.domains.apply(&proposal) {
                applied += 1;
            }
        }
        applied
    }

    fn focus_scale(&self) -> Option<TimeScale> {
        self.domains
            .focus()
            .map(|focus| TimeScale::new(focus, self.layout.focus_range()))
    }

    /// Time under pointer position `x` of the focus panel.
    pub fn hover(&self, x: f64, label_width: f64) -> Option<HoverReadout> {
        self.focus_scale()
            .map(|scale| hover_readout(&scale, x, label_width))
    }

    /// Partition the current domains and hand each panel its observations and scales.
    ///
    /// The vertical scale spans the whole channel so panels stay comparable.
    pub fn panels(&self, observations: &[Observation]) -> Result<Partition<PanelView>, PartitionError> {
        let windows = partition_domains(
            self.domains.domains(),
            self.config.contexts_per_side,
            self.config.padding(),
        )?;
        let (lo, hi) = value_extent(observations).unwrap_or((0.0, 0.0));
        let value = LinearScale::new((lo, hi), self.layout.value_range());

        let subsets = partition_observations(&windows, observations);

        let views: Vec<PanelView> = windows
            .iter()
            .zip(subsets.iter())
            .map(|((role, window), (_, selected))| {
                let range = if role.is_focus() {
                    self.layout.focus_range()
                } else {
                    self.layout.context_range()
                };
                PanelView {
                    role,
                    window: *window,
                    observations: selected.clone(),
                    scales: PanelScales {
                        time: TimeScale::new(window.domain, range),
                        value,
                    },
                }
            })
            .collect();
        Partition::split(views, self.config.contexts_per_side)
    }

    /// Envelope under a line in the focus, envelope alone in the contexts.
    pub fn standard_plan(&self) -> Result<EncodingPlan<OverlayStack>, TrackError> {
        let params = EnvelopeParams::new(self.config.window_size(), self.config.slide())?;
        let envelope = Arc::new(EnvelopeOverlay::new(params));
        let context: OverlayStack = vec![envelope.clone()];
        let focus: OverlayStack = vec![envelope, Arc::new(LineOverlay)];

        let contexts = self.config.contexts_per_side;
        let encodings = if self.config.apply_context_encodings_uniformly {
            vec![context.clone(), focus, context]
        } else {
            let mut encodings = vec![context.clone(); contexts];
            encodings.push(focus);
            encodings.extend(std::iter::repeat_n(context, contexts));
            encodings
        };
        Ok(EncodingPlan::new(
            encodings,
            contexts,
            self.config.apply_context_encodings_uniformly,
        )?)
    }

    /// Run each panel's overlay stack. Panels without a stack render nothing.
    pub fn render(
        &self,
        observations: &[Observation],
        plan: &EncodingPlan<OverlayStack>,
    ) -> Result<Vec<RenderedPanel>, TrackError> {
        let panels = self.panels(observations)?;
        Ok(panels
            .iter()
            .map(|(role, panel)| RenderedPanel {
                role,
                shapes: plan
                    .get(role)
                    .map(|stack| {
                        stack
                            .iter()
                            .map(|overlay| {
                                (
                                    overlay.name(),
                                    overlay.render(&panel.observations, panel.window.domain, &panel.scales),
                                )
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect())
    }
}
