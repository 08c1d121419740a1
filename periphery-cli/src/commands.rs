use crate::input::GestureStep;
use anyhow::{bail, Result};
use periphery::visualizer::timeline::{compute_envelope, EnvelopeParams, EnvelopePoint};
use periphery::{ProposalBus, Track};
use serde::Serialize;
use shared::{Observation, PeripheryConfig, TimeDomain, TrackConfig, TrackId, TrackProposal};

#[derive(Debug, Serialize)]
pub struct PanelSummary {
    pub role: String,
    pub domain: TimeDomain,
    pub padded: TimeDomain,
    pub observations: usize,
    pub envelope: Vec<EnvelopePoint>,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub proposals: Vec<TrackProposal>,
    /// Final domains of every track, indexed by track id.
    pub domains: Vec<Vec<TimeDomain>>,
}

pub fn envelope(observations: &[Observation], track: &TrackConfig) -> Result<Vec<EnvelopePoint>> {
    let params = EnvelopeParams::new(track.window_size(), track.slide())?;
    let points = compute_envelope(observations, &params);
    log::info!(
        "{} observation(s) -> {} envelope point(s) (window {}, slide {})",
        observations.len(),
        points.len(),
        params.window(),
        params.slide()
    );
    Ok(points)
}

pub fn panels(observations: &[Observation], config: &PeripheryConfig) -> Result<Vec<PanelSummary>> {
    let bus = ProposalBus::new();
    let track = Track::mount(
        TrackId(0),
        config.track.clone(),
        config.layout.clone(),
        config.time_domains.clone(),
        &bus,
    )?;
    let params = EnvelopeParams::new(config.track.window_size(), config.track.slide())?;

    let summaries = track
        .panels(observations)?
        .iter()
        .map(|(role, panel)| PanelSummary {
            role: role.to_string(),
            domain: panel.window.domain,
            padded: panel.window.padded,
            observations: panel.observations.len(),
            envelope: compute_envelope(&panel.observations, &params),
        })
        .collect();
    Ok(summaries)
}

/// Mount `track_count` tracks on one bus and feed them the recorded steps.
/// Every track drains its inbox after each step.
pub fn replay(config: &PeripheryConfig, steps: &[GestureStep], track_count: u32) -> Result<ReplayReport> {
    if track_count == 0 {
        bail!("replay needs at least one track");
    }
    let bus = ProposalBus::new();
    let mut tracks = (0..track_count)
        .map(|id| {
            Track::mount(
                TrackId(id),
                config.track.clone(),
                config.layout.clone(),
                config.time_domains.clone(),
                &bus,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut proposals = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        let Some(track) = tracks.get_mut(step.track as usize) else {
            bail!(
                "step {index} targets track {} but only {track_count} track(s) are mounted",
                step.track
            );
        };
        if let Some(proposal) = track.on_zoom(step.source, step.transform()) {
            proposals.push(TrackProposal {
                track: TrackId(step.track),
                proposal,
            });
        }
        for track in &mut tracks {
            track.sync();
        }
    }

    Ok(ReplayReport {
        proposals,
        domains: tracks
            .iter()
            .map(|track| track.time_domains().to_vec())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use periphery::visualizer::interaction::GestureSource;
    use shared::{LayoutSection, ProposalKind};

    fn config() -> PeripheryConfig {
        PeripheryConfig {
            track: TrackConfig {
                contexts_per_side: 1,
                d_zoom: 0.1,
                padding_ms: 0,
                window_size_ms: 10,
                slide_ms: 5,
                apply_context_encodings_uniformly: false,
            },
            layout: LayoutSection {
                focus_width: 100.0,
                ..LayoutSection::default()
            },
            time_domains: vec![
                TimeDomain::from_millis(0, 100),
                TimeDomain::from_millis(100, 200),
                TimeDomain::from_millis(200, 300),
            ],
        }
    }

    fn step(track: u32, scale: f64, translation: f64) -> GestureStep {
        GestureStep {
            track,
            scale,
            translation,
            source: GestureSource::Pointer,
        }
    }

    #[test]
    fn envelope_uses_track_window() {
        let observations = vec![
            Observation::new(0, 1.0),
            Observation::new(5, 4.0),
            Observation::new(10, 2.0),
            Observation::new(15, 3.0),
        ];
        let points = envelope(&observations, &config().track).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!((points[0].lower, points[0].upper), (1.0, 4.0));
        assert_eq!((points[1].lower, points[1].upper), (2.0, 4.0));
    }

    #[test]
    fn panels_are_listed_left_to_right() {
        let observations: Vec<Observation> =
            (0..300).step_by(10).map(|t| Observation::new(t, 1.0)).collect();
        let summaries = panels(&observations, &config()).unwrap();
        let roles: Vec<&str> = summaries.iter().map(|s| s.role.as_str()).collect();
        assert_eq!(roles, vec!["left[0]", "focus", "right[0]"]);
        assert_eq!(summaries[1].observations, 11);
    }

    #[test]
    fn replay_keeps_tracks_aligned() {
        let steps = vec![step(0, 1.0, 10.0), step(1, 2.0, 10.0), step(1, 2.0, 10.0)];
        let report = replay(&config(), &steps, 2).unwrap();

        assert_eq!(report.proposals.len(), 2);
        assert_eq!(report.proposals[0].proposal.kind(), ProposalKind::Pan);
        assert_eq!(report.proposals[1].proposal.kind(), ProposalKind::Zoom);
        assert_eq!(report.domains[0], report.domains[1]);
    }

    #[test]
    fn replay_rejects_unknown_track() {
        let err = replay(&config(), &[step(3, 1.0, 5.0)], 2).unwrap_err();
        assert!(err.to_string().contains("track 3"));
    }
}
