//! Synchronized focus+context time-series tracks
//!
//! Each track shows a zoomed-in focus panel between zoomed-out context panels.
//! Pointer gestures on any focus panel become versioned domain proposals that
//! every track applies, keeping the views aligned. Panels are drawn as stacks
//! of overlays, including a moving min/max envelope.
//!
//! - [`dataflow`] carries proposals between tracks.
//! - [`visualizer::timeline`] holds scales, partitioning, the envelope
//!   aggregator and the synced domain list.
//! - [`visualizer::interaction`] turns zoom transforms into proposals.
//! - [`track::Track`] wires all of it together for one channel.

pub mod dataflow;
pub mod track;
pub mod visualizer;

pub use dataflow::ProposalBus;
pub use track::{PanelView, RenderedPanel, Track, TrackError};
