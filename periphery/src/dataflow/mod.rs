//! Cross-track dataflow
//!
//! Tracks never share mutable state. Everything one track wants the others to
//! know travels as a [`shared::TrackProposal`] over the [`ProposalBus`].

pub mod bus;

pub use bus::ProposalBus;
