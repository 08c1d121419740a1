//! Timeline domain entry point.
//!
//! Exposes scales, focus/context partitioning, the envelope aggregator and
//! the per-track domain list that bus proposals are folded into.

pub mod domain_sync;
pub mod envelope;
pub mod partition;
pub mod scale;

pub use domain_sync::SyncedDomains;
pub use envelope::{compute_envelope, EnvelopeError, EnvelopeParams, EnvelopePoint};
pub use partition::{
    partition_domains, partition_observations, ContextSlots, EncodingPlan, PanelRole,
    PanelWindow, Partition, PartitionError,
};
pub use scale::{LinearScale, ScaleMapper, TimeScale};
