// User interaction handling

// Zoom transform classification and per-track gesture state
pub mod gesture;

// Gesture to domain proposal translation
pub mod proposal;

// Focus panel hover readout
pub mod hover;

pub use gesture::{classify, GestureClassification, GestureSource, GestureState, ZoomDirection, ZoomTransform};
pub use hover::{hover_readout, HoverReadout};
pub use proposal::ProposalBuilder;
