// Visualizer Module - Timeline computation and gesture handling
//
// Everything a renderer needs to draw a track: panel domains and scales,
// per-panel overlay geometry, and the gesture-to-proposal path.

// Scales, partitioning, envelope and synced domains
pub mod timeline;

// Pointer gesture classification and proposal building
pub mod interaction;

// Overlay capability and the built-in line/envelope overlays
pub mod overlay;
