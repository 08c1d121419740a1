//! Focus panel hover readout

use crate::visualizer::timeline::{ScaleMapper, TimeScale};
use shared::TimeMs;

/// Time under the pointer and where to center its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverReadout {
    pub time: TimeMs,
    pub label_x: f64,
}

/// Hit-test pointer position `x` against the focus scale.
///
/// The label is centered on `x` and nudged back inside the focus panel when it
/// would overflow either edge. A label wider than the panel is pinned to the
/// left edge.
pub fn hover_readout(focus_scale: &TimeScale, x: f64, label_width: f64) -> HoverReadout {
    let (r0, r1) = focus_scale.range();
    let (panel_left, panel_right) = (r0.min(r1), r0.max(r1));
    let half = label_width / 2.0;
    let mut left = x - half;
    let mut right = x + half;
    if left < panel_left {
        right += panel_left - left;
        left = panel_left;
    } else if right > panel_right {
        left -= right - panel_right;
        right = panel_right;
    }
    HoverReadout {
        time: focus_scale.invert(x),
        label_x: (left + right) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TimeDomain;

    fn scale() -> TimeScale {
        TimeScale::new(TimeDomain::from_millis(0, 1_000), (0.0, 200.0))
    }

    #[test]
    fn label_centered_in_the_middle() {
        let readout = hover_readout(&scale(), 100.0, 40.0);
        assert_eq!(readout.time, TimeMs(500));
        assert_eq!(readout.label_x, 100.0);
    }

    #[test]
    fn label_clamped_at_left_edge() {
        let readout = hover_readout(&scale(), 5.0, 40.0);
        assert_eq!(readout.time, TimeMs(25));
        assert_eq!(readout.label_x, 20.0);
    }

    #[test]
    fn label_clamped_at_right_edge() {
        let readout = hover_readout(&scale(), 195.0, 40.0);
        assert_eq!(readout.label_x, 180.0);
    }
}
