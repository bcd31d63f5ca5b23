//! Cascading release of child animations.
//!
//! Each child is fed its final style only once its predecessor in traversal
//! order has rotated past the midpoint of the unfurl. Until then it is fed its
//! own previous interpolated style, which the spring engine treats as "stay".
//! Opening traverses forward from child 0; closing traverses backwards, so
//! the last child out is the first one back.

use crate::style::{ButtonStyle, FrameStyleSet};
use thiserror::Error;

/// Halfway point between the closed (-180) and open (0) rotations.
pub const MIDPOINT_ROTATION: f64 = -90.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StaggerError {
    #[error("expected {expected} styles in the previous frame, found {found}")]
    LengthMismatch { expected: usize, found: usize },
}

/// Whether the predecessor is far enough along for its successor to start.
///
/// The threshold is measured from the predecessor's *final* rotation, while
/// its progress comes from the previous interpolated frame.
pub fn past_midpoint(target: &ButtonStyle, previous: &ButtonStyle, is_open: bool) -> bool {
    let current_rotation = (target.rotation - MIDPOINT_ROTATION).abs();
    let prior_progress = previous.rotation.abs() - current_rotation;
    if is_open {
        prior_progress < 0.0
    } else {
        prior_progress > 0.0
    }
}

/// Picks this frame's spring targets from the final styles and the previous
/// interpolated frame.
pub fn next_targets(
    final_targets: &FrameStyleSet,
    previous_frame: &FrameStyleSet,
    is_open: bool,
) -> Result<FrameStyleSet, StaggerError> {
    if final_targets.len() != previous_frame.len() {
        return Err(StaggerError::LengthMismatch {
            expected: final_targets.len(),
            found: previous_frame.len(),
        });
    }

    let count = final_targets.len();
    let order: Vec<usize> = if is_open {
        (0..count).collect()
    } else {
        (0..count).rev().collect()
    };

    let mut next = previous_frame.to_vec();
    let mut predecessor: Option<usize> = None;
    for index in order {
        let release = predecessor.is_none_or(|p| {
            past_midpoint(&final_targets[p], &previous_frame[p], is_open)
        });
        if release {
            next[index] = final_targets[index];
        }
        predecessor = Some(index);
    }

    Ok(FrameStyleSet::new(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FanConfig, Point};
    use crate::spring::{SpringConfig, StaggeredMotion};
    use crate::style::Layout;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn layout(child_count: usize) -> Layout {
        let fan = FanConfig {
            child_count,
            fly_out_radius: 130.0,
            separation_angle: 40.0,
            child_diameter: 48.0,
        };
        Layout::new(fan, Point::new(490.0, 450.0), 90.0).unwrap()
    }

    fn with_rotations(base: &FrameStyleSet, rotations: &[f64]) -> FrameStyleSet {
        base.iter()
            .zip(rotations)
            .map(|(style, r)| style.with_rotation(*r))
            .collect()
    }

    #[test]
    fn test_opening_holds_until_predecessor_passes_midpoint() {
        let layout = layout(5);
        let final_targets = layout.final_targets(true);
        let previous = layout.final_targets(false);

        let next = next_targets(&final_targets, &previous, true).unwrap();
        assert_eq!(next[0], final_targets[0]);
        for i in 1..5 {
            // |0 + 90| = 90, |-180| - 90 = 90, not below zero
            assert_eq!(next[i], previous[i], "child {i} should be held");
        }
    }

    #[test]
    fn test_opening_releases_after_midpoint() {
        let layout = layout(3);
        let final_targets = layout.final_targets(true);
        let previous = with_rotations(&layout.final_targets(false), &[-80.0, -100.0, -180.0]);

        let next = next_targets(&final_targets, &previous, true).unwrap();
        assert_eq!(next[0], final_targets[0]);
        assert_eq!(next[1], final_targets[1]);
        assert_eq!(next[2], previous[2]);
    }

    #[test]
    fn test_exactly_at_midpoint_is_not_released() {
        let layout = layout(2);
        let final_targets = layout.final_targets(true);
        let previous = with_rotations(&layout.final_targets(false), &[-90.0, -180.0]);

        let next = next_targets(&final_targets, &previous, true).unwrap();
        assert_eq!(next[1], previous[1]);
    }

    #[test]
    fn test_closing_starts_from_last_child() {
        let layout = layout(4);
        let final_targets = layout.final_targets(false);
        let previous = layout.final_targets(true);

        let next = next_targets(&final_targets, &previous, false).unwrap();
        assert_eq!(next[3], final_targets[3]);
        for i in 0..3 {
            assert_eq!(next[i], previous[i], "child {i} should be held");
        }
    }

    #[test]
    fn test_closing_releases_after_midpoint() {
        let layout = layout(3);
        let final_targets = layout.final_targets(false);
        let previous = with_rotations(&layout.final_targets(true), &[0.0, -60.0, -120.0]);

        let next = next_targets(&final_targets, &previous, false).unwrap();
        assert_eq!(next[2], final_targets[2]);
        // child 2 is past -90, so child 1 goes
        assert_eq!(next[1], final_targets[1]);
        // child 1 is not, so child 0 waits
        assert_eq!(next[0], previous[0]);
    }

    #[test]
    fn test_length_mismatch_fails_fast() {
        let final_targets = layout(3).final_targets(true);
        let previous = layout(2).final_targets(false);
        assert_eq!(
            next_targets(&final_targets, &previous, true),
            Err(StaggerError::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_single_child_is_always_released() {
        let layout = layout(1);
        for is_open in [true, false] {
            let final_targets = layout.final_targets(is_open);
            let previous = layout.final_targets(!is_open);
            let next = next_targets(&final_targets, &previous, is_open).unwrap();
            assert_eq!(next, final_targets);
        }
    }

    /// Drives the real spring engine and records, per frame, which children
    /// were fed their final style.
    fn released_per_frame(
        layout: &Layout,
        motion: &mut StaggeredMotion,
        is_open: bool,
        frames: usize,
    ) -> Vec<Vec<bool>> {
        let final_targets = layout.final_targets(is_open);
        let mut history: Vec<Vec<bool>> = Vec::new();
        for _ in 0..frames {
            motion
                .tick(FRAME, |previous| {
                    let next = next_targets(&final_targets, previous, is_open)?;
                    history.push(
                        next.iter()
                            .zip(final_targets.iter())
                            .map(|(n, f)| n == f)
                            .collect(),
                    );
                    Ok::<_, StaggerError>(next)
                })
                .unwrap();
        }
        history
    }

    fn assert_no_flapping(history: &[Vec<bool>]) {
        for pair in history.windows(2) {
            for (i, (before, after)) in pair[0].iter().zip(&pair[1]).enumerate() {
                assert!(!before || *after, "child {i} was released and then held again");
            }
        }
    }

    #[test]
    fn test_release_is_monotonic_while_opening_and_closing() {
        let layout = layout(5);
        let spring = SpringConfig::new(400.0, 28.0);
        let mut motion = StaggeredMotion::new(layout.final_targets(false), spring);

        let opening = released_per_frame(&layout, &mut motion, true, 240);
        assert_no_flapping(&opening);
        assert!(opening.last().unwrap().iter().all(|r| *r));
        assert!(motion.is_at_rest(&layout.final_targets(true)));

        let closing = released_per_frame(&layout, &mut motion, false, 240);
        assert_no_flapping(&closing);
        assert!(motion.is_at_rest(&layout.final_targets(false)));
    }

    #[test]
    fn test_children_start_in_order() {
        let layout = layout(5);
        let mut motion =
            StaggeredMotion::new(layout.final_targets(false), SpringConfig::new(400.0, 28.0));
        let history = released_per_frame(&layout, &mut motion, true, 240);

        let first_release: Vec<usize> = (0..5)
            .map(|i| history.iter().position(|frame| frame[i]).unwrap())
            .collect();
        for pair in first_release.windows(2) {
            assert!(pair[0] < pair[1], "release frames {first_release:?}");
        }
    }

    #[test]
    fn test_reversal_mid_flight_keeps_full_frames() {
        let layout = layout(5);
        let mut motion =
            StaggeredMotion::new(layout.final_targets(false), SpringConfig::new(400.0, 28.0));

        released_per_frame(&layout, &mut motion, true, 6);
        assert_eq!(motion.current().len(), 5);

        let closing = released_per_frame(&layout, &mut motion, false, 240);
        assert!(closing.iter().all(|frame| frame.len() == 5));
        assert_no_flapping(&closing);
        assert!(motion.is_at_rest(&layout.final_targets(false)));
    }
}
