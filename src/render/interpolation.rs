//! Smooth positions between logical steps.
//!
//! Every segment slides from its `prev` cell to its current cell by the
//! same rule, head included. Because `prev` is refreshed for the whole body
//! before each step, only cells that changed this step visibly move, which
//! gives a string-of-beads motion rather than a curve-following body.

use crate::game::{GameState, GameStatus, Position, Segment};

/// Fractional render position of `segment`.
///
/// A snake at rest renders exactly on its logical cells.
pub fn visual_position(segment: &Segment, fraction: f64, moving: bool) -> (f64, f64) {
    if !moving {
        return (f64::from(segment.pos.x), f64::from(segment.pos.y));
    }

    let t = fraction.clamp(0.0, 1.0);
    (
        lerp(segment.prev.x, segment.pos.x, t),
        lerp(segment.prev.y, segment.pos.y, t),
    )
}

fn lerp(from: i32, to: i32, t: f64) -> f64 {
    let from = f64::from(from);
    from + (f64::from(to) - from) * t
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualSegment {
    pub x: f64,
    pub y: f64,
    pub is_head: bool,
}

/// Everything the view needs for one frame, derived from `GameState`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub segments: Vec<VisualSegment>,
    pub food: Position,
    pub score: u32,
    pub status: GameStatus,
    pub grid_size: usize,
    pub step_interval_ms: f64,
    pub moving: bool,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState, fraction: f64) -> Self {
        let moving = state.is_moving();
        let segments = state
            .snake
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let (x, y) = visual_position(segment, fraction, moving);
                VisualSegment {
                    x,
                    y,
                    is_head: i == 0,
                }
            })
            .collect();

        Self {
            segments,
            food: state.food,
            score: state.score,
            status: state.status,
            grid_size: state.grid_size,
            step_interval_ms: state.clock.step_interval_ms,
            moving,
        }
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameEngine};

    fn moved_segment() -> Segment {
        Segment::new(Position::new(6, 4), Position::new(5, 4))
    }

    #[test]
    fn test_fraction_zero_is_previous_cell() {
        assert_eq!(visual_position(&moved_segment(), 0.0, true), (5.0, 4.0));
    }

    #[test]
    fn test_fraction_one_is_current_cell() {
        assert_eq!(visual_position(&moved_segment(), 1.0, true), (6.0, 4.0));
    }

    #[test]
    fn test_fraction_half_is_midpoint() {
        assert_eq!(visual_position(&moved_segment(), 0.5, true), (5.5, 4.0));

        let vertical = Segment::new(Position::new(3, 2), Position::new(3, 3));
        assert_eq!(visual_position(&vertical, 0.5, true), (3.0, 2.5));
    }

    #[test]
    fn test_at_rest_uses_logical_cell() {
        // prev differs on purpose; a resting snake ignores it
        assert_eq!(visual_position(&moved_segment(), 0.3, false), (6.0, 4.0));
    }

    #[test]
    fn test_out_of_range_fraction_is_clamped() {
        assert_eq!(visual_position(&moved_segment(), 1.7, true), (6.0, 4.0));
        assert_eq!(visual_position(&moved_segment(), -0.2, true), (5.0, 4.0));
    }

    #[test]
    fn test_capture_marks_head_and_is_repeatable() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 11);
        let mut state = engine.reset();
        state.status = GameStatus::Running;
        state.food = Position::new(11, 10);
        state.pending = Some(Direction::Right);
        engine.step(&mut state);

        let before = state.clone();
        let first = FrameSnapshot::capture(&state, 0.25);
        let second = FrameSnapshot::capture(&state, 0.25);

        assert_eq!(first, second);
        assert_eq!(state, before);
        assert_eq!(first.segments.len(), 2);
        assert!(first.segments[0].is_head);
        assert!(!first.segments[1].is_head);
        assert_eq!((first.segments[0].x, first.segments[0].y), (10.25, 10.0));
        assert_eq!(first.score, 1);
        assert!(first.moving);
    }
}
