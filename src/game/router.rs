//! Routes steering requests into the pending direction.
//!
//! The last accepted request before a step wins; there is no queue. A
//! request is rejected when it points straight back along the direction the
//! head actually travelled on the most recent step, which is read from the
//! head segment at request time rather than latched once per frame.

use super::action::Direction;
use super::state::{GameState, GameStatus};

/// Try to change the pending direction. Returns true if it was accepted.
pub fn request_direction(state: &mut GameState, requested: Direction) -> bool {
    if state.status == GameStatus::Over {
        return false;
    }

    if let Some(committed) = state.snake.committed_direction() {
        if committed.is_opposite(requested) {
            log::debug!("Rejected reversal {:?} while heading {:?}", requested, committed);
            return false;
        }
    }

    state.pending = Some(requested);
    true
}
