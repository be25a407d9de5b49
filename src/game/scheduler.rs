//! Turns rendering callbacks into logical steps.
//!
//! The frame loop calls `on_frame` once per rendered frame with a
//! monotonic timestamp. The scheduler feeds the elapsed time into the
//! state's `SimulationClock` and reports whether the simulation should
//! advance. Once the game is over the scheduler's token is cancelled and
//! every further frame reports `Stopped`; a restart builds a new scheduler.

use super::state::{GameState, GameStatus};

/// Owned stop flag for one frame-loop chain
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CancellationToken {
    cancelled: bool,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// What the frame loop should do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSignal {
    /// Run one logical step, then render
    Advance,
    /// Render only
    RenderOnly,
    /// The chain is finished; stop scheduling
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub signal: FrameSignal,
    /// Interpolation fraction in `[0, 1]`
    pub fraction: f64,
}

#[derive(Debug)]
pub struct Scheduler {
    last_frame_ms: f64,
    token: CancellationToken,
}

impl Scheduler {
    /// Begin a fresh chain at `now_ms`, moving an idle game to Running.
    pub fn start(state: &mut GameState, now_ms: f64) -> Self {
        if state.status == GameStatus::Idle {
            state.status = GameStatus::Running;
        }
        Self {
            last_frame_ms: now_ms,
            token: CancellationToken::new(),
        }
    }

    pub fn on_frame(&mut self, state: &mut GameState, now_ms: f64) -> FrameTick {
        if state.status == GameStatus::Over {
            self.token.cancel();
        }
        if self.token.is_cancelled() {
            return FrameTick {
                signal: FrameSignal::Stopped,
                fraction: state.clock.fraction(),
            };
        }

        let delta_ms = now_ms - self.last_frame_ms;
        self.last_frame_ms = now_ms;
        state.clock.accumulate(delta_ms);

        let signal = if state.clock.consume_step() {
            FrameSignal::Advance
        } else {
            FrameSignal::RenderOnly
        };

        FrameTick {
            signal,
            fraction: state.clock.fraction(),
        }
    }

    pub fn cancel(&mut self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}
