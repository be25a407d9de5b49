use super::{
    clock::SimulationClock,
    config::GameConfig,
    scheduler::{FrameSignal, FrameTick, Scheduler},
    state::{CollisionType, GameState, GameStatus, Position, Segment, Snake},
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random draws tried before falling back to picking from the free cells
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Information about a step
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether the step interval shrank this step
    pub sped_up: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake actually moved
    pub moved: bool,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(terminated: bool) -> Self {
        Self {
            moved: false,
            terminated,
            info: StepInfo::default(),
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let spawn = self.config.spawn();
        let snake = Snake::new(spawn);
        // A lone segment always leaves a free cell on any valid grid
        let food = self.spawn_food_avoid_snake(&snake).unwrap_or(spawn);
        let clock = SimulationClock::new(f64::from(self.config.initial_step_interval_ms));

        log::info!(
            "New game on a {0}x{0} grid, food at ({1}, {2})",
            self.config.grid_size,
            food.x,
            food.y
        );

        GameState::new(snake, food, self.config.grid_size, clock)
    }

    /// Execute one logical step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if state.status != GameStatus::Running {
            return StepResult::idle(state.status == GameStatus::Over);
        }

        // Resting at spawn until the first direction arrives
        let Some(direction) = state.pending else {
            return StepResult::idle(false);
        };

        state.snake.record_previous();

        let old_head = state.snake.head();
        let new_head = old_head.moved_in_direction(direction);
        state.steps += 1;

        if let Some(collision_type) = state.collision_at(new_head) {
            state.status = GameStatus::Over;
            state.last_collision = Some(collision_type);
            log::info!(
                "Game over: {:?} at ({}, {}) with score {}",
                collision_type,
                new_head.x,
                new_head.y,
                state.score
            );

            return StepResult {
                moved: false,
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..StepInfo::default()
                },
            };
        }

        state
            .snake
            .segments
            .insert(0, Segment::new(new_head, old_head));

        let ate_food = new_head == state.food;
        let mut sped_up = false;

        if ate_food {
            state.score += 1;
            match self.spawn_food_avoid_snake(&state.snake) {
                Some(food) => state.food = food,
                None => {
                    state.status = GameStatus::Over;
                    log::info!("Board filled with score {}", state.score);

                    return StepResult {
                        moved: true,
                        terminated: true,
                        info: StepInfo {
                            ate_food: true,
                            ..StepInfo::default()
                        },
                    };
                }
            }

            if state.score % self.config.speedup_every == 0 {
                sped_up = state.clock.speed_up(
                    f64::from(self.config.step_interval_decrement_ms),
                    f64::from(self.config.min_step_interval_ms),
                );
                if sped_up {
                    log::debug!(
                        "Score {}: step interval now {}ms",
                        state.score,
                        state.clock.step_interval_ms
                    );
                }
            }
        } else {
            state.snake.segments.pop();
        }

        StepResult {
            moved: true,
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
                sped_up,
            },
        }
    }

    /// Handle one rendering callback: accumulate time and step when due.
    /// Cancels the scheduler when the step ends the game.
    pub fn run_frame(
        &mut self,
        scheduler: &mut Scheduler,
        state: &mut GameState,
        now_ms: f64,
    ) -> FrameTick {
        let mut tick = scheduler.on_frame(state, now_ms);

        if tick.signal == FrameSignal::Advance {
            let result = self.step(state);
            if result.terminated {
                scheduler.cancel();
            }
            tick.fraction = state.clock.fraction();
        }

        tick
    }

    /// Spawn food at a random empty position, or `None` once the snake
    /// covers the whole board.
    ///
    /// Rejection sampling first; a crowded board falls back to a uniform
    /// pick among the free cells.
    fn spawn_food_avoid_snake(&mut self, snake: &Snake) -> Option<Position> {
        let size = self.config.grid_size as i32;
        if snake.len() >= self.config.grid_size * self.config.grid_size {
            return None;
        }

        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if !snake.contains(pos) {
                log::trace!("Food placed at ({}, {})", pos.x, pos.y);
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.contains(*pos))
            .collect();
        let food = free.choose(&mut self.rng).copied();
        if let Some(pos) = food {
            log::trace!("Food placed at ({}, {}) from {} free cells", pos.x, pos.y, free.len());
        }
        food
    }
}
