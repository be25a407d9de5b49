use super::action::Direction;
use super::clock::SimulationClock;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// One body cell together with the cell it occupied before the last step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pos: Position,
    pub prev: Position,
}

impl Segment {
    /// A segment at rest: previous and current cell are the same
    pub fn at(pos: Position) -> Self {
        Self { pos, prev: pos }
    }

    pub fn new(pos: Position, prev: Position) -> Self {
        Self { pos, prev }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub segments: Vec<Segment>,
}

impl Snake {
    /// A single-segment snake resting on `head`
    pub fn new(head: Position) -> Self {
        Self {
            segments: vec![Segment::at(head)],
        }
    }

    /// Build a resting snake from explicit cells, head first
    pub fn from_cells(cells: &[Position]) -> Self {
        assert!(!cells.is_empty(), "a snake needs at least one segment");
        Self {
            segments: cells.iter().copied().map(Segment::at).collect(),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0].pos
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1].pos
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.segments[1..].iter().any(|s| s.pos == pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments.iter().any(|s| s.pos == pos)
    }

    /// Direction applied at the most recent step, read off the head's
    /// `prev -> pos` vector. `None` while the head has not moved.
    pub fn committed_direction(&self) -> Option<Direction> {
        let head = self.segments[0];
        Direction::from_delta(head.pos.x - head.prev.x, head.pos.y - head.prev.y)
    }

    /// Copy every segment's current cell into its `prev` slot
    pub fn record_previous(&mut self) {
        for segment in &mut self.segments {
            segment.prev = segment.pos;
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Created but the frame loop has not started yet
    Idle,
    Running,
    /// Terminal until restart
    Over,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Direction applied on the next step; `None` until the first move
    pub pending: Option<Direction>,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
    pub clock: SimulationClock,
    pub last_collision: Option<CollisionType>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_size: usize, clock: SimulationClock) -> Self {
        Self {
            snake,
            food,
            pending: None,
            grid_size,
            score: 0,
            steps: 0,
            status: GameStatus::Idle,
            clock,
            last_collision: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    /// Collision the head would suffer by moving onto `pos`.
    ///
    /// The old head is excluded since it moves out of the way; the tail is not.
    pub fn collision_at(&self, pos: Position) -> Option<CollisionType> {
        if !self.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }
        if self.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }
        None
    }

    /// False until the first direction is accepted
    pub fn is_moving(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }
}
