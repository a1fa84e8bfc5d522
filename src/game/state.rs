use super::direction::Direction;

/// A cell on the game grid
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

    /// Check if the position lies on a square grid of the given size
    pub fn is_within(&self, grid_size: usize) -> bool {
        let size = grid_size as i32;
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];
        let back = direction.opposite();

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "snake needs at least a head");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head).
    /// The tail counts: it has not vacated its cell yet when this is asked.
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance onto `new_head`, dropping the tail unless growing
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Running,
    Paused,
    Over,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
    /// No empty cell left for a new fruit
    GridFull,
}

/// Read-only copy of the session handed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub snake: Vec<Position>,
    pub fruit: Option<Position>,
    pub score: u32,
    pub direction: Direction,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(4, 4), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(4, 4));
        assert_eq!(snake.body[1], Position::new(3, 4));
        assert_eq!(snake.tail(), Position::new(2, 4));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(4, 4), Direction::Right, 3);

        snake.advance_to(Position::new(5, 4), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 4));
        assert_eq!(snake.tail(), Position::new(3, 4));

        snake.advance_to(Position::new(6, 4), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(3, 4));
    }

    #[test]
    fn test_collision_detection_includes_tail() {
        let snake = Snake::new(Position::new(4, 4), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(4, 4))); // head
        assert!(snake.collides_with_body(Position::new(3, 4)));
        assert!(snake.collides_with_body(Position::new(2, 4))); // tail
        assert!(!snake.collides_with_body(Position::new(7, 7)));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_within(8));
        assert!(Position::new(7, 7).is_within(8));
        assert!(!Position::new(-1, 0).is_within(8));
        assert!(!Position::new(8, 0).is_within(8));
        assert!(!Position::new(0, 8).is_within(8));
    }
}
