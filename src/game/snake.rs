use super::direction::Direction;
use super::grid::Grid;
use super::state::Position;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Grow by one segment on the next move
    pending_grow: bool,
}

impl Snake {
    /// A one-cell snake heading right
    pub fn new(head: Position) -> Self {
        Self::with_direction(head, Direction::Right)
    }

    pub fn with_direction(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
            pending_grow: false,
        }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body. Segments are taken as given, so a
    /// body crossing itself can be set up directly.
    #[cfg(test)]
    pub(crate) fn from_segments(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self {
            body,
            direction,
            pending_grow: false,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_growing(&self) -> bool {
        self.pending_grow
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Whether any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance one cell in the current direction
    pub fn move_forward(&mut self) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if self.pending_grow {
            self.pending_grow = false;
        } else {
            self.body.pop();
        }
    }

    /// Turn, unless `direction` is the exact inverse of the current one
    ///
    /// Returns whether the new direction was taken.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn grow(&mut self) {
        self.pending_grow = true;
    }

    /// Head outside the grid, or head on another segment
    pub fn check_collision(&self, grid: &Grid) -> bool {
        if !grid.contains(self.head()) {
            return true;
        }
        self.body[1..].contains(&self.head())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(10, 10)
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.direction(), Direction::Right);
        assert!(!snake.is_growing());
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Position::new(5, 5));

        snake.move_forward();
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.grow();
        assert!(snake.is_growing());
        snake.move_forward();
        assert_eq!(snake.len(), 2);
        assert!(!snake.is_growing());
        assert_eq!(snake.body(), &[Position::new(7, 5), Position::new(6, 5)]);

        snake.move_forward();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(8, 5));
    }

    #[test]
    fn test_accepted_turns_stick() {
        let mut snake = Snake::new(Position::new(5, 5));

        assert!(snake.change_direction(Direction::Up));
        assert_eq!(snake.direction(), Direction::Up);
        snake.move_forward();

        assert!(snake.change_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn test_reversal_ignored() {
        let mut snake = Snake::new(Position::new(5, 5));

        assert!(!snake.change_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);

        snake.move_forward();
        assert!(!snake.change_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_turns_between_ticks_check_current_direction() {
        let mut snake = Snake::new(Position::new(5, 5));

        assert!(snake.change_direction(Direction::Up));
        // Only the inverse of Up is refused now, so Left goes through
        assert!(snake.change_direction(Direction::Left));
        assert_eq!(snake.direction(), Direction::Left);
        assert!(!snake.change_direction(Direction::Right));
        assert_eq!(snake.direction(), Direction::Left);

        snake.move_forward();
        assert_eq!(snake.head(), Position::new(4, 5));
    }

    #[test]
    fn test_wall_collision() {
        let left = Snake::new(Position::new(-1, 5));
        assert!(left.check_collision(&grid()));

        let right = Snake::new(Position::new(10, 5));
        assert!(right.check_collision(&grid()));

        let top = Snake::new(Position::new(3, -1));
        assert!(top.check_collision(&grid()));

        let inside = Snake::new(Position::new(9, 9));
        assert!(!inside.check_collision(&grid()));
    }

    #[test]
    fn test_self_collision() {
        // Head doubled back onto the third segment
        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(5, 5),
                Position::new(6, 5),
            ],
            Direction::Up,
        )
        .unwrap();
        assert!(snake.check_collision(&grid()));

        let straight = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
            ],
            Direction::Right,
        )
        .unwrap();
        assert!(!straight.check_collision(&grid()));
    }

    #[test]
    fn test_loop_into_own_body() {
        let mut snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
                Position::new(2, 5),
                Position::new(1, 5),
            ],
            Direction::Right,
        )
        .unwrap();

        snake.change_direction(Direction::Down);
        snake.move_forward();
        snake.change_direction(Direction::Left);
        snake.move_forward();
        snake.change_direction(Direction::Up);
        snake.move_forward();

        assert_eq!(snake.head(), Position::new(4, 5));
        assert!(snake.check_collision(&grid()));
    }
}
