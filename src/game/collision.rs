use super::state::{CollisionType, Position, Snake};

/// Classify what a head moving to `head` would hit, given the snake before the move.
///
/// The current tail is not an obstacle: it leaves its cell in the same tick the
/// head arrives, so chasing your own tail is legal.
pub fn check_collision(
    head: Position,
    snake: &Snake,
    width: usize,
    height: usize,
) -> Option<CollisionType> {
    if !head.is_within(width, height) {
        return Some(CollisionType::Wall);
    }

    if snake.blocking_segments().any(|segment| segment == head) {
        return Some(CollisionType::SelfCollision);
    }

    None
}

pub fn is_collision(head: Position, snake: &Snake, width: usize, height: usize) -> bool {
    check_collision(head, snake, width, height).is_some()
}
