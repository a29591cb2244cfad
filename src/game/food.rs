use rand::Rng;

use super::state::{Position, Snake};

/// Pick a uniformly random cell not covered by the snake.
///
/// Rejection sampling over the whole grid. The expected number of draws is
/// `area / (area - snake.len())`, which grows without bound as the snake
/// approaches filling the grid. Returns `None` when no free cell exists.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
    width: usize,
    height: usize,
) -> Option<Position> {
    if snake.len() >= width * height {
        return None;
    }

    loop {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        let pos = Position::new(x, y);

        if !snake.contains(pos) {
            return Some(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_food_avoids_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        for _ in 0..500 {
            let food = place_food(&mut rng, &snake, 10, 10).unwrap();
            assert!(food.is_within(10, 10));
            assert!(!snake.contains(food));
        }
    }

    #[test]
    fn test_single_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(1);
        // 3x1 grid, snake covers x=2 and x=1
        let snake = Snake::from_cells([Position::new(2, 0), Position::new(1, 0)]).unwrap();
        assert_eq!(place_food(&mut rng, &snake, 3, 1), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_full_grid_has_no_food() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::from_cells([Position::new(1, 0), Position::new(0, 0)]).unwrap();
        assert_eq!(place_food(&mut rng, &snake, 2, 1), None);
    }
}
