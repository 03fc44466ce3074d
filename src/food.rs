use crate::grid::{Cell, Grid};
use ahash::AHashSet;
use rand::Rng;
use rand::seq::IteratorRandom;

/// Picks a uniformly random free cell, or `None` when the snake covers the
/// whole board.
///
/// Samples straight from the free cells instead of retrying random cells, so
/// the cost stays linear in the board size no matter how long the snake is.
pub fn place_food<R: Rng + ?Sized>(grid: &Grid, occupied: &AHashSet<Cell>, rng: &mut R) -> Option<Cell> {
    grid.cells().filter(|c| !occupied.contains(c)).choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn never_lands_on_snake() {
        let grid = Grid::new(6, 10);
        let mut rng = SmallRng::seed_from_u64(7);
        let occupied: AHashSet<Cell> = grid.cells().take(30).collect();
        for _ in 0..200 {
            let food = place_food(&grid, &occupied, &mut rng).unwrap();
            assert!(grid.contains(food));
            assert!(!occupied.contains(&food));
        }
    }

    #[test]
    fn finds_the_single_free_cell() {
        let grid = Grid::new(5, 10);
        let free = Cell::new(3, 2);
        let occupied: AHashSet<Cell> = grid.cells().filter(|&c| c != free).collect();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(place_food(&grid, &occupied, &mut rng), Some(free));
    }

    #[test]
    fn full_board_yields_none() {
        let grid = Grid::new(4, 10);
        let occupied: AHashSet<Cell> = grid.cells().collect();
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(place_food(&grid, &occupied, &mut rng), None);
    }

    #[test]
    fn empty_board_reaches_every_cell() {
        let grid = Grid::new(3, 10);
        let occupied = AHashSet::new();
        let mut rng = SmallRng::seed_from_u64(42);
        let seen: AHashSet<Cell> = (0..500).filter_map(|_| place_food(&grid, &occupied, &mut rng)).collect();
        assert_eq!(seen.len(), grid.area());
    }
}
