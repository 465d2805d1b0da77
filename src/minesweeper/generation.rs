//! Mine placement and adjacency counting.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::config::LevelConfig;
use super::neighbors;
use super::types::{Grid, Tile};
use crate::constants::PLACEMENT_DRAWS_PER_CELL;

/// Generate the mine grid for a level.
///
/// Mines are placed by rejection sampling: draw a uniform cell, redraw when it
/// already holds a mine. Draws are capped at `PLACEMENT_DRAWS_PER_CELL` per
/// cell; past the cap the remaining mines go to a shuffle of the still-clear
/// cells, which keeps dense boards (up to 80% mines) from stalling.
pub fn generate<R: Rng>(config: LevelConfig, rng: &mut R) -> Grid<Tile> {
    let (height, width) = (config.height(), config.width());
    let bombs = config.bombs();
    debug_assert!(bombs < height * width, "board must keep a clear cell");

    let mut grid = Grid::new(height, width, Tile::default());
    let max_draws = PLACEMENT_DRAWS_PER_CELL * height * width;
    let mut placed = 0;
    let mut draws = 0;

    while placed < bombs && draws < max_draws {
        draws += 1;
        let pos = (rng.gen_range(0..height), rng.gen_range(0..width));
        if !grid[pos].is_mine() {
            grid[pos] = Tile::Mine;
            placed += 1;
        }
    }

    if placed < bombs {
        warn!(
            placed,
            bombs, draws, "rejection sampling capped, shuffling remaining cells"
        );
        place_by_shuffle(&mut grid, bombs - placed, rng);
    }

    count_adjacent(&mut grid);
    debug!(height, width, bombs, draws, "mine grid generated");
    grid
}

/// Put `remaining` mines on distinct clear cells chosen uniformly at random.
fn place_by_shuffle<R: Rng>(grid: &mut Grid<Tile>, remaining: usize, rng: &mut R) {
    let mut clear: Vec<(usize, usize)> = grid
        .iter()
        .filter(|(_, tile)| !tile.is_mine())
        .map(|(pos, _)| pos)
        .collect();

    clear.shuffle(rng);

    for &pos in clear.iter().take(remaining) {
        grid[pos] = Tile::Mine;
    }
}

/// Derive adjacency counts from the placed mines.
///
/// Every mine bumps each in-bounds clear neighbor once; mines themselves keep
/// the mine value. Expects all clear cells to start at zero.
fn count_adjacent(grid: &mut Grid<Tile>) {
    let mine_positions: Vec<(usize, usize)> = grid
        .iter()
        .filter(|(_, tile)| tile.is_mine())
        .map(|(pos, _)| pos)
        .collect();

    for (row, col) in mine_positions {
        bump_neighbors(grid, row, col);
    }
}

fn bump_neighbors(grid: &mut Grid<Tile>, row: usize, col: usize) {
    for pos in neighbors::in_bounds(row, col, 1, grid.height(), grid.width()) {
        if let Tile::Clear(n) = grid[pos] {
            grid[pos] = Tile::Clear(n + 1);
        }
    }
}

/// Turn one cell of an already counted grid into a mine, keeping the counts
/// of its neighbors in step.
#[cfg(test)]
pub(crate) fn mark_mine(grid: &mut Grid<Tile>, pos: (usize, usize)) {
    if grid[pos].is_mine() {
        return;
    }
    grid[pos] = Tile::Mine;
    bump_neighbors(grid, pos.0, pos.1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minesweeper::config::{bomb_range, Bounds};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(width: usize, height: usize, bombs: usize) -> LevelConfig {
        LevelConfig::new(width, height, bombs, &Bounds::for_area(200, 60)).unwrap()
    }

    fn mine_count(grid: &Grid<Tile>) -> usize {
        grid.iter().filter(|(_, tile)| tile.is_mine()).count()
    }

    /// Every clear cell must hold exactly the number of neighboring mines.
    fn assert_counts_consistent(grid: &Grid<Tile>) {
        for ((row, col), tile) in grid.iter() {
            if let Tile::Clear(n) = tile {
                let expected = neighbors::in_bounds(row, col, 1, grid.height(), grid.width())
                    .into_iter()
                    .filter(|&pos| grid[pos].is_mine())
                    .count();
                assert_eq!(
                    *n as usize, expected,
                    "Count mismatch at ({}, {})",
                    row, col
                );
            }
        }
    }

    #[test]
    fn test_generate_places_exact_bomb_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let grid = generate(config(10, 10, 20), &mut rng);

        assert_eq!(grid.height(), 10);
        assert_eq!(grid.width(), 10);
        assert_eq!(mine_count(&grid), 20);
        assert_counts_consistent(&grid);
    }

    #[test]
    fn test_generate_many_seeds_and_sizes() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let width = 10 + (seed as usize % 7);
            let height = 10 + (seed as usize % 5);
            let bombs = *bomb_range(width, height).start() + seed as usize;
            let grid = generate(config(width, height, bombs), &mut rng);

            assert_eq!(mine_count(&grid), bombs, "seed {}", seed);
            assert_counts_consistent(&grid);
        }
    }

    #[test]
    fn test_generate_dense_board_terminates() {
        // 80% ceiling on the minimum and a larger board.
        for (width, height) in [(10, 10), (40, 30)] {
            let bombs = *bomb_range(width, height).end();
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let grid = generate(config(width, height, bombs), &mut rng);

            assert_eq!(mine_count(&grid), bombs);
            assert_counts_consistent(&grid);
        }
    }

    #[test]
    fn test_shuffle_fallback_fills_exact_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut grid = Grid::new(10, 10, Tile::default());
        grid[(0, 0)] = Tile::Mine;

        place_by_shuffle(&mut grid, 79, &mut rng);
        assert_eq!(mine_count(&grid), 80);
        assert!(grid[(0, 0)].is_mine());
    }

    #[test]
    fn test_deterministic_with_seed() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);

        let grid1 = generate(config(12, 10, 30), &mut rng1);
        let grid2 = generate(config(12, 10, 30), &mut rng2);

        assert_eq!(grid1, grid2);
    }

    #[test]
    fn test_adjacent_counts() {
        // Mines at (0,0), (0,1), (1,0) - an L in the top-left corner.
        let mut grid = Grid::new(4, 4, Tile::default());
        grid[(0, 0)] = Tile::Mine;
        grid[(0, 1)] = Tile::Mine;
        grid[(1, 0)] = Tile::Mine;
        count_adjacent(&mut grid);

        assert_eq!(grid[(1, 1)], Tile::Clear(3));
        assert_eq!(grid[(0, 2)], Tile::Clear(1));
        assert_eq!(grid[(2, 0)], Tile::Clear(1));
        assert_eq!(grid[(2, 1)], Tile::Clear(1));
        assert_eq!(grid[(2, 2)], Tile::Clear(0));
        // Mines keep the mine value.
        assert_eq!(grid[(0, 0)], Tile::Mine);
    }

    #[test]
    fn test_mark_mine_matches_full_recount() {
        let mut incremental = Grid::new(5, 5, Tile::default());
        mark_mine(&mut incremental, (2, 2));
        mark_mine(&mut incremental, (2, 3));
        mark_mine(&mut incremental, (2, 3));

        let mut recounted = Grid::new(5, 5, Tile::default());
        recounted[(2, 2)] = Tile::Mine;
        recounted[(2, 3)] = Tile::Mine;
        count_adjacent(&mut recounted);

        assert_eq!(incremental, recounted);
    }
}
