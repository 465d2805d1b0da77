//! Minesweeper data structures.
//!
//! Two fixed-size grids describe a level: the mine grid (what is under each
//! cell, immutable once generated) and the reveal grid (what the player knows
//! about each cell).

use std::ops::{Index, IndexMut};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::config::LevelConfig;
use super::generation::generate;
use crate::constants::{LOSS_SCORE, QUIT_SCORE, WIN_SCORE};

/// What lies under a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Mine,
    /// No mine; the value is the number of adjacent mines (0-8).
    Clear(u8),
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Clear(0)
    }
}

impl Tile {
    pub fn is_mine(&self) -> bool {
        matches!(self, Tile::Mine)
    }

    /// Adjacent mine count, `None` for a mine.
    pub fn count(&self) -> Option<u8> {
        match self {
            Tile::Mine => None,
            Tile::Clear(n) => Some(*n),
        }
    }
}

/// What the player knows about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reveal {
    #[default]
    Unknown,
    Flagged,
    Seen,
}

/// A dense row-major grid addressed by `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    height: usize,
    width: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(height: usize, width: usize, fill: T) -> Self {
        Self {
            height,
            width,
            cells: vec![fill; height * width],
        }
    }
}

impl<T> Grid<T> {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, (row, col): (usize, usize)) -> bool {
        row < self.height && col < self.width
    }

    pub fn get(&self, pos: (usize, usize)) -> Option<&T> {
        if self.contains(pos) {
            self.cells.get(pos.0 * self.width + pos.1)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, pos: (usize, usize)) -> Option<&mut T> {
        if self.contains(pos) {
            self.cells.get_mut(pos.0 * self.width + pos.1)
        } else {
            None
        }
    }

    /// Iterates `((row, col), &cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / width, i % width), cell))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = ((usize, usize), &mut T)> + '_ {
        let width = self.width;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, cell)| ((i / width, i % width), cell))
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) outside {}x{} grid",
            self.height,
            self.width
        );
        &self.cells[row * self.width + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) outside {}x{} grid",
            self.height,
            self.width
        );
        &mut self.cells[row * self.width + col]
    }
}

/// Game outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinesweeperResult {
    Win,
    Loss,
    Quit,
}

/// Maps outcomes to the numbers reported to the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTable {
    pub win: i32,
    pub loss: i32,
    pub quit: i32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            win: WIN_SCORE,
            loss: LOSS_SCORE,
            quit: QUIT_SCORE,
        }
    }
}

impl ScoreTable {
    pub fn score(&self, result: MinesweeperResult) -> i32 {
        match result {
            MinesweeperResult::Win => self.win,
            MinesweeperResult::Loss => self.loss,
            MinesweeperResult::Quit => self.quit,
        }
    }
}

/// How a cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    Empty,
    Count(u8),
    Mine,
    /// A correctly flagged mine, shown once the game is lost.
    FlaggedMine,
}

/// Active minesweeper game session.
#[derive(Debug, Clone)]
pub struct MinesweeperGame {
    /// Configuration the current level was generated from.
    pub config: LevelConfig,
    /// Mine grid for the current level.
    pub mines: Grid<Tile>,
    /// Player knowledge for the current level.
    pub reveals: Grid<Reveal>,
    /// Current cursor position (row, col).
    pub cursor: (usize, usize),
    /// Game result (None while the game is in progress).
    pub game_result: Option<MinesweeperResult>,
    /// Help overlay is showing; the next input only dismisses it.
    pub show_help: bool,
    /// Number of levels generated in this session, including the current one.
    pub levels_played: u32,
}

impl MinesweeperGame {
    /// Create a new session and generate its first level.
    pub fn new<R: Rng>(config: LevelConfig, rng: &mut R) -> Self {
        let mines = generate(config, rng);
        info!(
            width = config.width(),
            height = config.height(),
            bombs = config.bombs(),
            "minesweeper session started"
        );

        Self {
            config,
            reveals: Grid::new(config.height(), config.width(), Reveal::Unknown),
            mines,
            cursor: (0, 0),
            game_result: None,
            show_help: false,
            levels_played: 1,
        }
    }

    /// Replace both grids with a freshly generated level.
    pub fn new_level<R: Rng>(&mut self, config: LevelConfig, rng: &mut R) {
        self.mines = generate(config, rng);
        self.reveals = Grid::new(config.height(), config.width(), Reveal::Unknown);
        self.config = config;
        self.cursor = (0, 0);
        self.levels_played += 1;
        info!(
            width = config.width(),
            height = config.height(),
            bombs = config.bombs(),
            level = self.levels_played,
            "new minesweeper level"
        );
    }

    pub fn height(&self) -> usize {
        self.mines.height()
    }

    pub fn width(&self) -> usize {
        self.mines.width()
    }

    pub fn total_mines(&self) -> usize {
        self.config.bombs()
    }

    pub fn is_over(&self) -> bool {
        self.game_result.is_some()
    }

    /// Move the cursor by an offset. Moves that would leave the board are ignored.
    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let new_row = self.cursor.0 as i64 + d_row as i64;
        let new_col = self.cursor.1 as i64 + d_col as i64;

        if new_row >= 0
            && new_col >= 0
            && (new_row as usize) < self.height()
            && (new_col as usize) < self.width()
        {
            self.cursor = (new_row as usize, new_col as usize);
        }
    }

    pub fn flags_placed(&self) -> usize {
        self.reveals
            .iter()
            .filter(|(_, reveal)| **reveal == Reveal::Flagged)
            .count()
    }

    pub fn revealed_count(&self) -> usize {
        self.reveals
            .iter()
            .filter(|(_, reveal)| **reveal == Reveal::Seen)
            .count()
    }

    /// Returns the number of mines remaining (total mines - flags placed).
    /// Can be negative if player has placed more flags than mines.
    pub fn mines_remaining(&self) -> i64 {
        self.total_mines() as i64 - self.flags_placed() as i64
    }

    /// Visual state of a cell.
    pub fn cell_view(&self, pos: (usize, usize)) -> CellView {
        let lost = self.game_result == Some(MinesweeperResult::Loss);

        match (self.reveals[pos], self.mines[pos]) {
            (Reveal::Flagged, Tile::Mine) if lost => CellView::FlaggedMine,
            (Reveal::Flagged, _) => CellView::Flagged,
            (Reveal::Unknown, _) => CellView::Hidden,
            (Reveal::Seen, Tile::Mine) => CellView::Mine,
            (Reveal::Seen, Tile::Clear(0)) => CellView::Empty,
            (Reveal::Seen, Tile::Clear(n)) => CellView::Count(n),
        }
    }

    /// Build a game from a text layout (`M` = mine, anything else = clear).
    /// Adjacency counts are derived the same way the generator does it.
    #[cfg(test)]
    pub(crate) fn from_layout(layout: &[&str]) -> Self {
        use super::generation::mark_mine;

        let height = layout.len();
        let width = layout[0].len();
        let mut mines = Grid::new(height, width, Tile::default());
        let mut bombs = 0;

        for (r, row_str) in layout.iter().enumerate() {
            for (c, ch) in row_str.chars().enumerate() {
                if ch == 'M' {
                    mark_mine(&mut mines, (r, c));
                    bombs += 1;
                }
            }
        }

        Self {
            config: LevelConfig::unchecked(width, height, bombs),
            reveals: Grid::new(height, width, Reveal::Unknown),
            mines,
            cursor: (0, 0),
            game_result: None,
            show_help: false,
            levels_played: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minesweeper::config::Bounds;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn classic_config() -> LevelConfig {
        LevelConfig::new(10, 10, 20, &Bounds::for_area(80, 24)).unwrap()
    }

    #[test]
    fn test_new_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let game = MinesweeperGame::new(classic_config(), &mut rng);

        assert_eq!(game.height(), 10);
        assert_eq!(game.width(), 10);
        assert_eq!(game.cursor, (0, 0));
        assert!(game.game_result.is_none());
        assert!(!game.show_help);
        assert_eq!(game.levels_played, 1);
        assert_eq!(game.total_mines(), 20);
        assert_eq!(game.flags_placed(), 0);
        assert!(game.reveals.iter().all(|(_, r)| *r == Reveal::Unknown));
    }

    #[test]
    fn test_grid_row_major_addressing() {
        let mut grid = Grid::new(2, 3, 0u8);
        grid[(1, 2)] = 7;
        grid[(0, 1)] = 3;

        assert_eq!(grid.get((1, 2)), Some(&7));
        assert_eq!(grid.get((2, 0)), None);
        assert_eq!(grid.get((0, 3)), None);

        let positions: Vec<_> = grid.iter().map(|(pos, _)| pos).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
    }

    #[test]
    #[should_panic(expected = "outside 2x3 grid")]
    fn test_grid_index_out_of_bounds_panics() {
        let grid = Grid::new(2, 3, 0u8);
        let _ = grid[(0, 3)];
    }

    #[test]
    fn test_move_cursor_ignores_out_of_bounds() {
        let mut game = MinesweeperGame::from_layout(&["M...", "....", "...."]);

        game.move_cursor(-1, 0);
        assert_eq!(game.cursor, (0, 0));

        game.move_cursor(1, 1);
        assert_eq!(game.cursor, (1, 1));

        // Diagonal that would cross the bottom edge is rejected outright,
        // not slid along the edge.
        game.move_cursor(1, 0);
        game.move_cursor(1, 1);
        assert_eq!(game.cursor, (2, 1));

        game.move_cursor(0, 2);
        assert_eq!(game.cursor, (2, 3));
        game.move_cursor(0, 1);
        assert_eq!(game.cursor, (2, 3));
    }

    #[test]
    fn test_mines_remaining() {
        let mut game = MinesweeperGame::from_layout(&["MM..", "....", "...."]);
        assert_eq!(game.mines_remaining(), 2);

        game.reveals[(2, 0)] = Reveal::Flagged;
        game.reveals[(2, 1)] = Reveal::Flagged;
        game.reveals[(2, 2)] = Reveal::Flagged;
        assert_eq!(game.mines_remaining(), -1);
    }

    #[test]
    fn test_cell_view() {
        let mut game = MinesweeperGame::from_layout(&["M.", "..", ".."]);
        assert_eq!(game.cell_view((0, 0)), CellView::Hidden);

        game.reveals[(0, 0)] = Reveal::Flagged;
        assert_eq!(game.cell_view((0, 0)), CellView::Flagged);

        game.reveals[(0, 1)] = Reveal::Seen;
        assert_eq!(game.cell_view((0, 1)), CellView::Count(1));

        game.reveals[(2, 1)] = Reveal::Seen;
        assert_eq!(game.cell_view((2, 1)), CellView::Empty);

        game.game_result = Some(MinesweeperResult::Loss);
        assert_eq!(game.cell_view((0, 0)), CellView::FlaggedMine);

        // A wrong flag stays a plain flag after the loss.
        game.reveals[(1, 1)] = Reveal::Flagged;
        assert_eq!(game.cell_view((1, 1)), CellView::Flagged);
    }

    #[test]
    fn test_score_table_ordering() {
        let table = ScoreTable::default();
        let win = table.score(MinesweeperResult::Win);
        let loss = table.score(MinesweeperResult::Loss);
        let quit = table.score(MinesweeperResult::Quit);

        assert!(loss <= quit);
        assert!(quit < win);
    }

    #[test]
    fn test_result_serializes_lowercase() {
        let json = serde_json::to_string(&MinesweeperResult::Loss).unwrap();
        assert_eq!(json, "\"loss\"");
    }
}
