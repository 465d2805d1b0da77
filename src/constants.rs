//! Tunables shared by the engine and the terminal shell.

/// Smallest board width accepted by the configuration prompt.
pub const MIN_BOARD_WIDTH: usize = 10;
/// Smallest board height accepted by the configuration prompt.
pub const MIN_BOARD_HEIGHT: usize = 10;

/// Lower bound for the bomb count, as a percentage of the board's cells.
pub const MIN_BOMB_PERCENT: usize = 20;
/// Upper bound for the bomb count, as a percentage of the board's cells.
pub const MAX_BOMB_PERCENT: usize = 80;

/// Terminal columns used to draw a single board cell (glyph + spacer).
pub const CELL_DRAW_WIDTH: u16 = 2;
/// Width of the info panel drawn next to the board.
pub const INFO_PANEL_WIDTH: u16 = 24;
/// Rows taken by the status bar under the board.
pub const STATUS_BAR_HEIGHT: u16 = 2;
/// Rows/columns taken by one border line.
pub const BORDER: u16 = 1;

/// Upper bound on rejection-sampling draws per cell before mine placement
/// falls back to a shuffle of the remaining clear cells.
pub const PLACEMENT_DRAWS_PER_CELL: usize = 8;

/// Default score for a solved board.
pub const WIN_SCORE: i32 = 30;
/// Default score for a detonation.
pub const LOSS_SCORE: i32 = 5;
/// Default score for leaving the board unresolved.
pub const QUIT_SCORE: i32 = 5;
