//! Minesweeper minigame: grid generation, flood-fill reveal and the turn
//! state machine.

pub mod config;
pub mod generation;
pub mod logic;
pub mod neighbors;
pub mod reveal;
pub mod types;

pub use config::{bomb_range, Bounds, ConfigError, LevelConfig};
pub use logic::{process_input, MinesweeperInput};
pub use types::{CellView, Grid, MinesweeperGame, MinesweeperResult, Reveal, ScoreTable, Tile};
