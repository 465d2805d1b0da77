//! Minefield - terminal minesweeper.
//!
//! The engine (`minesweeper`) is UI-agnostic; `input` and `ui` adapt it to a
//! crossterm/ratatui terminal and `report` turns the outcome into a score.

pub mod constants;
pub mod input;
pub mod minesweeper;
pub mod report;
pub mod ui;
