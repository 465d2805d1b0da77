//! Final session report handed back to the host application.

use serde::Serialize;

use crate::minesweeper::{MinesweeperGame, MinesweeperResult, ScoreTable};

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub result: MinesweeperResult,
    pub score: i32,
    pub levels_played: u32,
    /// Dimensions of the last level played.
    pub width: usize,
    pub height: usize,
    pub bombs: usize,
}

impl SessionReport {
    /// Build the report for a session. A game that never reached a terminal
    /// state (e.g. the terminal was torn down) counts as a quit.
    pub fn from_game(game: &MinesweeperGame, scores: &ScoreTable) -> Self {
        let result = game.game_result.unwrap_or(MinesweeperResult::Quit);

        Self {
            result,
            score: scores.score(result),
            levels_played: game.levels_played,
            width: game.config.width(),
            height: game.config.height(),
            bombs: game.config.bombs(),
        }
    }

    /// Report for a session abandoned before the first level existed.
    pub fn abandoned(scores: &ScoreTable) -> Self {
        Self {
            result: MinesweeperResult::Quit,
            score: scores.score(MinesweeperResult::Quit),
            levels_played: 0,
            width: 0,
            height: 0,
            bombs: 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
