//! Minesweeper turn processing: cursor movement, flagging, reveals and the
//! win/loss transitions.

use rand::Rng;
use tracing::{debug, info};

use super::config::LevelConfig;
use super::reveal::reveal;
use super::types::{MinesweeperGame, MinesweeperResult, Reveal};

/// A resolved player action (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinesweeperInput {
    /// Move the cursor by (d_row, d_col).
    Move(i32, i32),
    Flag,
    Confirm,
    /// Start over with an already validated configuration.
    NewLevel(LevelConfig),
    Quit,
    Help,
    Other,
}

/// Process one input during an active game.
/// Returns true if the input was handled; finished games ignore everything.
pub fn process_input<R: Rng>(
    game: &mut MinesweeperGame,
    input: MinesweeperInput,
    rng: &mut R,
) -> bool {
    if game.is_over() {
        return false;
    }

    // Help overlay swallows the next key
    if game.show_help {
        game.show_help = false;
        return true;
    }

    match input {
        MinesweeperInput::Move(d_row, d_col) => game.move_cursor(d_row, d_col),
        MinesweeperInput::Flag => {
            let (row, col) = game.cursor;
            toggle_flag(game, row, col);
        }
        MinesweeperInput::Confirm => {
            let (row, col) = game.cursor;
            confirm_cell(game, row, col);
        }
        MinesweeperInput::NewLevel(config) => game.new_level(config, rng),
        MinesweeperInput::Quit => {
            info!("player quit");
            game.game_result = Some(MinesweeperResult::Quit);
        }
        MinesweeperInput::Help => game.show_help = true,
        MinesweeperInput::Other => {}
    }
    true
}

/// End the session at once, even with the help overlay open. A game that
/// already finished keeps its result.
pub fn force_quit(game: &mut MinesweeperGame) {
    game.show_help = false;
    if !game.is_over() {
        info!("player force quit");
        game.game_result = Some(MinesweeperResult::Quit);
    }
}

/// Toggle the flag on a cell. Seen cells cannot be flagged.
pub fn toggle_flag(game: &mut MinesweeperGame, row: usize, col: usize) {
    let cell = &mut game.reveals[(row, col)];
    *cell = match *cell {
        Reveal::Unknown => Reveal::Flagged,
        Reveal::Flagged => Reveal::Unknown,
        Reveal::Seen => Reveal::Seen,
    };
}

/// Reveal the cell at the given position.
///
/// - Seen cells: no action.
/// - Mine: the game is lost and every mine is exposed.
/// - Otherwise the flood fill runs from here and the win condition is checked.
///
/// Flagged cells are revealed like unknown ones.
/// Returns true if the game continues, false if a mine was hit.
pub fn confirm_cell(game: &mut MinesweeperGame, row: usize, col: usize) -> bool {
    if game.reveals[(row, col)] == Reveal::Seen {
        return true;
    }

    if game.mines[(row, col)].is_mine() {
        game.reveals[(row, col)] = Reveal::Seen;
        game.game_result = Some(MinesweeperResult::Loss);
        reveal_all_mines(game);
        info!(row, col, "mine detonated");
        return false;
    }

    let opened = reveal(&game.mines, &mut game.reveals, row, col);
    debug!(row, col, opened, "cells revealed");

    check_win_condition(game);
    true
}

/// Expose every unflagged mine (called on game loss). Flags stay in place so
/// correctly flagged mines can be drawn differently.
pub fn reveal_all_mines(game: &mut MinesweeperGame) {
    for (pos, tile) in game.mines.iter() {
        if tile.is_mine() && game.reveals[pos] == Reveal::Unknown {
            game.reveals[pos] = Reveal::Seen;
        }
    }
}

/// True when every unknown or flagged cell hides a mine.
pub fn is_won(game: &MinesweeperGame) -> bool {
    game.reveals
        .iter()
        .filter(|(_, reveal)| **reveal != Reveal::Seen)
        .all(|(pos, _)| game.mines[pos].is_mine())
}

/// Check if the player has won the game and record the result.
pub fn check_win_condition(game: &mut MinesweeperGame) {
    if is_won(game) {
        info!(
            revealed = game.revealed_count(),
            level = game.levels_played,
            "board cleared"
        );
        game.game_result = Some(MinesweeperResult::Win);
    }
}
