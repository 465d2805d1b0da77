//! Key resolution: crossterm key events to named actions.
//!
//! The engine never sees raw keys; everything goes through here.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::minesweeper::MinesweeperInput;

/// What a key press asks for on the board screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Goes straight to the state machine.
    Play(MinesweeperInput),
    /// Open the configuration prompt; the state machine receives a
    /// `NewLevel` once the prompt produced a valid configuration.
    RequestNewLevel,
    /// Ctrl-C: leave the session whatever is on screen.
    ForceQuit,
}

/// Input actions for the configuration prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    Digit(u8),
    Backspace,
    Submit,
    Cancel,
    /// Ctrl-C: leave the session, not just the prompt.
    Quit,
    Other,
}

/// Direction vector for a movement key, as (d_row, d_col).
fn direction(code: KeyCode) -> Option<(i32, i32)> {
    let dir = match code {
        KeyCode::Up | KeyCode::Char('k') => (-1, 0),
        KeyCode::Down | KeyCode::Char('j') => (1, 0),
        KeyCode::Left | KeyCode::Char('h') => (0, -1),
        KeyCode::Right | KeyCode::Char('l') => (0, 1),
        KeyCode::Home | KeyCode::Char('y') => (-1, -1),
        KeyCode::PageUp | KeyCode::Char('u') => (-1, 1),
        KeyCode::End | KeyCode::Char('b') => (1, -1),
        KeyCode::PageDown | KeyCode::Char('m') => (1, 1),
        _ => return None,
    };
    Some(dir)
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Resolve a key on the board screen. Key releases resolve to `Other`.
pub fn map_game_key(key: KeyEvent) -> GameCommand {
    use MinesweeperInput::*;

    if key.kind == KeyEventKind::Release {
        return GameCommand::Play(Other);
    }

    if is_ctrl_c(key) {
        return GameCommand::ForceQuit;
    }

    if let Some((d_row, d_col)) = direction(key.code) {
        return GameCommand::Play(Move(d_row, d_col));
    }

    match key.code {
        KeyCode::Char('f') | KeyCode::Char('F') => GameCommand::Play(Flag),
        KeyCode::Enter | KeyCode::Char(' ') => GameCommand::Play(Confirm),
        KeyCode::Char('n') | KeyCode::Char('N') => GameCommand::RequestNewLevel,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => GameCommand::Play(Quit),
        KeyCode::Char('?') => GameCommand::Play(Help),
        _ => GameCommand::Play(Other),
    }
}

/// Resolve a key inside the configuration prompt.
pub fn map_prompt_key(key: KeyEvent) -> PromptInput {
    if key.kind == KeyEventKind::Release {
        return PromptInput::Other;
    }

    if is_ctrl_c(key) {
        return PromptInput::Quit;
    }

    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => PromptInput::Digit(c as u8 - b'0'),
        KeyCode::Backspace => PromptInput::Backspace,
        KeyCode::Enter => PromptInput::Submit,
        KeyCode::Esc => PromptInput::Cancel,
        _ => PromptInput::Other,
    }
}
