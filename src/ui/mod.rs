pub mod config_prompt;
pub mod game_common;
pub mod minesweeper_scene;

use crate::minesweeper::{MinesweeperGame, ScoreTable};
use config_prompt::ConfigPrompt;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw one frame: the board (if a level exists) with the configuration
/// prompt on top of it while one is open.
pub fn draw(
    frame: &mut Frame,
    game: Option<&MinesweeperGame>,
    prompt: Option<&ConfigPrompt>,
    scores: &ScoreTable,
) {
    let size = frame.size();

    match game {
        Some(game) => minesweeper_scene::render_minesweeper(frame, size, game, scores),
        None => {
            let block = Block::default()
                .title(" Minesweeper ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow));
            frame.render_widget(block, size);

            let welcome = Paragraph::new("Choose a board size to begin")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            if size.height > 2 {
                frame.render_widget(
                    welcome,
                    Rect {
                        y: size.y + 1,
                        height: 1,
                        ..size
                    },
                );
            }
        }
    }

    if let Some(prompt) = prompt {
        prompt.draw(frame, size);
    }
}
