//! Minesweeper board rendering.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::game_common::{
    centered_rect, create_game_layout, render_game_over_banner, render_info_panel_frame,
    render_status_bar, result_color,
};
use crate::constants::{CELL_DRAW_WIDTH, INFO_PANEL_WIDTH};
use crate::minesweeper::{CellView, MinesweeperGame, MinesweeperResult, ScoreTable};

/// Render the whole board screen.
pub fn render_minesweeper(
    frame: &mut Frame,
    area: Rect,
    game: &MinesweeperGame,
    scores: &ScoreTable,
) {
    let layout = create_game_layout(
        frame,
        area,
        " Minesweeper ",
        Color::Yellow,
        INFO_PANEL_WIDTH,
    );

    render_grid(frame, layout.content, game);
    render_status(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game);

    if game.show_help {
        render_help(frame, layout.content);
    }

    if let Some(result) = game.game_result {
        let (title, message) = match result {
            MinesweeperResult::Win => ("Cleared!", "Every safe cell is open"),
            MinesweeperResult::Loss => ("Boom!", "You stepped on a mine"),
            MinesweeperResult::Quit => ("Abandoned", "The board was left unsolved"),
        };
        let score_line = format!("Score: {}", scores.score(result));
        render_game_over_banner(frame, layout.content, result, title, message, &score_line);
    }
}

/// Glyph and color for one cell. Glyphs are padded to the cell draw width.
pub fn cell_glyph(view: CellView) -> (&'static str, Color) {
    match view {
        CellView::Hidden => ("# ", Color::Gray),
        CellView::Flagged => ("! ", Color::Yellow),
        CellView::Empty => ("  ", Color::DarkGray),
        CellView::Mine => ("* ", Color::Red),
        CellView::FlaggedMine => ("! ", Color::Red),
        CellView::Count(n) => {
            const DIGITS: [&str; 9] = ["  ", "1 ", "2 ", "3 ", "4 ", "5 ", "6 ", "7 ", "8 "];
            let color = match n {
                1 => Color::Blue,
                2 => Color::Green,
                3 => Color::Red,
                4 => Color::Magenta,
                5 => Color::Yellow,
                6 => Color::Cyan,
                7 => Color::Gray,
                _ => Color::White,
            };
            (DIGITS.get(n as usize).copied().unwrap_or("? "), color)
        }
    }
}

/// Draw the board centered in `area`. Rows or columns that don't fit are
/// clipped.
fn render_grid(frame: &mut Frame, area: Rect, game: &MinesweeperGame) {
    let grid_width = (game.width() as u16).saturating_mul(CELL_DRAW_WIDTH);
    let grid_height = game.height() as u16;

    let x_offset = area.x + area.width.saturating_sub(grid_width) / 2;
    let y_offset = area.y + area.height.saturating_sub(grid_height) / 2;
    let visible_rows = grid_height.min(area.height);
    let visible_width = grid_width.min(area.width);

    for row in 0..visible_rows as usize {
        let spans: Vec<Span> = (0..game.width())
            .map(|col| {
                let (text, color) = cell_glyph(game.cell_view((row, col)));
                let mut style = Style::default().fg(color);
                if game.cursor == (row, col) && !game.is_over() {
                    style = style.bg(Color::DarkGray);
                }
                Span::styled(text, style)
            })
            .collect();

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_offset, y_offset + row as u16, visible_width, 1),
        );
    }
}

fn render_status(frame: &mut Frame, area: Rect, game: &MinesweeperGame) {
    if game.is_over() {
        return;
    }
    if game.show_help {
        render_status_bar(frame, area, "Help", Color::Cyan, &[("[Any]", "Close")]);
        return;
    }
    render_status_bar(
        frame,
        area,
        "Sweeping...",
        Color::Green,
        &[
            ("[Arrows]", "Move"),
            ("[Enter]", "Reveal"),
            ("[F]", "Flag"),
            ("[?]", "Help"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &MinesweeperGame) {
    let inner = render_info_panel_frame(frame, area);
    let label = Style::default().fg(Color::DarkGray);

    let remaining = game.mines_remaining();
    let remaining_color = if remaining < 0 {
        Color::Red
    } else {
        Color::White
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Minesweeper",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Level: ", label),
            Span::styled(
                game.levels_played.to_string(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Grid: ", label),
            Span::styled(
                format!("{}x{}", game.width(), game.height()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Bombs: ", label),
            Span::styled(
                game.total_mines().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Remaining: ", label),
            Span::styled(remaining.to_string(), Style::default().fg(remaining_color)),
        ]),
        Line::from(""),
    ];

    if let Some(result) = game.game_result {
        let text = match result {
            MinesweeperResult::Win => "Won",
            MinesweeperResult::Loss => "Lost",
            MinesweeperResult::Quit => "Quit",
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(result_color(result)),
        )));
    } else {
        for hint in ["[N] New level", "[Q] Quit"] {
            lines.push(Line::from(Span::styled(hint, label)));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

const HELP_LINES: &[&str] = &[
    "Open every cell that has no mine.",
    "A number counts the mines around it.",
    "",
    "Arrows / hjkl    move",
    "y u b m          move diagonally",
    "Enter / Space    open cell",
    "f                flag cell",
    "n                new level",
    "q / Esc          quit",
];

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 42, HELP_LINES.len() as u16 + 2);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let lines: Vec<Line> = HELP_LINES.iter().map(|l| Line::from(*l)).collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}
