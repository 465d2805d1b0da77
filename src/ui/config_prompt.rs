//! Configuration prompt: asks for width, height and bomb count in turn and
//! keeps asking until each value is in range.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::ops::RangeInclusive;
use tracing::debug;

use super::game_common::centered_rect;
use crate::input::PromptInput;
use crate::minesweeper::config::{bomb_range, check_bombs, check_height, check_width};
use crate::minesweeper::{Bounds, ConfigError, LevelConfig};

/// Longest number the prompt accepts.
const MAX_INPUT_DIGITS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptField {
    Width,
    Height,
    Bombs,
}

impl PromptField {
    fn label(&self) -> &'static str {
        match self {
            Self::Width => "Level width:",
            Self::Height => "Level height:",
            Self::Bombs => "Number of bombs:",
        }
    }
}

/// Result of feeding one key to the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Done(LevelConfig),
    Cancelled,
    /// The player asked to end the whole session.
    Quit,
}

pub struct ConfigPrompt {
    bounds: Bounds,
    pub field: PromptField,
    pub input: String,
    pub error: Option<ConfigError>,
    width: usize,
    height: usize,
    /// Bomb count to prefill once the board size is known.
    preferred_bombs: Option<usize>,
}

/// Keep `value` if it is in range, otherwise fall back to the range minimum.
fn in_range_or_min(value: Option<usize>, range: RangeInclusive<usize>) -> usize {
    match value {
        Some(v) if range.contains(&v) => v,
        _ => *range.start(),
    }
}

impl ConfigPrompt {
    /// A prompt prefilled with the minimum values.
    pub fn new(bounds: Bounds) -> Self {
        Self::with_values(bounds, None, None, None)
    }

    /// A prompt prefilled with the given values, each replaced by its minimum
    /// when out of range.
    pub fn with_values(
        bounds: Bounds,
        width: Option<usize>,
        height: Option<usize>,
        bombs: Option<usize>,
    ) -> Self {
        let width = in_range_or_min(width, bounds.width_range());
        let height = in_range_or_min(height, bounds.height_range());

        Self {
            bounds,
            field: PromptField::Width,
            input: width.to_string(),
            error: None,
            width,
            height,
            preferred_bombs: bombs,
        }
    }

    /// Allowed values for the field being asked.
    pub fn current_range(&self) -> RangeInclusive<usize> {
        match self.field {
            PromptField::Width => self.bounds.width_range(),
            PromptField::Height => self.bounds.height_range(),
            PromptField::Bombs => bomb_range(self.width, self.height),
        }
    }

    pub fn handle_input(&mut self, input: PromptInput) -> PromptOutcome {
        match input {
            PromptInput::Digit(d) => {
                if self.input.len() < MAX_INPUT_DIGITS {
                    self.input.push(char::from(b'0' + d));
                }
            }
            PromptInput::Backspace => {
                self.input.pop();
            }
            PromptInput::Submit => return self.submit(),
            PromptInput::Cancel => return PromptOutcome::Cancelled,
            PromptInput::Quit => return PromptOutcome::Quit,
            PromptInput::Other => {}
        }
        PromptOutcome::Pending
    }

    fn submit(&mut self) -> PromptOutcome {
        let value = self.input.parse::<usize>().unwrap_or(0);

        let checked = match self.field {
            PromptField::Width => check_width(value, &self.bounds),
            PromptField::Height => check_height(value, &self.bounds),
            PromptField::Bombs => check_bombs(value, self.width, self.height),
        };

        if let Err(err) = checked {
            debug!(%err, "configuration value rejected");
            self.error = Some(err);
            self.input = self.current_range().start().to_string();
            return PromptOutcome::Pending;
        }

        self.error = None;
        match self.field {
            PromptField::Width => {
                self.width = value;
                self.field = PromptField::Height;
                self.input = self.height.to_string();
            }
            PromptField::Height => {
                self.height = value;
                self.field = PromptField::Bombs;
                let bombs = in_range_or_min(self.preferred_bombs, self.current_range());
                self.input = bombs.to_string();
            }
            PromptField::Bombs => {
                match LevelConfig::new(self.width, self.height, value, &self.bounds) {
                    Ok(config) => return PromptOutcome::Done(config),
                    Err(err) => self.error = Some(err),
                }
            }
        }
        PromptOutcome::Pending
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let popup = centered_rect(area, 44, 11);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .title(" New Level ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Label
                Constraint::Length(3), // Input field
                Constraint::Length(1), // Range
                Constraint::Length(1), // Validation
                Constraint::Min(0),    // Filler
                Constraint::Length(1), // Controls
            ])
            .split(inner);

        let label = Paragraph::new(self.field.label()).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(label, chunks[0]);

        let input_widget = Paragraph::new(format!("{}_", self.input))
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(input_widget, chunks[1]);

        let range = self.current_range();
        let range_line = Paragraph::new(format!("Min: {} Max: {}", range.start(), range.end()))
            .style(Style::default().fg(Color::Gray));
        f.render_widget(range_line, chunks[2]);

        if let Some(error) = &self.error {
            let line = Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ));
            f.render_widget(Paragraph::new(line), chunks[3]);
        }

        let controls = Paragraph::new("[Enter] Accept    [Esc] Cancel")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(controls, chunks[5]);
    }
}
