//! Level configuration: board size, bomb count and the bounds they must obey.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::constants::{
    BORDER, CELL_DRAW_WIDTH, INFO_PANEL_WIDTH, MAX_BOMB_PERCENT, MIN_BOARD_HEIGHT,
    MIN_BOARD_WIDTH, MIN_BOMB_PERCENT, STATUS_BAR_HEIGHT,
};

/// A configuration value that falls outside its allowed range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("width {value} is out of range ({min}..={max})")]
    Width { value: usize, min: usize, max: usize },
    #[error("height {value} is out of range ({min}..={max})")]
    Height { value: usize, min: usize, max: usize },
    #[error("bomb count {value} is out of range ({min}..={max})")]
    Bombs { value: usize, min: usize, max: usize },
}

/// Allowed board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_width: usize,
    pub min_height: usize,
    pub max_width: usize,
    pub max_height: usize,
}

impl Bounds {
    /// Bounds for a board drawn inside a terminal of `cols` x `rows`.
    ///
    /// The board shares the screen with the outer border, the info panel and
    /// the status bar. Maxima never drop below the minima, so a tiny terminal
    /// still accepts a minimum-sized board (it will be clipped when drawn).
    pub fn for_area(cols: u16, rows: u16) -> Self {
        let usable_cols = cols.saturating_sub(2 * BORDER + INFO_PANEL_WIDTH);
        let usable_rows = rows.saturating_sub(2 * BORDER + STATUS_BAR_HEIGHT);

        Self {
            min_width: MIN_BOARD_WIDTH,
            min_height: MIN_BOARD_HEIGHT,
            max_width: ((usable_cols / CELL_DRAW_WIDTH) as usize).max(MIN_BOARD_WIDTH),
            max_height: (usable_rows as usize).max(MIN_BOARD_HEIGHT),
        }
    }

    pub fn width_range(&self) -> RangeInclusive<usize> {
        self.min_width..=self.max_width
    }

    pub fn height_range(&self) -> RangeInclusive<usize> {
        self.min_height..=self.max_height
    }
}

/// Allowed bomb counts for a `width` x `height` board: 20% to 80% of the
/// cells, both truncated toward zero.
pub fn bomb_range(width: usize, height: usize) -> RangeInclusive<usize> {
    let cells = width * height;
    (cells * MIN_BOMB_PERCENT / 100)..=(cells * MAX_BOMB_PERCENT / 100)
}

/// A validated level configuration. Only obtainable through [`LevelConfig::new`],
/// so every value that reaches the generator is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelConfig {
    width: usize,
    height: usize,
    bombs: usize,
}

impl LevelConfig {
    pub fn new(
        width: usize,
        height: usize,
        bombs: usize,
        bounds: &Bounds,
    ) -> Result<Self, ConfigError> {
        check_width(width, bounds)?;
        check_height(height, bounds)?;
        check_bombs(bombs, width, height)?;

        Ok(Self {
            width,
            height,
            bombs,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bombs(&self) -> usize {
        self.bombs
    }

    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Builds a configuration without range checks. Test fixtures use this to
    /// describe hand-made boards smaller than the playable minimum.
    #[cfg(test)]
    pub(crate) fn unchecked(width: usize, height: usize, bombs: usize) -> Self {
        Self {
            width,
            height,
            bombs,
        }
    }
}

pub fn check_width(width: usize, bounds: &Bounds) -> Result<(), ConfigError> {
    if bounds.width_range().contains(&width) {
        Ok(())
    } else {
        Err(ConfigError::Width {
            value: width,
            min: bounds.min_width,
            max: bounds.max_width,
        })
    }
}

pub fn check_height(height: usize, bounds: &Bounds) -> Result<(), ConfigError> {
    if bounds.height_range().contains(&height) {
        Ok(())
    } else {
        Err(ConfigError::Height {
            value: height,
            min: bounds.min_height,
            max: bounds.max_height,
        })
    }
}

pub fn check_bombs(bombs: usize, width: usize, height: usize) -> Result<(), ConfigError> {
    let range = bomb_range(width, height);
    if range.contains(&bombs) {
        Ok(())
    } else {
        Err(ConfigError::Bombs {
            value: bombs,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_bounds() -> Bounds {
        // 80x24 screen
        Bounds {
            min_width: 10,
            min_height: 10,
            max_width: 27,
            max_height: 20,
        }
    }

    #[test]
    fn test_bomb_range_truncates() {
        assert_eq!(bomb_range(10, 10), 20..=80);
        // 11 * 13 = 143 cells -> 28.6 and 114.4
        assert_eq!(bomb_range(11, 13), 28..=114);
    }

    #[test]
    fn test_bounds_for_area() {
        let bounds = Bounds::for_area(80, 24);
        assert_eq!(bounds.min_width, 10);
        assert_eq!(bounds.min_height, 10);
        // (80 - 2 - 24) / 2
        assert_eq!(bounds.max_width, 27);
        // 24 - 2 - 2
        assert_eq!(bounds.max_height, 20);
    }

    #[test]
    fn test_bounds_never_below_minimum() {
        let bounds = Bounds::for_area(20, 5);
        assert_eq!(bounds.max_width, 10);
        assert_eq!(bounds.max_height, 10);
    }

    #[test]
    fn test_level_config_accepts_range_edges() {
        let bounds = classic_bounds();
        assert!(LevelConfig::new(10, 10, 20, &bounds).is_ok());
        assert!(LevelConfig::new(10, 10, 80, &bounds).is_ok());
        assert!(LevelConfig::new(27, 20, 108, &bounds).is_ok());
    }

    #[test]
    fn test_level_config_rejects_width() {
        let err = LevelConfig::new(9, 10, 20, &classic_bounds()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Width {
                value: 9,
                min: 10,
                max: 27
            }
        );
    }

    #[test]
    fn test_level_config_rejects_height() {
        let err = LevelConfig::new(10, 21, 20, &classic_bounds()).unwrap_err();
        assert!(matches!(err, ConfigError::Height { value: 21, .. }));
    }

    #[test]
    fn test_level_config_rejects_bombs() {
        let bounds = classic_bounds();
        let too_few = LevelConfig::new(10, 10, 19, &bounds).unwrap_err();
        let too_many = LevelConfig::new(10, 10, 81, &bounds).unwrap_err();
        assert_eq!(
            too_few,
            ConfigError::Bombs {
                value: 19,
                min: 20,
                max: 80
            }
        );
        assert!(matches!(too_many, ConfigError::Bombs { value: 81, .. }));
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::Bombs {
            value: 5,
            min: 20,
            max: 80,
        };
        assert_eq!(err.to_string(), "bomb count 5 is out of range (20..=80)");
    }
}
