//! Flood-fill reveal over the reveal grid.

use super::neighbors;
use super::types::{Grid, Reveal, Tile};

/// Reveal the cell at `(row, col)` and open the connected zero-count region
/// around it.
///
/// The target must not be a mine; detonation is the caller's business.
/// Unknown and flagged cells turn Seen. A zero-count cell queues every
/// in-bounds neighbor that is not Seen yet; a nonzero cell stops the
/// expansion, so the cascade ends at the first ring of numbered cells.
/// Seen cells are skipped, which is the only termination guard needed.
///
/// Returns how many cells turned Seen.
pub fn reveal(mines: &Grid<Tile>, reveals: &mut Grid<Reveal>, row: usize, col: usize) -> usize {
    debug_assert!(!mines[(row, col)].is_mine(), "reveal called on a mine");

    let (height, width) = (mines.height(), mines.width());
    let mut opened = 0;
    let mut stack: Vec<(usize, usize)> = vec![(row, col)];

    while let Some(pos) = stack.pop() {
        if reveals[pos] == Reveal::Seen {
            continue;
        }

        reveals[pos] = Reveal::Seen;
        opened += 1;

        if mines[pos] == Tile::Clear(0) {
            stack.extend(
                neighbors::in_bounds(pos.0, pos.1, 1, height, width)
                    .into_iter()
                    .filter(|&n| reveals[n] != Reveal::Seen),
            );
        }
    }

    opened
}
