//! Neighbor enumeration around a grid coordinate.

/// Coordinates surrounding `center` up to Chebyshev distance `radius`.
///
/// Nearest ring first, row-major inside each ring; the center itself is never
/// included. Nothing is clipped to a board, so callers filter the result
/// against their own bounds (see [`in_bounds`]).
pub fn ring(center: (isize, isize), radius: usize) -> Vec<(isize, isize)> {
    let (row, col) = center;
    let mut coords = Vec::with_capacity((2 * radius + 1).pow(2).saturating_sub(1));

    for distance in 1..=radius as isize {
        for d_row in -distance..=distance {
            for d_col in -distance..=distance {
                if d_row.abs().max(d_col.abs()) != distance {
                    continue;
                }
                coords.push((row + d_row, col + d_col));
            }
        }
    }

    coords
}

/// The part of [`ring`] that falls inside a `height` x `width` board.
pub fn in_bounds(
    row: usize,
    col: usize,
    radius: usize,
    height: usize,
    width: usize,
) -> Vec<(usize, usize)> {
    ring((row as isize, col as isize), radius)
        .into_iter()
        .filter(|&(r, c)| r >= 0 && c >= 0 && (r as usize) < height && (c as usize) < width)
        .map(|(r, c)| (r as usize, c as usize))
        .collect()
}
