// Cell sizing and the randomized starting layout.
use rand::Rng;

use super::Tile;
use crate::geom::{Rect, Vec2};

pub(crate) fn cell_size(bounds: Rect, grid_size: u32) -> Vec2 {
    let n = grid_size as f64;
    Vec2::new(bounds.width / n, bounds.height / n)
}

/// Uniform position for a cell-sized tile fully inside `bounds`.
/// Draws x first, then y.
pub(crate) fn random_position(bounds: Rect, cell: Vec2, rng: &mut impl Rng) -> Vec2 {
    let x = bounds.origin.x + rng.gen_range(0.0..=free_span(bounds.width, cell.x));
    let y = bounds.origin.y + rng.gen_range(0.0..=free_span(bounds.height, cell.y));
    Vec2::new(x, y)
}

/// Room left for a tile's corner along one axis. A one-cell grid can round
/// `extent - cell` a hair below zero.
fn free_span(extent: f64, cell: f64) -> f64 {
    (extent - cell).max(0.0)
}

/// Give every tile a fresh random position, in correct-index order so a
/// seeded layout does not depend on the current draw order.
pub(crate) fn scatter<I>(tiles: &mut [Tile<I>], bounds: Rect, cell: Vec2, rng: &mut impl Rng) {
    tiles.sort_by_key(|t| t.correct_index);
    for tile in tiles.iter_mut() {
        tile.position = random_position(bounds, cell, rng);
    }
}
