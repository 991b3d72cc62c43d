//! Post-release alignment of a tile to the grid.
//!
//! The scan walks every (row line, column line) pair, rows outer. At each
//! pair the x coordinate may move to the column line, then the y coordinate
//! to the row line. A line qualifies when the coordinate is strictly within
//! one cell of it and the other coordinate, as it stands at that moment,
//! sits in a loose band around the board (`(start - cell, end)` on that
//! axis), not a precise row/column check. Later pairs are tested against the
//! moved tile, so one axis snapping can bring the other into its band. No
//! qualifying line leaves the coordinate where it was dropped.

use crate::geom::{Rect, Vec2};

/// Line coordinates `start, start + step, ...` while below `start + extent`.
/// Built by repeated addition, so a fractional step can yield one extra line
/// just short of the far edge. Capped at `count + 1` lines so a step lost to
/// float precision cannot spin forever.
fn grid_lines(start: f64, extent: f64, step: f64, count: u32) -> impl Iterator<Item = f64> {
    let end = start + extent;
    std::iter::successors(Some(start), move |line| Some(line + step))
        .take_while(move |line| *line < end)
        .take(count as usize + 1)
}

fn near_line(pos: f64, line: f64, step: f64) -> bool {
    pos > line - step && pos < line + step
}

/// `frame_end` is the last cell's leading edge; the band extends one cell
/// past it, which puts its upper limit at the board's far edge.
fn inside_band(pos: f64, frame_start: f64, frame_end: f64, step: f64) -> bool {
    pos > frame_start - step && pos < frame_end + step
}

pub(crate) fn snap(mut pos: Vec2, bounds: Rect, cell: Vec2, grid_size: u32) -> Vec2 {
    let x_in_band =
        |x: f64| inside_band(x, bounds.origin.x, bounds.right() - cell.x, cell.x);
    let y_in_band =
        |y: f64| inside_band(y, bounds.origin.y, bounds.bottom() - cell.y, cell.y);

    for row in grid_lines(bounds.origin.y, bounds.height, cell.y, grid_size) {
        for col in grid_lines(bounds.origin.x, bounds.width, cell.x, grid_size) {
            if near_line(pos.x, col, cell.x) && y_in_band(pos.y) {
                pos.x = col;
            }
            if near_line(pos.y, row, cell.y) && x_in_band(pos.x) {
                pos.y = row;
            }
        }
    }
    pos
}
