//! The puzzle engine: an N×N set of image tiles scattered over a play area.
//!
//! The host feeds pointer events in canvas coordinates and calls [`Board::render`]
//! once per frame. Grabbing a tile brings it to the front; releasing it snaps it
//! to the grid and re-checks the win condition. Once every tile
//! sits exactly on its own slot the board is solved, reports completion once,
//! and ignores further grabs.
//!
//! Tiles are kept in draw order: the last tile is drawn last and is the one a
//! click hits when several overlap.

use rand::Rng;

use crate::error::PuzzleError;
use crate::geom::{Rect, Vec2};
use crate::surface::Surface;

mod layout;
mod snap;
mod solve;

/// One draggable image piece.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile<I> {
    image: I,
    position: Vec2,
    /// Row-major target slot, fixed at creation.
    correct_index: usize,
}

impl<I> Tile<I> {
    pub fn image(&self) -> &I {
        &self.image
    }

    /// Current top-left corner in canvas space.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    fn rect(&self, cell: Vec2) -> Rect {
        Rect {
            origin: self.position,
            width: cell.x,
            height: cell.y,
        }
    }
}

/// Active grab. The dragged tile is always the last one in draw order.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DragState {
    /// Tile position minus pointer position at grab time.
    offset: Vec2,
}

/// Result of a pointer release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// No tile was being dragged.
    Idle,
    /// Tile dropped; `correct` tiles are now on their own slot.
    Placed { correct: usize },
    /// This release completed the puzzle. Returned once per board.
    Solved,
}

pub struct Board<I, R> {
    bounds: Rect,
    grid_size: u32,
    cell: Vec2,
    tiles: Vec<Tile<I>>,
    drag: Option<DragState>,
    solved: bool,
    on_solved: Option<Box<dyn FnOnce()>>,
    rng: R,
}

impl<I, R: Rng> Board<I, R> {
    /// Build a board over `bounds` with one tile per image, scattered at
    /// random. Image `i` belongs in slot `i` (row-major).
    pub fn new(bounds: Rect, images: Vec<I>, grid_size: u32, mut rng: R) -> Result<Self, PuzzleError> {
        if grid_size == 0 {
            return Err(PuzzleError::GridSize);
        }
        check_bounds(bounds)?;
        let expected = grid_size as usize * grid_size as usize;
        if images.len() != expected {
            return Err(PuzzleError::ImageCount {
                expected,
                actual: images.len(),
            });
        }

        let cell = layout::cell_size(bounds, grid_size);
        let mut tiles: Vec<Tile<I>> = images
            .into_iter()
            .enumerate()
            .map(|(correct_index, image)| Tile {
                image,
                position: bounds.origin,
                correct_index,
            })
            .collect();
        layout::scatter(&mut tiles, bounds, cell, &mut rng);

        log::info!(
            "puzzle created: {n}x{n} grid, cell {:.1}x{:.1}",
            cell.x,
            cell.y,
            n = grid_size
        );
        Ok(Self {
            bounds,
            grid_size,
            cell,
            tiles,
            drag: None,
            solved: false,
            on_solved: None,
            rng,
        })
    }

    /// Move the play area (window resize). The layout is rebuilt from
    /// scratch: new cell size, every tile re-scattered, any drag dropped.
    /// A solved board stays solved and locked.
    pub fn reposition(&mut self, bounds: Rect) -> Result<(), PuzzleError> {
        check_bounds(bounds)?;
        self.bounds = bounds;
        self.cell = layout::cell_size(bounds, self.grid_size);
        self.drag = None;
        layout::scatter(&mut self.tiles, bounds, self.cell, &mut self.rng);
        log::info!(
            "puzzle repositioned to ({:.1}, {:.1}) {:.1}x{:.1}",
            bounds.origin.x,
            bounds.origin.y,
            bounds.width,
            bounds.height
        );
        Ok(())
    }
}

impl<I, R> Board<I, R> {
    /// Register the completion observer. It runs at most once, on the
    /// release that solves the board.
    pub fn on_solved(&mut self, f: impl FnOnce() + 'static) {
        self.on_solved = Some(Box::new(f));
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Width and height of one grid cell (and of every tile).
    pub fn cell_size(&self) -> Vec2 {
        self.cell
    }

    /// Tiles in draw order.
    pub fn tiles(&self) -> &[Tile<I>] {
        &self.tiles
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn correct_count(&self) -> usize {
        solve::count_correct(&self.tiles, self.bounds, self.cell, self.grid_size)
    }

    /// Outline of the play area, then every tile in draw order.
    pub fn render<S>(&self, surface: &mut S)
    where
        S: Surface<Image = I>,
    {
        surface.stroke_rect(self.bounds);
        for tile in &self.tiles {
            surface.draw_image(&tile.image, tile.rect(self.cell));
        }
    }

    /// Topmost tile whose cell strictly contains `p`.
    fn hit(&self, p: Vec2) -> Option<usize> {
        self.tiles
            .iter()
            .rposition(|t| t.rect(self.cell).contains_strict(p))
    }

    /// Grab the topmost tile under the pointer. Returns whether a tile was
    /// grabbed; nothing happens once solved.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) -> bool {
        if self.solved {
            return false;
        }
        let pointer = Vec2::new(x, y);
        let Some(idx) = self.hit(pointer) else {
            return false;
        };
        let tile = self.tiles.remove(idx);
        self.drag = Some(DragState {
            offset: tile.position - pointer,
        });
        self.tiles.push(tile);
        true
    }

    /// Follow the pointer with the grabbed tile, if any.
    pub fn on_pointer_drag(&mut self, x: f64, y: f64) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(tile) = self.tiles.last_mut() else {
            return false;
        };
        tile.position = Vec2::new(x, y) + drag.offset;
        true
    }

    /// Drop the grabbed tile: snap it, then check for completion.
    pub fn on_pointer_up(&mut self) -> Release {
        if self.drag.take().is_none() {
            return Release::Idle;
        }
        if let Some(tile) = self.tiles.last_mut() {
            tile.position = snap::snap(tile.position, self.bounds, self.cell, self.grid_size);
        }

        let correct = self.correct_count();
        if self.solved || correct != self.tiles.len() {
            log::debug!("right places: {correct}");
            return Release::Placed { correct };
        }

        self.solved = true;
        log::info!("puzzle solved");
        if let Some(notify) = self.on_solved.take() {
            notify();
        }
        Release::Solved
    }
}

fn check_bounds(bounds: Rect) -> Result<(), PuzzleError> {
    if bounds.has_area() && bounds.origin.x.is_finite() && bounds.origin.y.is_finite() {
        Ok(())
    } else {
        Err(PuzzleError::Dimensions {
            width: bounds.width,
            height: bounds.height,
        })
    }
}
