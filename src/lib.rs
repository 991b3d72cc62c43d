//! Snap Puzzle core crate.
//!
//! An N×N image puzzle for the browser: tiles start scattered over a square
//! play area, the player drags them around and released tiles snap onto the
//! grid. The puzzle is solved when every tile sits on its own cell.
//!
//! [`Board`] holds all of the game logic and knows nothing about the DOM; it
//! draws through the [`Surface`] trait and takes pointer coordinates as plain
//! numbers. The `host` module wires a board to a canvas, the frame loop and
//! mouse/touch/resize events, and is what the page calls via `start_puzzle()`.

use wasm_bindgen::prelude::*;

mod board;
mod config;
mod error;
mod geom;
mod host;
pub mod logger;
mod surface;

pub use board::{Board, Release, Tile};
pub use config::{DEFAULT_BOX_SIZE, DEFAULT_GRID_SIZE, PuzzleConfig};
pub use error::PuzzleError;
pub use geom::{Rect, Vec2};
pub use host::{PuzzleHandle, start_puzzle};
#[cfg(feature = "serde_json")]
pub use host::start_puzzle_with_config;
pub use surface::Surface;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(PuzzleConfig::default().level_filter());
}
