//! Puzzle settings supplied by the page.

use std::str::FromStr;

use log::LevelFilter;

use crate::error::PuzzleError;
use crate::geom::Rect;

pub const DEFAULT_GRID_SIZE: u32 = 2;
pub const DEFAULT_BOX_SIZE: f64 = 400.0;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PuzzleConfig {
    /// Side length N of the N×N grid.
    pub grid_size: u32,
    pub box_width: f64,
    pub box_height: f64,
    /// CSS colour for the play-area outline.
    pub outline_color: String,
    /// Fixed RNG seed; `None` draws from the browser's entropy source.
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            box_width: DEFAULT_BOX_SIZE,
            box_height: DEFAULT_BOX_SIZE,
            outline_color: "#ffffff".to_string(),
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl PuzzleConfig {
    #[cfg(feature = "serde_json")]
    pub fn from_json(s: &str) -> Result<Self, PuzzleError> {
        let cfg: PuzzleConfig =
            serde_json::from_str(s).map_err(|e| PuzzleError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.grid_size == 0 {
            return Err(PuzzleError::GridSize);
        }
        if !Rect::new(0.0, 0.0, self.box_width, self.box_height).has_area() {
            return Err(PuzzleError::Dimensions {
                width: self.box_width,
                height: self.box_height,
            });
        }
        Ok(())
    }

    /// Unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// The play area centered inside a canvas of the given size.
    pub fn play_area(&self, canvas_width: f64, canvas_height: f64) -> Rect {
        Rect::new(
            (canvas_width - self.box_width) / 2.0,
            (canvas_height - self.box_height) / 2.0,
            self.box_width,
            self.box_height,
        )
    }
}
