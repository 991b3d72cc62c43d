use wasm_bindgen::JsValue;

/// Caller contract violations and host failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PuzzleError {
    #[error("grid size must be at least 1")]
    GridSize,
    #[error("expected {expected} images for the grid, got {actual}")]
    ImageCount { expected: usize, actual: usize },
    #[error("play area must have positive size, got {width}x{height}")]
    Dimensions { width: f64, height: f64 },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("dom error: {0}")]
    Dom(String),
}

impl From<PuzzleError> for JsValue {
    fn from(err: PuzzleError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
