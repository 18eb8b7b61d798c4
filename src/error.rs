//! Structured error types for gridview.
//!
//! Runtime conditions (scroll-boundary probes, degenerate datasets, detached
//! surfaces) are handled with sentinels or teardown, never errors; the error
//! type exists for host programming mistakes and boundary failures.

/// All errors that can occur while configuring and driving the grid core.
#[derive(Debug, thiserror::Error)]
pub enum GridViewError {
    /// An overlay pane kind the core does not know about was requested.
    #[error("Unknown overlay pane kind: {0}")]
    UnknownOverlay(String),

    /// Settings snapshot rejected at configuration time.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// A surface operation failed (host container missing or unusable).
    #[error("Surface error: {0}")]
    Surface(String),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// JSON (de)serialization of settings or debug output.
    #[error("Serialization: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for string errors at the host boundary.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridViewError>;

impl From<String> for GridViewError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridViewError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridViewError> for wasm_bindgen::JsValue {
    fn from(e: GridViewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
