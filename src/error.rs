//! Error types for the host layer.
//!
//! The simulation itself is infallible. Everything that talks to the browser
//! (canvas lookup, LocalStorage, JSON round-trips) returns [`HostError`]
//! through the crate [`Result`] alias.

/// Errors raised while wiring the game to its host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// No global `window` object (not running in a browser).
    #[error("no window available")]
    NoWindow,

    /// The window has no document.
    #[error("window has no document")]
    NoDocument,

    /// The canvas element could not be found.
    #[error("canvas element #{0} not found")]
    MissingCanvas(String),

    /// The element exists but is not a `<canvas>`.
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    /// The canvas refused to hand out a 2D context.
    #[error("2d rendering context unavailable")]
    NoContext2d,

    /// LocalStorage is disabled or inaccessible.
    #[error("local storage unavailable")]
    StorageUnavailable,

    /// A JavaScript call threw.
    #[error("javascript error: {0}")]
    Js(String),

    /// Stored JSON could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HostError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        HostError::Js(format!("{value:?}"))
    }
}

/// Convenience alias for host-layer results.
pub type Result<T> = std::result::Result<T, HostError>;
