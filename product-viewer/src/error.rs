use thiserror::Error;

/// Failures recognised by the viewer and launcher. None of them are fatal to
/// the page: each is logged where it happens and the operation stops there.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[cfg(any(target_arch = "wasm32", test))]
    #[error("Invalid product number: {0}")]
    InvalidProductId(i32),

    #[error("An error occurred while loading the model: {path}: {reason}")]
    AssetLoadFailure { path: String, reason: String },

    #[cfg(any(target_arch = "wasm32", test))]
    #[error("Browser API unavailable: {0}")]
    Browser(String),
}
