//! Error types for the print pipeline and image signing.

use thiserror::Error;

/// Print pipeline failures. None of these reach the caller of
/// [`crate::print::print_receipt`]; they end up in the log.
#[derive(Debug, Error)]
pub enum PrintError {
    /// The host could not create a rendering surface
    #[error("Could not create print surface: {0}")]
    SurfaceUnavailable(String),

    /// The surface exists but its document cannot be opened or written
    #[error("Could not open print document: {0}")]
    DocumentUnavailable(String),

    /// The platform print call failed
    #[error("Print failed: {0}")]
    Trigger(String),
}

/// Signed image URL failures.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Signing request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Signing endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Signing endpoint returned no URL")]
    EmptyUrl,
}
