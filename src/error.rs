//! Error types for the unwatermark crate.

/// Errors that can occur during watermark removal and batch processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to decode an embedded reference watermark PNG.
    ///
    /// This is fatal: without the reference assets no alpha map can be
    /// derived, so engine construction fails before any batch work starts.
    #[error("failed to decode embedded reference watermark: {0}")]
    AssetDecode(#[source] image::ImageError),

    /// The image format is not supported for output encoding.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred while decoding or encoding an image.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// The worker pool for batch processing could not be constructed.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
