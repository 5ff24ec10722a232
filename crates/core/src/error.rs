use thiserror::Error;

use crate::download::error::DownloadError;

/// Centralized error types for the application.
///
/// The user-facing behavior collapses every request failure into one fixed
/// message, but the kinds stay distinguishable for logs and future
/// observability: configuration, workspace, download, delivery.
#[derive(Error, Debug)]
pub enum AppError {
    /// Startup configuration problems (missing token file or field)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Per-chat scratch directory problems
    #[error("Workspace error: {0}")]
    Workspace(String),

    /// yt-dlp / ffmpeg fetch failures
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Chat transport failures while delivering the result
    #[cfg(feature = "telegram")]
    #[error("Delivery error: {0}")]
    Delivery(#[from] teloxide::RequestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
