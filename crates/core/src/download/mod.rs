//! Audio fetch pipeline: one yt-dlp invocation per request.

pub mod audio;
pub mod error;

// Re-exports for convenience
pub use audio::{fetch_audio, FetchedAudio};
pub use error::DownloadError;
