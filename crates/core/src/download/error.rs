use thiserror::Error;

/// Categorized fetch failures.
///
/// The request handler treats all of these identically (one fixed user
/// message), but the categories keep operator logs searchable and leave
/// room for per-kind handling later.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// yt-dlp failures: bad URL, unsupported resource, network, bad exit code
    #[error("yt-dlp: {0}")]
    YtDlp(String),

    /// ffmpeg post-processing failures (mp3 extraction)
    #[error("ffmpeg: {0}")]
    Ffmpeg(String),

    /// Downloader finished but reported no title
    #[error("metadata: {0}")]
    Metadata(String),

    /// Expected output file not found after the download step
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Download or transcode timed out
    #[error("timeout: {0}")]
    Timeout(String),

    /// Catch-all for uncategorized errors
    #[error("{0}")]
    Other(String),
}

/// Classifies a non-zero yt-dlp exit by its stderr.
///
/// yt-dlp reports post-processing (ffmpeg) problems with a distinct prefix;
/// everything else stays a downloader error. The last stderr line usually
/// carries the actual ERROR message, so it becomes the detail.
pub fn classify_ytdlp_stderr(stderr: &str) -> DownloadError {
    let detail = stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("yt-dlp exited with an error")
        .trim()
        .to_string();

    let lower = stderr.to_lowercase();
    if lower.contains("postprocessing") || lower.contains("ffmpeg") || lower.contains("ffprobe") {
        DownloadError::Ffmpeg(detail)
    } else {
        DownloadError::YtDlp(detail)
    }
}
