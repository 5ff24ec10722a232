//! Audio fetch: a single yt-dlp invocation that downloads the best audio
//! stream, transcodes it to mp3 through ffmpeg and reports the resolved
//! title on stdout.
//!
//! Title resolution and download are deliberately one call: `--print`
//! together with `--no-simulate` makes yt-dlp emit the title from the same
//! metadata extraction that feeds the download, so there is no second
//! round-trip and no window for the resource to change in between.

use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::config;
use crate::download::error::{classify_ytdlp_stderr, DownloadError};
use crate::error::{AppError, AppResult};
use crate::process::run_with_timeout;

/// A fetched audio artifact: resolved display title plus the local file.
///
/// The backing file lives inside the request's workspace and disappears
/// when the workspace is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAudio {
    pub title: String,
    pub path: PathBuf,
}

/// Builds the yt-dlp argument list for one fetch.
///
/// The output directory is passed explicitly (`--paths`), so the call never
/// touches the process working directory. The URL is handed over verbatim:
/// no validation happens here, a bad link surfaces as a downloader error.
fn ytdlp_args(url: &str, dir: &Path) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "--paths".to_string(),
        dir.display().to_string(),
        "--output".to_string(),
        "%(title)s.%(ext)s".to_string(),
        "--print".to_string(),
        "%(title)s".to_string(),
        // --print implies --simulate; this keeps the download running
        "--no-simulate".to_string(),
        "--format".to_string(),
        "bestaudio/best".to_string(),
        "--extract-audio".to_string(),
        "--audio-format".to_string(),
        "mp3".to_string(),
        "--audio-quality".to_string(),
        "0".to_string(),
        "--no-playlist".to_string(),
        "--no-check-certificate".to_string(),
    ];

    if let Some(ref ffmpeg_location) = *config::FFMPEG_LOCATION {
        args.push("--ffmpeg-location".to_string());
        args.push(ffmpeg_location.clone());
    }

    args.push(url.to_string());
    args
}

/// Picks the one file the downloader left in `dir`.
///
/// Exactly one file is expected; with more than one present the first
/// entry returned by the directory scan wins (scan order is not guaranteed
/// stable across platforms). An empty directory means the download step
/// produced nothing.
pub(crate) fn locate_output(dir: &Path) -> AppResult<PathBuf> {
    let mut files: Vec<PathBuf> = fs_err::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    if files.len() > 1 {
        log::warn!(
            "Expected one file in {}, found {}; taking the first scan entry",
            dir.display(),
            files.len()
        );
    }

    if files.is_empty() {
        return Err(AppError::Download(DownloadError::FileNotFound(format!(
            "no audio file in {} after download",
            dir.display()
        ))));
    }
    Ok(files.swap_remove(0))
}

/// Downloads the audio track behind `url` into `dir` and returns the
/// resolved title together with the local file path.
///
/// `dir` must already exist (the workspace manager owns its lifecycle).
pub async fn fetch_audio(url: &str, dir: &Path) -> AppResult<FetchedAudio> {
    let ytdl_bin = &*config::YTDL_BIN;
    let args = ytdlp_args(url, dir);
    log::debug!("yt-dlp command: {} {}", ytdl_bin, args.join(" "));

    let mut cmd = Command::new(ytdl_bin);
    cmd.args(&args);
    let output = run_with_timeout(&mut cmd, config::download::ytdlp_timeout()).await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::error!("yt-dlp exited with {}: {}", output.status, stderr.trim());
        return Err(AppError::Download(classify_ytdlp_stderr(&stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let title = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| {
            AppError::Download(DownloadError::Metadata(format!(
                "downloader reported no title for {}",
                url
            )))
        })?
        .to_string();

    let path = locate_output(dir)?;
    log::info!("Fetched '{}' -> {}", title, path.display());

    Ok(FetchedAudio { title, path })
}
