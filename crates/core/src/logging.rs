//! Logging initialization and startup environment diagnostics.

use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::process::Command;

use crate::config;
use crate::error::{AppError, AppResult};

/// Initialize logger for both console and file output.
pub fn init_logger(log_file_path: &str) -> AppResult<()> {
    let log_file = fs_err::File::create(log_file_path)
        .map_err(|e| AppError::Config(format!("failed to create log file: {}", e)))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| AppError::Config(format!("failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Logs the state of the external binaries the fetch pipeline depends on.
///
/// Neither check is fatal: a missing ffmpeg only breaks the mp3
/// post-processing step once a conversion is actually attempted, and that
/// failure is reported per request.
pub fn log_environment() {
    let ytdl_bin = &*config::YTDL_BIN;
    match Command::new(ytdl_bin).arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            log::info!("yt-dlp version: {}", version);
        }
        Ok(output) => {
            log::warn!("⚠ {} --version exited with {}", ytdl_bin, output.status);
        }
        Err(e) => {
            log::warn!("⚠ {} not found ({}); downloads will fail", ytdl_bin, e);
        }
    }

    let ffmpeg_bin = config::FFMPEG_LOCATION.as_deref().unwrap_or("ffmpeg");
    match Command::new(ffmpeg_bin).arg("-version").output() {
        Ok(output) if output.status.success() => {
            log::info!("ffmpeg found at '{}'", ffmpeg_bin);
        }
        _ => {
            log::warn!("⚠ ffmpeg not found! Conversion to mp3 may not work.");
        }
    }
}
