use once_cell::sync::Lazy;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Configuration loaded once at process start from a local JSON file.
///
/// The token file is the only fatal startup dependency: a missing file,
/// malformed JSON or an absent/empty `TOKEN` field aborts startup.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Telegram Bot API token.
    #[serde(rename = "TOKEN")]
    pub token: String,
}

impl BotConfig {
    /// Reads and parses the config file at `path`.
    pub fn load(path: &Path) -> AppResult<Self> {
        let raw = fs_err::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read config file: {}", e)))?;
        let config: BotConfig = serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))?;
        if config.token.trim().is_empty() {
            return Err(AppError::Config(format!(
                "TOKEN field in {} is empty",
                path.display()
            )));
        }
        Ok(config)
    }
}

/// Path to the token config file.
/// Read from CONFIG_PATH environment variable, defaults to "configbot.json".
pub static CONFIG_PATH: Lazy<String> =
    Lazy::new(|| env::var("CONFIG_PATH").unwrap_or_else(|_| "configbot.json".to_string()));

/// Root directory for per-chat scratch workspaces.
/// Read from DATA_ROOT environment variable, defaults to "data/user".
pub static DATA_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    env::var("DATA_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data").join("user"))
});

/// Cached yt-dlp binary path.
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp".
pub static YTDL_BIN: Lazy<String> =
    Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Optional explicit ffmpeg location handed to yt-dlp via --ffmpeg-location.
/// When unset, yt-dlp resolves ffmpeg from PATH on its own.
pub static FFMPEG_LOCATION: Lazy<Option<String>> = Lazy::new(|| env::var("FFMPEG_LOCATION").ok());

/// Log file path for the file half of the combined logger.
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE").unwrap_or_else(|_| "tunegrab.log".to_string()));

/// Download configuration
pub mod download {
    use super::Duration;

    /// Timeout for the combined yt-dlp download + transcode call (in seconds).
    /// Long tracks plus the mp3 post-processing step need headroom.
    pub const YTDLP_TIMEOUT_SECS: u64 = 600;

    /// yt-dlp command timeout duration
    pub fn ytdlp_timeout() -> Duration {
        Duration::from_secs(YTDLP_TIMEOUT_SECS)
    }
}

/// Network configuration for the Bot API client
pub mod network {
    use super::Duration;

    /// HTTP client timeout (in seconds). Audio uploads ride on this
    /// timeout too, so it is far above the usual API round-trip.
    pub const TIMEOUT_SECS: u64 = 300;

    /// HTTP client timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("configbot.json");
        let mut file = fs_err::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_reads_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"TOKEN": "123456:ABC-DEF"}"#);

        let config = BotConfig::load(&path).unwrap();
        assert_eq!(config.token, "123456:ABC-DEF");
    }

    #[test]
    fn load_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let err = BotConfig::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn load_fails_on_missing_token_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"NAME": "not a token"}"#);

        let err = BotConfig::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn load_fails_on_empty_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"TOKEN": "   "}"#);

        let err = BotConfig::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn load_tolerates_extra_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, r#"{"TOKEN": "t", "COMMENT": "kept for operators"}"#);

        assert!(BotConfig::load(&path).is_ok());
    }
}
