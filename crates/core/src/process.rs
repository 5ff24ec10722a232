//! External process execution with timeout support.
//!
//! The fetch pipeline shells out to yt-dlp (which in turn runs ffmpeg); a
//! hung process must not pin a request forever.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::download::error::DownloadError;
use crate::error::AppError;

/// Run an async Command with a timeout.
///
/// Returns the process Output on success, or an AppError on timeout/IO
/// failure. A timeout surfaces as `DownloadError::Timeout`.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> Result<Output, AppError> {
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(AppError::Io(e)),
        Err(_) => Err(AppError::Download(DownloadError::Timeout(format!(
            "process timed out after {}s",
            timeout.as_secs()
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timeout_maps_to_download_error() {
        let mut cmd = Command::new("sleep");
        cmd.arg("5");

        let err = run_with_timeout(&mut cmd, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Download(DownloadError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn missing_binary_maps_to_io_error() {
        let mut cmd = Command::new("definitely-not-a-real-binary-name");

        let err = run_with_timeout(&mut cmd, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[tokio::test]
    async fn captures_output() {
        let mut cmd = Command::new("echo");
        cmd.arg("hello");

        let output = run_with_timeout(&mut cmd, Duration::from_secs(5)).await.unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }
}
