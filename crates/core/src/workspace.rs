//! Per-chat scratch directories.
//!
//! Every request gets a directory under the data root keyed by chat id,
//! created lazily and removed unconditionally once the request finishes.
//! Nothing here locks the directory: two concurrent requests for the same
//! chat id share one workspace, a documented limitation of the design.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Deterministic workspace location for a chat: `<data_root>/<chat_id>`.
pub fn user_dir(data_root: &Path, chat_id: i64) -> PathBuf {
    data_root.join(chat_id.to_string())
}

/// Ensures the workspace directory for `chat_id` exists and returns it.
///
/// Idempotent: a second call without an intervening [`release`] returns the
/// same existing directory without error. Intermediate directories are
/// created as needed.
pub async fn acquire(data_root: &Path, chat_id: i64) -> AppResult<PathBuf> {
    let dir = user_dir(data_root, chat_id);
    fs_err::tokio::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Workspace(format!("failed to create workspace: {}", e)))?;
    Ok(dir)
}

/// Recursively deletes the workspace and everything in it.
///
/// A path that no longer exists is a no-op, not an error.
pub async fn release(path: &Path) -> AppResult<()> {
    match fs_err::tokio::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::Workspace(format!(
            "failed to remove workspace: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn user_dir_is_keyed_by_chat_id() {
        let root = Path::new("/data/user");
        assert_eq!(user_dir(root, 42), PathBuf::from("/data/user/42"));
        assert_eq!(user_dir(root, -100123), PathBuf::from("/data/user/-100123"));
    }

    #[tokio::test]
    async fn acquire_is_idempotent() {
        let root = tempfile::tempdir().unwrap();

        let first = acquire(root.path(), 7).await.unwrap();
        assert!(first.is_dir());

        let second = acquire(root.path(), 7).await.unwrap();
        assert_eq!(first, second);
        assert!(second.is_dir());
    }

    #[tokio::test]
    async fn acquire_creates_intermediate_directories() {
        let root = tempfile::tempdir().unwrap();
        let nested_root = root.path().join("data").join("user");

        let dir = acquire(&nested_root, 9).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn release_removes_directory_and_contents() {
        let root = tempfile::tempdir().unwrap();
        let dir = acquire(root.path(), 3).await.unwrap();
        fs_err::write(dir.join("track.mp3"), b"audio").unwrap();
        fs_err::create_dir(dir.join("fragments")).unwrap();
        fs_err::write(dir.join("fragments").join("part0"), b"x").unwrap();

        release(&dir).await.unwrap();
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn release_is_a_noop_on_missing_path() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("never-created");

        release(&missing).await.unwrap();
    }
}
