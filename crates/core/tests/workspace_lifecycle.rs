//! Workspace lifecycle across whole requests: the directory must be gone
//! after every request, whether the fetch step succeeded or blew up.

use std::path::Path;

use tunegrab_core::workspace;
use tunegrab_core::{AppError, AppResult};

/// Drives the same acquire → work → release sequence the request handler
/// performs, releasing the workspace regardless of the work outcome.
async fn run_request<F>(data_root: &Path, chat_id: i64, work: F) -> AppResult<()>
where
    F: FnOnce(&Path) -> AppResult<()>,
{
    let dir = workspace::acquire(data_root, chat_id).await?;
    let outcome = work(&dir);
    workspace::release(&dir).await?;
    outcome
}

#[tokio::test]
async fn cleanup_runs_after_success() {
    let root = tempfile::tempdir().unwrap();

    run_request(root.path(), 100, |dir| {
        fs_err::write(dir.join("track.mp3"), b"mp3")?;
        Ok(())
    })
    .await
    .unwrap();

    assert!(!workspace::user_dir(root.path(), 100).exists());
}

#[tokio::test]
async fn cleanup_runs_after_failure() {
    let root = tempfile::tempdir().unwrap();

    let outcome = run_request(root.path(), 100, |dir| {
        // Simulate a fetch that downloaded half a file before failing.
        fs_err::write(dir.join("track.part"), b"partial")?;
        Err(AppError::Workspace("simulated fetch failure".to_string()))
    })
    .await;

    assert!(outcome.is_err());
    assert!(!workspace::user_dir(root.path(), 100).exists());
}

#[tokio::test]
async fn sequential_requests_start_clean() {
    let root = tempfile::tempdir().unwrap();

    run_request(root.path(), 55, |dir| {
        fs_err::write(dir.join("first.mp3"), b"one")?;
        Ok(())
    })
    .await
    .unwrap();

    // The second request must not see leftovers from the first.
    run_request(root.path(), 55, |dir| {
        let entries: Vec<_> = fs_err::read_dir(dir)?.collect();
        assert!(entries.is_empty(), "workspace was not fresh: {:?}", entries);
        fs_err::write(dir.join("second.mp3"), b"two")?;
        Ok(())
    })
    .await
    .unwrap();

    assert!(!workspace::user_dir(root.path(), 55).exists());
}
