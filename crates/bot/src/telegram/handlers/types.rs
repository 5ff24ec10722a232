//! Handler types and dependencies

use std::path::PathBuf;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    /// Root directory under which per-chat workspaces are created.
    pub data_root: PathBuf,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(data_root: PathBuf) -> Self {
        Self { data_root }
    }
}
