//! Repository acquisition: shallow clone into a temporary checkout.
//!
//! The engine itself only ever reads from a local root; this boundary turns
//! a repository URL into such a root and guarantees its eventual cleanup.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("unsupported repository locator `{0}`")]
    InvalidLocator(String),
    #[error("checkout destination already exists: {0}")]
    DestinationExists(PathBuf),
    #[error("git clone failed for `{url}`: {stderr}")]
    CloneFailed { url: String, stderr: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AcquireError {
    /// Whether the failure is attributable to the caller's input rather
    /// than the environment. `CloneFailed` carries the git stderr so callers
    /// can tell a bad URL from a transient network failure.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidLocator(_))
    }
}

/// A cloned repository checkout. The directory is removed on drop.
#[derive(Debug)]
pub struct Checkout {
    path: PathBuf,
}

impl Checkout {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Checkout {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            log::warn!("failed to clean up checkout {}: {e}", self.path.display());
        }
    }
}

/// Recognized repository locators.
pub fn is_git_locator(source: &str) -> bool {
    source.starts_with("https://") || source.starts_with("http://") || source.starts_with("git@")
}

/// Shallow-clone `url` into a fresh uniquely-named directory under
/// `dest_root`. A partial clone left behind by a failed invocation is
/// removed before the error is surfaced.
pub fn clone_repository(url: &str, dest_root: &Path) -> Result<Checkout, AcquireError> {
    if !is_git_locator(url) {
        return Err(AcquireError::InvalidLocator(url.to_string()));
    }

    std::fs::create_dir_all(dest_root)?;
    let dest = dest_root.join(Uuid::new_v4().to_string());
    if dest.exists() {
        return Err(AcquireError::DestinationExists(dest));
    }

    log::info!("cloning {url} into {}", dest.display());
    let output = Command::new("git")
        .args(["clone", "--depth", "1", url])
        .arg(&dest)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let _ = std::fs::remove_dir_all(&dest);
        return Err(AcquireError::CloneFailed {
            url: url.to_string(),
            stderr,
        });
    }

    Ok(Checkout { path: dest })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_git_locator_as_caller_error() {
        let err = clone_repository("not a url", Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, AcquireError::InvalidLocator(_)));
        assert!(err.is_caller_error());
    }

    #[test]
    fn locator_recognition() {
        assert!(is_git_locator("https://github.com/user/repo"));
        assert!(is_git_locator("git@github.com:user/repo.git"));
        assert!(!is_git_locator("/local/path"));
        assert!(!is_git_locator("ftp://example.com/repo"));
    }

    #[test]
    fn checkout_removes_directory_on_drop() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("checkout");
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        std::fs::write(dir.join("sub/file.txt"), "x").unwrap();

        let checkout = Checkout { path: dir.clone() };
        assert!(dir.exists());
        drop(checkout);
        assert!(!dir.exists());
    }
}
