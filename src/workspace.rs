//! Process-scoped temporary workspace.
//!
//! When the user gives no `--output`, the site is generated into a
//! temporary directory that must not outlive the process — whichever way
//! the process ends. Ownership is explicit rather than ambient: the
//! orchestrator holds the [`Workspace`] and passes its path down.
//!
//! Cleanup runs exactly once across every exit path:
//!
//! - normal return and unwinding panics: `Workspace`'s `Drop`
//! - SIGINT/SIGTERM: the handler installed by
//!   [`Workspace::register_signal_cleanup`], which removes the directory
//!   and exits
//!
//! Both paths funnel through the same idempotent removal, so a signal
//! arriving mid-shutdown cannot double-delete, and the handler's own
//! reference to the directory cannot keep it alive past a normal drop.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A temporary output directory with guaranteed-once removal.
pub struct Workspace {
    // Taken (and dropped, deleting the dir) by the first cleanup to run.
    inner: Arc<Mutex<Option<TempDir>>>,
    path: PathBuf,
}

impl Workspace {
    /// Create the workspace directory. The `gramview-` prefix makes stray
    /// directories attributable if cleanup is ever defeated (SIGKILL).
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("gramview-").tempdir()?;
        let path = dir.path().to_path_buf();
        Ok(Workspace {
            inner: Arc::new(Mutex::new(Some(dir))),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now. Safe to call any number of times.
    pub fn cleanup(&self) {
        if let Ok(mut guard) = self.inner.lock() {
            // Errors are swallowed: cleanup is best-effort and there is
            // nowhere useful to report them during teardown.
            if let Some(dir) = guard.take() {
                let _ = dir.close();
            }
        }
    }

    /// Install a SIGINT/SIGTERM handler that removes the directory and
    /// exits. Call at most once per process. The handler holds its own
    /// `Arc` to the directory, so dropping the `Workspace` afterwards
    /// still goes through [`Workspace::cleanup`] (see `Drop` below).
    pub fn register_signal_cleanup(&self) -> Result<(), ctrlc::Error> {
        let inner = Arc::clone(&self.inner);
        ctrlc::set_handler(move || {
            if let Ok(mut guard) = inner.lock() {
                if let Some(dir) = guard.take() {
                    let _ = dir.close();
                }
            }
            // 130 = interrupted by signal, the conventional shell code.
            std::process::exit(130);
        })
    }
}

// The signal handler keeps its own Arc alive for the rest of the process,
// so TempDir's Drop alone cannot cover the normal-exit path once a handler
// is registered. Funnel Drop through the same idempotent cleanup.
impl Drop for Workspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}
