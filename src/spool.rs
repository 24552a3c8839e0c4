//! File-backed print surfaces.
//!
//! Each surface is one HTML file in the spool directory. It is ready as soon
//! as the document is written and printing hands it to the system browser.
//! The browser reads the file on its own schedule, so teardown only detaches
//! the surface; staged files are pruned by the host once they are older than
//! its retention period.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use chrono::Utc;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::DEFAULT_SPOOL_RETENTION_MS;
use crate::error::PrintError;
use crate::print::{PrintHost, PrintSurface};

const FILE_PREFIX: &str = "receipt_";
const FILE_EXTENSION: &str = "html";

/// Hands a staged document to whatever shows the print view.
pub type Opener = Arc<dyn Fn(&Path) -> io::Result<()> + Send + Sync>;

fn browser_opener() -> Opener {
    Arc::new(|path: &Path| webbrowser::open(&path.to_string_lossy()))
}

pub struct FileSpoolHost {
    spool_dir: PathBuf,
    retention: Duration,
    opener: Opener,
}

impl FileSpoolHost {
    pub fn new(spool_dir: impl Into<PathBuf>) -> Self {
        Self {
            spool_dir: spool_dir.into(),
            retention: Duration::from_millis(DEFAULT_SPOOL_RETENTION_MS),
            opener: browser_opener(),
        }
    }

    /// How long a staged receipt is kept before a later surface prunes it.
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    pub fn with_opener(mut self, opener: Opener) -> Self {
        self.opener = opener;
        self
    }

    pub fn spool_dir(&self) -> &Path {
        &self.spool_dir
    }

    /// Remove staged receipts older than the retention period.
    pub fn prune_staged(&self) {
        let Ok(entries) = fs::read_dir(&self.spool_dir) else {
            return;
        };
        let now = SystemTime::now();
        for entry in entries.flatten() {
            let path = entry.path();
            if !is_staged_receipt(&path) {
                continue;
            }
            let expired = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .and_then(|modified| now.duration_since(modified).ok())
                .is_some_and(|age| age > self.retention);
            if !expired {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => debug!(path = %path.display(), "Pruned spooled receipt"),
                Err(e) => warn!("Failed to prune spooled receipt {}: {e}", path.display()),
            }
        }
    }
}

fn is_staged_receipt(path: &Path) -> bool {
    path.is_file()
        && path.extension().and_then(|ext| ext.to_str()) == Some(FILE_EXTENSION)
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(FILE_PREFIX))
}

impl PrintHost for FileSpoolHost {
    type Surface = FileSurface;

    fn create_surface(&self) -> Result<FileSurface, PrintError> {
        fs::create_dir_all(&self.spool_dir).map_err(|e| {
            PrintError::SurfaceUnavailable(format!(
                "create spool dir {}: {e}",
                self.spool_dir.display()
            ))
        })?;
        self.prune_staged();
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!(
            "{FILE_PREFIX}{timestamp}_{}.{FILE_EXTENSION}",
            Uuid::new_v4().simple()
        );
        Ok(FileSurface::new(
            self.spool_dir.join(filename),
            self.opener.clone(),
        ))
    }
}

pub struct FileSurface {
    path: PathBuf,
    opener: Opener,
    attached: AtomicBool,
    ready_tx: Mutex<Option<oneshot::Sender<()>>>,
    ready_rx: Mutex<Option<oneshot::Receiver<()>>>,
}

impl FileSurface {
    fn new(path: PathBuf, opener: Opener) -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            path,
            opener,
            attached: AtomicBool::new(true),
            ready_tx: Mutex::new(Some(tx)),
            ready_rx: Mutex::new(Some(rx)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSurface for FileSurface {
    fn write(&self, html: &str) -> Result<(), PrintError> {
        if !self.is_attached() {
            return Err(PrintError::DocumentUnavailable(
                "surface already detached".to_string(),
            ));
        }
        fs::write(&self.path, html).map_err(|e| {
            PrintError::DocumentUnavailable(format!("write {}: {e}", self.path.display()))
        })?;
        if let Some(tx) = self.ready_tx.lock().ok().and_then(|mut guard| guard.take()) {
            let _ = tx.send(());
        }
        Ok(())
    }

    fn ready(&self) -> Option<oneshot::Receiver<()>> {
        self.ready_rx.lock().ok().and_then(|mut guard| guard.take())
    }

    fn print(&self) -> Result<(), PrintError> {
        if !self.path.exists() {
            return Err(PrintError::Trigger(format!(
                "{} is not staged",
                self.path.display()
            )));
        }
        (self.opener)(&self.path)
            .map_err(|e| PrintError::Trigger(format!("open {}: {e}", self.path.display())))
    }

    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    // The file stays behind for the viewer; see `FileSpoolHost::prune_staged`.
    fn detach(&self) {
        if self.attached.swap(false, Ordering::SeqCst) {
            debug!(path = %self.path.display(), "Spool surface detached");
        }
    }
}
