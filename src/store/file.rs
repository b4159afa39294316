use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use parking_lot::Mutex;
use tokio::sync::watch;

use crate::model::DeclineRecord;

use super::{DeclineStore, StoreError};

/// Decline store persisted as a small TOML file.
///
/// Writes go through a sibling temp file and a rename while holding an
/// exclusive lock on `<file>.lock`, so a reader never sees a torn record.
pub struct FileDeclineStore {
    path: PathBuf,
    sender: watch::Sender<DeclineRecord>,
    write_guard: Mutex<()>,
}

impl FileDeclineStore {
    /// Open the store at `path`. A missing file yields the empty record.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let record = read_record(&path)?;
        let (sender, _) = watch::channel(record);
        Ok(Self {
            path,
            sender,
            write_guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeclineStore for FileDeclineStore {
    fn current(&self) -> DeclineRecord {
        *self.sender.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<DeclineRecord> {
        self.sender.subscribe()
    }

    fn write(&self, record: DeclineRecord) -> Result<(), StoreError> {
        let _guard = self.write_guard.lock();
        write_record(&self.path, &record)?;
        self.sender.send_replace(record);
        tracing::debug!(
            path = %self.path.display(),
            version = record.version,
            "Decline record persisted"
        );
        Ok(())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn read_record(path: &Path) -> Result<DeclineRecord, StoreError> {
    if !path.exists() {
        return Ok(DeclineRecord::default());
    }

    let content = fs::read_to_string(path).map_err(io_error(path))?;
    toml::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_record(path: &Path, record: &DeclineRecord) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }
    }

    let data = toml::to_string(record)?;

    let lock_path = sibling(path, "lock");
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(io_error(&lock_path))?;
    lock_file.lock_exclusive().map_err(io_error(&lock_path))?;

    let tmp_path = sibling(path, "tmp");
    let result = (|| -> Result<(), StoreError> {
        let mut file = fs::File::create(&tmp_path).map_err(io_error(&tmp_path))?;
        file.write_all(data.as_bytes()).map_err(io_error(&tmp_path))?;
        file.sync_all().map_err(io_error(&tmp_path))?;
        fs::rename(&tmp_path, path).map_err(io_error(path))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    let _ = FileExt::unlock(&lock_file);
    result
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}
