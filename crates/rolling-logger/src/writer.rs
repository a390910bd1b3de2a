//! Size-based rolling file writer.
//!
//! `app.log` is the live file. When a write would push it past
//! `max_file_bytes` it is renamed to `app.log.1`, older backups shift up by
//! one, and anything beyond `max_files` is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::buffer::LogBuffer;

/// Rotation limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingConfig {
    /// Size threshold of the live file before it rolls over
    pub max_file_bytes: u64,
    /// Number of rolled-over backups to keep
    pub max_files: usize,
    /// Lines kept in the in-memory ring
    pub buffer_capacity: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 1024 * 1024,
            max_files: 3,
            buffer_capacity: crate::buffer::DEFAULT_CAPACITY,
        }
    }
}

struct RollingState {
    path: PathBuf,
    file: File,
    written: u64,
    config: RollingConfig,
}

impl RollingState {
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.config.max_files == 0 {
            self.file = File::create(&self.path)?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.config.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.config.max_files).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }

    fn write_chunk(&mut self, buf: &[u8]) -> io::Result<()> {
        let incoming = buf.len() as u64;
        if self.written > 0 && self.written + incoming > self.config.max_file_bytes {
            self.rotate()?;
        }
        self.file.write_all(buf)?;
        self.written += incoming;
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Shared handle to the live log file and the recent-lines ring.
///
/// Cloning is cheap; every clone writes to the same file.
#[derive(Clone)]
pub struct RollingFileWriter {
    state: Arc<Mutex<RollingState>>,
    buffer: Arc<LogBuffer>,
}

impl RollingFileWriter {
    /// Open (or create) the live file at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>, config: RollingConfig) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = open_append(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            state: Arc::new(Mutex::new(RollingState {
                path,
                file,
                written,
                config,
            })),
            buffer: Arc::new(LogBuffer::new(config.buffer_capacity)),
        })
    }

    pub fn buffer(&self) -> Arc<LogBuffer> {
        Arc::clone(&self.buffer)
    }

    pub fn path(&self) -> PathBuf {
        match self.state.lock() {
            Ok(state) => state.path.clone(),
            Err(poisoned) => poisoned.into_inner().path.clone(),
        }
    }
}

impl io::Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        {
            let mut state = self
                .state
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
            state.write_chunk(buf)?;
        }
        self.buffer.push_chunk(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingFileWriter {
    type Writer = RollingFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
