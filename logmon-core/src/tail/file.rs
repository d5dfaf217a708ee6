use crate::tail::error::TailError;
use crate::tail::source::LineSource;
use async_trait::async_trait;
use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Follows a growing file, like `tail -F`.
///
/// A line is only yielded once its newline has been written, so a writer flushing half a
/// line never produces a broken record. When the file shrinks below the read position it
/// is assumed to have been truncated or replaced and is read again from the start.
#[derive(Debug)]
pub struct FileTail {
    path: PathBuf,
    reader: BufReader<File>,
    position: u64,
    pending: Vec<u8>,
    poll_interval: Duration,
}

impl FileTail {
    /// Open `path`, positioned at its end unless `from_start` is set.
    pub async fn open(path: impl AsRef<Path>, from_start: bool) -> Result<Self, TailError> {
        let path = path.as_ref().to_path_buf();

        let mut file = File::open(&path)
            .await
            .map_err(|e| TailError::open(&path, e))?;

        let position = if from_start {
            0
        } else {
            file.seek(SeekFrom::End(0))
                .await
                .map_err(|e| TailError::open(&path, e))?
        };

        tracing::debug!(path = %path.display(), position, "tailing file");

        Ok(Self {
            path,
            reader: BufReader::new(file),
            position,
            pending: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> u64 {
        self.position
    }

    async fn reopen_if_truncated(&mut self) -> Result<(), TailError> {
        let len = match fs::metadata(&self.path).await {
            Ok(meta) => meta.len(),
            // Mid-rotation: keep polling until the file is back.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(TailError::read(&self.path, e)),
        };

        if len >= self.position {
            return Ok(());
        }

        let file = File::open(&self.path)
            .await
            .map_err(|e| TailError::open(&self.path, e))?;

        tracing::info!(
            path = %self.path.display(),
            old_position = self.position,
            new_len = len,
            "file truncated, reading from start"
        );

        self.reader = BufReader::new(file);
        self.position = 0;
        self.pending.clear();

        Ok(())
    }
}

#[async_trait]
impl LineSource for FileTail {
    async fn next_line(&mut self) -> Result<Option<String>, TailError> {
        loop {
            let n = self
                .reader
                .read_until(b'\n', &mut self.pending)
                .await
                .map_err(|e| TailError::read(&self.path, e))?;

            if n == 0 {
                self.reopen_if_truncated().await?;
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }

            self.position += n as u64;

            if self.pending.last() != Some(&b'\n') {
                // partial line, wait for the rest
                continue;
            }

            let bytes = std::mem::take(&mut self.pending);
            let line = String::from_utf8_lossy(&bytes);
            let line = line.trim_end_matches(['\r', '\n']);

            if line.is_empty() {
                continue;
            }

            return Ok(Some(line.to_string()));
        }
    }
}
