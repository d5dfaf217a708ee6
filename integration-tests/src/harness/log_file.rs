use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An access log in a temporary directory, removed on drop.
pub struct TestLogFile {
    _dir: TempDir,
    path: PathBuf,
}

impl TestLogFile {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("access.log");
        File::create(&path).expect("failed to create access log");

        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append lines in a single write, each terminated by a newline.
    pub fn append<S: AsRef<str>>(&self, lines: &[S]) {
        let mut batch = String::new();
        for line in lines {
            batch.push_str(line.as_ref());
            batch.push('\n');
        }

        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("failed to open access log");
        f.write_all(batch.as_bytes())
            .expect("failed to append to access log");
    }

    /// Write raw bytes, with no newline added.
    pub fn append_raw(&self, raw: &str) {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("failed to open access log");
        f.write_all(raw.as_bytes())
            .expect("failed to append to access log");
    }

    pub fn truncate(&self) {
        File::create(&self.path).expect("failed to truncate access log");
    }
}

impl Default for TestLogFile {
    fn default() -> Self {
        Self::new()
    }
}
