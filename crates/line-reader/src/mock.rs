//! In-memory file system for simulating read and close failures.
use crate::fs::{FileSystem, ReadHandle};
use std::cell::Cell;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Stats {
    opened: Cell<usize>,
    closed: Cell<usize>,
    bytes_read: Cell<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: HashMap<PathBuf, Vec<u8>>,
    fail_read_after: Option<usize>,
    fail_close: bool,
    stats: Rc<Stats>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Fail every read once `offset` bytes of a file have been consumed.
    pub fn fail_read_after(mut self, offset: usize) -> Self {
        self.fail_read_after = Some(offset);
        self
    }

    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn opened(&self) -> usize {
        self.stats.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.stats.closed.get()
    }

    pub fn open_handles(&self) -> usize {
        self.opened() - self.closed()
    }

    pub fn bytes_read(&self) -> usize {
        self.stats.bytes_read.get()
    }
}

#[derive(Debug)]
pub struct MockHandle {
    data: std::io::Cursor<Vec<u8>>,
    fail_read_after: Option<usize>,
    fail_close: bool,
    stats: Rc<Stats>,
}

impl Read for MockHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let pos = usize::try_from(self.data.position()).unwrap_or(usize::MAX);
        let allowed = match self.fail_read_after {
            Some(offset) if pos >= offset => {
                return Err(std::io::Error::other("simulated read failure"));
            }
            Some(offset) => (offset - pos).min(buf.len()),
            None => buf.len(),
        };
        let n = self.data.read(&mut buf[..allowed])?;
        self.stats.bytes_read.set(self.stats.bytes_read.get() + n);
        Ok(n)
    }
}

impl ReadHandle for MockHandle {
    fn close(self) -> std::io::Result<()> {
        self.stats.closed.set(self.stats.closed.get() + 1);
        if self.fail_close {
            return Err(std::io::Error::other("simulated close failure"));
        }
        Ok(())
    }
}

impl FileSystem for MockFs {
    type Handle = MockHandle;

    fn open(&self, path: &Path) -> std::io::Result<Self::Handle> {
        let contents = self
            .files
            .get(path)
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))?;
        self.stats.opened.set(self.stats.opened.get() + 1);
        Ok(MockHandle {
            data: std::io::Cursor::new(contents.clone()),
            fail_read_after: self.fail_read_after,
            fail_close: self.fail_close,
            stats: Rc::clone(&self.stats),
        })
    }
}
