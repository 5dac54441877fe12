//! Lazy line iteration over a file.
//!
//! A [`LineReader`] is bound to a path and a caller-owned [`Errors`] slot.
//! Turning it into an iterator yields [`Lines`], which opens the file on the first pull,
//! produces one line per pull, and closes the file exactly once when iteration ends.
//! Iteration ends on end of file, on the first error, when the caller breaks out of the
//! loop or drops the iterator, or when [`Lines::close`] is called.
//!
//! Failures never surface through the iterator. They are appended to the error slot
//! at teardown, after any errors the slot already held, in the order
//! production error, then close error.
use crate::error::{Error, Errors};
use crate::fs::{FileSystem, ReadHandle, StdFs};
use crate::options::Options;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// A line source that has not been activated yet.
#[derive(Debug)]
pub struct LineReader<'a, F = StdFs> {
    path: PathBuf,
    errors: &'a mut Errors,
    options: Options,
    fs: F,
}

impl<'a> LineReader<'a, StdFs> {
    /// Bind a line source to `path`.
    ///
    /// Does not touch the file system.
    pub fn new(path: impl Into<PathBuf>, errors: &'a mut Errors) -> Self {
        Self {
            path: path.into(),
            errors,
            options: Options::default(),
            fs: StdFs,
        }
    }
}

impl<'a, F> LineReader<'a, F> {
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Open the file through `fs` instead of the local file system.
    #[must_use]
    pub fn with_file_system<G>(self, fs: G) -> LineReader<'a, G> {
        LineReader {
            path: self.path,
            errors: self.errors,
            options: self.options,
            fs,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl<'a, F> LineReader<'a, F>
where
    F: FileSystem,
{
    pub fn lines(self) -> Lines<'a, F> {
        Lines {
            path: self.path,
            errors: self.errors,
            options: self.options,
            fs: self.fs,
            state: State::Pending,
            error: None,
            line_number: 0,
        }
    }
}

impl<'a, F> IntoIterator for LineReader<'a, F>
where
    F: FileSystem,
{
    type Item = String;
    type IntoIter = Lines<'a, F>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines()
    }
}

enum State<H> {
    Pending,
    Reading(BufReader<H>),
    Done,
}

impl<H> State<H> {
    fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reading(_) => "reading",
            Self::Done => "done",
        }
    }
}

/// Single-pass iterator over the lines of a file.
///
/// The handle is closed and errors are merged into the slot when the
/// iterator ends, is closed explicitly, or is dropped, whichever happens first.
pub struct Lines<'a, F>
where
    F: FileSystem,
{
    path: PathBuf,
    errors: &'a mut Errors,
    options: Options,
    fs: F,
    state: State<F::Handle>,
    error: Option<Error>,
    line_number: usize,
}

impl<'a, F> Lines<'a, F>
where
    F: FileSystem,
{
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines produced so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// End iteration and release the file handle.
    ///
    /// Subsequent calls and the eventual drop do nothing.
    pub fn close(&mut self) {
        let state = std::mem::replace(&mut self.state, State::Done);
        let close_error = match state {
            State::Done => return,
            State::Pending => None,
            State::Reading(reader) => reader.into_inner().close().err().map(|source| {
                tracing::warn!(path = ?self.path, error = %source, "failed to close file");
                Error::Close {
                    source,
                    path: self.path.clone(),
                }
            }),
        };
        tracing::debug!(path = ?self.path, lines = self.line_number, "closed");
        self.errors.extend(self.error.take().into_iter().chain(close_error));
    }

    fn open(&mut self) {
        tracing::debug!(path = ?self.path, "opening file");
        match self.fs.open(&self.path) {
            Ok(handle) => {
                let capacity = self.options.buffer_capacity.max(1);
                self.state = State::Reading(BufReader::with_capacity(capacity, handle));
            }
            Err(source) => {
                self.error = Some(Error::Open {
                    source,
                    path: self.path.clone(),
                });
                self.close();
            }
        }
    }
}

impl<F> Iterator for Lines<'_, F>
where
    F: FileSystem,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, State::Pending) {
            self.open();
        }
        let State::Reading(ref mut reader) = self.state else {
            return None;
        };
        match read_line(reader, &self.options) {
            Ok(Some(line)) => {
                self.line_number += 1;
                tracing::trace!(path = ?self.path, line_number = self.line_number, "read line");
                Some(line)
            }
            Ok(None) => {
                tracing::debug!(path = ?self.path, "reached end of file");
                self.close();
                None
            }
            Err(source) => {
                self.error = Some(Error::Read {
                    source,
                    path: self.path.clone(),
                    line_number: self.line_number + 1,
                });
                self.close();
                None
            }
        }
    }
}

impl<F> std::iter::FusedIterator for Lines<'_, F> where F: FileSystem {}

impl<F> Drop for Lines<'_, F>
where
    F: FileSystem,
{
    fn drop(&mut self) {
        self.close();
    }
}

impl<F> std::fmt::Debug for Lines<'_, F>
where
    F: FileSystem,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lines")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("state", &self.state.name())
            .field("line_number", &self.line_number)
            .finish_non_exhaustive()
    }
}

/// Read the next line, without its `\n`, `\r\n`, or final `\r` terminator.
///
/// Returns `None` at end of file.
fn read_line<R>(reader: &mut R, options: &Options) -> std::io::Result<Option<String>>
where
    R: BufRead,
{
    let mut buf = Vec::new();
    let n = match options.max_line_length {
        // room for the terminator
        Some(max) => reader
            .by_ref()
            .take((max as u64).saturating_add(2))
            .read_until(b'\n', &mut buf)?,
        None => reader.read_until(b'\n', &mut buf)?,
    };
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    // also drops a `\r` ending the last record of a file without a final newline
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    if let Some(max) = options.max_line_length {
        if buf.len() > max {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("line exceeds maximum length of {max} bytes"),
            ));
        }
    }
    let line = if options.strict_utf8 {
        String::from_utf8(buf)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?
    } else {
        match String::from_utf8(buf) {
            Ok(line) => line,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    };
    Ok(Some(line))
}
