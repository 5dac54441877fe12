//! Errors reported by a line source and the ordered aggregate they are collected in.
use std::path::{Path, PathBuf};

/// Lifecycle stage an [`Error`] occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKind {
    /// The file could not be opened for reading.
    Open,
    /// Reading or decoding a line failed.
    Read,
    /// Releasing the file handle failed.
    Close,
    /// An error supplied by the caller.
    Other,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to open {path:?}: {source}")]
    Open {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to read line {line_number} of {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
        line_number: usize,
    },
    #[error("failed to close {path:?}: {source}")]
    Close {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Open { .. } => ErrorKind::Open,
            Self::Read { .. } => ErrorKind::Read,
            Self::Close { .. } => ErrorKind::Close,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// The file the error relates to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } | Self::Close { path, .. } => {
                Some(path)
            }
            Self::Other(_) => None,
        }
    }

    /// The underlying I/O error for open, read, and close failures.
    #[must_use]
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Open { source, .. } | Self::Read { source, .. } | Self::Close { source, .. } => {
                Some(source)
            }
            Self::Other(_) => None,
        }
    }
}

/// Ordered, loss-less collection of errors.
///
/// An empty collection means success.
/// Errors are kept in the order they were pushed, so a line source appends its
/// production error and close error after whatever the caller put in before.
#[derive(Debug, Default)]
pub struct Errors {
    errors: Vec<Error>,
}

impl Errors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn push(&mut self, err: Error) {
        self.errors.push(err);
    }

    /// Append an arbitrary error of kind [`ErrorKind::Other`].
    pub fn push_other<E>(&mut self, err: E)
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        self.errors.push(Error::Other(err.into()));
    }

    #[must_use]
    pub fn first(&self) -> Option<&Error> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ErrorKind> + '_ {
        self.errors.iter().map(Error::kind)
    }

    /// Convert into a result, treating an empty collection as success.
    ///
    /// # Errors
    /// When at least one error was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Error> {
        self.errors
    }
}

impl std::fmt::Display for Errors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, err) in self.errors.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {}

impl From<Error> for Errors {
    fn from(err: Error) -> Self {
        Self { errors: vec![err] }
    }
}

impl Extend<Error> for Errors {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
