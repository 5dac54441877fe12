#![forbid(unsafe_code)]

pub mod error;
pub mod fs;
pub mod lines;
#[cfg(test)]
pub(crate) mod mock;
pub mod options;

pub use error::{Error, ErrorKind, Errors};
pub use fs::{FileSystem, ReadHandle, StdFs};
pub use lines::{LineReader, Lines};
pub use options::Options;

use std::ops::ControlFlow;
use std::path::PathBuf;

/// Feed every line of the file at `path` to `consumer`.
///
/// Stops early when `consumer` returns [`ControlFlow::Break`].
/// Returns the number of lines passed to `consumer`.
///
/// # Errors
/// When the file cannot be opened, read, or closed.
pub fn for_each_line<P, C>(path: P, options: Options, consumer: C) -> Result<usize, Errors>
where
    P: Into<PathBuf>,
    C: FnMut(String) -> ControlFlow<()>,
{
    for_each_line_with(StdFs, path, options, consumer)
}

/// Like [`for_each_line`], opening the file through `fs`.
///
/// # Errors
/// When the file cannot be opened, read, or closed.
pub fn for_each_line_with<F, P, C>(
    fs: F,
    path: P,
    options: Options,
    mut consumer: C,
) -> Result<usize, Errors>
where
    F: FileSystem,
    P: Into<PathBuf>,
    C: FnMut(String) -> ControlFlow<()>,
{
    let mut errors = Errors::new();
    let mut count = 0;
    for line in LineReader::new(path, &mut errors)
        .with_options(options)
        .with_file_system(fs)
    {
        count += 1;
        if consumer(line).is_break() {
            break;
        }
    }
    errors.into_result().map(|()| count)
}
