//! File system seam used by a line source to acquire and release handles.
use std::io::Read;
use std::path::Path;

/// A readable handle that must be released explicitly.
pub trait ReadHandle: Read {
    /// Release the handle.
    ///
    /// # Errors
    /// When the underlying resource reports a failure on release.
    fn close(self) -> std::io::Result<()>;
}

/// Opens paths for reading.
pub trait FileSystem {
    type Handle: ReadHandle;

    /// Open `path` for reading.
    ///
    /// # Errors
    /// When the path does not exist, is not accessible, or cannot be opened.
    fn open(&self, path: &Path) -> std::io::Result<Self::Handle>;
}

impl<F> FileSystem for &F
where
    F: FileSystem + ?Sized,
{
    type Handle = F::Handle;

    fn open(&self, path: &Path) -> std::io::Result<Self::Handle> {
        (**self).open(path)
    }
}

/// The local file system.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StdFs;

impl FileSystem for StdFs {
    type Handle = std::fs::File;

    fn open(&self, path: &Path) -> std::io::Result<Self::Handle> {
        std::fs::File::open(path)
    }
}

impl ReadHandle for std::fs::File {
    #[cfg(unix)]
    fn close(self) -> std::io::Result<()> {
        use std::os::fd::IntoRawFd;

        // dropping a file swallows close errors
        let fd = self.into_raw_fd();
        nix::unistd::close(fd).map_err(std::io::Error::from)
    }

    #[cfg(not(unix))]
    fn close(self) -> std::io::Result<()> {
        drop(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileSystem, ReadHandle, StdFs};
    use color_eyre::eyre;
    use similar_asserts::assert_eq as sim_assert_eq;
    use std::io::Read;

    #[test]
    fn test_std_fs_open_read_close() -> eyre::Result<()> {
        crate::tests::init();
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "hello\n")?;

        let mut file = StdFs.open(&path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        sim_assert_eq!(contents, "hello\n");
        file.close()?;

        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn test_std_fs_open_missing() -> eyre::Result<()> {
        crate::tests::init();
        let dir = tempfile::TempDir::new()?;
        let err = StdFs
            .open(&dir.path().join("missing.txt"))
            .err()
            .ok_or_else(|| eyre::eyre!("expected open to fail"))?;
        sim_assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        Ok(())
    }
}
