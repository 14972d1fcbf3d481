use std::io;
use std::path::PathBuf;

/// Errors from creating, writing to, or explicitly closing a [`TempFile`](crate::TempFile).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backing file could not be opened. No handle was constructed.
    #[error("failed to create temporary file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The handle has been released, or its resource was transferred elsewhere.
    #[error("temporary file handle does not own a file")]
    Released,

    /// The underlying append failed.
    #[error("failed to write to temporary file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Only returned by [`TempFile::close`](crate::TempFile::close); dropping never reports this.
    #[error("failed to remove temporary file {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<Error> for io::Error {
    fn from(e: Error) -> io::Error {
        match e {
            Error::Released => io::Error::new(io::ErrorKind::NotConnected, e),
            Error::Create { source, .. }
            | Error::Write { source, .. }
            | Error::Remove { source, .. } => source,
        }
    }
}
