use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::mem;
use std::path::Path;
use std::path::PathBuf;

use log::info;
use log::warn;

use crate::Builder;
use crate::Error;

/// A named file which is deleted when its owner is done with it.
///
/// A `TempFile` is either *owning*, with a path and an open, append-only stream, or
/// *released*, with an empty path and no stream. Every file created by a `TempFile` is
/// deleted exactly once: when the owning handle is dropped (including during a panic),
/// when it is overwritten, or when [`release`](TempFile::release) or
/// [`close`](TempFile::close) is called.
///
/// Ownership moves with ordinary Rust moves. [`take`](TempFile::take) and
/// [`transfer_from`](TempFile::transfer_from) move the file out of a handle you only have
/// a `&mut` to, leaving it released. There is deliberately no `Clone`.
///
/// Creation and removal are reported through the `log` crate at `info` level.
pub struct TempFile {
    path: PathBuf,
    file: Option<fs::File>,
}

impl TempFile {
    /// Create a new file named `tempfile_<nanos>_<random>.txt` in the platform's
    /// temporary directory, open for appending.
    pub fn new() -> Result<TempFile, Error> {
        Builder::new().create()
    }

    /// As [`new`](TempFile::new), but in `dir`.
    pub fn new_in<P: AsRef<Path>>(dir: P) -> Result<TempFile, Error> {
        Builder::new().create_in(dir)
    }

    pub(crate) fn from_created(path: PathBuf, file: fs::File) -> TempFile {
        info!("TempFile created: {}", path.display());
        TempFile {
            path,
            file: Some(file),
        }
    }

    /// The path of the backing file. Empty if the handle is released.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn is_owning(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }

    /// Append `text` and a newline to the file.
    ///
    /// The line is handed to the OS in a single append.
    pub fn write_line(&mut self, text: &str) -> Result<(), Error> {
        if !self.is_owning() {
            return Err(Error::Released);
        }
        let file = self.file.as_mut().ok_or(Error::Released)?;

        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');

        file.write_all(line.as_bytes()).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Move the file into a new handle, leaving this one released.
    pub fn take(&mut self) -> TempFile {
        mem::take(self)
    }

    /// Delete whatever this handle owns, then take ownership of `source`'s file,
    /// leaving `source` released.
    pub fn transfer_from(&mut self, source: &mut TempFile) {
        self.release();
        *self = source.take();
    }

    /// Close and delete the file now. Does nothing if the handle is already released.
    ///
    /// A failure to delete is logged, not returned; see [`close`](TempFile::close).
    pub fn release(&mut self) {
        if let Err(e) = self.remove() {
            warn!("{}", e);
        }
    }

    /// Close and delete the file, reporting a failure to delete.
    ///
    /// The handle is consumed either way, and will not try again.
    pub fn close(mut self) -> Result<(), Error> {
        self.remove()
    }

    fn remove(&mut self) -> Result<(), Error> {
        // close before unlinking; some platforms refuse to delete open files
        drop(self.file.take());

        if !self.is_owning() {
            return Ok(());
        }

        let path = mem::take(&mut self.path);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("TempFile removed: {}", path.display());
                Ok(())
            }
            Err(source) => Err(Error::Remove { path, source }),
        }
    }

    fn open_file(&mut self) -> Result<&mut fs::File, Error> {
        if !self.is_owning() {
            return Err(Error::Released);
        }
        self.file.as_mut().ok_or(Error::Released)
    }
}

/// The released state.
impl Default for TempFile {
    fn default() -> TempFile {
        TempFile {
            path: PathBuf::new(),
            file: None,
        }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        self.release();
    }
}

impl AsRef<Path> for TempFile {
    #[inline]
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

impl fmt::Debug for TempFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_owning() {
            write!(f, "TempFile({})", self.path.display())
        } else {
            write!(f, "TempFile(released)")
        }
    }
}

/// Raw appends. A released handle fails with [`io::ErrorKind::NotConnected`].
impl Write for TempFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open_file()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.open_file()?.flush()
    }
}
