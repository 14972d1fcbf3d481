//! A named temporary file with exactly one owner.
//!
//! The file is created on construction, can be appended to, and is closed and
//! deleted when the owning [`TempFile`] is dropped, overwritten, or unwound
//! through by a panic.
//!
//! ```rust
//! let mut temp = tempfile_scoped::TempFile::new().unwrap();
//! temp.write_line("hello").unwrap();
//! let path = temp.path().to_path_buf();
//! assert!(path.exists());
//! drop(temp);
//! assert!(!path.exists());
//! ```

mod builder;
mod error;
mod naming;
mod scoped;

pub use builder::Builder;
pub use error::Error;
pub use scoped::TempFile;
