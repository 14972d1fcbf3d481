use std::env;
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use log::debug;

use crate::naming;
use crate::Error;
use crate::TempFile;

/// Options for naming and placing a [`TempFile`].
///
/// The defaults produce `tempfile_<nanos>_<1000..=9999>.txt` in [`env::temp_dir`].
///
/// ```rust
/// let temp = tempfile_scoped::Builder::new()
///     .prefix("report-")
///     .suffix(".csv")
///     .create()
///     .unwrap();
/// let name = temp.path().file_name().unwrap().to_str().unwrap();
/// assert!(name.starts_with("report-"));
/// assert!(name.ends_with(".csv"));
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    prefix: String,
    suffix: String,
    rand: RangeInclusive<u32>,
    retries: u32,
}

impl Default for Builder {
    fn default() -> Builder {
        Builder {
            prefix: naming::DEFAULT_PREFIX.to_string(),
            suffix: naming::DEFAULT_SUFFIX.to_string(),
            rand: naming::DEFAULT_RAND,
            retries: 16,
        }
    }
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    pub fn prefix(&mut self, prefix: &str) -> &mut Builder {
        self.prefix = prefix.to_string();
        self
    }

    pub fn suffix(&mut self, suffix: &str) -> &mut Builder {
        self.suffix = suffix.to_string();
        self
    }

    /// The range the random part of the name is drawn from.
    ///
    /// # Panics
    ///
    /// If the range is empty.
    pub fn rand_range(&mut self, range: RangeInclusive<u32>) -> &mut Builder {
        assert!(!range.is_empty(), "random name range must not be empty");
        self.rand = range;
        self
    }

    /// How many names to try before giving up, if the generated names are already taken.
    /// At least one attempt is always made.
    pub fn retries(&mut self, retries: u32) -> &mut Builder {
        self.retries = retries;
        self
    }

    /// Create the file in the platform's temporary directory.
    pub fn create(&self) -> Result<TempFile, Error> {
        self.create_in(env::temp_dir())
    }

    /// Create the file in `dir`, which must already exist.
    ///
    /// An existing file is never opened: a name which is already taken is
    /// replaced with a freshly generated one.
    pub fn create_in<P: AsRef<Path>>(&self, dir: P) -> Result<TempFile, Error> {
        let mut rng = rand::thread_rng();
        self.create_named_in(dir.as_ref(), || {
            naming::unique_name(
                &self.prefix,
                &self.suffix,
                naming::time_sample(),
                &self.rand,
                &mut rng,
            )
        })
    }

    fn create_named_in<F>(&self, dir: &Path, mut next_name: F) -> Result<TempFile, Error>
    where
        F: FnMut() -> String,
    {
        let mut last_tried = dir.to_path_buf();

        for _ in 0..self.retries.max(1) {
            let path = dir.join(next_name());

            match fs::OpenOptions::new()
                .append(true)
                .create_new(true)
                .open(&path)
            {
                Ok(file) => return Ok(TempFile::from_created(path, file)),
                Err(ref e) if io::ErrorKind::AlreadyExists == e.kind() => {
                    debug!("temporary name already taken: {}", path.display());
                    last_tried = path;
                }
                Err(source) => return Err(Error::Create { path, source }),
            }
        }

        Err(Error::Create {
            path: last_tried,
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "couldn't find an unused temporary file name",
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use super::*;

    fn names(list: &'static [&'static str]) -> impl FnMut() -> String {
        let mut list = list.iter();
        move || list.next().expect("ran out of names").to_string()
    }

    #[test]
    fn taken_name_is_replaced() {
        let dir = tempfile::TempDir::new().unwrap();
        let taken = dir.path().join("taken");
        fs::write(&taken, "someone else's").unwrap();

        let temp = Builder::new()
            .create_named_in(dir.path(), names(&["taken", "fresh"]))
            .unwrap();

        assert_eq!(dir.path().join("fresh"), temp.path());
        assert_eq!("someone else's", fs::read_to_string(&taken).unwrap());
        assert_eq!(2, fs::read_dir(&dir).unwrap().count());

        drop(temp);
        assert!(taken.exists());
    }

    #[test]
    fn gives_up_after_retries() {
        let dir = tempfile::TempDir::new().unwrap();
        let taken = dir.path().join("taken");
        fs::write(&taken, "someone else's").unwrap();

        let mut attempts = 0;
        let result = Builder::new().retries(3).create_named_in(dir.path(), || {
            attempts += 1;
            "taken".to_string()
        });

        match result {
            Err(Error::Create { path, source }) => {
                assert_eq!(taken, path);
                assert_eq!(io::ErrorKind::AlreadyExists, source.kind());
            }
            other => panic!("expected a creation error, got {:?}", other),
        }
        assert_eq!(3, attempts);
        assert_eq!("someone else's", fs::read_to_string(&taken).unwrap());
        assert_eq!(1, fs::read_dir(&dir).unwrap().count());
    }

    #[test]
    fn single_attempt_does_not_retry() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("taken"), "").unwrap();

        let result = Builder::new()
            .retries(1)
            .create_named_in(dir.path(), names(&["taken", "fresh"]));

        assert!(matches!(
            result,
            Err(Error::Create { ref source, .. }) if io::ErrorKind::AlreadyExists == source.kind()
        ));
        assert!(!dir.path().join("fresh").exists());
        assert_eq!(1, fs::read_dir(&dir).unwrap().count());
    }

    #[test]
    fn zero_retries_still_tries_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let temp = Builder::new()
            .retries(0)
            .create_named_in(dir.path(), names(&["only"]))
            .unwrap();
        assert_eq!(dir.path().join("only"), temp.path());
    }
}
