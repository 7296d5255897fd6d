//! Possibly-unready filesystem reads.
//!
//! Every read that an external incremental engine might not have produced
//! yet is modeled as a [`Readiness`]-returning query: the core detects
//! non-availability, records nothing, and lets the engine re-invoke the
//! whole computation later. `Pending` is structural, never an error, and
//! never reaches the end user.

use std::fmt;
use std::io;
use std::path::Path;

/// Outcome of a query whose inputs may not have been produced yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness<T> {
    Ready(T),
    Pending,
}

impl<T> Readiness<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The ready value, or `None` when pending.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Pending => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Readiness<U> {
        match self {
            Self::Ready(value) => Readiness::Ready(f(value)),
            Self::Pending => Readiness::Pending,
        }
    }
}

/// Unwrap a ready value out of a `Result<Readiness<T>, E>` expression, or
/// propagate `Pending` to the caller.
macro_rules! ready {
    ($expr:expr) => {
        match $expr {
            $crate::fs::Readiness::Ready(value) => value,
            $crate::fs::Readiness::Pending => return Ok($crate::fs::Readiness::Pending),
        }
    };
}
pub(crate) use ready;

/// Filesystem seam for declaration-file reads.
///
/// `Ready(Some(bytes))` is a successful read, `Ready(None)` means the file
/// does not exist, `Pending` means the read has not been produced yet, and
/// `Err` is a genuine I/O failure (fatal, not retried by this core).
pub trait Filesystem: fmt::Debug + Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Readiness<Option<Vec<u8>>>>;
}

/// Direct `std::fs` implementation; reads are always ready.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn read(&self, path: &Path) -> io::Result<Readiness<Option<Vec<u8>>>> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(Readiness::Ready(Some(bytes))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Readiness::Ready(None)),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn os_filesystem_reads_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MODULE.bazel");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"module(name='A')").unwrap();

        let read = OsFilesystem.read(&path).unwrap();
        assert_eq!(read, Readiness::Ready(Some(b"module(name='A')".to_vec())));
    }

    #[test]
    fn os_filesystem_maps_missing_files_to_ready_none() {
        let dir = tempfile::tempdir().unwrap();
        let read = OsFilesystem.read(&dir.path().join("nope")).unwrap();
        assert_eq!(read, Readiness::Ready(None));
    }

    #[test]
    fn readiness_map_preserves_pending() {
        let pending: Readiness<u32> = Readiness::Pending;
        assert!(pending.map(|n| n + 1).is_pending());
        assert_eq!(Readiness::Ready(1).map(|n| n + 1).ready(), Some(2));
    }
}
