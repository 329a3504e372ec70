//! Error taxonomy for the crate.
//!
//! One enum, one `thiserror` derive, `From` impls at the boundaries the
//! crate actually crosses — the same shape as the teacher's hand-rolled
//! `Error(String)`, but structured and chaining through `source()`.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error for '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("'{}' is not a valid target file", path.display())]
    InvalidTarget { path: PathBuf },

    /// Describes the same "recognized key, unparseable value" failure that
    /// [`crate::properties::PropertyMap::bogus`] records per-entry; never
    /// actually constructed by `resolve` or the CLI, since a bogus value is
    /// not fatal and the property map already carries it for callers to
    /// inspect. Kept in the taxonomy for callers that want to represent the
    /// same failure as an `Error`, e.g. when validating a single key/value
    /// pair outside of a full resolve.
    #[error("bogus value for '{key}': '{value}' ({reason})")]
    Bogus {
        key: String,
        value: String,
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
