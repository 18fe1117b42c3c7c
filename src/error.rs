use std::error;
use std::fmt;

/// A recoverable condition reported by a tree operation.
///
/// None of these leave the tree modified.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// The key to erase is not present in the tree.
    KeyNotFound,
    /// The tree has no entries to render.
    EmptyTree,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::KeyNotFound => write!(f, "key not present"),
            Error::EmptyTree => write!(f, "tree is empty"),
        }
    }
}

impl error::Error for Error {}
