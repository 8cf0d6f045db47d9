// std imports
use std::io;

// third-party imports
use thiserror::Error;

/// Error is an error which may occur in the library.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("unknown scheme {scheme:?}, use any of {known:?}")]
    UnknownScheme { scheme: String, known: Vec<String> },
    #[error("unknown option {name:?} for {handler:?} stream handler")]
    UnknownOption { name: String, handler: &'static str },
}

/// Result is an alias for standard result with bound Error type.
pub type Result<T> = std::result::Result<T, Error>;
