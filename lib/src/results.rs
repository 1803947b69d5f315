use std::io;
use thiserror::Error;

/// Indicates that an error occurred while trying to generate a crossword grid.
#[derive(Debug, Error)]
pub enum CrosswordError {
    /// Indicates that no unused word in the word bank satisfies the requested filter.
    ///
    /// This usually means the word bank is too small for the requested configuration, for
    /// example when it contains no word long enough to seed a grid.
    #[error("no unused word in the word bank satisfies the request")]
    PoolExhausted,
    /// Indicates that no unused word starts with a letter that is already on the grid, and the
    /// generator was configured to fail rather than fall back to an unbiased draw.
    #[error("no unused word starts with a letter that is already on the grid")]
    NoMatchingWord,
    /// Indicates that the generator configuration can never produce a grid.
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(&'static str),
    /// Indicates that a word contains a character that cannot be placed on the grid.
    #[error("unsupported character in word: {0:?}")]
    UnsupportedCharacter(char),
    /// Indicates that reading a word list failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
