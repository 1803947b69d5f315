use crate::results::CrosswordError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The minimum number of letters in the word that seeds each candidate grid.
pub const MIN_SEED_WORD_LENGTH: usize = 9;

/// Once a candidate grid reaches this intersection score, no further candidates are built.
pub const INTERSECTION_TARGET: usize = 4;

/// What to do when no unused word starts with a letter that is already on the grid.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BiasFallback {
    /// Try any unused word instead.
    #[default]
    Unbiased,
    /// Stop generating with [`CrosswordError::NoMatchingWord`].
    Fail,
}

/// Controls how hard the generator works to fill a grid.
///
/// ```
/// use rs_crossword_generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_grid_size(11)
///     .with_grids_to_make(3);
///
/// assert_eq!(config.grid_size, 11);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// The number of rows and columns in the grid.
    pub grid_size: usize,
    /// The maximum number of candidate grids to build before picking the best one.
    pub grids_to_make: usize,
    /// The maximum number of words to try to place on each candidate grid.
    pub attempts_to_fit_words: usize,
    /// A candidate grid is finished once more than this many words in a row fail to fit.
    pub max_number_of_fails: usize,
    pub bias_fallback: BiasFallback,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            grid_size: 15,
            grids_to_make: 10,
            attempts_to_fit_words: 200,
            max_number_of_fails: 20,
            bias_fallback: BiasFallback::Unbiased,
        }
    }
}

impl GeneratorConfig {
    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_grids_to_make(mut self, grids_to_make: usize) -> Self {
        self.grids_to_make = grids_to_make;
        self
    }

    pub fn with_attempts_to_fit_words(mut self, attempts_to_fit_words: usize) -> Self {
        self.attempts_to_fit_words = attempts_to_fit_words;
        self
    }

    pub fn with_max_number_of_fails(mut self, max_number_of_fails: usize) -> Self {
        self.max_number_of_fails = max_number_of_fails;
        self
    }

    pub fn with_bias_fallback(mut self, bias_fallback: BiasFallback) -> Self {
        self.bias_fallback = bias_fallback;
        self
    }

    /// Returns an error if this configuration can never produce a grid.
    pub fn validate(&self) -> Result<(), CrosswordError> {
        if self.grid_size == 0 {
            return Err(CrosswordError::InvalidConfig("grid_size must be at least 1"));
        }
        if self.grids_to_make == 0 {
            return Err(CrosswordError::InvalidConfig(
                "grids_to_make must be at least 1",
            ));
        }
        Ok(())
    }
}
