#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The direction in which a word runs across the grid.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// The word runs left to right along a row.
    Horizontal,
    /// The word runs top to bottom along a column.
    Vertical,
}

impl Orientation {
    /// Picks an orientation with a fair coin flip.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Orientation {
        if rng.gen_bool(0.5) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }
}

/// A word along with the position and direction it should occupy on the grid.
///
/// The position is the word's anchor, i.e. the cell holding its first letter. A `Word` is only a
/// hypothesis until it is passed to [`PuzzleGrid::try_place`](crate::PuzzleGrid::try_place) and
/// accepted.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Word {
    pub text: Arc<str>,
    pub row: usize,
    pub column: usize,
    pub orientation: Orientation,
}

impl Word {
    pub fn new(text: Arc<str>, row: usize, column: usize, orientation: Orientation) -> Word {
        Word {
            text,
            row,
            column,
            orientation,
        }
    }

    /// Creates a word running left to right from the given anchor.
    pub fn horizontal(text: &str, row: usize, column: usize) -> Word {
        Word::new(Arc::from(text), row, column, Orientation::Horizontal)
    }

    /// Creates a word running top to bottom from the given anchor.
    pub fn vertical(text: &str, row: usize, column: usize) -> Word {
        Word::new(Arc::from(text), row, column, Orientation::Vertical)
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// The number of letters in the word.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Iterates over each letter of the word along with the `(row, column)` it would occupy.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.text.chars().enumerate().map(|(index, letter)| {
            if self.is_vertical() {
                (self.row + index, self.column, letter)
            } else {
                (self.row, self.column + index, letter)
            }
        })
    }

    /// Returns `true` iff the given position holds the word's final letter.
    pub fn ends_at(&self, row: usize, column: usize) -> bool {
        let last = match self.len() {
            0 => return false,
            len => len - 1,
        };
        if self.is_vertical() {
            column == self.column && row == self.row + last
        } else {
            row == self.row && column == self.column + last
        }
    }
}
