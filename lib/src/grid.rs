use crate::word::Word;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single square on the grid.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Letter(char),
}

impl Cell {
    pub fn is_letter(&self) -> bool {
        matches!(self, Cell::Letter(_))
    }

    pub fn letter(&self) -> Option<char> {
        match self {
            Cell::Letter(letter) => Some(*letter),
            Cell::Empty => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Letter(letter) => write!(f, "{}", letter),
            Cell::Empty => write!(f, "_"),
        }
    }
}

/// A square grid of letters onto which words are placed so that they cross each other.
///
/// Words can only be added through [`PuzzleGrid::try_place`], which refuses any placement that
/// would change an existing letter or leave two unrelated words touching. Once placed, a word can
/// not be removed.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PuzzleGrid {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl PuzzleGrid {
    /// Creates an empty grid with `size` rows and `size` columns.
    pub fn new(size: usize) -> PuzzleGrid {
        PuzzleGrid {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// The number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at the given position.
    ///
    /// Panics if the position is outside the grid.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[self.index(row, column)]
    }

    /// Returns `true` iff the cell at the given position holds a letter.
    ///
    /// Panics if the position is outside the grid.
    pub fn is_letter(&self, row: usize, column: usize) -> bool {
        self.cell(row, column).is_letter()
    }

    /// Returns the letter at the given position, if there is one.
    ///
    /// Panics if the position is outside the grid.
    pub fn letter_at(&self, row: usize, column: usize) -> Option<char> {
        self.cell(row, column).letter()
    }

    /// Iterates over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `chunks` panics on a zero size.
        self.cells.chunks(self.size.max(1))
    }

    /// The number of cells that hold a letter.
    pub fn letter_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_letter()).count()
    }

    /// Places the word on the grid if that is allowed, returning whether it was placed.
    ///
    /// Either every letter of the word is written, or the grid is left untouched.
    ///
    /// ```
    /// use rs_crossword_generator::{PuzzleGrid, Word};
    ///
    /// let mut grid = PuzzleGrid::new(5);
    ///
    /// assert!(grid.try_place(&Word::horizontal("CAT", 1, 0)));
    /// assert!(grid.try_place(&Word::vertical("BAD", 0, 1)));
    /// // The "O" of "TOE" would sit flush against the "D" of "BAD".
    /// assert!(!grid.try_place(&Word::vertical("TOE", 1, 2)));
    /// assert_eq!(grid.letter_at(1, 1), Some('A'));
    /// ```
    pub fn try_place(&mut self, word: &Word) -> bool {
        if !self.can_place(word) {
            return false;
        }
        for (row, column, letter) in word.cells() {
            let index = self.index(row, column);
            self.cells[index] = Cell::Letter(letter);
        }
        true
    }

    /// Returns `true` iff [`PuzzleGrid::try_place`] would accept the word.
    pub fn can_place(&self, word: &Word) -> bool {
        if word.is_empty() || !self.is_valid_position(word.row, word.column) {
            return false;
        }
        if !self.fits_on_grid(word) {
            return false;
        }
        word.cells().all(|(row, column, letter)| {
            let cell = self.cell(row, column);
            (cell == Cell::Empty || cell == Cell::Letter(letter))
                && self.is_placement_legal(word, row, column)
        })
    }

    /// Counts the letters whose four neighbours are all letters.
    ///
    /// Letters on the edge of the grid never count.
    pub fn intersection_score(&self) -> usize {
        let mut score = 0;
        for row in 0..self.size {
            for column in 0..self.size {
                if !self.is_letter(row, column) {
                    continue;
                }
                let (r, c) = (row as isize, column as isize);
                if self.has_letter(r - 1, c)
                    && self.has_letter(r + 1, c)
                    && self.has_letter(r, c - 1)
                    && self.has_letter(r, c + 1)
                {
                    score += 1;
                }
            }
        }
        score
    }

    fn fits_on_grid(&self, word: &Word) -> bool {
        let start = if word.is_vertical() {
            word.row
        } else {
            word.column
        };
        start + word.len() <= self.size
    }

    fn is_placement_legal(&self, word: &Word, row: usize, column: usize) -> bool {
        let (r, c) = (row as isize, column as isize);
        let illegal = if word.is_vertical() {
            self.is_interference((r, c + 1), (r + 1, c))
                || self.is_interference((r, c - 1), (r + 1, c))
                || self.is_overwriting_run(r, c, (r - 1, c))
        } else {
            self.is_interference((r + 1, c), (r, c + 1))
                || self.is_interference((r - 1, c), (r, c + 1))
                || self.is_overwriting_run(r, c, (r, c - 1))
        };
        !illegal && !self.is_invading_territory(word, row, column)
    }

    /// Two letters diagonal to each other around the new letter would leave a touching corner.
    fn is_interference(&self, first: (isize, isize), second: (isize, isize)) -> bool {
        self.has_letter(first.0, first.1) && self.has_letter(second.0, second.1)
    }

    /// A letter directly behind an occupied cell belongs to a run along the same axis.
    fn is_overwriting_run(&self, row: isize, column: isize, behind: (isize, isize)) -> bool {
        self.has_letter(row, column) && self.has_letter(behind.0, behind.1)
    }

    /// An empty cell may not sit flush against the side of another word, and a word may not end
    /// right before an existing letter.
    fn is_invading_territory(&self, word: &Word, row: usize, column: usize) -> bool {
        if self.is_letter(row, column) {
            return false;
        }
        let (r, c) = (row as isize, column as isize);
        let is_end = word.ends_at(row, column);
        if word.is_vertical() {
            self.has_letter(r, c - 1)
                || self.has_letter(r, c + 1)
                || (is_end && self.has_letter(r + 1, c))
        } else {
            self.has_letter(r - 1, c)
                || self.has_letter(r + 1, c)
                || (is_end && self.has_letter(r, c + 1))
        }
    }

    /// Like [`PuzzleGrid::is_letter`], but positions outside the grid are never letters.
    fn has_letter(&self, row: isize, column: isize) -> bool {
        if row < 0 || column < 0 {
            return false;
        }
        let (row, column) = (row as usize, column as usize);
        self.is_valid_position(row, column) && self.is_letter(row, column)
    }

    fn is_valid_position(&self, row: usize, column: usize) -> bool {
        row < self.size && column < self.size
    }

    fn index(&self, row: usize, column: usize) -> usize {
        assert!(
            self.is_valid_position(row, column),
            "Position ({}, {}) is outside the {}x{} grid",
            row,
            column,
            self.size,
            self.size
        );
        row * self.size + column
    }
}

impl fmt::Display for PuzzleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(words: &[Word], size: usize) -> PuzzleGrid {
        let mut grid = PuzzleGrid::new(size);
        for word in words {
            assert!(grid.try_place(word), "could not set up {:?}", word);
        }
        grid
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = PuzzleGrid::new(4);

        assert_eq!(grid.size(), 4);
        assert_eq!(grid.letter_count(), 0);
        assert_eq!(grid.intersection_score(), 0);
        assert!(grid.rows().all(|row| row.len() == 4));
    }

    #[test]
    fn try_place_writes_every_letter() {
        let mut grid = PuzzleGrid::new(6);

        assert!(grid.try_place(&Word::vertical("TEA", 1, 2)));

        assert_eq!(grid.letter_at(1, 2), Some('T'));
        assert_eq!(grid.letter_at(2, 2), Some('E'));
        assert_eq!(grid.letter_at(3, 2), Some('A'));
        assert_eq!(grid.letter_count(), 3);
    }

    #[test]
    fn rejects_empty_word() {
        let mut grid = PuzzleGrid::new(3);

        assert!(!grid.try_place(&Word::horizontal("", 0, 0)));
    }

    #[test]
    fn rejects_anchor_outside_grid() {
        let mut grid = PuzzleGrid::new(3);

        assert!(!grid.try_place(&Word::horizontal("A", 3, 0)));
        assert!(!grid.try_place(&Word::vertical("A", 0, 3)));
    }

    #[test]
    fn fits_on_grid_exactly() {
        let mut grid = PuzzleGrid::new(3);

        assert!(!grid.try_place(&Word::horizontal("HENS", 0, 0)));
        assert!(!grid.try_place(&Word::vertical("HEN", 1, 0)));
        assert!(grid.try_place(&Word::vertical("HEN", 0, 0)));
    }

    #[test]
    fn rejects_conflicting_letter() {
        let mut grid = grid_with(&[Word::horizontal("CAT", 1, 0)], 5);
        let before = grid.clone();

        assert!(!grid.try_place(&Word::vertical("BED", 0, 1)));
        assert_eq!(grid, before);
    }

    #[test]
    fn allows_crossing_on_shared_letter() {
        let grid = grid_with(
            &[Word::horizontal("CAT", 1, 0), Word::vertical("BAD", 0, 1)],
            5,
        );

        assert_eq!(grid.letter_count(), 5);
        assert_eq!(grid.intersection_score(), 1);
    }

    #[test]
    fn rejects_parallel_horizontal_overwrite() {
        let mut grid = grid_with(&[Word::horizontal("CROSSWORD", 0, 0)], 15);

        // Every letter of "WORD" already matches, but it would merge into "CROSSWORD".
        assert!(!grid.try_place(&Word::horizontal("WORD", 0, 5)));
    }

    #[test]
    fn rejects_parallel_vertical_overwrite() {
        let mut grid = grid_with(&[Word::vertical("CROSSWORD", 0, 0)], 15);

        assert!(!grid.try_place(&Word::vertical("WORD", 5, 0)));
    }

    #[test]
    fn same_word_in_same_place_is_rejected_after_first_letter() {
        let mut grid = grid_with(&[Word::horizontal("HEN", 2, 0)], 5);
        let before = grid.clone();

        assert!(!grid.try_place(&Word::horizontal("HEN", 2, 0)));
        assert_eq!(grid, before);
    }

    #[test]
    fn single_letter_word_on_matching_letter_is_a_no_op() {
        let mut grid = grid_with(&[Word::horizontal("HEN", 2, 0)], 5);
        let before = grid.clone();

        assert!(grid.try_place(&Word::horizontal("H", 2, 0)));
        assert_eq!(grid, before);
    }

    #[test]
    fn rejects_vertical_corner_interference() {
        let grid = grid_with(
            &[Word::horizontal("CAT", 0, 0), Word::vertical("CO", 0, 0)],
            6,
        );

        // The anchor already holds a letter and has nothing above it, so only the "A" to its
        // right together with the "O" below it can make this illegal.
        assert!(!grid.is_placement_legal(&Word::vertical("COW", 0, 0), 0, 0));
        assert!(grid.is_interference((0, 1), (1, 0)));
    }

    #[test]
    fn rejects_horizontal_corner_interference() {
        let grid = grid_with(
            &[Word::vertical("CAT", 0, 0), Word::horizontal("CO", 0, 0)],
            6,
        );

        assert!(!grid.is_placement_legal(&Word::horizontal("COW", 0, 0), 0, 0));
        assert!(grid.is_interference((1, 0), (0, 1)));
    }

    #[test]
    fn corner_checks_ignore_positions_outside_grid() {
        let grid = grid_with(&[Word::horizontal("CAT", 0, 0)], 3);

        assert!(!grid.is_interference((-1, 0), (0, 1)));
        assert!(!grid.is_interference((0, 2), (0, 3)));
    }

    #[test]
    fn rejects_word_flush_against_side_of_another() {
        let mut grid = grid_with(&[Word::horizontal("CAT", 2, 0)], 6);

        // Runs right alongside "CAT" on the row above.
        assert!(!grid.try_place(&Word::horizontal("DOG", 1, 0)));
        // Runs down into the side of the "T".
        assert!(!grid.try_place(&Word::vertical("HEN", 0, 3)));
    }

    #[test]
    fn rejects_word_ending_against_another_letter() {
        let mut grid = grid_with(&[Word::vertical("CAT", 0, 4)], 6);

        // The last letter would sit directly left of the "A".
        assert!(!grid.try_place(&Word::horizontal("TEA", 1, 1)));
        // One letter shorter leaves a gap before the "A".
        assert!(grid.try_place(&Word::horizontal("TE", 1, 1)));
    }

    #[test]
    fn allows_word_ending_at_grid_edge() {
        let mut grid = grid_with(&[Word::horizontal("CAT", 0, 0)], 3);

        assert!(grid.try_place(&Word::vertical("APE", 0, 1)));
        assert_eq!(grid.letter_at(2, 1), Some('E'));
    }

    #[test]
    fn intersection_score_ignores_edges() {
        // The crossing letter is on the top row, so it has no neighbour above.
        let grid = grid_with(
            &[Word::horizontal("CAT", 0, 0), Word::vertical("APE", 0, 1)],
            4,
        );

        assert_eq!(grid.intersection_score(), 0);
    }

    #[test]
    fn display_marks_empty_cells() {
        let grid = grid_with(&[Word::horizontal("HEN", 1, 0)], 3);

        assert_eq!(grid.to_string(), "_ _ _\nH E N\n_ _ _\n");
    }
}
