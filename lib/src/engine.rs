use crate::config::*;
use crate::data::WordBank;
use crate::grid::PuzzleGrid;
use crate::results::CrosswordError;
use crate::word::{Orientation, Word};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::HashSet;
use std::result::Result;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Builds several candidate grids from a word bank and keeps the best one.
///
/// The generator remembers every letter it has placed, across all candidates, and prefers to try
/// words that start with one of those letters. Only the record of which words were used is reset
/// between candidates.
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rs_crossword_generator::{Generator, GeneratorConfig, WordBank};
///
/// let bank = WordBank::from_iterator(vec!["crossword", "word", "road", "sword"]).unwrap();
/// let config = GeneratorConfig::default().with_grids_to_make(1);
/// let mut generator = Generator::with_rng(&bank, config, StdRng::seed_from_u64(42));
///
/// let grid = generator.generate().unwrap();
///
/// assert_eq!(grid.letter_at(0, 0), Some('C'));
/// ```
pub struct Generator<'a, R: Rng = ThreadRng> {
    bank: &'a WordBank,
    config: GeneratorConfig,
    rng: R,
    used_words: HashSet<Arc<str>>,
    good_starting_letters: HashSet<char>,
    candidates: Vec<PuzzleGrid>,
}

impl<'a> Generator<'a, ThreadRng> {
    /// Constructs a generator that draws from the thread-local random number generator.
    pub fn new(bank: &'a WordBank, config: GeneratorConfig) -> Self {
        Generator::with_rng(bank, config, rand::thread_rng())
    }
}

impl<'a, R: Rng> Generator<'a, R> {
    /// Constructs a generator that draws from the given random number generator.
    ///
    /// Seeding the generator makes every run reproducible.
    pub fn with_rng(bank: &'a WordBank, config: GeneratorConfig, rng: R) -> Self {
        Generator {
            bank,
            config,
            rng,
            used_words: HashSet::new(),
            good_starting_letters: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The candidate grids built by the most recent call to [`Generator::generate`], in the order
    /// they were built.
    pub fn candidates(&self) -> &[PuzzleGrid] {
        &self.candidates
    }

    /// Every letter placed on any grid by this generator so far.
    pub fn good_starting_letters(&self) -> &HashSet<char> {
        &self.good_starting_letters
    }

    /// Builds up to [`GeneratorConfig::grids_to_make`] candidate grids and returns the one with
    /// the highest [intersection score](PuzzleGrid::intersection_score).
    ///
    /// Building stops early once a candidate reaches [`INTERSECTION_TARGET`]. Fails if the word
    /// bank runs out of suitable words, in which case no grid is returned at all.
    pub fn generate(&mut self) -> Result<PuzzleGrid, CrosswordError> {
        self.config.validate()?;
        let Generator {
            bank,
            config,
            rng,
            used_words,
            good_starting_letters,
            candidates,
        } = self;

        candidates.clear();
        build_until_target(candidates, config.grids_to_make, |_| {
            used_words.clear();
            CandidateBuilder::new(
                *bank,
                &*config,
                &mut *rng,
                &mut *used_words,
                &mut *good_starting_letters,
            )
            .build()
        })?;

        let best = select_best_grid(candidates).ok_or(CrosswordError::InvalidConfig(
            "grids_to_make must be at least 1",
        ))?;
        info!(
            score = best.intersection_score(),
            letters = best.letter_count(),
            num_candidates = candidates.len(),
            "Selected best grid"
        );
        Ok(best.clone())
    }
}

/// Runs `build_candidate` until `grids_to_make` grids are built, or a grid reaches the
/// intersection target.
fn build_until_target<F>(
    candidates: &mut Vec<PuzzleGrid>,
    grids_to_make: usize,
    mut build_candidate: F,
) -> Result<(), CrosswordError>
where
    F: FnMut(usize) -> Result<PuzzleGrid, CrosswordError>,
{
    for index in 0..grids_to_make {
        let grid = build_candidate(index)?;
        let score = grid.intersection_score();
        debug!(
            candidate = index,
            score,
            letters = grid.letter_count(),
            "Built candidate grid"
        );
        candidates.push(grid);
        if score >= INTERSECTION_TARGET {
            debug!(candidate = index, "Reached intersection target");
            break;
        }
    }
    Ok(())
}

/// Returns the grid with the highest intersection score.
///
/// When several grids share the highest score, the last of them is returned.
pub fn select_best_grid(candidates: &[PuzzleGrid]) -> Option<&PuzzleGrid> {
    let mut best: Option<(&PuzzleGrid, usize)> = None;
    for grid in candidates {
        let score = grid.intersection_score();
        match best {
            Some((_, best_score)) if score < best_score => {}
            _ => best = Some((grid, score)),
        }
    }
    best.map(|(grid, _)| grid)
}

/// Builds a single candidate grid.
///
/// The grid is seeded with a long word across the top-left corner, then the builder repeatedly
/// picks another word and places it at the first existing letter where it fits.
pub struct CandidateBuilder<'a, R: Rng + ?Sized> {
    bank: &'a WordBank,
    config: &'a GeneratorConfig,
    rng: &'a mut R,
    used_words: &'a mut HashSet<Arc<str>>,
    good_starting_letters: &'a mut HashSet<char>,
    grid: PuzzleGrid,
}

impl<'a, R: Rng + ?Sized> CandidateBuilder<'a, R> {
    /// Constructs a builder for an empty grid.
    ///
    /// Words already in `used_words` are never placed. Every placed word is added to
    /// `used_words`, and its letters to `good_starting_letters`.
    pub fn new(
        bank: &'a WordBank,
        config: &'a GeneratorConfig,
        rng: &'a mut R,
        used_words: &'a mut HashSet<Arc<str>>,
        good_starting_letters: &'a mut HashSet<char>,
    ) -> Self {
        CandidateBuilder {
            bank,
            config,
            rng,
            used_words,
            good_starting_letters,
            grid: PuzzleGrid::new(config.grid_size),
        }
    }

    pub fn build(mut self) -> Result<PuzzleGrid, CrosswordError> {
        self.place_seed_word()?;

        let mut continuous_fails = 0;
        for _ in 0..self.config.attempts_to_fit_words {
            if self.all_words_used() {
                debug!("Every word in the bank has been used");
                break;
            }
            let text = self.word_to_try()?;
            if self.attempt_to_place(text) {
                continuous_fails = 0;
            } else {
                continuous_fails += 1;
            }
            if continuous_fails > self.config.max_number_of_fails {
                break;
            }
        }
        Ok(self.grid)
    }

    fn place_seed_word(&mut self) -> Result<(), CrosswordError> {
        let text = self.bank.random_word_of_min_length(
            &*self.used_words,
            MIN_SEED_WORD_LENGTH,
            &mut *self.rng,
        )?;
        let word = Word::new(text, 0, 0, Orientation::Horizontal);
        if !self.grid.try_place(&word) {
            debug!(word = %word.text, "Seed word does not fit on the grid");
        }
        self.mark_used(&word.text);
        Ok(())
    }

    /// Prefers words that start with a letter that has already been placed.
    fn word_to_try(&mut self) -> Result<Arc<str>, CrosswordError> {
        if let Some(text) = self.bank.random_word_starting_with(
            &*self.used_words,
            &*self.good_starting_letters,
            &mut *self.rng,
        ) {
            return Ok(text);
        }
        match self.config.bias_fallback {
            BiasFallback::Unbiased => self.bank.random_word(&*self.used_words, &mut *self.rng),
            BiasFallback::Fail => Err(CrosswordError::NoMatchingWord),
        }
    }

    /// Tries the word at each letter on the grid, in row-major order, with a random orientation
    /// per letter. Returns whether the word was placed.
    fn attempt_to_place(&mut self, text: Arc<str>) -> bool {
        let size = self.grid.size();
        for row in 0..size {
            for column in 0..size {
                if !self.grid.is_letter(row, column) {
                    continue;
                }
                let orientation = Orientation::random(&mut *self.rng);
                let word = Word::new(Arc::clone(&text), row, column, orientation);
                if self.grid.try_place(&word) {
                    trace!(word = %word.text, row, column, ?orientation, "Placed word");
                    self.mark_used(&word.text);
                    return true;
                }
            }
        }
        false
    }

    fn all_words_used(&self) -> bool {
        self.bank.iter().all(|word| self.used_words.contains(word))
    }

    fn mark_used(&mut self, text: &Arc<str>) {
        self.used_words.insert(Arc::clone(text));
        self.good_starting_letters.extend(text.chars());
    }
}
