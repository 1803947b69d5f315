use crate::results::CrosswordError;
use rand::seq::SliceRandom;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// Contains all the words that may be placed on a crossword grid.
///
/// Words are stored in upper case, in the order they were first provided.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WordBank {
    all_words: Vec<Arc<str>>,
    max_word_length: usize,
}

impl WordBank {
    /// Constructs a new `WordBank` struct by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word will be trimmed and converted to
    /// upper case, and blank lines are ignored.
    ///
    /// ```
    /// use rs_crossword_generator::WordBank;
    /// use std::io::Cursor;
    ///
    /// let bank = WordBank::from_reader(Cursor::new("crossword\n\n word \n")).unwrap();
    ///
    /// assert_eq!(bank.len(), 2);
    /// assert_eq!(&*bank[0], "CROSSWORD");
    /// assert_eq!(&*bank[1], "WORD");
    /// ```
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, CrosswordError> {
        let words = word_reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()?;
        WordBank::from_iterator(words)
    }

    /// Constructs a new `WordBank` struct using the words from the given iterator.
    ///
    /// Each word will be trimmed and converted to upper case. Empty words and repeated words are
    /// ignored. Returns [`CrosswordError::UnsupportedCharacter`] if any word contains a character
    /// that is not alphabetic.
    pub fn from_iterator<S, I>(words: I) -> Result<Self, CrosswordError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut max_word_length = 0;
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut all_words: Vec<Arc<str>> = Vec::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            if let Some(bad_letter) = word.chars().find(|letter| !letter.is_alphabetic()) {
                return Err(CrosswordError::UnsupportedCharacter(bad_letter));
            }
            let word: Arc<str> = Arc::from(word.to_uppercase().as_str());
            if !seen.insert(Arc::clone(&word)) {
                continue;
            }
            max_word_length = max_word_length.max(word.chars().count());
            all_words.push(word);
        }
        Ok(WordBank {
            all_words,
            max_word_length,
        })
    }

    /// Returns the number of words in the bank.
    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }

    /// Returns the length of the longest word in the bank.
    pub fn max_word_len(&self) -> usize {
        self.max_word_length
    }

    /// Returns the words that are not in `excluded`, in bank order.
    pub fn unused_words(&self, excluded: &HashSet<Arc<str>>) -> Vec<Arc<str>> {
        self.unused_iter(excluded).map(Arc::clone).collect()
    }

    /// Selects a random unused word that has at least `min_length` letters.
    ///
    /// Returns [`CrosswordError::PoolExhausted`] if there is no such word.
    pub fn random_word_of_min_length<R: Rng + ?Sized>(
        &self,
        excluded: &HashSet<Arc<str>>,
        min_length: usize,
        rng: &mut R,
    ) -> Result<Arc<str>, CrosswordError> {
        let candidates: Vec<&Arc<str>> = self
            .unused_iter(excluded)
            .filter(|word| word.chars().count() >= min_length)
            .collect();
        candidates
            .choose(rng)
            .map(|word| Arc::clone(*word))
            .ok_or(CrosswordError::PoolExhausted)
    }

    /// Selects a random unused word.
    ///
    /// Returns [`CrosswordError::PoolExhausted`] if every word is excluded.
    pub fn random_word<R: Rng + ?Sized>(
        &self,
        excluded: &HashSet<Arc<str>>,
        rng: &mut R,
    ) -> Result<Arc<str>, CrosswordError> {
        self.random_word_of_min_length(excluded, 0, rng)
    }

    /// Selects a random unused word whose first letter is one of `letters`, if there is one.
    pub fn random_word_starting_with<R: Rng + ?Sized>(
        &self,
        excluded: &HashSet<Arc<str>>,
        letters: &HashSet<char>,
        rng: &mut R,
    ) -> Option<Arc<str>> {
        let candidates: Vec<&Arc<str>> = self
            .unused_iter(excluded)
            .filter(|word| {
                word.chars()
                    .next()
                    .map_or(false, |first| letters.contains(&first))
            })
            .collect();
        candidates.choose(rng).map(|word| Arc::clone(*word))
    }

    fn unused_iter<'a>(
        &'a self,
        excluded: &'a HashSet<Arc<str>>,
    ) -> impl Iterator<Item = &'a Arc<str>> + 'a {
        self.all_words
            .iter()
            .filter(move |word| !excluded.contains(*word))
    }
}

impl Deref for WordBank {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.all_words
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    macro_rules! assert_arc_eq {
        ($arc_vec:expr, $non_arc_vec:expr) => {
            assert_eq!(
                $arc_vec as &[Arc<str>],
                $non_arc_vec
                    .iter()
                    .map(|thing| Arc::from(*thing))
                    .collect::<Vec<Arc<_>>>()
            );
        };
    }

    fn excluding(words: &[&str]) -> HashSet<Arc<str>> {
        words.iter().map(|word| Arc::from(*word)).collect()
    }

    #[test]
    fn from_reader_trims_and_upper_cases() -> Result<(), CrosswordError> {
        let bank = WordBank::from_reader(Cursor::new("\n\ncrossword\n Road \nant\n"))?;

        assert_eq!(bank.len(), 3);
        assert_arc_eq!(&bank, &["CROSSWORD", "ROAD", "ANT"]);
        assert_eq!(bank.max_word_len(), 9);
        Ok(())
    }

    #[test]
    fn from_iterator_drops_duplicates() -> Result<(), CrosswordError> {
        let bank = WordBank::from_iterator(vec!["tea", "TEA", "hen", "Tea "])?;

        assert_arc_eq!(&bank, &["TEA", "HEN"]);
        Ok(())
    }

    #[test]
    fn from_iterator_rejects_unsupported_characters() {
        let result = WordBank::from_iterator(vec!["tea", "ice cream"]);

        assert!(matches!(
            result,
            Err(CrosswordError::UnsupportedCharacter(' '))
        ));
    }

    #[test]
    fn unused_words_keeps_bank_order() -> Result<(), CrosswordError> {
        let bank = WordBank::from_iterator(vec!["tiger", "ant", "tea", "hen"])?;

        let unused = bank.unused_words(&excluding(&["ANT", "HEN"]));

        assert_arc_eq!(&unused, &["TIGER", "TEA"]);
        Ok(())
    }

    #[test]
    fn random_word_of_min_length_only_returns_long_words() -> Result<(), CrosswordError> {
        let bank = WordBank::from_iterator(vec!["ant", "crossword", "tea", "elephants"])?;
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            let word = bank.random_word_of_min_length(&HashSet::new(), 9, &mut rng)?;
            assert!(word.as_ref() == "CROSSWORD" || word.as_ref() == "ELEPHANTS");
        }
        Ok(())
    }

    #[test]
    fn random_word_of_min_length_skips_excluded() -> Result<(), CrosswordError> {
        let bank = WordBank::from_iterator(vec!["crossword", "elephants"])?;
        let mut rng = StdRng::seed_from_u64(2);

        let word = bank.random_word_of_min_length(&excluding(&["CROSSWORD"]), 9, &mut rng)?;

        assert_eq!(word.as_ref(), "ELEPHANTS");
        Ok(())
    }

    #[test]
    fn random_word_of_min_length_pool_exhausted() -> Result<(), CrosswordError> {
        let bank = WordBank::from_iterator(vec!["elephant", "tiger"])?;
        let mut rng = StdRng::seed_from_u64(3);

        assert!(matches!(
            bank.random_word_of_min_length(&HashSet::new(), 9, &mut rng),
            Err(CrosswordError::PoolExhausted)
        ));
        Ok(())
    }

    #[test]
    fn random_word_pool_exhausted() -> Result<(), CrosswordError> {
        let bank = WordBank::from_iterator(vec!["tea", "hen"])?;
        let mut rng = StdRng::seed_from_u64(4);

        assert!(matches!(
            bank.random_word(&excluding(&["TEA", "HEN"]), &mut rng),
            Err(CrosswordError::PoolExhausted)
        ));
        Ok(())
    }

    #[test]
    fn random_word_starting_with_filters_first_letter() -> Result<(), CrosswordError> {
        let bank = WordBank::from_iterator(vec!["tea", "hen", "ant", "tiger"])?;
        let letters: HashSet<char> = HashSet::from(['T']);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..20 {
            let word = bank
                .random_word_starting_with(&HashSet::new(), &letters, &mut rng)
                .unwrap();
            assert!(word.starts_with('T'));
        }
        assert_eq!(
            bank.random_word_starting_with(&excluding(&["TEA", "TIGER"]), &letters, &mut rng),
            None
        );
        Ok(())
    }
}
