#![cfg_attr(feature = "unstable", feature(test))]

//! Generates crossword-style letter grids from a word bank.
//!
//! A [`Generator`] seeds each candidate grid with a long word, then places more words wherever
//! they cross a letter that is already on the grid. [`PuzzleGrid::try_place`] decides whether a
//! word may go somewhere, and [`PuzzleGrid::intersection_score`] ranks the finished candidates.

mod config;
mod data;
mod engine;
mod grid;
mod results;
mod word;

pub use config::*;
pub use data::WordBank;
pub use engine::*;
pub use grid::*;
pub use results::*;
pub use word::*;
