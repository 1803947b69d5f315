use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use rs_crossword_generator::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Simple program to build a crossword-style grid out of a list of words.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to a file that contains a list of possible words, with one word on each line.
    #[arg(short = 'f', long)]
    words_file: String,

    #[command(flatten)]
    generator: GeneratorArgs,

    /// Seed for the random number generator. A random seed is used if this is not set.
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct GeneratorArgs {
    /// The number of rows and columns in the grid.
    #[arg(long, default_value_t = GeneratorConfig::default().grid_size)]
    grid_size: usize,

    /// The maximum number of candidate grids to build.
    #[arg(long, default_value_t = GeneratorConfig::default().grids_to_make)]
    grids_to_make: usize,

    /// The maximum number of words to try to place on each candidate grid.
    #[arg(long, default_value_t = GeneratorConfig::default().attempts_to_fit_words)]
    attempts: usize,

    /// Finish a candidate grid once more than this many words in a row fail to fit.
    #[arg(long, default_value_t = GeneratorConfig::default().max_number_of_fails)]
    max_fails: usize,

    /// Fail instead of trying any word when no unused word starts with a letter on the grid.
    #[arg(long)]
    strict_bias: bool,
}

impl GeneratorArgs {
    fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_grid_size(self.grid_size)
            .with_grids_to_make(self.grids_to_make)
            .with_attempts_to_fit_words(self.attempts)
            .with_max_number_of_fails(self.max_fails)
            .with_bias_fallback(if self.strict_bias {
                BiasFallback::Fail
            } else {
                BiasFallback::Unbiased
            })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single grid and print it.
    Generate,
    /// Generate many grids independently and report how well they score.
    Benchmark {
        /// The number of grids to generate.
        #[arg(long, default_value_t = 100)]
        runs: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rs_crossword_generator=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let start_time = Instant::now();
    let cli = Cli::parse();
    println!("File: {}", cli.words_file);

    let words_reader = io::BufReader::new(
        File::open(&cli.words_file)
            .with_context(|| format!("could not open words file {}", cli.words_file))?,
    );
    let word_bank = WordBank::from_reader(words_reader)?;
    println!("There are {} possible words.", word_bank.len());

    let config = cli.generator.to_config();
    config.validate()?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    match cli.command {
        Command::Generate => generate_single_grid(&word_bank, config, seed)?,
        Command::Benchmark { runs } => run_benchmark(&word_bank, &config, seed, runs),
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn generate_single_grid(
    word_bank: &WordBank,
    config: GeneratorConfig,
    seed: u64,
) -> anyhow::Result<()> {
    let mut generator = Generator::with_rng(word_bank, config, StdRng::seed_from_u64(seed));
    let grid = generator.generate()?;

    println!(
        "Built {} candidate grid(s) with seed {}.\n",
        generator.candidates().len(),
        seed
    );
    print!("{}", render(&grid));
    println!(
        "\nIntersection score: {} ({} letters placed)",
        grid.intersection_score(),
        grid.letter_count()
    );
    Ok(())
}

/// Draws the grid as text, with a `#` for every square that holds no letter.
fn render(grid: &PuzzleGrid) -> String {
    let mut output = String::new();
    for row in 0..grid.size() {
        let line: Vec<String> = (0..grid.size())
            .map(|column| match grid.letter_at(row, column) {
                Some(letter) => letter.to_string(),
                None => "#".to_string(),
            })
            .collect();
        output.push_str(&line.join(" "));
        output.push('\n');
    }
    output
}

fn run_benchmark(word_bank: &WordBank, config: &GeneratorConfig, seed: u64, runs: u64) {
    let results: Vec<Result<usize, CrosswordError>> = (0..runs)
        .into_par_iter()
        .map(|run| {
            let rng = StdRng::seed_from_u64(seed.wrapping_add(run));
            Generator::with_rng(word_bank, config.clone(), rng)
                .generate()
                .map(|grid| grid.intersection_score())
        })
        .collect();

    let mut scores: Vec<usize> = Vec::new();
    let mut num_failures = 0;
    for result in results {
        match result {
            Ok(score) => scores.push(score),
            Err(error) => {
                tracing::warn!(%error, "Generation failed");
                num_failures += 1;
            }
        }
    }
    println!(
        "Generated {} grids starting from seed {}. Results:",
        scores.len(),
        seed
    );

    let mut num_grids_per_score: BTreeMap<usize, u32> = BTreeMap::new();
    for score in scores.iter() {
        *(num_grids_per_score.entry(*score).or_insert(0)) += 1;
    }

    println!("|Score|Num grids|");
    println!("|-----|---------|");
    for (score, num_grids) in num_grids_per_score.iter() {
        println!("|{}|{}|", score, num_grids);
    }

    if !scores.is_empty() {
        let average: f64 = scores.iter().sum::<usize>() as f64 / scores.len() as f64;
        let std_dev: f64 = (scores
            .iter()
            .map(|score| (*score as f64 - average).powi(2))
            .sum::<f64>()
            / scores.len() as f64)
            .sqrt();

        println!(
            "\n**Average intersection score:** {:.2} +/- {:.2}",
            average, std_dev
        );
    }
    if num_failures > 0 {
        println!("{} runs failed.", num_failures);
    }
}
