/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Bulbmaps.

Bulbmaps is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Bulbmaps is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Bulbmaps. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! These options are intended for developers checking the puzzle generator.
//!
//! # Examples
//!
//! Generate a puzzle and print how its answer is computed:
//!
//! ```text
//! $ bulbmaps --seed 12 --trace
//! ```
//!
//! Generate a thousand puzzles and print the answer distribution:
//!
//! ```text
//! $ bulbmaps -c 1000 --summary
//! ```

use clap::Parser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::path::PathBuf;

use bulbmaps::generator::puzzle::{BUTTON_COUNT, Puzzle};
use bulbmaps::saver::puzzle::SaverPuzzle;

/// Generate random Bulbmaps puzzles for developers.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Seed for the random generator, for reproducible puzzles
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the steps of the walk that computes the answer
    #[arg(short, long, default_value_t = false)]
    trace: bool,

    /// Print the puzzles in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Check the given button index against the answer of the generated or loaded puzzle
    #[arg(short, long, conflicts_with = "count")]
    answer: Option<usize>,

    /// Directory where the last generated puzzle is saved
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory of a saved puzzle to load instead of generating one. When the puzzle is solved
    /// with --answer, the saved puzzle is deleted.
    #[arg(short, long, conflicts_with_all = ["count", "seed", "output", "summary"])]
    input: Option<PathBuf>,

    /// Print some statistics after generating the puzzles
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    if let Some(dir) = &args.input {
        return load(&args, dir.clone());
    }

    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    let mut answers: [usize; BUTTON_COUNT] = [0; BUTTON_COUNT];
    let mut attempts: usize = 0;
    let mut max_attempts: usize = 0;
    let mut steps: usize = 0;
    let mut last: Option<Puzzle> = None;

    for i in 0..args.count {
        debug!("Iteration {i}");

        let puzzle: Puzzle = Puzzle::generate(&mut rng);
        answers[puzzle.answer()] += 1;
        attempts += puzzle.attempts;
        max_attempts = max_attempts.max(puzzle.attempts);
        steps += puzzle.trace.len();

        if args.json || !args.summary || args.trace {
            if let Err(e) = print_puzzle(&puzzle, &args) {
                eprintln!("Cannot serialize puzzle #{}: {e}", puzzle.id);
                return 1;
            }
        }
        last = Some(puzzle);
    }

    if let (Some(dir), Some(puzzle)) = (&args.output, &last) {
        let saver: SaverPuzzle = SaverPuzzle::new(dir.clone());
        if let Err(e) = saver.save_puzzle(puzzle) {
            eprintln!("Cannot save the puzzle in {}: {e}", dir.display());
            return 1;
        }
    }

    if args.summary && args.count > 0 {
        println!(
            "
          puzzles = {}
 average attempts = {}
     max attempts = {}
    average steps = {}
          answers = {:?}",
            args.count,
            attempts as f32 / args.count as f32,
            max_attempts,
            steps as f32 / args.count as f32,
            answers
        );
    }

    match (args.answer, &last) {
        (Some(chosen), Some(puzzle)) => check(puzzle, chosen),
        _ => 0,
    }
}

/// Load a saved puzzle, print it, and check the answer if one is provided.
fn load(args: &Args, dir: PathBuf) -> u8 {
    let saver: SaverPuzzle = SaverPuzzle::new(dir);
    let puzzle: Puzzle = match saver.get_puzzle() {
        Ok(Some(p)) => p,
        Ok(None) => {
            eprintln!("No saved puzzle");
            return 1;
        }
        Err(e) => {
            eprintln!("Cannot load the saved puzzle: {e}");
            return 1;
        }
    };

    if let Err(e) = print_puzzle(&puzzle, args) {
        eprintln!("Cannot serialize puzzle #{}: {e}", puzzle.id);
        return 1;
    }

    match args.answer {
        Some(chosen) => {
            let ret: u8 = check(&puzzle, chosen);
            if ret == 0 {
                debug!("Puzzle solved, deleting the save");
                saver.delete_save();
            }
            ret
        }
        None => 0,
    }
}

/// Print a puzzle as text or in JSON format.
fn print_puzzle(puzzle: &Puzzle, args: &Args) -> Result<(), serde_json::Error> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(puzzle)?);
        return Ok(());
    }

    println!("Puzzle #{} ({} attempts)", puzzle.id, puzzle.attempts);
    print!("{}", puzzle.grid);
    println!("Plurality color: {}", puzzle.plurality);
    if args.trace {
        for line in puzzle.trace_lines() {
            println!("    {line}");
        }
    }
    println!("Answer: {}", puzzle.answer());
    println!();
    Ok(())
}

/// Check the pressed button and return the exit code.
fn check(puzzle: &Puzzle, chosen: usize) -> u8 {
    if puzzle.check_answer(chosen) {
        println!("Button {chosen}: correct");
        return 0;
    }
    println!("Button {chosen}: strike");
    1
}
