/*
puzzle.rs

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

//! Generate a puzzle and its answer.

use log::{Level, debug, log_enabled};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::grid::{Color, Grid};
use super::hex::Hex;
use super::traversal::{self, Outcome, TraceStep, Traversal, TraversalError};

/// Number of answer buttons.
pub const BUTTON_COUNT: usize = 6;

/// Identifier of the next puzzle, used to tag log messages.
static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Generator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Maximum number of rule evaluations for a walk before the grid is discarded.
    pub max_steps: usize,

    /// Maximum number of grids to try. [`None`] means no limit.
    pub max_attempts: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_steps: traversal::MAX_STEPS,
            max_attempts: None,
        }
    }
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GenerateError {
    /// No grid led to a terminal cell within the allowed number of attempts.
    AttemptsExhausted(usize),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerateError::AttemptsExhausted(n) => {
                write!(f, "no valid grid found after {n} attempts")
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// Errors raised when a saved puzzle is not consistent.
#[derive(Debug, PartialEq)]
pub enum PuzzleError {
    /// The answer is not a button index.
    AnswerOutOfRange(usize),

    /// The color is not strictly the most frequent color of the grid.
    NotPlurality(Color),

    /// The trace is not the walk the grid produces.
    TraceMismatch,

    /// The answer does not match the value of the last rule.
    AnswerMismatch { expected: usize, found: usize },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PuzzleError::AnswerOutOfRange(a) => {
                write!(f, "answer {a} is not between 0 and {}", BUTTON_COUNT - 1)
            }
            PuzzleError::NotPlurality(c) => write!(f, "{c} is not the most frequent color"),
            PuzzleError::TraceMismatch => write!(f, "the trace does not match the grid"),
            PuzzleError::AnswerMismatch { expected, found } => {
                write!(f, "answer {found} does not match the walk (expected {expected})")
            }
        }
    }
}

impl std::error::Error for PuzzleError {}

/// A finished puzzle.
///
/// A deserialized puzzle is checked by replaying the walk on its grid (see [`PuzzleError`]).
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(try_from = "SavedPuzzle")]
pub struct Puzzle {
    /// Puzzle identifier, unique for the process.
    pub id: usize,

    /// Final grid, after the plurality tie-break.
    pub grid: Grid,

    /// Most frequent color of the grid.
    pub plurality: Color,

    /// Index of the correct button (0 to 5).
    answer: usize,

    /// Steps of the walk that produced the answer.
    pub trace: Vec<TraceStep>,

    /// Number of grids generated before finding this one (1 when the first grid was valid).
    pub attempts: usize,
}

impl Puzzle {
    /// Generate a puzzle with the default parameters.
    ///
    /// Grids are generated until one leads to a terminal cell, so the method always returns a
    /// puzzle.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let config: GeneratorConfig = GeneratorConfig::default();

        // Without an attempt limit, the first call returns a puzzle
        loop {
            if let Ok(puzzle) = Self::generate_with(&config, rng) {
                return puzzle;
            }
        }
    }

    /// Generate a puzzle with the given parameters.
    ///
    /// # Errors
    ///
    /// The method returns an error if [`GeneratorConfig::max_attempts`] grids have been tried
    /// without success.
    pub fn generate_with<R: Rng + ?Sized>(
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<Self, GenerateError> {
        let id: usize = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let mut attempts: usize = 0;

        loop {
            if let Some(max) = config.max_attempts
                && attempts >= max
            {
                debug!("[Bulbmaps #{id}] Giving up after {attempts} attempts");
                return Err(GenerateError::AttemptsExhausted(attempts));
            }
            attempts += 1;
            if let Ok(puzzle) = Self::attempt(id, attempts, config.max_steps, rng) {
                return Ok(puzzle);
            }
        }
    }

    /// Generate a grid and walk the hexagon.
    fn attempt<R: Rng + ?Sized>(
        id: usize,
        attempts: usize,
        max_steps: usize,
        rng: &mut R,
    ) -> Result<Self, TraversalError> {
        let mut grid: Grid = Grid::generate_random(rng);
        let plurality: Color = grid.plurality_color(rng);
        let start: Hex = Hex::starting(plurality);

        if log_enabled!(Level::Debug) {
            debug!("[Bulbmaps #{id}] Attempt {attempts}, grid:");
            for line in grid.to_string().lines() {
                debug!("[Bulbmaps #{id}]     {line}");
            }
            debug!("[Bulbmaps #{id}] Plurality color {plurality}, starting at {start}");
        }

        let mut walker: Traversal = Traversal::new(&grid).with_max_steps(max_steps);
        match walker.run(start) {
            Ok(outcome) => Ok(Self::from_outcome(id, grid, plurality, outcome, attempts)),
            Err(e) => {
                debug!("[Bulbmaps #{id}] Attempt {attempts} discarded: {e}");
                Err(e)
            }
        }
    }

    fn from_outcome(
        id: usize,
        grid: Grid,
        plurality: Color,
        outcome: Outcome,
        attempts: usize,
    ) -> Self {
        let answer: usize = outcome.answer();
        debug!(
            "[Bulbmaps #{id}] Last value {}, answer {answer}",
            outcome.last_value()
        );
        Self {
            id,
            grid,
            plurality,
            answer,
            trace: outcome.trace,
            attempts,
        }
    }

    /// Index of the correct button.
    pub fn answer(&self) -> usize {
        self.answer
    }

    /// Whether the button the player pressed is the correct one.
    pub fn check_answer(&self, chosen: usize) -> bool {
        let ok: bool = chosen == self.answer;
        debug!(
            "[Bulbmaps #{}] Button {chosen} pressed: {}",
            self.id,
            if ok { "correct" } else { "strike" }
        );
        ok
    }

    /// Human-readable trace of the walk.
    pub fn trace_lines(&self) -> Vec<String> {
        self.trace.iter().map(|s| s.to_string()).collect()
    }
}

/// Puzzle as read from disk, before validation.
#[derive(Deserialize)]
struct SavedPuzzle {
    id: usize,
    grid: Grid,
    plurality: Color,
    answer: usize,
    trace: Vec<TraceStep>,
    attempts: usize,
}

impl TryFrom<SavedPuzzle> for Puzzle {
    type Error = PuzzleError;

    fn try_from(saved: SavedPuzzle) -> Result<Self, Self::Error> {
        if saved.answer >= BUTTON_COUNT {
            return Err(PuzzleError::AnswerOutOfRange(saved.answer));
        }

        let counts: [usize; Color::COUNT] = saved.grid.color_counts();
        let max: usize = counts[saved.plurality as usize];
        if Color::ALL
            .iter()
            .any(|c| *c != saved.plurality && counts[*c as usize] >= max)
        {
            return Err(PuzzleError::NotPlurality(saved.plurality));
        }

        // The saved trace must be the walk the grid produces, step for step
        let mut walker: Traversal = Traversal::new(&saved.grid).with_max_steps(saved.trace.len());
        let outcome: Outcome = walker
            .run(Hex::starting(saved.plurality))
            .map_err(|_| PuzzleError::TraceMismatch)?;
        if outcome.trace != saved.trace {
            return Err(PuzzleError::TraceMismatch);
        }
        if outcome.answer() != saved.answer {
            return Err(PuzzleError::AnswerMismatch {
                expected: outcome.answer(),
                found: saved.answer,
            });
        }

        Ok(Self {
            id: saved.id,
            grid: saved.grid,
            plurality: saved.plurality,
            answer: saved.answer,
            trace: saved.trace,
            attempts: saved.attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generate_always_answers() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let puzzle = Puzzle::generate(&mut rng);
            assert!(puzzle.answer() < BUTTON_COUNT);
            assert!(puzzle.attempts >= 1);
            assert!(!puzzle.trace.is_empty());
            assert!(puzzle.trace.len() <= traversal::MAX_STEPS);
            assert_eq!(puzzle.trace[0].hex, Hex::starting(puzzle.plurality));
            let last = puzzle.trace.last().expect("non-empty");
            assert_eq!(puzzle.answer(), (last.value + 5) % 6);
        }
    }

    #[test]
    fn plurality_is_strict() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let puzzle = Puzzle::generate(&mut rng);
            let counts = puzzle.grid.color_counts();
            for c in Color::ALL.iter().filter(|c| **c != puzzle.plurality) {
                assert!(counts[*c as usize] < counts[puzzle.plurality as usize]);
            }
        }
    }

    #[test]
    fn reproducible_with_seed() {
        let a = Puzzle::generate(&mut StdRng::seed_from_u64(2024));
        let b = Puzzle::generate(&mut StdRng::seed_from_u64(2024));
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.answer(), b.answer());
        assert_eq!(a.trace, b.trace);
        assert_eq!(a.attempts, b.attempts);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn check_answer_matches_only_answer() {
        let puzzle = Puzzle::generate(&mut StdRng::seed_from_u64(5));
        let correct: Vec<usize> = (0..BUTTON_COUNT)
            .filter(|b| puzzle.check_answer(*b))
            .collect();
        assert_eq!(correct, vec![puzzle.answer()]);
    }

    #[test]
    fn attempts_cap() {
        let config = GeneratorConfig {
            max_steps: 0,
            max_attempts: Some(4),
        };
        let res = Puzzle::generate_with(&config, &mut StdRng::seed_from_u64(6));
        assert_eq!(res.err(), Some(GenerateError::AttemptsExhausted(4)));
    }

    #[test]
    fn default_config_matches_generate() {
        let a = Puzzle::generate(&mut StdRng::seed_from_u64(8));
        let b = Puzzle::generate_with(&GeneratorConfig::default(), &mut StdRng::seed_from_u64(8))
            .expect("no attempt limit");
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.answer(), b.answer());
    }

    #[test]
    fn trace_lines_render_steps() {
        let puzzle = Puzzle::generate(&mut StdRng::seed_from_u64(9));
        let lines = puzzle.trace_lines();
        assert_eq!(lines.len(), puzzle.trace.len());
        assert!(lines[0].starts_with(&Hex::starting(puzzle.plurality).to_string()));
    }

    fn saved(puzzle: &Puzzle) -> SavedPuzzle {
        SavedPuzzle {
            id: puzzle.id,
            grid: puzzle.grid.clone(),
            plurality: puzzle.plurality,
            answer: puzzle.answer,
            trace: puzzle.trace.clone(),
            attempts: puzzle.attempts,
        }
    }

    #[test]
    fn consistent_puzzle_is_accepted() {
        let puzzle = Puzzle::generate(&mut StdRng::seed_from_u64(20));
        let restored = Puzzle::try_from(saved(&puzzle)).expect("consistent");
        assert_eq!(restored.answer(), puzzle.answer());
        assert_eq!(restored.trace, puzzle.trace);
    }

    #[test]
    fn answer_out_of_range_is_rejected() {
        let puzzle = Puzzle::generate(&mut StdRng::seed_from_u64(21));
        let mut s = saved(&puzzle);
        s.answer = 42;
        assert_eq!(
            Puzzle::try_from(s).err(),
            Some(PuzzleError::AnswerOutOfRange(42))
        );
    }

    #[test]
    fn wrong_answer_is_rejected() {
        let puzzle = Puzzle::generate(&mut StdRng::seed_from_u64(22));
        let mut s = saved(&puzzle);
        s.answer = (puzzle.answer() + 1) % BUTTON_COUNT;
        assert_eq!(
            Puzzle::try_from(s).err(),
            Some(PuzzleError::AnswerMismatch {
                expected: puzzle.answer(),
                found: (puzzle.answer() + 1) % BUTTON_COUNT,
            })
        );
    }

    #[test]
    fn wrong_plurality_is_rejected() {
        let puzzle = Puzzle::generate(&mut StdRng::seed_from_u64(23));
        let other = Color::ALL
            .iter()
            .copied()
            .find(|c| *c != puzzle.plurality)
            .expect("six colors");
        let mut s = saved(&puzzle);
        s.plurality = other;
        assert_eq!(
            Puzzle::try_from(s).err(),
            Some(PuzzleError::NotPlurality(other))
        );
    }

    #[test]
    fn tampered_trace_is_rejected() {
        let puzzle = Puzzle::generate(&mut StdRng::seed_from_u64(24));

        let mut s = saved(&puzzle);
        s.trace[0].rule = 99;
        assert_eq!(Puzzle::try_from(s).err(), Some(PuzzleError::TraceMismatch));

        let mut s = saved(&puzzle);
        s.trace[0].hex = Hex::ORIGIN;
        s.trace[0].rule = 18;
        assert_eq!(Puzzle::try_from(s).err(), Some(PuzzleError::TraceMismatch));

        let mut s = saved(&puzzle);
        s.trace.pop();
        assert_eq!(Puzzle::try_from(s).err(), Some(PuzzleError::TraceMismatch));

        let mut s = saved(&puzzle);
        s.trace.clear();
        assert_eq!(Puzzle::try_from(s).err(), Some(PuzzleError::TraceMismatch));
    }
}
