/*
traversal.rs

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

//! Walk the rule hexagon.
//!
//! The walk starts on a cell of the hexagon. At each step, the rule of the current cell is
//! evaluated, and `value mod 6` gives the direction of the next move.
//! The move bounces on the hexagon boundary (see [`Hex::step`]) and skips the cells already
//! visited by continuing in the same direction.
//! The walk ends when the move comes back to the current cell: every other cell of the line is
//! already visited.
//! The value of the rule evaluated last gives the answer.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::grid::Grid;
use super::hex::{Direction, HEX_COUNT, Hex};
use super::path::Path;
use super::rules;

/// Maximum number of rule evaluations before the walk gives up.
pub const MAX_STEPS: usize = 15;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum TraversalError {
    /// The walk did not end within the step budget. Contains the budget.
    StepBudgetExceeded(usize),
}

impl fmt::Display for TraversalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TraversalError::StepBudgetExceeded(max) => {
                write!(f, "no terminal cell reached within {max} steps")
            }
        }
    }
}

impl std::error::Error for TraversalError {}

/// A step of the walk.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Cell of the hexagon.
    pub hex: Hex,

    /// Index of the rule of the cell.
    pub rule: usize,

    /// Value returned by the rule.
    pub value: usize,

    /// Direction derived from the value. For the last step, this direction leads nowhere.
    pub direction: Direction,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} #{} {} = {} -> {}",
            self.hex,
            self.rule,
            rules::rule_at(self.rule),
            self.value,
            self.direction
        )
    }
}

/// Result of a completed walk.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Visited cells, in order.
    pub path: Path,

    /// Details of each step, including the last one.
    pub trace: Vec<TraceStep>,
}

impl Outcome {
    /// Value of the last rule evaluated.
    pub fn last_value(&self) -> usize {
        self.trace.last().map(|s| s.value).unwrap_or(0)
    }

    /// Index of the correct button (0 to 5), derived from the last rule value.
    pub fn answer(&self) -> usize {
        (self.last_value() + 5) % 6
    }
}

/// [`Traversal`] object.
pub struct Traversal<'a> {
    /// Grid the rules are evaluated against.
    grid: &'a Grid,

    /// Maximum number of rule evaluations.
    max_steps: usize,

    /// Number of rule evaluations done during the last walk.
    pub steps: usize,
}

impl<'a> Traversal<'a> {
    /// Create the object.
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            max_steps: MAX_STEPS,
            steps: 0,
        }
    }

    /// Change the step budget.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Walk the hexagon from the given cell.
    ///
    /// # Errors
    ///
    /// The method returns an error if the walk needs more than the step budget. The grid must
    /// then be discarded.
    pub fn run(&mut self, start: Hex) -> Result<Outcome, TraversalError> {
        let mut path: Path = Path::new();
        let mut trace: Vec<TraceStep> = Vec::with_capacity(self.max_steps);
        let mut current: Hex = start;

        self.steps = 0;
        path.push(start);

        loop {
            self.steps += 1;
            if self.steps > self.max_steps {
                debug!("    Giving up after {} steps", self.max_steps);
                return Err(TraversalError::StepBudgetExceeded(self.max_steps));
            }

            let index: usize = match current.index_of() {
                Some(i) => i,
                None => panic!("Bug: the walk left the hexagon at {current}"),
            };
            let value: usize = rules::rule_at(index).evaluate(self.grid);
            let direction: Direction = Direction::from_value(value);
            let step: TraceStep = TraceStep {
                hex: current,
                rule: index,
                value,
                direction,
            };
            debug!("    {step}");
            trace.push(step);

            match next_cell(current, direction, &path) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => {
                    debug!("    Terminal cell {current} after {} steps", self.steps);
                    return Ok(Outcome { path, trace });
                }
            }
        }
    }
}

/// Return the next unvisited cell when moving from `current` in the given direction, or
/// [`None`] if the move comes back to `current`.
fn next_cell(current: Hex, direction: Direction, path: &Path) -> Option<Hex> {
    let mut position: Hex = current;

    // A line of the hexagon never holds more than HEX_COUNT cells
    for _ in 0..HEX_COUNT {
        position = position.step(direction);
        if position == current {
            return None;
        }
        if !path.contains(position) {
            return Some(position);
        }
        debug!("    Skipping visited cell {position}");
    }
    panic!("Bug: moving {direction} from {current} never comes back");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::grid::{Cell, Color};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn summary(outcome: &Outcome) -> Vec<(Hex, usize, Direction)> {
        outcome
            .trace
            .iter()
            .map(|s| (s.hex, s.value, s.direction))
            .collect()
    }

    #[test]
    fn golden_trace_green() {
        let grid = Grid::filled(Cell::new(Color::Green, false, false));
        let mut traversal = Traversal::new(&grid);
        let outcome = traversal
            .run(Hex::starting(Color::Green))
            .expect("terminates");

        use Direction::NorthWest as NW;
        assert_eq!(
            summary(&outcome),
            vec![
                (Hex::new(2, 0), 36, NW),
                (Hex::new(1, 0), 0, NW),
                (Hex::new(0, 0), 36, NW),
                (Hex::new(-1, 0), 0, NW),
                (Hex::new(-2, 0), 0, NW),
                (Hex::new(-3, 0), 0, NW),
                (Hex::new(3, 0), 0, NW),
            ]
        );
        assert_eq!(traversal.steps, 7);
        assert_eq!(outcome.path.len(), 7);
        assert_eq!(outcome.last_value(), 0);
        assert_eq!(outcome.answer(), 5);
    }

    #[test]
    fn golden_trace_red() {
        let grid = Grid::filled(Cell::new(Color::Red, true, true));
        let mut traversal = Traversal::new(&grid);
        let outcome = traversal.run(Hex::starting(Color::Red)).expect("terminates");

        let hexes: Vec<Hex> = outcome.trace.iter().map(|s| s.hex).collect();
        assert_eq!(
            hexes,
            vec![
                Hex::new(0, -2),
                Hex::new(-1, -2),
                Hex::new(3, -2),
                Hex::new(2, -2),
                Hex::new(1, -2),
                Hex::new(1, -3),
                Hex::new(0, -3),
                Hex::new(3, -3),
                Hex::new(2, -3),
            ]
        );
        // 25 uniform 2x2 blocks of color, then 36 lit red bulbs
        assert_eq!(outcome.trace[4].value, 25);
        assert_eq!(outcome.trace[4].direction, Direction::North);
        assert_eq!(outcome.trace[6].value, 36);
        assert_eq!(outcome.answer(), 5);
        assert_eq!(
            outcome.trace[4].to_string(),
            "(1, -2) #6 2x2 blocks of the same color = 25 -> north"
        );
    }

    #[test]
    fn golden_trace_skips_visited() {
        // Yellow plurality with green bulbs in the four corners
        let mut grid = Grid::filled(Cell::new(Color::Yellow, false, false));
        for index in [0, 5, 30, 35] {
            grid.set_cell(index, Cell::new(Color::Green, false, false));
        }
        let mut traversal = Traversal::new(&grid);
        let outcome = traversal
            .run(Hex::starting(Color::Yellow))
            .expect("terminates");

        use Direction::{NorthEast as NE, NorthWest as NW, South as S, SouthEast as SE};
        assert_eq!(
            summary(&outcome),
            vec![
                (Hex::new(2, -2), 0, NW),
                // Moving southeast skips the visited (2, -2)
                (Hex::new(1, -2), 21, SE),
                (Hex::new(3, -2), 32, NE),
                (Hex::new(-2, 3), 0, NW),
                (Hex::new(-3, 3), 0, NW),
                (Hex::new(0, 3), 16, S),
                (Hex::new(0, -3), 0, NW),
                (Hex::new(3, -3), 0, NW),
                // Moving south skips the visited (2, -2) again
                (Hex::new(2, -3), 4, S),
                (Hex::new(2, -1), 0, NW),
                (Hex::new(1, -1), 0, NW),
                (Hex::new(0, -1), 0, NW),
                (Hex::new(-1, -1), 0, NW),
                (Hex::new(-2, -1), 0, NW),
                (Hex::new(3, -1), 0, NW),
            ]
        );
        assert_eq!(traversal.steps, 15);
        assert_eq!(outcome.answer(), 5);

        // The same walk does not fit in one step less
        let result = Traversal::new(&grid)
            .with_max_steps(14)
            .run(Hex::starting(Color::Yellow));
        assert_eq!(result.err(), Some(TraversalError::StepBudgetExceeded(14)));
    }

    #[test]
    fn revisiting_start_terminates() {
        // The last move from (3, 0) goes back through the starting cell (2, 0) and every other
        // cell of the row before returning to (3, 0).
        let grid = Grid::filled(Cell::new(Color::Green, false, false));
        let outcome = Traversal::new(&grid)
            .run(Hex::new(2, 0))
            .expect("terminates");
        assert_eq!(outcome.path.get_last(), Some(Hex::new(3, 0)));
        assert_eq!(outcome.path.get()[0], Hex::new(2, 0));
    }

    #[test]
    fn step_budget() {
        let grid = Grid::filled(Cell::new(Color::Green, false, false));
        let mut traversal = Traversal::new(&grid).with_max_steps(3);
        assert_eq!(
            traversal.run(Hex::new(2, 0)).err(),
            Some(TraversalError::StepBudgetExceeded(3))
        );

        // Exactly enough steps
        let mut traversal = Traversal::new(&grid).with_max_steps(7);
        assert!(traversal.run(Hex::new(2, 0)).is_ok());
    }

    #[test]
    fn random_walks_stay_in_budget() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let mut grid = Grid::generate_random(&mut rng);
            let color = grid.plurality_color(&mut rng);
            let mut traversal = Traversal::new(&grid);
            match traversal.run(Hex::starting(color)) {
                Ok(outcome) => {
                    assert!(traversal.steps <= MAX_STEPS);
                    assert_eq!(outcome.trace.len(), traversal.steps);
                    assert!(outcome.answer() < 6);
                    for s in &outcome.trace {
                        assert!(s.hex.in_bounds());
                    }
                }
                Err(e) => assert_eq!(e, TraversalError::StepBudgetExceeded(MAX_STEPS)),
            }
        }
    }

    #[test]
    fn no_revisits() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..100 {
            let grid = Grid::generate_random(&mut rng);
            if let Ok(outcome) = Traversal::new(&grid).run(Hex::ORIGIN) {
                let mut hexes: Vec<Hex> = outcome.path.get().to_vec();
                let n = hexes.len();
                hexes.sort_by_key(|h| (h.r, h.q));
                hexes.dedup();
                assert_eq!(hexes.len(), n);
            }
        }
    }
}
