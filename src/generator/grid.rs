/*
grid.rs

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

//! Grid of bulbs.
//!
//! The grid is a 6x6 matrix of [`Cell`] objects addressed by a row-major index between 0 and 35:
//! the row is `index / 6` and the column is `index % 6`.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

/// Number of rows and columns in the grid.
pub const GRID_SIZE: usize = 6;

/// Number of cells in the grid.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Bulb colors.
///
/// The order matters: it is the order in which the starting cells are laid out around the
/// hexagon, and the order in which tied colors are listed during the plurality tie-break.
#[derive(Serialize, Deserialize, Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
}

impl Color {
    /// Number of colors.
    pub const COUNT: usize = 6;

    /// All the colors, in order.
    pub const ALL: [Color; Color::COUNT] = [
        Color::Red,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::White,
    ];

    /// Letter used when rendering the grid as text.
    pub fn letter(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Purple => 'P',
            Color::White => 'W',
        }
    }
}

/// A bulb in the grid.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Bulb color.
    pub color: Color,

    /// Whether the bulb is lit.
    pub lit: bool,

    /// Whether the bulb glass is transparent (otherwise it is opaque).
    pub transparent: bool,
}

impl Cell {
    /// Create a [`Cell`] object.
    pub fn new(color: Color, lit: bool, transparent: bool) -> Self {
        Self {
            color,
            lit,
            transparent,
        }
    }
}

/// Error returned when building a grid from a list that does not have exactly
/// [`CELL_COUNT`] cells.
#[derive(Debug, PartialEq)]
pub struct GridSizeError(pub usize);

impl fmt::Display for GridSizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a grid needs {CELL_COUNT} cells, got {}", self.0)
    }
}

impl std::error::Error for GridSizeError {}

/// The 6x6 grid of bulbs.
///
/// A grid always holds exactly [`CELL_COUNT`] cells. The only way to build one from arbitrary
/// data is [`Grid::try_from`], which rejects lists of the wrong length, including during
/// deserialization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Grid {
    cells: Vec<Cell>,
}

impl TryFrom<Vec<Cell>> for Grid {
    type Error = GridSizeError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        if cells.len() != CELL_COUNT {
            return Err(GridSizeError(cells.len()));
        }
        Ok(Self { cells })
    }
}

impl From<Grid> for Vec<Cell> {
    fn from(grid: Grid) -> Self {
        grid.cells
    }
}

impl Grid {
    /// Create a grid where every cell is a copy of the given cell.
    pub fn filled(cell: Cell) -> Self {
        Self {
            cells: vec![cell; CELL_COUNT],
        }
    }

    /// Create a random grid.
    ///
    /// For each cell, in index order, the color, the lit state, and the transparency are drawn
    /// uniformly, in that order. There are no constraints between cells.
    pub fn generate_random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells: Vec<Cell> = Vec::with_capacity(CELL_COUNT);

        for _ in 0..CELL_COUNT {
            let color: Color = Color::ALL[rng.random_range(0..Color::COUNT)];
            let lit: bool = rng.random_range(0..2) == 0;
            let transparent: bool = rng.random_range(0..2) == 0;
            cells.push(Cell::new(color, lit, transparent));
        }
        Self { cells }
    }

    /// Return the cell at the given row-major index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not lower than [`CELL_COUNT`].
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Return the cell at the given row and column.
    pub fn at(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * GRID_SIZE + col]
    }

    /// Replace the cell at the given row-major index.
    pub fn set_cell(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Return all the cells in index order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells[..]
    }

    /// Number of cells for each color, indexed by the color discriminant.
    pub fn color_counts(&self) -> [usize; Color::COUNT] {
        let mut counts: [usize; Color::COUNT] = [0; Color::COUNT];

        for c in &self.cells {
            counts[c.color as usize] += 1;
        }
        counts
    }

    /// Return the most frequent color of the grid.
    ///
    /// If several colors share the highest count, then one of them is selected at random and
    /// the first cell, in index order, that does not have that color is repainted with it. After
    /// that single repaint, the selected color is strictly the most frequent one.
    ///
    /// The random generator is only used when there is a tie.
    pub fn plurality_color<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Color {
        let counts: [usize; Color::COUNT] = self.color_counts();
        let max: usize = counts.iter().copied().max().unwrap_or(0);
        let tied: Vec<Color> = Color::ALL
            .iter()
            .filter(|c| counts[**c as usize] == max)
            .copied()
            .collect();

        if tied.len() == 1 {
            return tied[0];
        }

        let winner: Color = tied[rng.random_range(0..tied.len())];
        if let Some(i) = self.cells.iter().position(|c| c.color != winner) {
            debug!(
                "Tie between {tied:?} ({max} cells each): {winner} wins, cell {i} repainted from {}",
                self.cells[i].color
            );
            self.cells[i].color = winner;
        }
        winner
    }
}

/// Render the grid, one line per row.
///
/// Each cell is rendered with three characters: the color letter, `t` for transparent or `o`
/// for opaque, and `*` for lit or `.` for unlit.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..GRID_SIZE {
            let line: Vec<String> = (0..GRID_SIZE)
                .map(|col| {
                    let c: &Cell = self.at(row, col);
                    format!(
                        "{}{}{}",
                        c.color.letter(),
                        if c.transparent { 't' } else { 'o' },
                        if c.lit { '*' } else { '.' }
                    )
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
