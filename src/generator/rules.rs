/*
rules.rs

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

//! Counting rules.
//!
//! Each cell of the rule hexagon holds a [`Rule`]. A rule counts something in the grid and
//! returns a number between 0 and 36. [`RULES`] is indexed by the hex index returned by
//! [`super::hex::Hex::index_of`].

use std::fmt;

use super::grid::{CELL_COUNT, Cell, Color, GRID_SIZE, Grid};
use super::hex::HEX_COUNT;

/// Binary bulb attributes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flag {
    Lit,
    Transparent,
}

impl Flag {
    /// Value of the attribute for the given cell.
    pub fn of(&self, cell: &Cell) -> bool {
        match self {
            Flag::Lit => cell.lit,
            Flag::Transparent => cell.transparent,
        }
    }

    /// Name of the attribute for the given value.
    fn name(&self, value: bool) -> &'static str {
        match (self, value) {
            (Flag::Lit, true) => "lit",
            (Flag::Lit, false) => "unlit",
            (Flag::Transparent, true) => "transparent",
            (Flag::Transparent, false) => "opaque",
        }
    }
}

/// Attributes that can be compared between cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Attribute {
    Color,
    Flag(Flag),
}

impl Attribute {
    /// Whether the two cells share the attribute value.
    fn same(&self, a: &Cell, b: &Cell) -> bool {
        match self {
            Attribute::Color => a.color == b.color,
            Attribute::Flag(f) => f.of(a) == f.of(b),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Attribute::Color => write!(f, "color"),
            Attribute::Flag(Flag::Lit) => write!(f, "light state"),
            Attribute::Flag(Flag::Transparent) => write!(f, "transparency"),
        }
    }
}

/// Predicates used for the quadrant majority rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuadrantTest {
    Flag(Flag),

    /// The color is red, white, or blue.
    RedWhiteBlue,
}

impl QuadrantTest {
    fn matches(&self, cell: &Cell) -> bool {
        match self {
            QuadrantTest::Flag(f) => f.of(cell),
            QuadrantTest::RedWhiteBlue => {
                matches!(cell.color, Color::Red | Color::White | Color::Blue)
            }
        }
    }
}

/// Cells of the four 3x3 quadrants.
const QUADRANTS: [[usize; 9]; 4] = [
    [0, 1, 2, 6, 7, 8, 12, 13, 14],
    [3, 4, 5, 9, 10, 11, 15, 16, 17],
    [18, 19, 20, 24, 25, 26, 30, 31, 32],
    [21, 22, 23, 27, 28, 29, 33, 34, 35],
];

/// Minimum number of matching cells for a quadrant to be counted.
const QUADRANT_MAJORITY: usize = 5;

/// A counting rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Number of cells of the color with the given attribute value.
    Count(Color, Flag, bool),

    /// Number of 2x2 blocks where the four cells share the same attribute value.
    UniformBlock(Attribute),

    /// Number of inner cells whose four orthogonal neighbors all have the given attribute value.
    /// The cells on the outer ring of the grid are not considered.
    Surrounded(Flag, bool),

    /// Number of rows plus number of columns with exactly three cells having the attribute.
    Balanced(Flag),

    /// Number of quadrants where at least five of the nine cells pass the test.
    QuadrantMajority(QuadrantTest),

    /// Number of cells with at least one orthogonal neighbor of the same color.
    SameColorNeighbor,
}

/// The rule table, indexed by hex index.
pub static RULES: [Rule; HEX_COUNT] = {
    use Color::*;
    use Flag::*;
    use Rule::*;
    [
        // r = -3
        Count(Red, Lit, true),
        Count(Yellow, Transparent, true),
        Count(Green, Lit, false),
        Count(Blue, Transparent, false),
        // r = -2
        Count(Purple, Lit, true),
        Count(White, Transparent, true),
        UniformBlock(Attribute::Color),
        Count(Red, Transparent, false),
        Count(Yellow, Lit, false),
        // r = -1
        Count(Green, Transparent, true),
        Surrounded(Transparent, true),
        Count(Blue, Lit, true),
        Balanced(Transparent),
        Count(Purple, Transparent, false),
        Count(White, Lit, false),
        // r = 0
        Count(Red, Transparent, true),
        Count(Yellow, Lit, true),
        QuadrantMajority(QuadrantTest::Flag(Lit)),
        SameColorNeighbor,
        QuadrantMajority(QuadrantTest::Flag(Transparent)),
        Count(Green, Transparent, false),
        Count(Blue, Lit, false),
        // r = 1
        Count(Purple, Transparent, true),
        Surrounded(Lit, true),
        Count(White, Lit, true),
        Balanced(Lit),
        Count(Red, Lit, false),
        Count(Yellow, Transparent, false),
        // r = 2
        Count(Green, Lit, true),
        UniformBlock(Attribute::Flag(Lit)),
        Count(Blue, Transparent, true),
        Surrounded(Transparent, false),
        Count(Purple, Lit, false),
        // r = 3
        Count(White, Transparent, false),
        QuadrantMajority(QuadrantTest::RedWhiteBlue),
        UniformBlock(Attribute::Flag(Transparent)),
        Surrounded(Lit, false),
    ]
};

/// Return the rule at the given hex index.
///
/// # Panics
///
/// Panics if the index is not lower than [`HEX_COUNT`]. That would be a bug in the coordinate
/// mapping.
pub fn rule_at(index: usize) -> &'static Rule {
    match RULES.get(index) {
        Some(rule) => rule,
        None => panic!("Bug: rule index {index} out of range"),
    }
}

impl Rule {
    /// Evaluate the rule against the grid.
    pub fn evaluate(&self, grid: &Grid) -> usize {
        match self {
            Rule::Count(color, flag, value) => grid
                .cells()
                .iter()
                .filter(|c| c.color == *color && flag.of(c) == *value)
                .count(),
            Rule::UniformBlock(attribute) => uniform_blocks(grid, *attribute),
            Rule::Surrounded(flag, value) => surrounded(grid, *flag, *value),
            Rule::Balanced(flag) => balanced_lines(grid, *flag),
            Rule::QuadrantMajority(test) => QUADRANTS
                .iter()
                .filter(|quadrant| {
                    quadrant
                        .iter()
                        .filter(|i| test.matches(grid.cell(**i)))
                        .count()
                        >= QUADRANT_MAJORITY
                })
                .count(),
            Rule::SameColorNeighbor => same_color_neighbors(grid),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rule::Count(color, flag, value) => {
                write!(f, "{} {color} bulbs", flag.name(*value))
            }
            Rule::UniformBlock(attribute) => {
                write!(f, "2x2 blocks of the same {attribute}")
            }
            Rule::Surrounded(flag, value) => {
                write!(f, "bulbs surrounded by {} bulbs", flag.name(*value))
            }
            Rule::Balanced(flag) => {
                write!(f, "rows and columns with three {} bulbs", flag.name(true))
            }
            Rule::QuadrantMajority(QuadrantTest::Flag(flag)) => {
                write!(f, "quadrants with mostly {} bulbs", flag.name(true))
            }
            Rule::QuadrantMajority(QuadrantTest::RedWhiteBlue) => {
                write!(f, "quadrants with mostly red, white, or blue bulbs")
            }
            Rule::SameColorNeighbor => write!(f, "bulbs next to a bulb of the same color"),
        }
    }
}

fn uniform_blocks(grid: &Grid, attribute: Attribute) -> usize {
    let mut count: usize = 0;

    for row in 0..GRID_SIZE - 1 {
        for col in 0..GRID_SIZE - 1 {
            let top_left: &Cell = grid.at(row, col);
            if attribute.same(top_left, grid.at(row, col + 1))
                && attribute.same(top_left, grid.at(row + 1, col))
                && attribute.same(top_left, grid.at(row + 1, col + 1))
            {
                count += 1;
            }
        }
    }
    count
}

fn surrounded(grid: &Grid, flag: Flag, value: bool) -> usize {
    let mut count: usize = 0;

    for row in 1..GRID_SIZE - 1 {
        for col in 1..GRID_SIZE - 1 {
            if [
                grid.at(row - 1, col),
                grid.at(row + 1, col),
                grid.at(row, col - 1),
                grid.at(row, col + 1),
            ]
            .iter()
            .all(|c| flag.of(c) == value)
            {
                count += 1;
            }
        }
    }
    count
}

fn balanced_lines(grid: &Grid, flag: Flag) -> usize {
    let half: usize = GRID_SIZE / 2;
    let rows: usize = (0..GRID_SIZE)
        .filter(|row| {
            (0..GRID_SIZE)
                .filter(|col| flag.of(grid.at(*row, *col)))
                .count()
                == half
        })
        .count();
    let cols: usize = (0..GRID_SIZE)
        .filter(|col| {
            (0..GRID_SIZE)
                .filter(|row| flag.of(grid.at(*row, *col)))
                .count()
                == half
        })
        .count();
    rows + cols
}

fn same_color_neighbors(grid: &Grid) -> usize {
    (0..CELL_COUNT)
        .filter(|i| {
            let row: usize = i / GRID_SIZE;
            let col: usize = i % GRID_SIZE;
            let color: Color = grid.cell(*i).color;

            (row > 0 && grid.at(row - 1, col).color == color)
                || (row < GRID_SIZE - 1 && grid.at(row + 1, col).color == color)
                || (col > 0 && grid.at(row, col - 1).color == color)
                || (col < GRID_SIZE - 1 && grid.at(row, col + 1).color == color)
        })
        .count()
}
