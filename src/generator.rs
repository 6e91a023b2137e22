/*
generator.rs

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

//! Generate random puzzles and compute their answer.
//!
//! A puzzle is a [`grid::Grid`] of 36 bulbs. Each bulb has a color, and is lit or unlit,
//! transparent or opaque.
//!
//! The answer is computed by walking a hexagon of 37 rules:
//!
//! * The most frequent color of the grid, given by [`grid::Grid::plurality_color`], selects the
//!   starting cell of the hexagon ([`hex::Hex::starting`]).
//!
//! * Each cell of the hexagon holds a counting rule from [`rules::RULES`].
//!   The [`traversal::Traversal`] object evaluates the rule of the current cell and moves in
//!   the direction given by the value, until no unvisited cell can be reached.
//!   The value of the last rule gives the answer.
//!
//! * If the walk takes too many steps, then the grid is discarded and a new one is generated.
//!   The [`puzzle::Puzzle::generate`] method drives that loop.

pub mod grid;
pub mod hex;
pub mod path;
pub mod puzzle;
pub mod rules;
pub mod traversal;
