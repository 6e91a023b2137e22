/*
lib.rs

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

//! Bulbmaps puzzle engine.
//!
//! The engine generates a random grid of bulbs and computes the index of the correct button.
//! Rendering the grid and collecting the player's input are left to the host.
//!
//! ```
//! use bulbmaps::Puzzle;
//!
//! let puzzle = Puzzle::generate(&mut rand::rng());
//! println!("{}", puzzle.grid);
//! assert!(puzzle.check_answer(puzzle.answer()));
//! ```

pub mod generator;
pub mod saver;

pub use generator::grid::{Cell, Color, Grid};
pub use generator::puzzle::{GenerateError, GeneratorConfig, Puzzle};
