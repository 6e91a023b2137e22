/*
path.rs

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

//! Path of the traversal in the rule hexagon.

use serde::{Deserialize, Serialize};

use super::hex::{HEX_COUNT, Hex};

/// Path object.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Path {
    /// Path as an ordered list of hex cells.
    path: Vec<Hex>,

    /// Visited status of each hex cell, indexed by [`Hex::index_of`].
    /// Instead of looking for the cell in the [`Path::path`] vector, this array speeds up the
    /// lookup.
    visited: Vec<bool>,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create an empty [`Path`] object.
    pub fn new() -> Self {
        Self {
            path: Vec::with_capacity(HEX_COUNT),
            visited: vec![false; HEX_COUNT],
        }
    }

    /// Add a cell to the path.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the hexagon.
    pub fn push(&mut self, hex: Hex) {
        self.visited[index(hex)] = true;
        self.path.push(hex);
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, hex: Hex) -> bool {
        self.visited[index(hex)]
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &[Hex] {
        &self.path[..]
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<Hex> {
        self.path.last().copied()
    }
}

fn index(hex: Hex) -> usize {
    match hex.index_of() {
        Some(i) => i,
        None => panic!("Bug: {hex} is outside the hexagon"),
    }
}
