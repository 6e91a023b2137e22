/*
hex.rs

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

//! Axial coordinates in the rule hexagon.
//!
//! The rules are laid out on a hexagon of radius 3 (37 cells).
//! A cell is addressed by its axial coordinates `(q, r)`, the center being `(0, 0)`.
//! Rows are keyed on `r`, from `r = -3` (top row, 4 cells) to `r = 3` (bottom row, 4 cells):
//!
//! ```text
//!        0   1   2   3
//!      4   5   6   7   8
//!    9  10  11  12  13  14
//!  15  16  17  18  19  20  21
//!   22  23  24  25  26  27
//!     28  29  30  31  32
//!       33  34  35  36
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

use super::grid::Color;

/// Radius of the hexagon.
pub const HEX_RADIUS: i32 = 3;

/// Number of cells in the hexagon.
pub const HEX_COUNT: usize = 37;

/// The six directions, at 60° increments.
///
/// The discriminant is the value the traversal computes with `rule value mod 6`.
#[derive(Serialize, Deserialize, Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
}

impl Direction {
    /// All the directions, in order.
    pub const ALL: [Direction; 6] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
    ];

    /// Direction for the given rule value (`value mod 6`).
    pub fn from_value(value: usize) -> Self {
        Self::ALL[value % 6]
    }

    /// Axial offset `(dq, dr)` of the direction.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::NorthWest => (-1, 0),
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthEast => (1, 0),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    /// The direction at 180°.
    pub fn opposite(&self) -> Self {
        Self::ALL[(*self as usize + 3) % 6]
    }
}

/// Axial hex coordinates.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl Hex {
    /// The center of the hexagon.
    pub const ORIGIN: Hex = Hex { q: 0, r: 0 };

    /// Create a [`Hex`] object.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Hex distance from the center.
    pub fn distance(&self) -> i32 {
        self.q.abs().max(self.r.abs()).max((self.q + self.r).abs())
    }

    /// Whether the coordinates are inside the hexagon.
    pub fn in_bounds(&self) -> bool {
        self.distance() <= HEX_RADIUS
    }

    /// Adjacent coordinates in the given direction. The result might be outside the hexagon.
    pub fn neighbor(&self, direction: Direction) -> Self {
        let (dq, dr) = direction.offset();
        Self::new(self.q + dq, self.r + dr)
    }

    /// Rule index (0 to 36) of the coordinates, or [`None`] if they are outside the hexagon.
    pub fn index_of(&self) -> Option<usize> {
        if !self.in_bounds() {
            return None;
        }
        let (q_min, _) = row_range(self.r);
        Some(row_offset(self.r) + (self.q - q_min) as usize)
    }

    /// Coordinates for the given rule index, or [`None`] if the index is not lower than
    /// [`HEX_COUNT`].
    pub fn hex_of(index: usize) -> Option<Self> {
        if index >= HEX_COUNT {
            return None;
        }
        let mut r: i32 = HEX_RADIUS;
        while row_offset(r) > index {
            r -= 1;
        }
        let (q_min, _) = row_range(r);
        Some(Self::new(q_min + (index - row_offset(r)) as i32, r))
    }

    /// Starting coordinates for the given color.
    ///
    /// The six starting cells are at distance 2 from the center, one per 60° sector.
    pub fn starting(color: Color) -> Self {
        match color {
            Color::Red => Self::new(0, -2),
            Color::Yellow => Self::new(2, -2),
            Color::Green => Self::new(2, 0),
            Color::Blue => Self::new(0, 2),
            Color::Purple => Self::new(-2, 2),
            Color::White => Self::new(-2, 0),
        }
    }

    /// Move one cell in the given direction, bouncing at the hexagon boundary.
    ///
    /// If the adjacent cell is inside the hexagon, then it is the result.
    /// Otherwise, the move reflects along the same axis: it walks back from the current cell in
    /// the opposite direction and lands on the last cell before leaving the hexagon.
    /// Repeating the move therefore cycles through all the cells of the line.
    ///
    /// The current cell must be inside the hexagon.
    pub fn step(&self, direction: Direction) -> Self {
        let next: Hex = self.neighbor(direction);
        if next.in_bounds() {
            return next;
        }

        let back: Direction = direction.opposite();
        let mut last: Hex = *self;
        loop {
            let candidate: Hex = last.neighbor(back);
            if !candidate.in_bounds() {
                return last;
            }
            last = candidate;
        }
    }
}

/// Range `(q_min, q_max)` of the `q` coordinate in the given row.
fn row_range(r: i32) -> (i32, i32) {
    ((-HEX_RADIUS).max(-HEX_RADIUS - r), HEX_RADIUS.min(HEX_RADIUS - r))
}

/// Index of the first cell of the given row.
///
/// A row at `r` holds `2 * radius + 1 - |r|` cells, so the offset is the sum of the lengths of
/// the rows above it.
fn row_offset(r: i32) -> usize {
    (-HEX_RADIUS..r)
        .map(|row| (2 * HEX_RADIUS + 1 - row.abs()) as usize)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_hexes() -> Vec<Hex> {
        let mut v: Vec<Hex> = Vec::new();
        for r in -HEX_RADIUS..=HEX_RADIUS {
            for q in -HEX_RADIUS..=HEX_RADIUS {
                let h = Hex::new(q, r);
                if h.in_bounds() {
                    v.push(h);
                }
            }
        }
        v
    }

    #[test]
    fn hexagon_has_37_cells() {
        assert_eq!(all_hexes().len(), HEX_COUNT);
    }

    #[test]
    fn distance_metric() {
        assert_eq!(Hex::ORIGIN.distance(), 0);
        assert_eq!(Hex::new(3, -3).distance(), 3);
        assert_eq!(Hex::new(-1, -3).distance(), 4);
        assert_eq!(Hex::new(2, 2).distance(), 4);
        for h in all_hexes() {
            let half_sum = (h.q.abs() + h.r.abs() + (h.q + h.r).abs()) / 2;
            assert_eq!(h.distance(), half_sum);
        }
    }

    #[test]
    fn row_lengths() {
        let lengths: Vec<usize> = (-HEX_RADIUS..=HEX_RADIUS)
            .map(|r| all_hexes().iter().filter(|h| h.r == r).count())
            .collect();
        assert_eq!(lengths, vec![4, 5, 6, 7, 6, 5, 4]);
    }

    #[test]
    fn index_bijection() {
        for i in 0..HEX_COUNT {
            let h = Hex::hex_of(i).expect("in range");
            assert!(h.in_bounds());
            assert_eq!(h.index_of(), Some(i));
        }
        for h in all_hexes() {
            let i = h.index_of().expect("in bounds");
            assert_eq!(Hex::hex_of(i), Some(h));
        }
    }

    #[test]
    fn index_layout() {
        assert_eq!(Hex::new(0, -3).index_of(), Some(0));
        assert_eq!(Hex::new(3, -3).index_of(), Some(3));
        assert_eq!(Hex::new(-1, -2).index_of(), Some(4));
        assert_eq!(Hex::new(-3, 0).index_of(), Some(15));
        assert_eq!(Hex::ORIGIN.index_of(), Some(18));
        assert_eq!(Hex::new(3, 0).index_of(), Some(21));
        assert_eq!(Hex::new(-3, 3).index_of(), Some(33));
        assert_eq!(Hex::new(0, 3).index_of(), Some(36));
    }

    #[test]
    fn out_of_range() {
        assert_eq!(Hex::new(-1, -3).index_of(), None);
        assert_eq!(Hex::new(4, 0).index_of(), None);
        assert_eq!(Hex::hex_of(HEX_COUNT), None);
    }

    #[test]
    fn starting_cells() {
        assert_eq!(Hex::starting(Color::Green), Hex::new(2, 0));
        for c in Color::ALL {
            assert_eq!(Hex::starting(c).distance(), 2);
        }
        // One per sector: consecutive colors are one direction apart
        for (i, c) in Color::ALL.iter().enumerate() {
            let next = Color::ALL[(i + 1) % Color::COUNT];
            let a = Hex::starting(*c);
            let b = Hex::starting(next);
            assert_eq!(Hex::new(b.q - a.q, b.r - a.r).distance(), 2);
        }
    }

    #[test]
    fn opposite_offsets_cancel() {
        for d in Direction::ALL {
            let (dq, dr) = d.offset();
            let (oq, or) = d.opposite().offset();
            assert_eq!((dq + oq, dr + or), (0, 0));
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn neighbors_are_adjacent() {
        for h in all_hexes() {
            for d in Direction::ALL {
                let n = h.neighbor(d);
                assert_eq!(Hex::new(n.q - h.q, n.r - h.r).distance(), 1);
            }
        }
    }

    #[test]
    fn step_stays_in_bounds() {
        for h in all_hexes() {
            for d in Direction::ALL {
                let s = h.step(d);
                assert!(s.in_bounds(), "{h} {d} -> {s}");
                assert_ne!(s, h);
            }
        }
    }

    #[test]
    fn step_bounces_along_axis() {
        assert_eq!(Hex::new(-3, 0).step(Direction::NorthWest), Hex::new(3, 0));
        assert_eq!(Hex::new(0, -3).step(Direction::NorthWest), Hex::new(3, -3));
        assert_eq!(Hex::new(1, -3).step(Direction::North), Hex::new(1, 2));
        assert_eq!(Hex::new(1, 1).step(Direction::South), Hex::new(1, 2));
    }

    #[test]
    fn repeated_steps_cycle_through_line() {
        let start = Hex::new(-3, 0);
        let mut h = start;
        let mut seen = 0;
        loop {
            h = h.step(Direction::SouthEast);
            seen += 1;
            if h == start {
                break;
            }
            assert!(seen <= 7);
        }
        assert_eq!(seen, 7);
    }

    #[test]
    fn direction_from_value() {
        assert_eq!(Direction::from_value(0), Direction::NorthWest);
        assert_eq!(Direction::from_value(25), Direction::North);
        assert_eq!(Direction::from_value(36), Direction::NorthWest);
        assert_eq!(Direction::from_value(5).to_string(), "southwest");
    }
}
