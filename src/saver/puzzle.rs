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

//! Save and restore a generated puzzle.
//!
//! The host renders the grid and validates the player's answer. It can keep the puzzle between
//! sessions by saving it in the `puzzle.json` file.
//!
//! The saved object is a serialization of the [`Puzzle`] object in JSON format by using
//! [`serde`].

use log::debug;
use std::error::Error;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::generator::puzzle::Puzzle;

/// Object to save and restore a puzzle.
pub struct SaverPuzzle {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverPuzzle {
    /// Create a [`SaverPuzzle`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the puzzle must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("puzzle.json");
        debug!("Puzzle file: {data_dir:?}");
        Self {
            save_file: data_dir,
        }
    }

    /// Retrieve the saved [`Puzzle`] object.
    ///
    /// Return the [`Puzzle`] object or None if there is no saved puzzle.
    pub fn get_puzzle(&self) -> Result<Option<Puzzle>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let puzzle: Puzzle = serde_json::from_reader(reader)?;
        Ok(Some(puzzle))
    }

    /// Save the provided [`Puzzle`] object.
    pub fn save_puzzle(&self, puzzle: &Puzzle) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, puzzle)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved puzzle.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}
