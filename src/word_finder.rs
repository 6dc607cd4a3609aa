// Fadeno – A solver for Strands-style word puzzles
// Copyright (C) 2026  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::cell_set::CellSet;
use super::dictionary::Dictionary;
use super::grid::{Cell, Grid};

pub const DEFAULT_MIN_LENGTH: usize = 4;
pub const DEFAULT_MAX_LENGTH: usize = 15;

// Neighbour offsets in the order the search tries them. The order is
// part of the contract: it decides which path is recorded when a word
// can be traced more than one way.
static DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

// A dictionary word together with a path that spells it. The path
// visits each of its cells once and only steps between 8-neighbours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub path: Vec<Cell>,
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.word)?;

        for cell in self.path.iter() {
            write!(f, " {}", cell)?;
        }

        Ok(())
    }
}

struct Finder<'a> {
    grid: &'a Grid,
    dictionary: &'a Dictionary,
    occupied: &'a CellSet,
    blacklist: &'a HashSet<String>,
    min_length: usize,
    max_length: usize,
    word: String,
    path: Vec<Cell>,
    visited: CellSet,
    found: Vec<Candidate>,
    // Index into found for each word seen so far
    found_words: HashMap<String, usize>,
}

impl<'a> Finder<'a> {
    fn record(&mut self) {
        match self.found_words.get(&self.word) {
            Some(&index) => {
                // Keep one path per word, preferring the longest
                if self.path.len() > self.found[index].path.len() {
                    self.found[index].path = self.path.clone();
                }
            },
            None => {
                self.found_words.insert(
                    self.word.clone(),
                    self.found.len(),
                );
                self.found.push(Candidate {
                    word: self.word.clone(),
                    path: self.path.clone(),
                });
            },
        }
    }

    fn search(&mut self, cell: Cell) {
        if self.word.len() >= self.min_length
            && !self.blacklist.contains(&self.word)
            && self.dictionary.contains(&self.word)
        {
            self.record();
        }

        if self.word.len() >= self.max_length {
            return;
        }

        // Give up on branches that no dictionary word starts with
        if !self.dictionary.has_prefix(&self.word) {
            return;
        }

        for &(row_offset, col_offset) in DIRECTIONS.iter() {
            let next = Cell {
                row: cell.row.wrapping_add_signed(row_offset),
                col: cell.col.wrapping_add_signed(col_offset),
            };

            // Wrapped coordinates fail the bounds check
            if !self.grid.contains(next) {
                continue;
            }

            let index = self.grid.cell_index(next);

            if self.occupied.contains(index) || self.visited.contains(index) {
                continue;
            }

            self.word.push(self.grid.letter(next));
            self.path.push(next);
            self.visited.insert(index);

            self.search(next);

            self.visited.remove(index);
            self.path.pop();
            self.word.pop();
        }
    }
}

// Finds every dictionary word that can be traced from the start cell
// along a path of 8-neighbouring cells that doesn’t revisit a cell,
// avoids the occupied set and stays within the length bounds. Each
// word appears once. The result is sorted longest first; words of the
// same length stay in the order they were first found.
//
// A start cell that is out of bounds or occupied yields no words.
pub fn find_words(
    grid: &Grid,
    dictionary: &Dictionary,
    start: Cell,
    occupied: &CellSet,
    blacklist: &HashSet<String>,
    min_length: usize,
    max_length: usize,
) -> Vec<Candidate> {
    if !grid.contains(start) {
        return Vec::new();
    }

    let start_index = grid.cell_index(start);

    if occupied.contains(start_index) {
        return Vec::new();
    }

    let mut finder = Finder {
        grid,
        dictionary,
        occupied,
        blacklist,
        min_length,
        max_length,
        word: String::from(grid.letter(start)),
        path: vec![start],
        visited: CellSet::new(grid.n_cells()),
        found: Vec::new(),
        found_words: HashMap::new(),
    };

    finder.visited.insert(start_index);
    finder.search(start);

    let mut found = finder.found;

    // The sort is stable so equal lengths keep their discovery order
    found.sort_by(|a, b| b.word.len().cmp(&a.word.len()));

    found
}

// Runs find_words from every cell of the grid in row-major order and
// concatenates the results. The same word can appear once per start
// cell; the solver copes with the duplicates.
pub fn collect_candidates(
    grid: &Grid,
    dictionary: &Dictionary,
    occupied: &CellSet,
    blacklist: &HashSet<String>,
    min_length: usize,
    max_length: usize,
) -> Vec<Candidate> {
    let mut pool = Vec::new();

    for cell in grid.cells() {
        pool.append(&mut find_words(
            grid,
            dictionary,
            cell,
            occupied,
            blacklist,
            min_length,
            max_length,
        ));
    }

    pool
}
