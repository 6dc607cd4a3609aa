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

use std::fmt;
use std::str::FromStr;

pub const MAX_DIMENSION: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

// The letters are stored as a flat row-major array so that a cell can
// double as an index into occupancy sets.
#[derive(Clone, Debug)]
pub struct Grid {
    letters: Vec<char>,
    n_rows: usize,
    n_cols: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GridParseError {
    Empty,
    TooManyRows,
    LineTooLong(usize),
    UnevenLine(usize),
    UnexpectedCharacter(usize, char),
}

impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Grid, GridParseError> {
        let mut letters = Vec::new();
        let mut n_rows = 0;
        let mut n_cols = 0;

        for (line_num, line) in s.lines().enumerate() {
            if n_rows >= MAX_DIMENSION {
                return Err(GridParseError::TooManyRows);
            }

            let mut line_letters = 0;

            for ch in line.chars() {
                // Letters may be separated by spaces for legibility
                if ch == ' ' {
                    continue;
                }

                let ch = ch.to_ascii_uppercase();

                if !ch.is_ascii_uppercase() {
                    return Err(
                        GridParseError::UnexpectedCharacter(line_num, ch)
                    );
                }

                letters.push(ch);
                line_letters += 1;
            }

            if line_letters > MAX_DIMENSION {
                return Err(GridParseError::LineTooLong(line_num));
            }

            if n_rows == 0 {
                n_cols = line_letters;
            } else if line_letters != n_cols {
                return Err(GridParseError::UnevenLine(line_num));
            }

            n_rows += 1;
        }

        if n_rows == 0 || n_cols == 0 {
            Err(GridParseError::Empty)
        } else {
            Ok(Grid { letters, n_rows, n_cols })
        }
    }
}

impl Grid {
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn n_cells(&self) -> usize {
        self.n_rows * self.n_cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.n_rows && cell.col < self.n_cols
    }

    pub fn letter(&self, cell: Cell) -> char {
        self.letters[self.cell_index(cell)]
    }

    pub fn cell_index(&self, cell: Cell) -> usize {
        cell.row * self.n_cols + cell.col
    }

    // All the cells of the grid in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.n_cells()).map(|index| {
            Cell {
                row: index / self.n_cols,
                col: index % self.n_cols,
            }
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.n_rows {
            if row > 0 {
                writeln!(f)?;
            }

            for col in 0..self.n_cols {
                self.letters[row * self.n_cols + col].fmt(f)?;
            }
        }

        Ok(())
    }
}

fn format_character(ch: char, f: &mut fmt::Formatter) -> fmt::Result {
    if ch.is_control() {
        write!(f, "U+{:04x}", ch as u32)
    } else {
        write!(f, "{}", ch)
    }
}

impl fmt::Display for GridParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridParseError::Empty => write!(f, "grid is empty"),
            GridParseError::TooManyRows => {
                write!(f, "grid has more than {} rows", MAX_DIMENSION)
            },
            GridParseError::LineTooLong(line_num) => {
                write!(
                    f,
                    "line {}: more than {} letters",
                    line_num + 1,
                    MAX_DIMENSION,
                )
            },
            GridParseError::UnevenLine(line_num) => {
                write!(
                    f,
                    "line {}: length doesn’t match the first row",
                    line_num + 1,
                )
            },
            GridParseError::UnexpectedCharacter(line_num, ch) => {
                write!(f, "line {}: unexpected character: ", line_num + 1)?;
                format_character(*ch, f)
            },
        }
    }
}
