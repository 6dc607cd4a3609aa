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

mod cell_set;
mod dictionary;
mod grid;
mod word_finder;

use std::collections::HashSet;
use std::ffi::OsStr;
use std::io;
use std::process::ExitCode;

use cell_set::CellSet;
use dictionary::Dictionary;
use grid::{Cell, Grid};

fn load_dictionary(filename: &OsStr) -> Result<Dictionary, io::Error> {
    std::fs::read_to_string(filename)
        .map(|data| Dictionary::build(data.lines()))
}

fn parse_coordinate(arg: &OsStr) -> Option<usize> {
    arg.to_str().and_then(|s| s.parse::<usize>().ok())
}

fn main() -> ExitCode {
    let mut args = std::env::args_os();

    if args.len() != 5 {
        eprintln!("usage: fadeno-words <dictionary> <grid> <row> <col>");
        return ExitCode::FAILURE;
    }

    let dictionary_filename = args.nth(1).unwrap();
    let grid_filename = args.next().unwrap();
    let row_arg = args.next().unwrap();
    let col_arg = args.next().unwrap();

    let dictionary = match load_dictionary(&dictionary_filename) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("{}: {}", dictionary_filename.to_string_lossy(), e);
            return ExitCode::FAILURE;
        },
    };

    if dictionary.is_empty() {
        eprintln!("warning: the dictionary contains no usable words");
    }

    let grid_source = match std::fs::read_to_string(&grid_filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: {}", grid_filename.to_string_lossy(), e);
            return ExitCode::FAILURE;
        },
    };

    let grid = match grid_source.parse::<Grid>() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{}: {}", grid_filename.to_string_lossy(), e);
            return ExitCode::FAILURE;
        },
    };

    let Some(row) = parse_coordinate(&row_arg)
    else {
        eprintln!("Invalid row: {}", row_arg.to_string_lossy());
        return ExitCode::FAILURE;
    };

    let Some(col) = parse_coordinate(&col_arg)
    else {
        eprintln!("Invalid column: {}", col_arg.to_string_lossy());
        return ExitCode::FAILURE;
    };

    let start = Cell { row, col };

    if !grid.contains(start) {
        eprintln!(
            "Cell {} is outside the {}x{} grid",
            start,
            grid.n_rows(),
            grid.n_cols(),
        );
        return ExitCode::FAILURE;
    }

    let words = word_finder::find_words(
        &grid,
        &dictionary,
        start,
        &CellSet::new(grid.n_cells()),
        &HashSet::new(),
        word_finder::DEFAULT_MIN_LENGTH,
        word_finder::DEFAULT_MAX_LENGTH,
    );

    for candidate in words.iter() {
        println!("{}", candidate);
    }

    ExitCode::SUCCESS
}
