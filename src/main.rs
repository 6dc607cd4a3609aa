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
mod grid_solver;
mod word_finder;

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, info};

use cell_set::CellSet;
use dictionary::Dictionary;
use grid::Grid;
use grid_solver::SolveResult;

#[derive(Parser)]
#[command(name = "solve-fadeno")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    dictionary: OsString,
    /// Grid file, or standard input when omitted
    #[arg(short, long, value_name = "FILE")]
    grid: Option<OsString>,
    #[arg(long, default_value_t = word_finder::DEFAULT_MIN_LENGTH)]
    min_length: usize,
    #[arg(long, default_value_t = word_finder::DEFAULT_MAX_LENGTH)]
    max_length: usize,
    #[arg(long, default_value_t = grid_solver::DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u64,
    /// Word to leave out of the search; can be given more than once
    #[arg(short = 'x', long = "exclude", value_name = "WORD")]
    exclude: Vec<String>,
}

fn load_dictionary(filename: &OsString) -> Result<Dictionary, io::Error> {
    let file = File::open(filename)?;
    let mut lines = Vec::new();

    for line in BufReader::new(file).lines() {
        lines.push(line?);
    }

    Ok(Dictionary::build(lines))
}

fn read_grid_source(filename: Option<&OsString>) -> Result<String, io::Error> {
    match filename {
        Some(filename) => std::fs::read_to_string(filename),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        },
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let dictionary = match load_dictionary(&cli.dictionary) {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("{}: {}", cli.dictionary.to_string_lossy(), e);
            return ExitCode::FAILURE;
        },
    };

    if dictionary.is_empty() {
        eprintln!("warning: the dictionary contains no usable words");
    }

    info!("dictionary has {} words", dictionary.len());

    let grid_source = match read_grid_source(cli.grid.as_ref()) {
        Ok(source) => source,
        Err(e) => {
            match cli.grid.as_ref() {
                Some(filename) => {
                    eprintln!("{}: {}", filename.to_string_lossy(), e)
                },
                None => eprintln!("stdin: {}", e),
            }
            return ExitCode::FAILURE;
        },
    };

    let grid = match grid_source.parse::<Grid>() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let blacklist = cli.exclude
        .iter()
        .map(|word| word.trim().to_ascii_uppercase())
        .collect::<HashSet<String>>();

    let start_time = Instant::now();

    let pool = word_finder::collect_candidates(
        &grid,
        &dictionary,
        &CellSet::new(grid.n_cells()),
        &blacklist,
        cli.min_length,
        cli.max_length,
    );

    debug!(
        "collected {} candidates in {:?}",
        pool.len(),
        start_time.elapsed(),
    );

    let mut last_reported = 0;

    let result = grid_solver::solve(
        &grid,
        &pool,
        &[],
        |progress| {
            if progress.covered_cells > last_reported {
                last_reported = progress.covered_cells;
                eprintln!(
                    "{} attempts: {} words covering {} of {} cells ({:.0}%)",
                    progress.attempts,
                    progress.words_placed,
                    progress.covered_cells,
                    progress.total_cells,
                    progress.coverage_percent(),
                );
            }
        },
        || false,
        cli.max_attempts,
    );

    debug!("search finished after {:?}", start_time.elapsed());

    if let SolveResult::NoSolution = result {
        println!("No solution found");
        return ExitCode::SUCCESS;
    }

    for candidate in result.placement().iter() {
        println!("{}", candidate);
    }

    if result.is_complete() {
        println!(
            "Covered the whole grid with {} words",
            result.placement().len(),
        );
    } else {
        let covered = result.placement()
            .iter()
            .map(|candidate| candidate.path.len())
            .sum::<usize>();

        println!(
            "Covered {} of {} cells ({:.0}%)",
            covered,
            grid.n_cells(),
            covered as f64 * 100.0 / grid.n_cells() as f64,
        );
    }

    ExitCode::SUCCESS
}
