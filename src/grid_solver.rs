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

use std::cmp::Reverse;

use super::cell_set::CellSet;
use super::grid::{Cell, Grid};
use super::word_finder::Candidate;

pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000;
// Number of backtracking steps between progress reports and
// cancellation polls
pub const PROGRESS_INTERVAL: u64 = 1000;

// A snapshot of the best placement found so far, handed to the
// progress callback. Successive reports never lose coverage.
#[derive(Clone, Copy, Debug)]
pub struct Progress {
    pub attempts: u64,
    pub words_placed: usize,
    pub covered_cells: usize,
    pub total_cells: usize,
}

impl Progress {
    pub fn coverage_percent(&self) -> f64 {
        self.covered_cells as f64 * 100.0 / self.total_cells as f64
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveResult {
    // A placement whose paths cover every cell of the grid
    Complete(Vec<Candidate>),
    // The highest-coverage placement found within the budget
    Partial(Vec<Candidate>),
    NoSolution,
}

impl SolveResult {
    pub fn placement(&self) -> &[Candidate] {
        match self {
            SolveResult::Complete(placement)
                | SolveResult::Partial(placement)
                => placement,
            SolveResult::NoSolution => &[],
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SolveResult::Complete(_))
    }
}

enum Step {
    Complete,
    Exhausted,
    OutOfBudget,
    Cancelled,
}

fn position_score(grid: &Grid, path: &[Cell]) -> u64 {
    path.iter().map(|&cell| {
        let row_edge = cell.row == 0 || cell.row == grid.n_rows() - 1;
        let col_edge = cell.col == 0 || cell.col == grid.n_cols() - 1;

        if row_edge && col_edge {
            4
        } else if row_edge || col_edge {
            2
        } else {
            1
        }
    }).sum()
}

// Longer words first, then words that touch the corners and edges
fn priority(grid: &Grid, candidate: &Candidate) -> u64 {
    candidate.word.len() as u64 * 1000
        + position_score(grid, &candidate.path)
}

struct Solver<'a, P, C> {
    grid: &'a Grid,
    pool: Vec<Candidate>,
    placement: Vec<Candidate>,
    occupied: CellSet,
    attempts: u64,
    max_attempts: u64,
    best: Vec<Candidate>,
    best_covered: usize,
    progress: P,
    cancel: C,
}

impl<'a, P, C> Solver<'a, P, C>
where
    P: FnMut(&Progress),
    C: FnMut() -> bool,
{
    fn update_best(&mut self) {
        if self.occupied.len() > self.best_covered {
            self.best_covered = self.occupied.len();
            // A real copy: backtracking is about to unwind the
            // working placement
            self.best = self.placement.clone();
        }
    }

    fn report(&mut self) {
        (self.progress)(&Progress {
            attempts: self.attempts,
            words_placed: self.best.len(),
            covered_cells: self.best_covered,
            total_cells: self.grid.n_cells(),
        });
    }

    fn fits(&self, candidate: &Candidate) -> bool {
        candidate.path.iter().all(|&cell| {
            !self.occupied.contains(self.grid.cell_index(cell))
        })
    }

    fn search(&mut self, from: usize) -> Step {
        self.attempts += 1;
        self.update_best();

        if self.attempts % PROGRESS_INTERVAL == 0 {
            self.report();

            if (self.cancel)() {
                return Step::Cancelled;
            }
        }

        if self.occupied.is_full() {
            return Step::Complete;
        }

        if self.attempts > self.max_attempts {
            return Step::OutOfBudget;
        }

        // Only try candidates after the current one. Any subset of
        // the pool is reached through exactly one ordering, so no
        // permutation is ever explored twice.
        for next in from..self.pool.len() {
            if !self.fits(&self.pool[next]) {
                continue;
            }

            let candidate = self.pool[next].clone();

            for cell in candidate.path.iter() {
                self.occupied.insert(self.grid.cell_index(*cell));
            }
            self.placement.push(candidate);

            match self.search(next + 1) {
                Step::Exhausted => {
                    let candidate = self.placement.pop().unwrap();

                    for cell in candidate.path.iter() {
                        self.occupied.remove(self.grid.cell_index(*cell));
                    }
                },
                other => return other,
            }
        }

        Step::Exhausted
    }
}

// Looks for a subset of the pool whose paths cover every cell the
// committed placement leaves free, without any two paths sharing a
// cell. The committed candidates stay at the front of the returned
// placement. When no complete placement turns up within max_attempts
// backtracking steps, the highest-coverage placement seen along the
// way is returned instead.
//
// The progress callback runs every PROGRESS_INTERVAL steps, followed
// by a poll of the cancel callback; cancelling returns the best
// placement so far, exactly as reported.
pub fn solve<P, C>(
    grid: &Grid,
    pool: &[Candidate],
    committed: &[Candidate],
    progress: P,
    cancel: C,
    max_attempts: u64,
) -> SolveResult
where
    P: FnMut(&Progress),
    C: FnMut() -> bool,
{
    let mut occupied = CellSet::new(grid.n_cells());

    for candidate in committed.iter() {
        for cell in candidate.path.iter() {
            occupied.insert(grid.cell_index(*cell));
        }
    }

    let committed_covered = occupied.len();

    if occupied.is_full() {
        return SolveResult::Complete(committed.to_vec());
    }

    let mut sorted_pool = pool.to_vec();
    // The cached sort is stable, so candidates with equal priority
    // keep their pool order and the search stays deterministic
    sorted_pool.sort_by_cached_key(|candidate| {
        Reverse(priority(grid, candidate))
    });

    let mut solver = Solver {
        grid,
        pool: sorted_pool,
        placement: committed.to_vec(),
        occupied,
        attempts: 0,
        max_attempts,
        best: committed.to_vec(),
        best_covered: committed_covered,
        progress,
        cancel,
    };

    match solver.search(0) {
        Step::Complete => SolveResult::Complete(solver.placement),
        Step::Exhausted | Step::OutOfBudget | Step::Cancelled => {
            if solver.best_covered > committed_covered {
                SolveResult::Partial(solver.best)
            } else if !committed.is_empty() {
                SolveResult::Partial(committed.to_vec())
            } else {
                SolveResult::NoSolution
            }
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::dictionary::Dictionary;
    use super::super::word_finder::{
        collect_candidates,
        DEFAULT_MAX_LENGTH,
        DEFAULT_MIN_LENGTH,
    };
    use std::cell::Cell as StdCell;
    use std::collections::HashSet;

    fn candidate(word: &str, cells: &[(usize, usize)]) -> Candidate {
        assert_eq!(word.len(), cells.len());

        Candidate {
            word: word.to_string(),
            path: cells
                .iter()
                .map(|&(row, col)| Cell { row, col })
                .collect(),
        }
    }

    fn pool_for(grid: &Grid, words: &[&str]) -> Vec<Candidate> {
        collect_candidates(
            grid,
            &Dictionary::build(words),
            &CellSet::new(grid.n_cells()),
            &HashSet::new(),
            DEFAULT_MIN_LENGTH,
            DEFAULT_MAX_LENGTH,
        )
    }

    // Counts the covered cells, checking the disjointness invariant
    // on the way
    fn coverage(grid: &Grid, placement: &[Candidate]) -> usize {
        let mut cells = CellSet::new(grid.n_cells());

        for candidate in placement.iter() {
            for cell in candidate.path.iter() {
                let index = grid.cell_index(*cell);
                assert!(!cells.contains(index), "placement overlaps itself");
                cells.insert(index);
            }
        }

        cells.len()
    }

    fn solve_quietly(
        grid: &Grid,
        pool: &[Candidate],
        committed: &[Candidate],
    ) -> SolveResult {
        solve(grid, pool, committed, |_| {}, || false, DEFAULT_MAX_ATTEMPTS)
    }

    #[test]
    fn complete_tiling() {
        let grid = "CA\nTS".parse::<Grid>().unwrap();
        let pool = pool_for(&grid, &["cats", "acts"]);

        let result = solve_quietly(&grid, &pool, &[]);

        assert!(result.is_complete());
        assert_eq!(result.placement().len(), 1);
        assert_eq!(coverage(&grid, result.placement()), grid.n_cells());
    }

    #[test]
    fn best_partial_fallback() {
        let grid = "ABC\nDEF".parse::<Grid>().unwrap();
        // ABED covers four of the six cells and nothing else fits
        let pool = pool_for(&grid, &["abed"]);

        let result = solve_quietly(&grid, &pool, &[]);

        assert!(!result.is_complete());
        assert_eq!(result.placement().len(), 1);
        assert_eq!(result.placement()[0].word, "ABED");
        assert_eq!(coverage(&grid, result.placement()), 4);
    }

    #[test]
    fn empty_pool() {
        let grid = "CA\nTS".parse::<Grid>().unwrap();

        assert_eq!(
            solve_quietly(&grid, &[], &[]),
            SolveResult::NoSolution,
        );

        // With something committed the committed placement comes back
        let grid = "CAX\nTSX".parse::<Grid>().unwrap();
        let committed = candidate("CATS", &[(0, 0), (0, 1), (1, 0), (1, 1)]);

        assert_eq!(
            solve_quietly(&grid, &[], &[committed.clone()]),
            SolveResult::Partial(vec![committed]),
        );
    }

    #[test]
    fn committed_already_complete() {
        let grid = "CA\nTS".parse::<Grid>().unwrap();
        let committed = [
            candidate("CATS", &[(0, 0), (0, 1), (1, 0), (1, 1)]),
        ];

        // Even an empty pool can’t stop an already-complete placement
        let result = solve(&grid, &[], &committed, |_| {}, || true, 0);

        assert_eq!(result, SolveResult::Complete(committed.to_vec()));
    }

    #[test]
    fn committed_stays_in_front() {
        let grid = "ABCDEFGH".parse::<Grid>().unwrap();
        let committed = [
            candidate("ABCD", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
        ];
        // The pool also spells ABCD over the committed cells; the
        // overlap only costs search time
        let pool = pool_for(&grid, &["abcd", "efgh"]);

        let result = solve_quietly(&grid, &pool, &committed);

        assert!(result.is_complete());
        assert_eq!(result.placement().len(), 2);
        assert_eq!(result.placement()[0], committed[0]);
        assert_eq!(result.placement()[1].word, "EFGH");
    }

    #[test]
    fn longer_words_are_tried_first() {
        let grid = "AAAAA".parse::<Grid>().unwrap();
        let pool = [
            candidate("AAAA", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
            candidate("AAAAA", &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]),
        ];

        let result = solve_quietly(&grid, &pool, &[]);

        assert!(result.is_complete());
        assert_eq!(result.placement().len(), 1);
        assert_eq!(result.placement()[0].word, "AAAAA");
    }

    #[test]
    fn corner_words_are_tried_first() {
        let grid = "AAA\nAAA\nAAA".parse::<Grid>().unwrap();
        // Same length, but the second candidate touches a corner and
        // outranks the pool order
        let pool = [
            candidate("AAAA", &[(1, 1), (0, 1), (1, 0), (2, 1)]),
            candidate("AAAA", &[(0, 0), (0, 1), (1, 0), (1, 1)]),
        ];

        let result = solve_quietly(&grid, &pool, &[]);

        assert_eq!(result.placement().len(), 1);
        assert_eq!(result.placement()[0], pool[1]);
    }

    #[test]
    fn duplicate_words_can_both_be_placed() {
        let grid = "AAAAAAAA".parse::<Grid>().unwrap();
        let pool = [
            candidate("AAAA", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
            candidate("AAAA", &[(0, 4), (0, 5), (0, 6), (0, 7)]),
        ];

        let result = solve_quietly(&grid, &pool, &[]);

        assert!(result.is_complete());
        assert_eq!(result.placement().len(), 2);
    }

    #[test]
    fn budget_exhaustion_returns_best() {
        let grid = "ABC\nDEF".parse::<Grid>().unwrap();
        let pool = pool_for(&grid, &["abed"]);

        // No budget at all: the search can’t even place one word
        let result = solve(&grid, &pool, &[], |_| {}, || false, 0);
        assert_eq!(result, SolveResult::NoSolution);

        // One step of budget is enough to place ABED and keep it as
        // the best partial
        let result = solve(&grid, &pool, &[], |_| {}, || false, 1);
        assert_eq!(result.placement().len(), 1);
        assert_eq!(coverage(&grid, result.placement()), 4);
    }

    // A 9x9 grid can’t be tiled by four-cell words (81 isn’t a
    // multiple of four), so a big synthetic pool of straight runs
    // keeps the search backtracking for as long as the test needs
    fn nine_by_nine() -> (Grid, Vec<Candidate>) {
        let grid = vec!["A".repeat(9); 9].join("\n").parse::<Grid>().unwrap();
        let mut pool = Vec::new();

        for row in 0..9 {
            for col in 0..6 {
                pool.push(candidate(
                    "AAAA",
                    &[
                        (row, col),
                        (row, col + 1),
                        (row, col + 2),
                        (row, col + 3),
                    ],
                ));
            }
        }

        for col in 0..9 {
            for row in 0..6 {
                pool.push(candidate(
                    "AAAA",
                    &[
                        (row, col),
                        (row + 1, col),
                        (row + 2, col),
                        (row + 3, col),
                    ],
                ));
            }
        }

        (grid, pool)
    }

    #[test]
    fn cancellation_returns_last_reported_best() {
        let (grid, pool) = nine_by_nine();

        let reports = std::cell::RefCell::new(Vec::<Progress>::new());

        let result = solve(
            &grid,
            &pool,
            &[],
            |progress| reports.borrow_mut().push(*progress),
            || reports.borrow().len() >= 3,
            DEFAULT_MAX_ATTEMPTS,
        );

        let reports = reports.into_inner();

        // Cancelled at the third poll
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].attempts, 3 * PROGRESS_INTERVAL);

        // Reported coverage never goes down
        for pair in reports.windows(2) {
            assert!(pair[0].covered_cells <= pair[1].covered_cells);
        }

        // The returned placement is exactly as good as the last
        // report promised
        assert!(!result.is_complete());
        assert_eq!(
            coverage(&grid, result.placement()),
            reports[2].covered_cells,
        );
    }

    #[test]
    fn deterministic() {
        let (grid, pool) = nine_by_nine();
        let budget = 5000;

        let count_a = StdCell::new(0u32);
        let result_a = solve(
            &grid,
            &pool,
            &[],
            |_| count_a.set(count_a.get() + 1),
            || false,
            budget,
        );

        let count_b = StdCell::new(0u32);
        let result_b = solve(
            &grid,
            &pool,
            &[],
            |_| count_b.set(count_b.get() + 1),
            || false,
            budget,
        );

        assert_eq!(result_a, result_b);
        assert_eq!(count_a.get(), count_b.get());
        assert!(!result_a.is_complete());
    }
}
