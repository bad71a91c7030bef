//! N-queens models
//!
//! A placement is a vector of columns indexed by row: `placement[row] = col`.
//! Two models are provided:
//!
//! - [`QueensPlacement`] places queens row by row and only offers safe
//!   columns, for tree search (A*, greedy, exhaustive enumeration).
//! - [`QueensLocal`] works on complete placements with one queen per row and
//!   moves single queens within their row, for local and genetic search.

use std::fmt::Write as _;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::search::{
    GeneticProblem, RandomStart, SearchProblem, point_mutation, single_point_crossover,
};

pub const DEFAULT_SIZE: usize = 8;

/// Whether a queen at (`row`, `col`) is attacked by any queen already
/// placed in the rows before it.
pub fn is_safe(placement: &[usize], row: usize, col: usize) -> bool {
    placement
        .iter()
        .enumerate()
        .all(|(prev_row, &prev_col)| {
            prev_col != col && prev_row.abs_diff(row) != prev_col.abs_diff(col)
        })
}

/// Number of attacking queen pairs (shared column or diagonal).
pub fn conflicts(placement: &[usize]) -> usize {
    let mut count = 0;
    for (i, &a) in placement.iter().enumerate() {
        for (j, &b) in placement.iter().enumerate().skip(i + 1) {
            if a == b || i.abs_diff(j) == a.abs_diff(b) {
                count += 1;
            }
        }
    }
    count
}

/// Number of queen pairs on a board of `size` rows.
pub fn max_pairs(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

/// Whether `placement` is a complete, conflict-free solution on a `size` board.
pub fn is_solution(placement: &[usize], size: usize) -> bool {
    placement.len() == size && placement.iter().all(|&c| c < size) && conflicts(placement) == 0
}

/// Parse a placement such as `"04752613"` or `"0,4,7,5,2,6,1,3"`.
///
/// # Errors
///
/// Returns error if the number of columns differs from `size` or any column
/// is out of range.
pub fn parse_placement(s: &str, size: usize) -> Result<Vec<usize>, crate::Error> {
    let columns: Vec<&str> = if s.contains(',') {
        s.split(',').map(str::trim).filter(|c| !c.is_empty()).collect()
    } else {
        s.split_whitespace()
            .flat_map(|chunk| {
                chunk
                    .char_indices()
                    .map(move |(i, c)| &chunk[i..i + c.len_utf8()])
            })
            .collect()
    };

    if columns.len() != size {
        return Err(crate::Error::InvalidBoardLength {
            expected: size,
            got: columns.len(),
            context: s.to_string(),
        });
    }

    columns
        .iter()
        .enumerate()
        .map(|(row, text)| {
            let column: usize = text.parse().map_err(|_| crate::Error::InvalidCellCharacter {
                character: text.chars().next().unwrap_or(' '),
                position: row,
                context: s.to_string(),
            })?;
            if column >= size {
                return Err(crate::Error::InvalidPlacement {
                    context: s.to_string(),
                    row,
                    column,
                    size,
                });
            }
            Ok(column)
        })
        .collect()
}

/// Render a placement as a grid, one line per row.
pub fn render(placement: &[usize], size: usize) -> String {
    let rule = "-".repeat(size * 4 + 1);
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(size * 4 + 1));
    for row in 0..size {
        out.push('|');
        for col in 0..size {
            out.push_str(if placement.get(row) == Some(&col) { " Q |" } else { "   |" });
        }
        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
    }
    out.push_str(&"=".repeat(size * 4 + 1));
    out
}

/// Row-by-row placement problem for tree search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueensPlacement {
    pub size: usize,
}

impl QueensPlacement {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Number of safe columns in the next empty row.
    fn open_columns(&self, placement: &[usize]) -> usize {
        let row = placement.len();
        (0..self.size).filter(|&col| is_safe(placement, row, col)).count()
    }
}

impl Default for QueensPlacement {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl SearchProblem for QueensPlacement {
    type State = Vec<usize>;
    type Action = usize;

    fn initial_state(&self) -> Vec<usize> {
        Vec::new()
    }

    fn actions(&self, state: &Vec<usize>) -> Vec<usize> {
        if state.len() >= self.size {
            return Vec::new();
        }
        let row = state.len();
        (0..self.size).filter(|&col| is_safe(state, row, col)).collect()
    }

    fn result(&self, state: &Vec<usize>, action: &usize) -> Vec<usize> {
        let mut next = state.clone();
        next.push(*action);
        next
    }

    fn is_goal(&self, state: &Vec<usize>) -> bool {
        state.len() == self.size
    }

    /// Remaining queens plus diagonal conflicts plus blocked columns in the
    /// next row. A partial placement whose next row is fully blocked is a
    /// dead end and scores infinity.
    fn heuristic(&self, state: &Vec<usize>) -> f64 {
        if self.is_goal(state) {
            return 0.0;
        }
        let remaining = self.size - state.len();
        let open = self.open_columns(state);
        if open == 0 {
            return f64::INFINITY;
        }
        (remaining + conflicts(state) + (self.size - open)) as f64
    }
}

/// Every solution, in lexicographic order, by plain depth-first search.
pub fn all_solutions(size: usize) -> Vec<Vec<usize>> {
    let mut solutions = Vec::new();
    let mut placement = Vec::with_capacity(size);
    collect_solutions(size, &mut placement, &mut solutions, None);
    solutions
}

/// Every solution, exploring children in ascending heuristic order.
///
/// The set of solutions is the same as [`all_solutions`]; only the order in
/// which they are found differs.
pub fn all_solutions_guided(size: usize) -> Vec<Vec<usize>> {
    let problem = QueensPlacement::new(size);
    let mut solutions = Vec::new();
    let mut placement = Vec::with_capacity(size);
    collect_solutions(size, &mut placement, &mut solutions, Some(&problem));
    solutions
}

fn collect_solutions(
    size: usize,
    placement: &mut Vec<usize>,
    solutions: &mut Vec<Vec<usize>>,
    guide: Option<&QueensPlacement>,
) {
    let row = placement.len();
    if row == size {
        solutions.push(placement.clone());
        return;
    }

    let mut columns: Vec<usize> = (0..size).filter(|&col| is_safe(placement, row, col)).collect();
    if let Some(problem) = guide {
        let mut scored: Vec<(usize, f64)> = columns
            .iter()
            .map(|&col| {
                placement.push(col);
                let h = problem.heuristic(placement);
                placement.pop();
                (col, h)
            })
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        columns = scored.into_iter().map(|(col, _)| col).collect();
    }

    for col in columns {
        placement.push(col);
        collect_solutions(size, placement, solutions, guide);
        placement.pop();
    }
}

/// A single queen moved to a new column within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueenMove {
    pub row: usize,
    pub column: usize,
}

/// Complete-placement problem for local and genetic search.
///
/// The value of a placement is the number of non-attacking pairs, so the
/// maximum `size * (size - 1) / 2` is reached exactly by solutions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueensLocal {
    pub size: usize,
    pub initial: Vec<usize>,
}

impl QueensLocal {
    /// Start from a fixed placement.
    pub fn new(initial: Vec<usize>) -> Self {
        Self {
            size: initial.len(),
            initial,
        }
    }

    /// Start from a uniformly random placement.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        Self::new(random_placement(size, rng))
    }
}

fn random_placement<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<usize> {
    (0..size).map(|_| rng.random_range(0..size)).collect()
}

impl SearchProblem for QueensLocal {
    type State = Vec<usize>;
    type Action = QueenMove;

    fn initial_state(&self) -> Vec<usize> {
        self.initial.clone()
    }

    fn actions(&self, state: &Vec<usize>) -> Vec<QueenMove> {
        state
            .iter()
            .enumerate()
            .flat_map(|(row, &current)| {
                (0..self.size)
                    .filter(move |&column| column != current)
                    .map(move |column| QueenMove { row, column })
            })
            .collect()
    }

    fn result(&self, state: &Vec<usize>, action: &QueenMove) -> Vec<usize> {
        let mut next = state.clone();
        next[action.row] = action.column;
        next
    }

    fn is_goal(&self, state: &Vec<usize>) -> bool {
        conflicts(state) == 0
    }

    fn heuristic(&self, state: &Vec<usize>) -> f64 {
        conflicts(state) as f64
    }

    fn value(&self, state: &Vec<usize>) -> f64 {
        (max_pairs(self.size) - conflicts(state)) as f64
    }
}

impl RandomStart for QueensLocal {
    fn random_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        random_placement(self.size, rng)
    }
}

impl GeneticProblem for QueensLocal {
    fn crossover<R: Rng + ?Sized>(
        &self,
        first: &Vec<usize>,
        second: &Vec<usize>,
        rng: &mut R,
    ) -> (Vec<usize>, Vec<usize>) {
        single_point_crossover(first, second, rng)
    }

    fn mutate<R: Rng + ?Sized>(&self, state: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        let size = self.size;
        point_mutation(state, rng, |rng| rng.random_range(0..size))
    }

    fn max_value(&self) -> Option<f64> {
        Some(max_pairs(self.size) as f64)
    }
}
