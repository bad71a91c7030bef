//! Winning lines of the 3x3 board

use super::{Cell, Mark};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Whether `mark` holds a complete line
    pub fn has_won(cells: &[Cell; 9], mark: Mark) -> bool {
        let target = mark.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Empty cells that would complete a line for `mark`, ascending
    pub fn winning_moves(cells: &[Cell; 9], mark: Mark) -> Vec<usize> {
        let target = mark.to_cell();
        let mut moves: Vec<usize> = WINNING_LINES
            .iter()
            .filter_map(|line| {
                let owned = line.iter().filter(|&&idx| cells[idx] == target).count();
                let empty: Vec<usize> = line
                    .iter()
                    .copied()
                    .filter(|&idx| cells[idx] == Cell::Empty)
                    .collect();
                (owned == 2 && empty.len() == 1).then(|| empty[0])
            })
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }
}
