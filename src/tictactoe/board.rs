//! Board representation and the in-place move/undo game interface

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::game::{Game, Side};

/// Score of a decided position for the side to move.
const WIN_SCORE: f64 = 100.0;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }
}

/// The mark a player places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Get the opposing mark
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }

    /// X always sits in the first seat, O in the second.
    pub fn side(self) -> Side {
        match self {
            Mark::X => Side::First,
            Mark::O => Side::Second,
        }
    }

    pub fn from_side(side: Side) -> Mark {
        match side {
            Side::First => Mark::X,
            Side::Second => Mark::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// Cells plus the mark whose turn it is.
///
/// The board is mutated in place by [`Game::apply`] and restored by
/// [`Game::undo`]; it is also `Copy` (10 bytes), so tests can snapshot it
/// cheaply and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
    pub to_move: Mark,
}

impl Board {
    /// Empty board with X to move
    pub fn new() -> Self {
        Self::new_with_mark(Mark::X)
    }

    /// Empty board with `first` to move
    pub fn new_with_mark(first: Mark) -> Self {
        Board {
            cells: [Cell::Empty; 9],
            to_move: first,
        }
    }

    /// Board position of (`row`, `col`), both 0-2.
    pub fn position(row: usize, col: usize) -> Option<usize> {
        (row < 3 && col < 3).then_some(row * 3 + col)
    }

    /// Create a board from a string such as `"X.O.X...."`, optionally
    /// suffixed with `_X` or `_O` to set the side to move. Whitespace is
    /// ignored. Without a suffix, X is assumed to have moved first.
    ///
    /// # Errors
    ///
    /// Returns error if there are not exactly 9 cells, a character is not a
    /// cell, or the piece counts cannot arise with the given side to move.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let (board_part, suffix) = match cleaned.split_once('_') {
            Some((board, suffix)) if matches!(suffix, "X" | "O") => (board, Some(suffix)),
            _ => (cleaned.as_str(), None),
        };

        let chars: Vec<char> = board_part.chars().collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let x_count = cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = cells.iter().filter(|&&c| c == Cell::O).count();
        let to_move = match suffix {
            Some("O") => Mark::O,
            Some(_) => Mark::X,
            None if x_count == o_count + 1 => Mark::O,
            None => Mark::X,
        };
        let consistent = match to_move {
            Mark::X => x_count == o_count || o_count == x_count + 1,
            Mark::O => x_count == o_count || x_count == o_count + 1,
        };
        if !consistent || (suffix.is_none() && x_count < o_count) {
            return Err(crate::Error::InvalidPieceCounts { x_count, o_count });
        }

        Ok(Board { cells, to_move })
    }

    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_won(&self, mark: Mark) -> bool {
        LineAnalyzer::has_won(&self.cells, mark)
    }

    pub fn winning_mark(&self) -> Option<Mark> {
        if self.has_won(Mark::X) {
            Some(Mark::X)
        } else if self.has_won(Mark::O) {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winning_mark().is_none()
    }

    /// Validated move for the side to move.
    ///
    /// # Errors
    ///
    /// Returns error if the game is over, the position is off the board, or
    /// the cell is occupied.
    pub fn play(&mut self, pos: usize) -> Result<(), crate::Error> {
        if self.is_over() {
            return Err(crate::Error::GameOver);
        }
        if pos >= 9 {
            return Err(crate::Error::InvalidPosition { position: pos });
        }
        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }
        self.apply(&pos);
        Ok(())
    }

    /// Grid with row and column labels, as shown to a human player.
    pub fn render_grid(&self) -> String {
        let mut out = String::from("   0   1   2\n  -----------\n");
        for row in 0..3 {
            out.push_str(&format!("{row} |"));
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Cell::Empty => ' ',
                    cell => cell.to_char(),
                };
                out.push_str(&format!(" {symbol} |"));
            }
            out.push_str("\n  -----------\n");
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Board {
    type Move = usize;

    fn to_move(&self) -> Side {
        self.to_move.side()
    }

    fn legal_moves(&self) -> Vec<usize> {
        if self.winning_mark().is_some() {
            return Vec::new();
        }
        self.empty_positions()
    }

    fn apply(&mut self, mv: &usize) {
        debug_assert!(self.is_empty(*mv), "apply on occupied cell {mv}");
        self.cells[*mv] = self.to_move.to_cell();
        self.to_move = self.to_move.opponent();
    }

    fn undo(&mut self, mv: &usize) {
        debug_assert!(
            self.cells[*mv] == self.to_move.opponent().to_cell(),
            "undo of {mv} does not match the last mover"
        );
        self.cells[*mv] = Cell::Empty;
        self.to_move = self.to_move.opponent();
    }

    fn is_over(&self) -> bool {
        self.winning_mark().is_some() || self.is_full()
    }

    fn winner(&self) -> Option<Side> {
        self.winning_mark().map(Mark::side)
    }

    fn score(&self) -> f64 {
        match self.winning_mark() {
            Some(mark) if mark == self.to_move => WIN_SCORE,
            Some(_) => -WIN_SCORE,
            None => 0.0,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(3) && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
