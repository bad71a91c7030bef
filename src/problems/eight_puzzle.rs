//! The 8-puzzle: slide tiles into the blank until the goal layout is reached

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::SearchProblem;

/// Tile layout, row-major. `0` is the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tiles(pub [[u8; 3]; 3]);

/// Direction the blank moves in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slide {
    Up,
    Down,
    Left,
    Right,
}

impl Slide {
    pub const ALL: [Slide; 4] = [Slide::Up, Slide::Down, Slide::Left, Slide::Right];

    fn offset(self) -> (isize, isize) {
        match self {
            Slide::Up => (-1, 0),
            Slide::Down => (1, 0),
            Slide::Left => (0, -1),
            Slide::Right => (0, 1),
        }
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Slide::Up => "UP",
            Slide::Down => "DOWN",
            Slide::Left => "LEFT",
            Slide::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

impl Tiles {
    /// Start layout of the classic exercise.
    pub const DEFAULT_INITIAL: Tiles = Tiles([[2, 8, 3], [1, 6, 4], [7, 0, 5]]);
    /// Goal layout of the classic exercise (blank in the centre).
    pub const DEFAULT_GOAL: Tiles = Tiles([[1, 2, 3], [8, 0, 4], [7, 6, 5]]);

    /// Parse nine digits, row-major, e.g. `"283164705"` or `"2 8 3 / 1 6 4 / 7 0 5"`.
    /// Whitespace, `/` and `,` are ignored; `_` and `.` stand for the blank.
    ///
    /// # Errors
    ///
    /// Returns error unless the digits form a permutation of 0-8.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != ',')
            .collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut tiles = [[0u8; 3]; 3];
        let mut seen = [false; 9];
        for (i, &c) in chars.iter().enumerate() {
            let value = match c {
                '_' | '.' => 0,
                '0'..='8' => c as u8 - b'0',
                _ => {
                    return Err(crate::Error::InvalidCellCharacter {
                        character: c,
                        position: i,
                        context: s.to_string(),
                    });
                }
            };
            if seen[value as usize] {
                return Err(crate::Error::InvalidPuzzle {
                    context: s.to_string(),
                    reason: format!("tile {value} appears twice"),
                });
            }
            seen[value as usize] = true;
            tiles[i / 3][i % 3] = value;
        }

        Ok(Tiles(tiles))
    }

    /// Row and column of `tile`.
    pub fn find(&self, tile: u8) -> Option<(usize, usize)> {
        (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .find(|&(row, col)| self.0[row][col] == tile)
    }

    fn blank(&self) -> (usize, usize) {
        // Every constructed layout holds each of 0-8 exactly once.
        self.find(0).unwrap_or((0, 0))
    }

    /// Slides the blank can make.
    pub fn slides(&self) -> Vec<Slide> {
        let (row, col) = self.blank();
        Slide::ALL
            .into_iter()
            .filter(|slide| {
                let (dr, dc) = slide.offset();
                (0..3).contains(&(row as isize + dr)) && (0..3).contains(&(col as isize + dc))
            })
            .collect()
    }

    /// Layout after moving the blank. Illegal slides leave the layout unchanged.
    pub fn slide(&self, slide: Slide) -> Tiles {
        let (row, col) = self.blank();
        let (dr, dc) = slide.offset();
        let (target_row, target_col) = (row as isize + dr, col as isize + dc);
        if !(0..3).contains(&target_row) || !(0..3).contains(&target_col) {
            return *self;
        }
        let (target_row, target_col) = (target_row as usize, target_col as usize);

        let mut next = self.0;
        next[row][col] = next[target_row][target_col];
        next[target_row][target_col] = 0;
        Tiles(next)
    }

    /// Sum of per-tile Manhattan distances to `goal`, blank excluded.
    pub fn manhattan_distance(&self, goal: &Tiles) -> u32 {
        let mut distance = 0;
        for row in 0..3 {
            for col in 0..3 {
                let tile = self.0[row][col];
                if tile == 0 {
                    continue;
                }
                if let Some((goal_row, goal_col)) = goal.find(tile) {
                    distance += (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32;
                }
            }
        }
        distance
    }

    /// Whether `goal` is reachable from this layout.
    ///
    /// On a 3x3 board a slide never changes the parity of the inversion
    /// count of the tiles (blank excluded), so two layouts are mutually
    /// reachable exactly when their parities agree.
    pub fn is_solvable_to(&self, goal: &Tiles) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }

    fn inversions(&self) -> usize {
        let flat: Vec<u8> = self.0.iter().flatten().copied().filter(|&t| t != 0).collect();
        let mut count = 0;
        for i in 0..flat.len() {
            for j in i + 1..flat.len() {
                if flat[i] > flat[j] {
                    count += 1;
                }
            }
        }
        count
    }
}

impl fmt::Display for Tiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "┌─────────┐")?;
        for row in &self.0 {
            write!(f, "│")?;
            for &tile in row {
                if tile == 0 {
                    write!(f, "   ")?;
                } else {
                    write!(f, " {tile} ")?;
                }
            }
            writeln!(f, "│")?;
        }
        write!(f, "└─────────┘")
    }
}

/// 8-puzzle search problem with unit step costs and a Manhattan heuristic.
#[derive(Debug, Clone)]
pub struct EightPuzzle {
    pub initial: Tiles,
    pub goal: Tiles,
}

impl EightPuzzle {
    pub fn new(initial: Tiles, goal: Tiles) -> Self {
        Self { initial, goal }
    }
}

impl Default for EightPuzzle {
    fn default() -> Self {
        Self::new(Tiles::DEFAULT_INITIAL, Tiles::DEFAULT_GOAL)
    }
}

impl SearchProblem for EightPuzzle {
    type State = Tiles;
    type Action = Slide;

    fn initial_state(&self) -> Tiles {
        self.initial
    }

    fn actions(&self, state: &Tiles) -> Vec<Slide> {
        state.slides()
    }

    fn result(&self, state: &Tiles, action: &Slide) -> Tiles {
        state.slide(*action)
    }

    fn is_goal(&self, state: &Tiles) -> bool {
        *state == self.goal
    }

    fn heuristic(&self, state: &Tiles) -> f64 {
        state.manhattan_distance(&self.goal) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let tiles = Tiles::from_string("283 164 7_5").unwrap();
        assert_eq!(tiles, Tiles::DEFAULT_INITIAL);
    }

    #[test]
    fn test_from_string_rejects_duplicates() {
        assert!(matches!(
            Tiles::from_string("283164755"),
            Err(crate::Error::InvalidPuzzle { .. })
        ));
    }

    #[test]
    fn test_from_string_rejects_short_input() {
        assert!(matches!(
            Tiles::from_string("2831"),
            Err(crate::Error::InvalidBoardLength { got: 4, .. })
        ));
    }

    #[test]
    fn test_slides_from_corner() {
        let tiles = Tiles([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(tiles.slides(), vec![Slide::Down, Slide::Right]);
    }

    #[test]
    fn test_slide_moves_blank() {
        let next = Tiles::DEFAULT_INITIAL.slide(Slide::Up);
        assert_eq!(next, Tiles([[2, 8, 3], [1, 0, 4], [7, 6, 5]]));
    }

    #[test]
    fn test_illegal_slide_is_noop() {
        let tiles = Tiles([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(tiles.slide(Slide::Up), tiles);
    }

    #[test]
    fn test_manhattan_distance_of_default_instance() {
        assert_eq!(
            Tiles::DEFAULT_INITIAL.manhattan_distance(&Tiles::DEFAULT_GOAL),
            5
        );
        assert_eq!(Tiles::DEFAULT_GOAL.manhattan_distance(&Tiles::DEFAULT_GOAL), 0);
    }

    #[test]
    fn test_solvability_parity() {
        assert!(Tiles::DEFAULT_INITIAL.is_solvable_to(&Tiles::DEFAULT_GOAL));
        let swapped = Tiles([[8, 2, 3], [1, 0, 4], [7, 6, 5]]);
        assert!(!swapped.is_solvable_to(&Tiles::DEFAULT_GOAL));
    }

    #[test]
    fn test_display() {
        let rendered = Tiles::DEFAULT_GOAL.to_string();
        assert!(rendered.contains("│ 8     4 │"));
    }
}
