//! Tic-Tac-Toe played through the [`crate::game::Game`] interface

pub mod board;
pub mod lines;

pub use board::{Board, Cell, Mark};
pub use lines::{LineAnalyzer, WINNING_LINES};

/// Parse a human move such as `"1,2"`, `"12"` or `"1 2"` into a board
/// position.
///
/// # Errors
///
/// Returns error if the input is not a row and column in 0-2.
pub fn parse_move(input: &str) -> Result<usize, crate::Error> {
    let invalid = || crate::Error::InvalidMoveInput {
        input: input.to_string(),
    };
    let trimmed = input.trim();

    let parts: Vec<&str> = if trimmed.contains(',') {
        trimmed.split(',').map(str::trim).collect()
    } else if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        vec![&trimmed[..1], &trimmed[1..]]
    } else {
        trimmed.split_whitespace().collect()
    };

    let [row, col] = parts.as_slice() else {
        return Err(invalid());
    };
    let row: usize = row.parse().map_err(|_| invalid())?;
    let col: usize = col.parse().map_err(|_| invalid())?;
    Board::position(row, col).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_move_formats() {
        assert_eq!(parse_move("1,2").unwrap(), 5);
        assert_eq!(parse_move(" 0 , 0 ").unwrap(), 0);
        assert_eq!(parse_move("21").unwrap(), 7);
        assert_eq!(parse_move("2 2").unwrap(), 8);
    }

    #[test]
    fn test_parse_move_rejects_garbage() {
        for input in ["", "3,0", "a,b", "1", "1,2,3", "123"] {
            assert!(
                matches!(parse_move(input), Err(crate::Error::InvalidMoveInput { .. })),
                "accepted {input:?}"
            );
        }
    }
}
