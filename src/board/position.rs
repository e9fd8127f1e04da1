//! Text forms of a position: the 64-cell diagram and move-history replay.

use std::fmt;
use std::str::FromStr;

use super::{Board, Color, HistoryError, Move, PositionError, Square};

impl Board {
    /// Replay a case-encoded history (`"F5d6C3"`) from the start position.
    ///
    /// A pass is inserted when a token belongs to the side not on move and
    /// the side on move has no legal placement.
    pub fn from_history(history: &str) -> Result<Self, HistoryError> {
        if !history.is_ascii() {
            return Err(HistoryError::InvalidToken {
                ply: 0,
                token: history.to_string(),
            });
        }
        if history.len() % 2 != 0 {
            return Err(HistoryError::OddLength { len: history.len() });
        }

        let mut board = Board::new();
        for (ply, chunk) in history.as_bytes().chunks(2).enumerate() {
            // Chunks of an ASCII string are valid UTF-8.
            let token = std::str::from_utf8(chunk).unwrap_or_default();
            let mv: Move = token.parse().map_err(|_| HistoryError::InvalidToken {
                ply,
                token: token.to_string(),
            })?;
            let player = if chunk[0].is_ascii_uppercase() {
                Color::Black
            } else {
                Color::White
            };
            if player != board.side_to_move && !board.has_legal_move() {
                board
                    .pass()
                    .map_err(|source| HistoryError::IllegalMove { ply, source })?;
            }
            board
                .apply(mv)
                .map_err(|source| HistoryError::IllegalMove { ply, source })?;
        }
        Ok(board)
    }

    /// True when replaying `history()` from the start reaches this board.
    /// Diagrams parsed with [`FromStr`] carry no history, so only the start
    /// position passes.
    #[must_use]
    pub fn history_matches_position(&self) -> bool {
        Board::from_history(&self.history).is_ok_and(|replay| {
            replay.discs == self.discs
                && (replay.side_to_move == self.side_to_move || !replay.has_legal_move())
        })
    }

    /// 64 cells from `a1` to `h8` (`X` black, `O` white, `-` empty), a
    /// space, then the side to move.
    #[must_use]
    pub fn to_position_string(&self) -> String {
        let mut out = String::with_capacity(66);
        for idx in 0..64u8 {
            let sq = Square::from_index_const(idx);
            out.push(self.color_on(sq).map_or('-', Color::to_char));
        }
        out.push(' ');
        out.push(self.side_to_move.to_char());
        out
    }
}

/// Parses the diagram written by [`Board::to_position_string`]. Whitespace
/// between cells is ignored, `B`/`*` and `W` are accepted for discs and `.`
/// for empty cells. The undo stack and history start empty.
impl FromStr for Board {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 65 {
            return Err(PositionError::WrongCellCount {
                found: chars.len().saturating_sub(1),
            });
        }

        let mut board = Board::empty();
        for (idx, &c) in chars[..64].iter().enumerate() {
            let sq = Square::from_index_const(idx as u8);
            match c {
                '-' | '.' => {}
                _ => {
                    let color = Color::from_char(c).ok_or(PositionError::InvalidCell { char: c })?;
                    board.discs[color.index()] |= super::Bitboard::from_square(sq);
                }
            }
        }

        let side = chars[64];
        board.side_to_move = Color::from_char(side).ok_or(PositionError::InvalidSideToMove {
            found: side.to_string(),
        })?;
        board.hash = board.calculate_hash();
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for rank in 0..8 {
            write!(f, "{}", rank + 1)?;
            for file in 0..8 {
                let sq = Square::new_const(rank, file);
                write!(f, " {}", self.color_on(sq).map_or('-', Color::to_char))?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} to move, X={} O={}",
            self.side_to_move,
            self.disc_count(Color::Black),
            self.disc_count(Color::White)
        )
    }
}
