//! Three-in-a-row detection over a single board.
//!
//! The check is a pure function of the board. A full board without a winner
//! also evaluates to [`Outcome::NoWinner`]; callers decide whether that is a
//! draw by looking at [`Board::is_full`].

use crate::core::{board::Board, mark::Mark, rule_helper::WINNING_TRIPLES};
use serde::Serialize;
use tracing::instrument;
use tsify::Tsify;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Tsify)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outcome {
    NoWinner,
    Winner { mark: Mark, triple: [usize; 3] },
}

impl Outcome {
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::NoWinner => None,
            Outcome::Winner { mark, .. } => Some(mark),
        }
    }

    pub fn winning_triple(self) -> Option<[usize; 3]> {
        match self {
            Outcome::NoWinner => None,
            Outcome::Winner { triple, .. } => Some(triple),
        }
    }

    pub fn has_winner(self) -> bool {
        self != Outcome::NoWinner
    }
}

/// Returns the first winning triple in row, column, diagonal order.
#[instrument(level = "trace", ret)]
pub fn evaluate(board: &Board) -> Outcome {
    let cells = board.cells();

    for triple in WINNING_TRIPLES {
        let [a, b, c] = triple;
        let Some(mark) = cells[a].mark() else {
            continue;
        };
        if cells[a] == cells[b] && cells[a] == cells[c] {
            return Outcome::Winner { mark, triple };
        }
    }

    Outcome::NoWinner
}
