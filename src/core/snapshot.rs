use crate::core::board::{Board, CellLocation};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const GAME_START_DESCRIPTION: &str = "Go to game start";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[readonly::make]
pub struct Snapshot {
    pub board: Board,
    pub location: Option<CellLocation>, // none for the initial snapshot
}

impl Snapshot {
    pub fn initial() -> Self {
        Self {
            board: Board::empty(),
            location: None,
        }
    }

    pub fn after_move(board: Board, location: CellLocation) -> Self {
        Self {
            board,
            location: Some(location),
        }
    }

    pub fn is_initial(&self) -> bool {
        self.location.is_none()
    }

    pub fn location_text(&self) -> String {
        self.location
            .map(|location| location.to_string())
            .unwrap_or_default()
    }

    pub fn description(step: usize) -> String {
        if step == 0 {
            GAME_START_DESCRIPTION.to_string()
        } else {
            format!("Go to move #{step}")
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{} {}", self.board, location),
            None => write!(f, "{}", self.board),
        }
    }
}
