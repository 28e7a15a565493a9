//! Render model handed to a presentation layer after every transition.

use crate::core::{
    display_order::DisplayOrder,
    game_state::GameState,
    mark::Mark,
    snapshot::Snapshot,
    win_detector::Outcome,
};
use serde::Serialize;
use tsify::Tsify;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct MoveEntry {
    pub step: usize, // history index, independent of display order
    pub description: String,
    pub location_text: String,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub cells: Vec<String>,
    pub outcome: Outcome,
    pub winning_triple: Option<[usize; 3]>,
    pub is_draw: bool,
    pub status: String,
    pub next_mark: Mark,
    pub moves: Vec<MoveEntry>,
    pub active_step: usize,
    pub display_order: DisplayOrder,
}

impl GameView {
    pub fn from_state(state: &GameState) -> Self {
        let outcome = state.outcome();
        let is_draw = state.is_draw();
        let next_mark = state.next_mark();

        let moves = state
            .history
            .iter()
            .enumerate()
            .map(|(step, snapshot)| MoveEntry {
                step,
                description: Snapshot::description(step),
                location_text: snapshot.location_text(),
                is_active: step == state.current_step,
            })
            .collect::<Vec<_>>();

        Self {
            cells: state.current_board().labels(),
            outcome,
            winning_triple: outcome.winning_triple(),
            is_draw,
            status: status_text(outcome, is_draw, next_mark),
            next_mark,
            moves: state.display_order.arrange(moves),
            active_step: state.current_step,
            display_order: state.display_order,
        }
    }

    pub fn is_highlighted(&self, cell_index: usize) -> bool {
        self.winning_triple
            .is_some_and(|triple| triple.contains(&cell_index))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// the winning triple is only for highlighting, never part of the status line
pub fn status_text(outcome: Outcome, is_draw: bool, next_mark: Mark) -> String {
    match outcome.winner() {
        Some(winner) => format!("Winner: {winner}"),
        None if is_draw => "Draw".to_string(),
        None => format!("Next player: {next_mark}"),
    }
}
