//! The game value driven by the presentation layer.
//!
//! A [`GameState`] is never mutated in place from outside this module. Every
//! transition borrows the current value and returns its replacement, so a
//! holder only ever swaps one value for another.

use crate::core::{
    board::{Board, CellLocation, LocationError},
    display_order::DisplayOrder,
    game_view::{self, GameView},
    mark::Mark,
    rule_helper,
    snapshot::Snapshot,
    win_detector::{self, Outcome},
};
use std::fmt;
use tracing::{debug, trace};

#[derive(Clone, Debug, PartialEq, Eq)]
#[readonly::make]
pub struct GameState {
    pub history: Vec<Snapshot>,
    pub current_step: usize, // always a valid index into history
    pub display_order: DisplayOrder,
}

impl GameState {
    pub fn at_start() -> Self {
        Self::with_display_order(DisplayOrder::default())
    }

    pub fn with_display_order(display_order: DisplayOrder) -> Self {
        Self {
            history: vec![Snapshot::initial()],
            current_step: rule_helper::INITIAL_STEP,
            display_order,
        }
    }

    pub fn next_mark(&self) -> Mark {
        rule_helper::mark_for_step(self.current_step)
    }

    pub fn current_snapshot(&self) -> &Snapshot {
        &self.history[self.current_step]
    }

    pub fn current_board(&self) -> &Board {
        &self.current_snapshot().board
    }

    pub fn outcome(&self) -> Outcome {
        win_detector::evaluate(self.current_board())
    }

    pub fn has_winner(&self) -> bool {
        self.outcome().has_winner()
    }

    pub fn is_draw(&self) -> bool {
        !self.has_winner() && self.current_board().is_full()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn num_moves(&self) -> usize {
        self.history.len() - 1
    }

    pub fn latest_step(&self) -> usize {
        self.history.len() - 1
    }

    pub fn is_viewing_latest(&self) -> bool {
        self.current_step == self.latest_step()
    }

    /// Validates a cell activation against the viewed board, returning the location to record.
    pub fn check_move(
        &self,
        cell_index: usize,
        row: usize,
        col: usize,
    ) -> Result<CellLocation, MoveRejection> {
        if !rule_helper::is_valid_cell_index(cell_index) {
            return Err(LocationError::IndexOutOfRange { cell_index }.into());
        }

        let location = CellLocation::new(row, col)?;
        if location.index() != cell_index {
            return Err(MoveRejection::LocationMismatch {
                cell_index,
                location,
            });
        }

        let board = self.current_board();
        if let Some(winner) = win_detector::evaluate(board).winner() {
            return Err(MoveRejection::GameAlreadyWon { winner });
        }

        if !board.is_empty_at(cell_index) {
            return Err(MoveRejection::CellOccupied { cell_index });
        }

        Ok(location)
    }

    pub fn check_move_at(&self, location: CellLocation) -> Result<(), MoveRejection> {
        self.check_move(location.index(), location.row, location.col)
            .map(|_| ())
    }

    /// Places the next mark, discarding any snapshots after the viewed step.
    ///
    /// Rejected moves are ignored: the returned state equals `self`.
    pub fn apply_move(&self, cell_index: usize, row: usize, col: usize) -> Self {
        match self.check_move(cell_index, row, col) {
            Ok(location) => self.after_move(cell_index, location),
            Err(rejection) => {
                debug!(%rejection, cell_index, row, col, "ignoring move");
                self.clone()
            }
        }
    }

    pub fn apply_move_at(&self, location: CellLocation) -> Self {
        self.apply_move(location.index(), location.row, location.col)
    }

    fn after_move(&self, cell_index: usize, location: CellLocation) -> Self {
        let mark = self.next_mark();
        let board = self.current_board().with_mark(cell_index, mark);

        let mut history = self.history[..=self.current_step].to_vec();
        let num_discarded = self.history.len() - history.len();
        history.push(Snapshot::after_move(board, location));
        let current_step = history.len() - 1;

        trace!(%mark, %location, current_step, num_discarded, "applied move");

        Self {
            history,
            current_step,
            display_order: self.display_order,
        }
    }

    /// Views an earlier (or later) snapshot without changing the history.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not an index into the history.
    pub fn jump_to(&self, step: usize) -> Self {
        assert!(
            step < self.history.len(),
            "jump to step {step} but history has {} snapshots",
            self.history.len()
        );
        self.viewing(step)
    }

    pub fn try_jump_to(&self, step: usize) -> Result<Self, StepOutOfRange> {
        if step < self.history.len() {
            Ok(self.viewing(step))
        } else {
            Err(StepOutOfRange {
                step,
                history_len: self.history.len(),
            })
        }
    }

    fn viewing(&self, step: usize) -> Self {
        trace!(from = self.current_step, to = step, "jumped");
        Self {
            history: self.history.clone(),
            current_step: step,
            display_order: self.display_order,
        }
    }

    pub fn toggle_display_order(&self) -> Self {
        Self {
            history: self.history.clone(),
            current_step: self.current_step,
            display_order: self.display_order.toggled(),
        }
    }

    pub fn status_text(&self) -> String {
        game_view::status_text(self.outcome(), self.is_draw(), self.next_mark())
    }

    pub fn view(&self) -> GameView {
        GameView::from_state(self)
    }

    pub fn summary(&self, indentation_level: usize) -> String {
        let leading_text = " ".repeat(indentation_level);
        format!(
            "{leading_text}Step {}/{}, {}, Board={}",
            self.current_step,
            self.latest_step(),
            self.status_text(),
            self.current_board(),
        )
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::at_start()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveRejection {
    GameAlreadyWon { winner: Mark },
    CellOccupied { cell_index: usize },
    InvalidLocation(LocationError),
    LocationMismatch {
        cell_index: usize,
        location: CellLocation,
    },
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::GameAlreadyWon { winner } => {
                write!(f, "{winner} won already; moves not accepted")
            }
            MoveRejection::CellOccupied { cell_index } => {
                write!(f, "cell {cell_index} is already taken")
            }
            MoveRejection::InvalidLocation(err) => write!(f, "{err}"),
            MoveRejection::LocationMismatch {
                cell_index,
                location,
            } => write!(f, "cell {cell_index} is not at {location}"),
        }
    }
}

impl std::error::Error for MoveRejection {}

impl From<LocationError> for MoveRejection {
    fn from(err: LocationError) -> Self {
        MoveRejection::InvalidLocation(err)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepOutOfRange {
    pub step: usize,
    pub history_len: usize,
}

impl fmt::Display for StepOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {} is outside the history (0..={})",
            self.step,
            self.history_len.saturating_sub(1)
        )
    }
}

impl std::error::Error for StepOutOfRange {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mark::Cell;

    fn play(state: &GameState, cell_indices: &[usize]) -> GameState {
        cell_indices.iter().fold(state.clone(), |state, &cell_index| {
            let location = CellLocation::from_index(cell_index).unwrap();
            state.apply_move_at(location)
        })
    }

    #[test]
    fn at_start_has_single_empty_snapshot() {
        let game = GameState::at_start();
        assert_eq!(game.history_len(), 1);
        assert_eq!(game.current_step, 0);
        assert!(game.history[0].is_initial());
        assert_eq!(game.current_board(), &Board::empty());
        assert_eq!(game.next_mark(), Mark::X);
        assert_eq!(game.display_order, DisplayOrder::Ascending);
        assert_eq!(game, GameState::default());
    }

    #[test]
    fn first_move_in_center_appends_snapshot() {
        let game = GameState::at_start().apply_move(4, 2, 2);

        assert_eq!(game.history_len(), 2);
        assert_eq!(game.current_step, 1);
        assert_eq!(game.history[1].board.cell(4), Some(Cell::Marked(Mark::X)));
        assert_eq!(game.history[1].location_text(), "(2/2)");
        assert_eq!(game.next_mark(), Mark::O);
    }

    #[test]
    fn alternating_moves_complete_top_row() {
        let game = play(&GameState::at_start(), &[0, 3, 1, 4, 2]);

        assert_eq!(
            game.outcome(),
            Outcome::Winner {
                mark: Mark::X,
                triple: [0, 1, 2]
            }
        );
        assert_eq!(game.status_text(), "Winner: X");
    }

    #[test]
    fn full_board_without_winner_is_draw() {
        // X O X / X O O / O X X
        let game = play(&GameState::at_start(), &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        assert_eq!(game.current_board().to_string(), "XOX/XOO/OXX");
        assert_eq!(game.outcome(), Outcome::NoWinner);
        assert!(game.is_draw());
        assert_eq!(game.status_text(), "Draw");

        let earlier = game.jump_to(4);
        assert!(!earlier.is_draw());
        assert_eq!(earlier.status_text(), "Next player: X");
    }

    #[test]
    fn move_from_earlier_step_discards_redo_branch() {
        let game = play(&GameState::at_start(), &[0, 4, 8, 2, 6]);
        assert_eq!(game.num_moves(), 5);
        assert!(!game.has_winner());

        let rewound = game.jump_to(3);
        assert_eq!(rewound.history_len(), 6);
        assert_eq!(rewound.next_mark(), Mark::O);
        assert!(rewound.current_board().is_empty_at(1));

        let branched = rewound.apply_move(1, 1, 2);
        assert_eq!(branched.num_moves(), 4);
        assert_eq!(branched.history_len(), 5);
        assert_eq!(branched.current_step, 4);
        assert_eq!(&branched.history[..4], &game.history[..4]);
        assert_eq!(branched.current_board().cell(1), Some(Cell::Marked(Mark::O)));
        assert!(branched.current_board().is_empty_at(2));
        assert!(branched.current_board().is_empty_at(6));
    }

    #[test]
    fn second_submission_of_same_cell_is_ignored() {
        let once = GameState::at_start().apply_move(4, 2, 2);
        let twice = once.apply_move(4, 2, 2);

        assert_eq!(twice, once);
        assert_eq!(
            once.check_move(4, 2, 2),
            Err(MoveRejection::CellOccupied { cell_index: 4 })
        );
    }

    #[test]
    fn moves_after_a_win_are_ignored() {
        let won = play(&GameState::at_start(), &[0, 3, 1, 4, 2]);
        let after = won.apply_move(8, 3, 3);

        assert_eq!(after.history_len(), won.history_len());
        assert_eq!(after, won);
        assert_eq!(
            won.check_move(8, 3, 3),
            Err(MoveRejection::GameAlreadyWon { winner: Mark::X })
        );
    }

    #[test]
    fn jump_remains_available_after_a_win() {
        let won = play(&GameState::at_start(), &[0, 3, 1, 4, 2]);
        let reviewed = won.jump_to(2);

        assert!(!reviewed.has_winner());
        assert_eq!(reviewed.history, won.history);
        assert_eq!(reviewed.next_mark(), Mark::X);
        assert!(!reviewed.is_viewing_latest());
    }

    #[test]
    fn jump_does_not_touch_history_or_order() {
        let game = play(&GameState::at_start(), &[4, 0, 8])
            .toggle_display_order()
            .jump_to(1);

        assert_eq!(game.current_step, 1);
        assert_eq!(game.history_len(), 4);
        assert_eq!(game.display_order, DisplayOrder::Descending);
        assert_eq!(game.next_mark(), Mark::O);
    }

    #[test]
    fn toggle_display_order_is_its_own_inverse() {
        let game = play(&GameState::at_start(), &[4, 0]).jump_to(1);
        let toggled = game.toggle_display_order();

        assert_eq!(toggled.display_order, DisplayOrder::Descending);
        assert_eq!(toggled.history, game.history);
        assert_eq!(toggled.current_step, game.current_step);
        assert_eq!(toggled.toggle_display_order(), game);
    }

    #[test]
    #[should_panic(expected = "jump to step 3")]
    fn jump_past_history_panics() {
        GameState::at_start().apply_move(0, 1, 1).jump_to(3);
    }

    #[test]
    fn try_jump_to_reports_out_of_range() {
        let game = GameState::at_start().apply_move(0, 1, 1);
        assert_eq!(
            game.try_jump_to(2),
            Err(StepOutOfRange {
                step: 2,
                history_len: 2
            })
        );
        assert_eq!(game.try_jump_to(0).map(|game| game.current_step), Ok(0));
    }

    #[test]
    fn malformed_cells_are_rejected_without_change() {
        let game = GameState::at_start();

        assert_eq!(
            game.check_move(9, 3, 3),
            Err(MoveRejection::InvalidLocation(
                LocationError::IndexOutOfRange { cell_index: 9 }
            ))
        );
        assert_eq!(
            game.check_move(0, 0, 1),
            Err(MoveRejection::InvalidLocation(LocationError::RowOutOfRange {
                row: 0
            }))
        );
        assert!(matches!(
            game.check_move(0, 2, 2),
            Err(MoveRejection::LocationMismatch { cell_index: 0, .. })
        ));
        assert_eq!(game.apply_move(9, 3, 3), game);
        assert_eq!(game.apply_move(0, 2, 2), game);
    }

    #[test]
    fn summary_mentions_step_and_status() {
        let game = GameState::at_start().apply_move(4, 2, 2);
        assert_eq!(
            game.summary(1),
            " Step 1/1, Next player: O, Board=.../.X./..."
        );
    }
}
