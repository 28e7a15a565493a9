pub mod board;
pub mod display_order;
pub mod game_state;
pub mod game_view;
pub mod mark;
pub mod rule_helper;
pub mod snapshot;
pub mod win_detector;
