use crossterm::style::Stylize;
use itertools::Itertools;
use std::fmt;
use std::io::{self, Write};
use std::num::ParseIntError;
use tic_tac_toe_rust::core::{
    board::{CellLocation, LocationError},
    display_order::DisplayOrder,
    game_state::GameState,
    game_view::GameView,
    rule_helper::BOARD_SIDE,
};
use tracing::warn;

const TAG_QUIT: &str = "q";
const TAG_DISPLAY: &str = "d";
const TAG_HISTORY: &str = "h";
const TAG_JUMP: &str = "j";
const TAG_JUMP_LONG: &str = "jump";
const TAG_SORT: &str = "s";
const TAG_SORT_LONG: &str = "sort";

pub struct SessionConfig {
    pub display_order: DisplayOrder,
    pub use_styling: bool,
    pub initial_moves: Vec<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    Quit,
    Display,
    History,
    ToggleSort,
    Jump(usize),
    Move(CellLocation),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveError {
    Unrecognized { directive: String },
    MissingArgument { tag: &'static str },
    BadNumber(ParseIntError),
    BadLocation(LocationError),
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveError::Unrecognized { directive } => {
                write!(f, "unrecognized directive '{directive}'")
            }
            DirectiveError::MissingArgument { tag } => {
                write!(f, "directive {tag} needs a step number")
            }
            DirectiveError::BadNumber(err) => write!(f, "failed number parse: {err}"),
            DirectiveError::BadLocation(err) => write!(f, "bad cell: {err}"),
        }
    }
}

impl std::error::Error for DirectiveError {}

impl From<ParseIntError> for DirectiveError {
    fn from(err: ParseIntError) -> Self {
        DirectiveError::BadNumber(err)
    }
}

impl From<LocationError> for DirectiveError {
    fn from(err: LocationError) -> Self {
        DirectiveError::BadLocation(err)
    }
}

pub struct Session {
    game: GameState,
    use_styling: bool,
    initial_moves: Vec<usize>,
    should_quit: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            game: GameState::with_display_order(config.display_order),
            use_styling: config.use_styling,
            initial_moves: config.initial_moves,
            should_quit: false,
        }
    }

    pub fn start(&mut self) {
        self.apply_initial_moves();
        self.print_game();
        self.interpretation_loop();
    }

    fn apply_initial_moves(&mut self) {
        let initial_moves = std::mem::take(&mut self.initial_moves);
        for cell_index in initial_moves {
            match CellLocation::from_index(cell_index) {
                Ok(location) => self.do_move(location, false),
                Err(err) => println!("  skipping initial move: {err}"),
            }
        }
    }

    fn interpretation_loop(&mut self) {
        let stdin = io::stdin();

        loop {
            self.write_prompt(&mut io::stdout());

            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) => return,
                Ok(_) => {
                    let line = line.trim_end_matches(['\r', '\n']);
                    for subline in line.split(';') {
                        self.interpret_directive(subline);
                        if self.should_quit {
                            return;
                        }
                    }
                }
                Err(_) => return,
            }
        }
    }

    fn write_prompt(&self, out: &mut impl Write) {
        let prompt = self.user_prompt_text();
        if let Err(err) = write!(out, "{prompt}").and_then(|()| out.flush()) {
            warn!(%err, "failed to show prompt");
        }
    }

    fn interpret_directive(&mut self, directive: &str) {
        match parse_directive(directive) {
            Ok(None) => {}
            Ok(Some(Directive::Quit)) => self.should_quit = true,
            Ok(Some(Directive::Display)) => {
                let view = self.game.view();
                println!("{}", self.render_board(&view));
                println!("  {}", view.status);
            }
            Ok(Some(Directive::History)) => {
                println!("{}", self.render_moves(&self.game.view()));
            }
            Ok(Some(Directive::ToggleSort)) => {
                self.game = self.game.toggle_display_order();
                println!("(SORT {})", self.game.display_order);
                self.print_game();
            }
            Ok(Some(Directive::Jump(step))) => match self.game.try_jump_to(step) {
                Ok(game) => {
                    println!("(JUMP {step})");
                    self.game = game;
                    self.print_game();
                }
                Err(err) => println!("  invalid jump: {err}"),
            },
            Ok(Some(Directive::Move(location))) => self.do_move(location, true),
            Err(err) => {
                println!("  {err}");
                if matches!(err, DirectiveError::Unrecognized { .. }) {
                    for explanation in help_lines() {
                        println!("  {explanation}");
                    }
                }
            }
        }
    }

    fn do_move(&mut self, location: CellLocation, should_print: bool) {
        if let Err(rejection) = self.game.check_move_at(location) {
            println!("  move ignored: {rejection}");
            return;
        }

        self.game = self.game.apply_move_at(location);
        if should_print {
            self.print_game();
        }
    }

    fn print_game(&self) {
        let view = self.game.view();
        println!("{}", self.render_board(&view));
        println!("  {}", view.status);
        println!("{}", self.render_moves(&view));
    }

    fn render_board(&self, view: &GameView) -> String {
        view.cells
            .chunks(BOARD_SIDE)
            .enumerate()
            .map(|(row_idx, row)| {
                let cells_text = row
                    .iter()
                    .enumerate()
                    .map(|(col_idx, label)| {
                        let cell_index = row_idx * BOARD_SIDE + col_idx;
                        self.render_cell(view, cell_index, label)
                    })
                    .join("|");
                format!("  {cells_text}")
            })
            .join("\n  ---+---+---\n")
    }

    fn render_cell(&self, view: &GameView, cell_index: usize, label: &str) -> String {
        let is_empty = label.is_empty();
        let text = if is_empty {
            format!(" {cell_index} ")
        } else {
            format!(" {label} ")
        };

        if !self.use_styling {
            return text;
        }

        if view.is_highlighted(cell_index) {
            text.bold().green().to_string()
        } else if is_empty {
            text.dark_grey().to_string()
        } else {
            text
        }
    }

    fn render_moves(&self, view: &GameView) -> String {
        view.moves
            .iter()
            .map(|entry| {
                let line = format!(
                    "{:>2}. {} {}",
                    entry.step, entry.description, entry.location_text
                );
                let line = line.trim_end().to_string();
                match (entry.is_active, self.use_styling) {
                    (true, true) => format!("  > {}", line.bold()),
                    (true, false) => format!("  > {line}"),
                    (false, _) => format!("    {line}"),
                }
            })
            .join("\n")
    }

    fn user_prompt_text(&self) -> String {
        let step_text = if self.game.is_viewing_latest() {
            String::new()
        } else {
            format!("@{}/{}", self.game.current_step, self.game.latest_step())
        };

        if let Some(winner) = self.game.outcome().winner() {
            format!("{winner} WON{step_text}> ")
        } else if self.game.is_draw() {
            format!("DRAW{step_text}> ")
        } else {
            format!("{}{step_text}> ", self.game.next_mark())
        }
    }
}

fn without_comments(directive: &str) -> String {
    let mut working = directive.to_string();
    while let Some(start_idx) = working.find('(') {
        if let Some(end_rel) = working[start_idx..].find(')') {
            let end_idx = start_idx + end_rel;
            working.replace_range(start_idx..=end_idx, "");
        } else {
            working.truncate(start_idx);
            break;
        }
    }
    working
}

pub fn parse_directive(directive: &str) -> Result<Option<Directive>, DirectiveError> {
    let directive = without_comments(directive);
    let tokens = directive.split_whitespace().collect::<Vec<_>>();
    let Some(first_token) = tokens.first() else {
        return Ok(None);
    };
    let directive_tag = first_token.to_lowercase();

    if directive_tag == TAG_QUIT {
        Ok(Some(Directive::Quit))
    } else if directive_tag == TAG_DISPLAY {
        Ok(Some(Directive::Display))
    } else if directive_tag == TAG_HISTORY {
        Ok(Some(Directive::History))
    } else if directive_tag == TAG_SORT || directive_tag == TAG_SORT_LONG {
        Ok(Some(Directive::ToggleSort))
    } else if directive_tag == TAG_JUMP || directive_tag == TAG_JUMP_LONG {
        let step_token = tokens
            .get(1)
            .ok_or(DirectiveError::MissingArgument { tag: TAG_JUMP })?;
        Ok(Some(Directive::Jump(step_token.parse::<usize>()?)))
    } else if directive_tag.starts_with(|ch: char| ch.is_ascii_digit()) {
        Ok(Some(Directive::Move(parse_location(&tokens.join(""))?)))
    } else {
        Err(DirectiveError::Unrecognized {
            directive: directive.trim().to_string(),
        })
    }
}

/// Either a cell index (`4`) or a one-based row and column (`2,2` or `2/2`).
fn parse_location(token: &str) -> Result<CellLocation, DirectiveError> {
    let subtokens = token.split([',', '/']).collect::<Vec<_>>();
    match subtokens.as_slice() {
        [cell_index] => Ok(CellLocation::from_index(cell_index.parse::<usize>()?)?),
        [row, col] => Ok(CellLocation::new(
            row.parse::<usize>()?,
            col.parse::<usize>()?,
        )?),
        _ => Err(DirectiveError::Unrecognized {
            directive: token.to_string(),
        }),
    }
}

fn help_lines() -> Vec<&'static str> {
    let mut explanations = vec![
        "[0-8]   | mark the cell with that index",
        "[row],[col] | mark the cell at one-based row and column",
        "d       | display board and status",
        "h       | display move list",
        "jump/j [step] | view the board as of that step",
        "q       | quit",
        "sort/s  | toggle move list order",
    ];
    explanations.sort();
    explanations
}
