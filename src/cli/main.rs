// the terminal front end only exists off wasm; the browser drives `GameHandle` instead
#![cfg_attr(target_arch = "wasm32", allow(dead_code, unused_imports))]

#[cfg(not(target_arch = "wasm32"))]
mod session;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use std::num::ParseIntError;
#[cfg(not(target_arch = "wasm32"))]
use session::{Session, SessionConfig};
#[cfg(not(target_arch = "wasm32"))]
use tic_tac_toe_rust::core::display_order::DisplayOrder;
#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(name = "ttt_cli", about = "Tic-tac-toe in the terminal, with a jumpable move history")]
struct Cli {
    /// List moves newest first
    #[arg(long)]
    descending: bool,

    /// Disable colors and text styling
    #[arg(long)]
    plain: bool,

    /// Tracing filter, e.g. `debug` or `tic_tac_toe_rust=trace` (defaults to RUST_LOG, then `warn`)
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,

    /// Cell indices (0-8) to play before reading directives, separated by commas or spaces
    #[arg(long, value_name = "CELLS", num_args = 1.., value_parser = parse_cell_list)]
    moves: Vec<CellList>,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, PartialEq, Eq)]
struct CellList(Vec<usize>);

#[cfg(not(target_arch = "wasm32"))]
fn parse_cell_list(text: &str) -> Result<CellList, ParseIntError> {
    text.split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse::<usize>)
        .collect::<Result<Vec<_>, _>>()
        .map(CellList)
}

#[cfg(not(target_arch = "wasm32"))]
impl Cli {
    fn initial_moves(&self) -> Vec<usize> {
        self.moves
            .iter()
            .flat_map(|cell_list| cell_list.0.iter().copied())
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    let initial_moves = cli.initial_moves();

    let config = SessionConfig {
        display_order: if cli.descending {
            DisplayOrder::Descending
        } else {
            DisplayOrder::Ascending
        },
        use_styling: !cli.plain,
        initial_moves,
    };

    println!("program begin");
    let mut session = Session::new(config);
    session.start();
    println!("program end");
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
