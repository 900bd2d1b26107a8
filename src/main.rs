//! Terminal host for the checkers engine.
//!
//! Reads board coordinates from stdin, forwards them to the engine as clicks
//! and prints the board after every change.

use std::io::{self, Write};

use checkers_engine::{movelist, new_game, GameState, SelectOutcome};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

enum InputKind {
    Exit,
    Newgame,
    Help,
    Show,
    Moves,
    SetOption(String, bool),
    Click(usize, usize),
    Error,
}

/// Parses "<row> <col>", "<row>,<col>" or "<row><col>".
fn parse_click(s: &str) -> Option<(usize, usize)> {
    let numbers: Vec<&str> = s
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|part| !part.is_empty())
        .collect();
    match numbers.as_slice() {
        [row, col] => Some((row.parse().ok()?, col.parse().ok()?)),
        [both] if both.len() == 2 && both.chars().all(|ch| ch.is_ascii_digit()) => {
            let (row, col) = both.split_at(1);
            Some((row.parse().ok()?, col.parse().ok()?))
        }
        _ => None,
    }
}

impl From<&str> for InputKind {
    fn from(s: &str) -> Self {
        if let Some((row, col)) = parse_click(s) {
            return Self::Click(row, col);
        }
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            ["exit"] | ["quit"] => Self::Exit,
            ["newgame"] | ["ng"] => Self::Newgame,
            ["help"] => Self::Help,
            ["board"] => Self::Show,
            ["moves"] => Self::Moves,
            ["option", name, "on"] => Self::SetOption(name.to_string(), true),
            ["option", name, "off"] => Self::SetOption(name.to_string(), false),
            _ => Self::Error,
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("<row> <col> => Click a square. Pick up a piece, then click a marked square.");
    println!("moves => List the moves available to the player to move.");
    println!("board => Print the board.");
    println!("option deselect on|off => Clicking elsewhere drops the picked up piece.");
    println!("option blocked on|off => A player who cannot move loses.");
    println!("newgame | ng => Begin a new game.");
    println!("help => Print this help text.");
    println!("exit => end CLI.");
    println!("\nRow 0 is at the bottom. Player 1 (x) starts there, Player 2 (o) at the top.");
    println!("Kings are X and O. Candidate squares show + or * if the piece would be crowned.");
}

fn set_option(game: &mut GameState, name: &str, value: bool) -> bool {
    let mut options = *game.options();
    match name {
        "deselect" => options.deselect_on_miss = value,
        "blocked" => options.blocked_player_loses = value,
        _ => return false,
    }
    game.set_options(options);
    info!(option = name, value, "option set");
    true
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    println!("Checkers CLI 0.1.0\n");
    println!("Type help for a list of commands.\n");
    let mut game = new_game();
    let mut input = String::new();
    println!("{}", game);

    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let (row, col) = match InputKind::from(input.trim()) {
            InputKind::Exit => break,
            InputKind::Newgame => {
                let options = *game.options();
                game = new_game().with_options(options);
                println!("Starting new game...\n{}", game);
                continue;
            }
            InputKind::Help => {
                print_help();
                continue;
            }
            InputKind::Show => {
                println!("{}", game);
                continue;
            }
            InputKind::Moves => {
                for square in game.movable_pieces() {
                    println!("{square}: {}", movelist::display(&game.legal_moves_for(square)));
                }
                continue;
            }
            InputKind::SetOption(name, value) => {
                if !set_option(&mut game, &name, value) {
                    println!("Unknown option: {name}");
                }
                continue;
            }
            InputKind::Error => {
                println!("Invalid command: {}", input.trim());
                continue;
            }
            InputKind::Click(row, col) => (row, col),
        };

        match game.select_square(row, col) {
            Ok(SelectOutcome::Ignored) => println!("Nothing to do on ({row}, {col})."),
            Ok(SelectOutcome::Deselected) => println!("{}", game),
            Ok(SelectOutcome::Selected { .. }) => println!("{}", game),
            Ok(SelectOutcome::Moved(move_info)) => {
                println!("Played {move_info}.");
                if move_info.continues() {
                    println!("Keep jumping!");
                }
                println!("{}", game);
                if let Some(winner) = game.winner() {
                    println!("{winner} wins! Type newgame to play again.");
                }
            }
            Err(err) => {
                debug!(%err, row, col, "click rejected");
                println!("({row}, {col}) is not a square on the board.");
            }
        }
    }
    Ok(())
}
