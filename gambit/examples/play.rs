/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{self, BufRead, Write};

use clap::Parser;
use colored::Colorize;

use gambit::{Game, GameStatus, Player, Promotion, Square};

/// Play a game of chess between two people at the same terminal.
#[derive(Debug, Parser)]
struct Cli {
    /// Promote to a Queen without asking, unless a move names its promotion (`e7e8n`).
    #[arg(short, long, default_value = "false")]
    auto_queen: bool,

    /// Disable colored output.
    #[arg(long, default_value = "false")]
    no_color: bool,
}

const HELP: &str = "\
Commands:
  e2e4, e7e8n   make a move (the fifth letter picks a promotion)
  moves <sq>    list the legal destinations of the piece on <sq>
  undo          take back the last move
  reset         start over
  log           show the moves made so far
  board         show the board again
  help          show this message
  quit          leave";

/// Draws the board with White at the bottom, highlighting the squares of the last move.
fn render(game: &Game) -> String {
    let last = game.last_move().map(|record| (record.from(), record.to()));
    let mut out = String::new();

    for row in 0..8 {
        out.push_str(&format!("{} ", 8 - row));
        for col in 0..8 {
            let square = Square::new_unchecked(row, col);
            let cell = match game.piece_at(square) {
                Some(piece) if piece.owner() == Player::White => {
                    format!(" {} ", piece.char()).bold().bright_white()
                }
                Some(piece) => format!(" {} ", piece.char()).bold().red(),
                None => "   ".normal(),
            };

            let highlighted = last.is_some_and(|(from, to)| square == from || square == to);
            let cell = match (highlighted, (row + col) % 2 == 0) {
                (true, _) => cell.on_yellow(),
                (false, true) => cell.on_bright_black(),
                (false, false) => cell.on_black(),
            };
            out.push_str(&cell.to_string());
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h");

    out
}

fn announce(game: &Game) {
    println!("{}\n", render(game));

    let player = game.side_to_move();
    match game.status() {
        GameStatus::InProgress => println!("{player} to move"),
        GameStatus::Check => println!("{}", format!("{player} is in check").yellow()),
        status @ GameStatus::Checkmate { .. } => println!("{}", status.to_string().green().bold()),
        GameStatus::Stalemate => println!("{}", "Stalemate".green().bold()),
    }
}

/// Asks at the terminal which piece a Pawn becomes. Anything unrecognized means a Queen.
fn ask_promotion(player: Player, square: Square) -> Option<Promotion> {
    print!("{player} promotes on {square}. Choose Q, R, B or N [Q]: ");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok()?;
    line.trim().parse().ok()
}

fn make_move(game: &mut Game, input: &str, auto_queen: bool) -> anyhow::Result<()> {
    let record = if input.len() == 4 && input.is_ascii() && !auto_queen {
        let from = Square::from_uci(&input[0..2])?;
        let to = Square::from_uci(&input[2..4])?;
        game.apply_move(from, to, &mut ask_promotion)?
    } else {
        game.make_move_uci(input)?
    };

    println!("{} played {}", record.player(), record.to_string().bold());
    Ok(())
}

fn list_moves(game: &Game, square: &str) -> anyhow::Result<()> {
    let square = Square::from_uci(square)?;
    let Some(piece) = game.piece_at(square) else {
        println!("There is no piece on {square}");
        return Ok(());
    };

    let moves = game.legal_moves(square);
    if moves.is_empty() {
        println!("The {} {} on {square} has no legal moves", piece.owner(), piece.kind());
    } else {
        let list: Vec<_> = moves.iter().map(Square::to_uci).collect();
        println!("{square}: {}", list.join(" "));
    }

    Ok(())
}

fn print_log(game: &Game) {
    for player in Player::all() {
        let log: Vec<_> = game.move_log(player).collect();
        println!("{player:>5}: {}", log.join(", "));
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut game = Game::default();
    println!("{HELP}\n");
    announce(&game);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut words = line.split_ascii_whitespace();
        let result = match (words.next(), words.next()) {
            (None, _) => continue,
            (Some("quit" | "exit"), _) => break,
            (Some("help"), _) => {
                println!("{HELP}");
                continue;
            }
            (Some("board"), _) => {
                announce(&game);
                continue;
            }
            (Some("log"), _) => {
                print_log(&game);
                continue;
            }
            (Some("moves"), Some(square)) => {
                if let Err(e) = list_moves(&game, square) {
                    eprintln!("{}", e.to_string().red());
                }
                continue;
            }
            (Some("undo"), _) => game
                .undo_last_move()
                .map(|record| println!("Took back {record}"))
                .map_err(anyhow::Error::from),
            (Some("reset"), _) => {
                game.reset();
                Ok(())
            }
            (Some(mv), None) => make_move(&mut game, mv, args.auto_queen),
            (Some(other), Some(_)) => Err(anyhow::anyhow!("Unknown command {other:?}")),
        };

        match result {
            Ok(()) => announce(&game),
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }

    Ok(())
}
