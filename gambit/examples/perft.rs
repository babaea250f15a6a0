/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use clap::Parser;

use gambit::{perft, splitperft, Game};

/// Compute total number of move paths available from a position, given a depth.
#[derive(Debug, Parser)]
struct Cli {
    /// Depth to run the perft.
    depth: usize,

    /// List of moves (such as `e2e4` or `e7e8q`) to apply to the starting position before running the perft.
    #[arg(required = false)]
    moves: Vec<String>,

    /// If set, perform a splitperft, displaying the number of nodes reachable after each move available from the root.
    #[arg(short, long, default_value = "false")]
    split: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut game = Game::default();

    // Apply moves, if any were provided
    for mv in &args.moves {
        game.make_move_uci(mv)?;
    }

    println!(
        "Computing PERFT({}) of the following position:\n{}\n",
        args.depth, game
    );

    let now = Instant::now();
    let total_nodes = if args.split {
        let split = splitperft(&mut game, args.depth);
        for (mv, nodes) in &split {
            println!("{mv}: {nodes}");
        }
        let nodes: u64 = split.iter().map(|(_, nodes)| nodes).sum();
        println!("\n{nodes}\n");
        nodes
    } else {
        perft(&mut game, args.depth)
    };

    let elapsed = now.elapsed();

    // Compute nodes-per-second metrics
    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let k_nps = nps / 1_000.0;

    println!("  Total Nodes:\t{total_nodes}");
    println!(" Elapsed Time:\t{elapsed:.1?}");
    println!("  Nodes / Sec:\t{nps:.0}");
    println!("K Nodes / Sec:\t{k_nps:.1}");

    Ok(())
}
