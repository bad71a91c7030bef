//! Tictactoe command - Play against negamax or watch two searches play

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    cli::output::{print_kv, print_section},
    game::{AiPlayer, CallbackPlayer, Game, MatchOutcome, Player, play_match},
    tictactoe::{Board, Mark, parse_move},
};

#[derive(Parser, Debug)]
#[command(about = "Play tic-tac-toe against a negamax agent")]
pub struct TictactoeArgs {
    #[command(subcommand)]
    pub command: TictactoeCommand,
}

#[derive(Subcommand, Debug)]
pub enum TictactoeCommand {
    /// Play against the computer at the terminal
    Play {
        /// Search depth of the computer player
        #[arg(long, default_value_t = 9)]
        ai_depth: u32,

        /// Take X and move first
        #[arg(long)]
        human_first: bool,
    },

    /// Watch two computer players of different strength
    Demo {
        #[arg(long, default_value_t = 9)]
        x_depth: u32,

        #[arg(long, default_value_t = 5)]
        o_depth: u32,
    },
}

pub fn execute(args: TictactoeArgs) -> Result<()> {
    match args.command {
        TictactoeCommand::Play {
            ai_depth,
            human_first,
        } => play(ai_depth, human_first),
        TictactoeCommand::Demo { x_depth, o_depth } => demo(x_depth, o_depth),
    }
}

fn play(ai_depth: u32, human_first: bool) -> Result<()> {
    print_section("TIC-TAC-TOE");
    println!("Enter moves as row,col (0-2), e.g. 1,1 for the center. q quits.");

    let mut board = Board::new();
    println!("{}", board.render_grid());

    let human_mark = if human_first { Mark::X } else { Mark::O };
    let mut computer = AiPlayer::new(format!("Negamax({ai_depth})"), ai_depth);
    let stdin = io::stdin();
    let mut human = CallbackPlayer::new("You", move |board: &Board| {
        prompt_move(board, &mut stdin.lock())
    });

    let players: [&mut dyn Player<Board>; 2] = if human_first {
        [&mut human, &mut computer]
    } else {
        [&mut computer, &mut human]
    };

    let outcome = play_match(&mut board, players, |board, &mv| {
        // The mover is the opponent of the side now to move.
        let mover = board.to_move.opponent();
        println!("\n{mover} plays {},{}", mv / 3, mv % 3);
        println!("{}", board.render_grid());
    });

    report(&board, &outcome, |mark| {
        if mark == human_mark {
            "You win!".to_string()
        } else {
            "The computer wins.".to_string()
        }
    });
    Ok(())
}

/// Read lines until one names a free cell. `None` on end of input or `q`.
fn prompt_move(board: &Board, input: &mut impl BufRead) -> Option<usize> {
    let legal = board.legal_moves();
    loop {
        print!("Your move ({}): ", board.to_move);
        // A failed flush only delays the prompt.
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        if line.trim().eq_ignore_ascii_case("q") {
            return None;
        }
        match parse_move(&line) {
            Ok(pos) if legal.contains(&pos) => return Some(pos),
            Ok(pos) => println!("Cell {},{} is taken.", pos / 3, pos % 3),
            Err(err) => println!("{err}"),
        }
    }
}

fn demo(x_depth: u32, o_depth: u32) -> Result<()> {
    print_section("TIC-TAC-TOE: COMPUTER VS COMPUTER");
    print_kv("X", &format!("Negamax depth {x_depth}"));
    print_kv("O", &format!("Negamax depth {o_depth}"));

    let mut board = Board::new();
    let mut x = AiPlayer::new("X", x_depth);
    let mut o = AiPlayer::new("O", o_depth);

    let outcome = play_match(&mut board, [&mut x, &mut o], |board, &mv| {
        let mover = board.to_move.opponent();
        println!("\n{mover} plays {},{}", mv / 3, mv % 3);
        println!("{}", board.render_grid());
    });

    report(&board, &outcome, |mark| format!("{mark} wins."));
    Ok(())
}

fn report(board: &Board, outcome: &MatchOutcome<usize>, announce: impl Fn(Mark) -> String) {
    match outcome.winner {
        Some(side) => println!("{}", announce(Mark::from_side(side))),
        None if board.is_draw() => println!("It's a draw."),
        None => println!("Game abandoned after {} moves.", outcome.moves.len()),
    }
}
