//! Puzzle command - Solve the 8-puzzle with informed search

use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};

use crate::{
    cli::output::{format_duration, print_kv, print_section, print_subsection},
    problems::{EightPuzzle, Slide, Tiles},
    search::{Ranking, SearchProblem, Solution, best_first},
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PuzzleAlgorithm {
    Astar,
    Greedy,
    /// Run both and compare
    Compare,
}

#[derive(Parser, Debug)]
#[command(about = "Solve the 8-puzzle with A* or greedy search")]
pub struct PuzzleArgs {
    /// Search algorithm
    #[arg(long, short = 'a', value_enum, default_value = "astar")]
    pub algorithm: PuzzleAlgorithm,

    /// Start layout, row-major, 0 or _ for the blank
    #[arg(long, default_value = "283164705")]
    pub initial: String,

    /// Goal layout, row-major, 0 or _ for the blank
    #[arg(long, default_value = "123804765")]
    pub goal: String,

    /// Print every intermediate board
    #[arg(long)]
    pub show_path: bool,
}

pub fn execute(args: PuzzleArgs) -> Result<()> {
    let initial = Tiles::from_string(&args.initial)?;
    let goal = Tiles::from_string(&args.goal)?;
    if !initial.is_solvable_to(&goal) {
        bail!("goal {} is unreachable from {}", args.goal, args.initial);
    }
    let problem = EightPuzzle::new(initial, goal);

    print_section("8-PUZZLE SOLVER");
    println!("Initial:\n{initial}");
    println!("Goal:\n{goal}");
    print_kv(
        "Manhattan distance",
        &format!("{}", problem.heuristic(&initial)),
    );

    match args.algorithm {
        PuzzleAlgorithm::Astar => {
            solve(&problem, Ranking::AStar, args.show_path);
        }
        PuzzleAlgorithm::Greedy => {
            solve(&problem, Ranking::Greedy, args.show_path);
        }
        PuzzleAlgorithm::Compare => {
            let astar = solve(&problem, Ranking::AStar, args.show_path);
            let greedy = solve(&problem, Ranking::Greedy, args.show_path);
            print_comparison(&astar, &greedy);
        }
    }

    Ok(())
}

type Run = (Option<Solution<Tiles, Slide>>, Duration);

fn solve(problem: &EightPuzzle, ranking: Ranking, show_path: bool) -> Run {
    print_subsection(&format!("Solving with {}", ranking.name()));
    let start = Instant::now();
    let solution = best_first(problem, ranking);
    let elapsed = start.elapsed();

    match &solution {
        Some(solution) => {
            print_kv("Time", &format_duration(elapsed));
            print_kv("Path length", &solution.len().to_string());
            print_kv("Total cost", &solution.cost.to_string());
            print_kv("Nodes expanded", &solution.expanded.to_string());
            print_kv(
                "Moves",
                &solution
                    .actions()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" "),
            );
            if show_path {
                for (step, (action, tiles)) in solution.path.iter().enumerate() {
                    match action {
                        Some(action) => println!("\nStep {step}: {action}\n{tiles}"),
                        None => println!("\nInitial\n{tiles}"),
                    }
                }
            }
        }
        None => println!("{} could not find a solution", ranking.name()),
    }

    (solution, elapsed)
}

fn print_comparison(astar: &Run, greedy: &Run) {
    print_section("COMPARISON SUMMARY");
    for (name, (solution, elapsed)) in [("A*", astar), ("Greedy", greedy)] {
        let summary = match solution {
            Some(solution) => format!(
                "{} steps, cost {}, {} expanded, {}",
                solution.len(),
                solution.cost,
                solution.expanded,
                format_duration(*elapsed)
            ),
            None => "no solution".to_string(),
        };
        print_kv(name, &summary);
    }
}
