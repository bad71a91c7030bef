//! Queens command - Solve N-queens with tree search, enumeration and local search

use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, random, rngs::StdRng};

use crate::{
    cli::output::{
        create_trial_progress, format_duration, format_rate, print_kv, print_section,
        print_subsection,
    },
    config::LocalSearchConfig,
    problems::{
        QueensLocal, QueensPlacement,
        queens::{self, DEFAULT_SIZE, conflicts, render},
    },
    search::{
        LocalOutcome, Ranking, best_first, genetic, hill_climbing,
        hill_climbing_random_restarts, simulated_annealing,
    },
};

const ALL_METHODS: [LocalMethod; 4] = [
    LocalMethod::HillClimbing,
    LocalMethod::RandomRestarts,
    LocalMethod::Annealing,
    LocalMethod::Genetic,
];

#[derive(Parser, Debug)]
#[command(about = "Solve the N-queens problem")]
pub struct QueensArgs {
    #[command(subcommand)]
    pub command: QueensCommand,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum TreeAlgorithm {
    Astar,
    Greedy,
    /// Run both and compare
    Compare,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum LocalMethod {
    HillClimbing,
    /// Hill climbing from several random starts
    RandomRestarts,
    Annealing,
    Genetic,
    /// Run every method from the same start
    All,
}

#[derive(Subcommand, Debug)]
pub enum QueensCommand {
    /// Find the first solution with informed tree search
    First {
        #[arg(long, short = 'a', value_enum, default_value = "astar")]
        algorithm: TreeAlgorithm,

        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,
    },

    /// Enumerate every solution
    All {
        /// Explore columns in heuristic order
        #[arg(long)]
        guided: bool,

        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Number of solutions to print
        #[arg(long, default_value_t = 3)]
        show: usize,
    },

    /// Run local search from a fixed or random start
    Local {
        #[arg(long, short = 'm', value_enum, default_value = "all")]
        method: LocalMethod,

        /// Fixed start placement such as "04752613" (random when omitted)
        #[arg(long)]
        initial: Option<String>,

        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file with local search parameters
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare local search methods over many random starts
    Compare {
        #[arg(long, short = 't', default_value_t = 50)]
        trials: usize,

        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file with local search parameters
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn execute(args: QueensArgs) -> Result<()> {
    match args.command {
        QueensCommand::First { algorithm, size } => first(algorithm, size),
        QueensCommand::All { guided, size, show } => all(guided, size, show),
        QueensCommand::Local {
            method,
            initial,
            size,
            seed,
            config,
        } => {
            let config = load_config(config, seed)?;
            local(method, initial.as_deref(), size, &config)
        }
        QueensCommand::Compare {
            trials,
            size,
            seed,
            config,
        } => {
            let config = load_config(config, seed)?;
            compare(trials, size, &config)
        }
    }
}

fn load_config(path: Option<PathBuf>, seed: Option<u64>) -> Result<LocalSearchConfig> {
    let mut config = match path {
        Some(path) => LocalSearchConfig::from_json_file(&path)?,
        None => LocalSearchConfig::default(),
    };
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn seeded_rng(config: &LocalSearchConfig) -> StdRng {
    StdRng::seed_from_u64(config.seed.unwrap_or_else(random))
}

fn first(algorithm: TreeAlgorithm, size: usize) -> Result<()> {
    let problem = QueensPlacement::new(size);
    print_section(&format!("{size}-QUEENS: FIRST SOLUTION"));

    let rankings: &[Ranking] = match algorithm {
        TreeAlgorithm::Astar => &[Ranking::AStar],
        TreeAlgorithm::Greedy => &[Ranking::Greedy],
        TreeAlgorithm::Compare => &[Ranking::AStar, Ranking::Greedy],
    };

    for &ranking in rankings {
        print_subsection(&format!("{} search", ranking.name()));
        let start = Instant::now();
        let solution = best_first(&problem, ranking);
        let elapsed = start.elapsed();
        print_kv("Time", &format_duration(elapsed));
        match solution {
            Some(solution) => {
                print_kv("Nodes expanded", &solution.expanded.to_string());
                print_kv("Solution", &format!("{:?}", solution.state()));
                println!("{}", render(solution.state(), size));
            }
            None => println!("No solution found!"),
        }
    }

    Ok(())
}

fn all(guided: bool, size: usize, show: usize) -> Result<()> {
    print_section(&format!("{size}-QUEENS: ALL SOLUTIONS"));
    let start = Instant::now();
    let solutions = if guided {
        queens::all_solutions_guided(size)
    } else {
        queens::all_solutions(size)
    };
    let elapsed = start.elapsed();

    print_kv(
        "Strategy",
        if guided { "heuristic-guided DFS" } else { "DFS" },
    );
    print_kv("Solutions", &solutions.len().to_string());
    print_kv("Time", &format_duration(elapsed));

    for (i, solution) in solutions.iter().take(show).enumerate() {
        print_subsection(&format!("Solution #{}: {:?}", i + 1, solution));
        println!("{}", render(solution, size));
    }

    Ok(())
}

fn local(
    method: LocalMethod,
    initial: Option<&str>,
    size: usize,
    config: &LocalSearchConfig,
) -> Result<()> {
    let mut rng = seeded_rng(config);
    let problem = match initial {
        Some(text) => QueensLocal::new(queens::parse_placement(text, size)?),
        None => QueensLocal::random(size, &mut rng),
    };

    print_section(&format!("{size}-QUEENS: LOCAL SEARCH"));
    print_kv("Start", &format!("{:?}", problem.initial));
    print_kv("Start conflicts", &conflicts(&problem.initial).to_string());

    let methods: &[LocalMethod] = match method {
        LocalMethod::All => &ALL_METHODS,
        LocalMethod::HillClimbing => &[LocalMethod::HillClimbing],
        LocalMethod::RandomRestarts => &[LocalMethod::RandomRestarts],
        LocalMethod::Annealing => &[LocalMethod::Annealing],
        LocalMethod::Genetic => &[LocalMethod::Genetic],
    };

    for &method in methods {
        print_subsection(method_name(method));
        let start = Instant::now();
        let outcome = run_method(method, &problem, config, &mut rng);
        let elapsed = start.elapsed();

        print_kv("Time", &format_duration(elapsed));
        print_kv("Iterations", &outcome.iterations.to_string());
        print_kv("Conflicts", &conflicts(&outcome.state).to_string());
        print_kv(
            "Result",
            if outcome.is_goal {
                "solution found"
            } else {
                "stuck at a local optimum"
            },
        );
        println!("{}", render(&outcome.state, size));
    }

    Ok(())
}

fn compare(trials: usize, size: usize, config: &LocalSearchConfig) -> Result<()> {
    let mut rng = seeded_rng(config);
    let methods = ALL_METHODS;
    let mut successes = [0usize; ALL_METHODS.len()];
    let mut total_conflicts = [0usize; ALL_METHODS.len()];

    print_section(&format!("{size}-QUEENS: LOCAL SEARCH COMPARISON"));
    let progress = create_trial_progress(trials as u64)?;
    for _ in 0..trials {
        let problem = QueensLocal::random(size, &mut rng);
        for (i, &method) in methods.iter().enumerate() {
            let outcome = run_method(method, &problem, config, &mut rng);
            if outcome.is_goal {
                successes[i] += 1;
            }
            total_conflicts[i] += conflicts(&outcome.state);
        }
        progress.set_message(format!("{} hill-climbing solves", successes[0]));
        progress.inc(1);
    }
    progress.finish_and_clear();

    for (i, &method) in methods.iter().enumerate() {
        let mean_conflicts = if trials == 0 {
            0.0
        } else {
            total_conflicts[i] as f64 / trials as f64
        };
        print_kv(
            method_name(method),
            &format!(
                "success {} ({}/{}), mean conflicts {:.2}",
                format_rate(successes[i], trials),
                successes[i],
                trials,
                mean_conflicts
            ),
        );
    }

    Ok(())
}

fn method_name(method: LocalMethod) -> &'static str {
    match method {
        LocalMethod::HillClimbing => "Hill climbing",
        LocalMethod::RandomRestarts => "Random-restart hill climbing",
        LocalMethod::Annealing => "Simulated annealing",
        LocalMethod::Genetic => "Genetic algorithm",
        LocalMethod::All => "All methods",
    }
}

fn run_method(
    method: LocalMethod,
    problem: &QueensLocal,
    config: &LocalSearchConfig,
    rng: &mut StdRng,
) -> LocalOutcome<Vec<usize>> {
    match method {
        LocalMethod::HillClimbing | LocalMethod::All => {
            hill_climbing(problem, &config.hill_climbing)
        }
        LocalMethod::RandomRestarts => {
            hill_climbing_random_restarts(problem, &config.hill_climbing, rng)
        }
        LocalMethod::Annealing => simulated_annealing(problem, &config.annealing, rng),
        LocalMethod::Genetic => genetic(problem, &config.genetic, rng),
    }
}
