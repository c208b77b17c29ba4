#![warn(clippy::pedantic)]

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{
    eyre::{WrapErr, eyre},
    owo_colors::OwoColorize,
};
use cube_solver::{
    Cube, Face, Move, Solver, SolverConfig,
    moves::{format_sequence, parse_sequence},
    optimizer,
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};

const LINE_LENGTH: usize = 50;

/// Scrambles and solves 3x3 cubes
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The solver configuration file to use, in TOML format.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Seconds one solve may take. Overrides the configuration file.
    #[arg(long)]
    timeout: Option<f64>,

    /// Maximum search depth. Overrides the configuration file.
    #[arg(long)]
    max_depth: Option<usize>,

    /// The log level. Can be set zero to three times.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a random scramble
    Scramble {
        /// How many moves to scramble with
        #[arg(short, long, default_value_t = 20)]
        length: usize,
        /// Seed for a reproducible scramble
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Solve the cube reached by a scramble
    Solve {
        /// Moves to apply to a solved cube, e.g. "R U R' U'". A seeded random
        /// scramble is used when omitted.
        scramble: Option<String>,
        /// Seed of the random scramble
        #[arg(short, long, conflicts_with = "scramble")]
        seed: Option<u64>,
        /// Length of the random scramble
        #[arg(short, long, default_value_t = 5, conflicts_with = "scramble")]
        length: usize,
        /// One of "misplaced", "corner-edge" or "combined"
        #[arg(long, default_value = "corner-edge")]
        heuristic: String,
        /// Use the iterative-deepening search instead of the default pipeline
        #[arg(long)]
        deepening: bool,
    },
    /// Solve every scramble of a newline-delimited file. Blank lines and lines
    /// starting with `#` are skipped.
    Catalog {
        file: PathBuf,
        #[arg(long, default_value = "corner-edge")]
        heuristic: String,
    },
    /// Solve seeded scrambles and report success rate, time, and length
    Bench {
        /// Scramble lengths to try
        #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 3, 4])]
        lengths: Vec<usize>,
        /// Scrambles per length, seeded 42, 43, ...
        #[arg(short, long, default_value_t = 5)]
        runs: u64,
        #[arg(long, default_value = "corner-edge")]
        heuristic: String,
    },
    /// Print the net of the cube after a sequence of moves
    Show {
        /// Moves to apply to a solved cube
        #[arg(default_value = "")]
        scramble: String,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = load_config(cli.config.as_deref(), cli.timeout, cli.max_depth)?;
    info!("Using {config:?}");

    match cli.command {
        Commands::Scramble { length, seed } => {
            let seed = seed.unwrap_or_else(|| fastrand::u64(..));
            let scramble = Cube::new().scramble_seeded(length, seed);
            println!("{}", format_sequence(&scramble));
            println!("{}", format!("seed {seed}").dimmed());
        }
        Commands::Solve {
            scramble,
            seed,
            length,
            heuristic,
            deepening,
        } => {
            let mut cube = Cube::new();
            match scramble {
                Some(scramble) => {
                    cube.apply_notation(&scramble)?;
                }
                None => {
                    let seed = seed.unwrap_or_else(|| fastrand::u64(..));
                    let scramble = cube.scramble_seeded(length, seed);
                    println!("Scramble: {} (seed {seed})", format_sequence(&scramble));
                }
            }
            print_net(&cube);

            let mut solver = Solver::with_config(config);
            let solution = if deepening {
                solver.solve_iterative_deepening(&cube)
            } else {
                solver.solve(&cube, &heuristic)?
            };
            report(&cube, solution.as_deref(), &solver)?;
        }
        Commands::Catalog { file, heuristic } => run_catalog(&file, &heuristic, config)?,
        Commands::Bench {
            lengths,
            runs,
            heuristic,
        } => run_bench(&lengths, runs, &heuristic, config)?,
        Commands::Show { scramble } => {
            let mut cube = Cube::new();
            cube.apply_notation(&scramble)?;
            print_net(&cube);
            println!(
                "{}",
                Face::ALL
                    .iter()
                    .map(|&face| format!("{}={}", paint(face), face.color_name()))
                    .join(" ")
            );
            println!(
                "{}",
                if cube.is_solved() {
                    "Solved".green().to_string()
                } else {
                    "Not solved".yellow().to_string()
                }
            );
        }
    }

    Ok(())
}

fn load_config(
    path: Option<&Path>,
    timeout: Option<f64>,
    max_depth: Option<usize>,
) -> color_eyre::Result<SolverConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            toml::from_str::<SolverConfig>(&text)
                .wrap_err_with(|| format!("Invalid solver configuration in {}", path.display()))?
        }
        None => SolverConfig::default(),
    };
    if let Some(timeout) = timeout {
        config = config.with_timeout(
            Duration::try_from_secs_f64(timeout)
                .wrap_err("The timeout must be a non-negative number of seconds")?,
        );
    }
    if let Some(max_depth) = max_depth {
        config = config.with_max_depth(max_depth);
    }
    Ok(config)
}

/// Print a solve result. Any returned solution is re-applied to the cube and
/// rejected if it does not solve it.
fn report(cube: &Cube, solution: Option<&[Move]>, solver: &Solver) -> color_eyre::Result<()> {
    let Some(solution) = solution else {
        println!("{}", "No solution found".red());
        println!(
            "Try a longer --timeout (currently {:.1}s) or a larger --max-depth (currently {}).",
            solver.config().timeout.as_secs_f64(),
            solver.config().max_depth
        );
        println!("{}", solver.statistics());
        return Ok(());
    };

    verify(cube, solution)?;
    if solution.is_empty() {
        println!("{}", "Already solved".green());
    } else {
        println!("{}", "Solution:".green());
        println!("{}", optimizer::wrap_sequence(solution, LINE_LENGTH));
        let analysis = optimizer::analyze(solution);
        println!(
            "{} moves ({} unique): {} clockwise, {} counterclockwise, {} half turns",
            analysis.total_moves,
            analysis.unique_moves,
            analysis.clockwise,
            analysis.counter_clockwise,
            analysis.half
        );
        println!(
            "Faces: {}",
            Face::ALL
                .iter()
                .map(|&face| format!("{}={}", face.letter(), analysis.face_count(face)))
                .join(" ")
        );
    }
    if let Some(strategy) = solver.statistics().strategy {
        println!("Found by the {strategy} search");
    }
    println!("{}", solver.statistics());
    Ok(())
}

fn verify(cube: &Cube, solution: &[Move]) -> color_eyre::Result<()> {
    let mut check = *cube;
    check.apply_moves(solution);
    if check.is_solved() {
        Ok(())
    } else {
        Err(eyre!(
            "The solver returned {:?}, which does not solve the cube",
            format_sequence(solution)
        ))
    }
}

fn run_catalog(file: &Path, heuristic: &str, config: SolverConfig) -> color_eyre::Result<()> {
    let text =
        fs::read_to_string(file).wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let mut solver = Solver::with_config(config);
    let mut attempted = 0;
    let mut solved = 0;

    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let scramble = parse_sequence(line)
            .wrap_err_with(|| format!("{}:{}", file.display(), line_number + 1))?;
        let mut cube = Cube::new();
        cube.apply_moves(&scramble);

        attempted += 1;
        match solver.solve(&cube, heuristic)? {
            Some(solution) => {
                verify(&cube, &solution)?;
                solved += 1;
                println!(
                    "{} {} -> {}",
                    "✓".green(),
                    format_sequence(&scramble),
                    format_sequence(&solution)
                );
            }
            None => println!("{} {}", "✗".red(), format_sequence(&scramble)),
        }
        println!("  {}", solver.statistics().dimmed());
    }

    println!("Solved {solved} of {attempted} scrambles");
    if solved < attempted {
        println!("Try a longer --timeout or a larger --max-depth for the rest.");
    }
    Ok(())
}

fn run_bench(
    lengths: &[usize],
    runs: u64,
    heuristic: &str,
    config: SolverConfig,
) -> color_eyre::Result<()> {
    let mut solver = Solver::with_config(config);
    println!("Benchmarking scramble lengths {}", lengths.iter().join(", "));

    for &length in lengths {
        let mut solved: u32 = 0;
        let mut total_time = Duration::ZERO;
        let mut total_length = 0;
        for run in 0..runs {
            let mut cube = Cube::new();
            cube.scramble_seeded(length, 42 + run);
            let solution = solver.solve(&cube, heuristic)?;
            total_time += solver.statistics().solve_time;
            if let Some(solution) = solution {
                verify(&cube, &solution)?;
                solved += 1;
                total_length += solution.len();
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let success_rate = if runs == 0 {
            0.0
        } else {
            f64::from(solved) / runs as f64 * 100.0
        };
        #[allow(clippy::cast_precision_loss)]
        let mean_length = if solved == 0 {
            0.0
        } else {
            total_length as f64 / f64::from(solved)
        };
        let mean_time = u32::try_from(runs)
            .ok()
            .filter(|&runs| runs > 0)
            .map_or(Duration::ZERO, |runs| total_time / runs);
        println!(
            "Length {length:>2}: {solved}/{runs} solved ({success_rate:.1}%), mean time {:.3}s, mean solution length {mean_length:.1}",
            mean_time.as_secs_f64()
        );
    }
    Ok(())
}

fn paint(face: Face) -> String {
    let letter = face.letter();
    match face {
        Face::Front => letter.white().to_string(),
        Face::Right => letter.red().to_string(),
        Face::Back => letter.blue().to_string(),
        Face::Left => letter.truecolor(255, 165, 0).to_string(),
        Face::Up => letter.green().to_string(),
        Face::Down => letter.yellow().to_string(),
    }
}

/// Print the unfolded cube: Up above the side faces, Down below them.
fn print_net(cube: &Cube) {
    let row = |face: Face, row: usize| {
        cube.grid(face)[row]
            .iter()
            .map(|&label| paint(label))
            .join(" ")
    };
    let indent = " ".repeat(7);

    for r in 0..3 {
        println!("{indent}{}", row(Face::Up, r));
    }
    for r in 0..3 {
        println!(
            "{}",
            [Face::Left, Face::Front, Face::Right, Face::Back]
                .iter()
                .map(|&face| row(face, r))
                .join("  ")
        );
    }
    for r in 0..3 {
        println!("{indent}{}", row(Face::Down, r));
    }
}
