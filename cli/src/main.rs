use clap::{Parser, Subcommand};
use crossterm::style::{Color as TermColor, SetBackgroundColor};

use twophase::cubie::CubieCube;
use twophase::error::Error;
use twophase::facelet::{Color, FaceCube};
use twophase::scramble::{random_scramble, scramble_from_str, scramble_to_str};
use twophase::solver::{self, SolverConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "solves the cube using two-phase algorithm")]
    #[clap(group(
    clap::ArgGroup::new("state")
        .required(true)
        .args(&["scramble", "facelet"]),
    ))]
    Solve {
        #[arg(short, long)]
        scramble: Option<String>,

        #[arg(short, long)]
        facelet: Option<String>,

        #[arg(long, default_value_t = 18)]
        max_phase1: u8,

        #[arg(long, default_value_t = 18)]
        max_phase2: u8,

        #[arg(short, long)]
        json: bool,

        #[arg(short, long)]
        preview: bool,
    },

    #[command(about = "generates random-state scrambles")]
    Scramble {
        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(short = 'n', long, default_value_t = 1)]
        count: u64,

        #[arg(short, long)]
        json: bool,

        #[arg(short, long)]
        preview: bool,
    },
}

fn solve(
    scramble: &Option<String>,
    facelet: &Option<String>,
    max_phase1: u8,
    max_phase2: u8,
    json: bool,
    preview: bool,
) -> Result<(), Error> {
    let state = if let Some(scramble) = scramble {
        let scramble = scramble_from_str(scramble)?;
        CubieCube::from(&scramble)
    } else if let Some(facelet) = facelet {
        let fc = FaceCube::try_from(facelet.as_str())?;
        CubieCube::try_from(&fc)?
    } else {
        return Ok(());
    };

    if preview {
        print_facelet(&FaceCube::try_from(&state)?);
    }

    let config = SolverConfig {
        max_phase1_depth: max_phase1,
        max_phase2_depth: max_phase2,
        ..SolverConfig::default()
    };
    let solution = solver::solve_with(&state, &config)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "solution": scramble_to_str(&solution.solution),
                "length": solution.solution.len(),
                "phase1": scramble_to_str(&solution.phase1),
                "phase2": scramble_to_str(&solution.phase2),
                "nodes": solution.stats.nodes,
            })
        );
    } else {
        println!("Solution: {}", solution);
        println!("Move count: {}", solution.solution.len());
    }
    Ok(())
}

fn scramble(seed: &Option<u64>, count: u64, json: bool, preview: bool) -> Result<(), Error> {
    let base = seed.unwrap_or_else(rand::random);
    for i in 0..count {
        let (state, solution) = random_scramble(base.wrapping_add(i))?;
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "seed": base.wrapping_add(i),
                    "state": FaceCube::try_from(&state)?.to_string(),
                    "scramble": scramble_to_str(&solution.scramble),
                    "length": solution.scramble.len(),
                })
            );
        } else {
            println!("{}", scramble_to_str(&solution.scramble));
        }
        if preview {
            print_facelet(&FaceCube::try_from(&state)?);
        }
    }
    Ok(())
}

fn sticker(color: Color) -> TermColor {
    match color {
        Color::U => TermColor::White,
        Color::R => TermColor::Red,
        Color::F => TermColor::Green,
        Color::D => TermColor::Yellow,
        Color::L => TermColor::DarkYellow,
        Color::B => TermColor::Blue,
    }
}

/// The unfolded cube as three bands of faces. Each entry indexes a face in
/// the facelet string order U, R, F, D, L, B; the indent centers the U and D
/// faces over the F column.
const NET_BANDS: [(&[usize], usize); 3] = [(&[0], 1), (&[4, 2, 1, 5], 0), (&[3], 1)];

// width of one rendered face: three stickers of two columns each, plus a gap
const FACE_WIDTH: usize = 7;

fn print_facelet(facelet: &FaceCube) {
    println!();
    for (faces, indent) in NET_BANDS {
        for row in 0..3 {
            let mut line = " ".repeat(FACE_WIDTH * indent);
            for &face in faces {
                for col in 0..3 {
                    let color = facelet.f[9 * face + 3 * row + col];
                    line.push_str(&format!("{}  ", SetBackgroundColor(sticker(color))));
                }
                line.push_str(&format!("{} ", SetBackgroundColor(TermColor::Reset)));
            }
            println!("{line}");
        }
    }
    println!();
}

fn main() {
    let program = Cli::parse();

    let result = match &program.command {
        Some(Commands::Solve {
            scramble,
            facelet,
            max_phase1,
            max_phase2,
            json,
            preview,
        }) => solve(scramble, facelet, *max_phase1, *max_phase2, *json, *preview),
        Some(Commands::Scramble {
            seed,
            count,
            json,
            preview,
        }) => scramble(seed, *count, *json, *preview),
        _ => Ok(()),
    };

    if let Err(error) = result {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
