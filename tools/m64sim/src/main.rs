mod exec;
mod helpers;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use mapache64::{
    Runtime,
    mem::OUTPUT_BUFFER,
    sim::{SimConfig, SimPlatform},
};
use rom::{
    Template,
    fibo::{iterative_fibo, recursive_fibo},
};
use tracing::{Level, info};
use tracing_subscriber::util::SubscriberInitExt;

use crate::helpers::{Dump, format_words, parse_address, parse_dump};

#[derive(Parser)]
#[command(name = "m64sim")]
#[command(version, about = "Mapache64 host simulator", long_about = None)]
struct Cli {
    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the game template against the simulated console
    Template {
        /// Frames to run after reset, if the game doesn't halt first
        #[arg(short, long, default_value_t = 1)]
        frames: u32,

        /// Polls the GPU stays busy at the start of each frame
        #[arg(long, default_value_t = 0)]
        gpu_latency: u16,
    },

    /// Run a raw 6502 binary until it hits BRK
    Exec {
        /// Path to the program image
        program: PathBuf,

        /// Load address; the reset vector is pointed here
        #[arg(long, default_value = "0x0600", value_parser = parse_address)]
        origin: u16,

        /// Give up after this many cycles
        #[arg(long, default_value_t = 1_000_000)]
        max_cycles: u64,

        /// Words to print afterwards, as ADDR:COUNT
        #[arg(long, default_value = "0x0200:10", value_parser = parse_dump)]
        dump: Dump,

        /// Treat BRK as a software interrupt instead of stopping
        #[arg(long)]
        no_halt_on_brk: bool,
    },

    /// Print the nth Fibonacci number as the template computes it
    Fibo {
        #[arg(allow_negative_numbers = true)]
        n: i16,

        /// Use the recursive form
        #[arg(long)]
        recursive: bool,
    },
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .finish()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Template { frames, gpu_latency } => {
            let mut sim = SimPlatform::new(SimConfig { gpu_latency });
            let report = Runtime::new(frames).run(&mut Template, &mut sim);
            info!("template finished: {:?}", report);

            println!("exit: {:?}", report.exit);
            println!("frames: {}", report.frames);
            println!("gpu waits: {}", report.gpu_waits);
            print!("{}", format_words(OUTPUT_BUFFER, sim.output()));
        }

        Commands::Exec { program, origin, max_cycles, dump, no_halt_on_brk } => {
            exec::run_program(&program, origin, max_cycles, dump, !no_halt_on_brk)?;
        }

        Commands::Fibo { n, recursive } => {
            let value = if recursive { recursive_fibo(n) } else { iterative_fibo(n) };
            println!("{}", value);
        }
    }

    Ok(())
}
