//! RV32I debug-capable hart model CLI.
//!
//! This binary runs test programs on the simulated system. It performs:
//! 1. **Loading:** ELF, Verilog hex, or raw binary into RAM.
//! 2. **Running:** Ticks every hart until `tohost` is written, all harts halt, or the cycle limit.
//! 3. **Reporting:** `tohost` pass/fail, final register state, and statistics (text or JSON).
//!
//! `RUST_LOG` controls library logging; `--trace` enables per-retirement events.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rvdbg_core::config::Config;
use rvdbg_core::sim::RunOutcome;
use rvdbg_core::soc::devices::HtifStatus;
use rvdbg_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "rvdbg",
    author,
    version,
    about = "Cycle-stepped RV32I hart model with external debug and trigger support",
    long_about = "Run a test program until it writes tohost.\n\nExamples:\n  rvdbg run rv32ui-p-add\n  rvdbg run program.hex --halt-at 100\n  rvdbg run program.bin --config two-harts.json --stats-json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program (ELF, Verilog hex, or raw binary).
    Run {
        /// Program to execute.
        program: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the cycle limit.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Emit a trace event for every retired instruction.
        #[arg(long)]
        trace: bool,

        /// Assert the halt request on every hart at this cycle.
        #[arg(long)]
        halt_at: Option<u64>,

        /// Print statistics as JSON instead of text.
        #[arg(long)]
        stats_json: bool,
    },
}

fn init_tracing(trace: bool) {
    let default = if trace { "rvdbg_core=trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            program,
            config,
            max_cycles,
            trace,
            halt_at,
            stats_json,
        } => {
            init_tracing(trace);
            match cmd_run(&program, config.as_deref(), max_cycles, trace, halt_at, stats_json) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("[!] {e}");
                    ExitCode::from(2)
                }
            }
        }
    }
}

/// Loads `program`, runs it, and reports the outcome.
fn cmd_run(
    program: &Path,
    config_path: Option<&Path>,
    max_cycles: Option<u64>,
    trace: bool,
    halt_at: Option<u64>,
    stats_json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(limit) = max_cycles {
        config.general.max_cycles = limit;
    }
    config.general.trace_instructions |= trace;
    debug!(?config, "effective configuration");

    let mut sim = Simulator::new(&config);
    let image = sim.load_program(program)?;

    println!("[*] Program: {}", program.display());
    println!(
        "    Harts: {}  Entry: {:#010x}  tohost: {:#010x}  Loaded: {} bytes",
        sim.harts().len(),
        sim.config().core.reset_pc,
        sim.config().core.tohost,
        image.bytes_loaded
    );

    if let Some(cycle) = halt_at {
        sim.schedule_halt(cycle);
    }

    let outcome = sim.run();
    println!("\n[*] Stopped after {} cycles: {outcome:?}", sim.cycle());

    let mut code = ExitCode::SUCCESS;
    for hart in sim.harts() {
        println!("\n--- hart {} ---", hart.hart_id());
        println!("pc = {:#010x}  debug_mode = {}", hart.pc(), hart.in_debug_mode());
        if hart.in_debug_mode() {
            println!(
                "dcsr.cause = {:?}  dpc = {:#010x}",
                hart.debug().dcsr.cause,
                hart.debug().dpc
            );
        }
        if let Some(value) = hart.exit_value() {
            let status = HtifStatus::from_value(value);
            println!("tohost: {status}");
            if status != HtifStatus::Pass {
                code = ExitCode::from(status.exit_code() as u8);
            }
        }
        println!("{}", hart.gpr());

        if stats_json {
            println!("{}", serde_json::to_string_pretty(hart.stats())?);
        } else {
            println!("{}", hart.stats());
        }
    }

    if outcome == RunOutcome::CycleLimit && halt_at.is_none() {
        eprintln!("[!] cycle limit reached before tohost was written");
        code = ExitCode::FAILURE;
    }
    Ok(code)
}
