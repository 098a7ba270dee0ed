// Copyright (c) 2024 Mudit Bhargava
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.
//

// main.rs
//
// This is the demo CLI host for the Tomasulo engine: a thin external
// collaborator, not part of the core (spec §1 explicitly excludes
// "statistics aggregation, reporting, command-line handling, and any
// surrounding functional simulator" from the core itself). It drives
// `run_tomasulo_report` from either a JSON trace file or one of the named
// synthetic scenarios from spec §8, then prints the total cycle count and
// a per-instruction stage-timestamp table.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tomasulo_sim::{run_tomasulo_report, DecodedInstruction, InstrTimestamps, InstructionTrace, SimError, TomasuloConfig};

#[derive(Parser)]
#[command(name = "tomasulo-sim")]
#[command(about = "A cycle-accurate simulator for Tomasulo's dynamic scheduling algorithm")]
#[command(version)]
struct Cli {
    /// Run the engine over a trace and report its stage timestamps.
    #[command(flatten)]
    run: RunArgs,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Path to a JSON array-of-records trace file (mutually exclusive with
    /// `--synthetic`).
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Name of a built-in synthetic scenario: single-add, raw-chain,
    /// independent, branch, fp-chain, store-load.
    #[arg(short, long)]
    synthetic: Option<String>,

    /// Log level (error, warn, info, debug, trace). Overridden by RUST_LOG.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Number of integer functional units (overrides the default of 2).
    #[arg(long)]
    fu_int: Option<usize>,

    /// Number of FP functional units (overrides the default of 1).
    #[arg(long)]
    fu_fp: Option<usize>,
}

fn load_trace(args: &RunArgs) -> Result<InstructionTrace, SimError> {
    match (&args.trace, &args.synthetic) {
        (Some(_), Some(_)) => Err(SimError::ConfigError(
            "--trace and --synthetic are mutually exclusive".to_string(),
        )),
        (Some(path), None) => {
            let data = std::fs::read_to_string(path)?;
            let records: Vec<DecodedInstruction> = serde_json::from_str(&data)?;
            let mut trace = InstructionTrace::new();
            for record in records {
                trace.push(record);
            }
            Ok(trace)
        },
        (None, Some(name)) => tomasulo_sim::synth::named_scenario(name),
        (None, None) => Err(SimError::ConfigError(
            "one of --trace or --synthetic is required".to_string(),
        )),
    }
}

fn build_config(args: &RunArgs) -> TomasuloConfig {
    let mut config = TomasuloConfig::default();
    if let Some(fu_int) = args.fu_int {
        config = config.with_fu_int(fu_int);
    }
    if let Some(fu_fp) = args.fu_fp {
        config = config.with_fu_fp(fu_fp);
    }
    config
}

fn print_report(total_cycles: u64, timestamps: &[InstrTimestamps]) {
    println!("total cycles: {total_cycles}");
    println!("{:>5} {:>9} {:>6} {:>8} {:>4}", "idx", "dispatch", "issue", "execute", "cdb");
    for t in timestamps {
        println!(
            "{:>5} {:>9} {:>6} {:>8} {:>4}",
            t.index, t.dispatch_cycle, t.issue_cycle, t.execute_cycle, t.cdb_cycle
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tomasulo_sim::utils::logging::init(&cli.run.log_level);

    let trace = match load_trace(&cli.run) {
        Ok(trace) => trace,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        },
    };

    let config = build_config(&cli.run);
    let report = run_tomasulo_report(&trace, config);
    print_report(report.total_cycles, &report.timestamps);
    ExitCode::SUCCESS
}
