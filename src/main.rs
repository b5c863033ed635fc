use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use u_partition::comparison::PolicyComparison;
use u_partition::engine::{AllocationEngine, SimulationRequest, TickEvent, TickReport};
use u_partition::metrics::StatsSummary;
use u_partition::placement::PolicyKind;
use u_partition::scenario;
use u_partition::SimError;

#[derive(Debug, Parser)]
#[command(version, about = "Fixed-partition memory allocation simulator")]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one policy tick by tick and print the log.
    Run {
        /// Placement policy. Overrides the policy in the scenario file.
        #[arg(long, value_enum)]
        policy: Option<PolicyKind>,
        /// JSON scenario file. Defaults to the classroom workload.
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Print reports and summary as JSON lines.
        #[arg(long)]
        json: bool,
        /// Stop after this many ticks even if unfinished.
        #[arg(long)]
        max_ticks: Option<u64>,
    },
    /// Run every policy and print their statistics side by side.
    Compare {
        /// JSON scenario file. Defaults to the classroom workload.
        #[arg(long)]
        scenario: Option<PathBuf>,
        /// Print the comparison as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match execute(args.cmd) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn execute(cmd: Command) -> Result<(), SimError> {
    match cmd {
        Command::Run {
            policy,
            scenario,
            json,
            max_ticks,
        } => {
            let mut request = load_request(scenario.as_deref())?;
            if let Some(policy) = policy {
                request.policy = policy;
            }
            let mut engine = AllocationEngine::new(request)?;

            if !json {
                println!("=== {} SIMULATION STARTED ===", engine.policy());
            }
            while !engine.is_finished() && max_ticks.map_or(true, |max| engine.clock() < max) {
                let report = engine.advance();
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    print_report(&report);
                }
            }

            let summary = engine.summary();
            if json {
                println!("{}", serde_json::to_string(&summary)?);
            } else {
                println!("=== FINAL STATISTICS ===");
                println!("Algorithm Used: {}", engine.policy());
                print_summary(&summary);
            }
        }
        Command::Compare { scenario, json } => {
            let request = load_request(scenario.as_deref())?;
            let comparison = PolicyComparison::run(&request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                for run in &comparison.runs {
                    println!("=== {} ===", run.policy);
                    print_summary(&run.summary);
                    println!();
                }
                match comparison.least_fragmented() {
                    Some(policy) => println!("Least internal fragmentation: {}", policy),
                    None => println!("Least internal fragmentation: tie"),
                }
            }
        }
    }

    Ok(())
}

fn load_request(path: Option<&Path>) -> Result<SimulationRequest, SimError> {
    match path {
        Some(path) => {
            tracing::info!("loading scenario from {}", path.display());
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(scenario::classroom(PolicyKind::FirstFit)),
    }
}

fn print_report(report: &TickReport) {
    println!("=== Time {} ===", report.tick);
    for event in &report.events {
        match *event {
            TickEvent::Arrival {
                job,
                duration,
                demand,
            } => println!("Job {} arrives (Size: {}, Time: {})", job, demand, duration),
            TickEvent::Rejection { job, .. } => println!("Job {} REJECTED - Too big!", job),
            TickEvent::Completion { job, block } => {
                println!("Job {} finished!", job);
                println!("Block {} is now free", block);
            }
            TickEvent::Allocation {
                job,
                block,
                capacity,
                wasted,
            } => {
                println!("Job {} loaded into Block {}", job, block);
                println!(
                    "Wasted space: {} ({:.1}%)",
                    wasted,
                    wasted as f64 * 100.0 / capacity as f64
                );
            }
            TickEvent::StillWaiting { job } => {
                println!("Job {} waiting (no suitable block available)", job)
            }
        }
    }
    println!();
}

fn print_summary(s: &StatsSummary) {
    println!("Jobs Completed: {}", s.jobs_completed);
    println!("Jobs Rejected: {}", s.jobs_rejected);
    println!("Total Time: {} ticks", s.elapsed_ticks);
    println!("Throughput: {:.3} jobs/tick", s.throughput);
    println!(
        "Avg waiting queue length: {:.2} (max {})",
        s.avg_queue_length, s.max_queue_length
    );
    println!("Avg waiting time in queue: {:.2} ticks", s.avg_wait_time);
    println!(
        "Avg internal fragmentation: {:.0} bytes ({:.2}%) per active tick",
        s.avg_fragmentation_bytes, s.fragmentation_percent
    );
    println!(
        "Avg block time utilization: {:.2}%",
        s.block_utilization_percent
    );
    let total: usize = s.tiers.iter().map(|t| t.count).sum();
    for tier in &s.tiers {
        println!(
            "Partitions {}: {:.1}% ({}/{})",
            tier.tier.label(),
            tier.percent,
            tier.count,
            total
        );
    }
}
