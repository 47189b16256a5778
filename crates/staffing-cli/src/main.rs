use clap::{Parser, Subcommand};
use staffing_engine::{Candidate, Job};
use staffing_solver::SolveStatus;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "staffing")]
#[command(about = "Least-cost staffing assignment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the assignment and print the resulting roster
    Solve {
        /// CSV of open positions (Job,English,Italian,Number)
        jobs: PathBuf,
        /// CSV of candidates (Name,Salary,Role,English,Italian)
        candidates: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
        /// Skip the per-candidate assignment list
        #[arg(long)]
        no_assignments: bool,
        /// Skip the per-job summary table
        #[arg(long)]
        no_summary: bool,
    },
    /// Check the input files for errors
    Check {
        /// CSV of open positions
        jobs: PathBuf,
        /// CSV of candidates
        candidates: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            jobs,
            candidates,
            format,
            no_assignments,
            no_summary,
        } => {
            let (jobs, candidates) = load_tables(&jobs, &candidates);

            let plan = match staffing_engine::plan(&jobs, &candidates) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            if format == "json" {
                match serde_json::to_string_pretty(&plan) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Error serializing plan: {}", e);
                        std::process::exit(1);
                    }
                }
                if plan.status != SolveStatus::Optimal {
                    std::process::exit(1);
                }
                return;
            }

            println!("Status: {}", plan.status);
            match plan.status {
                SolveStatus::Optimal => {}
                SolveStatus::Infeasible => {
                    println!("No assignment satisfies the staffing requirements.");
                    std::process::exit(1);
                }
                SolveStatus::Unbounded => {
                    println!("The model has no finite optimal cost.");
                    std::process::exit(1);
                }
            }
            println!("Total salary: {:.2}", plan.total_salary);

            if !no_assignments {
                println!();
                println!("Assignments:");
                println!(
                    "  {:18} {:22} {:>7} {:>7} {:>12}",
                    "Job", "Candidate", "English", "Italian", "Salary"
                );
                for a in &plan.assignments {
                    println!(
                        "  {:18} {:22} {:>7} {:>7} {:>12.2}",
                        a.job, a.candidate, a.english, a.italian, a.salary
                    );
                }
            }

            if !no_summary {
                println!();
                println!("Summary:");
                println!(
                    "  {:18} {:>4} {:>6} {:>8} {:>7} {:>7} {:>7} {:>7} {:>7} {:>7} {:>12} {:>10}",
                    "Job",
                    "Req",
                    "Filled",
                    "Unfilled",
                    "ReqEng",
                    "AvgEng",
                    "GapEng",
                    "ReqIta",
                    "AvgIta",
                    "GapIta",
                    "Total Cost",
                    "Avg Cost"
                );
                for r in &plan.summary {
                    println!(
                        "  {:18} {:>4} {:>6} {:>8} {:>7.1} {:>7.1} {:>+7.1} {:>7.1} {:>7.1} {:>+7.1} {:>12.2} {:>10.2}",
                        r.job,
                        r.required,
                        r.filled,
                        r.unfilled,
                        r.required_english,
                        r.avg_english,
                        r.english_gap,
                        r.required_italian,
                        r.avg_italian,
                        r.italian_gap,
                        r.total_cost,
                        r.avg_cost
                    );
                }
            }

            let spent: Vec<_> = plan
                .italian_shortfall
                .iter()
                .filter(|(_, s)| *s > 1e-6)
                .collect();
            if !spent.is_empty() {
                println!();
                println!("Italian shortfall:");
                for (job, s) in spent {
                    println!("  {:18} {:>7.1}", job, s);
                }
            }
        }
        Commands::Check { jobs, candidates } => {
            let (jobs, candidates) = load_tables(&jobs, &candidates);

            if let Err(e) = staffing_engine::validate(&jobs, &candidates) {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }

            let seats: u32 = jobs.iter().map(|j| j.headcount).sum();
            let unmatched = candidates
                .iter()
                .filter(|c| jobs.iter().all(|j| j.name != c.role))
                .count();

            println!("✓ {} positions, {} seats", jobs.len(), seats);
            println!("✓ {} candidates", candidates.len());
            if unmatched > 0 {
                println!("  {} of them match no open position and can never be assigned", unmatched);
            }
        }
    }
}

fn load_tables(jobs_path: &Path, candidates_path: &Path) -> (Vec<Job>, Vec<Candidate>) {
    let jobs = match load_jobs(jobs_path) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error reading {}: {}", jobs_path.display(), e);
            std::process::exit(1);
        }
    };
    let candidates = match load_candidates(candidates_path) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error reading {}: {}", candidates_path.display(), e);
            std::process::exit(1);
        }
    };
    (jobs, candidates)
}

fn load_jobs(path: &Path) -> Result<Vec<Job>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    reader.deserialize().collect()
}

fn load_candidates(path: &Path) -> Result<Vec<Candidate>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    reader.deserialize().collect()
}
