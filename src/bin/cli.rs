//! auto-apply command line
//!
//! Scores a job list against a candidate profile and applies to the matches, either through
//! a real browser or in demo mode.

use anyhow::{Context, Result};
use auto_apply::agent::Severity;
use auto_apply::runner::JobResult;
use auto_apply::{
    AgentConfig, ApplicationRunner, AutomationAgent, FileJobSource, HttpTextGenerator, JobSource, Profile, classify,
    evaluate,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "auto-apply")]
#[command(version)]
#[command(about = "Automated job applications with fit scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score jobs and apply to the ones above the threshold
    Run {
        /// Candidate profile (JSON)
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,

        /// Job list (JSON array)
        #[arg(long, value_name = "FILE")]
        jobs: PathBuf,

        /// Agent configuration (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Only consider jobs matching these search terms
        #[arg(long, short, default_value = "")]
        query: String,

        /// Simulate submissions without a browser
        #[arg(long)]
        demo: bool,

        /// Launch browser in headed mode (default: headless)
        #[arg(long, short = 'H')]
        headed: bool,
    },

    /// Print the fit table for a job list
    Score {
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,

        #[arg(long, value_name = "FILE")]
        jobs: PathBuf,
    },

    /// Print the platform family of a URL
    Classify { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { profile, jobs, config, query, demo, headed } => {
            let mut config = match config {
                Some(path) => AgentConfig::from_file(&path)?,
                None => AgentConfig::default(),
            }
            .with_env_overrides();
            if demo {
                config.demo_mode = true;
            }
            if headed {
                config.launch.headless = false;
            }

            let profile = load_profile(&profile)?;
            let jobs = FileJobSource::new(&jobs).search(&query).await.context("Failed to load jobs")?;

            eprintln!("auto-apply v{}", env!("CARGO_PKG_VERSION"));
            eprintln!("Mode: {}", if config.demo_mode { "demo" } else if config.launch.headless { "headless" } else { "headed" });
            eprintln!("Jobs: {}", jobs.len());

            let agent = AutomationAgent::new(&config);
            let mut runner = ApplicationRunner::new(agent, config.runner.clone());
            if let Some(generator) = HttpTextGenerator::from_env()? {
                eprintln!("Cover letters: {} ({})", generator.model(), generator.endpoint());
                runner = runner.with_generator(Box::new(generator));
            }

            let results = runner.run(&profile, jobs).await;
            for result in &results {
                print_result(result);
            }

            runner.agent().close().context("Failed to close browser")?;
        }
        Commands::Score { profile, jobs } => {
            let profile = load_profile(&profile)?;
            let jobs = FileJobSource::new(&jobs).load().await.context("Failed to load jobs")?;

            let mut reports: Vec<_> = jobs.iter().map(|job| (job, evaluate(&profile, job))).collect();
            reports.sort_by(|a, b| b.1.score.cmp(&a.1.score));

            println!("{:>5}  {:<40}  {:<24}  {}", "SCORE", "TITLE", "COMPANY", "MATCHED SKILLS");
            for (job, report) in reports {
                println!(
                    "{:>5}  {:<40}  {:<24}  {}",
                    report.score,
                    truncate(&job.title, 40),
                    truncate(&job.company, 24),
                    report.matched_skills.join(", ")
                );
            }
        }
        Commands::Classify { url } => {
            println!("{}", classify(&url));
        }
    }

    Ok(())
}

fn load_profile(path: &Path) -> Result<Profile> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse profile {}", path.display()))
}

fn print_result(result: &JobResult) {
    println!(
        "[{}] {} at {} (score {})",
        result.record.status, result.job.title, result.job.company, result.record.match_score
    );
    if let Some(reason) = &result.record.match_reason {
        println!("    {}", reason);
    }
    if let Some(outcome) = &result.outcome {
        for entry in &outcome.logs {
            let marker = match entry.severity {
                Severity::Info => "·",
                Severity::Success => "✓",
                Severity::Warning => "!",
                Severity::Error => "✗",
            };
            println!("    {} {} {}", entry.timestamp.format("%H:%M:%S"), marker, entry.message);
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
