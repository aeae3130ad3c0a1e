//! # auto-apply
//!
//! A job application automation agent: scores postings against a candidate profile and
//! fills application forms on LinkedIn, Indeed, and company career pages through a
//! headless Chrome session.
//!
//! ## Features
//!
//! - **Browser Session Management**: one lazily launched Chrome process shared across attempts
//! - **Platform Strategies**: per-site locator chains for apply, advance, and submit controls
//! - **Field Heuristics**: name, email, phone, résumé, and free-text question detection
//! - **Demo Mode**: synthesized outcomes without a browser
//! - **Fit Scoring**: deterministic 0-100 match score with reasons
//!
//! ## Usage
//!
//! ```bash
//! # Score a job list against a profile
//! cargo run -- score --profile profile.json --jobs jobs.json
//!
//! # Apply in demo mode (no browser)
//! cargo run -- run --profile profile.json --jobs jobs.json --demo
//! ```
//!
//! ### Single attempt
//!
//! ```rust,no_run
//! use auto_apply::{AgentConfig, ApplicationRecord, ApplicationRequest, AutomationAgent, Job, Profile};
//!
//! # async fn run(profile: Profile, job: Job) {
//! let agent = AutomationAgent::new(&AgentConfig::default());
//! let mut record = ApplicationRecord::new(job.id.clone(), 80);
//!
//! let outcome = agent.submit_application(ApplicationRequest::new(&mut record, &profile, &job)).await;
//! println!("{:?}: {} log entries", outcome.state, outcome.logs.len());
//! # agent.close().ok();
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`agent`]: attempt state machine, outcomes, and the activity log
//! - [`browser`]: session lifecycle, launch options, and the Chrome-backed page
//! - [`strategy`]: site strategies and the shared multi-step form flow
//! - [`form`]: field role detection and templated answers
//! - [`matching`]: job fit scoring
//! - [`runner`]: sequential queue processing with rate limiting
//! - [`error`]: error types and result aliases

pub mod agent;
pub mod browser;
pub mod config;
pub mod error;
pub mod form;
pub mod matching;
pub mod models;
pub mod platform;
pub mod runner;
pub mod source;
pub mod strategy;
pub mod textgen;

pub use agent::{ActivityLog, AgentState, ApplicationOutcome, ApplicationRequest, AutomationAgent, LogEntry, Severity};
pub use browser::{BrowserSession, LaunchOptions};
pub use config::{AgentConfig, RunnerConfig};
pub use error::{BrowserError, Result};
pub use form::{answer_for, detect_role};
pub use matching::{MatchReport, evaluate, score};
pub use models::{ApplicationRecord, ApplicationStatus, Job, JobPreferences, Profile};
pub use platform::{Platform, classify};
pub use runner::{ApplicationRunner, RateLimiter};
pub use source::{FileJobSource, JobSource};
pub use strategy::{SiteStrategy, StrategyRegistry};
pub use textgen::{HttpTextGenerator, TextGenerator};
