//! The automation agent: one application attempt end-to-end.
//!
//! An attempt moves `Idle -> Processing -> {Completed, Error}`. Validation failures, missing
//! controls, and browser failures all end in a terminal [`ApplicationOutcome`] with a log trail;
//! nothing is propagated to the caller.

pub mod outcome;

pub use outcome::{ActivityLog, AgentState, ApplicationOutcome, LogEntry, Severity};

use crate::browser::chrome::ChromeDriver;
use crate::browser::session::{BrowserDriver, BrowserSession};
use crate::config::AgentConfig;
use crate::error::{BrowserError, Result};
use crate::models::{ApplicationRecord, Job, Profile};
use crate::platform::classify;
use crate::strategy::{FillContext, FlowTiming, StrategyRegistry};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Inputs to one attempt. Any of them may be missing; the agent classifies what is absent.
#[derive(Debug, Default)]
pub struct ApplicationRequest<'a> {
    pub application: Option<&'a mut ApplicationRecord>,
    pub profile: Option<&'a Profile>,
    pub job: Option<&'a Job>,
}

impl<'a> ApplicationRequest<'a> {
    pub fn new(application: &'a mut ApplicationRecord, profile: &'a Profile, job: &'a Job) -> Self {
        Self { application: Some(application), profile: Some(profile), job: Some(job) }
    }
}

/// Why an attempt was refused before touching the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingApplication,
    MissingProfile,
    MissingJob,
    MissingApplicationUrl { title: String },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MissingApplication => write!(f, "No application record supplied"),
            ValidationIssue::MissingProfile => write!(f, "No candidate profile supplied"),
            ValidationIssue::MissingJob => write!(f, "No job supplied"),
            ValidationIssue::MissingApplicationUrl { title } => {
                write!(f, "Job '{}' has no application URL", title)
            }
        }
    }
}

/// All validation issues of a request, in a fixed order
pub fn validate(request: &ApplicationRequest<'_>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if request.application.is_none() {
        issues.push(ValidationIssue::MissingApplication);
    }
    if request.profile.is_none() {
        issues.push(ValidationIssue::MissingProfile);
    }
    match request.job {
        None => issues.push(ValidationIssue::MissingJob),
        Some(job) if application_url(job).is_none() => {
            issues.push(ValidationIssue::MissingApplicationUrl { title: job.title.clone() });
        }
        Some(_) => {}
    }
    issues
}

fn application_url(job: &Job) -> Option<&str> {
    job.application_url.as_deref().map(str::trim).filter(|url| !url.is_empty())
}

/// Drives application attempts through a shared browser session.
///
/// One instance is reused across many jobs to amortize browser startup; attempts are
/// serialized. Call [`AutomationAgent::close`] when done.
pub struct AutomationAgent {
    session: Arc<BrowserSession>,
    strategies: Arc<StrategyRegistry>,
    timing: FlowTiming,
    demo_mode: bool,
    demo_success_rate: f64,
    demo_delay: Duration,
    rng: Mutex<Box<dyn RngCore + Send>>,
    state: Mutex<AgentState>,
    attempt: tokio::sync::Mutex<()>,
}

impl AutomationAgent {
    /// Agent backed by Chrome, configured from `config`
    pub fn new(config: &AgentConfig) -> Self {
        Self::with_driver(config, Arc::new(ChromeDriver::with_settle(config.settle())))
    }

    /// Agent backed by an arbitrary browser driver
    pub fn with_driver(config: &AgentConfig, driver: Arc<dyn BrowserDriver>) -> Self {
        Self {
            session: Arc::new(BrowserSession::with_driver(driver, config.launch.clone())),
            strategies: Arc::new(StrategyRegistry::with_overrides(&config.sites)),
            timing: config.flow_timing(),
            demo_mode: config.demo_mode,
            demo_success_rate: config.demo_success_rate.clamp(0.0, 1.0),
            demo_delay: config.demo_delay(),
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
            state: Mutex::new(AgentState::Idle),
            attempt: tokio::sync::Mutex::new(()),
        }
    }

    /// Replace the random source used by demo mode
    pub fn with_rng(self, rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Mutex::new(Box::new(rng)), ..self }
    }

    pub fn with_strategies(self, strategies: StrategyRegistry) -> Self {
        Self { strategies: Arc::new(strategies), ..self }
    }

    pub fn with_timing(self, timing: FlowTiming) -> Self {
        Self { timing, ..self }
    }

    pub fn with_demo_mode(self, enabled: bool) -> Self {
        Self { demo_mode: enabled, ..self }
    }

    pub fn is_demo(&self) -> bool {
        self.demo_mode
    }

    /// State of the most recent attempt
    pub fn state(&self) -> AgentState {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_state(&self, state: AgentState) {
        *self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }

    pub fn session(&self) -> &BrowserSession {
        &self.session
    }

    /// Run one application attempt and write its terminal status onto the record
    pub async fn submit_application(&self, request: ApplicationRequest<'_>) -> ApplicationOutcome {
        let _serialized = self.attempt.lock().await;
        self.set_state(AgentState::Processing);

        let outcome = self.run(request).await;

        self.set_state(outcome.state);
        outcome
    }

    async fn run(&self, request: ApplicationRequest<'_>) -> ApplicationOutcome {
        let mut log = ActivityLog::new();
        let issues = validate(&request);

        match (request.application, request.profile, request.job) {
            (Some(record), Some(profile), Some(job)) if issues.is_empty() => {
                let outcome = if self.demo_mode {
                    self.run_demo(job, log).await
                } else {
                    self.run_live(profile, job, log).await
                };
                record.status = outcome.status;
                outcome
            }
            (record, _, _) => {
                for issue in &issues {
                    log.error(issue.to_string());
                }
                let outcome = ApplicationOutcome::failed(log);
                if let Some(record) = record {
                    record.status = outcome.status;
                }
                outcome
            }
        }
    }

    async fn run_demo(&self, job: &Job, mut log: ActivityLog) -> ApplicationOutcome {
        log.info(format!("Demo mode: simulating application for '{}' at {}", job.title, job.company));
        tokio::time::sleep(self.demo_delay).await;

        let success = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.gen_bool(self.demo_success_rate)
        };

        if success {
            log.success(format!("Application submitted for '{}' at {} (demo)", job.title, job.company));
            ApplicationOutcome::completed(log)
        } else {
            log.error(format!("Simulated submission failure for '{}' at {} (demo)", job.title, job.company));
            ApplicationOutcome::failed(log)
        }
    }

    async fn run_live(&self, profile: &Profile, job: &Job, mut log: ActivityLog) -> ApplicationOutcome {
        log.info(format!("Starting application for '{}' at {}", job.title, job.company));

        let session = self.session.clone();
        let strategies = self.strategies.clone();
        let profile = profile.clone();
        let job = job.clone();
        let timing = self.timing;

        // Browser calls block; keep them off the async workers
        let joined = tokio::task::spawn_blocking(move || {
            let mut log = ActivityLog::new();
            let result = live_attempt(&session, &strategies, &profile, &job, timing, &mut log);
            (result, log)
        })
        .await;

        match joined {
            Ok((Ok(true), attempt_log)) => {
                log.extend(attempt_log);
                ApplicationOutcome::completed(log)
            }
            Ok((Ok(false), attempt_log)) => {
                log.extend(attempt_log);
                log.error("Application was not submitted");
                ApplicationOutcome::failed(log)
            }
            Ok((Err(e), attempt_log)) => {
                log.extend(attempt_log);
                if e.is_lifecycle() {
                    log.error(format!("Browser session misuse: {}", e));
                } else {
                    log.error(format!("Automation failed: {}", e));
                }
                ApplicationOutcome::failed(log)
            }
            Err(e) => {
                log.error(format!("Automation failed: {}", BrowserError::TaskFailed(e.to_string())));
                ApplicationOutcome::failed(log)
            }
        }
    }

    /// Release the browser. The agent cannot run live attempts afterwards.
    pub fn close(&self) -> Result<()> {
        self.session.close()
    }
}

/// Open one page, pick the strategy for the URL's platform, and run it. The page is always closed.
fn live_attempt(
    session: &BrowserSession,
    strategies: &StrategyRegistry,
    profile: &Profile,
    job: &Job,
    timing: FlowTiming,
    log: &mut ActivityLog,
) -> Result<bool> {
    session.ensure_started()?;
    let page = session.new_page()?;

    let platform = classify(application_url(job).unwrap_or_default());
    log.info(format!("Detected platform: {}", platform));

    let ctx = FillContext { profile, job, timing };
    let result = strategies.get(platform).apply(page.as_ref(), &ctx, log);

    if let Err(e) = page.close() {
        log::warn!("Failed to close page: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(url: Option<&str>) -> Job {
        Job { id: "1".into(), title: "Rust Engineer".into(), application_url: url.map(str::to_string), ..Default::default() }
    }

    #[test]
    fn test_validate_reports_every_issue_in_order() {
        let request = ApplicationRequest::default();
        assert_eq!(
            validate(&request),
            vec![ValidationIssue::MissingApplication, ValidationIssue::MissingProfile, ValidationIssue::MissingJob]
        );
    }

    #[test]
    fn test_blank_url_is_missing() {
        let job = job(Some(" \t"));
        let request = ApplicationRequest { job: Some(&job), ..Default::default() };
        let issues = validate(&request);
        assert_eq!(issues.last(), Some(&ValidationIssue::MissingApplicationUrl { title: "Rust Engineer".into() }));
        assert_eq!(issues.last().map(|i| i.to_string()), Some("Job 'Rust Engineer' has no application URL".into()));
    }

    #[test]
    fn test_complete_request_is_valid() {
        let mut record = ApplicationRecord::new("1", 70);
        let profile = Profile::default();
        let job = job(Some("https://jobs.example.com/1"));
        assert!(validate(&ApplicationRequest::new(&mut record, &profile, &job)).is_empty());
    }

    #[test]
    fn test_new_agent_is_idle() {
        let agent = AutomationAgent::new(&AgentConfig { demo_mode: true, ..Default::default() });
        assert_eq!(agent.state(), AgentState::Idle);
        assert!(agent.is_demo());
        assert!(!agent.session().is_running());
    }
}
