//! Sequential queue processing: score, gate, optionally write a cover letter, apply, pace.

use crate::agent::{ApplicationOutcome, ApplicationRequest, AutomationAgent};
use crate::config::RunnerConfig;
use crate::matching::evaluate;
use crate::models::{ApplicationRecord, ApplicationStatus, Job, Profile};
use crate::textgen::{TextGenerator, generate_cover_letter};
use serde::Serialize;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(3600);

/// Sliding one-hour budget of attempts
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_per_hour: u32,
    attempts: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_per_hour: u32) -> Self {
        Self { max_per_hour: max_per_hour.max(1), attempts: VecDeque::new() }
    }

    /// How long to wait at `now` before another attempt fits the budget
    pub fn wait_time(&mut self, now: Instant) -> Duration {
        while let Some(&oldest) = self.attempts.front() {
            if now.saturating_duration_since(oldest) >= WINDOW {
                self.attempts.pop_front();
            } else {
                break;
            }
        }

        if self.attempts.len() < self.max_per_hour as usize {
            return Duration::ZERO;
        }
        match self.attempts.front() {
            Some(&oldest) => WINDOW.saturating_sub(now.saturating_duration_since(oldest)),
            None => Duration::ZERO,
        }
    }

    pub fn record(&mut self, at: Instant) {
        self.attempts.push_back(at);
    }

    pub fn in_window(&self) -> usize {
        self.attempts.len()
    }
}

/// One job's trip through the runner
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub job: Job,
    pub record: ApplicationRecord,
    /// Absent when the job was rejected before any attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ApplicationOutcome>,
}

impl JobResult {
    pub fn status(&self) -> ApplicationStatus {
        self.record.status
    }
}

pub struct ApplicationRunner {
    agent: AutomationAgent,
    generator: Option<Box<dyn TextGenerator>>,
    config: RunnerConfig,
    limiter: RateLimiter,
}

impl ApplicationRunner {
    pub fn new(agent: AutomationAgent, config: RunnerConfig) -> Self {
        let limiter = RateLimiter::new(config.max_per_hour);
        Self { agent, generator: None, config, limiter }
    }

    pub fn with_generator(mut self, generator: Box<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn agent(&self) -> &AutomationAgent {
        &self.agent
    }

    /// Score and gate every job, then apply to the matched ones best-first
    pub async fn run(&mut self, profile: &Profile, jobs: Vec<Job>) -> Vec<JobResult> {
        let mut results: Vec<JobResult> = jobs
            .into_iter()
            .map(|job| {
                let report = evaluate(profile, &job);
                let mut record = ApplicationRecord::new(job.id.clone(), report.score);
                record.match_reason = Some(report.summary());
                record.status = if report.score >= self.config.min_score {
                    ApplicationStatus::Matched
                } else {
                    ApplicationStatus::Rejected
                };
                JobResult { job, record, outcome: None }
            })
            .collect();

        results.sort_by(|a, b| b.record.match_score.cmp(&a.record.match_score));

        let matched = results.iter().filter(|r| r.status() == ApplicationStatus::Matched).count();
        log::info!(
            "{} of {} jobs scored at least {}",
            matched,
            results.len(),
            self.config.min_score
        );

        let mut attempted = 0;
        for result in results.iter_mut() {
            if result.status() != ApplicationStatus::Matched {
                log::info!(
                    "Skipping '{}' at {} (score {})",
                    result.job.title,
                    result.job.company,
                    result.record.match_score
                );
                continue;
            }

            if attempted > 0 && self.config.delay_between_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.delay_between_ms)).await;
            }

            let wait = self.limiter.wait_time(Instant::now());
            if !wait.is_zero() {
                log::info!("Hourly limit of {} reached, waiting {:?}", self.config.max_per_hour, wait);
                tokio::time::sleep(wait).await;
            }

            self.apply_one(profile, result).await;
            self.limiter.record(Instant::now());
            attempted += 1;
        }

        results
    }

    async fn apply_one(&self, profile: &Profile, result: &mut JobResult) {
        let JobResult { job, record, outcome } = result;

        let letter = generate_cover_letter(self.generator.as_deref(), profile, job).await;
        record.cover_letter = Some(letter);
        record.status = ApplicationStatus::Applying;

        let attempt = self.agent.submit_application(ApplicationRequest::new(record, profile, job)).await;
        log::info!("'{}' at {}: {}", job.title, job.company, record.status);
        *outcome = Some(attempt);
    }
}
