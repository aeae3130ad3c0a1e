//! Site strategies: how to reach and complete the application form for each platform family.
//!
//! All families share one flow ([`run_application_flow`]): navigate, open the form, fill
//! contact fields, upload the résumé, answer questions, then submit (or advance through a
//! multi-step form and repeat). Families differ only in their locator chains, fallback URL,
//! and the hint logged when the entry point is missing.
//!
//! A missing control is a normal negative outcome (`Ok(false)`); only browser failures are errors.

pub mod company;
pub mod indeed;
pub mod linkedin;
pub mod selectors;

pub use company::CompanyStrategy;
pub use indeed::IndeedStrategy;
pub use linkedin::LinkedinStrategy;
pub use selectors::{SiteOverrides, SiteSelectors};

use crate::agent::outcome::ActivityLog;
use crate::browser::page::{FormField, FormPage, Locator};
use crate::error::Result;
use crate::form::heuristics::{self, FieldRole, detect_role};
use crate::form::answers::QuestionTopic;
use crate::form::mapping::{FieldMapping, FormFill, QuestionPlan};
use crate::models::{Job, Profile};
use crate::platform::Platform;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Waits used while driving a form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowTiming {
    /// Upper bound for locating a control
    pub step_timeout: Duration,
    pub poll_interval: Duration,
    /// Pause after clicking apply or advance, for the next form state to render
    pub after_click: Duration,
    /// Pause after clicking submit, for the confirmation state
    pub after_submit: Duration,
}

impl Default for FlowTiming {
    fn default() -> Self {
        Self {
            step_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(250),
            after_click: Duration::from_millis(1000),
            after_submit: Duration::from_millis(2000),
        }
    }
}

impl FlowTiming {
    /// Instant timing, for in-memory pages
    pub fn immediate() -> Self {
        Self {
            step_timeout: Duration::ZERO,
            poll_interval: Duration::ZERO,
            after_click: Duration::ZERO,
            after_submit: Duration::ZERO,
        }
    }

    /// Upper bound on lookup rounds; a zero interval means a single round
    fn poll_rounds(&self) -> u32 {
        if self.poll_interval.is_zero() {
            return 1;
        }
        let rounds = self.step_timeout.as_millis() / self.poll_interval.as_millis().max(1);
        rounds.clamp(1, u128::from(u32::MAX)) as u32
    }
}

/// Inputs to one strategy run
pub struct FillContext<'a> {
    pub profile: &'a Profile,
    pub job: &'a Job,
    pub timing: FlowTiming,
}

/// Procedure for navigating and filling one family of application forms
pub trait SiteStrategy: Send + Sync {
    fn platform(&self) -> Platform;

    fn selectors(&self) -> &SiteSelectors;

    /// Logged when the apply entry point cannot be found
    fn missing_entry_hint(&self) -> &str {
        "apply button not found"
    }

    /// The job's application URL, or this family's fallback built from the job id
    fn entry_url(&self, job: &Job) -> Option<String> {
        job.application_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .or_else(|| self.selectors().fallback_url_for(&job.id))
    }

    /// Run the application flow. `Ok(true)` means the submit click succeeded.
    fn apply(&self, page: &dyn FormPage, ctx: &FillContext<'_>, log: &mut ActivityLog) -> Result<bool> {
        run_application_flow(self, page, ctx, log)
    }
}

/// Which kind of control a poll resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Submit,
    Advance,
}

/// Poll `chains` in order until one locator resolves or the step timeout elapses.
///
/// Within a round, earlier chains and earlier locators win. At least one round always runs;
/// no round starts past the deadline. Exhaustion means "not found".
fn locate<'c, K: Copy>(
    page: &dyn FormPage,
    chains: &[(K, &'c [Locator])],
    timing: &FlowTiming,
) -> Option<(K, &'c Locator)> {
    let rounds = timing.poll_rounds();
    let deadline = Instant::now() + timing.step_timeout;
    for round in 0..rounds {
        for &(kind, chain) in chains {
            if let Some(locator) = chain.iter().find(|locator| page.exists(locator)) {
                return Some((kind, locator));
            }
        }
        if round + 1 >= rounds || Instant::now() >= deadline {
            break;
        }
        page.pause(timing.poll_interval);
    }
    None
}

/// First locator of a single chain that resolves within the step timeout
pub fn locate_first<'c>(page: &dyn FormPage, chain: &'c [Locator], timing: &FlowTiming) -> Option<&'c Locator> {
    locate(page, &[((), chain)], timing).map(|(_, locator)| locator)
}

/// The shared navigate → apply → fill → submit procedure
pub fn run_application_flow<S: SiteStrategy + ?Sized>(
    strategy: &S,
    page: &dyn FormPage,
    ctx: &FillContext<'_>,
    log: &mut ActivityLog,
) -> Result<bool> {
    let selectors = strategy.selectors();
    let platform = strategy.platform();

    let Some(url) = strategy.entry_url(ctx.job) else {
        log.error(format!("No URL to open for '{}' on {}", ctx.job.title, platform));
        return Ok(false);
    };

    log.info(format!("Opening {} application page: {}", platform, url));
    page.goto(&url)?;

    match locate_first(page, &selectors.apply, &ctx.timing) {
        Some(locator) => {
            log::debug!("Apply entry point matched {}", locator);
            page.click(locator)?;
            log.info("Opened application form");
            page.pause(ctx.timing.after_click);
        }
        None => {
            log.warn(format!("{}: {}", platform, strategy.missing_entry_hint()));
            return Ok(false);
        }
    }

    let mut fill = FormFill::new();
    for step in 1..=selectors.max_steps {
        log::debug!("Filling form step {}", step);
        fill_contact_fields(page, ctx.profile, &mut fill, log)?;
        upload_resume(page, ctx.profile, &mut fill, log)?;
        answer_questions(page, ctx, &mut fill, log)?;

        let chains = [
            (Control::Submit, selectors.submit.as_slice()),
            (Control::Advance, selectors.advance.as_slice()),
            (Control::Submit, selectors.generic_submit.as_slice()),
        ];
        match locate(page, &chains, &ctx.timing) {
            Some((Control::Submit, locator)) => {
                page.click(locator)?;
                page.pause(ctx.timing.after_submit);
                log.success(format!(
                    "Submitted application for '{}' at {} ({} fields filled)",
                    ctx.job.title,
                    ctx.job.company,
                    fill.len()
                ));
                return Ok(true);
            }
            Some((Control::Advance, locator)) => {
                page.click(locator)?;
                log.info(format!("Advanced past form step {}", step));
                page.pause(ctx.timing.after_click);
            }
            None => {
                log.warn(format!("No submit control found on form step {}", step));
                return Ok(false);
            }
        }
    }

    log.warn(format!("Gave up after {} form steps without reaching submit", selectors.max_steps));
    Ok(false)
}

/// Fill name, email, and phone, in that order, re-reading the form before each
fn fill_contact_fields(page: &dyn FormPage, profile: &Profile, fill: &mut FormFill, log: &mut ActivityLog) -> Result<()> {
    for role in [FieldRole::FullName, FieldRole::Email, FieldRole::Phone] {
        let fields = page.form_fields()?;
        let Some(field) = first_with_role(&fields, role) else {
            continue;
        };
        if fill.holds(field) {
            continue;
        }

        match fill.contact_value(field, role, profile) {
            Some(value) => fill_field(page, field, role, None, value, fill, log),
            None if !field.is_empty() => {
                if fill.report_once(&field.selector) {
                    log.info(format!("Kept existing {} value", role));
                }
            }
            None => {
                if fill.report_once(&field.selector) {
                    log.warn(format!("Profile has no {} to fill", role));
                }
            }
        }
    }
    Ok(())
}

/// Attach the résumé to the first file input that has nothing attached
fn upload_resume(page: &dyn FormPage, profile: &Profile, fill: &mut FormFill, log: &mut ActivityLog) -> Result<()> {
    let fields = page.form_fields()?;
    let Some(field) = first_with_role(&fields, FieldRole::ResumeFile) else {
        return Ok(());
    };
    if !field.is_empty() {
        return Ok(());
    }

    let path = match resume_file(profile) {
        Ok(Some(path)) => path,
        Ok(None) => {
            if fill.report_once(&field.selector) {
                log.warn("No résumé available to upload");
            }
            return Ok(());
        }
        Err(e) => {
            if fill.report_once(&field.selector) {
                log.warn(format!("Could not prepare résumé file: {}", e));
            }
            return Ok(());
        }
    };

    match page.upload(&field.selector, &path) {
        Ok(()) => {
            log.info(format!("Uploaded résumé {}", path.display()));
            fill.record(FieldMapping {
                selector: field.selector.clone(),
                role: FieldRole::ResumeFile,
                topic: None,
                value: path.display().to_string(),
            });
        }
        Err(e) => {
            if fill.report_once(&field.selector) {
                log.warn(format!("Résumé upload failed: {}", e));
            }
        }
    }
    Ok(())
}

/// Answer every free-text question on the current form step
fn answer_questions(page: &dyn FormPage, ctx: &FillContext<'_>, fill: &mut FormFill, log: &mut ActivityLog) -> Result<()> {
    let fields = page.form_fields()?;
    for field in &fields {
        if detect_role(&field.attributes) != Some(FieldRole::FreeTextQuestion) || fill.holds(field) {
            continue;
        }

        let question = heuristics::question_text(&field.attributes);
        match fill.plan_question(field, ctx.profile, ctx.job) {
            QuestionPlan::Fill { topic, answer } => {
                fill_field(page, field, FieldRole::FreeTextQuestion, Some(topic), answer, fill, log);
            }
            QuestionPlan::AlreadyFilled => {
                if fill.report_once(&field.selector) {
                    log::debug!("Question '{}' already answered", question);
                }
            }
            QuestionPlan::DuplicateTopic(topic) => {
                if fill.report_once(&field.selector) {
                    log.warn(format!("Left '{}' blank: {} answer already used on this form", question, topic));
                }
            }
            QuestionPlan::Unmatched => {
                if fill.report_once(&field.selector) {
                    log.info(format!("Left '{}' blank: no template", question));
                }
            }
        }
    }
    Ok(())
}

/// Type a value and record it. A control that rejects input is logged and skipped.
fn fill_field(
    page: &dyn FormPage,
    field: &FormField,
    role: FieldRole,
    topic: Option<QuestionTopic>,
    value: String,
    fill: &mut FormFill,
    log: &mut ActivityLog,
) {
    match page.fill(&field.selector, &value) {
        Ok(()) => {
            match topic {
                Some(topic) => log.info(format!("Answered {} question", topic)),
                None => log.info(format!("Filled {}", role)),
            }
            fill.record(FieldMapping { selector: field.selector.clone(), role, topic, value });
        }
        Err(e) => {
            if fill.report_once(&field.selector) {
                log.warn(format!("Could not fill {}: {}", role, e));
            }
        }
    }
}

fn first_with_role(fields: &[FormField], role: FieldRole) -> Option<&FormField> {
    fields.iter().find(|field| detect_role(&field.attributes) == Some(role))
}

/// Résumé to upload: the profile's document if it exists, else the text body written to a temp file
fn resume_file(profile: &Profile) -> Result<Option<PathBuf>> {
    if let Some(path) = &profile.resume_path {
        if path.is_file() {
            return Ok(Some(path.clone()));
        }
        log::warn!("Résumé path {} does not exist, falling back to text", path.display());
    }

    if profile.resume.trim().is_empty() {
        return Ok(None);
    }

    let path = std::env::temp_dir().join(format!("{}-resume.txt", slug(&profile.name)));
    std::fs::write(&path, profile.resume.as_bytes())?;
    Ok(Some(path))
}

fn slug(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.split('-').filter(|s| !s.is_empty()).collect::<Vec<_>>().join("-");
    if slug.is_empty() { "candidate".to_string() } else { slug }
}

/// Strategies for every platform family, keyed by platform
pub struct StrategyRegistry {
    strategies: HashMap<Platform, Box<dyn SiteStrategy>>,
}

impl StrategyRegistry {
    /// Built-in strategies with their default selectors
    pub fn with_defaults() -> Self {
        Self::with_overrides(&HashMap::new())
    }

    /// Built-in strategies with per-platform selector overrides applied
    pub fn with_overrides(overrides: &HashMap<Platform, SiteOverrides>) -> Self {
        let none = SiteOverrides::default();
        let site = |platform: Platform| overrides.get(&platform).unwrap_or(&none);

        let mut strategies: HashMap<Platform, Box<dyn SiteStrategy>> = HashMap::new();
        strategies.insert(Platform::Linkedin, Box::new(LinkedinStrategy::new(site(Platform::Linkedin))));
        strategies.insert(Platform::Indeed, Box::new(IndeedStrategy::new(site(Platform::Indeed))));
        strategies.insert(Platform::Company, Box::new(CompanyStrategy::new(site(Platform::Company))));
        Self { strategies }
    }

    /// Replace the strategy for a platform
    pub fn register(&mut self, strategy: Box<dyn SiteStrategy>) {
        self.strategies.insert(strategy.platform(), strategy);
    }

    /// Strategy for `platform`; every platform has one
    pub fn get(&self, platform: Platform) -> &dyn SiteStrategy {
        match self.strategies.get(&platform) {
            Some(strategy) => strategy.as_ref(),
            None => unreachable!("registry is populated for every platform"),
        }
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
