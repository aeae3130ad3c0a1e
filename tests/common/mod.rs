//! In-memory browser used by the integration tests.
//!
//! A [`FakeSite`] is a list of steps; each step exposes some controls and form fields.
//! Clicking a step's `next_on` control moves to the following step. Every page opened by the
//! driver shares one [`FakeState`], so tests can inspect what the agent did.

#![allow(dead_code)]

use auto_apply::browser::{BrowserDriver, BrowserHandle, FieldAttributes, FormField, FormPage, Locator};
use auto_apply::{AgentConfig, BrowserError, Job, LaunchOptions, Profile, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct FakeStep {
    pub controls: Vec<Locator>,
    pub fields: Vec<FormField>,
    /// Clicking this control shows the next step
    pub next_on: Option<Locator>,
}

impl FakeStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control(mut self, locator: Locator) -> Self {
        self.controls.push(locator);
        self
    }

    pub fn field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn next_on(mut self, locator: Locator) -> Self {
        self.controls.push(locator.clone());
        self.next_on = Some(locator);
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub steps: Vec<FakeStep>,
    pub current: usize,
    pub fail_navigation: bool,
    /// File inputs reject every upload
    pub fail_uploads: bool,

    pub visited: Vec<String>,
    pub clicks: Vec<Locator>,
    pub fills: Vec<(String, String)>,
    pub uploads: Vec<(String, PathBuf)>,
    pub pages_opened: usize,
    pub pages_closed: usize,
}

impl FakeState {
    fn step(&self) -> Option<&FakeStep> {
        self.steps.get(self.current)
    }

    pub fn filled(&self, selector: &str) -> Option<&str> {
        self.fills.iter().find(|(s, _)| s == selector).map(|(_, v)| v.as_str())
    }
}

/// Shared handle to the fake browser's state
#[derive(Clone, Default)]
pub struct FakeSite(Arc<Mutex<FakeState>>);

impl FakeSite {
    pub fn new(steps: Vec<FakeStep>) -> Self {
        Self(Arc::new(Mutex::new(FakeState { steps, ..Default::default() })))
    }

    pub fn failing_navigation() -> Self {
        Self(Arc::new(Mutex::new(FakeState { fail_navigation: true, ..Default::default() })))
    }

    pub fn failing_uploads(self) -> Self {
        self.state().fail_uploads = true;
        self
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.0.lock().unwrap()
    }
}

pub struct FakeDriver {
    site: FakeSite,
    launches: AtomicUsize,
}

impl FakeDriver {
    pub fn new(site: FakeSite) -> Arc<Self> {
        Arc::new(Self { site, launches: AtomicUsize::new(0) })
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }
}

impl BrowserDriver for FakeDriver {
    fn launch(&self, _options: &LaunchOptions) -> Result<Box<dyn BrowserHandle>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeHandle { site: self.site.clone() }))
    }
}

struct FakeHandle {
    site: FakeSite,
}

impl BrowserHandle for FakeHandle {
    fn new_page(&self) -> Result<Box<dyn FormPage>> {
        let mut state = self.site.state();
        state.pages_opened += 1;
        state.current = 0;
        Ok(Box::new(FakePage { site: self.site.clone() }))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

struct FakePage {
    site: FakeSite,
}

impl FormPage for FakePage {
    fn goto(&self, url: &str) -> Result<()> {
        let mut state = self.site.state();
        if state.fail_navigation {
            return Err(BrowserError::NavigationFailed(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)));
        }
        state.visited.push(url.to_string());
        Ok(())
    }

    fn exists(&self, locator: &Locator) -> bool {
        self.site.state().step().is_some_and(|step| step.controls.contains(locator))
    }

    fn click(&self, locator: &Locator) -> Result<()> {
        let mut state = self.site.state();
        let Some(step) = state.step() else {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        };
        if !step.controls.contains(locator) {
            return Err(BrowserError::ElementNotFound(locator.to_string()));
        }
        let advances = step.next_on.as_ref() == Some(locator);

        state.clicks.push(locator.clone());
        if advances {
            state.current += 1;
        }
        Ok(())
    }

    fn form_fields(&self) -> Result<Vec<FormField>> {
        Ok(self.site.state().step().map(|step| step.fields.clone()).unwrap_or_default())
    }

    fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let mut state = self.site.state();
        let current = state.current;
        let field = state
            .steps
            .get_mut(current)
            .and_then(|step| step.fields.iter_mut().find(|f| f.selector == selector))
            .ok_or_else(|| BrowserError::ElementNotFound(selector.to_string()))?;
        field.value = value.to_string();
        state.fills.push((selector.to_string(), value.to_string()));
        Ok(())
    }

    fn upload(&self, selector: &str, path: &Path) -> Result<()> {
        let mut state = self.site.state();
        if state.fail_uploads {
            return Err(BrowserError::UploadFailed { path: path.display().to_string(), reason: "input detached".into() });
        }
        let current = state.current;
        let field = state
            .steps
            .get_mut(current)
            .and_then(|step| step.fields.iter_mut().find(|f| f.selector == selector))
            .ok_or_else(|| BrowserError::UploadFailed { path: path.display().to_string(), reason: "no such input".into() })?;
        field.value = path.display().to_string();
        state.uploads.push((selector.to_string(), path.to_path_buf()));
        Ok(())
    }

    fn pause(&self, _duration: Duration) {}

    fn close(&self) -> Result<()> {
        self.site.state().pages_closed += 1;
        Ok(())
    }
}

pub fn input(selector: &str, input_type: &str, label: &str, value: &str) -> FormField {
    FormField {
        selector: selector.into(),
        attributes: FieldAttributes {
            tag: "input".into(),
            input_type: input_type.into(),
            label: label.into(),
            ..Default::default()
        },
        value: value.into(),
    }
}

pub fn textarea(selector: &str, label: &str) -> FormField {
    FormField {
        selector: selector.into(),
        attributes: FieldAttributes { tag: "textarea".into(), label: label.into(), ..Default::default() },
        value: String::new(),
    }
}

pub fn profile() -> Profile {
    Profile {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        phone: "+1 555 0100".into(),
        experience: "Six years building data pipelines and distributed systems in Rust.".into(),
        experience_years: 6,
        skills: vec!["Rust".into(), "Tokio".into(), "PostgreSQL".into()],
        ..Default::default()
    }
}

pub fn job(url: Option<&str>) -> Job {
    Job {
        id: "job-1".into(),
        title: "Senior Rust Engineer".into(),
        company: "Acme".into(),
        location: "Remote".into(),
        salary: "$150k - $180k".into(),
        tags: vec!["rust".into(), "backend".into()],
        application_url: url.map(str::to_string),
        ..Default::default()
    }
}

/// Config for fast tests: no demo latency
pub fn config(demo: bool) -> AgentConfig {
    AgentConfig { demo_mode: demo, demo_delay_ms: 0, ..Default::default() }
}
