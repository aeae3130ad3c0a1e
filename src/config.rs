//! Agent configuration: a JSON file with every field defaulted, plus environment overrides.

use crate::browser::config::LaunchOptions;
use crate::error::{BrowserError, Result};
use crate::platform::Platform;
use crate::strategy::{FlowTiming, SiteOverrides};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Skip the browser and synthesize outcomes
    pub demo_mode: bool,
    /// Probability of a synthesized success
    pub demo_success_rate: f64,
    /// Simulated latency of a demo attempt
    pub demo_delay_ms: u64,

    /// Bound on locating any single control
    pub step_timeout_ms: u64,
    pub poll_interval_ms: u64,
    /// Pause after navigation for client-side rendering
    pub settle_ms: u64,
    pub after_click_ms: u64,
    pub after_submit_ms: u64,

    pub launch: LaunchOptions,
    pub runner: RunnerConfig,

    /// Per-platform selector overrides
    pub sites: HashMap<Platform, SiteOverrides>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            demo_mode: false,
            demo_success_rate: 0.9,
            demo_delay_ms: 2000,
            step_timeout_ms: 10_000,
            poll_interval_ms: 250,
            settle_ms: 1500,
            after_click_ms: 1000,
            after_submit_ms: 2000,
            launch: LaunchOptions::default(),
            runner: RunnerConfig::default(),
            sites: HashMap::new(),
        }
    }
}

/// Queue processing limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Jobs scoring below this are rejected without an attempt
    pub min_score: u8,
    /// Pause between consecutive attempts
    pub delay_between_ms: u64,
    /// Rolling one-hour budget of attempts
    pub max_per_hour: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { min_score: 60, delay_between_ms: 30_000, max_per_hour: 20 }
    }
}

impl AgentConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| BrowserError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| BrowserError::InvalidConfig(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `AUTO_APPLY_DEMO`, `AUTO_APPLY_HEADLESS`, and `AUTO_APPLY_CHROME_PATH`
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(flag) = lookup("AUTO_APPLY_DEMO").and_then(|v| parse_flag(&v)) {
            self.demo_mode = flag;
        }
        if let Some(flag) = lookup("AUTO_APPLY_HEADLESS").and_then(|v| parse_flag(&v)) {
            self.launch.headless = flag;
        }
        if let Some(path) = lookup("AUTO_APPLY_CHROME_PATH").filter(|v| !v.trim().is_empty()) {
            self.launch.chrome_path = Some(path.into());
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.demo_success_rate) {
            return Err(BrowserError::InvalidConfig(format!(
                "demo_success_rate must be within [0, 1], got {}",
                self.demo_success_rate
            )));
        }
        if self.step_timeout_ms == 0 {
            return Err(BrowserError::InvalidConfig("step_timeout_ms must be positive".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(BrowserError::InvalidConfig("poll_interval_ms must be positive".to_string()));
        }
        if self.poll_interval_ms > self.step_timeout_ms {
            return Err(BrowserError::InvalidConfig(format!(
                "poll_interval_ms ({}) exceeds step_timeout_ms ({})",
                self.poll_interval_ms, self.step_timeout_ms
            )));
        }
        if self.runner.max_per_hour == 0 {
            return Err(BrowserError::InvalidConfig("runner.max_per_hour must be positive".to_string()));
        }
        if self.runner.min_score > 100 {
            return Err(BrowserError::InvalidConfig("runner.min_score must be at most 100".to_string()));
        }
        Ok(())
    }

    pub fn flow_timing(&self) -> FlowTiming {
        FlowTiming {
            step_timeout: Duration::from_millis(self.step_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            after_click: Duration::from_millis(self.after_click_ms),
            after_submit: Duration::from_millis(self.after_submit_ms),
        }
    }

    pub fn demo_delay(&self) -> Duration {
        Duration::from_millis(self.demo_delay_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
