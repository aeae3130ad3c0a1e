use crate::models::ApplicationStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub severity: Severity,
}

/// Append-only activity trail for one application attempt.
///
/// Every entry is mirrored to the `log` facade at the matching level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Info | Severity::Success => log::info!("{}", message),
            Severity::Warning => log::warn!("{}", message),
            Severity::Error => log::error!("{}", message),
        }
        self.entries.push(LogEntry { timestamp: Utc::now(), message, severity });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Severity::Success, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    /// Append every entry of `other`, keeping its order
    pub fn extend(&mut self, other: ActivityLog) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|e| e.severity == severity).count()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

/// Lifecycle of one attempt: `Idle -> Processing -> {Completed, Error}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    Idle,
    Processing,
    Completed,
    Error,
}

impl AgentState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentState::Completed | AgentState::Error)
    }
}

/// Terminal result of one automation attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationOutcome {
    pub state: AgentState,
    /// Status written back onto the caller's record
    pub status: ApplicationStatus,
    pub logs: Vec<LogEntry>,
}

impl ApplicationOutcome {
    pub fn completed(logs: ActivityLog) -> Self {
        Self { state: AgentState::Completed, status: ApplicationStatus::Submitted, logs: logs.into_entries() }
    }

    pub fn failed(logs: ActivityLog) -> Self {
        Self { state: AgentState::Error, status: ApplicationStatus::Failed, logs: logs.into_entries() }
    }

    pub fn is_success(&self) -> bool {
        self.state == AgentState::Completed
    }

    /// Whether any log entry mentions `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.logs.iter().any(|entry| entry.message.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_log_preserves_order() {
        let mut log = ActivityLog::new();
        log.info("first");
        log.warn("second");
        log.error("third");

        let messages: Vec<&str> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(log.count(Severity::Error), 1);
    }

    #[test]
    fn test_extend_appends() {
        let mut outer = ActivityLog::new();
        outer.info("start");
        let mut inner = ActivityLog::new();
        inner.success("done");
        outer.extend(inner);

        assert_eq!(outer.len(), 2);
        assert_eq!(outer.entries()[1].severity, Severity::Success);
    }

    #[test]
    fn test_outcome_constructors() {
        let mut log = ActivityLog::new();
        log.error("No application URL for job 'Rust Engineer'");
        let outcome = ApplicationOutcome::failed(log);

        assert_eq!(outcome.state, AgentState::Error);
        assert_eq!(outcome.status, ApplicationStatus::Failed);
        assert!(outcome.mentions("Rust Engineer"));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_log_serializes_as_array() {
        let mut log = ActivityLog::new();
        log.info("hello");
        let json = serde_json::to_value(&log).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["severity"], "info");
    }
}
