//! Data handed in by the caller: the candidate profile, a job posting, and the history record
//! the agent writes its terminal status onto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Candidate data used to fill application forms
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,

    /// Free-text experience summary
    #[serde(default)]
    pub experience: String,

    /// Years of professional experience, used for seniority matching
    #[serde(default)]
    pub experience_years: u32,

    /// Ordered list of skills, most relevant first
    #[serde(default)]
    pub skills: Vec<String>,

    /// Plain-text résumé body
    #[serde(default)]
    pub resume: String,

    /// Résumé document on disk, uploaded in preference to the plain-text body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_path: Option<PathBuf>,

    #[serde(default)]
    pub preferences: JobPreferences,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobPreferences {
    #[serde(default)]
    pub remote: bool,

    /// Minimum acceptable annual salary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<u64>,
}

/// A single job posting
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,

    /// Free-form salary range, e.g. "$120k - $150k"
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
}

/// Status carried by an application history record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Analyzing,
    Matched,
    Rejected,
    Applying,
    #[serde(alias = "applied")]
    Submitted,
    Failed,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Analyzing => "analyzing",
            ApplicationStatus::Matched => "matched",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Applying => "applying",
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Submitted | ApplicationStatus::Failed)
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted history entry. Owned by the caller; the agent only writes `status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: String,
    pub job_id: String,
    pub match_score: u8,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Create a pending record for a job with a freshly generated id
    pub fn new(job_id: impl Into<String>, match_score: u8) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            job_id: job_id.into(),
            match_score,
            status: ApplicationStatus::Pending,
            match_reason: None,
            cover_letter: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_deserializes_camel_case() {
        let json = serde_json::json!({
            "id": "42",
            "title": "Senior Rust Engineer",
            "company": "Acme",
            "applicationUrl": "https://boards.greenhouse.io/acme/jobs/42"
        });

        let job: Job = serde_json::from_value(json).unwrap();
        assert_eq!(job.application_url.as_deref(), Some("https://boards.greenhouse.io/acme/jobs/42"));
        assert!(job.tags.is_empty());
    }

    #[test]
    fn test_status_accepts_applied_alias() {
        let status: ApplicationStatus = serde_json::from_str("\"applied\"").unwrap();
        assert_eq!(status, ApplicationStatus::Submitted);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"submitted\"");
    }

    #[test]
    fn test_new_record_is_pending() {
        let a = ApplicationRecord::new("1", 80);
        let b = ApplicationRecord::new("1", 80);
        assert_eq!(a.status, ApplicationStatus::Pending);
        assert_ne!(a.id, b.id);
        assert!(!a.status.is_terminal());
    }
}
