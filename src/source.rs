use crate::error::{BrowserError, Result};
use crate::models::Job;
use async_trait::async_trait;
use std::path::PathBuf;

/// Where jobs come from. Implementations may hit a job board API or read a local export.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Jobs matching every whitespace-separated term of `query`; an empty query matches all
    async fn search(&self, query: &str) -> Result<Vec<Job>>;
}

/// A JSON array of jobs on disk
#[derive(Debug, Clone)]
pub struct FileJobSource {
    path: PathBuf,
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<Vec<Job>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| BrowserError::InvalidConfig(format!("Failed to read {}: {}", self.path.display(), e)))?;
        let jobs: Vec<Job> = serde_json::from_str(&raw)?;
        log::debug!("Loaded {} jobs from {}", jobs.len(), self.path.display());
        Ok(jobs)
    }
}

#[async_trait]
impl JobSource for FileJobSource {
    async fn search(&self, query: &str) -> Result<Vec<Job>> {
        let jobs = self.load().await?;
        Ok(jobs.into_iter().filter(|job| matches_query(job, query)).collect())
    }
}

fn matches_query(job: &Job, query: &str) -> bool {
    let haystack = format!("{} {} {} {} {}", job.title, job.company, job.location, job.description, job.tags.join(" "))
        .to_lowercase();
    query.split_whitespace().all(|term| haystack.contains(&term.to_lowercase()))
}
