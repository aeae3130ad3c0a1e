//! Fit scoring of a job against a candidate profile.
//!
//! Scores start at a neutral 50 and accumulate fixed bonuses; the result is clamped to
//! `0..=100`. Everything here is pure so the score can gate automation decisions.

use crate::models::{Job, Profile};
use serde::{Deserialize, Serialize};

const BASE_SCORE: i64 = 50;
const SKILL_BONUS: i64 = 10;
const SENIORITY_BONUS: i64 = 15;
const REMOTE_BONUS: i64 = 10;
const SALARY_BONUS: i64 = 10;

/// Years at which a candidate counts as senior
const SENIOR_YEARS: u32 = 3;

/// Score breakdown for a single job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub score: u8,
    pub matched_skills: Vec<String>,
    pub reasons: Vec<String>,
}

impl MatchReport {
    /// Human-readable summary suitable for an application record's match reason
    pub fn summary(&self) -> String {
        if self.reasons.is_empty() {
            format!("Score {}: no specific matches", self.score)
        } else {
            format!("Score {}: {}", self.score, self.reasons.join("; "))
        }
    }
}

/// Fit score in `0..=100`
pub fn score(profile: &Profile, job: &Job) -> u8 {
    evaluate(profile, job).score
}

/// Compute the fit score together with the reasons that contributed to it
pub fn evaluate(profile: &Profile, job: &Job) -> MatchReport {
    let mut total = BASE_SCORE;
    let mut reasons = Vec::new();

    let matched_skills: Vec<String> = profile
        .skills
        .iter()
        .filter(|skill| skill_matches_any_tag(skill, &job.tags))
        .cloned()
        .collect();
    if !matched_skills.is_empty() {
        total += SKILL_BONUS * matched_skills.len() as i64;
        reasons.push(format!("skills match: {}", matched_skills.join(", ")));
    }

    let title = job.title.to_lowercase();
    let years = profile.experience_years;
    if title.contains("senior") && years >= SENIOR_YEARS {
        total += SENIORITY_BONUS;
        reasons.push(format!("senior role with {} years of experience", years));
    } else if title.contains("junior") && years < SENIOR_YEARS {
        total += SENIORITY_BONUS;
        reasons.push("junior role fits experience level".to_string());
    }

    if profile.preferences.remote && job.location.to_lowercase().contains("remote") {
        total += REMOTE_BONUS;
        reasons.push("remote position".to_string());
    }

    if let (Some(floor), Some(minimum)) = (parse_salary_floor(&job.salary), profile.preferences.min_salary) {
        if floor >= minimum {
            total += SALARY_BONUS;
            reasons.push(format!("salary floor {} meets minimum {}", floor, minimum));
        }
    }

    MatchReport { score: total.clamp(0, 100) as u8, matched_skills, reasons }
}

/// Substring match in either direction, case-insensitive. Blank skills and tags never match.
fn skill_matches_any_tag(skill: &str, tags: &[String]) -> bool {
    let skill = skill.trim().to_lowercase();
    if skill.is_empty() {
        return false;
    }

    tags.iter().any(|tag| {
        let tag = tag.trim().to_lowercase();
        !tag.is_empty() && (skill.contains(&tag) || tag.contains(&skill))
    })
}

/// Parse the first number in a salary string. Commas are ignored and a `k` suffix means thousands.
pub fn parse_salary_floor(salary: &str) -> Option<u64> {
    let bytes = salary.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;

    let mut value: u64 = 0;
    let mut idx = start;
    while idx < bytes.len() {
        match bytes[idx] {
            b @ b'0'..=b'9' => value = value.checked_mul(10)?.checked_add(u64::from(b - b'0'))?,
            b',' => {}
            _ => break,
        }
        idx += 1;
    }

    // Skip a decimal part such as "120.5k"
    let mut fraction = 0.0;
    if idx < bytes.len() && bytes[idx] == b'.' {
        let frac_start = idx + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        fraction = salary[idx..frac_end].parse::<f64>().unwrap_or(0.0);
        idx = frac_end;
    }

    let rest = salary[idx..].trim_start();
    if rest.starts_with(['k', 'K']) {
        Some(((value as f64 + fraction) * 1000.0) as u64)
    } else {
        Some(value)
    }
}
