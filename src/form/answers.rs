//! Canned answers for free-text application questions.

use crate::models::{Job, Profile};
use serde::{Deserialize, Serialize};

/// Question topics we know how to answer, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionTopic {
    WhyCompany,
    Experience,
    Salary,
    Availability,
}

impl QuestionTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionTopic::WhyCompany => "why-company",
            QuestionTopic::Experience => "experience",
            QuestionTopic::Salary => "salary",
            QuestionTopic::Availability => "availability",
        }
    }
}

impl std::fmt::Display for QuestionTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A topic matches when every keyword of any one of its groups appears in the question
const TOPIC_PATTERNS: &[(QuestionTopic, &[&[&str]])] = &[
    (
        QuestionTopic::WhyCompany,
        &[
            &["why", "company"],
            &["why", "join"],
            &["why", "work"],
            &["why", "interested"],
            &["why", "you want"],
            &["why", "this role"],
            &["why", "this position"],
            &["interest", "role"],
            &["interest", "position"],
            &["excites you"],
            &["motivat"],
        ],
    ),
    (
        QuestionTopic::Experience,
        &[&["experience"], &["background"], &["about yourself"], &["tell us about you"], &["qualification"]],
    ),
    (
        QuestionTopic::Salary,
        &[&["salary"], &["compensation"], &["pay expectation"], &["expected pay"], &["desired pay"]],
    ),
    (
        QuestionTopic::Availability,
        &[
            &["start date"],
            &["when can you start"],
            &["available to start"],
            &["availability"],
            &["notice period"],
            &["earliest"],
        ],
    ),
];

/// Topic of a question, first match in the fixed topic order
pub fn topic_of(question: &str) -> Option<QuestionTopic> {
    let question = question.to_lowercase();
    TOPIC_PATTERNS
        .iter()
        .find(|(_, groups)| groups.iter().any(|group| group.iter().all(|kw| question.contains(kw))))
        .map(|(topic, _)| *topic)
}

/// Templated answer for a question, or `None` to leave the field blank
pub fn answer_for(question: &str, profile: &Profile, job: &Job) -> Option<String> {
    topic_of(question).map(|topic| answer_topic(topic, profile, job))
}

/// Render the template for a topic
pub fn answer_topic(topic: QuestionTopic, profile: &Profile, job: &Job) -> String {
    match topic {
        QuestionTopic::WhyCompany => {
            let company = non_empty(&job.company).unwrap_or("your company");
            let fit = match top_skills(profile, 3) {
                Some(skills) => format!("My background in {} lines up closely with what the team is building", skills),
                None => "The role lines up closely with the work I do best".to_string(),
            };
            format!(
                "I'm excited about the {} role at {}. {}, and I'd welcome the chance to contribute at {}.",
                non_empty(&job.title).unwrap_or("open"),
                company,
                fit,
                company
            )
        }
        QuestionTopic::Experience => match non_empty(&profile.experience) {
            Some(summary) => summary.to_string(),
            None => match top_skills(profile, 5) {
                Some(skills) => format!(
                    "I have {} years of professional experience, working primarily with {}.",
                    profile.experience_years, skills
                ),
                None => format!("I have {} years of professional experience.", profile.experience_years),
            },
        },
        QuestionTopic::Salary => {
            if let Some(range) = non_empty(&job.salary) {
                format!(
                    "Based on the posted range of {}, my expectations are aligned and I'm open to discussing the full compensation package.",
                    range
                )
            } else if let Some(minimum) = profile.preferences.min_salary {
                format!(
                    "I'm targeting a base salary of around {}, and I'm open to discussing the full compensation package.",
                    minimum
                )
            } else {
                "I'm flexible and open to discussing compensation that reflects the scope of the role.".to_string()
            }
        }
        QuestionTopic::Availability => "I can start within two weeks of accepting an offer.".to_string(),
    }
}

pub(crate) fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub(crate) fn top_skills(profile: &Profile, count: usize) -> Option<String> {
    let skills: Vec<&str> = profile.skills.iter().filter_map(|s| non_empty(s)).take(count).collect();
    match skills.len() {
        0 => None,
        1 => Some(skills[0].to_string()),
        n => Some(format!("{} and {}", skills[..n - 1].join(", "), skills[n - 1])),
    }
}
