use crate::browser::page::FormField;
use crate::form::answers::{self, QuestionTopic};
use crate::form::heuristics::{self, FieldRole};
use crate::models::{Job, Profile};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// One filled control: which role it was given and what went into it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMapping {
    pub selector: String,
    pub role: FieldRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<QuestionTopic>,
    pub value: String,
}

/// What to do with a free-text question field
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionPlan {
    Fill { topic: QuestionTopic, answer: String },
    /// Already has a value; never overwritten
    AlreadyFilled,
    /// Topic was answered earlier in this attempt
    DuplicateTopic(QuestionTopic),
    /// No known topic, left blank
    Unmatched,
}

/// Per-attempt record of filled fields, discarded once the form is submitted or abandoned.
///
/// Fields are keyed by selector in fill order. A question topic answers at most one field.
#[derive(Debug, Default)]
pub struct FormFill {
    mappings: IndexMap<String, FieldMapping>,
    used_topics: HashSet<QuestionTopic>,
    reported: HashSet<String>,
}

impl FormFill {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for a contact role, or `None` if the field already holds something or the profile has nothing
    pub fn contact_value(&self, field: &FormField, role: FieldRole, profile: &Profile) -> Option<String> {
        if !field.is_empty() {
            return None;
        }

        let value = match role {
            FieldRole::FullName => &profile.name,
            FieldRole::Email => &profile.email,
            FieldRole::Phone => &profile.phone,
            FieldRole::ResumeFile | FieldRole::FreeTextQuestion => return None,
        };

        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Decide how to answer a free-text field
    pub fn plan_question(&self, field: &FormField, profile: &Profile, job: &Job) -> QuestionPlan {
        if !field.is_empty() {
            return QuestionPlan::AlreadyFilled;
        }

        match answers::topic_of(heuristics::question_text(&field.attributes)) {
            None => QuestionPlan::Unmatched,
            Some(topic) if self.used_topics.contains(&topic) => QuestionPlan::DuplicateTopic(topic),
            Some(topic) => QuestionPlan::Fill { topic, answer: answers::answer_topic(topic, profile, job) },
        }
    }

    pub fn record(&mut self, mapping: FieldMapping) {
        if let Some(topic) = mapping.topic {
            self.used_topics.insert(topic);
        }
        self.mappings.insert(mapping.selector.clone(), mapping);
    }

    /// True the first time a skipped selector is reported, so multi-step forms log it once
    pub fn report_once(&mut self, selector: &str) -> bool {
        self.reported.insert(selector.to_string())
    }

    pub fn is_filled(&self, selector: &str) -> bool {
        self.mappings.contains_key(selector)
    }

    /// True if this attempt filled `field` and it still holds a value.
    ///
    /// A recorded selector that now reads empty belongs to a replaced control and is filled again.
    pub fn holds(&self, field: &FormField) -> bool {
        self.is_filled(&field.selector) && !field.is_empty()
    }

    pub fn mappings(&self) -> impl Iterator<Item = &FieldMapping> {
        self.mappings.values()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::page::FieldAttributes;

    fn field(selector: &str, tag: &str, label: &str, value: &str) -> FormField {
        FormField {
            selector: selector.into(),
            attributes: FieldAttributes { tag: tag.into(), label: label.into(), ..Default::default() },
            value: value.into(),
        }
    }

    fn profile() -> Profile {
        Profile { name: "Ada Lovelace".into(), email: "ada@example.com".into(), ..Default::default() }
    }

    #[test]
    fn test_contact_value_never_clobbers() {
        let fill = FormFill::new();
        let prefilled = field("#name", "input", "Name", "Grace Hopper");
        assert_eq!(fill.contact_value(&prefilled, FieldRole::FullName, &profile()), None);

        let empty = field("#name", "input", "Name", " ");
        assert_eq!(fill.contact_value(&empty, FieldRole::FullName, &profile()), Some("Ada Lovelace".into()));
    }

    #[test]
    fn test_contact_value_skips_missing_profile_data() {
        let fill = FormFill::new();
        let phone = field("#phone", "input", "Phone", "");
        assert_eq!(fill.contact_value(&phone, FieldRole::Phone, &profile()), None);
    }

    #[test]
    fn test_duplicate_topic_is_skipped() {
        let mut fill = FormFill::new();
        let job = Job { company: "Acme".into(), ..Default::default() };
        let first = field("#q1", "textarea", "Why do you want to join Acme?", "");
        let second = field("#q2", "textarea", "Why are you interested in this company?", "");

        let QuestionPlan::Fill { topic, answer } = fill.plan_question(&first, &profile(), &job) else {
            panic!("Expected first question to be filled");
        };
        fill.record(FieldMapping { selector: first.selector.clone(), role: FieldRole::FreeTextQuestion, topic: Some(topic), value: answer });

        assert_eq!(fill.plan_question(&second, &profile(), &job), QuestionPlan::DuplicateTopic(QuestionTopic::WhyCompany));
        assert!(fill.is_filled("#q1"));
        assert_eq!(fill.len(), 1);
    }

    #[test]
    fn test_question_plans() {
        let fill = FormFill::new();
        let job = Job::default();
        assert_eq!(
            fill.plan_question(&field("#q", "textarea", "Salary expectations", "120k"), &profile(), &job),
            QuestionPlan::AlreadyFilled
        );
        assert_eq!(fill.plan_question(&field("#q", "textarea", "Pronouns", ""), &profile(), &job), QuestionPlan::Unmatched);
    }

    #[test]
    fn test_replaced_control_is_not_held() {
        let mut fill = FormFill::new();
        fill.record(FieldMapping {
            selector: "[data-auto-apply-id=\"0\"]".into(),
            role: FieldRole::FullName,
            topic: None,
            value: "Ada Lovelace".into(),
        });

        let same = field("[data-auto-apply-id=\"0\"]", "input", "Full name", "Ada Lovelace");
        assert!(fill.holds(&same));

        let replaced = field("[data-auto-apply-id=\"0\"]", "textarea", "Tell us about your experience", "");
        assert!(!fill.holds(&replaced));
        assert!(fill.is_filled(&replaced.selector));
    }

    #[test]
    fn test_report_once() {
        let mut fill = FormFill::new();
        assert!(fill.report_once("#q"));
        assert!(!fill.report_once("#q"));
        assert!(fill.report_once("#other"));
    }
}
