use crate::browser::page::Locator;
use serde::{Deserialize, Serialize};

/// Locator chains and navigation hints for one site family.
///
/// Each chain is evaluated first-match-wins, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Entry point that opens the application form
    pub apply: Vec<Locator>,
    /// Controls that move a multi-step form forward (Next, Review, Continue)
    pub advance: Vec<Locator>,
    /// Final submission control
    pub submit: Vec<Locator>,
    /// Generic submit controls (`type=submit`), tried only after `advance` has no match
    #[serde(default)]
    pub generic_submit: Vec<Locator>,
    /// URL template used when a job has no application URL; `{id}` is replaced with the job id
    pub fallback_url: Option<String>,
    /// Upper bound on form steps before giving up
    pub max_steps: usize,
}

impl SiteSelectors {
    /// Build the fallback URL for a job id, if this family has one
    pub fn fallback_url_for(&self, job_id: &str) -> Option<String> {
        let id = job_id.trim();
        if id.is_empty() {
            return None;
        }
        self.fallback_url.as_ref().map(|template| template.replace("{id}", id))
    }

    /// Replace any chain or setting the overrides specify
    pub fn with_overrides(mut self, overrides: &SiteOverrides) -> Self {
        if let Some(apply) = &overrides.apply {
            self.apply = apply.clone();
        }
        if let Some(advance) = &overrides.advance {
            self.advance = advance.clone();
        }
        if let Some(submit) = &overrides.submit {
            self.submit = submit.clone();
        }
        if let Some(generic_submit) = &overrides.generic_submit {
            self.generic_submit = generic_submit.clone();
        }
        if let Some(url) = &overrides.fallback_url {
            self.fallback_url = Some(url.clone());
        }
        if let Some(max_steps) = overrides.max_steps {
            self.max_steps = max_steps.max(1);
        }
        self
    }
}

/// Per-platform configuration overrides; absent fields keep the built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply: Option<Vec<Locator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance: Option<Vec<Locator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit: Option<Vec<Locator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_submit: Option<Vec<Locator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors() -> SiteSelectors {
        SiteSelectors {
            apply: vec![Locator::css("#apply")],
            advance: vec![],
            submit: vec![Locator::css("#submit")],
            generic_submit: vec![Locator::css("button[type='submit']")],
            fallback_url: Some("https://jobs.example.com/{id}".into()),
            max_steps: 3,
        }
    }

    #[test]
    fn test_fallback_url_for() {
        assert_eq!(selectors().fallback_url_for("42"), Some("https://jobs.example.com/42".into()));
        assert_eq!(selectors().fallback_url_for("  "), None);
    }

    #[test]
    fn test_overrides_replace_only_given_fields() {
        let overrides: SiteOverrides =
            serde_json::from_value(serde_json::json!({"submit": ["button.send", {"xpath": "//button[@id='go']"}]}))
                .unwrap();

        let merged = selectors().with_overrides(&overrides);
        assert_eq!(merged.apply, vec![Locator::css("#apply")]);
        assert_eq!(merged.submit, vec![Locator::css("button.send"), Locator::xpath("//button[@id='go']")]);
        assert_eq!(merged.generic_submit, vec![Locator::css("button[type='submit']")]);
        assert_eq!(merged.max_steps, 3);

        let cleared = selectors().with_overrides(&SiteOverrides { generic_submit: Some(vec![]), ..Default::default() });
        assert!(cleared.generic_submit.is_empty());
    }

    #[test]
    fn test_max_steps_override_is_at_least_one() {
        let overrides = SiteOverrides { max_steps: Some(0), ..Default::default() };
        assert_eq!(selectors().with_overrides(&overrides).max_steps, 1);
    }
}
