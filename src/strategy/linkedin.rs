use crate::browser::page::Locator;
use crate::platform::Platform;
use crate::strategy::{SiteOverrides, SiteSelectors, SiteStrategy};

/// LinkedIn "Easy Apply": a modal wizard of Next / Review steps ending in "Submit application"
pub struct LinkedinStrategy {
    selectors: SiteSelectors,
}

impl LinkedinStrategy {
    pub fn new(overrides: &SiteOverrides) -> Self {
        Self { selectors: default_selectors().with_overrides(overrides) }
    }
}

impl Default for LinkedinStrategy {
    fn default() -> Self {
        Self::new(&SiteOverrides::default())
    }
}

pub fn default_selectors() -> SiteSelectors {
    SiteSelectors {
        apply: vec![
            Locator::css("button.jobs-apply-button"),
            Locator::css("button[aria-label*='Easy Apply']"),
            Locator::button_text("easy apply"),
        ],
        advance: vec![
            Locator::css("button[aria-label='Continue to next step']"),
            Locator::css("button[aria-label='Review your application']"),
            Locator::button_text("next"),
            Locator::button_text("review"),
        ],
        submit: vec![
            Locator::css("button[aria-label='Submit application']"),
            Locator::button_text("submit application"),
        ],
        generic_submit: vec![],
        fallback_url: Some("https://www.linkedin.com/jobs/view/{id}/".to_string()),
        max_steps: 8,
    }
}

impl SiteStrategy for LinkedinStrategy {
    fn platform(&self) -> Platform {
        Platform::Linkedin
    }

    fn selectors(&self) -> &SiteSelectors {
        &self.selectors
    }

    fn missing_entry_hint(&self) -> &str {
        "Easy Apply button not found (external application, or the browser profile is not signed in)"
    }
}
