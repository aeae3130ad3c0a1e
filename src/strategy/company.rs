use crate::browser::page::Locator;
use crate::platform::Platform;
use crate::strategy::{SiteOverrides, SiteSelectors, SiteStrategy};

/// Arbitrary company career sites and hosted ATS boards (Greenhouse, Lever, Workable, ...)
pub struct CompanyStrategy {
    selectors: SiteSelectors,
}

impl CompanyStrategy {
    pub fn new(overrides: &SiteOverrides) -> Self {
        Self { selectors: default_selectors().with_overrides(overrides) }
    }
}

impl Default for CompanyStrategy {
    fn default() -> Self {
        Self::new(&SiteOverrides::default())
    }
}

pub fn default_selectors() -> SiteSelectors {
    SiteSelectors {
        apply: vec![
            Locator::css("#apply_button"),
            Locator::css("a.postings-btn"),
            Locator::css("[data-qa='btn-apply']"),
            Locator::css("a[href*='apply']"),
            Locator::button_text("apply for this job"),
            Locator::button_text("apply"),
        ],
        advance: vec![Locator::button_text("next"), Locator::button_text("continue")],
        submit: vec![
            Locator::css("#submit_app"),
            Locator::css("button[data-qa='btn-submit']"),
            Locator::button_text("submit application"),
            Locator::button_text("submit"),
        ],
        generic_submit: vec![Locator::css("button[type='submit']"), Locator::css("input[type='submit']")],
        fallback_url: None,
        max_steps: 4,
    }
}

impl SiteStrategy for CompanyStrategy {
    fn platform(&self) -> Platform {
        Platform::Company
    }

    fn selectors(&self) -> &SiteSelectors {
        &self.selectors
    }
}
