use crate::browser::page::Locator;
use crate::platform::Platform;
use crate::strategy::{SiteOverrides, SiteSelectors, SiteStrategy};

/// Indeed Apply: "Apply now" opens a multi-page flow advanced with "Continue"
pub struct IndeedStrategy {
    selectors: SiteSelectors,
}

impl IndeedStrategy {
    pub fn new(overrides: &SiteOverrides) -> Self {
        Self { selectors: default_selectors().with_overrides(overrides) }
    }
}

impl Default for IndeedStrategy {
    fn default() -> Self {
        Self::new(&SiteOverrides::default())
    }
}

pub fn default_selectors() -> SiteSelectors {
    SiteSelectors {
        apply: vec![
            Locator::css("#indeedApplyButton"),
            Locator::css("button[id^='indeedApplyButton']"),
            Locator::css(".jobsearch-IndeedApplyButton-newDesign"),
            Locator::button_text("apply now"),
        ],
        advance: vec![
            Locator::css("button[data-testid='continue-button']"),
            Locator::css(".ia-continueButton"),
            Locator::button_text("continue"),
        ],
        submit: vec![
            Locator::css("button[data-testid='submit-application-button']"),
            Locator::button_text("submit your application"),
        ],
        generic_submit: vec![],
        fallback_url: Some("https://www.indeed.com/viewjob?jk={id}".to_string()),
        max_steps: 8,
    }
}

impl SiteStrategy for IndeedStrategy {
    fn platform(&self) -> Platform {
        Platform::Indeed
    }

    fn selectors(&self) -> &SiteSelectors {
        &self.selectors
    }

    fn missing_entry_hint(&self) -> &str {
        "Apply now button not found (the posting may redirect to the employer's site)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    #[test]
    fn test_indeed_fallback_url() {
        let job = Job { id: "a1b2c3".into(), ..Default::default() };
        assert_eq!(IndeedStrategy::default().entry_url(&job).as_deref(), Some("https://www.indeed.com/viewjob?jk=a1b2c3"));
    }

    #[test]
    fn test_indeed_override_keeps_platform() {
        let overrides = SiteOverrides { apply: Some(vec![Locator::css("#apply-v2")]), ..Default::default() };
        let strategy = IndeedStrategy::new(&overrides);
        assert_eq!(strategy.platform(), Platform::Indeed);
        assert_eq!(strategy.selectors().apply, vec![Locator::css("#apply-v2")]);
        assert!(!strategy.selectors().advance.is_empty());
    }
}
