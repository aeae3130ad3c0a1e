use crate::browser::config::LaunchOptions;
use crate::browser::page::{FormField, FormPage, Locator};
use crate::browser::session::{BrowserDriver, BrowserHandle};
use crate::error::{BrowserError, Result};
use headless_chrome::{Browser, Element, Tab};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Grace period after navigation for client-side rendering to finish
const SETTLE_DELAY: Duration = Duration::from_millis(1500);

/// Launches real Chrome/Chromium processes through headless_chrome
#[derive(Debug, Clone, Copy)]
pub struct ChromeDriver {
    /// Pause after each navigation
    pub settle: Duration,
}

impl Default for ChromeDriver {
    fn default() -> Self {
        Self { settle: SETTLE_DELAY }
    }
}

impl ChromeDriver {
    pub fn with_settle(settle: Duration) -> Self {
        Self { settle }
    }
}

impl BrowserDriver for ChromeDriver {
    fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserHandle>> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        launch_opts.idle_browser_timeout = Duration::from_secs(options.idle_timeout_secs);
        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = &options.chrome_path {
            launch_opts.path = Some(path.clone());
        }

        if let Some(dir) = &options.user_data_dir {
            launch_opts.user_data_dir = Some(dir.clone());
        }

        let browser = Browser::new(launch_opts).map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        Ok(Box::new(ChromeHandle { browser: Some(browser), settle: self.settle }))
    }
}

/// A running Chrome process; pages are tabs in its default context
pub struct ChromeHandle {
    browser: Option<Browser>,
    settle: Duration,
}

impl BrowserHandle for ChromeHandle {
    fn new_page(&self) -> Result<Box<dyn FormPage>> {
        let browser = self.browser.as_ref().ok_or(BrowserError::SessionClosed)?;
        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Box::new(ChromePage { tab, settle: self.settle }))
    }

    fn close(&mut self) -> Result<()> {
        if let Some(browser) = self.browser.take() {
            let tabs = browser
                .get_tabs()
                .lock()
                .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
                .clone();
            for tab in tabs {
                let _ = tab.close(false); // Ignore errors on individual tab closes
            }
            // The process is killed when the Browser is dropped
            drop(browser);
        }
        Ok(())
    }
}

/// One tab driven as an application form
pub struct ChromePage {
    tab: Arc<Tab>,
    settle: Duration,
}

impl ChromePage {
    fn find(&self, locator: &Locator) -> Result<Element<'_>> {
        let found = match locator {
            Locator::Css(selector) => self.tab.find_element(selector),
            Locator::XPath { xpath } => self.tab.find_element_by_xpath(xpath),
        };
        found.map_err(|e| BrowserError::ElementNotFound(format!("Element '{}' not found: {}", locator, e)))
    }
}

impl FormPage for ChromePage {
    fn goto(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        // headless_chrome has no network-idle wait
        std::thread::sleep(self.settle);
        Ok(())
    }

    fn exists(&self, locator: &Locator) -> bool {
        self.find(locator).is_ok()
    }

    fn click(&self, locator: &Locator) -> Result<()> {
        self.find(locator)?
            .click()
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to click {}: {}", locator, e)))?;
        Ok(())
    }

    fn form_fields(&self) -> Result<Vec<FormField>> {
        let js_code = include_str!("collect_fields.js");

        let result = self
            .tab
            .evaluate(js_code, false)
            .map_err(|e| BrowserError::EvaluationFailed(format!("Failed to collect form fields: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| BrowserError::EvaluationFailed("No value returned from field collection".to_string()))?;

        // The script returns a JSON string
        let json_str: String = serde_json::from_value(json_value)?;
        Ok(serde_json::from_str(&json_str)?)
    }

    fn fill(&self, selector: &str, value: &str) -> Result<()> {
        let element = self.find(&Locator::css(selector))?;
        element.type_into(value).map_err(|e| BrowserError::InputFailed {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn upload(&self, selector: &str, path: &Path) -> Result<()> {
        let display = path.display().to_string();
        let element = self.find(&Locator::css(selector))?;
        element
            .set_input_files(&[display.as_str()])
            .map_err(|e| BrowserError::UploadFailed { path: display.clone(), reason: e.to_string() })?;
        Ok(())
    }

    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn close(&self) -> Result<()> {
        self.tab
            .close(false)
            .map_err(|e| BrowserError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}
