//! Browser session management.
//!
//! - [`BrowserSession`]: lazily started, explicitly closed owner of one browser process
//! - [`BrowserDriver`] / [`BrowserHandle`]: the seam between the session and a concrete browser
//! - [`FormPage`]: one tab, driven as an application form
//! - [`ChromeDriver`]: headless_chrome implementation of all of the above

pub mod chrome;
pub mod config;
pub mod page;
pub mod session;

pub use chrome::{ChromeDriver, ChromePage};
pub use config::LaunchOptions;
pub use page::{FieldAttributes, FormField, FormPage, Locator};
pub use session::{BrowserDriver, BrowserHandle, BrowserSession};
