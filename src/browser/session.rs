use crate::browser::chrome::ChromeDriver;
use crate::browser::config::LaunchOptions;
use crate::browser::page::FormPage;
use crate::error::{BrowserError, Result};
use std::sync::{Arc, Mutex, MutexGuard};

/// Starts browser processes. Implemented by [`ChromeDriver`] and by in-memory fakes in tests.
pub trait BrowserDriver: Send + Sync {
    fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn BrowserHandle>>;
}

/// A running browser process with its single browsing context
pub trait BrowserHandle: Send {
    fn new_page(&self) -> Result<Box<dyn FormPage>>;

    fn close(&mut self) -> Result<()>;
}

enum SessionState {
    Idle,
    Running(Box<dyn BrowserHandle>),
    Closed,
}

/// Owns at most one browser process, started lazily and torn down explicitly.
///
/// Pages are cheap and short-lived (one per application attempt); the browser is expensive
/// and lives until [`BrowserSession::close`]. The single context is not meant for concurrent
/// pages driving conflicting navigation.
pub struct BrowserSession {
    driver: Arc<dyn BrowserDriver>,
    options: LaunchOptions,
    state: Mutex<SessionState>,
}

impl BrowserSession {
    /// Session backed by a real Chrome process
    pub fn new(options: LaunchOptions) -> Self {
        Self::with_driver(Arc::new(ChromeDriver::default()), options)
    }

    pub fn with_driver(driver: Arc<dyn BrowserDriver>, options: LaunchOptions) -> Self {
        Self { driver, options, state: Mutex::new(SessionState::Idle) }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // A panic while holding the lock leaves the state itself consistent
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start the browser if it is not running. Subsequent calls are no-ops.
    ///
    /// Starting a session that was closed is a caller bug and fails with
    /// [`BrowserError::SessionClosed`].
    pub fn ensure_started(&self) -> Result<()> {
        let mut state = self.lock();
        match *state {
            SessionState::Running(_) => Ok(()),
            SessionState::Closed => Err(BrowserError::SessionClosed),
            SessionState::Idle => {
                log::info!("Launching browser (headless: {})", self.options.headless);
                let handle = self.driver.launch(&self.options)?;
                *state = SessionState::Running(handle);
                Ok(())
            }
        }
    }

    /// Open a fresh page in the shared context
    pub fn new_page(&self) -> Result<Box<dyn FormPage>> {
        match &*self.lock() {
            SessionState::Running(handle) => handle.new_page(),
            SessionState::Idle => Err(BrowserError::SessionNotStarted),
            SessionState::Closed => Err(BrowserError::SessionClosed),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lock(), SessionState::Running(_))
    }

    /// Tear down the browser. Safe to call repeatedly and on a session that never started.
    pub fn close(&self) -> Result<()> {
        let previous = std::mem::replace(&mut *self.lock(), SessionState::Closed);
        if let SessionState::Running(mut handle) = previous {
            log::info!("Closing browser session");
            handle.close()?;
        }
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Failed to close browser session on drop: {}", e);
        }
    }
}
