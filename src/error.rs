use thiserror::Error;

/// Errors raised by the browser session, page driving, and the surrounding plumbing.
///
/// Control-not-found on a third-party page is *not* represented here: strategies report it
/// as a normal negative result. These variants cover environment failures and caller bugs.
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Browser session has not been started")]
    SessionNotStarted,

    #[error("Browser session has been closed")]
    SessionClosed,

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Failed to fill '{selector}': {reason}")]
    InputFailed { selector: String, reason: String },

    #[error("Failed to upload '{path}': {reason}")]
    UploadFailed { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Text generation failed: {0}")]
    TextGeneration(String),

    #[error("Background task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl BrowserError {
    /// Whether this error indicates misuse of the session lifecycle rather than an environmental failure.
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, BrowserError::SessionNotStarted | BrowserError::SessionClosed)
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;
