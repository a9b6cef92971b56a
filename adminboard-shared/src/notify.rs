//! Transient user-facing notifications
//!
//! The HTTP client surfaces classified failures and the navigation guard
//! warns about missing logins through a [`Notifier`]. A UI shell plugs in
//! its toast component; the default implementation writes to the log.

use std::fmt;
use std::sync::Mutex;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Info => write!(f, "info"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A single notice as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sink for transient notifications
pub trait Notifier: Send + Sync {
    /// Shows `message` at `level`
    fn notify(&self, level: NoticeLevel, message: &str);

    /// Shows a warning
    fn warning(&self, message: &str) {
        self.notify(NoticeLevel::Warning, message);
    }

    /// Shows an error
    fn error(&self, message: &str) {
        self.notify(NoticeLevel::Error, message);
    }
}

/// Notifier that writes notices to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => tracing::info!(notice = %level, "{}", message),
            NoticeLevel::Warning => tracing::warn!(notice = %level, "{}", message),
            NoticeLevel::Error => tracing::error!(notice = %level, "{}", message),
        }
    }
}

/// Notifier that records every notice in order
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Messages of the notices at `level`
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(Notice {
                level,
                message: message.to_string(),
            });
        }
    }
}
