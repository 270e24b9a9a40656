//! Transient, user-dismissible notifications.
//!
//! One slot per screen; a new notification replaces the previous one. No
//! failure is fatal, so every error path ends here rather than in a panic or
//! an inline form error.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Notification>,
}

impl Notifier {
    pub fn show(&mut self, severity: Severity, message: impl Into<String>) {
        self.current = Some(Notification { severity, message: message.into() });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(Severity::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.show(Severity::Info, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.show(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(Severity::Error, message);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
