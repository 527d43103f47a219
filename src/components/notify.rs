//! Transient user-visible notifications. Views report every outcome through a
//! `Notifier` instead of printing, so the CLI can render them and tests can
//! inspect them.

use std::{
    fmt,
    io::Write,
    sync::{Mutex, PoisonError},
};
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.variant {
            ToastVariant::Default => "✓",
            ToastVariant::Destructive => "✗",
        };
        write!(formatter, "{marker} {}: {}", self.title, self.description)
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to stderr, keeping stdout for rendered views.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        debug!(title = %toast.title, error = toast.is_error(), "toast");
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{toast}");
    }
}

/// Keeps toasts in memory; the CLI uses it to derive an exit status.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    toasts: Mutex<Vec<Toast>>,
}

impl MemoryNotifier {
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(Toast::is_error)
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

/// Fans a toast out to several notifiers.
pub struct Tee<'a>(pub &'a dyn Notifier, pub &'a dyn Notifier);

impl Notifier for Tee<'_> {
    fn notify(&self, toast: Toast) {
        self.0.notify(toast.clone());
        self.1.notify(toast);
    }
}
