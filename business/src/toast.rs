//! One-shot user notifications.
//!
//! Commands push [`Toast`]s into the [`ToastQueue`] compute through their
//! [`Updater`](quickqr_states::Updater); the UI draws whatever is queued and calls
//! [`ToastQueue::expire`] every frame.

use std::any::Any;

use chrono::{DateTime, TimeDelta, Utc};
use quickqr_states::{Compute, State, assign_impl};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: TimeDelta = TimeDelta::seconds(5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    /// Failures, drawn in red.
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
            created_at: Utc::now(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            ..Self::new(title, description)
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= TOAST_LIFETIME
    }
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        log::info!("Toast: {} - {}", toast.title, toast.description);
        self.toasts.push(toast);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.toasts.len() {
            self.toasts.remove(index);
        }
    }

    /// Drop toasts older than [`TOAST_LIFETIME`].
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }
}

impl State for ToastQueue {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Compute for ToastQueue {
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }
}
