//! Notification (toast) service contracts and in-process adapters.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`NotificationService`].
pub type NotificationFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Neutral status message.
    #[default]
    Info,
    /// Confirmation that a user action succeeded.
    Success,
    /// Failure the user should know about.
    Error,
}

impl NotificationKind {
    /// Returns the stable lowercase token used as a CSS class by toast renderers.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Host service for user-visible notifications.
pub trait NotificationService {
    /// Dispatches a notification message.
    fn notify<'a>(
        &'a self,
        message: &'a str,
        kind: NotificationKind,
    ) -> NotificationFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op notification service for hosts without a toast surface.
pub struct NoopNotificationService;

impl NotificationService for NoopNotificationService {
    fn notify<'a>(
        &'a self,
        _message: &'a str,
        _kind: NotificationKind,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// Notification service that records every delivered message in order.
pub struct MemoryNotificationService {
    delivered: Rc<RefCell<Vec<(String, NotificationKind)>>>,
}

impl MemoryNotificationService {
    /// Returns every message delivered so far.
    pub fn delivered(&self) -> Vec<(String, NotificationKind)> {
        self.delivered.borrow().clone()
    }
}

impl NotificationService for MemoryNotificationService {
    fn notify<'a>(
        &'a self,
        message: &'a str,
        kind: NotificationKind,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.delivered
                .borrow_mut()
                .push((message.to_string(), kind));
            Ok(())
        })
    }
}
