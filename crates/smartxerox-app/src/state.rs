// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: reactive signals for the Dioxus UI.

use smartxerox_core::error::ShopError;
use smartxerox_core::human_errors::{Severity, humanize_error};
use smartxerox_core::{Order, UserProfile};

use crate::services::app_services::AppServices;

/// Banner shown above the page content.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: NoticeKind::Info }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: NoticeKind::Success }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: NoticeKind::Warning }
    }

    /// Customer-facing alert for `err`.
    pub fn from_error(err: &ShopError) -> Self {
        let human = humanize_error(err);
        let kind = match human.severity {
            Severity::Transient | Severity::ActionRequired => NoticeKind::Warning,
            Severity::Permanent => NoticeKind::Error,
        };
        Self { text: human.alert_text(), kind }
    }

    /// Text and background colours.
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self.kind {
            NoticeKind::Info => ("#004085", "#e7f3ff"),
            NoticeKind::Success => ("#155724", "#d4edda"),
            NoticeKind::Warning => ("#856404", "#fff3cd"),
            NoticeKind::Error => ("#721c24", "#f8d7da"),
        }
    }
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Signed-in customer, mirrored from the session for reactivity.
    pub user: Option<UserProfile>,
    /// Last loaded order history.
    pub orders: Vec<Order>,
    /// Whether the order history is being fetched.
    pub loading_orders: bool,
    pub notice: Option<Notice>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            user: svc.current_user(),
            ..Self::default()
        }
    }
}
