// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable alert text for shop customers.
//
// Only the login path surfaces error kinds to the user; everything else either
// assumes success or degrades silently. The messages here are what the alert
// dialog shows.

use crate::error::ShopError;

/// Severity of an error from the customer's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip; trying again may work.
    Transient,
    /// The customer must do something (sign up, sign in, pick a file).
    ActionRequired,
    /// Cannot be fixed by retrying.
    Permanent,
}

/// An alert message with a suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Alert headline.
    pub message: String,
    /// What the customer should try next.
    pub suggestion: String,
    /// Severity level (drives colour in UI).
    pub severity: Severity,
}

impl HumanError {
    /// Single-line form for a dialog box.
    pub fn alert_text(&self) -> String {
        if self.suggestion.is_empty() {
            self.message.clone()
        } else {
            format!("{} {}", self.message, self.suggestion)
        }
    }
}

/// Convert a `ShopError` into the text shown to the customer.
pub fn humanize_error(err: &ShopError) -> HumanError {
    match err {
        ShopError::NotFound(_) => HumanError {
            message: "User not found!".into(),
            suggestion: "Please Sign Up first.".into(),
            severity: Severity::ActionRequired,
        },

        ShopError::Connection(_) => HumanError {
            message: "Login failed.".into(),
            suggestion: "Please check internet or try Signup.".into(),
            severity: Severity::Transient,
        },

        ShopError::InvalidEndpoint(detail) => HumanError {
            message: "The order service address is not valid.".into(),
            suggestion: format!("Check the endpoint in config.json. ({detail})"),
            severity: Severity::Permanent,
        },

        ShopError::NotSignedIn => HumanError {
            message: "You are not signed in.".into(),
            suggestion: "Please log in to place an order.".into(),
            severity: Severity::ActionRequired,
        },

        ShopError::Session(_) => HumanError {
            message: "We couldn't remember your sign-in.".into(),
            suggestion: "You may need to log in again next time.".into(),
            severity: Severity::Transient,
        },

        ShopError::PdfError(_) | ShopError::ImageError(_) => HumanError {
            message: "The invoice couldn't be created.".into(),
            suggestion: "Try downloading it again.".into(),
            severity: Severity::Transient,
        },

        ShopError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to save that file.".into(),
                    suggestion: "Check the permissions of your Downloads folder.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. Your disk may be full.".into(),
                    severity: Severity::Transient,
                }
            }
        }

        ShopError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again.".into(),
            severity: Severity::Transient,
        },

        ShopError::Bridge(_) => HumanError {
            message: "A device feature didn't work.".into(),
            suggestion: "Try again.".into(),
            severity: Severity::Transient,
        },

        ShopError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: String::new(),
            severity: Severity::Permanent,
        },
    }
}
