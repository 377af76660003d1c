// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Smart Xerox.

use thiserror::Error;

/// Top-level error type for all Smart Xerox operations.
#[derive(Debug, Error)]
pub enum ShopError {
    // -- Remote endpoint --
    #[error("no account registered for mobile {0}")]
    NotFound(String),

    #[error("could not reach the order service: {0}")]
    Connection(String),

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    // -- Session --
    #[error("no user is signed in")]
    NotSignedIn,

    #[error("session storage error: {0}")]
    Session(String),

    // -- Invoice --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ShopError>;
