// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use std::path::PathBuf;

use smartxerox_core::error::Result;

/// Unified bridge that groups all native capabilities.
///
/// Implementations are shared with spawned tasks (the delayed order hand-off),
/// hence `Send + Sync`.
pub trait PlatformBridge: NativeOpenUrl + NativeSaveFile + Send + Sync {
    /// Human-readable platform name (e.g. "Linux desktop").
    fn platform_name(&self) -> &str;
}

/// Open a link in the system browser or the app registered for it.
pub trait NativeOpenUrl {
    /// Returns Ok(()) once the link was handed to the OS; whether anything
    /// actually opened is not observable.
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Save a generated file as a user download.
pub trait NativeSaveFile {
    /// Write `bytes` under `file_name` and return the final path. An existing
    /// file is never overwritten; a numbered name is chosen instead.
    fn save_download(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}
