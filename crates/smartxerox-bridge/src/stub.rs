// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for mobile builds, where links and downloads go through the
// platform share sheet which is not wired yet.
//
// Every trait method returns `PlatformUnavailable`.

use std::path::PathBuf;

use smartxerox_core::error::{Result, ShopError};

use crate::traits::*;

/// No-op bridge returned on mobile targets.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Mobile (stub)"
    }
}

impl NativeOpenUrl for StubBridge {
    fn open_url(&self, _url: &str) -> Result<()> {
        tracing::warn!("NativeOpenUrl::open_url called on stub bridge");
        Err(ShopError::PlatformUnavailable)
    }
}

impl NativeSaveFile for StubBridge {
    fn save_download(&self, _file_name: &str, _bytes: &[u8]) -> Result<PathBuf> {
        tracing::warn!("NativeSaveFile::save_download called on stub bridge");
        Err(ShopError::PlatformUnavailable)
    }
}
