// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge: system link opener and a Downloads folder.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use smartxerox_core::error::{Result, ShopError};
use tracing::{debug, info};

use crate::traits::*;

/// Bridge for Linux, macOS and Windows desktops.
pub struct DesktopBridge {
    downloads: PathBuf,
}

impl DesktopBridge {
    /// Save downloads into the user's Downloads folder, else the data dir.
    pub fn new() -> Self {
        Self::with_downloads_dir(downloads_dir_from(dirs::download_dir(), dirs::data_dir()))
    }

    pub fn with_downloads_dir(downloads: impl Into<PathBuf>) -> Self {
        Self {
            downloads: downloads.into(),
        }
    }
}

impl Default for DesktopBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        std::env::consts::OS
    }
}

impl NativeOpenUrl for DesktopBridge {
    fn open_url(&self, url: &str) -> Result<()> {
        let mut cmd = opener_command(url);
        cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
        cmd.spawn()
            .map_err(|e| ShopError::Bridge(format!("could not launch link opener: {e}")))?;
        info!(url, "link handed to system opener");
        Ok(())
    }
}

impl NativeSaveFile for DesktopBridge {
    fn save_download(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.downloads)?;
        let path = unique_path(&self.downloads, file_name);
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "download saved");
        Ok(path)
    }
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("cmd");
    // Empty title argument, otherwise `start` treats a quoted URL as the title.
    cmd.args(["/C", "start", "", url]);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}

/// The platform Downloads folder, else `<data dir>/smartxerox/downloads`.
fn downloads_dir_from(download: Option<PathBuf>, data: Option<PathBuf>) -> PathBuf {
    match download {
        Some(dir) => dir,
        None => data
            .unwrap_or_else(std::env::temp_dir)
            .join("smartxerox")
            .join("downloads"),
    }
}

/// `name.pdf`, then `name (1).pdf`, `name (2).pdf`, ... like a browser would.
fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let first = dir.join(file_name);
    if !first.exists() {
        return first;
    }

    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (file_name, None),
    };

    let mut n = 1u32;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let path = dir.join(candidate);
        if !path.exists() {
            debug!(path = %path.display(), "download name taken, using numbered name");
            return path;
        }
        n += 1;
    }
}
