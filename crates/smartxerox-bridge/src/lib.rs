// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Smart Xerox: platform bridge abstractions.
//
// The ordering flow needs two things from the host: open an external link
// (the chat hand-off) and save a generated file where the customer can find it
// (the invoice download). Everything else stays in portable Rust.

pub mod traits;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

#[cfg(any(target_os = "ios", target_os = "android"))]
pub mod stub;

/// Bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn traits::PlatformBridge> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Box::new(desktop::DesktopBridge::new())
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        Box::new(stub::StubBridge)
    }
}
