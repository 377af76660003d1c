// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Smart Xerox: core types, price list, navigation rules and errors shared
// across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod navigation;
pub mod pricing;
pub mod types;

pub use config::{AppConfig, ShopIdentity};
pub use error::ShopError;
pub use navigation::Page;
pub use pricing::{PriceEntry, PricingTable, ServiceKind, Sides};
pub use types::*;
