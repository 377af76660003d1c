// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Spreadsheet script the shop publishes as its order backend.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbxPMg7DfX5NrIZ2GdCQ01UoJXJ7IrFSVfzLDmC1UM6GkPsigzsNJQf64_lzlTiKyQh0/exec";

/// Chat number that receives new-order hand-offs.
pub const DEFAULT_HANDOFF_NUMBER: &str = "919916220476";

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the remote order endpoint. Actions are passed as a
    /// query/body parameter on this single origin.
    pub endpoint: String,
    /// Destination number for the order hand-off deep link.
    pub handoff_number: String,
    /// Delay before opening the hand-off link, so the order write can leave first.
    pub handoff_delay_ms: u64,
    /// Follow a signup with a `login_user` read to adopt the backend's id.
    pub confirm_signup: bool,
    /// Shop identity printed on invoices.
    pub shop: ShopIdentity,
    /// Invoice page margin in inches.
    pub invoice_margin_in: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            handoff_number: DEFAULT_HANDOFF_NUMBER.into(),
            handoff_delay_ms: 500,
            confirm_signup: false,
            shop: ShopIdentity::default(),
            invoice_margin_in: 0.5,
        }
    }
}

impl AppConfig {
    pub fn handoff_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.handoff_delay_ms)
    }
}

/// Name, address and phone shown in the invoice header and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopIdentity {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl Default for ShopIdentity {
    fn default() -> Self {
        Self {
            name: "Smart Xerox".into(),
            address: "Start Campus, Near College Gate".into(),
            phone: "+91 99162 20476".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "endpoint": "http://localhost:8080/exec" }"#)
                .expect("parse");
        assert_eq!(config.endpoint, "http://localhost:8080/exec");
        assert_eq!(config.handoff_number, DEFAULT_HANDOFF_NUMBER);
        assert_eq!(config.handoff_delay(), std::time::Duration::from_millis(500));
        assert!(!config.confirm_signup);
        assert_eq!(config.shop.name, "Smart Xerox");
    }
}
