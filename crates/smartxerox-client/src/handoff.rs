// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// New-order hand-off to the shop's chat number.
//
// Order writes are unreadable, so the shop learns about an order from a
// prefilled chat message the customer sends. The link is opened a little
// after the write so the request gets out first; nothing checks that the
// delay was enough.

use std::sync::Arc;
use std::time::Duration;

use smartxerox_bridge::traits::{NativeOpenUrl, PlatformBridge};
use smartxerox_core::{Order, format_amount};
use tokio::task::JoinHandle;
use tracing::{info, warn};

const CHAT_BASE: &str = "https://wa.me";

/// Prefilled message for a new order.
pub fn compose_message(order: &Order, customer_name: &str) -> String {
    let instructions = order
        .instructions
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("None");

    [
        format!("*New Order: {}*", order.short_id()),
        format!("User: {customer_name}"),
        format!("Type: {}", order.print_type),
        format!("Files: {} file(s)", order.file_names.len()),
        format!(
            "Total: ₹{} (Paid: ₹{})",
            format_amount(order.amount_total),
            format_amount(order.amount_paid)
        ),
        format!("Instructions: {instructions}"),
    ]
    .join("\n")
}

/// Chat deep link for `number` with `message` URL-encoded.
pub fn deep_link(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!("{CHAT_BASE}/{digits}?text={}", urlencoding::encode(message))
}

/// Open `link` through the bridge after `delay`. Failures are logged only.
pub fn schedule(bridge: Arc<dyn PlatformBridge>, link: String, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        match bridge.open_url(&link) {
            Ok(()) => info!("order hand-off opened"),
            Err(e) => warn!(error = %e, "order hand-off could not be opened"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(instructions: Option<&str>) -> Order {
        Order {
            order_id: "7a8b9c0d-1234-4abc-8def-001122334455".into(),
            print_type: "B&W Print (single-sided)".into(),
            file_names: vec!["a.pdf".into(), "b.pdf".into(), "c.docx".into()],
            pages: 30,
            copies: 1,
            amount_total: 90.0,
            amount_paid: 45.0,
            instructions: instructions.map(str::to_owned),
            date: Utc::now(),
        }
    }

    #[test]
    fn message_lists_order_summary() {
        let msg = compose_message(&order(Some("Staple top-left")), "Arjun");
        assert_eq!(
            msg,
            "*New Order: 7a8b9c0d*\n\
             User: Arjun\n\
             Type: B&W Print (single-sided)\n\
             Files: 3 file(s)\n\
             Total: ₹90 (Paid: ₹45)\n\
             Instructions: Staple top-left"
        );
    }

    #[test]
    fn missing_instructions_read_none() {
        assert!(compose_message(&order(None), "Arjun").ends_with("Instructions: None"));
        assert!(compose_message(&order(Some("  ")), "Arjun").ends_with("Instructions: None"));
    }

    #[test]
    fn link_encodes_line_breaks_and_symbols() {
        let link = deep_link("+91 99162 20476", "*Hi* & bye\nTotal: ₹5");
        assert_eq!(
            link,
            "https://wa.me/919916220476?text=%2AHi%2A%20%26%20bye%0ATotal%3A%20%E2%82%B95"
        );
    }
}
