// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Invoice model: the figures and labels printed on a customer invoice.
//
// Building an invoice is a pure function of the order, the customer and the
// shop identity. The date comes from the order, never from the clock.

use chrono::{DateTime, Utc};
use smartxerox_core::{Order, ShopIdentity, UserProfile, format_amount};

/// Share of the total taken as advance payment.
pub const ADVANCE_RATE: f64 = 0.5;

/// Amount due at or below which an invoice counts as settled.
pub const SETTLED_EPSILON: f64 = 0.1;

/// Payment status printed in the invoice footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    PaidInFull,
    PartiallyPaid,
}

impl InvoiceStatus {
    pub fn from_amount_due(amount_due: f64) -> Self {
        if amount_due <= SETTLED_EPSILON {
            Self::PaidInFull
        } else {
            Self::PartiallyPaid
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PaidInFull => "PAID IN FULL",
            Self::PartiallyPaid => "PARTIALLY PAID",
        }
    }

    /// RGB colour of the status line.
    pub fn color(&self) -> (f32, f32, f32) {
        match self {
            Self::PaidInFull => (0.0, 0.5, 0.0),
            Self::PartiallyPaid => (1.0, 0.65, 0.0),
        }
    }
}

/// The single line item on an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub files: String,
    pub quantity: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub shop: ShopIdentity,
    /// Short form of the order id.
    pub number: String,
    pub order_id: String,
    /// `dd/mm/yyyy`.
    pub date: String,
    /// Order timestamp, stamped into the document metadata.
    pub issued_at: DateTime<Utc>,
    pub bill_to_name: String,
    pub bill_to_mobile: String,
    pub item: LineItem,
    pub subtotal: f64,
    pub advance_paid: f64,
    pub amount_due: f64,
    pub status: InvoiceStatus,
}

impl Invoice {
    pub fn build(order: &Order, user: &UserProfile, shop: &ShopIdentity) -> Self {
        let subtotal = order.amount_total;
        let advance_paid = advance_for(order);
        let amount_due = subtotal - advance_paid;

        let description = if order.print_type.trim().is_empty() {
            "Print Services".to_owned()
        } else {
            order.print_type.clone()
        };

        Self {
            shop: shop.clone(),
            number: order.short_id().to_owned(),
            order_id: order.order_id.clone(),
            date: order.date.format("%d/%m/%Y").to_string(),
            issued_at: order.date,
            bill_to_name: user.name.clone(),
            bill_to_mobile: user.mobile.clone(),
            item: LineItem {
                description,
                files: order.files_label(),
                quantity: format!("{} pages x {}", order.pages, order.copies),
                amount: subtotal,
            },
            subtotal,
            advance_paid,
            amount_due,
            status: InvoiceStatus::from_amount_due(amount_due),
        }
    }

    /// Download name, `Invoice_<order_id>.pdf`.
    pub fn file_name(&self) -> String {
        invoice_file_name(&self.order_id)
    }

    /// Plain-text rendering, logged at debug level on every render.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n{}\n{}\n\n", self.shop.name, self.shop.address, self.shop.phone));
        out.push_str(&format!("INVOICE #{}\n{}\n\n", self.number, self.date));
        out.push_str(&format!("BILL TO\n{}\n{}\n\n", self.bill_to_name, self.bill_to_mobile));
        out.push_str(&format!(
            "{}\n  {}\n  {}  {}\n\n",
            self.item.description,
            self.item.files,
            self.item.quantity,
            rupees(self.item.amount)
        ));
        out.push_str(&format!("Subtotal: {}\n", rupees(self.subtotal)));
        out.push_str(&format!("Advance Paid: -{}\n", rupees(self.advance_paid)));
        out.push_str(&format!("Total Due: {}\n\n", rupees(self.amount_due)));
        out.push_str(&format!("STATUS: {}\n", self.status.label()));
        out
    }
}

pub fn invoice_file_name(order_id: &str) -> String {
    format!("Invoice_{order_id}.pdf")
}

/// Rupee amount as printed in the PDF. The built-in PDF fonts have no rupee
/// glyph, so the abbreviation is used.
pub fn rupees(value: f64) -> String {
    format!("Rs. {}", format_amount(value))
}

/// Advance deducted from the total.
///
/// Orders carry either no payment or the 50% advance. A recorded payment
/// covering the whole total is treated as settled.
fn advance_for(order: &Order) -> f64 {
    if !order.is_paid() {
        0.0
    } else if order.amount_paid >= order.amount_total {
        order.amount_total
    } else {
        order.amount_total * ADVANCE_RATE
    }
}
