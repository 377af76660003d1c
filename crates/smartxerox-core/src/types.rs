// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Smart Xerox ordering client.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::pricing::{PricingTable, ServiceKind, Sides};

/// The signed-in customer.
///
/// Any signup fields beyond id, name and mobile are kept verbatim in `extra`
/// so a profile read back from the backend round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub mobile: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Build a local profile from submitted signup fields.
    pub fn from_signup(id: impl Into<String>, form: &SignupForm) -> Self {
        let mut extra = form.extra.clone();
        if let Some(ref email) = form.email {
            extra.insert("email".into(), Value::String(email.clone()));
        }
        Self {
            id: id.into(),
            name: form.name.clone(),
            mobile: form.mobile.clone(),
            extra,
        }
    }

    /// First word of the name, used in the navigation greeting.
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }
}

/// Fields collected by the signup form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Delivery state of a write whose response cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The backend confirmed the write.
    Success,
    /// The request left the client; nothing is known beyond that.
    Unconfirmed,
    /// The request never got out.
    Failure(String),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "confirmed",
            Self::Unconfirmed => "sent (unconfirmed)",
            Self::Failure(_) => "not sent",
        }
    }
}

/// A print order.
///
/// History records come from a spreadsheet, so deserialization goes through
/// [`RawOrder`] which tolerates numbers stored as text, comma-joined file
/// lists and the legacy `total`/`paid`/`files` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOrder")]
pub struct Order {
    pub order_id: String,
    pub print_type: String,
    pub file_names: Vec<String>,
    pub pages: u32,
    pub copies: u32,
    pub amount_total: f64,
    pub amount_paid: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub date: DateTime<Utc>,
}

impl Order {
    /// Order id up to the first `-`, as printed on invoices and messages.
    pub fn short_id(&self) -> &str {
        short_order_id(&self.order_id)
    }

    /// Whether any advance has been paid.
    pub fn is_paid(&self) -> bool {
        self.amount_paid > 0.0
    }

    /// File names joined for display.
    pub fn files_label(&self) -> String {
        self.file_names.join(", ")
    }
}

/// Order id up to the first `-`.
pub fn short_order_id(order_id: &str) -> &str {
    order_id.split('-').next().unwrap_or(order_id)
}

/// What the customer filled in on the order form, before pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub kind: ServiceKind,
    pub sides: Sides,
    pub file_names: Vec<String>,
    pub pages: u32,
    pub copies: u32,
    pub instructions: Option<String>,
    /// Customer pays the 50% advance up front.
    pub pay_advance: bool,
}

impl OrderDraft {
    /// Price the draft and stamp it with a fresh id and the given time.
    pub fn finalize(&self, table: &PricingTable, now: DateTime<Utc>) -> Order {
        let quote = table.quote(self.kind, self.sides, self.pages, self.copies);
        let instructions = self
            .instructions
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Order {
            order_id: Uuid::new_v4().to_string(),
            print_type: format!("{} ({})", self.kind.label(), self.sides.label()),
            file_names: self.file_names.clone(),
            pages: self.pages,
            copies: self.copies,
            amount_total: quote.total,
            amount_paid: if self.pay_advance { quote.advance } else { 0.0 },
            instructions,
            date: now,
        }
    }
}

/// Format a rupee amount the way the shop prints it: whole numbers without
/// decimals, fractions with at most two places.
pub fn format_amount(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let fixed = format!("{value:.2}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

// -- Lenient deserialization ---------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }

    fn to_f64(&self, field: &str) -> Result<f64, String> {
        match self {
            Self::Number(n) => n
                .as_f64()
                .ok_or_else(|| format!("{field}: {n} is not representable")),
            Self::Text(s) if s.trim().is_empty() => Ok(0.0),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{field}: '{s}' is not a number")),
        }
    }

    fn to_count(&self, field: &str) -> Result<u32, String> {
        let v = self.to_f64(field)?;
        if v < 0.0 || v.fract() != 0.0 || v > f64::from(u32::MAX) {
            return Err(format!("{field}: {v} is not a count"));
        }
        Ok(v as u32)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FileList {
    Many(Vec<String>),
    Joined(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Paid {
    /// Legacy rows store whether the 50% advance was paid.
    Flag(bool),
    Amount(Scalar),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stamp {
    Millis(i64),
    Text(String),
}

#[derive(Deserialize)]
struct RawOrder {
    #[serde(alias = "id")]
    order_id: Scalar,
    #[serde(default)]
    print_type: Option<String>,
    #[serde(default, alias = "files")]
    file_names: Option<FileList>,
    #[serde(default)]
    pages: Option<Scalar>,
    #[serde(default)]
    copies: Option<Scalar>,
    #[serde(alias = "total")]
    amount_total: Scalar,
    #[serde(default, alias = "paid")]
    amount_paid: Option<Paid>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(alias = "created_at")]
    date: Stamp,
}

impl TryFrom<RawOrder> for Order {
    type Error = String;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        let amount_total = raw.amount_total.to_f64("amount_total")?;
        let amount_paid = match raw.amount_paid {
            None | Some(Paid::Flag(false)) => 0.0,
            Some(Paid::Flag(true)) => amount_total * 0.5,
            Some(Paid::Amount(s)) => s.to_f64("amount_paid")?,
        };
        let file_names = match raw.file_names {
            None => Vec::new(),
            Some(FileList::Many(v)) => v,
            Some(FileList::Joined(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_owned)
                .collect(),
        };
        let pages = match raw.pages {
            Some(s) => s.to_count("pages")?,
            None => 0,
        };
        let copies = match raw.copies {
            Some(s) => s.to_count("copies")?,
            None => 1,
        };

        Ok(Self {
            order_id: raw.order_id.into_string(),
            print_type: raw.print_type.unwrap_or_default(),
            file_names,
            pages,
            copies,
            amount_total,
            amount_paid,
            instructions: raw.instructions.filter(|s| !s.trim().is_empty()),
            date: parse_stamp(raw.date)?,
        })
    }
}

fn parse_stamp(stamp: Stamp) -> Result<DateTime<Utc>, String> {
    match stamp {
        Stamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| format!("date: {ms} out of range")),
        Stamp::Text(s) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
                return Ok(dt.with_timezone(&Utc));
            }
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
                .ok_or_else(|| format!("date: '{s}' is not a timestamp"))
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_keeps_extra_fields_and_numeric_mobile() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 17,
            "name": "Asha Rao",
            "mobile": 9876543210u64,
            "college": "RVCE"
        }))
        .expect("parse");
        assert_eq!(profile.id, "17");
        assert_eq!(profile.mobile, "9876543210");
        assert_eq!(profile.first_name(), "Asha");
        assert_eq!(profile.extra.get("college"), Some(&json!("RVCE")));

        let back = serde_json::to_value(&profile).expect("serialize");
        assert_eq!(back["college"], "RVCE");
        assert_eq!(back["mobile"], "9876543210");
    }

    #[test]
    fn spreadsheet_row_with_text_numbers_parses() {
        let order: Order = serde_json::from_value(json!({
            "order_id": "a1b2c3d4-0000-4000-8000-000000000000",
            "print_type": "print_bw",
            "files": "notes.pdf, lab.pdf",
            "pages": "12",
            "copies": 2,
            "total": "72",
            "paid": true,
            "date": "2026-03-04T10:00:00Z"
        }))
        .expect("parse");
        assert_eq!(order.short_id(), "a1b2c3d4");
        assert_eq!(order.file_names, vec!["notes.pdf", "lab.pdf"]);
        assert_eq!(order.pages, 12);
        assert_eq!(order.amount_total, 72.0);
        assert_eq!(order.amount_paid, 36.0);
        assert!(order.instructions.is_none());
    }

    #[test]
    fn order_date_accepts_millis_and_plain_dates() {
        let by_millis: Order = serde_json::from_value(json!({
            "order_id": "x", "amount_total": 10, "date": 1_700_000_000_000i64
        }))
        .expect("parse");
        assert_eq!(by_millis.date.timestamp(), 1_700_000_000);
        assert_eq!(by_millis.copies, 1);

        let by_day: Order = serde_json::from_value(json!({
            "order_id": "y", "amount_total": 10, "date": "2026-01-31"
        }))
        .expect("parse");
        assert_eq!(by_day.date.format("%d/%m/%Y").to_string(), "31/01/2026");
    }

    #[test]
    fn non_numeric_total_is_rejected() {
        let result: Result<Order, _> = serde_json::from_value(json!({
            "order_id": "z", "amount_total": "lots", "date": "2026-01-31"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn amounts_format_like_the_shop() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(7.25), "7.25");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn draft_finalize_prices_and_trims() {
        let draft = OrderDraft {
            kind: ServiceKind::PrintColor,
            sides: Sides::Double,
            file_names: vec!["poster.pdf".into()],
            pages: 4,
            copies: 3,
            instructions: Some("   ".into()),
            pay_advance: true,
        };
        let now = Utc::now();
        let order = draft.finalize(&PricingTable::standard(), now);
        assert_eq!(order.amount_total, 120.0);
        assert_eq!(order.amount_paid, 60.0);
        assert!(order.instructions.is_none());
        assert_eq!(order.date, now);
        assert_eq!(order.short_id().len(), 8);
    }
}
