// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shop price list: per-page rupee prices for each service, single or double sided.

use serde::{Deserialize, Serialize};

/// Services offered over the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    XeroxBw,
    PrintBw,
    PrintColor,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [Self::XeroxBw, Self::PrintBw, Self::PrintColor];

    /// Wire identifier (`xerox_bw`, `print_bw`, `print_color`).
    pub fn id(&self) -> &'static str {
        match self {
            Self::XeroxBw => "xerox_bw",
            Self::PrintBw => "print_bw",
            Self::PrintColor => "print_color",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::XeroxBw => "B&W Xerox",
            Self::PrintBw => "B&W Print",
            Self::PrintColor => "Colour Print",
        }
    }
}

/// Single- or double-sided printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sides {
    Single,
    Double,
}

impl Sides {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "single-sided",
            Self::Double => "double-sided",
        }
    }
}

/// Price per page for one service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub single: f64,
    pub double: f64,
}

impl PriceEntry {
    pub fn for_sides(&self, sides: Sides) -> f64 {
        match sides {
            Sides::Single => self.single,
            Sides::Double => self.double,
        }
    }
}

/// Total and the 50% advance for a priced order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub unit_price: f64,
    pub total: f64,
    pub advance: f64,
}

/// Read-only price list.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    xerox_bw: PriceEntry,
    print_bw: PriceEntry,
    print_color: PriceEntry,
}

/// The counter price list.
pub static STANDARD_PRICES: PricingTable = PricingTable {
    xerox_bw: PriceEntry {
        single: 2.0,
        double: 3.0,
    },
    print_bw: PriceEntry {
        single: 3.0,
        double: 4.0,
    },
    print_color: PriceEntry {
        single: 5.0,
        double: 10.0,
    },
};

impl PricingTable {
    pub fn standard() -> &'static Self {
        &STANDARD_PRICES
    }

    pub fn entry(&self, kind: ServiceKind) -> PriceEntry {
        match kind {
            ServiceKind::XeroxBw => self.xerox_bw,
            ServiceKind::PrintBw => self.print_bw,
            ServiceKind::PrintColor => self.print_color,
        }
    }

    pub fn quote(&self, kind: ServiceKind, sides: Sides, pages: u32, copies: u32) -> Quote {
        let unit_price = self.entry(kind).for_sides(sides);
        let total = unit_price * f64::from(pages) * f64::from(copies);
        Quote {
            unit_price,
            total,
            advance: total * 0.5,
        }
    }
}
