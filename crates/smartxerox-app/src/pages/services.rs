// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Services page: the counter price list.

use dioxus::prelude::*;

use smartxerox_core::{PricingTable, ServiceKind, Sides, format_amount};

use crate::Route;

#[component]
pub fn Services() -> Element {
    let table = PricingTable::standard();

    rsx! {
        div {
            h1 { "Services & Prices" }
            p { style: "color: #666;", "Per page, in rupees. Half the total is payable as an advance when ordering online." }

            table { style: "width: 100%; border-collapse: collapse; margin: 16px 0; background: white;",
                thead {
                    tr { style: "background: #0d47a1; color: white; text-align: left;",
                        th { style: "padding: 10px;", "Service" }
                        th { style: "padding: 10px; text-align: right;", "Single-sided" }
                        th { style: "padding: 10px; text-align: right;", "Double-sided" }
                    }
                }
                tbody {
                    for kind in ServiceKind::ALL {
                        {
                            let entry = table.entry(kind);
                            let single = format_amount(entry.for_sides(Sides::Single));
                            let double = format_amount(entry.for_sides(Sides::Double));
                            rsx! {
                                tr { style: "border-bottom: 1px solid #eee;",
                                    td { style: "padding: 10px;", "{kind.label()}" }
                                    td { style: "padding: 10px; text-align: right;", "\u{20B9}{single}" }
                                    td { style: "padding: 10px; text-align: right;", "\u{20B9}{double}" }
                                }
                            }
                        }
                    }
                }
            }

            Link { to: Route::NewOrder {},
                style: "display: inline-block; padding: 12px 24px; border-radius: 8px; background: #0d47a1; color: white; text-decoration: none;",
                "Order now"
            }
        }
    }
}
