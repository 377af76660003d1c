// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dashboard: the customer's order history with invoice downloads.

use dioxus::prelude::*;

use smartxerox_core::{Order, Page, format_amount};

use crate::Route;
use crate::guard_page;
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

#[component]
pub fn Dashboard() -> Element {
    let allowed = guard_page(Page::Dashboard);
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let svc_load = svc.clone();
    let _history = use_resource(move || {
        let svc = svc_load.clone();
        async move {
            if !allowed {
                return;
            }
            state.write().loading_orders = true;
            let orders = svc.order_history().await;
            let mut s = state.write();
            s.orders = orders;
            s.loading_orders = false;
        }
    });

    if !allowed {
        return rsx! {};
    }

    let greeting = state
        .read()
        .user
        .as_ref()
        .map(|u| u.first_name().to_string())
        .unwrap_or_default();

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "Hi, {greeting}" }
                Link { to: Route::NewOrder {},
                    style: "padding: 10px 18px; border-radius: 8px; background: #0d47a1; color: white; text-decoration: none;",
                    "New Order"
                }
            }
            h2 { "My Orders" }

            if state.read().loading_orders {
                p { style: "color: #007aff;", "Loading your orders..." }
            } else if state.read().orders.is_empty() {
                p { style: "color: #888;", "No orders yet." }
            } else {
                for order in state.read().orders.iter() {
                    OrderCard { key: "{order.order_id}", order: order.clone() }
                }
            }
        }
    }
}

#[component]
fn OrderCard(order: Order) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let date = order.date.format("%d/%m/%Y").to_string();
    let total = format_amount(order.amount_total);
    let paid = format_amount(order.amount_paid);
    let (badge, badge_bg) = if order.is_paid() {
        ("Advance paid", "#d4edda")
    } else {
        ("Pay at counter", "#fff3cd")
    };

    rsx! {
        div { style: "padding: 14px; margin: 10px 0; border: 1px solid #e0e0e0; border-radius: 10px; background: white;",
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                strong { "#{order.short_id()}" }
                span { style: "font-size: 12px; padding: 2px 8px; border-radius: 10px; background: {badge_bg};", "{badge}" }
            }
            p { style: "margin: 6px 0; color: #333;", "{order.print_type}" }
            p { style: "margin: 4px 0; color: #666; font-size: 14px;",
                "{order.files_label()} \u{00B7} {order.pages} pages x {order.copies}"
            }
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-top: 8px;",
                span { style: "color: #666; font-size: 14px;", "{date} \u{00B7} \u{20B9}{total} (paid \u{20B9}{paid})" }
                button {
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #0d47a1; color: #0d47a1; background: white; cursor: pointer;",
                    onclick: {
                        let order = order.clone();
                        move |_| {
                            let notice = match svc.download_invoice(&order) {
                                Ok(path) => Notice::success(format!("Invoice saved to {}", path.display())),
                                Err(e) => {
                                    tracing::error!(error = %e, "invoice download failed");
                                    Notice::from_error(&e)
                                }
                            };
                            state.write().notice = Some(notice);
                        }
                    },
                    "Download Invoice"
                }
            }
        }
    }
}
