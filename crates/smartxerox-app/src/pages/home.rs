// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page: shop identity and quick actions.

use dioxus::prelude::*;

use crate::Route;
use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let shop = svc.config().shop.clone();
    let signed_in = state.read().user.is_some();

    rsx! {
        div {
            h1 { "{shop.name}" }
            p { style: "color: #666;", "Xerox, printouts and colour prints. Order online, pick up at the counter." }

            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin: 24px 0;",
                if signed_in {
                    QuickAction { to: Route::NewOrder {}, label: "Place an Order", icon: "\u{1F5A8}" }
                    QuickAction { to: Route::Dashboard {}, label: "My Orders", icon: "\u{1F4CB}" }
                } else {
                    QuickAction { to: Route::Signup {}, label: "Create an Account", icon: "\u{1F464}" }
                    QuickAction {
                        to: Route::Login { return_to: String::new() },
                        label: "Login",
                        icon: "\u{1F511}",
                    }
                }
                QuickAction { to: Route::Services {}, label: "Price List", icon: "\u{1F4B0}" }
            }

            section { style: "margin-top: 24px; padding: 16px; border-radius: 12px; background: white; border: 1px solid #e0e0e0;",
                h3 { style: "margin-top: 0;", "Visit us" }
                p { style: "margin: 4px 0;", "{shop.address}" }
                p { style: "margin: 4px 0; color: #666;", "Phone: {shop.phone}" }
            }
        }
    }
}

#[component]
fn QuickAction(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: flex; flex-direction: column; align-items: center; justify-content: center; padding: 24px 16px; border: 1px solid #e0e0e0; border-radius: 12px; text-decoration: none; color: #333; background: white;",
            span { style: "font-size: 32px; margin-bottom: 8px;", "{icon}" }
            span { style: "font-size: 14px;", "{label}" }
        }
    }
}
