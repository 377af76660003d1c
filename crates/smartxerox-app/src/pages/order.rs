// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// New order page: pick files, choose the service, see the price, place the
// order. Placing it opens the shop's chat with the order summary.

use dioxus::prelude::*;

use smartxerox_core::{OrderDraft, Outcome, Page, PricingTable, ServiceKind, Sides, format_amount};

use crate::Route;
use crate::guard_page;
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

#[component]
pub fn NewOrder() -> Element {
    let allowed = guard_page(Page::Order);
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let mut kind = use_signal(|| ServiceKind::XeroxBw);
    let mut sides = use_signal(|| Sides::Single);
    let mut files = use_signal(Vec::<String>::new);
    let mut pages = use_signal(|| 1u32);
    let mut copies = use_signal(|| 1u32);
    let mut instructions = use_signal(String::new);
    let mut pay_advance = use_signal(|| true);
    let mut placing = use_signal(|| false);

    if !allowed {
        return rsx! {};
    }

    let quote = PricingTable::standard().quote(*kind.read(), *sides.read(), *pages.read(), *copies.read());
    let total = format_amount(quote.total);
    let advance = format_amount(quote.advance);
    let unit = format_amount(quote.unit_price);
    let ready = !files.read().is_empty() && *pages.read() > 0 && !*placing.read();

    rsx! {
        div {
            h1 { "New Order" }

            section { style: "margin: 16px 0;",
                h3 { "1. Files" }
                if files.read().is_empty() {
                    p { style: "color: #888;", "No files selected." }
                } else {
                    ul { style: "margin: 4px 0; padding-left: 20px;",
                        for name in files.read().iter() {
                            li { key: "{name}", "{name}" }
                        }
                    }
                }
                div { style: "display: flex; gap: 8px;",
                    button {
                        style: "padding: 10px 20px; border-radius: 8px; border: 1px solid #0d47a1; color: #0d47a1; background: white; font-size: 15px;",
                        onclick: move |_| {
                            #[cfg(not(any(target_os = "ios", target_os = "android")))]
                            {
                                if let Some(paths) = rfd::FileDialog::new()
                                    .add_filter("Documents", &["pdf", "doc", "docx", "jpg", "jpeg", "png", "ppt", "pptx"])
                                    .pick_files()
                                {
                                    let mut picked = files.write();
                                    for path in paths {
                                        let name = path
                                            .file_name()
                                            .map(|n| n.to_string_lossy().to_string())
                                            .unwrap_or_else(|| "unknown".into());
                                        if !picked.contains(&name) {
                                            picked.push(name);
                                        }
                                    }
                                    tracing::info!(count = picked.len(), "files selected");
                                }
                            }
                            #[cfg(any(target_os = "ios", target_os = "android"))]
                            {
                                state.write().notice = Some(Notice::warning("File picker is not available on this device."));
                            }
                        },
                        "Add Files"
                    }
                    if !files.read().is_empty() {
                        button {
                            style: "padding: 10px 16px; border-radius: 8px; border: 1px solid #ccc; background: white; font-size: 15px;",
                            onclick: move |_| files.write().clear(),
                            "Clear"
                        }
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "2. Service" }
                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 8px; align-items: center;",
                    label { "Service:" }
                    select {
                        style: "padding: 6px; border: 1px solid #ccc; border-radius: 4px;",
                        value: kind.read().id(),
                        onchange: move |evt| {
                            if let Some(k) = ServiceKind::from_id(&evt.value()) {
                                kind.set(k);
                            }
                        },
                        for k in ServiceKind::ALL {
                            option { value: k.id(), "{k.label()}" }
                        }
                    }

                    label { "Sides:" }
                    select {
                        style: "padding: 6px; border: 1px solid #ccc; border-radius: 4px;",
                        onchange: move |evt| {
                            sides.set(if evt.value() == "double" { Sides::Double } else { Sides::Single });
                        },
                        option { value: "single", selected: *sides.read() == Sides::Single, "Single-sided" }
                        option { value: "double", selected: *sides.read() == Sides::Double, "Double-sided" }
                    }

                    label { "Pages per copy:" }
                    input {
                        r#type: "number",
                        min: "1",
                        value: "{pages}",
                        style: "padding: 6px; border: 1px solid #ccc; border-radius: 4px;",
                        onchange: move |evt| {
                            if let Ok(n) = evt.value().parse::<u32>() {
                                pages.set(n.clamp(1, 5000));
                            }
                        },
                    }

                    label { "Copies:" }
                    input {
                        r#type: "number",
                        min: "1",
                        value: "{copies}",
                        style: "padding: 6px; border: 1px solid #ccc; border-radius: 4px;",
                        onchange: move |evt| {
                            if let Ok(n) = evt.value().parse::<u32>() {
                                copies.set(n.clamp(1, 500));
                            }
                        },
                    }
                }

                textarea {
                    placeholder: "Instructions for the shop (binding, stapling, ...)",
                    value: "{instructions}",
                    style: "width: 100%; margin-top: 12px; padding: 8px; min-height: 60px; border: 1px solid #ccc; border-radius: 4px; box-sizing: border-box;",
                    oninput: move |evt| instructions.set(evt.value()),
                }
            }

            section { style: "margin: 16px 0; padding: 16px; border-radius: 12px; background: white; border: 1px solid #e0e0e0;",
                h3 { style: "margin-top: 0;", "3. Price" }
                p { style: "margin: 4px 0; color: #666;", "\u{20B9}{unit} per page x {pages} pages x {copies}" }
                p { style: "margin: 4px 0; font-size: 20px; font-weight: bold;", "Total: \u{20B9}{total}" }
                label { style: "display: flex; gap: 8px; align-items: center; margin-top: 8px;",
                    input {
                        r#type: "checkbox",
                        checked: *pay_advance.read(),
                        onchange: move |evt| pay_advance.set(evt.checked()),
                    }
                    "Pay 50% advance now (\u{20B9}{advance})"
                }
            }

            button {
                style: "width: 100%; padding: 16px; border-radius: 12px; border: none; background: #0d47a1; color: white; font-size: 18px; font-weight: bold;",
                disabled: !ready,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let draft = OrderDraft {
                            kind: *kind.read(),
                            sides: *sides.read(),
                            file_names: files.read().clone(),
                            pages: *pages.read(),
                            copies: *copies.read(),
                            instructions: Some(instructions.read().clone()),
                            pay_advance: *pay_advance.read(),
                        };
                        let svc = svc.clone();
                        placing.set(true);
                        spawn(async move {
                            let result = svc.place_order(draft).await;
                            placing.set(false);
                            match result {
                                Ok(receipt) => {
                                    let notice = match receipt.delivery {
                                        Outcome::Failure(ref reason) => {
                                            tracing::warn!(%reason, "order write did not leave the device");
                                            Notice::warning("Order saved, but the shop could not be reached. Send the chat message so they receive it.")
                                        }
                                        _ => Notice::success("Order placed! Opening chat to confirm with the shop."),
                                    };
                                    state.write().notice = Some(notice);
                                    navigator().push(Route::Dashboard {});
                                }
                                Err(e) => {
                                    tracing::error!(error = %e, "order not placed");
                                    state.write().notice = Some(Notice::from_error(&e));
                                }
                            }
                        });
                    }
                },
                if *placing.read() { "Placing order..." } else { "Place Order" }
            }
        }
    }
}
