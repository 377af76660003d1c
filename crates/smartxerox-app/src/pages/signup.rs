// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signup page.

use dioxus::prelude::*;

use smartxerox_core::{Outcome, SignupForm};

use crate::Route;
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

#[component]
pub fn Signup() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut name = use_signal(String::new);
    let mut mobile = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let incomplete = name.read().trim().is_empty() || mobile.read().trim().is_empty();

    rsx! {
        div { style: "max-width: 420px;",
            h1 { "Create an account" }

            div { style: "display: flex; flex-direction: column; gap: 12px;",
                input {
                    placeholder: "Full name",
                    value: "{name}",
                    style: "padding: 12px; font-size: 16px; border: 1px solid #ccc; border-radius: 8px;",
                    oninput: move |evt| name.set(evt.value()),
                }
                input {
                    r#type: "tel",
                    placeholder: "Mobile number",
                    value: "{mobile}",
                    style: "padding: 12px; font-size: 16px; border: 1px solid #ccc; border-radius: 8px;",
                    oninput: move |evt| mobile.set(evt.value()),
                }
                input {
                    r#type: "email",
                    placeholder: "Email (optional)",
                    value: "{email}",
                    style: "padding: 12px; font-size: 16px; border: 1px solid #ccc; border-radius: 8px;",
                    oninput: move |evt| email.set(evt.value()),
                }
            }

            button {
                style: "width: 100%; margin-top: 16px; padding: 14px; border: none; border-radius: 8px; background: #0d47a1; color: white; font-size: 16px;",
                disabled: incomplete || *busy.read(),
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let svc = svc.clone();
                        let email_text = email.read().trim().to_string();
                        let form = SignupForm {
                            name: name.read().trim().to_string(),
                            mobile: mobile.read().trim().to_string(),
                            email: (!email_text.is_empty()).then_some(email_text),
                            extra: Default::default(),
                        };
                        busy.set(true);
                        spawn(async move {
                            let ok = svc.signup(form, None).await;
                            busy.set(false);
                            let notice = match &ok.delivery {
                                Outcome::Failure(reason) => {
                                    tracing::warn!(%reason, "signup not delivered");
                                    Notice::warning(
                                        "Could not reach the shop. You are signed in on this device; please try signing up again later.",
                                    )
                                }
                                _ => Notice::success(format!("Welcome, {}!", ok.profile.first_name())),
                            };
                            let mut s = state.write();
                            s.notice = Some(notice);
                            s.user = Some(ok.profile);
                            drop(s);
                            navigator().push(Route::from(ok.redirect));
                        });
                    }
                },
                if *busy.read() { "Creating account..." } else { "Sign Up" }
            }

            p { style: "margin-top: 16px; color: #666;",
                "Already registered? "
                Link { to: Route::Login { return_to: String::new() }, "Login" }
            }
        }
    }
}
