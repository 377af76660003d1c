// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Login page: sign in by mobile number.

use dioxus::prelude::*;

use smartxerox_core::Page;

use crate::Route;
use crate::services::app_services::AppServices;
use crate::state::{AppState, Notice};

#[component]
pub fn Login(return_to: String) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut mobile = use_signal(String::new);
    let mut busy = use_signal(|| false);

    rsx! {
        div { style: "max-width: 420px;",
            h1 { "Login" }
            p { style: "color: #666;", "Use the mobile number you signed up with." }

            input {
                r#type: "tel",
                placeholder: "Mobile number",
                value: "{mobile}",
                style: "width: 100%; padding: 12px; font-size: 16px; border: 1px solid #ccc; border-radius: 8px; box-sizing: border-box;",
                oninput: move |evt| mobile.set(evt.value()),
            }

            button {
                style: "width: 100%; margin-top: 16px; padding: 14px; border: none; border-radius: 8px; background: #0d47a1; color: white; font-size: 16px;",
                disabled: mobile.read().trim().is_empty() || *busy.read(),
                onclick: {
                    let svc = svc.clone();
                    let return_to = Some(return_to.as_str())
                        .filter(|path| !path.is_empty())
                        .and_then(Page::from_path)
                        .filter(|page| page.is_protected());
                    move |_| {
                        let svc = svc.clone();
                        let number = mobile.read().trim().to_string();
                        busy.set(true);
                        spawn(async move {
                            let result = svc.login(number, return_to).await;
                            busy.set(false);
                            match result {
                                Ok(ok) => {
                                    tracing::info!(user_id = %ok.profile.id, "signed in");
                                    let mut s = state.write();
                                    s.notice = Some(Notice::success(format!(
                                        "Welcome back, {}!",
                                        ok.profile.first_name()
                                    )));
                                    s.user = Some(ok.profile);
                                    drop(s);
                                    navigator().push(Route::from(ok.redirect));
                                }
                                Err(e) => {
                                    tracing::warn!(error = %e, "login failed");
                                    state.write().notice = Some(Notice::from_error(&e));
                                }
                            }
                        });
                    }
                },
                if *busy.read() { "Signing in..." } else { "Login" }
            }

            p { style: "margin-top: 16px; color: #666;",
                "New here? "
                Link { to: Route::Signup {}, "Create an account" }
            }
        }
    }
}
