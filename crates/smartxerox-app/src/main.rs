// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Smart Xerox: print shop ordering app.
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use smartxerox_core::Page;
use smartxerox_core::navigation::{self, NavStyle, NavTarget};

use pages::dashboard::Dashboard;
use pages::home::Home;
use pages::login::Login;
use pages::order::NewOrder;
use pages::services::Services;
use pages::signup::Signup;

use services::app_services::AppServices;
use state::{AppState, Notice};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Smart Xerox starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(ShopLayout)]
    #[route("/")]
    Home {},
    #[route("/services")]
    Services {},
    #[route("/login?:return_to")]
    Login { return_to: String },
    #[route("/signup")]
    Signup {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/order")]
    NewOrder {},
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::Home => Route::Home {},
            Page::Services => Route::Services {},
            Page::Login => Route::Login {
                return_to: String::new(),
            },
            Page::Signup => Route::Signup {},
            Page::Dashboard => Route::Dashboard {},
            Page::Order => Route::NewOrder {},
        }
    }
}

/// Sends a signed-out visitor of a protected page to the login page, which
/// brings them back afterwards. Returns whether `page` may render.
fn guard_page(page: Page) -> bool {
    let state = use_context::<Signal<AppState>>();
    let signed_in = state.read().user.is_some();
    match navigation::guard(page, signed_in) {
        Some(Page::Login) => {
            navigator().replace(Route::Login {
                return_to: page.path().to_string(),
            });
            false
        }
        Some(other) => {
            navigator().replace(Route::from(other));
            false
        }
        None => true,
    }
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => Ok(s),
        Err(e) => {
            tracing::error!(error = %e, "config unusable, falling back to defaults");
            AppServices::fallback().map_err(|e| e.to_string())
        }
    });

    let svc = match svc {
        Ok(svc) => svc,
        Err(msg) => {
            return rsx! {
                div { style: "padding: 32px; font-family: system-ui, sans-serif;",
                    h1 { "Smart Xerox" }
                    p { style: "color: #721c24;", "The app could not start: {msg}" }
                }
            };
        }
    };

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(AppState::new(&svc)));

    rsx! {
        Router::<Route> {}
    }
}

/// Top navigation bar and notice banner wrapping every page.
#[component]
fn ShopLayout() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let links = navigation::nav_links(state.read().user.as_ref());

    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; min-height: 100vh; font-family: system-ui, -apple-system, sans-serif; background: #f7f8fa;",

            nav { class: "nav-bar",
                style: "display: flex; align-items: center; gap: 12px; padding: 12px 20px; background: white; border-bottom: 1px solid #e0e0e0;",
                Link { to: Route::Home {},
                    style: "font-weight: bold; font-size: 18px; color: #0d47a1; text-decoration: none; margin-right: auto;",
                    "{svc.config().shop.name}"
                }
                for link in links {
                    {match link.target {
                        NavTarget::Page(page) => rsx! {
                            Link { to: Route::from(page),
                                style: nav_style(link.style),
                                "{link.label}"
                            }
                        },
                        NavTarget::Logout => rsx! {
                            button {
                                style: nav_style(link.style),
                                onclick: {
                                    let svc = svc.clone();
                                    move |_| {
                                        match svc.logout() {
                                            Ok(next) => {
                                                let mut s = state.write();
                                                s.user = None;
                                                s.orders.clear();
                                                s.notice = Some(Notice::info("You have been logged out."));
                                                drop(s);
                                                navigator().push(Route::from(next));
                                            }
                                            Err(e) => {
                                                tracing::warn!(error = %e, "session file not removed");
                                                state.write().notice = Some(Notice::from_error(&e));
                                            }
                                        }
                                    }
                                },
                                "{link.label}"
                            }
                        },
                    }}
                }
            }

            if let Some(notice) = state.read().notice.clone() {
                {
                    let (fg, bg) = notice.colors();
                    rsx! {
                        div {
                            style: "display: flex; justify-content: space-between; align-items: center; margin: 12px 20px 0; padding: 12px 16px; border-radius: 8px; color: {fg}; background: {bg};",
                            span { "{notice.text}" }
                            button {
                                style: "border: none; background: transparent; color: {fg}; font-size: 16px; cursor: pointer;",
                                onclick: move |_| state.write().notice = None,
                                "\u{00D7}"
                            }
                        }
                    }
                }
            }

            div { class: "page-content",
                style: "flex: 1; padding: 20px; max-width: 880px; width: 100%; margin: 0 auto; box-sizing: border-box;",
                Outlet::<Route> {}
            }
        }
    }
}

fn nav_style(style: NavStyle) -> &'static str {
    match style {
        NavStyle::Plain => "padding: 6px 10px; color: #333; text-decoration: none; border: none; background: transparent; font-size: 15px; cursor: pointer;",
        NavStyle::Active => "padding: 6px 10px; color: #0d47a1; font-weight: bold; text-decoration: none; font-size: 15px;",
        NavStyle::Primary => "padding: 6px 14px; color: white; background: #0d47a1; border-radius: 6px; text-decoration: none; font-size: 15px;",
        NavStyle::Outline => "padding: 5px 13px; color: #0d47a1; border: 1px solid #0d47a1; border-radius: 6px; text-decoration: none; font-size: 15px;",
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use dioxus_history::{History, MemoryHistory};
    use serde_json::Map;
    use smartxerox_client::SessionStore;
    use smartxerox_core::{AppConfig, UserProfile};

    use super::*;

    fn shell() -> Element {
        let svc = use_context::<AppServices>();
        use_context_provider(|| Signal::new(AppState::new(&svc)));
        rsx! {
            Router::<Route> {}
        }
    }

    /// Render `path` once. Returns the markup and the route the history
    /// ended on.
    fn render_at(path: &str, user: Option<UserProfile>) -> (String, String) {
        let dir = tempfile::tempdir().expect("tempdir");
        if let Some(user) = &user {
            SessionStore::in_dir(dir.path()).save(user).expect("save session");
        }
        let svc = AppServices::with_config(dir.path().to_path_buf(), AppConfig::default())
            .expect("services");
        let history: Rc<dyn History> = Rc::new(MemoryHistory::with_initial_path(path));
        let mut dom = VirtualDom::new(shell)
            .with_root_context(svc)
            .with_root_context(history.clone());
        dom.rebuild_in_place();
        (dioxus_ssr::render(&dom), history.current_route())
    }

    fn ravi() -> UserProfile {
        UserProfile {
            id: "u-1".into(),
            name: "Ravi Kumar".into(),
            mobile: "9000000001".into(),
            extra: Map::new(),
        }
    }

    #[test]
    fn signed_out_dashboard_renders_nothing_and_redirects() {
        let (html, route) = render_at("/dashboard", None);
        assert!(html.contains("Sign Up"), "layout missing: {html}");
        assert!(!html.contains("My Orders"), "dashboard leaked: {html}");
        assert!(route.starts_with("/login"), "ended on {route}");
        assert!(route.contains("dashboard"), "return page lost: {route}");
    }

    #[test]
    fn signed_out_order_page_renders_nothing_and_redirects() {
        let (html, route) = render_at("/order", None);
        assert!(!html.contains("Place Order"), "order form leaked: {html}");
        assert!(!html.contains("1. Files"));
        assert!(route.starts_with("/login"), "ended on {route}");
    }

    #[test]
    fn signed_in_dashboard_renders() {
        let (html, route) = render_at("/dashboard", Some(ravi()));
        assert!(html.contains("My Orders"), "dashboard missing: {html}");
        assert!(html.contains("Hi, Ravi"));
        assert_eq!(route, "/dashboard");
    }
}
