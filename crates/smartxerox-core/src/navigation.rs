// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pages, the navigation bar, and the signed-in route guard.

use serde::{Deserialize, Serialize};

use crate::types::UserProfile;

/// Every view the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Home,
    Services,
    Login,
    Signup,
    Dashboard,
    Order,
}

impl Page {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Services => "/services",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Dashboard => "/dashboard",
            Self::Order => "/order",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        [
            Self::Home,
            Self::Services,
            Self::Login,
            Self::Signup,
            Self::Dashboard,
            Self::Order,
        ]
        .into_iter()
        .find(|p| p.path().trim_end_matches('/') == trimmed)
    }

    /// Pages that need a signed-in customer.
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Order)
    }
}

/// Where a navigation link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Page(Page),
    Logout,
}

/// Visual weight of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStyle {
    Plain,
    /// Highlighted greeting for the signed-in customer.
    Active,
    Primary,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub target: NavTarget,
    pub style: NavStyle,
}

impl NavLink {
    fn new(label: impl Into<String>, target: NavTarget, style: NavStyle) -> Self {
        Self {
            label: label.into(),
            target,
            style,
        }
    }
}

/// Navigation bar contents for the current session.
pub fn nav_links(user: Option<&UserProfile>) -> Vec<NavLink> {
    use NavTarget::Page as P;

    match user {
        Some(user) => vec![
            NavLink::new("Home", P(Page::Home), NavStyle::Plain),
            NavLink::new("New Order", P(Page::Order), NavStyle::Plain),
            NavLink::new(
                format!("Hi, {}", user.first_name()),
                P(Page::Dashboard),
                NavStyle::Active,
            ),
            NavLink::new("Logout", NavTarget::Logout, NavStyle::Plain),
        ],
        None => vec![
            NavLink::new("Home", P(Page::Home), NavStyle::Plain),
            NavLink::new("Services", P(Page::Services), NavStyle::Plain),
            NavLink::new("Login", P(Page::Login), NavStyle::Primary),
            NavLink::new("Sign Up", P(Page::Signup), NavStyle::Outline),
        ],
    }
}

/// Returns the page to redirect to, if `page` may not be shown.
pub fn guard(page: Page, signed_in: bool) -> Option<Page> {
    if page.is_protected() && !signed_in {
        Some(Page::Login)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn user(name: &str) -> UserProfile {
        UserProfile {
            id: "u-1".into(),
            name: name.into(),
            mobile: "9000000000".into(),
            extra: Map::new(),
        }
    }

    #[test]
    fn protected_pages_redirect_to_login_without_session() {
        assert_eq!(guard(Page::Dashboard, false), Some(Page::Login));
        assert_eq!(guard(Page::Order, false), Some(Page::Login));
    }

    #[test]
    fn session_lets_protected_pages_through() {
        assert_eq!(guard(Page::Dashboard, true), None);
        assert_eq!(guard(Page::Order, true), None);
    }

    #[test]
    fn public_pages_never_redirect() {
        for page in [Page::Home, Page::Services, Page::Login, Page::Signup] {
            assert_eq!(guard(page, false), None);
        }
    }

    #[test]
    fn signed_in_nav_greets_by_first_name() {
        let u = user("Ravi Kumar");
        let links = nav_links(Some(&u));
        let labels: Vec<_> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Home", "New Order", "Hi, Ravi", "Logout"]);
        assert_eq!(links[3].target, NavTarget::Logout);
    }

    #[test]
    fn signed_out_nav_offers_login_and_signup() {
        let labels: Vec<_> = nav_links(None).into_iter().map(|l| l.label).collect();
        assert_eq!(labels, ["Home", "Services", "Login", "Sign Up"]);
    }

    #[test]
    fn paths_round_trip() {
        assert_eq!(Page::from_path("/dashboard/"), Some(Page::Dashboard));
        assert_eq!(Page::from_path("/"), Some(Page::Home));
        assert_eq!(Page::from_path("/nope"), None);
    }
}
