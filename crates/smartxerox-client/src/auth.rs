// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signup, login and logout.
//
// Login reads the customer's profile from the endpoint and adopts it verbatim.
// Signup is a fire-and-forget write, so the backend's id for the new customer
// is never seen; a local `u-<millis>` id is used instead and may differ from
// the one the backend assigns.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::Deserialize;
use smartxerox_core::error::{Result, ShopError};
use smartxerox_core::{Outcome, Page, SignupForm, UserProfile};
use tracing::{info, instrument, warn};

use crate::endpoint::{Action, RemoteEndpoint};
use crate::session::SessionContext;

/// Result of a successful sign-in. The caller navigates to `redirect`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSuccess {
    pub profile: UserProfile,
    /// What is known about the backend having recorded the profile.
    pub delivery: Outcome,
    pub redirect: Page,
}

#[derive(Deserialize)]
struct LoginReply {
    #[serde(default)]
    status: String,
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    endpoint: RemoteEndpoint,
    session: SessionContext,
    confirm_signup: bool,
}

impl AuthService {
    pub fn new(endpoint: RemoteEndpoint, session: SessionContext) -> Self {
        Self {
            endpoint,
            session,
            confirm_signup: false,
        }
    }

    /// After a signup write, read the profile back and adopt the backend's id
    /// when it is already visible.
    pub fn with_signup_confirmation(mut self, confirm: bool) -> Self {
        self.confirm_signup = confirm;
        self
    }

    /// Register a new customer and sign them in. Never fails: the write's
    /// fate is reported in `delivery`.
    #[instrument(skip(self, form), fields(mobile = %form.mobile))]
    pub async fn signup(&self, form: &SignupForm, return_to: Option<Page>) -> AuthSuccess {
        let delivery = self.endpoint.send_write(Action::RegisterUser, form).await;
        let local = UserProfile::from_signup(next_local_id(), form);

        let (profile, delivery) = match delivery {
            Outcome::Unconfirmed if self.confirm_signup => {
                match self.fetch_profile(&form.mobile).await {
                    Ok(remote) => {
                        info!(local_id = %local.id, remote_id = %remote.id, "signup confirmed by read-back");
                        (remote, Outcome::Success)
                    }
                    Err(e) => {
                        warn!(error = %e, "signup read-back failed, keeping local id");
                        (local, Outcome::Unconfirmed)
                    }
                }
            }
            other => (local, other),
        };

        self.finish(profile, delivery, return_to)
    }

    /// Sign in by mobile number.
    ///
    /// `NotFound` when the backend does not know the number, `Connection`
    /// for any transport or decoding failure. The session is untouched on
    /// error.
    #[instrument(skip(self))]
    pub async fn login(&self, mobile: &str, return_to: Option<Page>) -> Result<AuthSuccess> {
        let profile = self.fetch_profile(mobile.trim()).await?;
        Ok(self.finish(profile, Outcome::Success, return_to))
    }

    /// Clear the session and return the page to show next.
    pub fn logout(&self) -> Result<Page> {
        self.session.teardown()?;
        Ok(Page::Home)
    }

    async fn fetch_profile(&self, mobile: &str) -> Result<UserProfile> {
        let body = self
            .endpoint
            .read_json(Action::LoginUser, &[("mobile", mobile)])
            .await?;
        let reply: LoginReply = serde_json::from_value(body)
            .map_err(|e| ShopError::Connection(format!("malformed login reply: {e}")))?;

        if reply.status != "success" {
            return Err(ShopError::NotFound(mobile.to_owned()));
        }
        reply
            .user
            .ok_or_else(|| ShopError::Connection("login reply carried no user".into()))
    }

    fn finish(&self, profile: UserProfile, delivery: Outcome, return_to: Option<Page>) -> AuthSuccess {
        if let Err(e) = self.session.establish(profile.clone()) {
            warn!(error = %e, "session could not be persisted; it will last until exit");
        }
        AuthSuccess {
            profile,
            delivery,
            redirect: return_to.unwrap_or(Page::Dashboard),
        }
    }
}

static LAST_LOCAL_ID: AtomicI64 = AtomicI64::new(0);

/// `u-<unix millis>`, strictly increasing within the process.
pub fn next_local_id() -> String {
    local_id_at(Utc::now().timestamp_millis())
}

fn local_id_at(now: i64) -> String {
    let mut last = LAST_LOCAL_ID.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_LOCAL_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return format!("u-{next}"),
            Err(actual) => last = actual,
        }
    }
}
