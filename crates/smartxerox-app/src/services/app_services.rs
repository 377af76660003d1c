// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer. Builds the endpoint client, the session and the
// invoice renderer once at startup and exposes async-friendly calls for the
// Dioxus pages.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use smartxerox_bridge::platform_bridge;
use smartxerox_bridge::traits::{NativeSaveFile, PlatformBridge};
use smartxerox_client::{
    AuthService, AuthSuccess, OrderReceipt, OrderService, RemoteEndpoint, SessionContext,
    SessionStore,
};
use smartxerox_core::error::{Result, ShopError};
use smartxerox_core::{AppConfig, Order, OrderDraft, Page, PricingTable, SignupForm, UserProfile};
use smartxerox_document::InvoiceRenderer;
use tracing::{info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";
const LOGO_FILE: &str = "logo.png";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// Every field is cheap to clone so the struct can move into event handlers
/// and spawned futures.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    session: SessionContext,
    auth: AuthService,
    orders: OrderService,
    invoices: Arc<InvoiceRenderer>,
    bridge: Arc<dyn PlatformBridge>,
}

impl AppServices {
    /// Initialise all services from the data directory. Call once at startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = match load_config(&dir) {
            Some(config) => config,
            None => {
                let config = AppConfig::default();
                if let Err(e) = persist_config(&dir, &config) {
                    warn!(error = %e, "could not write default config");
                }
                config
            }
        };
        Self::with_config(dir, config)
    }

    /// Services over `dir` with built-in defaults, ignoring `config.json`.
    pub fn fallback() -> Result<Self> {
        Self::with_config(data_dir::data_dir(), AppConfig::default())
    }

    pub(crate) fn with_config(dir: PathBuf, config: AppConfig) -> Result<Self> {
        let endpoint = RemoteEndpoint::new(&config.endpoint)?;
        let session = SessionContext::init(SessionStore::in_dir(&dir));
        let bridge: Arc<dyn PlatformBridge> = Arc::from(platform_bridge());

        let auth = AuthService::new(endpoint.clone(), session.clone())
            .with_signup_confirmation(config.confirm_signup);
        let orders = OrderService::new(
            endpoint,
            Arc::clone(&bridge),
            config.handoff_number.clone(),
            config.handoff_delay(),
        );

        let mut renderer =
            InvoiceRenderer::new(config.shop.clone()).with_margin_in(config.invoice_margin_in);
        match std::fs::read(dir.join(LOGO_FILE)) {
            Ok(logo) => renderer = renderer.with_logo(logo),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, "invoice logo unreadable, rendering without it"),
        }

        info!(platform = bridge.platform_name(), "app services initialised");

        Ok(Self {
            config: Arc::new(config),
            session,
            auth,
            orders,
            invoices: Arc::new(renderer),
            bridge,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.current()
    }

    // -- Auth ----------------------------------------------------------------

    pub async fn signup(&self, form: SignupForm, return_to: Option<Page>) -> AuthSuccess {
        self.auth.signup(&form, return_to).await
    }

    pub async fn login(&self, mobile: String, return_to: Option<Page>) -> Result<AuthSuccess> {
        self.auth.login(&mobile, return_to).await
    }

    pub fn logout(&self) -> Result<Page> {
        self.auth.logout()
    }

    // -- Orders --------------------------------------------------------------

    /// Price `draft` against the shop's list and place it for the signed-in
    /// customer.
    pub async fn place_order(&self, draft: OrderDraft) -> Result<OrderReceipt> {
        let order = draft.finalize(PricingTable::standard(), Utc::now());
        self.orders
            .create_order_for_session(&order, &self.session)
            .await
    }

    /// The signed-in customer's order history; empty when signed out.
    pub async fn order_history(&self) -> Vec<Order> {
        match self.session.current() {
            Some(user) => self.orders.fetch_orders(&user.id).await,
            None => Vec::new(),
        }
    }

    // -- Invoices ------------------------------------------------------------

    /// Render the invoice for `order` and save it as a download.
    pub fn download_invoice(&self, order: &Order) -> Result<PathBuf> {
        let user = self.session.current().ok_or(ShopError::NotSignedIn)?;
        let rendered = self.invoices.render(order, &user)?;
        let path = self.bridge.save_download(&rendered.file_name, &rendered.bytes)?;
        info!(order_id = %order.order_id, path = %path.display(), "invoice downloaded");
        Ok(path)
    }
}

// -- Config file persistence -------------------------------------------------

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "config.json malformed, using defaults");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_the_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_config(dir.path()).is_none());

        let mut config = AppConfig::default();
        config.handoff_number = "910000000000".into();
        config.confirm_signup = true;
        persist_config(dir.path(), &config).expect("persist");

        let loaded = load_config(dir.path()).expect("load");
        assert_eq!(loaded.handoff_number, "910000000000");
        assert!(loaded.confirm_signup);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{ "handoff_delay_ms": 900 }"#)
            .expect("write");

        let loaded = load_config(dir.path()).expect("load");
        assert_eq!(loaded.handoff_delay_ms, 900);
        assert_eq!(loaded.endpoint, AppConfig::default().endpoint);
    }
}
