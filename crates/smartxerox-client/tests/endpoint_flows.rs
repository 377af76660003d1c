// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Auth and order flows against a mock spreadsheet endpoint.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde_json::json;
use smartxerox_bridge::traits::{NativeOpenUrl, NativeSaveFile, PlatformBridge};
use smartxerox_client::{
    AuthService, OrderService, ReceiptStatus, RemoteEndpoint, SessionContext, SessionStore,
};
use smartxerox_core::error::{Result, ShopError};
use smartxerox_core::{Order, Outcome, Page, SignupForm, UserProfile};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Records every link it is asked to open.
#[derive(Default)]
struct RecordingBridge {
    opened: Mutex<Vec<String>>,
}

impl PlatformBridge for RecordingBridge {
    fn platform_name(&self) -> &str {
        "test"
    }
}

impl NativeOpenUrl for RecordingBridge {
    fn open_url(&self, url: &str) -> Result<()> {
        self.opened.lock().expect("lock").push(url.to_owned());
        Ok(())
    }
}

impl NativeSaveFile for RecordingBridge {
    fn save_download(&self, _file_name: &str, _bytes: &[u8]) -> Result<PathBuf> {
        Err(ShopError::PlatformUnavailable)
    }
}

fn endpoint(server: &MockServer) -> RemoteEndpoint {
    RemoteEndpoint::new(&format!("{}/exec", server.uri())).expect("endpoint")
}

fn session() -> (TempDir, SessionContext) {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = SessionContext::init(SessionStore::in_dir(dir.path()));
    (dir, ctx)
}

fn form() -> SignupForm {
    SignupForm {
        name: "Kavya Rao".into(),
        mobile: "9876543210".into(),
        email: None,
        extra: Default::default(),
    }
}

fn profile() -> UserProfile {
    UserProfile::from_signup("u-1", &form())
}

fn order() -> Order {
    Order {
        order_id: "5f2c9e1a-0000-4000-8000-000000000000".into(),
        print_type: "B&W Xerox (single-sided)".into(),
        file_names: vec!["notes.pdf".into()],
        pages: 20,
        copies: 2,
        amount_total: 80.0,
        amount_paid: 0.0,
        instructions: None,
        date: Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).single().expect("date"),
    }
}

async fn mount_login(server: &MockServer, reply: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/exec"))
        .and(query_param("action", "login_user"))
        .and(query_param("mobile", "9876543210"))
        .respond_with(reply)
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_adopts_the_returned_profile() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "user": { "id": 17, "name": "Kavya Rao", "mobile": 9876543210u64, "email": "k@example.com" },
        })),
    )
    .await;

    let (_dir, ctx) = session();
    let auth = AuthService::new(endpoint(&server), ctx.clone());
    let ok = auth.login("9876543210", None).await.expect("login");

    assert_eq!(ok.profile.id, "17");
    assert_eq!(ok.profile.extra["email"], "k@example.com");
    assert_eq!(ok.redirect, Page::Dashboard);
    assert_eq!(ok.delivery, Outcome::Success);
    assert_eq!(ctx.current(), Some(ok.profile.clone()));
    assert_eq!(ctx.store().load(), Some(ok.profile));
}

#[tokio::test]
async fn login_honours_return_page() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "user": { "id": "u-5", "name": "Kavya Rao", "mobile": "9876543210" },
        })),
    )
    .await;

    let (_dir, ctx) = session();
    let auth = AuthService::new(endpoint(&server), ctx);
    let ok = auth.login("9876543210", Some(Page::Order)).await.expect("login");
    assert_eq!(ok.redirect, Page::Order);
}

#[tokio::test]
async fn unknown_mobile_is_not_found_and_keeps_session() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "status": "error", "message": "User not found" })),
    )
    .await;

    let (_dir, ctx) = session();
    ctx.establish(profile()).expect("establish");
    let auth = AuthService::new(endpoint(&server), ctx.clone());

    let err = auth.login("9876543210", None).await.expect_err("should fail");
    assert!(matches!(err, ShopError::NotFound(_)));
    assert_eq!(ctx.current().map(|p| p.id), Some("u-1".into()));
}

#[tokio::test]
async fn broken_replies_are_connection_errors() {
    for reply in [
        ResponseTemplate::new(500),
        ResponseTemplate::new(200).set_body_string("<html>Sign in</html>"),
    ] {
        let server = MockServer::start().await;
        mount_login(&server, reply).await;

        let (_dir, ctx) = session();
        let auth = AuthService::new(endpoint(&server), ctx.clone());
        let err = auth.login("9876543210", None).await.expect_err("should fail");
        assert!(matches!(err, ShopError::Connection(_)), "{err:?}");
        assert!(!ctx.is_signed_in());
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_connection_error() {
    let (_dir, ctx) = session();
    let endpoint = RemoteEndpoint::new("http://127.0.0.1:9/exec").expect("endpoint");
    let auth = AuthService::new(endpoint, ctx.clone());

    let err = auth.login("9876543210", None).await.expect_err("should fail");
    assert!(matches!(err, ShopError::Connection(_)));
    assert!(!ctx.is_signed_in());
}

#[tokio::test]
async fn signup_posts_the_form_and_signs_in_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(header("content-type", "text/plain;charset=utf-8"))
        .and(body_partial_json(json!({
            "action": "register_user",
            "name": "Kavya Rao",
            "mobile": "9876543210",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let (_dir, ctx) = session();
    let auth = AuthService::new(endpoint(&server), ctx.clone());
    let first = auth.signup(&form(), None).await;
    let second = auth.signup(&form(), None).await;

    assert_eq!(first.delivery, Outcome::Unconfirmed);
    assert_eq!(first.redirect, Page::Dashboard);
    assert!(first.profile.id.starts_with("u-"));
    assert_ne!(first.profile.id, second.profile.id);
    assert_eq!(first.profile.name, "Kavya Rao");
    assert_eq!(ctx.current(), Some(second.profile));
}

#[tokio::test]
async fn signup_survives_a_dead_endpoint() {
    let (_dir, ctx) = session();
    let endpoint = RemoteEndpoint::new("http://127.0.0.1:9/exec").expect("endpoint");
    let auth = AuthService::new(endpoint, ctx.clone());

    let ok = auth.signup(&form(), Some(Page::Order)).await;
    assert!(matches!(ok.delivery, Outcome::Failure(_)));
    assert_eq!(ok.redirect, Page::Order);
    assert!(ctx.is_signed_in());
}

#[tokio::test]
async fn confirmed_signup_adopts_the_backend_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "user": { "id": "row-88", "name": "Kavya Rao", "mobile": "9876543210" },
        })),
    )
    .await;

    let (_dir, ctx) = session();
    let auth = AuthService::new(endpoint(&server), ctx.clone()).with_signup_confirmation(true);
    let ok = auth.signup(&form(), None).await;

    assert_eq!(ok.delivery, Outcome::Success);
    assert_eq!(ok.profile.id, "row-88");
    assert_eq!(ctx.current().map(|p| p.id), Some("row-88".into()));
}

#[tokio::test]
async fn logout_clears_session_and_returns_home() {
    let server = MockServer::start().await;
    let (_dir, ctx) = session();
    ctx.establish(profile()).expect("establish");
    let auth = AuthService::new(endpoint(&server), ctx.clone());

    assert_eq!(auth.logout().expect("logout"), Page::Home);
    assert!(!ctx.is_signed_in());
    assert!(ctx.store().load().is_none());
}

fn order_service(endpoint: RemoteEndpoint, bridge: &Arc<RecordingBridge>) -> OrderService {
    let bridge: Arc<dyn PlatformBridge> = bridge.clone();
    OrderService::new(endpoint, bridge, "91 99162 20476", Duration::from_millis(10))
}

#[tokio::test]
async fn create_order_posts_and_hands_off() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_partial_json(json!({
            "action": "create_order",
            "user_id": "u-1",
            "order": { "order_id": "5f2c9e1a-0000-4000-8000-000000000000", "copies": 2 },
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let bridge = Arc::new(RecordingBridge::default());
    let orders = order_service(endpoint(&server), &bridge);
    let receipt = orders.create_order(&order(), &profile()).await.expect("receipt");

    assert_eq!(receipt.status, ReceiptStatus::Success);
    assert_eq!(receipt.delivery, Outcome::Unconfirmed);
    assert!(receipt.handoff_link.starts_with("https://wa.me/919916220476?text="));
    assert!(receipt.handoff_link.contains("%2ANew%20Order%3A%205f2c9e1a%2A"));
    assert!(receipt.handoff_link.contains("Instructions%3A%20None"));

    receipt.handoff.await.expect("hand-off task");
    let opened = bridge.opened.lock().expect("lock").clone();
    assert_eq!(opened, vec![receipt.handoff_link]);
}

#[tokio::test]
async fn create_order_reports_success_on_a_dead_endpoint() {
    let bridge = Arc::new(RecordingBridge::default());
    let endpoint = RemoteEndpoint::new("http://127.0.0.1:9/exec").expect("endpoint");
    let orders = order_service(endpoint, &bridge);

    let receipt = orders.create_order(&order(), &profile()).await.expect("receipt");
    assert_eq!(receipt.status, ReceiptStatus::Success);
    assert!(matches!(receipt.delivery, Outcome::Failure(_)));

    receipt.handoff.await.expect("hand-off task");
    assert_eq!(bridge.opened.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn create_order_for_session_needs_a_session() {
    let server = MockServer::start().await;
    let bridge = Arc::new(RecordingBridge::default());
    let orders = order_service(endpoint(&server), &bridge);
    let (_dir, ctx) = session();

    let err = orders
        .create_order_for_session(&order(), &ctx)
        .await
        .expect_err("no session");
    assert!(matches!(err, ShopError::NotSignedIn));
    assert!(bridge.opened.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn fetch_orders_returns_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/exec"))
        .and(query_param("action", "get_user_orders"))
        .and(query_param("user_id", "u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [
                {
                    "order_id": "aa11-1", "print_type": "Color Print (single-sided)",
                    "file_names": "a.pdf, b.pdf", "pages": 3, "copies": 1,
                    "amount_total": 15, "amount_paid": 7.5, "date": "2026-03-01T08:00:00Z",
                },
                { "garbage": true },
            ],
        })))
        .mount(&server)
        .await;

    let bridge = Arc::new(RecordingBridge::default());
    let orders = order_service(endpoint(&server), &bridge);
    let history = orders.fetch_orders("u-1").await;

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].file_names, ["a.pdf", "b.pdf"]);
    assert_eq!(history[0].amount_paid, 7.5);
}

#[tokio::test]
async fn fetch_orders_is_empty_on_every_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("user_id", "refused"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "error" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("user_id", "broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("user_id", "html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let bridge = Arc::new(RecordingBridge::default());
    let orders = order_service(endpoint(&server), &bridge);
    for user_id in ["", "refused", "broken", "html"] {
        assert!(orders.fetch_orders(user_id).await.is_empty(), "{user_id:?}");
    }

    let dead = order_service(
        RemoteEndpoint::new("http://127.0.0.1:9/exec").expect("endpoint"),
        &bridge,
    );
    assert!(dead.fetch_orders("u-1").await.is_empty());
}
