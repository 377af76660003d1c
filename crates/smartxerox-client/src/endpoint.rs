// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP access to the spreadsheet-backed order endpoint.
//
// The endpoint is a single URL; the operation is selected by an `action`
// parameter. Writes are fire-and-forget: the response is never read, so the
// best we can say about a write is that it left the client. Reads return JSON.
//
// Writes carry a JSON document as a `text/plain` body, which the spreadsheet
// script accepts without a CORS preflight.

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use smartxerox_core::Outcome;
use smartxerox_core::error::{Result, ShopError};
use tracing::{debug, instrument, warn};
use url::Url;

/// Operations the endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RegisterUser,
    LoginUser,
    CreateOrder,
    GetUserOrders,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RegisterUser => "register_user",
            Self::LoginUser => "login_user",
            Self::CreateOrder => "create_order",
            Self::GetUserOrders => "get_user_orders",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client bound to one endpoint URL. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    client: reqwest::Client,
    base: Url,
}

impl RemoteEndpoint {
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).map_err(|e| ShopError::InvalidEndpoint(format!("{base}: {e}")))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("smartxerox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ShopError::Connection(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// POST `payload` tagged with `action`, without reading the reply.
    ///
    /// `payload` must serialise to a JSON object; its fields sit beside the
    /// `action` tag.
    #[instrument(skip(self, payload), fields(action = %action))]
    pub async fn send_write<T: Serialize + ?Sized>(&self, action: Action, payload: &T) -> Outcome {
        let body = match tagged_body(action, payload) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "write payload could not be encoded");
                return Outcome::Failure(e.to_string());
            }
        };

        let sent = self
            .client
            .post(self.base.clone())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await;

        match sent {
            Ok(response) => {
                debug!(status = %response.status(), "write dispatched; reply ignored");
                Outcome::Unconfirmed
            }
            Err(e) => {
                warn!(error = %e, "write did not leave the client");
                Outcome::Failure(e.to_string())
            }
        }
    }

    /// GET with `action` and `params` as query parameters and decode the JSON
    /// reply. Every transport, status or decoding failure is a `Connection`
    /// error.
    #[instrument(skip(self, params), fields(action = %action))]
    pub async fn read_json(&self, action: Action, params: &[(&str, &str)]) -> Result<Value> {
        let response = self
            .client
            .get(self.base.clone())
            .query(&[("action", action.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| ShopError::Connection(e.to_string()))?
            .error_for_status()
            .map_err(|e| ShopError::Connection(e.to_string()))?;

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| ShopError::Connection(format!("reply was not JSON: {e}")))?;
        debug!("read reply decoded");
        Ok(value)
    }
}

/// `{ "action": <tag>, ...payload }` as a JSON string.
fn tagged_body<T: Serialize + ?Sized>(action: Action, payload: &T) -> Result<String> {
    let mut object = match serde_json::to_value(payload)? {
        Value::Object(map) => map,
        other => {
            return Err(ShopError::Connection(format!(
                "write payload must be a JSON object, got {other}"
            )));
        }
    };
    object.insert("action".into(), Value::String(action.as_str().into()));
    Ok(serde_json::to_string(&object)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_carries_action_beside_fields() {
        let body = tagged_body(Action::RegisterUser, &json!({ "name": "A", "mobile": "1" }))
            .expect("encode");
        let value: Value = serde_json::from_str(&body).expect("json");
        assert_eq!(value["action"], "register_user");
        assert_eq!(value["name"], "A");
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(tagged_body(Action::CreateOrder, &json!([1, 2])).is_err());
    }

    #[test]
    fn bad_base_url_is_invalid_endpoint() {
        assert!(matches!(
            RemoteEndpoint::new("not a url"),
            Err(ShopError::InvalidEndpoint(_))
        ));
    }
}
