// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Order placement and order history.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use smartxerox_bridge::traits::PlatformBridge;
use smartxerox_core::error::{Result, ShopError};
use smartxerox_core::{Order, Outcome, UserProfile};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::endpoint::{Action, RemoteEndpoint};
use crate::handoff;
use crate::session::SessionContext;

/// Always `success`: an order write is never confirmed or refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Success,
}

/// What the customer is told after placing an order.
#[derive(Debug, Serialize)]
pub struct OrderReceipt {
    pub status: ReceiptStatus,
    /// Transport fate of the write.
    pub delivery: Outcome,
    /// Chat link the hand-off opens.
    pub handoff_link: String,
    /// The pending hand-off. Dropping it does not cancel the task.
    #[serde(skip)]
    pub handoff: JoinHandle<()>,
}

#[derive(Serialize)]
struct CreateOrderPayload<'a> {
    user_id: &'a str,
    order: &'a Order,
}

#[derive(Clone)]
pub struct OrderService {
    endpoint: RemoteEndpoint,
    bridge: Arc<dyn PlatformBridge>,
    handoff_number: String,
    handoff_delay: Duration,
}

impl std::fmt::Debug for OrderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderService")
            .field("endpoint", &self.endpoint.base().as_str())
            .field("platform", &self.bridge.platform_name())
            .field("handoff_number", &self.handoff_number)
            .field("handoff_delay", &self.handoff_delay)
            .finish()
    }
}

impl OrderService {
    pub fn new(
        endpoint: RemoteEndpoint,
        bridge: Arc<dyn PlatformBridge>,
        handoff_number: impl Into<String>,
        handoff_delay: Duration,
    ) -> Self {
        Self {
            endpoint,
            bridge,
            handoff_number: handoff_number.into(),
            handoff_delay,
        }
    }

    /// Send `order` and schedule the chat hand-off.
    ///
    /// Must be called inside a tokio runtime. Reports success whatever
    /// happens to the write; see [`OrderReceipt::delivery`].
    #[instrument(skip(self, order, user), fields(order_id = %order.order_id, user_id = %user.id))]
    pub async fn create_order(&self, order: &Order, user: &UserProfile) -> Result<OrderReceipt> {
        let payload = CreateOrderPayload {
            user_id: &user.id,
            order,
        };
        let delivery = self.endpoint.send_write(Action::CreateOrder, &payload).await;
        info!(delivery = delivery.label(), "order dispatched");

        let message = handoff::compose_message(order, &user.name);
        let handoff_link = handoff::deep_link(&self.handoff_number, &message);
        let handoff = handoff::schedule(
            Arc::clone(&self.bridge),
            handoff_link.clone(),
            self.handoff_delay,
        );

        Ok(OrderReceipt {
            status: ReceiptStatus::Success,
            delivery,
            handoff_link,
            handoff,
        })
    }

    /// [`create_order`](Self::create_order) for whoever is signed in.
    pub async fn create_order_for_session(
        &self,
        order: &Order,
        session: &SessionContext,
    ) -> Result<OrderReceipt> {
        let user = session.current().ok_or(ShopError::NotSignedIn)?;
        self.create_order(order, &user).await
    }

    /// Order history of `user_id`. Every failure reads as an empty history.
    #[instrument(skip(self))]
    pub async fn fetch_orders(&self, user_id: &str) -> Vec<Order> {
        if user_id.is_empty() {
            return Vec::new();
        }

        let body = match self
            .endpoint
            .read_json(Action::GetUserOrders, &[("user_id", user_id)])
            .await
        {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "order history unavailable");
                return Vec::new();
            }
        };

        parse_history(body)
    }
}

/// Orders in a `{status, data}` reply. A missing status tag counts as success.
fn parse_history(body: Value) -> Vec<Order> {
    let Value::Object(mut reply) = body else {
        warn!("order history reply is not an object");
        return Vec::new();
    };

    match reply.get("status").and_then(Value::as_str) {
        None | Some("success") => {}
        Some(other) => {
            warn!(status = other, "order history refused");
            return Vec::new();
        }
    }

    let Some(Value::Array(rows)) = reply.remove("data") else {
        warn!("order history reply has no data array");
        return Vec::new();
    };

    let total = rows.len();
    let orders: Vec<Order> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<Order>(row) {
            Ok(order) => Some(order),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed order record");
                None
            }
        })
        .collect();
    info!(kept = orders.len(), total, "order history loaded");
    orders
}
