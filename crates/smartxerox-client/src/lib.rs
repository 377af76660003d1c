// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Smart Xerox client: the signed-in session, sign-up/login, order placement
// with the chat hand-off, and order history. Everything remote goes through a
// single spreadsheet-backed HTTP endpoint.

pub mod auth;
pub mod endpoint;
pub mod handoff;
pub mod orders;
pub mod session;

pub use auth::{AuthService, AuthSuccess};
pub use endpoint::{Action, RemoteEndpoint};
pub use orders::{OrderReceipt, OrderService, ReceiptStatus};
pub use session::{SessionContext, SessionStore};
