// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod dashboard;
pub mod home;
pub mod login;
pub mod order;
pub mod services;
pub mod signup;
