// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run-Tracker: a personal fitness log.
//!
//! This crate provides the backend API for recording runs, rides and
//! swims, plus the pure calculation core (duration parsing, pace/speed
//! derivation, calendar bucketing, derived statistics) that the web
//! client renders.

pub mod calendar;
pub mod config;
pub mod db;
pub mod duration;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
