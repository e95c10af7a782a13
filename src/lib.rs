// SPDX-License-Identifier: MIT

//! LiftLog: a gym training tracker API.
//!
//! This crate provides the backend API for defining workout programs,
//! logging training sessions, and computing progress statistics.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use middleware::auth::TokenCodec;
use services::OauthExchangeService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub token_codec: TokenCodec,
    pub oauth: OauthExchangeService,
}
