// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod export;
pub mod metrics;
pub mod oauth;
pub mod password;

pub use oauth::{OauthExchangeService, OauthSessionData};
