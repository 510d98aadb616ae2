//! Core SusuPay client library (auth gateway, API client, config).

pub mod api;
pub mod auth;
pub mod config;
