//! CLI command handlers.

use anyhow::Result;
use susu_core::api::SusuClient;

pub mod auth;
pub mod collector;
pub mod config;
pub mod member;
pub mod payouts;
pub mod reports;
pub mod transactions;

pub async fn health(client: &SusuClient) -> Result<()> {
    let status = client.health().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
