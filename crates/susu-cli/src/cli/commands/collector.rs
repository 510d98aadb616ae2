//! Collector command handlers.

use anyhow::Result;
use susu_core::api::{Page, SusuClient};

pub async fn dashboard(client: &SusuClient) -> Result<()> {
    let d = client.collector_dashboard().await?;

    println!("Dashboard ({})", d.period_label);
    println!(
        "Clients: {} total, {} active",
        d.total_clients, d.active_clients
    );
    println!(
        "Collection: {} of {} ({:.1}%)",
        d.amount_collected, d.amount_expected, d.collection_rate
    );
    println!(
        "Paid {} / partial {} / unpaid {}",
        d.paid_count, d.partial_count, d.unpaid_count
    );
    println!(
        "Pending transactions: {} ({} confirmed today)",
        d.pending_transactions, d.total_confirmed_today
    );
    match (d.next_payout_client, d.next_payout_date) {
        (Some(name), Some(date)) => println!("Next payout: {name} on {date}"),
        (Some(name), None) => println!("Next payout: {name}"),
        _ => println!("Next payout: none scheduled"),
    }
    Ok(())
}

pub async fn clients(client: &SusuClient, skip: u64, limit: u64) -> Result<()> {
    let page = client.collector_clients(Page { skip, limit }).await?;

    for item in &page.items {
        let status = if item.is_active { "active" } else { "inactive" };
        let position = item
            .payout_position
            .map_or(String::from("-"), |p| format!("#{p}"));
        println!(
            "{}  {}  {}  balance {}  payout {}  [{}]",
            item.id, item.full_name, item.phone, item.balance, position, status
        );
    }
    println!(
        "Showing {} of {} (skip {})",
        page.items.len(),
        page.total,
        page.skip
    );
    Ok(())
}

pub async fn client(api: &SusuClient, id: &str) -> Result<()> {
    let profile = api.collector_client(id).await?;

    println!("Client: {}", profile.full_name);
    println!("ID: {}", profile.id);
    println!("Phone: {}", profile.phone);
    println!("Daily amount: {}", profile.daily_amount);
    println!("Active: {}", profile.is_active);
    println!("Joined: {}", profile.joined_at);
    Ok(())
}
