//! Payout command handlers.

use anyhow::Result;
use susu_core::api::types::{PayoutRequest, PayoutResponse, PayoutStatus, PayoutType};
use susu_core::api::{Page, SusuClient};

use super::super::PayoutCommands;

pub async fn dispatch(client: &SusuClient, command: PayoutCommands) -> Result<()> {
    match command {
        PayoutCommands::List { skip, limit } => list(client, skip, limit).await,
        PayoutCommands::Mine { skip, limit } => mine(client, skip, limit).await,
        PayoutCommands::Request {
            amount,
            emergency,
            reason,
        } => request(client, amount, emergency, reason).await,
        PayoutCommands::Approve { id } => {
            let payout = client.approve_payout(&id).await?;
            print_payout(&payout);
            Ok(())
        }
        PayoutCommands::Decline { id, reason } => {
            let payout = client.decline_payout(&id, &reason).await?;
            print_payout(&payout);
            Ok(())
        }
        PayoutCommands::Complete { id } => {
            let payout = client.complete_payout(&id).await?;
            print_payout(&payout);
            Ok(())
        }
    }
}

async fn list(client: &SusuClient, skip: u64, limit: u64) -> Result<()> {
    let page = client.payouts(Page { skip, limit }).await?;
    for item in &page.items {
        println!(
            "{}  {}  {}  {}  {}  requested {}",
            item.id,
            item.client_name,
            item.amount,
            type_label(item.payout_type),
            status_label(item.status),
            item.requested_at
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

async fn mine(client: &SusuClient, skip: u64, limit: u64) -> Result<()> {
    let page = client.my_payouts(Page { skip, limit }).await?;
    for item in &page.items {
        println!(
            "{}  {}  {}  {}  requested {}",
            item.id,
            item.amount,
            type_label(item.payout_type),
            status_label(item.status),
            item.requested_at
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

async fn request(
    client: &SusuClient,
    amount: f64,
    emergency: bool,
    reason: Option<String>,
) -> Result<()> {
    let payout_type = if emergency {
        PayoutType::Emergency
    } else {
        PayoutType::Scheduled
    };
    let payout = client
        .request_payout(&PayoutRequest {
            amount,
            payout_type,
            reason,
        })
        .await?;
    print_payout(&payout);
    Ok(())
}

fn print_payout(payout: &PayoutResponse) {
    println!(
        "Payout {}: {} {} -> {}",
        payout.id,
        payout.amount,
        type_label(payout.payout_type),
        status_label(payout.status)
    );
    if let Some(reason) = &payout.reason {
        println!("  reason: {reason}");
    }
    if let Some(at) = &payout.approved_at {
        println!("  approved at {at}");
    }
    if let Some(at) = &payout.completed_at {
        println!("  completed at {at}");
    }
}

fn type_label(payout_type: PayoutType) -> &'static str {
    match payout_type {
        PayoutType::Scheduled => "scheduled",
        PayoutType::Emergency => "emergency",
    }
}

fn status_label(status: PayoutStatus) -> &'static str {
    match status {
        PayoutStatus::Requested => "requested",
        PayoutStatus::Approved => "approved",
        PayoutStatus::Declined => "declined",
        PayoutStatus::Completed => "completed",
    }
}
