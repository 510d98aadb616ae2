//! Transaction command handlers.

use anyhow::{Result, bail};
use susu_core::api::types::{
    ClientTransactionItem, SmsSubmitRequest, SubmitResponse, TransactionFeedItem,
    TransactionStatus,
};
use susu_core::api::{Page, SusuClient};

use super::super::TransactionCommands;

pub async fn dispatch(client: &SusuClient, command: TransactionCommands) -> Result<()> {
    match command {
        TransactionCommands::Feed { limit } => feed(client, limit).await,
        TransactionCommands::List {
            status,
            skip,
            limit,
        } => list(client, status.as_deref(), skip, limit).await,
        TransactionCommands::Mine {
            status,
            skip,
            limit,
        } => mine(client, status.as_deref(), skip, limit).await,
        TransactionCommands::Confirm { id } => confirm(client, &id).await,
        TransactionCommands::Query { id, note } => query(client, &id, &note).await,
        TransactionCommands::Reject { id, note } => reject(client, &id, &note).await,
        TransactionCommands::SubmitSms { client_id, sms } => {
            submit_sms(client, &client_id, &sms).await
        }
    }
}

async fn feed(client: &SusuClient, limit: u64) -> Result<()> {
    let page = client.transaction_feed(limit).await?;
    for item in &page.items {
        print_feed_item(item);
    }
    println!("{} pending submissions", page.total);
    Ok(())
}

async fn list(client: &SusuClient, status: Option<&str>, skip: u64, limit: u64) -> Result<()> {
    let status = status.map(parse_status).transpose()?;
    let page = client.transactions(status, Page { skip, limit }).await?;
    for item in &page.items {
        print_feed_item(item);
    }
    println!(
        "Showing {} of {} (skip {})",
        page.items.len(),
        page.total,
        page.skip
    );
    Ok(())
}

async fn mine(client: &SusuClient, status: Option<&str>, skip: u64, limit: u64) -> Result<()> {
    let status = status.map(parse_status).transpose()?;
    let page = client.my_history(status, Page { skip, limit }).await?;
    for item in &page.items {
        print_history_item(item);
    }
    println!(
        "Showing {} of {} (skip {})",
        page.items.len(),
        page.total,
        page.skip
    );
    Ok(())
}

async fn confirm(client: &SusuClient, id: &str) -> Result<()> {
    let action = client.confirm_transaction(id).await?;
    println!(
        "Transaction {} -> {}",
        action.transaction_id,
        status_label(action.status)
    );
    Ok(())
}

async fn query(client: &SusuClient, id: &str, note: &str) -> Result<()> {
    let action = client.query_transaction(id, note).await?;
    println!(
        "Transaction {} -> {}",
        action.transaction_id,
        status_label(action.status)
    );
    Ok(())
}

async fn reject(client: &SusuClient, id: &str, note: &str) -> Result<()> {
    let action = client.reject_transaction(id, note).await?;
    println!(
        "Transaction {} -> {}",
        action.transaction_id,
        status_label(action.status)
    );
    Ok(())
}

async fn submit_sms(client: &SusuClient, client_id: &str, sms: &str) -> Result<()> {
    let response = client
        .submit_sms(&SmsSubmitRequest {
            client_id: client_id.to_string(),
            sms_text: sms.to_string(),
        })
        .await?;
    print_submit_response(&response);
    Ok(())
}

fn print_submit_response(response: &SubmitResponse) {
    println!(
        "Submitted as {} ({}, trust {:?})",
        response.transaction_id,
        status_label(response.status),
        response.trust_level
    );
    if let Some(amount) = response.parsed.amount {
        println!("Parsed amount: {amount}");
    }
    for flag in &response.validation_flags {
        let mark = if flag.passed { "ok" } else { "FAIL" };
        println!("  [{mark}] {}: {}", flag.check, flag.detail);
    }
}

fn print_feed_item(item: &TransactionFeedItem) {
    println!(
        "{}  {}  {}  {}  trust {:?}  {}",
        item.id,
        item.submitted_at,
        item.client_name,
        item.amount,
        item.trust_level,
        status_label(item.status)
    );
    if let Some(note) = &item.collector_note {
        println!("    note: {note}");
    }
}

fn print_history_item(item: &ClientTransactionItem) {
    println!(
        "{}  {}  {}  {}",
        item.id,
        item.submitted_at,
        item.amount,
        status_label(item.status)
    );
    if let Some(note) = &item.collector_note {
        println!("    note: {note}");
    }
}

fn status_label(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Pending => "pending",
        TransactionStatus::Confirmed => "confirmed",
        TransactionStatus::Queried => "queried",
        TransactionStatus::Rejected => "rejected",
        TransactionStatus::AutoRejected => "auto-rejected",
    }
}

pub fn parse_status(value: &str) -> Result<TransactionStatus> {
    match value.to_ascii_lowercase().as_str() {
        "pending" => Ok(TransactionStatus::Pending),
        "confirmed" => Ok(TransactionStatus::Confirmed),
        "queried" => Ok(TransactionStatus::Queried),
        "rejected" => Ok(TransactionStatus::Rejected),
        "auto-rejected" | "auto_rejected" => Ok(TransactionStatus::AutoRejected),
        other => bail!(
            "unknown status '{other}' (expected pending, confirmed, queried, rejected, or auto-rejected)"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: status filter strings map to wire statuses.
    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("PENDING").unwrap(), TransactionStatus::Pending);
        assert_eq!(
            parse_status("auto-rejected").unwrap(),
            TransactionStatus::AutoRejected
        );
        assert!(parse_status("bogus").is_err());
    }
}
