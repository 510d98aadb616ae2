//! Report command handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use susu_core::api::SusuClient;
use susu_core::api::types::StatementEntryType;

pub async fn summary(client: &SusuClient, year: i32, month: u32, pdf: Option<&str>) -> Result<()> {
    if let Some(path) = pdf {
        let bytes = client.monthly_summary_pdf(year, month).await?;
        fs::write(path, &bytes)
            .with_context(|| format!("write PDF to {}", Path::new(path).display()))?;
        println!("Wrote {} bytes to {path}", bytes.len());
        return Ok(());
    }

    let report = client.monthly_summary(year, month).await?;
    println!("Monthly summary {}-{:02}", report.year, report.month);
    println!(
        "Deposits {}  payouts {}  net {}",
        report.total_deposits, report.total_payouts, report.net_balance
    );
    println!("{} clients:", report.client_count);
    for item in &report.clients {
        println!(
            "  {}  deposits {} ({})  payouts {} ({})  net {}",
            item.client_name,
            item.total_deposits,
            item.deposit_count,
            item.total_payouts,
            item.payout_count,
            item.net_balance
        );
    }
    Ok(())
}

pub async fn statement(client: &SusuClient, client_id: &str, year: i32, month: u32) -> Result<()> {
    let statement = client.client_statement(client_id, year, month).await?;

    println!(
        "Statement for {} ({}-{:02})",
        statement.client_name, statement.year, statement.month
    );
    println!("Opening balance: {}", statement.opening_balance);
    for item in &statement.items {
        let kind = match item.entry_type {
            StatementEntryType::Deposit => "deposit",
            StatementEntryType::Payout => "payout",
        };
        println!(
            "  {}  {:<8}  {}  {}  balance {}",
            item.date, kind, item.amount, item.description, item.running_balance
        );
    }
    println!("Closing balance: {}", statement.closing_balance);
    Ok(())
}
