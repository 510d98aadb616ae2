//! Client-side (group member) command handlers.

use anyhow::Result;
use susu_core::api::SusuClient;

pub async fn balance(client: &SusuClient) -> Result<()> {
    let balance = client.client_balance().await?;

    println!("{}", balance.full_name);
    println!("Total deposits: {}", balance.total_deposits);
    println!("Total payouts: {}", balance.total_payouts);
    println!("Balance: {}", balance.balance);
    Ok(())
}

pub async fn group(client: &SusuClient) -> Result<()> {
    let members = client.client_group().await?;

    for member in &members {
        let position = member
            .payout_position
            .map_or(String::from("-"), |p| format!("#{p}"));
        let payout_date = member.payout_date.as_deref().unwrap_or("-");
        println!(
            "{}  {}  deposits {} ({} txns)  payout {} on {}",
            member.id, member.full_name, member.total_deposits, member.transaction_count, position, payout_date
        );
    }
    println!("{} members", members.len());
    Ok(())
}
