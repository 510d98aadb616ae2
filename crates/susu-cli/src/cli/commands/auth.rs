//! Auth command handlers.

use std::io::Write;

use anyhow::{Context, Result, bail};
use susu_core::api::SusuClient;
use susu_core::api::types::OtpPurpose;
use susu_core::auth::AccessClaims;

pub async fn login_collector(
    client: &SusuClient,
    phone: Option<String>,
    pin: Option<String>,
) -> Result<()> {
    let phone = match phone {
        Some(phone) => phone,
        None => prompt("Phone")?,
    };
    let pin = match pin {
        Some(pin) => pin,
        None => prompt("PIN")?,
    };

    let tokens = client.collector_login(&phone, &pin).await?;
    report_login(&tokens.access_token);
    Ok(())
}

pub async fn login_client(
    client: &SusuClient,
    phone: Option<String>,
    code: Option<String>,
) -> Result<()> {
    let phone = match phone {
        Some(phone) => phone,
        None => prompt("Phone")?,
    };

    let code = match code {
        Some(code) => code,
        None => {
            let sent = client.otp_send(&phone, OtpPurpose::Login).await?;
            println!("{}", sent.message);
            if let Some(debug_code) = sent.debug_code {
                println!("Debug OTP: {debug_code}");
            }
            prompt("OTP code")?
        }
    };

    let tokens = client.client_login(&phone, &code).await?;
    report_login(&tokens.access_token);
    Ok(())
}

pub fn logout(client: &SusuClient) -> Result<()> {
    if client.logout().context("clear stored credentials")? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn whoami(client: &SusuClient) -> Result<()> {
    let Some(token) = client.store().access_token() else {
        bail!("Not logged in. Run 'susu login' first.");
    };
    let Some(claims) = AccessClaims::decode(&token) else {
        bail!("Stored access token is malformed. Run 'susu login' again.");
    };

    println!("Account: {}", claims.sub);
    println!("Role: {}", claims.role.display_name());
    match claims.expires_at() {
        Some(expiry) if claims.is_expired() => {
            println!("Access token expired at {expiry} (will refresh on next request)");
        }
        Some(expiry) => println!("Access token valid until {expiry}"),
        None => println!("Access token has no expiry"),
    }
    Ok(())
}

fn report_login(access_token: &str) {
    match AccessClaims::decode(access_token) {
        Some(claims) => println!(
            "Logged in as {} ({})",
            claims.sub,
            claims.role.display_name()
        ),
        None => println!("Logged in."),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    std::io::stdout().flush().context("flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("read from stdin")?;
    Ok(line.trim().to_string())
}
