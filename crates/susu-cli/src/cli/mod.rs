//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use susu_core::api::SusuClient;
use susu_core::auth::{AuthGateway, TokenStore};
use susu_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "susu")]
#[command(version)]
#[command(about = "Terminal client for SusuPay susu groups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in as a collector or a client
    Login {
        #[command(subcommand)]
        command: LoginCommands,
    },
    /// Log out (clear the stored credential pair)
    Logout,
    /// Show the authenticated identity from the access token
    Whoami,
    /// Show the collector dashboard
    Dashboard,
    /// Manage group clients (collector)
    Clients {
        #[command(subcommand)]
        command: ClientCommands,
    },
    /// Show my balance (client)
    Balance,
    /// List fellow group members (client)
    Group,
    /// Browse and act on payment submissions
    Transactions {
        #[command(subcommand)]
        command: TransactionCommands,
    },
    /// Browse and act on payouts
    Payouts {
        #[command(subcommand)]
        command: PayoutCommands,
    },
    /// Monthly reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Check API liveness
    Health,
}

#[derive(clap::Subcommand)]
enum LoginCommands {
    /// Log in with phone and PIN
    Collector {
        /// Phone number in local format
        #[arg(long)]
        phone: Option<String>,
        /// Account PIN (prompted if omitted)
        #[arg(long)]
        pin: Option<String>,
    },
    /// Log in with phone and OTP code
    Client {
        /// Phone number in local format
        #[arg(long)]
        phone: Option<String>,
        /// OTP code (requested and prompted if omitted)
        #[arg(long)]
        code: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum ClientCommands {
    /// List clients in the group
    List {
        #[arg(long, default_value_t = 0)]
        skip: u64,
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// Show one client
    Show {
        /// Client ID
        #[arg(value_name = "CLIENT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum TransactionCommands {
    /// Show the most recent pending submissions
    Feed {
        #[arg(long, default_value_t = 5)]
        limit: u64,
    },
    /// List transactions, optionally filtered by status
    List {
        /// pending | confirmed | queried | rejected | auto-rejected
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 0)]
        skip: u64,
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// My own submission history (client)
    Mine {
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 0)]
        skip: u64,
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// Confirm a pending transaction
    Confirm {
        #[arg(value_name = "TRANSACTION_ID")]
        id: String,
    },
    /// Query a transaction back to the client
    Query {
        #[arg(value_name = "TRANSACTION_ID")]
        id: String,
        /// Note shown to the client
        #[arg(long)]
        note: String,
    },
    /// Reject a transaction
    Reject {
        #[arg(value_name = "TRANSACTION_ID")]
        id: String,
        /// Note shown to the client
        #[arg(long)]
        note: String,
    },
    /// Submit a payment SMS on behalf of a client
    SubmitSms {
        /// Client the payment belongs to
        #[arg(long)]
        client_id: String,
        /// Raw SMS text
        #[arg(long)]
        sms: String,
    },
}

#[derive(clap::Subcommand)]
enum PayoutCommands {
    /// List payouts across the group (collector)
    List {
        #[arg(long, default_value_t = 0)]
        skip: u64,
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// List my payouts (client)
    Mine {
        #[arg(long, default_value_t = 0)]
        skip: u64,
        #[arg(long, default_value_t = 20)]
        limit: u64,
    },
    /// Request a payout (client)
    Request {
        #[arg(long)]
        amount: f64,
        /// Request an emergency payout instead of a scheduled one
        #[arg(long)]
        emergency: bool,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Approve a requested payout
    Approve {
        #[arg(value_name = "PAYOUT_ID")]
        id: String,
    },
    /// Decline a requested payout
    Decline {
        #[arg(value_name = "PAYOUT_ID")]
        id: String,
        #[arg(long)]
        reason: String,
    },
    /// Mark an approved payout as completed
    Complete {
        #[arg(value_name = "PAYOUT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ReportCommands {
    /// Monthly summary for the group
    Summary {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Write the PDF rendition to this path instead of printing
        #[arg(long, value_name = "FILE")]
        pdf: Option<String>,
    },
    /// Monthly statement for one client
    Statement {
        #[arg(value_name = "CLIENT_ID")]
        client_id: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the API client with the session-end hook the gateway reports
/// irrecoverable auth failures through.
fn build_client(config: &Config) -> Result<SusuClient> {
    let store = Arc::new(TokenStore::open_default()?);
    let gateway = AuthGateway::new(config.api_base_url.clone(), store)
        .with_refresh_timeout(config.refresh_timeout())
        .with_session_end_hook(|reason| {
            eprintln!("Session ended ({reason}). Run 'susu login' to re-authenticate.");
        });
    Ok(SusuClient::new(gateway))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Commands::Login { command } => {
            let client = build_client(&config)?;
            match command {
                LoginCommands::Collector { phone, pin } => {
                    commands::auth::login_collector(&client, phone, pin).await
                }
                LoginCommands::Client { phone, code } => {
                    commands::auth::login_client(&client, phone, code).await
                }
            }
        }
        Commands::Logout => commands::auth::logout(&build_client(&config)?),
        Commands::Whoami => commands::auth::whoami(&build_client(&config)?),
        Commands::Dashboard => commands::collector::dashboard(&build_client(&config)?).await,
        Commands::Clients { command } => {
            let client = build_client(&config)?;
            match command {
                ClientCommands::List { skip, limit } => {
                    commands::collector::clients(&client, skip, limit).await
                }
                ClientCommands::Show { id } => commands::collector::client(&client, &id).await,
            }
        }
        Commands::Balance => commands::member::balance(&build_client(&config)?).await,
        Commands::Group => commands::member::group(&build_client(&config)?).await,
        Commands::Transactions { command } => {
            commands::transactions::dispatch(&build_client(&config)?, command).await
        }
        Commands::Payouts { command } => {
            commands::payouts::dispatch(&build_client(&config)?, command).await
        }
        Commands::Report { command } => {
            let client = build_client(&config)?;
            match command {
                ReportCommands::Summary { year, month, pdf } => {
                    commands::reports::summary(&client, year, month, pdf.as_deref()).await
                }
                ReportCommands::Statement {
                    client_id,
                    year,
                    month,
                } => commands::reports::statement(&client, &client_id, year, month).await,
            }
        }
        Commands::Health => commands::health(&build_client(&config)?).await,
    }
}
