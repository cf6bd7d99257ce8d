use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use wallet_sync::client::{LedgerClient, TransactionApi};
use wallet_sync::domain::{
    Category, Direction, SyncError, TransactionId, format_amount, format_date, format_money,
};
use wallet_sync::state::{AppConfig, StoreState, TransactionEntry, TransactionStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// wallet - record income and expenses against your wallet account
#[derive(Parser)]
#[command(version = VERSION, about, long_about = None)]
struct Cli {
    /// Base URL of the transaction API (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// User id to act as (overrides the config file)
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the balance and recent transactions
    List,
    /// Show only the balance, income and expenses
    Summary,
    /// Record a transaction
    Add {
        /// What the money was for
        title: String,
        /// Amount, without sign
        amount: String,
        /// Category id (food, shopping, ...) or any other name
        #[arg(short, long)]
        category: String,
        /// Expense or income
        #[arg(short, long, value_enum, default_value_t = Kind::Expense)]
        kind: Kind,
    },
    /// Delete a transaction
    Delete {
        /// Transaction id as shown by `list`
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the built-in categories
    Categories,
    /// Check that the transaction API is reachable
    Health,
    /// Show the effective configuration, optionally saving the overrides
    Config {
        /// Persist --base-url/--user/--timeout to the config file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Expense,
    Income,
}

impl From<Kind> for Direction {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Expense => Direction::Expense,
            Kind::Income => Direction::Income,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logger(if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    });

    let config = effective_config(&cli);
    debug!("Using API at {}", config.api_base_url);

    let result = run(&cli, config).await;
    if let Err(report) = &result
        && is_retryable(report)
    {
        eprintln!("The wallet API may be temporarily unavailable; try again shortly.");
    }
    result
}

async fn run(cli: &Cli, config: AppConfig) -> Result<()> {
    match &cli.command {
        Commands::Categories => {
            for category in Category::ALL {
                println!("{:<16}{}", category.id(), category.name());
            }
            Ok(())
        }
        Commands::Config { save } => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if *save {
                let path = config.save()?;
                println!("Saved to {}", path.display());
            }
            Ok(())
        }
        Commands::Health => {
            let client = LedgerClient::new(config.http_config())?;
            client
                .check_health()
                .await
                .wrap_err_with(|| format!("{} is not healthy", client.base_url()))?;
            println!("{} is up", client.base_url());
            Ok(())
        }
        command => {
            let user_id = config.user_id.clone().ok_or_else(|| {
                eyre!("No user id configured; pass --user or run `wallet config --user <id> --save`")
            })?;
            let client = LedgerClient::new(config.http_config())?;
            let store = TransactionStore::new(client, user_id);
            run_store_command(&store, command).await
        }
    }
}

async fn run_store_command<A: TransactionApi>(
    store: &TransactionStore<A>,
    command: &Commands,
) -> Result<()> {
    match command {
        Commands::List => {
            store.load().await.wrap_err("Failed to load transactions")?;
            let state = store.snapshot();
            print_summary(&state);
            println!();
            print_transactions(&state);
        }
        Commands::Summary => {
            store.load().await.wrap_err("Failed to load summary")?;
            print_summary(&store.snapshot());
        }
        Commands::Add {
            title,
            amount,
            category,
            kind,
        } => {
            let entry = TransactionEntry::new(title, amount, category, (*kind).into());
            let created = store
                .create(&entry)
                .await
                .wrap_err("Failed to add transaction")?;
            println!(
                "Added #{} {} {}",
                created.id,
                created.title,
                format_amount(created.amount)
            );
            report_reload(&store.snapshot());
        }
        Commands::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete transaction #{id}?"))? {
                println!("Cancelled");
                return Ok(());
            }
            store
                .remove(&TransactionId::from(id.as_str()))
                .await
                .wrap_err("Failed to delete transaction")?;
            println!("Deleted #{id}");
            report_reload(&store.snapshot());
        }
        Commands::Categories | Commands::Health | Commands::Config { .. } => {}
    }
    Ok(())
}

/// Whether any error in the chain is a transient API failure.
fn is_retryable(report: &color_eyre::Report) -> bool {
    report
        .chain()
        .filter_map(|cause| cause.downcast_ref::<SyncError>())
        .any(SyncError::is_retryable)
}

/// Merges command-line overrides into the stored configuration.
fn effective_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::load();
    if let Some(base_url) = &cli.base_url {
        config.api_base_url.clone_from(base_url);
    }
    if let Some(user) = &cli.user {
        config.user_id = Some(user.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    config
}

fn print_summary(state: &StoreState) {
    println!("Balance   {}", format_money(state.summary.balance));
    println!("Income    {}", format_amount(state.summary.income));
    println!("Expenses  {}", format_amount(state.summary.expense));
}

fn print_transactions(state: &StoreState) {
    if state.transactions.is_empty() {
        println!("No transactions yet");
        return;
    }
    for transaction in &state.transactions {
        println!(
            "#{:<6}{:<14}{:<16}{:<28}{:>12}",
            transaction.id,
            format_date(&transaction.created_at),
            transaction.category,
            transaction.title,
            format_amount(transaction.amount)
        );
    }
}

/// The mutation went through; say so if the follow-up reload did not.
fn report_reload(state: &StoreState) {
    match state.error() {
        Some(error) => eprintln!("Could not refresh balance: {error}"),
        None => println!("Balance   {}", format_money(state.summary.balance)),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("wallet_sync={level},wallet={level}")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
