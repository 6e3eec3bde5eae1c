use chrono::NaiveDateTime;
use clap::Parser;
use compute::Ledger;
use data::{parse_date, Transaction};
use read::read_transactions;
use std::{io::Write, path::PathBuf};
use tracing_subscriber::EnvFilter;
use write::{write_balances, write_transactions};

mod compute;
mod data;
mod read;
mod write;

/// Replays a CSV transaction log and prints account balances
#[derive(Parser)]
#[command(name = "ledger", version, about)]
struct Cli {
    /// Transaction file (`date,src_acct,dst_acct,value` per line)
    #[arg(value_name = "TRANSACTIONS", env = "LEDGER_TRANSACTIONS")]
    transactions: PathBuf,

    /// Report these accounts and their transactions instead of all balances
    #[arg(short, long, value_name = "NAME")]
    account: Vec<String>,

    /// Only count transactions strictly before this date ("YYYY-MM-DD HH:MM")
    #[arg(long, value_name = "DATE", env = "LEDGER_AT", value_parser = parse_date)]
    at: Option<NaiveDateTime>,

    /// Write the loaded transaction history back out to this file
    #[arg(short, long, value_name = "PATH", env = "LEDGER_SAVE")]
    save: Option<PathBuf>,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut transactions: Vec<Transaction> = Vec::new();
    read_transactions(std::fs::File::open(&cli.transactions)?, &mut transactions)?;
    let ledger = Ledger::from_transactions(transactions);
    tracing::info!(
        transactions = ledger.transactions().len(),
        "loaded {}",
        cli.transactions.display()
    );

    let stdout = std::io::stdout();
    if cli.account.is_empty() {
        match cli.at {
            Some(date) => {
                let balances = ledger.balances_at(date);
                write_balances(stdout.lock(), balances.iter().map(|(n, b)| (n.as_str(), *b)))?;
            }
            None => write_balances(stdout.lock(), ledger.balances())?,
        }
    } else {
        let mut out = stdout.lock();
        for name in &cli.account {
            report(&mut out, &ledger, name, cli.at)?;
        }
    }

    if let Some(path) = &cli.save {
        write_transactions(std::fs::File::create(path)?, &ledger)?;
        tracing::info!("history saved to {}", path.display());
    }
    Ok(())
}

/// Prints one account's balance followed by its transactions.
fn report<W: Write>(
    out: &mut W,
    ledger: &Ledger,
    name: &str,
    at: Option<NaiveDateTime>,
) -> Result<(), anyhow::Error> {
    let (balance, transactions) = match at {
        Some(date) => (
            ledger.get_account_balance_at(name, date)?,
            ledger.get_transactions_to_date(name, date)?,
        ),
        None => (ledger.get_account_balance(name)?, ledger.get_transactions(name)),
    };
    writeln!(out, "{name}: {balance}")?;
    for tx in transactions {
        writeln!(out, "\t{tx}")?;
    }
    Ok(())
}
