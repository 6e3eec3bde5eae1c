use crate::compute::Ledger;
use serde::Serialize;

/// One `account,balance` output row.
#[derive(Serialize)]
struct BalanceRecord<'a> {
    account: &'a str,
    balance: f64,
}

/// CSV exporter for the transaction history, in the format `read_transactions` accepts.
pub(crate) fn write_transactions<W: std::io::Write>(
    writer: W,
    ledger: &Ledger,
) -> Result<(), anyhow::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for tx in ledger.transactions() {
        wtr.serialize(tx)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Basic CSV exporter for balances, sorted by account name
pub(crate) fn write_balances<'a, W, I>(writer: W, balances: I) -> Result<(), anyhow::Error>
where
    W: std::io::Write,
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut rows: Vec<BalanceRecord> = balances
        .into_iter()
        .map(|(account, balance)| BalanceRecord { account, balance })
        .collect();
    rows.sort_by(|a, b| a.account.cmp(b.account));
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
