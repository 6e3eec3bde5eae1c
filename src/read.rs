use crate::data::{Error, Transaction};
use tracing::warn;

/// Trait for doing something with a `Transaction` read from a CSV file
/// (or received from elsewhere). The CLI collects into a `Vec` to bulk-load a `Ledger`;
/// a `Ledger` with a fixed set of accounts can also consume records directly.
pub(crate) trait TransactionUser {
    fn use_tx(&mut self, tx: Transaction) -> Result<(), Error>;
}

impl TransactionUser for Vec<Transaction> {
    fn use_tx(&mut self, tx: Transaction) -> Result<(), Error> {
        self.push(tx);
        Ok(())
    }
}

/// CSV importer for `Transaction`s: `date,src_acct,dst_acct,value` records, no header.
/// Malformed records abort the import; records the user rejects are logged and skipped.
pub(crate) fn read_transactions<R: std::io::Read, U: TransactionUser>(
    reader: R,
    user: &mut U,
) -> Result<(), anyhow::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    for (line, result) in rdr.deserialize().enumerate() {
        let tx: Transaction = result?;
        if let Err(e) = user.use_tx(tx) {
            warn!(record = line + 1, "transaction rejected: {e}");
        }
    }
    Ok(())
}
