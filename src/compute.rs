use crate::{
    data::{AccountName, AccountRole, Error, Transaction},
    read::TransactionUser,
};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Balances keyed by account name, as produced by a replay.
pub(crate) type Balances = HashMap<AccountName, f64>;

/// The live account registry plus the ordered transaction history. Each `Ledger` owns both,
/// nothing is shared between instances. Single-threaded: if this ever needs several writers,
/// both collections must sit behind the same lock since they're updated together.
#[derive(Debug, Default)]
pub(crate) struct Ledger {
    accounts: Balances,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk load: every account referenced by `transactions` is created with a zero balance
    /// (all sources first, then all destinations) before the transactions are applied in order.
    pub fn from_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        let transactions: Vec<Transaction> = transactions.into_iter().collect();
        let mut ledger = Self::new();
        for tx in &transactions {
            if !ledger.accounts.contains_key(&tx.src_acct) {
                ledger.create_account(&tx.src_acct, 0.0);
            }
        }
        for tx in &transactions {
            if !ledger.accounts.contains_key(&tx.dst_acct) {
                ledger.create_account(&tx.dst_acct, 0.0);
            }
        }
        for tx in transactions {
            ledger.apply(tx);
        }
        ledger
    }

    /// Creates `name` with `balance`. An existing account of that name is reset to `balance`.
    pub fn create_account(&mut self, name: &str, balance: f64) {
        if let Some(previous) = self.accounts.insert(name.to_owned(), balance) {
            warn!(account = name, previous, balance, "account re-created, balance reset");
        } else {
            debug!(account = name, balance, "account created");
        }
    }

    /// Records `tx` and moves its value between the two live balances. Both accounts are
    /// checked before anything is touched, so a failed call leaves the ledger unchanged.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<(), Error> {
        if !self.accounts.contains_key(&tx.src_acct) {
            return Err(Error::not_found(&tx.src_acct, AccountRole::Source));
        }
        if !self.accounts.contains_key(&tx.dst_acct) {
            return Err(Error::not_found(&tx.dst_acct, AccountRole::Destination));
        }
        self.apply(tx);
        Ok(())
    }

    /// Both endpoints must already be registered.
    fn apply(&mut self, tx: Transaction) {
        debug!(%tx, "applying transaction");
        if let Some(src) = self.accounts.get_mut(&tx.src_acct) {
            *src -= tx.value;
        }
        if let Some(dst) = self.accounts.get_mut(&tx.dst_acct) {
            *dst += tx.value;
        }
        self.transactions.push(tx);
    }

    pub fn get_account_balance(&self, name: &str) -> Result<f64, Error> {
        self.accounts
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found(name, AccountRole::Queried))
    }

    /// Balance of `name` obtained by replaying every transaction dated strictly before
    /// `target_date`, starting all accounts at zero. This ignores the live registry entirely,
    /// so it won't match `get_account_balance` for accounts created with a non-zero balance.
    pub fn get_account_balance_at(
        &self,
        name: &str,
        target_date: NaiveDateTime,
    ) -> Result<f64, Error> {
        self.balances_at(target_date)
            .get(name)
            .copied()
            .ok_or_else(|| Error::not_found(name, AccountRole::Queried))
    }

    /// Replayed balances of every account seen before `target_date`.
    pub fn balances_at(&self, target_date: NaiveDateTime) -> Balances {
        self.history_before(target_date)
            .fold(Balances::new(), replay)
    }

    /// Every transaction touching `account`, in submission order.
    pub fn get_transactions(&self, account: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| tx.involves(account))
            .collect()
    }

    /// Like `get_transactions`, restricted to transactions dated strictly before `target_date`.
    ///
    /// An account with no such transaction is reported as not found, the same way
    /// `get_account_balance_at` does.
    pub fn get_transactions_to_date(
        &self,
        account: &str,
        target_date: NaiveDateTime,
    ) -> Result<Vec<&Transaction>, Error> {
        let txs: Vec<&Transaction> = self
            .history_before(target_date)
            .filter(|tx| tx.involves(account))
            .collect();
        if txs.is_empty() {
            return Err(Error::not_found(account, AccountRole::Queried));
        }
        Ok(txs)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn balances(&self) -> impl Iterator<Item = (&str, f64)> {
        self.accounts
            .iter()
            .map(|(name, balance)| (name.as_str(), *balance))
    }

    fn history_before(&self, target_date: NaiveDateTime) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| tx.date < target_date)
    }
}

/// One replay step: debit the source, credit the destination, creating either at zero.
pub(crate) fn replay(mut balances: Balances, tx: &Transaction) -> Balances {
    *balances.entry(tx.src_acct.clone()).or_insert(0.0) -= tx.value;
    *balances.entry(tx.dst_acct.clone()).or_insert(0.0) += tx.value;
    balances
}

impl TransactionUser for Ledger {
    fn use_tx(&mut self, tx: Transaction) -> Result<(), Error> {
        self.add_transaction(tx)
    }
}
