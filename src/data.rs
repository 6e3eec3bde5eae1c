use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub type AccountName = String;

/// Date format used both on disk and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn parse_date(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), DATE_FORMAT)
}

/// Store for a transfer of `value` from `src_acct` to `dst_acct`. Field order matches the CSV
/// record layout (`date,src_acct,dst_acct,value`) since the files have no header row.
///
/// Negative values aren't rejected: nothing says they're invalid, and a negative transfer is
/// just the reverse transfer. Same for self-transfers, which are recorded but net to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    #[serde(with = "date_format")]
    pub date: NaiveDateTime,
    pub src_acct: AccountName,
    pub dst_acct: AccountName,
    pub value: f64,
}

impl Transaction {
    pub fn new(
        src_acct: impl Into<AccountName>,
        dst_acct: impl Into<AccountName>,
        date: NaiveDateTime,
        value: f64,
    ) -> Self {
        Self {
            date,
            src_acct: src_acct.into(),
            dst_acct: dst_acct.into(),
            value,
        }
    }

    pub fn involves(&self, account: &str) -> bool {
        self.src_acct == account || self.dst_acct == account
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "date: {}\tfrom: {}\tto: {}\tamount: {}",
            self.date.format(DATE_FORMAT),
            self.src_acct,
            self.dst_acct,
            self.value
        )
    }
}

/// serde adapter for `DATE_FORMAT`; chrono's default is RFC 3339 which our files don't use.
mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s).map_err(serde::de::Error::custom)
    }
}

/// Which side of an operation referenced the missing account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Source,
    Destination,
    Queried,
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccountRole::Source => "source",
            AccountRole::Destination => "destination",
            AccountRole::Queried => "queried",
        })
    }
}

/// Ledger errors. There's only one way for the core to fail: referencing an account it
/// doesn't know about. The name is kept as data so callers can act on it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Could not find {role} account '{name}'")]
    AccountNotFound { name: AccountName, role: AccountRole },
}

impl Error {
    pub(crate) fn not_found(name: &str, role: AccountRole) -> Self {
        Error::AccountNotFound {
            name: name.to_owned(),
            role,
        }
    }
}
