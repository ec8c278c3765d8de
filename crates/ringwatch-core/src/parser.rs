//! CSV decoding and validation of transaction uploads.
//!
//! The input contract is deliberately forgiving at the row level and strict
//! at the file level: a malformed row is skipped silently, but a file that
//! is not UTF-8, has no usable header, or yields zero valid rows is a fatal
//! [`ParseError`].

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::error::ParseError;
use crate::types::Transaction;

/// Column names the header must carry, after trimming and lowercasing.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "transaction_id",
    "sender_id",
    "receiver_id",
    "amount",
    "timestamp",
];

/// The only accepted timestamp format.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse raw CSV bytes into validated transactions, preserving row order.
///
/// Row-skip rules (silent): empty required field, duplicate of an already
/// *accepted* `transaction_id`, self-loop (`sender == receiver`),
/// non-positive or unparseable amount, timestamp not matching
/// `YYYY-MM-DD HH:MM:SS`, or any other row-level CSV error.
pub fn parse_transactions(content: &[u8]) -> Result<Vec<Transaction>, ParseError> {
    let text = std::str::from_utf8(content).map_err(|_| ParseError::InvalidUtf8)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| ParseError::MissingHeader)?
        .clone();
    if headers.iter().all(|name| name.trim().is_empty()) {
        return Err(ParseError::MissingHeader);
    }

    // Header names are matched case-insensitively and whitespace-trimmed;
    // the first occurrence of a duplicated name wins.
    let mut columns: HashMap<String, usize> = HashMap::new();
    for (index, name) in headers.iter().enumerate() {
        columns
            .entry(name.trim().to_lowercase())
            .or_insert(index);
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.contains_key(**required))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ParseError::MissingColumns(missing.join(", ")));
    }

    let field_index = |name: &str| columns[name];
    let id_col = field_index("transaction_id");
    let sender_col = field_index("sender_id");
    let receiver_col = field_index("receiver_id");
    let amount_col = field_index("amount");
    let timestamp_col = field_index("timestamp");

    let mut accepted_ids: HashSet<String> = HashSet::new();
    let mut transactions: Vec<Transaction> = Vec::new();

    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };

        let Some(fields) = RowFields::extract(
            &record,
            id_col,
            sender_col,
            receiver_col,
            amount_col,
            timestamp_col,
        ) else {
            continue;
        };

        // Only ids of accepted rows count as duplicates; a row rejected
        // further down does not claim its id.
        if accepted_ids.contains(fields.transaction_id) {
            continue;
        }
        if fields.sender_id == fields.receiver_id {
            continue;
        }
        let Ok(amount) = fields.amount.parse::<f64>() else {
            continue;
        };
        if !(amount > 0.0) {
            continue;
        }
        let Ok(naive) = NaiveDateTime::parse_from_str(fields.timestamp, TIMESTAMP_FORMAT)
        else {
            continue;
        };

        accepted_ids.insert(fields.transaction_id.to_string());
        transactions.push(Transaction {
            transaction_id: fields.transaction_id.to_string(),
            sender_id: fields.sender_id.to_string(),
            receiver_id: fields.receiver_id.to_string(),
            amount,
            timestamp: naive.and_utc(),
        });
    }

    if transactions.is_empty() {
        return Err(ParseError::NoValidTransactions);
    }

    Ok(transactions)
}

/// The five required fields of one row, trimmed and verified non-empty.
struct RowFields<'a> {
    transaction_id: &'a str,
    sender_id: &'a str,
    receiver_id: &'a str,
    amount: &'a str,
    timestamp: &'a str,
}

impl<'a> RowFields<'a> {
    fn extract(
        record: &'a csv::StringRecord,
        id_col: usize,
        sender_col: usize,
        receiver_col: usize,
        amount_col: usize,
        timestamp_col: usize,
    ) -> Option<Self> {
        let field = |index: usize| {
            let value = record.get(index)?.trim();
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        };
        Some(Self {
            transaction_id: field(id_col)?,
            sender_id: field(sender_col)?,
            receiver_id: field(receiver_col)?,
            amount: field(amount_col)?,
            timestamp: field(timestamp_col)?,
        })
    }
}
