// This file implements the transaction record - the payload the ledger exists to order
// A transaction is immutable once created and is owned by the pending pool
// until it is consumed into a block

use crate::error::{LedgerError, Result};
use crate::utils::current_timestamp;
use serde::{Deserialize, Serialize};

// This represents an intended ledger entry - who pays whom how much
// The ledger never checks signatures or balances; it only orders and seals entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct Transaction {
    sender: String,    // Who the entry is from
    recipient: String, // Who the entry is to
    amount: u64,       // How much moves (opaque units)
    timestamp: i64,    // When the entry was created (milliseconds)
}

impl Transaction {
    // When I create a new transaction, I stamp it with the current time
    pub fn new(sender: &str, recipient: &str, amount: u64) -> Result<Transaction> {
        Ok(Transaction {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            amount,
            timestamp: current_timestamp()?,
        })
    }

    pub fn get_sender(&self) -> &str {
        self.sender.as_str()
    }

    pub fn get_recipient(&self) -> &str {
        self.recipient.as_str()
    }

    pub fn get_amount(&self) -> u64 {
        self.amount
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    /// JSON rendering used for log lines and text export
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{deserialize, serialize};

    #[test]
    fn test_transaction_round_trip() {
        let tx = Transaction::new("Alice", "Bob", 100).unwrap();

        let bytes = serialize(&tx).unwrap();
        let decoded: Transaction = deserialize(&bytes).unwrap();
        assert_eq!(tx, decoded);
    }

    #[test]
    fn test_transaction_json_round_trip() {
        let tx = Transaction::new("Bob", "Alice", 50).unwrap();

        let json = tx.to_json().unwrap();
        let decoded: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, decoded);
    }

    #[test]
    fn test_transaction_accessors() {
        let tx = Transaction::new("Alice", "Charlie", 200).unwrap();

        assert_eq!(tx.get_sender(), "Alice");
        assert_eq!(tx.get_recipient(), "Charlie");
        assert_eq!(tx.get_amount(), 200);
        assert!(tx.get_timestamp() > 0);
    }
}
