use crate::core::Transaction;
use std::sync::RwLock;

/// Holding area for transactions not yet sealed into a block.
///
/// Insertion order is preserved: producers only push to the back, and the
/// miner consumes a snapshot of the front. A transaction added mid-mine lands
/// behind the snapshot and simply waits for the next cycle.
pub struct PendingPool {
    inner: RwLock<Vec<Transaction>>,
}

impl Default for PendingPool {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingPool {
    pub fn new() -> PendingPool {
        PendingPool {
            inner: RwLock::new(vec![]),
        }
    }

    pub fn add(&self, tx: Transaction) {
        match self.inner.write() {
            Ok(mut pool) => {
                pool.push(tx);
            }
            Err(_) => {
                log::error!("Failed to acquire write lock on pending pool");
            }
        }
    }

    /// Owned copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<Transaction> {
        match self.inner.read() {
            Ok(pool) => pool.clone(),
            Err(_) => {
                log::error!("Failed to acquire read lock on pending pool");
                Vec::new()
            }
        }
    }

    /// Drop the oldest `count` transactions - exactly the ones a snapshot of
    /// that length captured, since additions never go to the front
    pub fn discard_front(&self, count: usize) {
        match self.inner.write() {
            Ok(mut pool) => {
                let count = count.min(pool.len());
                pool.drain(..count);
            }
            Err(_) => {
                log::error!("Failed to acquire write lock on pending pool");
            }
        }
    }

    pub fn len(&self) -> usize {
        match self.inner.read() {
            Ok(pool) => pool.len(),
            Err(_) => {
                log::error!("Failed to acquire read lock on pending pool");
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.inner.read() {
            Ok(pool) => pool.is_empty(),
            Err(_) => {
                log::error!("Failed to acquire read lock on pending pool");
                true // Conservative default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_preserves_insertion_order() {
        let pool = PendingPool::new();
        pool.add(Transaction::new("Alice", "Bob", 100).unwrap());
        pool.add(Transaction::new("Bob", "Alice", 50).unwrap());
        pool.add(Transaction::new("Alice", "Charlie", 200).unwrap());

        let snapshot = pool.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].get_recipient(), "Bob");
        assert_eq!(snapshot[1].get_recipient(), "Alice");
        assert_eq!(snapshot[2].get_recipient(), "Charlie");
    }

    #[test]
    fn test_discard_front_spares_later_additions() {
        let pool = PendingPool::new();
        pool.add(Transaction::new("Alice", "Bob", 100).unwrap());
        pool.add(Transaction::new("Bob", "Alice", 50).unwrap());

        let snapshot = pool.snapshot();

        // A transaction arriving after the snapshot must survive the discard
        pool.add(Transaction::new("Alice", "Charlie", 200).unwrap());
        pool.discard_front(snapshot.len());

        let remaining = pool.snapshot();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].get_recipient(), "Charlie");
    }

    #[test]
    fn test_discard_front_caps_at_pool_length() {
        let pool = PendingPool::new();
        pool.add(Transaction::new("Alice", "Bob", 100).unwrap());

        pool.discard_front(10);
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
    }
}
