//! Ledger integration tests
//!
//! Exercises the whole mine -> verify -> append -> announce path end to end,
//! including the tampering cases the chain validator exists to catch.

use anvil_chain::{
    AnnounceRecord, Block, ChainFlaw, ChainValidator, ChainVerdict, FileAnnounce, Ledger,
    LedgerError, MineOutcome, MiningDelay, ProofOfWork, Transaction, GENESIS_PREVIOUS_HASH,
};
use std::fs;
use tempfile::tempdir;

fn leading_zeros(hash: &str) -> usize {
    hash.chars().take_while(|c| *c == '0').count()
}

#[test]
fn test_full_scenario_at_difficulty_two() {
    // The canonical walkthrough: genesis at difficulty 2, one transaction,
    // one mined block, then a nonce flip breaks validation at block 1
    let difficulty = 2;
    let ledger = Ledger::new("Peer0", difficulty).unwrap();

    let genesis = ledger.latest_block();
    assert_eq!(genesis.get_index(), 0);
    assert_eq!(genesis.get_previous_hash(), GENESIS_PREVIOUS_HASH);
    assert!(genesis.get_transactions().is_empty());
    assert!(genesis.get_hash().starts_with("00"));

    ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());
    let outcome = ledger.mine().unwrap();
    let sealed = outcome.mined_block().unwrap();

    assert_eq!(sealed.get_index(), 1);
    assert_eq!(sealed.get_previous_hash(), genesis.get_hash());
    assert!(leading_zeros(sealed.get_hash()) >= difficulty as usize);
    assert_eq!(ledger.pending_count(), 0);

    let snapshot = ledger.get_chain();
    assert_eq!(snapshot.get_length(), 2);

    let validator = ChainValidator::new(difficulty);
    assert!(validator.check_chain_validity(snapshot.get_chain()));

    // Flip block 1's nonce, keep its stored hash: recomputation diverges
    let mut chain = snapshot.into_chain();
    let victim = chain[1].get_block().clone();
    let stored_hash = chain[1].get_hash().to_string();
    chain[1] = victim.clone().with_nonce(victim.get_nonce() + 1).seal(stored_hash);

    assert_eq!(
        validator.validate_chain(&chain),
        ChainVerdict::Invalid {
            index: 1,
            flaw: ChainFlaw::InvalidProof,
        }
    );
}

#[test]
fn test_mined_hashes_meet_every_difficulty() {
    for difficulty in 0..=2 {
        let ledger = Ledger::new("Peer0", difficulty).unwrap();
        ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());

        let outcome = ledger.mine().unwrap();
        let sealed = outcome.mined_block().unwrap();

        assert!(leading_zeros(ledger.latest_block().get_hash()) >= difficulty as usize);
        assert!(leading_zeros(sealed.get_hash()) >= difficulty as usize);
    }
}

#[test]
fn test_announce_reaches_the_marker_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("the_longest_chain.bin");

    let announcer = Box::new(FileAnnounce::new(path.clone()));
    let ledger = Ledger::with_announcer("Peer0", 1, announcer).unwrap();

    ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());
    let outcome = ledger.mine().unwrap();
    let sealed = outcome.mined_block().unwrap();

    let record = AnnounceRecord::deserialize(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(record.get_miner(), "Peer0");
    assert_eq!(record.get_block(), sealed);
}

#[test]
fn test_announce_failure_does_not_unwind_the_append() {
    let dir = tempdir().unwrap();
    // Parent directory does not exist, so every announce fails
    let path = dir.path().join("missing").join("marker.bin");

    let announcer = Box::new(FileAnnounce::new(path));
    let ledger = Ledger::with_announcer("Peer0", 1, announcer).unwrap();

    ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());
    let outcome = ledger.mine().unwrap();

    assert!(outcome.mined_block().is_some());
    assert_eq!(ledger.get_chain().get_length(), 2);
    assert_eq!(ledger.pending_count(), 0);
}

#[test]
fn test_pool_is_consumed_as_one_atomic_unit() {
    let ledger = Ledger::new("Peer0", 1).unwrap();
    ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());
    ledger.add_transaction(Transaction::new("Bob", "Alice", 50).unwrap());
    ledger.add_transaction(Transaction::new("Alice", "Charlie", 200).unwrap());

    let outcome = ledger.mine().unwrap();
    let sealed = outcome.mined_block().unwrap();

    let txs = sealed.get_transactions();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0].get_recipient(), "Bob");
    assert_eq!(txs[1].get_recipient(), "Alice");
    assert_eq!(txs[2].get_recipient(), "Charlie");
    assert_eq!(ledger.pending_count(), 0);
}

#[test]
fn test_rejected_appends_leave_the_ledger_alone() {
    let ledger = Ledger::new("Peer0", 1).unwrap();
    ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());

    // Wrong linkage: honestly mined over a parent this chain never had
    let orphan = Block::new(
        1,
        vec![Transaction::new("Mallory", "Mallory", 1).unwrap()],
        "Peer1",
        1,
        "ab".repeat(32),
        0,
    );
    let (orphan_mined, orphan_proof) = ProofOfWork::new(orphan, 1).run().unwrap();
    let err = ledger.append_block(orphan_mined, orphan_proof).unwrap_err();
    assert!(matches!(err, LedgerError::Integrity { .. }));

    // Right linkage, forged proof
    let tip = ledger.latest_block();
    let forged = Block::new(1, vec![], "Peer1", 1, tip.get_hash().to_string(), 0);
    let err = ledger.append_block(forged, "0".repeat(64)).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidProof(_)));

    // Chain untouched, transactions still pending
    assert_eq!(ledger.get_chain().get_length(), 1);
    assert_eq!(ledger.pending_count(), 1);
}

#[test]
fn test_validator_pinpoints_a_rewritten_transaction() {
    let ledger = Ledger::new("Peer0", 1).unwrap();
    for _ in 0..2 {
        ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());
        ledger.mine().unwrap();
    }

    let mut chain = ledger.get_chain().into_chain();
    let original = chain[2].get_block();
    let rewritten = Block::new(
        original.get_index(),
        vec![Transaction::new("Mallory", "Mallory", 1_000_000).unwrap()],
        original.get_author(),
        original.get_timestamp(),
        original.get_previous_hash().to_string(),
        original.get_nonce(),
    );
    chain[2] = rewritten.seal(chain[2].get_hash().to_string());

    let verdict = ChainValidator::new(1).validate_chain(&chain);
    assert_eq!(
        verdict,
        ChainVerdict::Invalid {
            index: 2,
            flaw: ChainFlaw::InvalidProof,
        }
    );
}

#[test]
fn test_difficulty_bomb_changes_nothing_but_time() {
    let ledger = Ledger::new("Peer0", 1).unwrap();
    ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());
    let baseline = ledger.mine().unwrap();
    let baseline_block = baseline.mined_block().unwrap();

    // Re-run the exact search the ledger just did, with a delay injected
    let replay = Block::new(
        baseline_block.get_index(),
        baseline_block.get_transactions().to_vec(),
        baseline_block.get_author(),
        baseline_block.get_timestamp(),
        baseline_block.get_previous_hash().to_string(),
        0,
    );
    let (delayed, delayed_hash) = ProofOfWork::new(replay, 1)
        .with_delay(MiningDelay::Fixed { millis: 1 })
        .run()
        .unwrap();

    assert_eq!(delayed.get_nonce(), baseline_block.get_nonce());
    assert_eq!(delayed_hash, baseline_block.get_hash());
}

#[test]
fn test_multi_round_scenario_stays_valid() {
    let ledger = Ledger::new("Peer0", 1).unwrap();

    for round in 0..3 {
        ledger.add_transaction(Transaction::new("Alice", "Bob", 100).unwrap());
        ledger.add_transaction(Transaction::new("Bob", "Alice", 50).unwrap());
        ledger.add_transaction(Transaction::new("Alice", "Charlie", 200).unwrap());

        let outcome = ledger.mine().unwrap();
        assert_eq!(
            outcome.mined_block().unwrap().get_index(),
            (round + 1) as u64
        );
    }

    // A second mine with nothing pending reports the no-op
    assert_eq!(ledger.mine().unwrap(), MineOutcome::NothingToMine);

    let snapshot = ledger.get_chain();
    assert_eq!(snapshot.get_length(), 4);
    assert!(ChainValidator::new(1).check_chain_validity(snapshot.get_chain()));
}
