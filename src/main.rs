// This is the main entry point for the demo ledger CLI
use anvil_chain::{
    ChainSnapshot, ChainValidator, Command, FileAnnounce, Ledger, MineOutcome, MiningDelay, Opt,
    Transaction, GLOBAL_CONFIG,
};
use clap::Parser;
use log::{error, LevelFilter};
use std::process;

fn main() {
    // Info level shows the ledger's narration without drowning the output
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // The classic scenario: submit a few transactions per round, mine,
        // then print the chain and let the validator replay it
        Command::Run {
            rounds,
            difficulty,
            bomb,
            announce_path,
        } => {
            if let Some(d) = difficulty {
                GLOBAL_CONFIG.set_difficulty(d);
            }
            if bomb {
                GLOBAL_CONFIG.set_difficulty_bomb(true);
            }
            if let Some(path) = announce_path {
                GLOBAL_CONFIG.set_announce_path(path);
            }

            let node_name = GLOBAL_CONFIG.get_node_name();
            let difficulty = GLOBAL_CONFIG.get_difficulty();
            let announcer = Box::new(FileAnnounce::new(GLOBAL_CONFIG.get_announce_path()));

            let mut ledger = Ledger::with_announcer(&node_name, difficulty, announcer)?;
            if GLOBAL_CONFIG.has_difficulty_bomb() {
                ledger.set_mining_delay(MiningDelay::difficulty_bomb());
            }

            for round in 0..rounds {
                ledger.add_transaction(Transaction::new("Alice", "Bob", 100)?);
                ledger.add_transaction(Transaction::new("Bob", "Alice", 50)?);
                ledger.add_transaction(Transaction::new("Alice", "Charlie", 200)?);

                match ledger.mine()? {
                    MineOutcome::Mined(block) => {
                        println!(
                            "Round {}: mined block {} with hash {}",
                            round + 1,
                            block.get_index(),
                            block.get_hash()
                        )
                    }
                    MineOutcome::NothingToMine => {
                        println!("Round {}: nothing to mine", round + 1)
                    }
                }
            }

            let snapshot = ledger.get_chain();
            print_chain(&snapshot);

            let validator = ChainValidator::new(difficulty);
            println!("{}", validator.validate_chain(snapshot.get_chain()));
        }
        // Mine an honest chain, then flip one nonce to show the validator
        // naming the offending block and the check that broke
        Command::Tamper { rounds, difficulty } => {
            if let Some(d) = difficulty {
                GLOBAL_CONFIG.set_difficulty(d);
            }
            let node_name = GLOBAL_CONFIG.get_node_name();
            let difficulty = GLOBAL_CONFIG.get_difficulty();

            let ledger = Ledger::new(&node_name, difficulty)?;
            for _ in 0..rounds.max(1) {
                ledger.add_transaction(Transaction::new("Alice", "Bob", 100)?);
                ledger.mine()?;
            }

            let mut chain = ledger.get_chain().into_chain();
            let validator = ChainValidator::new(difficulty);
            println!("Before tampering: {}", validator.validate_chain(&chain));

            let victim = chain[1].get_block().clone();
            let stored_hash = chain[1].get_hash().to_string();
            println!("Flipping the nonce of block 1 ({stored_hash})");
            chain[1] = victim.clone().with_nonce(victim.get_nonce() + 1).seal(stored_hash);

            println!("After tampering:  {}", validator.validate_chain(&chain));
        }
    }
    Ok(())
}

fn print_chain(snapshot: &ChainSnapshot) {
    println!("Chain length: {}", snapshot.get_length());
    for block in snapshot.get_chain() {
        println!("Block index: {}", block.get_index());
        println!("Pre block hash: {}", block.get_previous_hash());
        println!("Cur block hash: {}", block.get_hash());
        println!("Author: {}", block.get_author());
        println!("Nonce: {}", block.get_nonce());
        println!("Timestamp: {}", block.get_timestamp());
        for tx in block.get_transactions() {
            println!(
                "- Transaction: {} -> {}, amount = {}",
                tx.get_sender(),
                tx.get_recipient(),
                tx.get_amount()
            );
        }
        println!();
    }
}
