use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "anvil-chain")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "run",
        about = "Run the demo ledger: submit transactions, mine, validate"
    )]
    Run {
        #[arg(long, default_value_t = 3, help = "Number of mining rounds")]
        rounds: u32,
        #[arg(long, help = "Difficulty in leading zero hex characters")]
        difficulty: Option<u32>,
        #[arg(long, help = "Enable the difficulty bomb (random per-attempt delay)")]
        bomb: bool,
        #[arg(long = "announce-path", help = "Where to write the announce marker file")]
        announce_path: Option<String>,
    },
    #[command(
        name = "tamper",
        about = "Mine a chain, corrupt one block, show the validator's verdict"
    )]
    Tamper {
        #[arg(long, default_value_t = 2, help = "Number of mining rounds")]
        rounds: u32,
        #[arg(long, help = "Difficulty in leading zero hex characters")]
        difficulty: Option<u32>,
    },
}
