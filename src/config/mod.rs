//! Configuration management
//!
//! This module handles basic configuration settings for the ledger node,
//! including the node name, mining difficulty and announce target.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
