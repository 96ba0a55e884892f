//! # EcoCart Entry Point
//!
//! ```text
//! $ ecocart search --query shirt --tier low
//! $ ecocart compare 1
//! $ ecocart add 1 --alternative 2
//! $ ecocart cart
//! ```
//!
//! The actual setup is in lib.rs for testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    ecocart_cli::run().await
}
