//! # Dispatch Terminal Entry Point
//!
//! All logic lives in the library crate so it can be tested.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dispatch_cli::run().await
}
