//! Portfolio Site - binary entry point
//! Delegates to the library for all app logic.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    portfolio_site::run().await
}
