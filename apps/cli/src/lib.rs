//! # Dispatch Terminal Library
//!
//! Everything behind the `dispatch` binary: argument parsing, configuration,
//! state containers and one command module per subcommand.
//!
//! ## Module Organization
//! ```text
//! dispatch_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions, `--item SKU=QTY`
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── checkout.rs ◄─── Submission in-progress flag
//! │   └── config.rs   ◄─── AppConfig (defaults, file, env)
//! ├── commands/
//! │   ├── product.rs  ◄─── Catalog listing
//! │   ├── cart.rs     ◄─── Staging and quotes
//! │   ├── checkout.rs ◄─── Order → invoice → history → PDF
//! │   ├── invoice.rs  ◄─── PDF download and re-download
//! │   └── history.rs  ◄─── Sales history view
//! └── error.rs        ◄─── CheckoutError, CliError
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use clap::Parser;
use dispatch_invoice::HttpInvoiceClient;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::checkout::CheckoutRequest;
use commands::{cart, checkout, history, invoice, product};
use error::{CliError, CliResult};
use state::{AppConfig, CartState, CheckoutState, DbState};

/// Runs one `dispatch` invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Logging: tracing-subscriber to stderr, RUST_LOG overrides           │
/// │  2. Arguments: clap                                                     │
/// │  3. Configuration: defaults → dispatch.toml / --config → DISPATCH_*     │
/// │  4. Command: opens the database and/or the invoice client as needed     │
/// │  5. Output on stdout; "Error: .." on stderr with a failure exit code    │
/// │     (the error itself is only logged at debug level)                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            debug!(error = ?err, "Configuration rejected");
            eprintln!("{}", CliError::from(err).user_message(dispatch_invoice::DEFAULT_BASE_URL));
            return ExitCode::FAILURE;
        }
    };

    match execute(cli.command, &config).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!(error = ?err, "Command failed");
            eprintln!("{}", err.user_message(&config.invoice_api_url));
            ExitCode::FAILURE
        }
    }
}

/// Executes a parsed subcommand and returns what it prints.
pub async fn execute(command: Command, config: &AppConfig) -> CliResult<String> {
    match command {
        Command::Products(args) => {
            let db = open_database(config).await?;
            product::list_products(db.inner(), config, args.query.as_deref(), args.limit).await
        }

        Command::Quote(args) => {
            let db = open_database(config).await?;
            let cart_state = CartState::new();
            cart::stage_items(db.inner(), &cart_state, &args.items).await?;

            let state_code = args
                .state_code
                .filter(|code| !code.trim().is_empty())
                .unwrap_or_else(|| config.default_state_code.clone());
            Ok(cart::render_quote(&cart_state, config, state_code.trim()))
        }

        Command::Bill(args) => {
            let db = open_database(config).await?;
            let api = HttpInvoiceClient::new(&config.invoice_api_url)?;

            let cart_state = CartState::new();
            cart::stage_items(db.inner(), &cart_state, &args.items).await?;

            let state_code = match args.customer.state_code.trim() {
                "" => config.default_state_code.clone(),
                code => code.to_string(),
            };
            let quote = cart::render_quote(&cart_state, config, &state_code);

            let request = CheckoutRequest {
                customer: args.customer.into(),
                email_invoice: args.email_invoice,
                output_dir: args.output_dir,
            };
            let receipt = checkout::submit_order(
                &api,
                db.inner(),
                &cart_state,
                &CheckoutState::new(),
                config,
                request,
            )
            .await?;

            Ok(format!("{quote}\n{}", checkout::render_receipt(&receipt, config)))
        }

        Command::Invoice(args) => {
            let api = HttpInvoiceClient::new(&config.invoice_api_url)?;
            invoice::redownload_invoice(&api, config, args.order_id, args.output_dir.as_deref())
                .await
        }

        Command::History(args) => {
            let db = open_database(config).await?;
            history::show_history(db.inner(), config, args.limit, args.order_id).await
        }
    }
}

async fn open_database(config: &AppConfig) -> CliResult<DbState> {
    let db = DbState::open(&config.database_path).await?;
    if db.inner().products().count().await? == 0 {
        info!("Catalog is empty; load products with the `seed` tool");
    }
    Ok(db)
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - Default: warnings, plus info from the dispatch crates
/// - `RUST_LOG=dispatch=debug` - staging, HTTP and query detail
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,dispatch=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::config_for;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args.iter().copied()).unwrap().command
    }

    #[tokio::test]
    async fn test_fresh_database_is_created_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for("http://127.0.0.1:9", dir.path());
        config.database_path = dir.path().join("data").join("dispatch.db");

        let out = execute(parse(&["dispatch", "products"]), &config).await.unwrap();
        assert_eq!(out, "No products found.\n");
        assert!(config.database_path.exists());

        let out = execute(parse(&["dispatch", "history"]), &config).await.unwrap();
        assert_eq!(out, "No sales recorded.\n");
    }

    #[tokio::test]
    async fn test_bill_with_unknown_sku_never_reaches_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for("http://127.0.0.1:9", dir.path());
        config.database_path = dir.path().join("dispatch.db");

        let err = execute(
            parse(&["dispatch", "bill", "--item", "APEX-20L=1", "--name", "Ravi"]),
            &config,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.user_message(&config.invoice_api_url), "Error: Product not found: APEX-20L");
    }
}
