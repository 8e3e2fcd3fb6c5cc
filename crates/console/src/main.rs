//! `pidgen` -- command-line console for the project ID tool.
//!
//! Signs in against the backend, lists and edits projects, drives the
//! admin / superadmin review workflow, and manages customers, users and
//! roles. Tables go to stdout; logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable                      | Default                              | Description                         |
//! |-------------------------------|--------------------------------------|-------------------------------------|
//! | `PIDGEN_API_URL`              | hosted backend                       | Backend base URL                    |
//! | `PIDGEN_REQUEST_TIMEOUT_SECS` | `30`                                 | Per-request timeout                 |
//! | `PIDGEN_SESSION_FILE`         | `<config dir>/pidgen/session.json`   | Where the session token is stored   |
//! | `PIDGEN_ID_POLICY`            | `observed`                           | `observed` or `core`                |
//! | `RUST_LOG`                    | `pidgen=info,...`                    | Log filter                          |

mod cli;
mod commands;

use std::sync::Arc;

use clap::Parser;
use pidgen_client::{ApiClient, ClientConfig, FileSessionStore};
use pidgen_console::DEFAULT_LOG_FILTER;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = cli::Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url);
    }

    tracing::debug!(
        api_url = %config.api_url,
        session_file = %config.session_file.display(),
        id_policy = ?config.id_policy,
        "Loaded configuration",
    );

    let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let client = Arc::new(ApiClient::new(&config, store)?);

    commands::run(cli.command, client, cli.yes).await
}
