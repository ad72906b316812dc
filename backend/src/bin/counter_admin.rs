//! Inspect and reset today's document number counters in PostgreSQL.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail, eyre};
use mockable::DefaultClock;
use tokio::runtime::Builder;

use docket::domain::ports::{DocumentNumberCommand, DocumentNumberQuery, DocumentNumberRequest};
use docket::domain::{DocumentNumberService, DocumentType, UserId};
use docket::outbound::persistence::{DbPool, DieselCounterStore, PoolConfig};

/// `counter-admin` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "counter-admin",
    about = "Inspect or reset today's document number counter for one owner",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DOCKET_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Owner whose counter is targeted.
    #[arg(long, value_name = "uuid")]
    owner: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the last number issued today.
    Last {
        /// Document type such as `delivery` or `warranty`.
        document_type: String,
        /// Overrides the prefix derived from the document type.
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Reset today's counter so numbering restarts at 01.
    Reset {
        /// Document type such as `delivery` or `warranty`.
        document_type: String,
        /// Overrides the prefix derived from the document type.
        #[arg(long)]
        prefix: Option<String>,
        /// Acknowledge that numbers issued earlier today will be reissued.
        #[arg(long)]
        confirm: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create Tokio runtime")?;
    runtime.block_on(run(args))
}

fn request_for(document_type: String, prefix: Option<String>) -> DocumentNumberRequest {
    let request = DocumentNumberRequest::new(DocumentType::from(document_type));
    match prefix {
        Some(prefix) => request.with_custom_prefix(prefix),
        None => request,
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let owner = UserId::new(&args.owner).wrap_err("--owner must be a UUID")?;
    let database_url = match args.database_url {
        Some(url) => url,
        None => env::var("DOCKET_DATABASE_URL")
            .map_err(|_| eyre!("pass --database-url or set DOCKET_DATABASE_URL"))?,
    };
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("failed to create database pool")?;
    let service = DocumentNumberService::new(
        Arc::new(DieselCounterStore::new(pool)),
        Arc::new(DefaultClock),
    );

    match args.command {
        Command::Last {
            document_type,
            prefix,
        } => {
            let request = request_for(document_type, prefix);
            match service.last_number(Some(&owner), &request).await {
                Some(number) => println!("{number}"),
                None => println!("no numbers issued today"),
            }
        }
        Command::Reset {
            document_type,
            prefix,
            confirm,
        } => {
            if !confirm {
                bail!("reset reissues numbers already handed out today; rerun with --confirm");
            }
            let request = request_for(document_type, prefix);
            service
                .reset(Some(&owner), &request)
                .await
                .wrap_err("counter reset failed")?;
            println!("counter reset");
        }
    }
    Ok(())
}
