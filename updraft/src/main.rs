use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::{error::Result, snapshot::SnapshotArgs, tabular::TabularArgs};

mod error;
mod invocation;
mod snapshot;
mod tabular;

#[derive(Parser)]
#[command(name = "updraft")]
#[command(about = "Object-storage to time-series ingestion pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a gzipped CSV table named by a storage notification
    Tabular {
        #[clap(flatten)]
        inner: TabularArgs,
    },
    /// Ingest a gzipped pre-batched JSON snapshot
    Snapshot {
        #[clap(flatten)]
        inner: SnapshotArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    updraft_observability::init_logging();

    let cli = Cli::parse();

    let ct = CancellationToken::new();

    let ct_clone = ct.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        ct_clone.cancel();
    });

    match cli.command {
        Commands::Tabular { inner } => inner.run(ct).await,
        Commands::Snapshot { inner } => inner.run(ct).await,
    }
}
