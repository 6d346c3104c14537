//! drive_tree CLI - Print every file below a Google Drive folder as CSV.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use drive_tree::logging::init_logging;
use drive_tree::{build_tree, extract_id, write_csv, Authenticator, DriveClient, DriveScope};

/// List all files under a Google Drive folder as `path,created,modified` CSV.
#[derive(Parser)]
#[command(name = "drive_tree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Folder URL or ID to start from.
    #[arg(short = 'f', long = "folder")]
    folder: String,

    /// Shared drive ID or URL. Leave empty for My Drive.
    #[arg(short = 'd', long = "drive", default_value = "")]
    drive: String,

    /// Path to service account JSON credentials file.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// Pre-issued OAuth access token; takes precedence over --credentials.
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let folder_id = extract_id(&cli.folder)
        .with_context(|| format!("Invalid folder URL or ID: {}", cli.folder))?;
    let scope = DriveScope::parse(&cli.drive)
        .with_context(|| format!("Invalid drive URL or ID: {}", cli.drive))?;

    let auth = Authenticator::from_environment(cli.access_token, cli.credentials.as_deref())
        .context("Failed to load credentials")?;
    let client = DriveClient::new(auth);

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("interrupt received, cancelling");
                cancel.cancel();
            }
        }
    });

    let tree = build_tree(&client, scope, &folder_id, cancel)
        .await
        .with_context(|| format!("Unable to build file tree for folder: {}", folder_id))?;

    let mut stdout = std::io::stdout().lock();
    write_csv(&mut stdout, &tree).context("Failed to write CSV output")?;
    stdout.flush().context("Failed to flush output")?;

    Ok(())
}
