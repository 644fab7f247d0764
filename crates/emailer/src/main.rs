//! rss-mailer - send a digest of feed entries by email.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use emailer::{ContentType, Mailer, SmtpNotifier};
use feed::EntryResultSet;

/// rss-mailer - Render feed entries and send them as a digest email.
#[derive(Parser)]
#[command(name = "rss-mailer")]
#[command(about = "Send feed entries as a digest email over SMTP")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a digest to one recipient (SMTP settings come from the environment)
    Send {
        /// Recipient address
        #[arg(long)]
        to: String,

        /// Body format: html or plain
        #[arg(long, default_value = "html")]
        content_type: ContentType,

        /// Entry listing JSON (reads stdin when omitted)
        #[arg(long)]
        entries: Option<PathBuf>,
    },

    /// Print the subject and body without sending
    Preview {
        /// Body format: html or plain
        #[arg(long, default_value = "html")]
        content_type: ContentType,

        /// Entry listing JSON (reads stdin when omitted)
        #[arg(long)]
        entries: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("emailer=debug,info")
    } else {
        EnvFilter::new("emailer=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Send {
            to,
            content_type,
            entries,
        } => {
            let entries = load_entries(entries.as_deref())?;
            if entries.is_empty() {
                tracing::warn!("Entry listing is empty, sending an empty digest");
            }

            let notifier = SmtpNotifier::from_env(content_type);
            notifier
                .send_email(&to, &entries)
                .await
                .with_context(|| format!("Failed to send digest to {to}"))?;
        }

        Commands::Preview {
            content_type,
            entries,
        } => {
            let entries = load_entries(entries.as_deref())?;
            let notifier = SmtpNotifier::from_env(content_type);

            println!("Subject: {}", notifier.subject());
            println!("Content-Type: {content_type}; charset=utf-8");
            println!();
            println!("{}", notifier.format_body(&entries));
        }
    }

    Ok(())
}

/// Read an entry listing from `path`, or from stdin when no path is given.
fn load_entries(path: Option<&Path>) -> Result<EntryResultSet> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read entries from stdin")?;
            buf
        }
    };

    let entries: EntryResultSet =
        serde_json::from_str(&content).context("Failed to parse entry listing JSON")?;
    tracing::debug!(count = entries.len(), total = entries.total, "Loaded entries");
    Ok(entries)
}
