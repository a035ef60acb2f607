//! lkp - dictionary lookup CLI with a bounded local history

use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use historydb::HistoryStore;
use lookup::{Lookup, VocabularyClient};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// History directory
    #[arg(short, long, default_value = "./data")]
    data: String,

    /// Maximum number of history entries (falls back to 200 if invalid)
    #[arg(long, default_value = "200")]
    max_history: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a word, serving from history when possible
    Lookup {
        /// Word to look up
        word: String,
    },

    /// List history entries, most recently used first
    List {
        /// Only show words containing this substring
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Delete one history entry
    Remove {
        /// Word to delete
        word: String,
    },

    /// Delete all history entries
    Clear,
}

/// Lenient history-size parsing: non-numeric or non-positive values fall
/// back to the default
fn max_history_size(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => n as usize,
        _ => historydb::DEFAULT_MAX_SIZE,
    }
}

fn format_millis(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let max_history = max_history_size(&args.max_history);

    let store = Arc::new(HistoryStore::open(&args.data, max_history)?);
    info!(
        "History opened: {} entries, limit {}",
        store.len(),
        store.max_size()
    );

    match args.command {
        Command::Lookup { word } => {
            let pipeline = Lookup::new(store, VocabularyClient::new());
            let document = pipeline.lookup(&word).await?;
            println!("{}", document);
        }
        Command::List { filter } => {
            let filter = filter.unwrap_or_default();
            for record in store.list_by_recency() {
                if record.word.contains(&filter) {
                    println!("{}\t{}", record.word, format_millis(record.updated_at));
                }
            }
        }
        Command::Remove { word } => {
            store.remove(&word)?;
        }
        Command::Clear => {
            store.clear()?;
        }
    }

    Ok(())
}
