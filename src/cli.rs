//! Command-line surface.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cs_app::HistoryController;
use cs_app::usecases::{
    ClearPersistedHistory, ListHistoryItems, ListKeyboardItems, LoadWidgetItems,
    ReportStorageUsage,
};
use cs_core::{AppConfig, ClipboardItem, ItemId};

use crate::bootstrap::run_daemon;
use crate::bootstrap::wiring::{
    build_history_store, build_shared_defaults, wire_offline_history, wire_paste_history,
};

#[derive(Debug, Parser)]
#[command(name = "clipstash", version, about = "Clipboard history manager")]
pub struct Cli {
    /// Path to config.toml. Defaults to the one in the data directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Monitor the clipboard until Ctrl-C.
    Run,
    /// Print the stored history.
    List {
        /// Case-insensitive filter.
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print what the keyboard extension shows.
    Keyboard,
    /// Print what the widget shows.
    Widget,
    /// Pin or unpin an item. `index` is its position in unfiltered `list` output.
    Favorite { index: usize },
    /// Delete one item. `index` is its position in unfiltered `list` output.
    Delete { index: usize },
    /// Copy an item back to the system clipboard.
    Paste { index: usize },
    /// Delete every stored item.
    Clear,
    /// Print disk usage against the quota.
    Usage,
}

pub async fn execute(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Run => run_daemon(config).await,
        Command::List { search, limit } => {
            let items = ListHistoryItems::new(build_history_store(config))
                .execute(&search, limit)
                .await?;
            print_items(&items);
            Ok(())
        }
        Command::Keyboard => {
            let items = ListKeyboardItems::new(build_history_store(config))
                .execute()
                .await;
            print_items(&items);
            Ok(())
        }
        Command::Widget => {
            let items =
                LoadWidgetItems::new(build_history_store(config), build_shared_defaults(config))
                    .execute()
                    .await;
            print_items(&items);
            Ok(())
        }
        Command::Favorite { index } => {
            let history = wire_offline_history(config);
            let id = loaded_item_id(&history, index).await?;
            history.toggle_favorite(&id).await;
            history.flush().await;
            println!("favorite toggled");
            Ok(())
        }
        Command::Delete { index } => {
            let history = wire_offline_history(config);
            loaded_item_id(&history, index).await?;
            history.remove_at(vec![index]).await;
            history.flush().await;
            println!("item deleted");
            Ok(())
        }
        Command::Paste { index } => {
            let history = wire_paste_history(config)?;
            let id = loaded_item_id(&history, index).await?;
            history.paste_item(&id).await?;
            history.flush().await;
            println!("copied to clipboard");
            Ok(())
        }
        Command::Clear => {
            ClearPersistedHistory::new(build_history_store(config))
                .execute()
                .await?;
            println!("history cleared");
            Ok(())
        }
        Command::Usage => {
            let usage = ReportStorageUsage::new(build_history_store(config))
                .execute()
                .await?;
            println!(
                "{} / {} bytes{}",
                usage.total_bytes,
                usage.quota_bytes,
                if usage.exceeds_quota() {
                    " (over quota)"
                } else {
                    ""
                }
            );
            Ok(())
        }
    }
}

/// Load the stored history and resolve a `list` position to an item id.
async fn loaded_item_id(history: &HistoryController, index: usize) -> anyhow::Result<ItemId> {
    history.load().await.context("load history")?;
    history
        .items()
        .get(index)
        .map(|item| item.id().clone())
        .with_context(|| format!("no history item at index {index}"))
}

fn print_items(items: &[ClipboardItem]) {
    for (index, item) in items.iter().enumerate() {
        println!("{}", format_item_line(index, item));
    }
}

/// `<index>\t<kind>\t<*|space><display text, first line>`
fn format_item_line(index: usize, item: &ClipboardItem) -> String {
    let marker = if item.is_favorite() { '*' } else { ' ' };
    let text = item.display_text();
    let first_line = text.lines().next().unwrap_or_default();
    format!("{index}\t{}\t{marker}{first_line}", item.kind())
}
