//! CLI command definitions for item-pager.
//!
//! `fetch` walks every page of the items API; `filter` and `search` run the
//! item queries against either the live API or a saved snapshot.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::config::ClientConfig;
use crate::export::{read_snapshot, write_snapshot, ItemSnapshot};
use crate::items::{filter_by_kind, search, Item, ItemKind};
use crate::pager::{FetchedItems, HttpPageSource, Pager};

/// Fetch, filter, and search paginated agenda items.
#[derive(Parser)]
#[command(name = "item-pager")]
#[command(about = "Fetch every page of an items API, then filter or search the results")]
#[command(version)]
#[command(
    long_about = "item-pager walks a paginated JSON items API (events, meetings, tasks) page by page and collects every item.\n\nExample usage:\n  item-pager fetch --base-url https://api.example.com/items --output items.json\n  item-pager search --input items.json --keyword team"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Fetch all pages and print a summary, or save them as a snapshot.
    Fetch(FetchArgs),

    /// Keep only items of one kind.
    Filter(FilterArgs),

    /// Case-insensitive keyword search over item text fields.
    #[command(alias = "find")]
    Search(SearchArgs),
}

/// Connection settings; unset flags fall back to `ITEM_PAGER_*` variables.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RemoteArgs {
    /// Items endpoint URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Items requested per page.
    #[arg(long)]
    pub per_page: Option<u32>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl RemoteArgs {
    /// Environment configuration with these flags applied on top.
    pub fn to_config(&self) -> anyhow::Result<ClientConfig> {
        let config = ClientConfig::from_env().context("Invalid ITEM_PAGER_* environment")?;
        self.apply(config)
    }

    /// Applies the flags that were given to `config` and validates the result.
    pub fn apply(&self, mut config: ClientConfig) -> anyhow::Result<ClientConfig> {
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(per_page) = self.per_page {
            config = config.with_per_page(per_page);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }
}

/// Where `filter` and `search` get their items from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read items from a snapshot written by `fetch --output`.
    #[arg(short = 'i', long, conflicts_with_all = ["base_url", "per_page", "timeout_secs"])]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub remote: RemoteArgs,
}

/// Arguments for `item-pager fetch`.
#[derive(Parser, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Save the fetched items as a JSON snapshot.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print the items as JSON instead of a summary.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `item-pager filter`.
#[derive(Parser, Debug)]
pub struct FilterArgs {
    /// Item kind to keep (event, meeting, task).
    #[arg(short = 'k', long)]
    pub kind: ItemKind,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Print matches as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `item-pager search`.
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to look for; case is ignored.
    #[arg(short = 'q', long)]
    pub keyword: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Print matches as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Parse CLI arguments and return the Cli struct.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Fetch(args) => run_fetch_command(args).await,
        Commands::Filter(args) => run_filter_command(args).await,
        Commands::Search(args) => run_search_command(args).await,
    }
}

async fn run_fetch_command(args: FetchArgs) -> anyhow::Result<()> {
    let config = args.remote.to_config()?;
    let fetched = fetch_remote(&config).await?;

    if args.json {
        let refs: Vec<&Item> = fetched.items.iter().collect();
        print_items(&refs, true)?;
    } else {
        println!(
            "✓ Fetched {} items across {} pages (reported total {})",
            fetched.items.len(),
            fetched.pages_fetched,
            fetched.total
        );
        for kind in ItemKind::ALL {
            println!(
                "  {:<8} {}",
                kind,
                filter_by_kind(&fetched.items, kind).len()
            );
        }
    }

    if let Some(path) = args.output {
        let snapshot = ItemSnapshot::from_fetched(config.base_url.clone(), fetched);
        write_snapshot(&path, &snapshot)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        info!(path = %path.display(), items = snapshot.items.len(), "Snapshot saved");
        if !args.json {
            println!("  Saved to {}", path.display());
        }
    }

    Ok(())
}

async fn run_filter_command(args: FilterArgs) -> anyhow::Result<()> {
    let items = load_items(&args.source).await?;
    let selected = filter_by_kind(&items, args.kind);
    info!(kind = %args.kind, matched = selected.len(), of = items.len(), "Filtered items");
    print_items(&selected, args.json)
}

async fn run_search_command(args: SearchArgs) -> anyhow::Result<()> {
    let items = load_items(&args.source).await?;
    let selected = search(&items, &args.keyword);
    info!(keyword = %args.keyword, matched = selected.len(), of = items.len(), "Searched items");
    print_items(&selected, args.json)
}

/// Walk every page of the configured endpoint.
async fn fetch_remote(config: &ClientConfig) -> anyhow::Result<FetchedItems> {
    let source = HttpPageSource::new(config)?;
    let pager = Pager::new(Arc::new(source), config.per_page);

    info!(base_url = %config.base_url, per_page = config.per_page, "Fetching items");
    pager
        .fetch_all()
        .await
        .with_context(|| format!("Failed to fetch items from {}", config.base_url))
}

/// Items from the snapshot if one was given, otherwise from the API.
async fn load_items(source: &SourceArgs) -> anyhow::Result<Vec<Item>> {
    match source.input {
        Some(ref path) => {
            let snapshot = read_snapshot(path)
                .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
            info!(
                path = %path.display(),
                items = snapshot.items.len(),
                fetched_at = %snapshot.fetched_at,
                "Loaded snapshot"
            );
            Ok(snapshot.items)
        }
        None => {
            let config = source.remote.to_config()?;
            Ok(fetch_remote(&config).await?.items)
        }
    }
}

fn print_items(items: &[&Item], json: bool) -> anyhow::Result<()> {
    if json {
        let json_output =
            serde_json::to_string_pretty(items).context("Failed to serialize items")?;
        println!("{}", json_output);
        return Ok(());
    }

    for item in items {
        println!("{item}");
    }
    println!("{} item(s)", items.len());
    Ok(())
}
