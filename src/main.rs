//! item-pager CLI entry point.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = item_pager::cli::parse_cli();
    item_pager::logging::init_logging(&cli.log_level)?;
    item_pager::cli::run_with_cli(cli).await
}
