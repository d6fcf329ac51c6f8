use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use hl_scrapers::{fetch_feed, feed_to_json, init_logging, FetchArgs, TransportArgs};
use hl_web::render::render_view;
use hl_web::{AppState, SectionFilter, ServerConfig, ViewState};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "BBC topic headlines: fetch, render and serve", long_about = None)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a topic page and print the extracted headlines as JSON
    Fetch(FetchArgs),
    /// Serve the news API, rendered cards and static files
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
    /// Directory with index.html and assets (overrides HL_STATIC_DIR)
    #[arg(long)]
    static_dir: Option<PathBuf>,
    #[command(flatten)]
    transport: TransportArgs,
}

async fn fetch(args: FetchArgs) -> anyhow::Result<()> {
    let feed = fetch_feed(&args).await?;
    info!("📰 {} articles in {} sections", feed.total_articles, feed.sections.len());

    if args.html {
        let mut view = ViewState::new(feed);
        view.select(SectionFilter::from(args.section.as_str()));
        println!("{}", render_view(&view, Utc::now()));
    } else {
        println!("{}", feed_to_json(&feed)?);
    }
    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = ServerConfig::from_env().context("reading server configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(dir) = args.static_dir {
        config.static_dir = dir;
    }

    let scraper = args.transport.build_scraper()?;
    info!(
        "🚀 Serving headlines (via {})",
        if args.transport.proxy { "proxy" } else { "direct fetch" }
    );
    hl_web::serve(&config, AppState::new(scraper)).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Fetch(args) => fetch(args).await,
        Commands::Serve(args) => serve(args).await,
    };

    exit_code(result)
}

fn exit_code(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
