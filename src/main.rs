use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use flickr_gallery::apis::FlickrService;
use flickr_gallery::app::{Gallery, Key};
use flickr_gallery::app::ports::{GalleryViewPort, HttpClientPort};
use flickr_gallery::infra::{ReqwestHttp, TerminalView};
use flickr_gallery::observability::{self, metrics};
use flickr_gallery::GalleryConfig;

#[derive(Parser)]
#[command(name = "flickr-gallery")]
#[command(about = "Browse Flickr's interesting photos from the terminal")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./gallery.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the load deadline in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Print Prometheus metrics before exiting
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the interesting photos with their image URLs
    List,
    /// Open the gallery and navigate the lightbox from stdin
    Browse,
    /// Render the photo at a given position in the list
    Show {
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = observability::init_logging();
    let cli = Cli::parse();

    if cli.metrics {
        if let Err(e) = metrics::init() {
            warn!("Metrics disabled: {}", e);
        }
    }

    let mut config = GalleryConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(secs) = cli.timeout_secs.filter(|s| *s > 0) {
        config.load_timeout_secs = secs;
    }

    let http: Arc<dyn HttpClientPort> = Arc::new(ReqwestHttp::new());
    let view: Arc<dyn GalleryViewPort> = Arc::new(TerminalView::stdout());

    let outcome = match cli.command {
        Commands::List => list(&config, http).await,
        Commands::Browse => browse(&config, http, view).await,
        Commands::Show { index } => show(&config, http, view, index).await,
    };

    if cli.metrics {
        if let Some(text) = metrics::render() {
            println!("{}", text);
        }
    }
    outcome
}

async fn list(config: &GalleryConfig, http: Arc<dyn HttpClientPort>) -> anyhow::Result<()> {
    let service = FlickrService::new(config, http);
    let photos = tokio::time::timeout(config.load_timeout(), service.interesting_photos())
        .await
        .context("Failed to load images from Flickr.")??;

    for (i, photo) in photos.iter().enumerate() {
        println!("{:>3}. {} (by {})", i + 1, photo.title, photo.owner);
        println!("     {}", photo.display_url());
        println!("     {}", photo.large_url());
    }
    Ok(())
}

async fn browse(
    config: &GalleryConfig,
    http: Arc<dyn HttpClientPort>,
    view: Arc<dyn GalleryViewPort>,
) -> anyhow::Result<()> {
    let mut gallery = Gallery::new(config, http, view);
    gallery.load().await?;
    gallery.open_lightbox().await;
    println!("n/right: next, p/left: previous, esc: close, o: open, q: quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim().to_ascii_lowercase().as_str() {
            "q" | "quit" => {
                gallery.close_lightbox().await;
                break;
            }
            "o" | "open" => {
                gallery.open_lightbox().await;
            }
            other => {
                gallery.handle_key(Key::from_name(other)).await;
            }
        }
    }
    info!("browse session finished");
    Ok(())
}

async fn show(
    config: &GalleryConfig,
    http: Arc<dyn HttpClientPort>,
    view: Arc<dyn GalleryViewPort>,
    index: usize,
) -> anyhow::Result<()> {
    let mut gallery = Gallery::new(config, http, view);
    let count = gallery.load().await?;
    if index >= count {
        warn!("index {} is past the last photo ({}), showing the last one", index, count - 1);
    }
    for _ in 0..index.min(count - 1) {
        gallery.next().await;
    }
    Ok(())
}
