use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use showscrape_core::EpisodeScraper;
use showscrape_server::config::ServerArgs;
use showscrape_server::{router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("showscrape_core=info,showscrape_server=info,warn")),
        )
        .init();

    let args = ServerArgs::parse();
    let targets = args.targets();
    let scraper = EpisodeScraper::with_config(args.scraper_config())?;
    let state = AppState::new(scraper, targets, &args.show_base_url);

    let address = args.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(
        %address,
        mode = ?args.mode,
        targets = state.targets().len(),
        "showscrape listening"
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}
