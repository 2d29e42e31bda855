use std::sync::Arc;

use tracing::info;

use crate::bdl::BdlClient;
use crate::config::Config;
use crate::data::RegionDirectory;
use crate::error::BdlError;

pub mod api;
pub mod forms;
pub mod pages;
pub mod routes;

/// Everything a request handler may read. Built once, never mutated.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub client: BdlClient,
    pub regions: RegionDirectory,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, client: BdlClient, regions: RegionDirectory) -> SharedState {
        Arc::new(Self {
            config,
            client,
            regions,
        })
    }
}

/// Builds the client and loads the region directory; fails if the directory cannot be fetched.
pub async fn build_state(config: Config) -> Result<SharedState, BdlError> {
    let client = BdlClient::new(&config)?;
    let regions = RegionDirectory::load(&client).await?;
    Ok(AppState::new(config, client, regions))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let state = build_state(config).await?;
    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr).await?;
    let addr = listener.local_addr()?;
    info!("regional_prices listening on http://{addr}");
    axum::serve(listener, routes::router(state)).await?;
    Ok(())
}
