use std::path::Path;
use std::sync::Arc;

use log::info;
use tokio::signal::unix::{signal, SignalKind};

use elza::{router, Result};
use readings::Store;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init_timed();

    info!("elza version {VERSION}");

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string());
    let data_dir = Path::new(&data_dir);

    let store = Store::open(
        data_dir.join("sensor_data.csv"),
        data_dir.join("sensor_data.xlsx"),
    )?;
    let store = Arc::new(store);

    info!("loaded {} readings", store.len().await);

    let port: u16 = std::env::var("HTTP_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    // 0.0.0.0 so the sensors can reach the service from the local network
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening http://0.0.0.0:{port}");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(async {
            let mut sig = signal(SignalKind::terminate()).unwrap();
            sig.recv().await;
            info!("got SIGTERM, exiting...");
        })
        .await?;

    Ok(())
}
