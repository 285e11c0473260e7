//! Showcase playback server
//!
//! Serve the demos and site services over HTTP and WebSocket.

use showcase_vis::{VisConfig, VisServer};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "showcase_vis=info,showcase_site=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = VisConfig::from_env()?;

    // Optional positional port override
    let args: Vec<String> = env::args().collect();
    if let Some(port) = args.get(1) {
        let port: u16 = port
            .parse()
            .map_err(|_| format!("Invalid port: {}", port))?;
        config = config.with_port(port);
    }

    let server = VisServer::new(&config)?;

    println!("Showcase Playback Server");
    println!("========================");
    println!();
    for demo in server.state().catalog().list() {
        println!("  {:<10} {:>5} steps  {}", demo.name, demo.total_steps, demo.title);
    }
    println!();
    println!("Data directory: {}", config.data_dir.display());
    println!("Listening on http://{}", config.addr);
    println!();

    server.serve().await?;

    Ok(())
}
