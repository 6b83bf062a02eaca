use anyhow::Context;
use mock_openai::config::{self, ServerConfig};
use mock_openai::server::{build_router, ROUTES};
use mock_openai::util::init_tracing;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mock-openai");
    if config::wants_help(&args) {
        println!("{}", config::usage(program));
        return Ok(());
    }

    init_tracing();

    let config = ServerConfig::load(&args)?;
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    let addr = listener.local_addr().context("listener has no local address")?;

    tracing::info!("mock-openai listening on http://{}", addr);
    tracing::info!("Routes: {}", ROUTES.join(", "));

    axum::serve(listener, build_router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("mock-openai stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
