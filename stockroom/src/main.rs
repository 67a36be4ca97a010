use stockroom::{build_router, init_state, Settings};
use stockroom_core::{init_tracing, serve, StockroomConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = StockroomConfig::load("dev")?.with_typed::<Settings>()?;
    init_tracing(config.app.log_format);

    tracing::info!(
        profile = config.profile(),
        version = %config.app.version,
        "Starting {}",
        config.app.name
    );

    let state = init_state(&config).await?;
    let pool = state.pool.clone();
    let router = build_router(state, &config);

    serve(router, &config.server.addr).await?;

    pool.close().await;
    tracing::info!("Database pool closed");
    Ok(())
}
