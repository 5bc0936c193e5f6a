use std::time::Duration;

use axum::Router;
use axum::http::Request;
use axum::response::Response;
use migration::{Migrator, MigratorTrait};
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use game_catalog::config::Config;
use game_catalog::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        "starting catalog server"
    );

    let db = game_catalog::db::connect(&config).await?;
    tracing::info!("database pool ready");

    Migrator::up(&db, None).await?;
    tracing::info!("schema migrations applied");

    // `config` moves into the shared state, so take the bind address first.
    let addr = config.socket_addr();
    let app = build_app(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the router and wrap it in the request tracing layer.
fn build_app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                status = tracing::field::Empty,
            )
        })
        .on_response(|response: &Response, latency: Duration, span: &Span| {
            span.record("status", response.status().as_u16());
            tracing::info!(latency_ms = latency.as_millis(), "finished");
        });

    game_catalog::routes::router().with_state(state).layer(trace)
}

/// Install the `tracing` subscriber. `RUST_LOG` wins over the configured
/// level when set.
fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("game_catalog={log_level},tower_http=info,sea_orm=warn").into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
