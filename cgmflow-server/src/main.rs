use tracing::{event, Level};
use warp::Filter;
use cgmflow_server::{AppState, ServerConfig, ServerError, routes};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
  let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info,warp=info".to_owned());

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
    .init();

  let config = ServerConfig::from_env()?;
  let state = AppState::from_config(&config)?;

  event!(Level::INFO, bind = %config.bind, "server started");
  warp::serve(routes(state).with(warp::trace::request()))
    .run(config.bind)
    .await;
  Ok(())
}
