use anyhow::Context;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use dotenvy::dotenv;

use mail_relay_webhook::app::create_app;
use mail_relay_webhook::config::Config;
use mail_relay_webhook::state::SharedAppState;
use mail_relay_webhook::utils::init_email_service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| "mail_relay_webhook=info,tower_http=info".into()),
    )
    .init();

  let config = Config::from_env().inspect_err(|e| tracing::error!("Configuration error: {}", e))?;
  let email_service = init_email_service(&config).context("Failed to set up SMTP transport")?;

  tracing::info!(
    "Relaying through {}:{} as {}",
    config.smtp.host,
    config.smtp.port,
    config.email_from
  );

  let addr = format!("0.0.0.0:{}", config.port);
  let app = create_app(SharedAppState::new(config, email_service));

  let listener = tokio::net::TcpListener::bind(&addr)
    .await
    .with_context(|| format!("Failed to bind {}", addr))?;

  tracing::info!("Mail relay listening on {}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("Failed to install Ctrl+C handler: {}", e);
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!("Failed to install SIGTERM handler: {}", e);
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
