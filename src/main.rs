use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use portfolio_api::config::Config;
use portfolio_api::email::{Notifier, SmtpNotifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting portfolio API");

    let notifier: Option<Arc<dyn Notifier>> = match config.smtp.as_ref() {
        Some(smtp) => match SmtpNotifier::new(smtp) {
            Ok(mailer) => {
                match mailer.verify().await {
                    Ok(()) => tracing::info!("Email service is ready to send messages"),
                    Err(e) => tracing::error!("Error connecting to email service: {e}"),
                }
                Some(Arc::new(mailer) as Arc<dyn Notifier>)
            }
            Err(e) => {
                tracing::error!("Email service not available: {e}");
                None
            }
        },
        None => {
            tracing::error!(
                "EMAIL_USER and EMAIL_PASS environment variables are required; contact notifications are disabled"
            );
            None
        }
    };

    if config.admin_password.is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set; message moderation endpoints will return 500");
    }

    let addr = SocketAddr::new(config.host, config.port);
    let (app, state) = portfolio_api::build_app(config, notifier);

    let cleanup = tokio::spawn(portfolio_api::run_limiter_cleanup(
        state,
        Duration::from_secs(5 * 60),
    ));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    cleanup.abort();
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
