//! Entry point for procload_agent. Parses args and serves the hello_world locations.

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use procload::SourcePaths;
use procload_agent::{
    config::{parse_args, AgentConfig, CliError},
    directive::build_router,
    state::AppState,
    tls,
};
use std::{net::SocketAddr, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = match parse_args(std::env::args(), AgentConfig::from_env()) {
        Ok(cfg) => cfg,
        Err(CliError::Usage(text)) => {
            println!("{text}");
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let state = AppState::new(SourcePaths::under(&cfg.proc_root));
    let app = build_router(state, &cfg.locations);
    let addr = SocketAddr::new(cfg.bind, cfg.port);

    if cfg.enable_ssl {
        serve_tls(app, addr).await
    } else {
        serve_plain(app, addr).await
    }
}

async fn serve_plain(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("procload_agent listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn serve_tls(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let (cert, key) = tls::ensure_self_signed_cert()?;
    let rustls = RustlsConfig::from_pem_file(cert, key).await?;

    let handle = axum_server::Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.graceful_shutdown(Some(Duration::from_secs(5)));
    });

    info!("procload_agent listening on https://{addr}");
    axum_server::bind_rustls(addr, rustls)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
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
    info!("signal received, shutting down");
}
