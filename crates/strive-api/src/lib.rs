//! Strive API - HTTP resource surface for the fitness tracker
//!
//! Exposes the five collections as CRUD resources under `/api/`, plus
//! the team assignment operation and a discovery document at the root.
//! The server is a plain hyper http1 accept loop; every connection gets
//! its own task and shares the store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod respond;
pub mod router;
pub mod seed;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use strive_db::Store;
use tokio::net::TcpListener;

/// Serve the API on the given address until ctrl-c or SIGTERM.
pub async fn start_server(store: Arc<Store>, bind: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    tracing::info!(%bind, "listening");

    loop {
        tokio::select! {
            conn = listener.accept() => {
                let (stream, remote) = match conn {
                    Ok(c) => c,
                    Err(e) => {
                        tracing::warn!("accept error: {e}");
                        continue;
                    }
                };
                let store = store.clone();
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req| {
                        let store = store.clone();
                        async move { Ok::<_, Infallible>(router::route(&store, req).await) }
                    });
                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        tracing::debug!(%remote, "connection error: {e}");
                    }
                });
            }
            _ = shutdown_signal() => {
                tracing::info!("shutting down");
                return Ok(());
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => {}
            _ = term.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }
}
