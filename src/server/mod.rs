//! HTTP front end
//!
//! Each accepted connection is served by its own task. Tasks share the
//! [`App`] read-only; nothing is written to shared state while handling a
//! request.

pub mod form;
pub mod handler;
pub mod http;
pub mod router;

pub use handler::{App, NOT_FOUND_BODY};
pub use http::{Method, Request, Response};
pub use router::Route;

use crate::{Result, ShelterError};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

/// How long a connection may take to deliver its request
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Listening socket plus the application it serves
pub struct Server {
    listener: TcpListener,
    app: Arc<App>,
    read_timeout: Duration,
}

impl Server {
    /// Bind to `addr` (`host:port`); port 0 picks a free port
    pub async fn bind(addr: &str, app: App) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            app: Arc::new(app),
            read_timeout: DEFAULT_READ_TIMEOUT,
        })
    }

    /// Drop connections that have not sent a full request within `timeout`
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes; in-flight connections finish on their own
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tracing::info!("Server running at http://{}/", self.local_addr()?);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let app = Arc::clone(&self.app);
                        let read_timeout = self.read_timeout;
                        tokio::spawn(async move {
                            if let Err(e) = serve_connection(stream, &app, read_timeout).await {
                                tracing::warn!(%peer, "connection failed: {}", e);
                            }
                        });
                    }
                    Err(e) => tracing::warn!("accept failed: {}", e),
                },
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Read one request from `stream`, answer it, close
///
/// A request that does not arrive within `read_timeout` closes the
/// connection without a response.
pub async fn serve_connection(
    mut stream: TcpStream,
    app: &App,
    read_timeout: Duration,
) -> Result<()> {
    let (read_half, mut write_half) = stream.split();
    let mut reader = BufReader::new(read_half);

    let request = tokio::time::timeout(read_timeout, http::read_request(&mut reader))
        .await
        .map_err(|_| {
            ShelterError::Protocol(format!(
                "No request received within {}ms",
                read_timeout.as_millis()
            ))
        })??;
    let Some(request) = request else {
        return Ok(());
    };

    let response = match app.handle(&request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(method = %request.method, path = %request.path, "request failed: {}", e);
            Response::internal_error()
        }
    };

    http::write_response(&mut write_half, &response).await
}
