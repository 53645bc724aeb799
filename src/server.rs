use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::resource;
use crate::store::BookStore;

/// HTTP server for the book resource
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    store: Arc<BookStore>,
}

impl Server {
    /// Create and bind the server to the specified address with an empty store
    pub async fn bind(addr: &str) -> std::io::Result<Self> {
        Self::bind_with_store(addr, Arc::new(BookStore::new())).await
    }

    /// Create and bind the server around an existing store
    pub async fn bind_with_store(addr: &str, store: Arc<BookStore>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server bound to {}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            store,
        })
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Shared store backing this server
    pub fn store(&self) -> Arc<BookStore> {
        Arc::clone(&self.store)
    }

    /// Serve requests until Ctrl-C
    pub async fn run(self) -> std::io::Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve requests until `shutdown` resolves, then drain in-flight requests
    pub async fn run_until<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Server started, listening on {}", self.local_addr);

        let app = resource::router(self.store).layer(TraceLayer::new_for_http());
        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
