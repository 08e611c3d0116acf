//! # ORC Registry Server
//!
//! HTTP front of the issuer registry, built on `axum` with JSON documents in a
//! local data directory.
//!
//! ## Example
//! ```no_run
//! use orc_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(3000)
//!         .data_dir("./data")
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use orc::domain::config::AppConfig;
use orc::kernel::server::ApiState;
use orc::storage::Storage;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: AppConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: AppConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cfg.storage.data_dir = dir.into();
        self
    }

    fn check_ssl(&self) -> Result<()> {
        let Some(ssl) = &self.cfg.server.ssl else {
            return Ok(());
        };

        anyhow::ensure!(ssl.cert.exists(), "SSL certificate not found at {}", ssl.cert.display());
        anyhow::ensure!(ssl.key.exists(), "SSL key not found at {}", ssl.key.display());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if ssl.key.metadata()?.permissions().mode() & 0o077 != 0 {
                warn!(key = %ssl.key.display(), "SSL private key is readable by group or others");
            }
        }

        Ok(())
    }

    /// Prepares everything the server needs before it binds.
    ///
    /// 1. Checks the TLS files when `server.ssl` is configured.
    /// 2. Opens the data directory, creating it if needed.
    /// 3. Initializes the feature slices (seeding an empty registry).
    /// 4. Assembles the shared [`ApiState`].
    ///
    /// # Errors
    /// Fails if the TLS files are missing, the data directory is unusable or a
    /// slice cannot be initialized.
    pub async fn build(self) -> Result<Server> {
        self.check_ssl()?;

        let data_dir = &self.cfg.storage.data_dir;
        let storage = Storage::builder()
            .root(data_dir)
            .create(true)
            .connect()
            .await
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

        let slices = orc::init(&self.cfg, &storage).await.context("Feature bootstrap failed")?;

        let state = ApiState::builder()
            .config(self.cfg)
            .register_slices(slices)
            .build()
            .context("Failed to assemble API state")?;
        info!(slices = ?state.slice_names().collect::<Vec<_>>(), "Server initialized");

        Ok(Server { state })
    }
}

#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The full application router, including `/docs`.
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Serves until SIGINT or SIGTERM, then drains connections for up to 30 seconds.
    ///
    /// # Errors
    /// Returns an error if binding fails or the TLS material cannot be loaded.
    pub async fn run(self) -> Result<()> {
        let server = &self.state.config.server;
        let address = SocketAddr::new(server.address, server.port);
        let app = self.router();

        let handle = Handle::<SocketAddr>::new();
        let shutdown = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!(error = %e, "Failed to wait for shutdown signal");
                return;
            }
            info!("Shutdown signal received, draining connections");
            shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        if let Some(ssl) = &server.ssl {
            let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                .await
                .context("Failed to load TLS certificate")?;

            info!("Listening on https://{address}");
            axum_server::bind_rustls(address, tls)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Listening on http://{address}");
            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        info!("Server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => res,
        res = terminate => res,
    }
}
