//! Academy node - the main application entry point.
//!
//! Architecture:
//! - Single daemon process with shared RocksDB storage
//! - HTTP API for clients (students, attendance, sessions)
//! - Unix admin socket for local account ops (academy-admin CLI)

use crate::admin_socket::AdminSocket;
use crate::api;
use crate::auth::Authenticator;
use crate::directory::UserDirectory;
use crate::error::Result;
use crate::roster::Roster;
use crate::storage::Storage;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for an academy node.
#[derive(Debug, Clone)]
pub struct AcademyConfig {
    /// Data directory for storage
    pub data_dir: PathBuf,

    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Admin socket path (for academy-admin CLI)
    pub admin_socket: PathBuf,

    /// Password assigned to accounts created without one
    pub default_password: String,
}

impl Default for AcademyConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl AcademyConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(
            std::env::var("TATAME_DATA_DIR").unwrap_or_else(|_| "./tatame-data".to_string()),
        );

        let api_addr = std::env::var("TATAME_API_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .expect("Invalid TATAME_API_ADDR");

        let admin_socket = std::env::var("TATAME_ADMIN_SOCKET")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("admin.sock"));

        let default_password = std::env::var("TATAME_DEFAULT_PASSWORD")
            .unwrap_or_else(|_| "tatame123".to_string());

        Self {
            data_dir,
            api_addr,
            admin_socket,
            default_password,
        }
    }
}

/// Shared state for the academy node - single storage instance shared by
/// all components, wired together at construction.
pub struct AcademyState {
    pub storage: Arc<Storage>,
    pub directory: Arc<UserDirectory>,
    pub roster: Roster,
    pub auth: Authenticator,
    pub config: AcademyConfig,
}

impl AcademyState {
    /// Wire every component over one storage instance.
    pub fn new(storage: Arc<Storage>, config: AcademyConfig) -> Self {
        let directory = Arc::new(UserDirectory::new(Arc::clone(&storage)));
        let roster = Roster::new(Arc::clone(&storage));
        let auth = Authenticator::new(Arc::clone(&storage), Arc::clone(&directory));
        Self {
            storage,
            directory,
            roster,
            auth,
            config,
        }
    }
}

/// An academy node instance.
pub struct AcademyNode {
    state: Arc<AcademyState>,
    config: AcademyConfig,
}

impl AcademyNode {
    /// Create a new academy node.
    pub async fn new(config: AcademyConfig) -> Result<Self> {
        // Ensure data directory exists
        std::fs::create_dir_all(&config.data_dir)?;

        // Open single shared storage instance
        let storage = Arc::new(Storage::open(&config.data_dir)?);

        let state = Arc::new(AcademyState::new(storage, config.clone()));

        Ok(Self { state, config })
    }

    /// Get the shared state (for API handlers).
    pub fn state(&self) -> Arc<AcademyState> {
        Arc::clone(&self.state)
    }

    /// Run the node (starts HTTP server and admin socket).
    pub async fn run(self) -> Result<()> {
        tracing::info!("Academy node starting");
        tracing::info!("  API: http://{}", self.config.api_addr);
        tracing::info!("  Admin: {:?}", self.config.admin_socket);
        tracing::info!("  Data: {:?}", self.config.data_dir);

        // Start admin socket server in background
        let admin_socket = AdminSocket::new(
            Arc::clone(&self.state.directory),
            self.config
                .admin_socket
                .to_str()
                .unwrap_or("./tatame-data/admin.sock"),
            self.config.default_password.clone(),
        );
        tokio::spawn(async move {
            if let Err(e) = admin_socket.run().await {
                tracing::error!("Admin socket error: {}", e);
            }
        });

        // Build HTTP API
        let app = api::build_router(self.state());

        // Start HTTP server
        let listener = tokio::net::TcpListener::bind(self.config.api_addr).await?;
        tracing::info!("HTTP server listening on {}", self.config.api_addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
