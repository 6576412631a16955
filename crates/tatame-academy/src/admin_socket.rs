//! Unix socket server for admin commands.
//!
//! Provides a local IPC interface for bootstrapping accounts: the first
//! teacher has to exist before any HTTP login is possible.

use crate::directory::UserDirectory;
use crate::error::Result;
use crate::models::Role;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

/// Admin command sent over the socket.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum AdminCommand {
    /// Provision a teacher account
    AddTeacher {
        email: String,
        name: String,
        password: Option<String>,
    },
    /// Change an account's role
    SetRole { uid: String, role: Role },
    /// List all accounts
    ListAccounts,
    /// Ping (health check)
    Ping,
}

/// Response from admin command.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdminResponse {
    Ok { message: String },
    Error { error: String },
    List { items: Vec<String> },
    Pong,
}

/// Admin socket server.
pub struct AdminSocket {
    directory: Arc<UserDirectory>,
    socket_path: String,
    default_password: String,
}

impl AdminSocket {
    /// Create a new admin socket server.
    pub fn new(directory: Arc<UserDirectory>, socket_path: &str, default_password: String) -> Self {
        Self {
            directory,
            socket_path: socket_path.to_string(),
            default_password,
        }
    }

    /// Run the admin socket server.
    pub async fn run(&self) -> Result<()> {
        // Remove existing socket file if present
        let _ = std::fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;
        tracing::info!("Admin socket listening on {}", self.socket_path);

        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    let directory = Arc::clone(&self.directory);
                    let default_password = self.default_password.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, directory, default_password).await
                        {
                            tracing::error!("Admin connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to accept admin connection: {}", e);
                }
            }
        }
    }

    /// Get the socket path.
    pub fn socket_path(&self) -> &str {
        &self.socket_path
    }
}

async fn handle_connection(
    stream: UnixStream,
    directory: Arc<UserDirectory>,
    default_password: String,
) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    while reader.read_line(&mut line).await? > 0 {
        let response = match serde_json::from_str::<AdminCommand>(&line) {
            Ok(cmd) => execute_command(cmd, &directory, &default_password),
            Err(e) => AdminResponse::Error {
                error: format!("Invalid command: {}", e),
            },
        };

        let response_json = serde_json::to_string(&response)? + "\n";
        writer.write_all(response_json.as_bytes()).await?;
        line.clear();
    }

    Ok(())
}

fn execute_command(
    cmd: AdminCommand,
    directory: &Arc<UserDirectory>,
    default_password: &str,
) -> AdminResponse {
    match cmd {
        AdminCommand::AddTeacher {
            email,
            name,
            password,
        } => {
            let password = password.unwrap_or_else(|| default_password.to_string());
            match directory.create_account(&email, &name, Role::Teacher, &password) {
                Ok(account) => AdminResponse::Ok {
                    message: format!("Added teacher: {} ({})", account.email, account.uid),
                },
                Err(e) => AdminResponse::Error {
                    error: e.to_string(),
                },
            }
        }

        AdminCommand::SetRole { uid, role } => match directory.set_role(&uid, role) {
            Ok(()) => AdminResponse::Ok {
                message: format!("Set role {} on {}", role.as_str(), uid),
            },
            Err(e) => AdminResponse::Error {
                error: e.to_string(),
            },
        },

        AdminCommand::ListAccounts => match directory.list_accounts() {
            Ok(accounts) => AdminResponse::List {
                items: accounts
                    .into_iter()
                    .map(|a| format!("{}  {}  {}  {}", a.uid, a.role.as_str(), a.email, a.name))
                    .collect(),
            },
            Err(e) => AdminResponse::Error {
                error: e.to_string(),
            },
        },

        AdminCommand::Ping => AdminResponse::Pong,
    }
}

/// Default socket path.
pub fn default_socket_path() -> String {
    let data_dir = std::env::var("TATAME_DATA_DIR").unwrap_or_else(|_| "./tatame-data".to_string());
    format!("{}/admin.sock", data_dir)
}
