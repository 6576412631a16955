//! academy-admin CLI tool
//!
//! Manages accounts for the academy node over its local admin socket.
//!
//! Usage:
//!   academy-admin add-teacher <email> <name> [password]
//!   academy-admin set-role <uid> <teacher|student>
//!   academy-admin list-accounts
//!   academy-admin ping

use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Admin command sent over the socket.
#[derive(Debug, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum AdminCommand {
    AddTeacher {
        email: String,
        name: String,
        password: Option<String>,
    },
    SetRole {
        uid: String,
        role: String,
    },
    ListAccounts,
    Ping,
}

/// Response from admin command.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum AdminResponse {
    Ok { message: String },
    Error { error: String },
    List { items: Vec<String> },
    Pong,
}

fn print_usage() {
    eprintln!("academy-admin - Manage academy node accounts");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  academy-admin add-teacher <email> <name> [password]   Provision a teacher account");
    eprintln!("  academy-admin set-role <uid> <teacher|student>        Change an account's role");
    eprintln!("  academy-admin list-accounts                           List all accounts");
    eprintln!("  academy-admin ping                                    Check if daemon is running");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TATAME_ADMIN_SOCKET  Path to admin socket (default: ./tatame-data/admin.sock)");
}

fn get_socket_path() -> PathBuf {
    std::env::var("TATAME_ADMIN_SOCKET")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./tatame-data/admin.sock"))
}

fn send_command(cmd: AdminCommand) -> Result<AdminResponse, String> {
    let socket_path = get_socket_path();

    let mut stream = UnixStream::connect(&socket_path).map_err(|e| {
        format!(
            "Failed to connect to academy-node at {:?}: {}\n\
             Is the academy-node running?",
            socket_path, e
        )
    })?;

    // Send command
    let cmd_json = serde_json::to_string(&cmd).map_err(|e| e.to_string())?;
    writeln!(stream, "{}", cmd_json).map_err(|e| e.to_string())?;

    // Read response
    let mut reader = BufReader::new(&stream);
    let mut response_line = String::new();
    reader
        .read_line(&mut response_line)
        .map_err(|e| e.to_string())?;

    serde_json::from_str(&response_line).map_err(|e| format!("Invalid response: {}", e))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let cmd = match args[1].as_str() {
        "add-teacher" => {
            if args.len() < 4 {
                eprintln!("Error: add-teacher requires <email> and <name> arguments");
                std::process::exit(1);
            }
            AdminCommand::AddTeacher {
                email: args[2].clone(),
                name: args[3].clone(),
                password: args.get(4).cloned(),
            }
        }
        "set-role" => {
            if args.len() < 4 {
                eprintln!("Error: set-role requires <uid> and <role> arguments");
                std::process::exit(1);
            }
            let role = args[3].as_str();
            if role != "teacher" && role != "student" {
                eprintln!("Error: role must be 'teacher' or 'student'");
                std::process::exit(1);
            }
            AdminCommand::SetRole {
                uid: args[2].clone(),
                role: role.to_string(),
            }
        }
        "list-accounts" => AdminCommand::ListAccounts,
        "ping" => AdminCommand::Ping,
        "-h" | "--help" | "help" => {
            print_usage();
            std::process::exit(0);
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    };

    match send_command(cmd) {
        Ok(response) => match response {
            AdminResponse::Ok { message } => {
                println!("{}", message);
            }
            AdminResponse::Error { error } => {
                eprintln!("Error: {}", error);
                std::process::exit(1);
            }
            AdminResponse::List { items } => {
                if items.is_empty() {
                    println!("(none)");
                } else {
                    for item in items {
                        println!("{}", item);
                    }
                }
            }
            AdminResponse::Pong => {
                println!("pong - academy-node is running");
            }
        },
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
