// Error type shared by the CLI flow and the API client, plus the code that
// turns it into something readable on stderr and an exit status.

use std::path::PathBuf;

use crossterm::style::Stylize;
use thiserror::Error;

use crate::rooms::RoomSpecError;

/// Exit status for bad input (arguments, room descriptions).
pub const EXIT_USAGE: i32 = 2;
/// Exit status for everything else.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Rooms(#[from] RoomSpecError),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Login failed: invalid admin credentials")]
    InvalidCredentials,

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Not running in a terminal: {0}")]
    NotInteractive(&'static str),

    #[error("Aborted by user")]
    Aborted,

    #[error("Failed to write credentials to {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Rooms(_) | AppError::InvalidArgument(_) | AppError::NotInteractive(_) => {
                EXIT_USAGE
            }
            _ => EXIT_FAILURE,
        }
    }

    fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::InvalidCredentials => Some(
                "Check --admin-room and --admin-password (or LAUNDRY_APP_ADMIN_PASSWORD).",
            ),
            AppError::Api { status: 403, .. } => {
                Some("The admin account needs the MASTER_ADMIN role to generate users.")
            }
            AppError::Network(_) => Some("Check that the backend is reachable at --host."),
            AppError::Output { .. } => {
                Some("The generated passwords are in the table above; save them before retrying.")
            }
            _ => None,
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &AppError) {
    eprintln!("{} {}", "Error:".red().bold(), err);
    if let Some(hint) = err.hint() {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_use_usage_exit_code() {
        assert_eq!(AppError::from(RoomSpecError::NoRoomsProvided).exit_code(), 2);
        assert_eq!(AppError::InvalidArgument("x".into()).exit_code(), 2);
        assert_eq!(AppError::NotInteractive("pass --yes").exit_code(), 2);
    }

    #[test]
    fn remote_errors_use_failure_exit_code() {
        assert_eq!(AppError::InvalidCredentials.exit_code(), 1);
        let api = AppError::Api {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(api.exit_code(), 1);
        assert_eq!(api.to_string(), "API error (500): boom");
    }
}
