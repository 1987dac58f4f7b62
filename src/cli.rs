use clap::{Parser, Subcommand, ValueEnum};
use portcall::domain::ManifestDirection;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portcall")]
#[command(about = "Port call manager - visit notification lifecycle and daily berth schedules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (default: .portcall/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[arg(long, global = true)]
    pub gateway_url: Option<String>,

    #[arg(long, global = true, value_enum, default_value = "json")]
    pub output: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check the approved calls of one day for berth conflicts
    Schedule {
        /// Calendar day, YYYY-MM-DD
        #[arg(short, long)]
        date: String,

        /// Bearer token for the port data store (falls back to PORTCALL_TOKEN)
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Manage visit notifications
    Notification {
        #[command(subcommand)]
        action: NotificationAction,
    },

    /// Initialize database schema
    InitDb {
        /// Schema script to apply instead of the bundled one
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum NotificationAction {
    Create {
        #[arg(long)]
        vessel: String,
        #[arg(long, default_value_t = false)]
        hazardous: bool,
    },
    Show {
        id: String,
    },
    /// Set the call window (RFC 3339 timestamps; omit to clear)
    Dates {
        id: String,
        #[arg(long)]
        arrival: Option<String>,
        #[arg(long)]
        departure: Option<String>,
    },
    /// Put a cargo manifest read from a JSON file into a slot
    SetManifest {
        id: String,
        #[arg(long, value_enum)]
        direction: DirectionArg,
        #[arg(long)]
        file: PathBuf,
    },
    RemoveManifest {
        id: String,
        #[arg(long, value_enum)]
        direction: DirectionArg,
    },
    Submit {
        id: String,
    },
    Accept {
        id: String,
    },
    Approve {
        id: String,
        #[arg(long)]
        berth: String,
        #[arg(long)]
        officer: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        officer: String,
    },
    Resubmit {
        id: String,
    },
    /// Turn a rejected notification back into a draft
    Draft {
        id: String,
    },
    /// Replace the dates of a rejected notification and reopen it as a draft
    Reopen {
        id: String,
        #[arg(long)]
        arrival: Option<String>,
        #[arg(long)]
        departure: Option<String>,
    },
    Delete {
        id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum DirectionArg {
    Load,
    Unload,
}

impl From<DirectionArg> for ManifestDirection {
    fn from(direction: DirectionArg) -> Self {
        match direction {
            DirectionArg::Load => Self::Load,
            DirectionArg::Unload => Self::Unload,
        }
    }
}

#[derive(Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::{Cli, Commands, NotificationAction, OutputFormat};
    use clap::Parser;

    #[test]
    fn schedule_parses_date_and_global_flags() {
        let cli = Cli::try_parse_from([
            "portcall",
            "schedule",
            "--date",
            "2026-03-14",
            "--output",
            "text",
            "--gateway-url",
            "http://gw/",
        ])
        .expect("schedule arguments should parse");

        assert_eq!(cli.output, OutputFormat::Text);
        assert_eq!(cli.gateway_url.as_deref(), Some("http://gw/"));
        assert!(matches!(
            cli.command,
            Commands::Schedule { ref date, token: None } if date == "2026-03-14"
        ));
    }

    #[test]
    fn approve_requires_berth_and_officer() {
        let missing = Cli::try_parse_from(["portcall", "notification", "approve", "vn-1"]);
        let full = Cli::try_parse_from([
            "portcall",
            "notification",
            "approve",
            "vn-1",
            "--berth",
            "b-1",
            "--officer",
            "o-1",
        ]);

        assert!(missing.is_err());
        assert!(matches!(
            full.map(|cli| cli.command),
            Ok(Commands::Notification {
                action: NotificationAction::Approve { .. }
            })
        ));
    }
}
