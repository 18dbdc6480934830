mod auth;
mod export;
mod show;

use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use auth::AuthProvider;
pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "payout-report")]
#[command(about = "Export article payouts to a new Google Spreadsheet", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Export { file, json } => export::execute(file, *json).await,
            Commands::Auth { provider, reset } => provider.execute(*reset).await,
            Commands::Show { resource } => resource.execute().await,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export payout records from a CSV or JSON file
    Export {
        /// Path to a .csv or .json file of payout records
        file: PathBuf,

        /// Print the export result as JSON on stdout
        #[arg(long)]
        json: bool,
    },
    /// Authenticate with an external provider
    Auth {
        #[command(subcommand)]
        provider: AuthProvider,

        /// Clear cached tokens before authenticating
        #[arg(long, global = true)]
        reset: bool,
    },
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from(["payout-report", "export", "payouts.csv", "--json"]).unwrap();
        match cli.command {
            Commands::Export { file, json } => {
                assert_eq!(file, PathBuf::from("payouts.csv"));
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_auth_reset() {
        let cli = Cli::try_parse_from(["payout-report", "auth", "google", "--reset"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Auth {
                provider: AuthProvider::Google,
                reset: true
            }
        ));
    }
}
