use crate::config::Config;
use crate::error::Result;
use crate::report::layout::HEADERS;
use crate::sheets::token_cache_path;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration, cache and token paths
    Paths,
    /// Print the CSV header expected by `export`
    CsvHeader,
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(),
            ShowResource::CsvHeader => {
                println!("{}", HEADERS.join(","));
                Ok(())
            }
        }
    }
}

fn show_paths() -> Result<()> {
    let config_path = Config::config_file()?;
    let cache_dir = Config::cache_dir()?;
    let token_path = token_cache_path()?;

    info!(path = ?config_path, "Config path");
    info!(path = ?cache_dir, "Cache path");
    info!(path = ?token_path, "Google token path");

    Ok(())
}
