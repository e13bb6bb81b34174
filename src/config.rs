use std::path::PathBuf;

use clap::Parser;

use crate::controllers::DEFAULT_API_BASE_URL;

/// Shopping list with a recipe lookup screen
#[derive(Parser, Debug, Clone)]
#[command(name = "shoplist", version, about)]
pub struct Config {
    /// SQLite database holding the saved list
    #[arg(long, default_value = "sqlite://shoplist.db")]
    pub database_url: String,

    /// Base URL of the meal lookup API
    #[arg(long, default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Log file (the terminal is taken by the UI). Verbosity follows RUST_LOG.
    #[arg(long, default_value = "shoplist.log")]
    pub log_file: PathBuf,

    /// Keep the list in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,

    /// Open the recipe screen for this meal id on start
    #[arg(long)]
    pub meal: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["shoplist"]);

        assert_eq!(config.database_url, "sqlite://shoplist.db");
        assert_eq!(config.api_base_url, "https://www.themealdb.com/api/json/v1/1");
        assert_eq!(config.log_file, PathBuf::from("shoplist.log"));
        assert!(!config.ephemeral);
        assert_eq!(config.meal, None);
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from([
            "shoplist",
            "--database-url",
            "sqlite://other.db",
            "--ephemeral",
            "--meal",
            "52772",
        ]);

        assert_eq!(config.database_url, "sqlite://other.db");
        assert!(config.ephemeral);
        assert_eq!(config.meal.as_deref(), Some("52772"));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
