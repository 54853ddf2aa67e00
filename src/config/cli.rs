use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::domain::model::{ConfigPatch, LargeFileQuery, QueryParams};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "winclean")]
#[command(about = "Command-line client for the Windows Cleaner backend")]
pub struct Cli {
    /// Backend origin, e.g. http://127.0.0.1:8765
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// TOML file with a [client] table
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines on stderr")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List fixed drives with usage
    Drives,
    /// Usage for one drive, e.g. `C:`
    Usage { drive: String },
    /// Read or update backend settings
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Query the large-file index
    LargeFiles(LargeFilesArgs),
    /// Start a background index rebuild for a drive
    RebuildIndex { drive: String },
    /// Backend liveness
    Health,
    /// Open the native folder picker on the backend host
    PickFolder {
        #[arg(long, default_value = "")]
        initial_dir: String,
    },
    /// List navigable pages
    Routes,
    /// Render the page mounted at PATH
    View {
        #[arg(default_value = "/")]
        path: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    Get,
    /// Apply KEY=VALUE pairs; values are parsed as JSON when possible
    Set {
        #[arg(required = true, value_parser = parse_key_value)]
        pairs: Vec<(String, Value)>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct LargeFilesArgs {
    #[arg(long)]
    pub drive: Option<String>,

    #[arg(long)]
    pub min_size_mb: Option<f64>,

    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub offset: Option<u32>,

    /// Extra query parameter, passed through untouched
    #[arg(long = "param", value_parser = parse_key_value)]
    pub params: Vec<(String, Value)>,
}

impl LargeFilesArgs {
    pub fn to_params(&self) -> QueryParams {
        let query = LargeFileQuery {
            drive: self.drive.clone(),
            min_size_mb: self.min_size_mb,
            extensions: self.extensions.clone(),
            limit: self.limit,
            offset: self.offset,
        };
        let mut params = query.into_params();
        params.extend(self.params.iter().cloned());
        params
    }
}

pub fn patch_from_pairs(pairs: &[(String, Value)]) -> ConfigPatch {
    pairs.iter().cloned().collect()
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

impl Cli {
    /// Defaults, then the TOML file, then flags.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_client_config(),
            None => ClientConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("start_with_windows=true").unwrap(),
            ("start_with_windows".to_string(), json!(true))
        );
        assert_eq!(
            parse_key_value("on_close=quit").unwrap(),
            ("on_close".to_string(), json!("quit"))
        );
        assert_eq!(
            parse_key_value("disk_thresholds=[]").unwrap().1,
            json!([])
        );
        assert!(parse_key_value("no-equals").is_err());
        assert!(parse_key_value("=1").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "winclean",
            "--base-url",
            "http://10.0.0.2:8765",
            "--timeout",
            "5",
            "health",
        ]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8765");
        assert_eq!(config.timeout_seconds, 5);
        assert!(matches!(cli.command, Command::Health));
    }

    #[test]
    fn test_large_files_args() {
        let cli = Cli::parse_from([
            "winclean",
            "large-files",
            "--min-size-mb",
            "100",
            "--extensions",
            "mp4,iso",
            "--param",
            "minSizeMb=100",
        ]);
        let Command::LargeFiles(args) = cli.command else {
            panic!("expected large-files");
        };
        let params = args.to_params();
        assert_eq!(params["min_size_mb"], json!(100));
        assert_eq!(params["extensions"], json!("mp4,iso"));
        assert_eq!(params["minSizeMb"], json!(100));
        assert!(!params.contains_key("drive"));
    }

    #[test]
    fn test_config_set_requires_pairs() {
        assert!(Cli::try_parse_from(["winclean", "config", "set"]).is_err());
        let cli = Cli::parse_from(["winclean", "config", "set", "on_close=quit"]);
        let Command::Config(ConfigCommand::Set { pairs }) = cli.command else {
            panic!("expected config set");
        };
        assert_eq!(patch_from_pairs(&pairs)["on_close"], json!("quit"));
    }
}
