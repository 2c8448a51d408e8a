use crate::config::{ExplorerSettings, TomlConfig};
use crate::domain::model::{ChainId, VerifyRequest};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "xchain-verify")]
#[command(about = "Cross-verify contract source on a target chain using source verified on another chain")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "EXPLORER_API_URL", help = "Explorer API endpoint")]
    pub api_url: Option<String>,

    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "SOURCE_TIMEOUT_SECS")]
    pub source_timeout_secs: Option<u64>,

    #[arg(long, env = "VERIFY_TIMEOUT_SECS")]
    pub verify_timeout_secs: Option<u64>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve POST /api/verify
    Serve {
        #[arg(long, env = "BIND_ADDRESS")]
        bind: Option<String>,
    },
    /// Verify a single contract and print the JSON response
    Verify {
        #[arg(long, help = "Target chain id")]
        chain: String,
        #[arg(long, help = "Contract address")]
        address: String,
        #[arg(long, help = "Chain id where the source is already verified")]
        source_chain: String,
    },
}

impl CliConfig {
    fn file_config(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => TomlConfig::from_file(path),
            None => Ok(TomlConfig::default()),
        }
    }

    /// Flags win over the config file, which wins over defaults.
    pub fn settings(&self) -> Result<ExplorerSettings> {
        let base = self.file_config()?.explorer_settings();
        Ok(ExplorerSettings {
            api_url: self.api_url.clone().unwrap_or(base.api_url),
            api_key: self
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .or(base.api_key),
            source_timeout_secs: self.source_timeout_secs.unwrap_or(base.source_timeout_secs),
            verify_timeout_secs: self.verify_timeout_secs.unwrap_or(base.verify_timeout_secs),
        })
    }

    pub fn bind_address(&self) -> Result<String> {
        let file = self.file_config()?;
        Ok(match &self.command {
            Command::Serve { bind: Some(bind) } => bind.clone(),
            _ => file.bind_address().to_string(),
        })
    }

    /// The one-shot request described by the `verify` subcommand.
    pub fn verify_request(&self) -> Option<VerifyRequest> {
        match &self.command {
            Command::Verify {
                chain,
                address,
                source_chain,
            } => Some(VerifyRequest {
                chain: Some(ChainId::new(chain.as_str())),
                address: Some(address.clone()),
                source_chain: Some(ChainId::new(source_chain.as_str())),
            }),
            Command::Serve { .. } => None,
        }
    }
}
