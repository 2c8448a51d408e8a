pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{http::router, EtherscanClient};
pub use config::{ExplorerSettings, TomlConfig};
pub use core::verifier::CrossChainVerifier;
pub use domain::model::{VerifyRequest, VerifyResponse};
pub use utils::error::{Result, VerifyError};
