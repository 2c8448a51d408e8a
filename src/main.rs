use clap::Parser;
use std::sync::Arc;
use xchain_verify::adapters::http;
use xchain_verify::utils::logger;
use xchain_verify::utils::validation::{validate_socket_addr, Validate};
use xchain_verify::{CliConfig, Command, CrossChainVerifier, EtherscanClient, VerifyError};

fn exit_with(e: &VerifyError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(if e.is_config_error() { 2 } else { 1 });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting xchain-verify");

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };
    if config.verbose {
        tracing::debug!("Explorer settings: {:?}", settings);
    }

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let explorer = EtherscanClient::new(&settings);
    let verifier = Arc::new(CrossChainVerifier::new(explorer, settings));

    match &config.command {
        Command::Serve { .. } => {
            let bind = match config
                .bind_address()
                .and_then(|bind| validate_socket_addr("bind", &bind).map(|_| bind))
            {
                Ok(bind) => bind,
                Err(e) => exit_with(&e),
            };
            http::serve(verifier, &bind).await?;
        }
        Command::Verify { .. } => {
            let request = config.verify_request().unwrap_or_default();
            let response = verifier.handle(request).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            if !response.is_ok() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
