#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use std::sync::Arc;
#[cfg(feature = "lambda")]
use xchain_verify::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use xchain_verify::{
    CrossChainVerifier, EtherscanClient, ExplorerSettings, VerifyRequest, VerifyResponse,
};

#[cfg(feature = "lambda")]
type Verifier = CrossChainVerifier<EtherscanClient, ExplorerSettings>;

#[cfg(feature = "lambda")]
async fn function_handler(
    verifier: &Verifier,
    event: LambdaEvent<VerifyRequest>,
) -> Result<VerifyResponse, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling verify event");
    Ok(verifier.handle(event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let settings = ExplorerSettings::from_env()?;
    settings.validate()?;

    let explorer = EtherscanClient::new(&settings);
    let verifier = Arc::new(CrossChainVerifier::new(explorer, settings));

    run(service_fn(move |event: LambdaEvent<VerifyRequest>| {
        let verifier = Arc::clone(&verifier);
        async move { function_handler(&verifier, event).await }
    }))
    .await
}
