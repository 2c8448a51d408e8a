use crate::domain::model::{
    ChainId, GetSourceCodeResponse, VerificationSubmission, VerifySourceCodeResponse,
};
use crate::domain::ports::{ConfigProvider, ExplorerApi};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.etherscan.io/v2/api";

/// reqwest client for the Etherscan v2 multichain contract API.
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    client: Client,
    api_url: String,
    source_timeout: Duration,
    verify_timeout: Duration,
}

impl EtherscanClient {
    pub fn new(config: &impl ConfigProvider) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url().to_string(),
            source_timeout: config.source_timeout(),
            verify_timeout: config.verify_timeout(),
        }
    }
}

#[async_trait]
impl ExplorerApi for EtherscanClient {
    async fn get_source_code(
        &self,
        chain: &ChainId,
        address: &str,
        api_key: &str,
    ) -> Result<GetSourceCodeResponse> {
        tracing::debug!(
            "GET {} action=getsourcecode chainid={} address={}",
            self.api_url,
            chain,
            address
        );

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("chainid", chain.as_str()),
                ("module", "contract"),
                ("action", "getsourcecode"),
                ("address", address),
                ("apikey", api_key),
            ])
            .timeout(self.source_timeout)
            .send()
            .await?;

        tracing::debug!("getsourcecode response status: {}", response.status());
        let source = response.error_for_status()?.json().await?;
        Ok(source)
    }

    async fn verify_source_code(
        &self,
        chain: &ChainId,
        submission: &VerificationSubmission,
        api_key: &str,
    ) -> Result<VerifySourceCodeResponse> {
        tracing::debug!(
            "POST {} action=verifysourcecode chainid={} codeformat={}",
            self.api_url,
            chain,
            submission.codeformat.as_str()
        );

        let response = self
            .client
            .post(&self.api_url)
            .query(&[
                ("chainid", chain.as_str()),
                ("module", "contract"),
                ("action", "verifysourcecode"),
                ("apikey", api_key),
            ])
            .form(submission)
            .timeout(self.verify_timeout)
            .send()
            .await?;

        tracing::debug!("verifysourcecode response status: {}", response.status());
        let verify = response.error_for_status()?.json().await?;
        Ok(verify)
    }
}
