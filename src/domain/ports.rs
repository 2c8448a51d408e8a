use crate::domain::model::{
    ChainId, GetSourceCodeResponse, VerificationSubmission, VerifySourceCodeResponse,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn source_timeout(&self) -> Duration;
    fn verify_timeout(&self) -> Duration;
}

/// Explorer contract API (Etherscan v2 shape).
#[async_trait]
pub trait ExplorerApi: Send + Sync {
    async fn get_source_code(
        &self,
        chain: &ChainId,
        address: &str,
        api_key: &str,
    ) -> Result<GetSourceCodeResponse>;

    async fn verify_source_code(
        &self,
        chain: &ChainId,
        submission: &VerificationSubmission,
        api_key: &str,
    ) -> Result<VerifySourceCodeResponse>;
}
