use crate::core::{ConfigProvider, ExplorerApi};
use crate::domain::model::{VerificationSubmission, VerifyRequest, VerifyResponse};
use crate::utils::error::{Result, VerifyError};

/// Copies a contract verification from a source chain to a target chain.
pub struct CrossChainVerifier<E: ExplorerApi, C: ConfigProvider> {
    explorer: E,
    config: C,
}

impl<E: ExplorerApi, C: ConfigProvider> CrossChainVerifier<E, C> {
    pub fn new(explorer: E, config: C) -> Self {
        Self { explorer, config }
    }

    /// Runs the verification and folds every failure into the flat
    /// `{status, error}` shape returned to callers.
    pub async fn handle(&self, request: VerifyRequest) -> VerifyResponse {
        match self.verify(request).await {
            Ok(guid) => VerifyResponse::ok(guid),
            Err(e) => {
                tracing::warn!("❌ Cross-chain verification failed: {}", e);
                VerifyResponse::error(e.to_string())
            }
        }
    }

    /// Returns the explorer's verification receipt on success.
    pub async fn verify(&self, request: VerifyRequest) -> Result<Option<String>> {
        let api_key = self
            .config
            .api_key()
            .filter(|key| !key.is_empty())
            .ok_or(VerifyError::MissingApiKey)?;

        let params = request.params().ok_or(VerifyError::MissingParameters)?;

        tracing::info!(
            "Fetching verified source of {} from chain {}",
            params.address,
            params.source_chain
        );
        let source = self
            .explorer
            .get_source_code(&params.source_chain, &params.address, api_key)
            .await?;

        if !source.is_ok() {
            return Err(VerifyError::upstream(source.error_text()));
        }

        let record = match source.first_record()? {
            Some(record) if !record.source_code.is_empty() => record,
            _ => return Err(VerifyError::EmptySourceCode),
        };

        let submission = VerificationSubmission::from_record(&params.address, record);
        tracing::debug!(
            "Submitting {} ({}, {}) to chain {}",
            submission.contractname,
            submission.codeformat.as_str(),
            submission.compilerversion,
            params.chain
        );

        let verify = self
            .explorer
            .verify_source_code(&params.chain, &submission, api_key)
            .await?;

        if verify.is_ok() {
            tracing::info!(
                "✅ Verification of {} submitted on chain {}",
                params.address,
                params.chain
            );
            return Ok(verify.guid().map(str::to_string));
        }

        Err(VerifyError::upstream(verify.error_text()))
    }
}
