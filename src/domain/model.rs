use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Explorer chain identifier. Callers send either `"8453"` or `8453`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Renders a request field as text. `null`, `false`, `0` and `""` count as
/// absent; every other value is kept, whatever its JSON type.
fn field_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                (i != 0).then(|| i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f == 0.0 || f.is_nan() {
                    None
                } else if f.fract() == 0.0 && f.abs() < 1e15 {
                    // 1.0 與 JS 一樣輸出為 "1"
                    Some(format!("{}", f as i64))
                } else {
                    Some(n.to_string())
                }
            }
        }
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(field_text(Value::deserialize(deserializer)?))
}

fn lenient_chain<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ChainId>, D::Error> {
    Ok(field_text(Value::deserialize(deserializer)?).map(ChainId))
}

/// Incoming body of a cross-verification request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(default, deserialize_with = "lenient_chain")]
    pub chain: Option<ChainId>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, rename = "sourceChain", deserialize_with = "lenient_chain")]
    pub source_chain: Option<ChainId>,
}

/// A request whose three fields are all present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyParams {
    pub chain: ChainId,
    pub address: String,
    pub source_chain: ChainId,
}

impl VerifyRequest {
    /// Lenient body parsing: an empty body, or one that is not a JSON object,
    /// yields a request with every field missing.
    pub fn from_body(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
            Ok(_) => Self::default(),
            Err(e) => {
                tracing::debug!("Ignoring unparseable request body: {}", e);
                Self::default()
            }
        }
    }

    pub fn params(&self) -> Option<VerifyParams> {
        let chain = self.chain.clone().filter(|c| !c.is_empty())?;
        let address = self.address.clone().filter(|a| !a.is_empty())?;
        let source_chain = self.source_chain.clone().filter(|c| !c.is_empty())?;
        Some(VerifyParams {
            chain,
            address,
            source_chain,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
}

impl VerifyResponse {
    pub fn ok(guid: Option<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            error: None,
            guid,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            error: Some(message.into()),
            guid: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

/// `module=contract&action=getsourcecode` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSourceCodeResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub result: serde_json::Value,
}

impl GetSourceCodeResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "1" && self.message == "OK"
    }

    /// Text reported to the caller when the explorer refused the lookup.
    pub fn error_text(&self) -> String {
        match &self.result {
            Value::Array(_) => self.result.to_string(),
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Null | Value::String(_) | Value::Bool(false) => self.message.clone(),
            Value::Number(n) if n.as_f64() == Some(0.0) => self.message.clone(),
            other => other.to_string(),
        }
    }

    /// First record of a successful lookup, if the result carries one.
    pub fn first_record(&self) -> serde_json::Result<Option<SourceCodeRecord>> {
        match &self.result {
            Value::Array(items) => items
                .first()
                .map(|item| serde_json::from_value(item.clone()))
                .transpose(),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SourceCodeRecord {
    pub source_code: String,
    #[serde(rename = "ABI")]
    pub abi: String,
    pub contract_name: String,
    pub compiler_version: String,
    pub optimization_used: String,
    pub runs: String,
    pub constructor_arguments: String,
    #[serde(rename = "EVMVersion")]
    pub evm_version: String,
    pub library: String,
    pub license_type: String,
    pub proxy: String,
    pub implementation: String,
    pub swarm_source: String,
}

/// `module=contract&action=verifysourcecode` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySourceCodeResponse {
    pub status: String,
    pub message: String,
    #[serde(default)]
    pub result: Option<String>,
}

impl VerifySourceCodeResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    /// Verification receipt returned on a successful submission.
    pub fn guid(&self) -> Option<&str> {
        self.result.as_deref().filter(|guid| !guid.is_empty())
    }

    pub fn error_text(&self) -> String {
        match self.result.as_deref() {
            Some(result) if !result.is_empty() => result.to_string(),
            _ => self.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeFormat {
    #[serde(rename = "solidity-standard-json-input")]
    StandardJsonInput,
    #[serde(rename = "solidity-single-file")]
    SingleFile,
}

impl CodeFormat {
    /// Source that parses as JSON is a standard-json-input bundle; anything
    /// else is submitted as a flattened single file.
    pub fn detect(source_code: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(source_code) {
            Ok(_) => Self::StandardJsonInput,
            Err(_) => Self::SingleFile,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StandardJsonInput => "solidity-standard-json-input",
            Self::SingleFile => "solidity-single-file",
        }
    }
}

/// Form body of a `verifysourcecode` submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationSubmission {
    pub codeformat: CodeFormat,
    pub contractaddress: String,
    #[serde(rename = "sourceCode")]
    pub source_code: String,
    pub contractname: String,
    pub compilerversion: String,
    #[serde(rename = "optimizationUsed")]
    pub optimization_used: String,
    pub runs: String,
    // Etherscan 的欄位名稱本身就拼錯
    #[serde(rename = "constructorArguements")]
    pub constructor_arguments: String,
    #[serde(rename = "evmVersion")]
    pub evm_version: String,
    #[serde(rename = "licenseType")]
    pub license_type: String,
}

impl VerificationSubmission {
    pub fn from_record(address: &str, record: SourceCodeRecord) -> Self {
        Self {
            codeformat: CodeFormat::detect(&record.source_code),
            contractaddress: address.to_string(),
            source_code: record.source_code,
            contractname: record.contract_name,
            compilerversion: record.compiler_version,
            optimization_used: record.optimization_used,
            runs: record.runs,
            constructor_arguments: record.constructor_arguments,
            evm_version: record.evm_version,
            license_type: record.license_type,
        }
    }
}
