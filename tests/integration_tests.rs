use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;
use xchain_verify::domain::model::ChainId;
use xchain_verify::{
    CrossChainVerifier, EtherscanClient, ExplorerSettings, VerifyRequest, VerifyResponse,
};

const ADDRESS: &str = "0x4200000000000000000000000000000000000006";

fn verifier_for(
    server: &MockServer,
    api_key: Option<&str>,
) -> CrossChainVerifier<EtherscanClient, ExplorerSettings> {
    let settings = ExplorerSettings {
        api_url: server.url("/v2/api"),
        api_key: api_key.map(str::to_string),
        ..ExplorerSettings::default()
    };
    CrossChainVerifier::new(EtherscanClient::new(&settings), settings)
}

fn request() -> VerifyRequest {
    VerifyRequest {
        chain: Some(ChainId::from(8453u64)),
        address: Some(ADDRESS.to_string()),
        source_chain: Some(ChainId::from(10u64)),
    }
}

#[tokio::test]
async fn test_end_to_end_standard_json_verification() {
    let server = MockServer::start();
    let standard_json = json!({
        "language": "Solidity",
        "sources": {"WETH9.sol": {"content": "contract WETH9 {}"}},
        "settings": {"optimizer": {"enabled": true, "runs": 10000}}
    })
    .to_string();

    let lookup_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/api")
            .query_param("chainid", "10")
            .query_param("action", "getsourcecode")
            .query_param("address", ADDRESS);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "status": "1",
                "message": "OK",
                "result": [{
                    "SourceCode": standard_json,
                    "ABI": "[]",
                    "ContractName": "WETH9",
                    "CompilerVersion": "v0.5.17+commit.d19bba13",
                    "OptimizationUsed": "1",
                    "Runs": "10000",
                    "ConstructorArguments": "",
                    "EVMVersion": "istanbul",
                    "Library": "",
                    "LicenseType": "MIT",
                    "Proxy": "0",
                    "Implementation": "",
                    "SwarmSource": ""
                }]
            }));
    });

    let verify_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/api")
            .query_param("chainid", "8453")
            .query_param("action", "verifysourcecode")
            .x_www_form_urlencoded_tuple("codeformat", "solidity-standard-json-input")
            .x_www_form_urlencoded_tuple("contractname", "WETH9")
            .x_www_form_urlencoded_tuple("evmVersion", "istanbul");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"status": "1", "message": "OK", "result": "receipt-guid"}));
    });

    let response = verifier_for(&server, Some("KEY")).handle(request()).await;

    lookup_mock.assert();
    verify_mock.assert();
    assert_eq!(response, VerifyResponse::ok(Some("receipt-guid".to_string())));
}

#[tokio::test]
async fn test_missing_api_key_makes_no_calls() {
    let server = MockServer::start();

    let any_mock = server.mock(|when, then| {
        when.path("/v2/api");
        then.status(200);
    });

    let response = verifier_for(&server, None).handle(request()).await;

    any_mock.assert_hits(0);
    assert_eq!(response, VerifyResponse::error("Missing ETHERSCAN_API_KEY"));
}

#[tokio::test]
async fn test_unverified_source_contract() {
    let server = MockServer::start();

    let lookup_mock = server.mock(|when, then| {
        when.method(GET).path("/v2/api");
        then.status(200).json_body(json!({
            "status": "1",
            "message": "OK",
            "result": [{"SourceCode": "", "ABI": "Contract source code not verified"}]
        }));
    });
    let verify_mock = server.mock(|when, then| {
        when.method(POST).path("/v2/api");
        then.status(200);
    });

    let response = verifier_for(&server, Some("KEY")).handle(request()).await;

    lookup_mock.assert();
    verify_mock.assert_hits(0);
    assert_eq!(response, VerifyResponse::error("Empty source code"));
}

#[tokio::test]
async fn test_upstream_rejection_is_passed_through() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v2/api");
        then.status(200).json_body(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Missing or unsupported chainid parameter"
        }));
    });

    let response = verifier_for(&server, Some("KEY")).handle(request()).await;

    assert_eq!(
        response,
        VerifyResponse::error("Missing or unsupported chainid parameter")
    );
}

#[tokio::test]
async fn test_verification_failure_is_passed_through() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v2/api");
        then.status(200).json_body(json!({
            "status": "1",
            "message": "OK",
            "result": [{"SourceCode": "contract A {}", "ContractName": "A"}]
        }));
    });
    server.mock(|when, then| {
        when.method(POST).path("/v2/api");
        then.status(200).json_body(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Unable to locate ContractCode at 0x4200000000000000000000000000000000000006"
        }));
    });

    let response = verifier_for(&server, Some("KEY")).handle(request()).await;

    assert!(!response.is_ok());
    assert_eq!(
        response.error.as_deref(),
        Some("Unable to locate ContractCode at 0x4200000000000000000000000000000000000006")
    );
}

#[tokio::test]
async fn test_transport_failure_becomes_error_response() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v2/api");
        then.status(500);
    });

    let response = verifier_for(&server, Some("SECRETKEY123"))
        .handle(request())
        .await;

    assert!(!response.is_ok());
    let error = response.error.unwrap();
    assert!(error.contains("500"), "unexpected error text: {}", error);
    assert!(!error.contains("SECRETKEY123"));
    assert!(!error.contains("apikey"));
}

#[tokio::test]
async fn test_lookup_timeout_does_not_leak_api_key() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v2/api");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(json!({"status": "1", "message": "OK", "result": []}));
    });

    let settings = ExplorerSettings {
        api_url: server.url("/v2/api"),
        api_key: Some("SECRETKEY123".to_string()),
        source_timeout_secs: 1,
        ..ExplorerSettings::default()
    };
    let verifier = CrossChainVerifier::new(EtherscanClient::new(&settings), settings);

    let response = verifier.handle(request()).await;

    assert!(!response.is_ok());
    let error = response.error.unwrap();
    assert!(!error.is_empty());
    assert!(!error.contains("SECRETKEY123"));
    assert!(!error.contains(&server.address().to_string()));
}

#[tokio::test]
async fn test_submission_failure_does_not_leak_api_key() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/v2/api");
        then.status(200).json_body(json!({
            "status": "1",
            "message": "OK",
            "result": [{"SourceCode": "contract A {}", "ContractName": "A"}]
        }));
    });
    let verify_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/api")
            .query_param("apikey", "SECRETKEY123");
        then.status(503);
    });

    let response = verifier_for(&server, Some("SECRETKEY123"))
        .handle(request())
        .await;

    verify_mock.assert();
    assert!(!response.is_ok());
    let error = response.error.unwrap();
    assert!(error.contains("503"), "unexpected error text: {}", error);
    assert!(!error.contains("SECRETKEY123"));
    assert!(!error.contains("apikey"));
}
