// Adapters layer: concrete implementations for external systems (explorer API, HTTP surface).

pub mod explorer;
pub mod http;

pub use explorer::{EtherscanClient, DEFAULT_API_URL};
