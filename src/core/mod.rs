pub mod verifier;

pub use crate::domain::model::{VerifyRequest, VerifyResponse};
pub use crate::domain::ports::{ConfigProvider, ExplorerApi};
pub use crate::utils::error::Result;
