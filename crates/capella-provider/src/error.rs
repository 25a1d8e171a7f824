//! Provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid value for \"{attribute}\": expected one of {expected}")]
    InvalidValue {
        attribute: &'static str,
        expected: String,
    },
}

pub type Result<T> = std::result::Result<T, ProviderError>;
