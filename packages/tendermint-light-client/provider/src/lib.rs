#![doc = include_str!("../README.md")]
#![deny(missing_docs, clippy::nursery, clippy::pedantic)]

pub mod channel;
pub mod error;
pub mod height;
pub mod http;
pub mod provider;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use channel::{RpcChannel, ValidatorPage};
pub use error::ProviderError;
pub use height::QueryHeight;
pub use provider::{Provider, RpcProvider, DEFAULT_MAX_VALIDATOR_PAGES, VALIDATORS_PER_PAGE};
