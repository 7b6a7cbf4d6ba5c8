//! Defines the [`RpcChannel`] trait a provider fetches its data through.

use async_trait::async_trait;
use tendermint::{block::Height, validator};
use tendermint_rpc::endpoint::{commit, validators};

use crate::height::QueryHeight;

/// One page of a paginated validators query.
#[derive(Clone, Debug, Default)]
pub struct ValidatorPage {
    /// The validators on this page, in the order the remote returned them.
    pub validators: Vec<validator::Info>,
    /// The number of validators across all pages, as reported by the remote.
    pub total: usize,
    /// The height the page was read at, as reported by the remote.
    pub height: Height,
}

impl From<validators::Response> for ValidatorPage {
    fn from(response: validators::Response) -> Self {
        Self {
            total: usize::try_from(response.total).unwrap_or_default(),
            height: response.block_height,
            validators: response.validators,
        }
    }
}

/// The request/response channel to a single full node.
///
/// Implementations only move data; chain id checks and pagination are done by
/// the provider on top of it. Timeouts, if any, are a concern of the channel.
#[async_trait]
pub trait RpcChannel: Send + Sync {
    /// The error returned when a request fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the signed header at `height`.
    async fn fetch_commit(&self, height: QueryHeight) -> Result<commit::Response, Self::Error>;

    /// Fetch one page of the validator set at `height`.
    /// Pages are 1-indexed.
    async fn fetch_validators(
        &self,
        height: QueryHeight,
        page: usize,
        per_page: u8,
    ) -> Result<ValidatorPage, Self::Error>;
}
