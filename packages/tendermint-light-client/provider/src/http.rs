//! [`RpcChannel`] over the tendermint JSON-RPC HTTP client.

use async_trait::async_trait;
use tendermint_rpc::{
    endpoint::{commit, validators},
    Client, PageNumber, PerPage,
};

pub use tendermint_rpc::HttpClient;

use crate::{
    channel::{RpcChannel, ValidatorPage},
    error::ProviderError,
    height::QueryHeight,
    provider::RpcProvider,
};

#[async_trait]
impl RpcChannel for HttpClient {
    type Error = tendermint_rpc::Error;

    async fn fetch_commit(&self, height: QueryHeight) -> Result<commit::Response, Self::Error> {
        match height {
            QueryHeight::Latest => self.latest_commit().await,
            QueryHeight::Specific(height) => self.commit(height).await,
        }
    }

    async fn fetch_validators(
        &self,
        height: QueryHeight,
        page: usize,
        per_page: u8,
    ) -> Result<ValidatorPage, Self::Error> {
        // `Client::validators` always sends a height, latest needs it omitted
        let request = validators::Request::new(
            height.into(),
            Some(PageNumber::from(page)),
            Some(PerPage::from(per_page)),
        );

        Ok(self.perform(request).await?.into())
    }
}

impl RpcProvider<HttpClient> {
    /// Create a provider talking to the full node at `rpc_url`.
    ///
    /// # Errors
    /// Returns [`ProviderError::Transport`] if the url cannot be used to build a client.
    pub fn from_rpc_url(chain_id: impl Into<String>, rpc_url: &str) -> Result<Self, ProviderError> {
        let client = HttpClient::new(rpc_url).map_err(ProviderError::transport)?;
        Ok(Self::new(chain_id, client))
    }
}

#[cfg(test)]
mod tests {
    use crate::Provider;

    use super::*;

    #[test]
    fn builds_provider_from_url() {
        let provider = RpcProvider::from_rpc_url("cosmoshub-4", "http://localhost:26657").unwrap();
        assert_eq!(provider.chain_id(), "cosmoshub-4");
    }

    #[test]
    fn rejects_malformed_url() {
        let res = RpcProvider::from_rpc_url("cosmoshub-4", "not a url");
        assert!(matches!(res, Err(ProviderError::Transport(_))));
    }
}
