//! Defines the [`Provider`] contract and [`RpcProvider`], its implementation on
//! top of an [`RpcChannel`].

use std::num::NonZeroUsize;

use async_trait::async_trait;
use tendermint::{block::signed_header::SignedHeader, validator, vote};

use crate::{channel::RpcChannel, error::ProviderError, height::QueryHeight};

/// Number of validators requested per page.
pub const VALIDATORS_PER_PAGE: u8 = 100;

/// Default cap on the number of validator pages fetched for a single set.
pub const DEFAULT_MAX_VALIDATOR_PAGES: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(max) => max,
    None => unreachable!(),
};

/// A single source of signed headers and validator sets for one chain.
///
/// A height of `0` asks for the latest height, negative heights are rejected.
#[async_trait]
pub trait Provider: Send + Sync {
    /// The chain id this provider serves.
    fn chain_id(&self) -> &str;

    /// Fetch the signed header at `height`.
    ///
    /// # Errors
    /// Returns an error if the height is negative, the request fails or the
    /// header belongs to another chain.
    async fn signed_header(&self, height: i64) -> Result<SignedHeader, ProviderError>;

    /// Fetch the complete validator set at `height`.
    ///
    /// # Errors
    /// Returns an error if the height is negative or any page request fails.
    /// No partial set is ever returned.
    async fn validator_set(&self, height: i64) -> Result<validator::Set, ProviderError>;
}

/// A [`Provider`] backed by a single full node reached through `C`.
#[derive(Clone, Debug)]
pub struct RpcProvider<C> {
    chain_id: String,
    channel: C,
    max_pages: Option<NonZeroUsize>,
}

impl<C: RpcChannel> RpcProvider<C> {
    /// Create a new [`Self`] instance, capped at [`DEFAULT_MAX_VALIDATOR_PAGES`]
    /// validator pages per set.
    pub fn new(chain_id: impl Into<String>, channel: C) -> Self {
        Self {
            chain_id: chain_id.into(),
            channel,
            max_pages: Some(DEFAULT_MAX_VALIDATOR_PAGES),
        }
    }

    /// Limit the number of validator pages fetched for a single set.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: NonZeroUsize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Keep fetching validator pages for as long as the remote returns full ones.
    #[must_use]
    pub fn without_page_limit(mut self) -> Self {
        self.max_pages = None;
        self
    }

    /// The underlying request channel.
    #[must_use]
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// The configured validator page limit, if any.
    #[must_use]
    pub const fn max_pages(&self) -> Option<NonZeroUsize> {
        self.max_pages
    }

    #[tracing::instrument(skip_all, fields(chain_id = %self.chain_id, height = height))]
    async fn fetch_signed_header(&self, height: i64) -> Result<SignedHeader, ProviderError> {
        let height = QueryHeight::try_from(height)?;

        let commit = self
            .channel
            .fetch_commit(height)
            .await
            .map_err(ProviderError::transport)?;

        let got = commit.signed_header.header.chain_id.as_str();
        if got != self.chain_id {
            return Err(ProviderError::ChainIdMismatch {
                expected: self.chain_id.clone(),
                got: got.to_string(),
            });
        }

        tracing::debug!(
            height = %commit.signed_header.header.height,
            canonical = commit.canonical,
            "fetched signed header"
        );

        Ok(commit.signed_header)
    }

    #[tracing::instrument(skip_all, fields(chain_id = %self.chain_id, height = height))]
    async fn fetch_validator_set(&self, height: i64) -> Result<validator::Set, ProviderError> {
        let mut height = QueryHeight::try_from(height)?;
        let per_page = usize::from(VALIDATORS_PER_PAGE);

        let mut validators = Vec::new();
        let mut page = 1;
        loop {
            let res = self
                .channel
                .fetch_validators(height, page, VALIDATORS_PER_PAGE)
                .await
                .map_err(ProviderError::transport)?;

            let count = res.validators.len();
            tracing::debug!(page, count, total = res.total, "fetched validator page");

            // The page past the cap may only confirm the end of the set
            if let Some(max_pages) = self.max_pages.filter(|max| count > 0 && page > max.get()) {
                return Err(ProviderError::TooManyValidatorPages {
                    max_pages: max_pages.get(),
                });
            }

            // Later pages of a latest query are pinned to the height of the first one
            if height == QueryHeight::Latest {
                height = QueryHeight::Specific(res.height);
            }

            validators.extend(res.validators);

            // Only a full page means there may be more
            if count != per_page {
                if validators.len() != res.total {
                    tracing::warn!(
                        received = validators.len(),
                        total = res.total,
                        "validator count differs from the total reported by the remote"
                    );
                }
                break;
            }

            page += 1;
        }

        ordered_set(validators)
    }
}

/// Build a validator set without a proposer, keeping `validators` in the order
/// they were received.
///
/// Unlike [`validator::Set::new`], the records are not re-sorted and a total
/// voting power above [`validator::Set::MAX_TOTAL_VOTING_POWER`] is an error.
fn ordered_set(validators: Vec<validator::Info>) -> Result<validator::Set, ProviderError> {
    let max = validator::Set::MAX_TOTAL_VOTING_POWER;
    let overflow = || ProviderError::TotalVotingPowerOverflow { max };

    let total = validators
        .iter()
        .try_fold(0_u64, |acc, v| acc.checked_add(v.power()).filter(|&sum| sum <= max))
        .ok_or_else(overflow)?;
    let total_voting_power = vote::Power::try_from(total).map_err(|_| overflow())?;

    Ok(validator::Set {
        validators,
        proposer: None,
        total_voting_power,
    })
}

#[async_trait]
impl<C: RpcChannel> Provider for RpcProvider<C> {
    fn chain_id(&self) -> &str {
        &self.chain_id
    }

    async fn signed_header(&self, height: i64) -> Result<SignedHeader, ProviderError> {
        self.fetch_signed_header(height).await
    }

    async fn validator_set(&self, height: i64) -> Result<validator::Set, ProviderError> {
        self.fetch_validator_set(height).await
    }
}
