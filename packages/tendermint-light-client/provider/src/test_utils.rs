//! Test utilities for the light client provider

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tendermint::{
    block::{signed_header::SignedHeader, Height},
    validator, vote, Time,
};
use tendermint_rpc::endpoint::commit;
use tendermint_testgen::{Generator, LightBlock, Validator};

use crate::{
    channel::{RpcChannel, ValidatorPage},
    height::QueryHeight,
};

/// Error returned by [`MockChannel`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("mock transport failure: {0}")]
pub struct MockTransportError(pub String);

/// A request received by [`MockChannel`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockRequest {
    /// A commit request
    Commit(QueryHeight),
    /// A validators page request
    Validators {
        /// Requested height
        height: QueryHeight,
        /// Requested page, 1-indexed
        page: usize,
        /// Requested page size
        per_page: u8,
    },
}

#[derive(Debug, Default)]
struct MockState {
    signed_header: Option<SignedHeader>,
    validators: Vec<validator::Info>,
    failing_page: Option<usize>,
    endless_pages: bool,
    page_size: Option<usize>,
    reported_total: Option<usize>,
    latest_height: Height,
    requests: Vec<MockRequest>,
}

/// An in-memory [`RpcChannel`] serving a fixed signed header and validator set
/// and recording every request it receives.
///
/// Clones share their state, so a test can keep a handle after moving the
/// channel into a provider.
#[derive(Clone, Debug, Default)]
pub struct MockChannel(Arc<Mutex<MockState>>);

#[allow(clippy::missing_panics_doc)]
impl MockChannel {
    /// Create a channel with no header and no validators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `signed_header` for every commit request, whatever the height.
    #[must_use]
    pub fn with_signed_header(self, signed_header: SignedHeader) -> Self {
        self.state().signed_header = Some(signed_header);
        self
    }

    /// Serve `validators`, split into pages of the requested size.
    #[must_use]
    pub fn with_validators(self, validators: Vec<validator::Info>) -> Self {
        self.state().validators = validators;
        self
    }

    /// Fail the request for `page`.
    #[must_use]
    pub fn failing_on_page(self, page: usize) -> Self {
        self.state().failing_page = Some(page);
        self
    }

    /// Answer every validators request with a full page, cycling through the
    /// configured validators.
    #[must_use]
    pub fn with_endless_pages(self) -> Self {
        self.state().endless_pages = true;
        self
    }

    /// Serve pages of `page_size` validators, whatever size is requested.
    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        self.state().page_size = Some(page_size);
        self
    }

    /// Report `total` validators on every page instead of the served count.
    #[must_use]
    pub fn with_reported_total(self, total: usize) -> Self {
        self.state().reported_total = Some(total);
        self
    }

    /// Answer latest validators requests at `height`.
    #[must_use]
    pub fn with_latest_height(self, height: Height) -> Self {
        self.state().latest_height = height;
        self
    }

    /// The requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<MockRequest> {
        self.state().requests.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.0.lock().expect("mock channel state poisoned")
    }
}

#[async_trait]
impl RpcChannel for MockChannel {
    type Error = MockTransportError;

    async fn fetch_commit(&self, height: QueryHeight) -> Result<commit::Response, Self::Error> {
        let mut state = self.state();
        state.requests.push(MockRequest::Commit(height));

        let signed_header = state
            .signed_header
            .clone()
            .ok_or_else(|| MockTransportError("no signed header".to_string()))?;

        Ok(commit::Response {
            signed_header,
            canonical: true,
        })
    }

    async fn fetch_validators(
        &self,
        height: QueryHeight,
        page: usize,
        per_page: u8,
    ) -> Result<ValidatorPage, Self::Error> {
        let mut state = self.state();
        state.requests.push(MockRequest::Validators {
            height,
            page,
            per_page,
        });

        if state.failing_page == Some(page) {
            return Err(MockTransportError(format!("page {page} unavailable")));
        }

        let per_page = state.page_size.unwrap_or_else(|| usize::from(per_page));
        let validators = if state.endless_pages {
            state.validators.iter().cycle().take(per_page).cloned().collect()
        } else {
            state
                .validators
                .chunks(per_page)
                .nth(page.saturating_sub(1))
                .map(<[validator::Info]>::to_vec)
                .unwrap_or_default()
        };

        Ok(ValidatorPage {
            validators,
            total: state.reported_total.unwrap_or(state.validators.len()),
            height: match height {
                QueryHeight::Latest => state.latest_height,
                QueryHeight::Specific(height) => height,
            },
        })
    }
}

/// Generate `count` distinct validators with equal voting power.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn generate_validators(count: usize) -> Vec<validator::Info> {
    (0..count)
        .map(|i| {
            Validator::new(&format!("validator-{i}"))
                .voting_power(10)
                .generate()
                .expect("valid validator")
        })
        .collect()
}

/// Generate one validator per entry of `powers`, with that voting power.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn generate_validators_with_powers(powers: &[u64]) -> Vec<validator::Info> {
    powers
        .iter()
        .enumerate()
        .map(|(i, &power)| {
            let mut info = Validator::new(&format!("weighted-{i}"))
                .generate()
                .expect("valid validator");
            info.power = vote::Power::try_from(power).expect("power fits in i64");
            info
        })
        .collect()
}

/// Generate a signed header for `chain_id` at `height`.
#[must_use]
#[allow(clippy::missing_panics_doc)]
pub fn generate_signed_header(chain_id: &str, height: u64) -> SignedHeader {
    LightBlock::new_default_with_time_and_chain_id(
        chain_id.to_string(),
        Time::unix_epoch(),
        height,
    )
    .generate()
    .expect("valid light block")
    .signed_header
}

#[cfg(test)]
mod tests {
    use tendermint::block::Height;

    use super::*;

    #[tokio::test]
    async fn splits_validators_into_pages() {
        let channel = MockChannel::new().with_validators(generate_validators(5));

        let first = channel.fetch_validators(QueryHeight::Latest, 1, 2).await.unwrap();
        let last = channel.fetch_validators(QueryHeight::Latest, 3, 2).await.unwrap();
        let past_end = channel.fetch_validators(QueryHeight::Latest, 4, 2).await.unwrap();

        assert_eq!(first.validators.len(), 2);
        assert_eq!(last.validators.len(), 1);
        assert!(past_end.validators.is_empty());
        assert_eq!(past_end.total, 5);
        assert_eq!(channel.requests().len(), 3);
    }

    #[tokio::test]
    async fn latest_pages_report_configured_height() {
        let channel = MockChannel::new()
            .with_validators(generate_validators(1))
            .with_latest_height(Height::from(30_u32));

        let page = channel.fetch_validators(QueryHeight::Latest, 1, 100).await.unwrap();

        assert_eq!(page.height, Height::from(30_u32));
    }

    #[test]
    fn signed_header_fixture_matches_request() {
        let header = generate_signed_header("fixture-chain", 12);

        assert_eq!(header.header.chain_id.as_str(), "fixture-chain");
        assert_eq!(header.header.height, Height::from(12_u32));
    }
}
