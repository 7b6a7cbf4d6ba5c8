//! Error types for the light client provider

use thiserror::Error;

/// A type-erased error returned by an [`RpcChannel`](crate::RpcChannel).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by a [`Provider`](crate::Provider).
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The caller asked for a negative height
    #[error("expected height >= 0, got height {0}")]
    InvalidHeight(i64),

    /// The request channel failed; the original error is kept as is
    #[error(transparent)]
    Transport(BoxError),

    /// The remote answered for a different chain than the provider is configured for
    #[error("expected chain id {expected}, got {got}")]
    ChainIdMismatch {
        /// The chain id the provider was configured with
        expected: String,
        /// The chain id found in the remote's response
        got: String,
    },

    /// The remote returned validators on a page past the configured limit
    #[error("validator set spans more than {max_pages} pages")]
    TooManyValidatorPages {
        /// The maximum number of pages a validator set may span
        max_pages: usize,
    },

    /// The summed voting power of the validators exceeds what a set may hold
    #[error("total voting power of the validator set exceeds {max}")]
    TotalVotingPowerOverflow {
        /// The largest total voting power allowed
        max: u64,
    },
}

impl ProviderError {
    /// Wraps a request channel error.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }
}
