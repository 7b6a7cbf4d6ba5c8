//! Normalization of caller supplied heights into query heights.

use core::cmp::Ordering;
use core::fmt;

use tendermint::block::Height;

use crate::error::ProviderError;

/// The height a remote query is made at.
///
/// Zero is not a valid block height on the wire, so "latest" is a variant of
/// its own and is sent as an absent height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryHeight {
    /// The most recent height known to the remote.
    Latest,
    /// A specific block height.
    Specific(Height),
}

impl TryFrom<i64> for QueryHeight {
    type Error = ProviderError;

    fn try_from(height: i64) -> Result<Self, Self::Error> {
        match height.cmp(&0) {
            Ordering::Less => Err(ProviderError::InvalidHeight(height)),
            Ordering::Equal => Ok(Self::Latest),
            Ordering::Greater => Height::try_from(height)
                .map(Self::Specific)
                .map_err(|_| ProviderError::InvalidHeight(height)),
        }
    }
}

impl From<QueryHeight> for Option<Height> {
    fn from(height: QueryHeight) -> Self {
        match height {
            QueryHeight::Latest => None,
            QueryHeight::Specific(height) => Some(height),
        }
    }
}

impl fmt::Display for QueryHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Specific(height) => write!(f, "{height}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::minus_one(-1)]
    #[case::very_negative(-1_000_000)]
    #[case::min(i64::MIN)]
    fn rejects_negative_heights(#[case] height: i64) {
        let res = QueryHeight::try_from(height);
        assert!(matches!(res, Err(ProviderError::InvalidHeight(h)) if h == height));
    }

    #[test]
    fn zero_is_latest() {
        let height = QueryHeight::try_from(0).unwrap();
        assert_eq!(height, QueryHeight::Latest);
        assert_eq!(Option::<Height>::from(height), None);
    }

    #[rstest]
    #[case::one(1)]
    #[case::typical(12_345)]
    #[case::max(i64::MAX)]
    fn positive_heights_are_kept(#[case] height: i64) {
        let query = QueryHeight::try_from(height).unwrap();
        let expected = Height::try_from(height).unwrap();

        assert_eq!(query, QueryHeight::Specific(expected));
        assert_eq!(Option::<Height>::from(query), Some(expected));
    }

    #[test]
    fn displays_latest_and_height() {
        assert_eq!(QueryHeight::Latest.to_string(), "latest");
        assert_eq!(QueryHeight::try_from(7).unwrap().to_string(), "7");
    }
}
