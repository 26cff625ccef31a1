//! Pure filter/search over an already-fetched record set.
//!
//! The dashboard filters client-side; the semantics live here so they are
//! testable and shared. Nothing in this module touches storage or holds
//! state: both inputs are re-evaluated from scratch on every call.

use crate::domain::feedback::{Feedback, Rating};

/// Named rating range used to bucket records for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatingBucket {
    /// Every rating.
    #[default]
    All,
    /// Rating of 4 or 5.
    FourPlus,
    /// Rating of exactly 3.
    Three,
    /// Rating below 3. The data model forbids ratings under 1, so this is
    /// exactly the set {1, 2}.
    OneToTwo,
}

/// Error raised when a bucket selector string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rating bucket: {0}")]
pub struct UnknownBucket(String);

impl std::str::FromStr for RatingBucket {
    type Err = UnknownBucket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "4+" => Ok(Self::FourPlus),
            "3" => Ok(Self::Three),
            "1-2" => Ok(Self::OneToTwo),
            other => Err(UnknownBucket(other.to_owned())),
        }
    }
}

impl RatingBucket {
    /// Whether a rating falls inside this bucket.
    #[must_use]
    pub fn matches(self, rating: Rating) -> bool {
        match self {
            Self::All => true,
            Self::FourPlus => rating.get() >= 4,
            Self::Three => rating.get() == 3,
            Self::OneToTwo => rating.get() < 3,
        }
    }
}

/// Select the records whose name, email, or message contains `term`
/// (case-insensitively) and whose rating falls in `bucket`.
///
/// An empty term matches every record. Order is preserved.
#[must_use]
pub fn filter_feedback<'a>(
    records: &'a [Feedback],
    term: &str,
    bucket: RatingBucket,
) -> Vec<&'a Feedback> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| bucket.matches(record.rating))
        .filter(|record| {
            needle.is_empty()
                || record.name.to_lowercase().contains(&needle)
                || record
                    .email
                    .as_deref()
                    .is_some_and(|email| email.to_lowercase().contains(&needle))
                || record.message.to_lowercase().contains(&needle)
        })
        .collect()
}
