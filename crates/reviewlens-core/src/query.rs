//! Validated user input for a review scrape.

use std::num::IntErrorKind;

use thiserror::Error;

/// Smallest review count a user may request.
pub const MIN_REVIEW_COUNT: u32 = 10;

/// Review counts must be whole pages of this size.
pub const REVIEW_COUNT_STEP: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("product name must be non-empty")]
    EmptyProductName,

    #[error("review count \"{0}\" is not a whole number")]
    InvalidNumber(String),

    #[error("review count {0} must be at least 10 and a multiple of 10")]
    InvalidCount(i64),
}

/// A product search plus the number of reviews to collect.
///
/// Only constructible through validation, so every `ReviewQuery` satisfies
/// `review_count >= 10 && review_count % 10 == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    product_name: String,
    review_count: u32,
}

impl ReviewQuery {
    /// # Errors
    ///
    /// Returns [`QueryError::EmptyProductName`] for a blank name and
    /// [`QueryError::InvalidCount`] when the count is below the minimum or
    /// not a multiple of [`REVIEW_COUNT_STEP`].
    pub fn new(product_name: &str, review_count: u32) -> Result<Self, QueryError> {
        let product_name = product_name.trim();
        if product_name.is_empty() {
            return Err(QueryError::EmptyProductName);
        }
        if review_count < MIN_REVIEW_COUNT || review_count % REVIEW_COUNT_STEP != 0 {
            return Err(QueryError::InvalidCount(i64::from(review_count)));
        }
        Ok(Self {
            product_name: product_name.to_string(),
            review_count,
        })
    }

    /// Validates raw form input. The product name is checked before the count.
    ///
    /// # Errors
    ///
    /// Same as [`ReviewQuery::new`], plus [`QueryError::InvalidNumber`] when
    /// `review_count` is not an integer. Integers too large for a `u32` are
    /// an [`QueryError::InvalidCount`], saturated at the `i64` bounds.
    pub fn parse(product_name: &str, review_count: &str) -> Result<Self, QueryError> {
        if product_name.trim().is_empty() {
            return Err(QueryError::EmptyProductName);
        }
        let raw = review_count.trim();
        let count = match raw.parse::<i64>() {
            Ok(n) if n < 0 => return Err(QueryError::InvalidCount(n)),
            Ok(n) => u32::try_from(n).map_err(|_| QueryError::InvalidCount(n))?,
            Err(e) => {
                return Err(match e.kind() {
                    IntErrorKind::PosOverflow => QueryError::InvalidCount(i64::MAX),
                    IntErrorKind::NegOverflow => QueryError::InvalidCount(i64::MIN),
                    _ => QueryError::InvalidNumber(raw.to_string()),
                })
            }
        };
        Self::new(product_name, count)
    }

    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    #[must_use]
    pub fn review_count(&self) -> u32 {
        self.review_count
    }

    /// The review count as a collection bound.
    #[must_use]
    pub fn review_limit(&self) -> usize {
        self.review_count as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_multiples_of_ten() {
        for count in [10, 20, 50, 100] {
            let query = ReviewQuery::new("iphone 15", count).expect("valid query");
            assert_eq!(query.review_count(), count);
        }
    }

    #[test]
    fn rejects_counts_below_minimum() {
        assert_eq!(
            ReviewQuery::new("iphone 15", 0),
            Err(QueryError::InvalidCount(0))
        );
        assert_eq!(
            ReviewQuery::new("iphone 15", 5),
            Err(QueryError::InvalidCount(5))
        );
    }

    #[test]
    fn rejects_counts_not_multiple_of_ten() {
        assert_eq!(
            ReviewQuery::new("iphone 15", 25),
            Err(QueryError::InvalidCount(25))
        );
    }

    #[test]
    fn trims_product_name() {
        let query = ReviewQuery::new("  iphone 15  ", 10).unwrap();
        assert_eq!(query.product_name(), "iphone 15");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            ReviewQuery::new("   ", 10),
            Err(QueryError::EmptyProductName)
        );
    }

    #[test]
    fn parse_checks_name_before_count() {
        assert_eq!(
            ReviewQuery::parse("", "abc"),
            Err(QueryError::EmptyProductName)
        );
    }

    #[test]
    fn parse_rejects_non_numeric_count() {
        assert_eq!(
            ReviewQuery::parse("iphone 15", "twenty"),
            Err(QueryError::InvalidNumber("twenty".to_string()))
        );
        assert_eq!(
            ReviewQuery::parse("iphone 15", "12.5"),
            Err(QueryError::InvalidNumber("12.5".to_string()))
        );
    }

    #[test]
    fn parse_rejects_negative_count() {
        assert_eq!(
            ReviewQuery::parse("iphone 15", "-10"),
            Err(QueryError::InvalidCount(-10))
        );
    }

    #[test]
    fn parse_reports_oversized_count_as_invalid_count() {
        assert_eq!(
            ReviewQuery::parse("iphone 15", "10000000000"),
            Err(QueryError::InvalidCount(10_000_000_000))
        );
        assert_eq!(
            ReviewQuery::parse("iphone 15", "100000000000000000000"),
            Err(QueryError::InvalidCount(i64::MAX))
        );
        assert_eq!(
            ReviewQuery::parse("iphone 15", "-100000000000000000000"),
            Err(QueryError::InvalidCount(i64::MIN))
        );
    }

    #[test]
    fn parse_accepts_padded_count() {
        let query = ReviewQuery::parse("iphone 15", " 20 ").unwrap();
        assert_eq!(query.review_count(), 20);
        assert_eq!(query.review_limit(), 20);
    }
}
