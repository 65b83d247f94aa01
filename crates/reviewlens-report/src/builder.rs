//! Review enrichment and distribution counting.

use std::collections::BTreeMap;

use reviewlens_core::{RawReview, Review, Sentiment};
use reviewlens_sentiment::{classify, PolarityScorer};
use serde::Serialize;

/// Number of reviews sharing one rating value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingBucket {
    pub rating: f64,
    pub count: usize,
}

/// Number of reviews carrying one sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SentimentBucket {
    pub sentiment: Sentiment,
    pub count: usize,
}

/// Enriched reviews plus the two distributions charted for them.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltReport {
    pub reviews: Vec<Review>,
    /// Ascending by rating; reviews without a numeric rating are not counted.
    pub ratings: Vec<RatingBucket>,
    /// Ordered by label; only sentiments that occur are present.
    pub sentiments: Vec<SentimentBucket>,
}

/// Parses a displayed rating such as `"5"` or `" 4.5 "`.
///
/// Returns `None` for anything that is not a finite number.
#[must_use]
pub fn parse_rating(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Enriches every review and counts the rating and sentiment distributions.
///
/// Sentiment is derived from the comment text only.
#[must_use]
pub fn build_report(scorer: &dyn PolarityScorer, raw: Vec<RawReview>) -> BuiltReport {
    let reviews: Vec<Review> = raw
        .into_iter()
        .map(|review| {
            let rating = parse_rating(&review.rating_text);
            if rating.is_none() {
                tracing::debug!(
                    reviewer = %review.reviewer_name,
                    rating_text = %review.rating_text,
                    "rating is not numeric; excluded from rating distribution"
                );
            }
            let sentiment = classify(scorer, &review.comment);
            Review::enrich(review, rating, sentiment)
        })
        .collect();

    let ratings = rating_distribution(&reviews);
    let sentiments = sentiment_distribution(&reviews);

    BuiltReport {
        reviews,
        ratings,
        sentiments,
    }
}

fn rating_distribution(reviews: &[Review]) -> Vec<RatingBucket> {
    let mut buckets: Vec<RatingBucket> = Vec::new();
    let mut ratings: Vec<f64> = reviews.iter().filter_map(|r| r.rating).collect();
    ratings.sort_by(f64::total_cmp);

    for rating in ratings {
        match buckets.last_mut() {
            Some(bucket) if bucket.rating.total_cmp(&rating).is_eq() => bucket.count += 1,
            _ => buckets.push(RatingBucket { rating, count: 1 }),
        }
    }
    buckets
}

fn sentiment_distribution(reviews: &[Review]) -> Vec<SentimentBucket> {
    let mut counts: BTreeMap<Sentiment, usize> = BTreeMap::new();
    for review in reviews {
        *counts.entry(review.sentiment).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(sentiment, count)| SentimentBucket { sentiment, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewlens_sentiment::LexiconScorer;

    fn raw(rating: &str, comment: &str) -> RawReview {
        RawReview {
            reviewer_name: "Buyer".to_string(),
            rating_text: rating.to_string(),
            heading: "Heading".to_string(),
            comment: comment.to_string(),
        }
    }

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn parse_rating_accepts_trimmed_numbers() {
        assert_eq!(parse_rating("5"), Some(5.0));
        assert_eq!(parse_rating(" 4.5 "), Some(4.5));
    }

    #[test]
    fn parse_rating_rejects_text_and_non_finite() {
        assert_eq!(parse_rating("bad"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("NaN"), None);
        assert_eq!(parse_rating("inf"), None);
    }

    #[test]
    fn unparseable_rating_is_left_out_of_distribution() {
        let report = build_report(
            &FixedScorer(0.5),
            vec![raw("5", "a"), raw("3", "b"), raw("bad", "c"), raw("4", "d")],
        );

        let ratings: Vec<(f64, usize)> = report
            .ratings
            .iter()
            .map(|bucket| (bucket.rating, bucket.count))
            .collect();
        assert_eq!(ratings, vec![(3.0, 1), (4.0, 1), (5.0, 1)]);
        assert_eq!(report.reviews.len(), 4);
        assert_eq!(report.reviews[2].rating, None);
        assert_eq!(report.reviews[2].rating_text, "bad");
    }

    #[test]
    fn rating_distribution_groups_equal_values() {
        let report = build_report(
            &FixedScorer(0.0),
            vec![raw("5", ""), raw("5.0", ""), raw("1", ""), raw("5", "")],
        );
        assert_eq!(
            report.ratings,
            vec![
                RatingBucket { rating: 1.0, count: 1 },
                RatingBucket { rating: 5.0, count: 3 },
            ]
        );
    }

    #[test]
    fn every_review_gets_a_sentiment_from_its_comment() {
        let report = build_report(
            &LexiconScorer::new(),
            vec![
                raw("5", "Great phone, excellent camera"),
                raw("1", "Worst phone ever, terrible battery"),
                raw("3", "It arrived on Tuesday"),
            ],
        );
        let labels: Vec<Sentiment> = report.reviews.iter().map(|r| r.sentiment).collect();
        assert_eq!(
            labels,
            vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
        );
    }

    #[test]
    fn sentiment_distribution_is_ordered_by_label_and_sparse() {
        let report = build_report(
            &LexiconScorer::new(),
            vec![
                raw("5", "excellent"),
                raw("5", "awesome"),
                raw("1", "terrible"),
            ],
        );
        assert_eq!(
            report.sentiments,
            vec![
                SentimentBucket {
                    sentiment: Sentiment::Negative,
                    count: 1
                },
                SentimentBucket {
                    sentiment: Sentiment::Positive,
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = build_report(&LexiconScorer::new(), Vec::new());
        assert!(report.reviews.is_empty());
        assert!(report.ratings.is_empty());
        assert!(report.sentiments.is_empty());
    }
}
