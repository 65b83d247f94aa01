use serde::{Deserialize, Serialize};

/// Sentiment label attached to an enriched review.
///
/// Variant order matches alphabetical label order, so sorting by the derived
/// `Ord` sorts by label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One review block as extracted from a review page, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReview {
    pub reviewer_name: String,
    /// Rating exactly as displayed, e.g. `"5"`. Parsed later; may not be numeric.
    pub rating_text: String,
    pub heading: String,
    pub comment: String,
}

/// A review with its parsed rating and sentiment label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer_name: String,
    /// `None` when `rating_text` is not numeric.
    pub rating: Option<f64>,
    pub rating_text: String,
    pub heading: String,
    pub comment: String,
    pub sentiment: Sentiment,
}

impl Review {
    /// Builds the enriched record from a raw review, consuming it.
    #[must_use]
    pub fn enrich(raw: RawReview, rating: Option<f64>, sentiment: Sentiment) -> Self {
        Self {
            reviewer_name: raw.reviewer_name,
            rating,
            rating_text: raw.rating_text,
            heading: raw.heading,
            comment: raw.comment,
            sentiment,
        }
    }
}
