//! Review sentiment classification.
//!
//! A [`PolarityScorer`] turns text into a polarity in `[-1.0, 1.0]`; the
//! classifier maps that polarity onto a [`Sentiment`] label with fixed
//! thresholds. [`LexiconScorer`] is the built-in scorer.

pub mod classify;
pub mod scorer;

pub use classify::{classify, classify_polarity, NEGATIVE_BELOW, POSITIVE_ABOVE};
pub use reviewlens_core::Sentiment;
pub use scorer::{LexiconScorer, PolarityScorer};
