//! Threshold classification of polarity scores.

use reviewlens_core::Sentiment;

use crate::scorer::PolarityScorer;

/// Polarity strictly above this value is [`Sentiment::Positive`].
pub const POSITIVE_ABOVE: f64 = 0.3;

/// Polarity strictly below this value is [`Sentiment::Negative`].
pub const NEGATIVE_BELOW: f64 = 0.0;

/// Maps a polarity score onto a label.
///
/// The band is asymmetric: `(0.3, 1.0]` is positive, `[-1.0, 0.0)` is
/// negative, and `[0.0, 0.3]` (both ends inclusive) is neutral.
#[must_use]
pub fn classify_polarity(polarity: f64) -> Sentiment {
    if polarity > POSITIVE_ABOVE {
        Sentiment::Positive
    } else if polarity < NEGATIVE_BELOW {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Scores `text` with `scorer` and classifies the result.
#[must_use]
pub fn classify(scorer: &dyn PolarityScorer, text: &str) -> Sentiment {
    classify_polarity(scorer.polarity(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::LexiconScorer;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn above_threshold_is_positive() {
        assert_eq!(classify_polarity(0.31), Sentiment::Positive);
        assert_eq!(classify_polarity(1.0), Sentiment::Positive);
    }

    #[test]
    fn below_zero_is_negative() {
        assert_eq!(classify_polarity(-0.01), Sentiment::Negative);
        assert_eq!(classify_polarity(-1.0), Sentiment::Negative);
    }

    #[test]
    fn exactly_zero_is_neutral() {
        assert_eq!(classify_polarity(0.0), Sentiment::Neutral);
    }

    #[test]
    fn exactly_threshold_is_neutral() {
        assert_eq!(classify_polarity(0.3), Sentiment::Neutral);
    }

    #[test]
    fn inside_band_is_neutral() {
        assert_eq!(classify_polarity(0.15), Sentiment::Neutral);
    }

    #[test]
    fn classify_uses_scorer_polarity() {
        assert_eq!(classify(&FixedScorer(0.9), "anything"), Sentiment::Positive);
        assert_eq!(classify(&FixedScorer(0.3), "anything"), Sentiment::Neutral);
        assert_eq!(classify(&FixedScorer(-0.2), "anything"), Sentiment::Negative);
    }

    #[test]
    fn identical_text_yields_identical_label() {
        let scorer = LexiconScorer::new();
        let text = "Camera is good but battery is poor";
        assert_eq!(classify(&scorer, text), classify(&scorer, text));
    }

    #[test]
    fn lexicon_scorer_end_to_end() {
        let scorer = LexiconScorer::new();
        assert_eq!(classify(&scorer, "Excellent phone, loved it"), Sentiment::Positive);
        assert_eq!(classify(&scorer, "Terrible, waste of money"), Sentiment::Negative);
        assert_eq!(classify(&scorer, "Delivered on time"), Sentiment::Neutral);
    }
}
