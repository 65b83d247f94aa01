//! Text polarity scoring.

use std::sync::LazyLock;

use regex::Regex;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("valid word regex"));

/// Produces a polarity score in `[-1.0, 1.0]` for a piece of text.
///
/// Implementations must be pure: the same text always yields the same score.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Word polarities tuned for short consumer product reviews.
///
/// Keys are lowercase single words. The final score is the mean weight of
/// all matched words, clamped to `[-1.0, 1.0]`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("decent", 0.17),
    ("excellent", 1.0),
    ("fabulous", 0.4),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("impressive", 1.0),
    ("love", 0.5),
    ("loved", 0.7),
    ("nice", 0.6),
    ("ok", 0.5),
    ("okay", 0.5),
    ("perfect", 1.0),
    ("recommend", 0.4),
    ("satisfied", 0.5),
    ("smooth", 0.4),
    ("superb", 1.0),
    ("wonderful", 1.0),
    ("worth", 0.3),
    // Negative signals
    ("average", -0.15),
    ("awful", -1.0),
    ("bad", -0.7),
    ("broken", -0.4),
    ("cheap", -0.1),
    ("defective", -0.5),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("expensive", -0.5),
    ("fake", -0.5),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("worse", -0.4),
    ("poor", -0.4),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("useless", -0.5),
    ("waste", -0.2),
    ("worst", -1.0),
];

/// Words that flip the polarity of the word that follows them.
const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "dont", "isnt", "wasnt", "cant"];

/// Words that strengthen the word that follows them.
const INTENSIFIERS: &[(&str, f64)] = &[
    ("extremely", 1.5),
    ("really", 1.2),
    ("so", 1.2),
    ("super", 1.3),
    ("too", 1.2),
    ("very", 1.3),
];

/// Negated words keep half their magnitude with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

/// Lexicon-based scorer: averages matched word weights with simple negation
/// and intensifier handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        lexicon_polarity(text)
    }
}

/// Score a text string using the review lexicon.
///
/// Returns `0.0` for empty text or text with no lexicon words.
#[must_use]
pub fn lexicon_polarity(text: &str) -> f64 {
    // Typographic apostrophes tokenize like ASCII ones so "don’t" still negates.
    let lowered = text.to_lowercase().replace('\u{2019}', "'");
    let tokens: Vec<&str> = WORD_RE.find_iter(&lowered).map(|m| m.as_str()).collect();

    let mut total = 0.0_f64;
    let mut matched = 0_u32;

    for (i, token) in tokens.iter().enumerate() {
        let Some(weight) = word_weight(token) else {
            continue;
        };

        let mut modifier = 1.0;
        let mut lookback = i;
        if let Some(factor) = i.checked_sub(1).and_then(|j| intensity(tokens[j])) {
            modifier *= factor;
            lookback = i - 1;
        }
        if lookback
            .checked_sub(1)
            .is_some_and(|j| is_negator(tokens[j]))
        {
            modifier *= NEGATION_FACTOR;
        }

        total += (weight * modifier).clamp(-1.0, 1.0);
        matched += 1;
    }

    if matched == 0 {
        return 0.0;
    }
    (total / f64::from(matched)).clamp(-1.0, 1.0)
}

fn word_weight(token: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(word, _)| *word == token)
        .map(|&(_, weight)| weight)
}

fn intensity(token: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|&(_, factor)| factor)
}

fn is_negator(token: &str) -> bool {
    token.ends_with("n't") || NEGATORS.contains(&token)
}
