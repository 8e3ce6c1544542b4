use async_trait::async_trait;

use crate::application::NegationClassifier;
use crate::domain::{DomainError, NegationAnalysis};

/// Standalone negation words. The adjective they negate is the following token.
const NEGATION_WORDS: &[&str] = &["not", "without", "no", "never", "lacking", "minus"];

/// Prefixes that negate the remainder of the same token ("non-waterproof",
/// "unlined"). Checked longest-first.
const NEGATION_PREFIXES: &[&str] = &["non-", "non", "un", "in"];

/// Tokens that look prefixed but are ordinary vocabulary in product queries.
const PREFIX_FALSE_POSITIVES: &[&str] = &[
    "under", "union", "unique", "unisex", "unit", "universal", "inner", "inside", "indoor",
    "indigo", "inch", "inches", "insulated", "interior", "inexpensive", "inflatable",
    "included", "integrated",
];

/// A lightweight, rule-based negation classifier that requires no external
/// services. It scans for negation markers and derives both outputs from the
/// token stream:
///
/// 1. **Negated clause** - the token carrying the negation, minus its marker
///    ("non-waterproof" → "waterproof"), or the token following a standalone
///    marker ("without laces" → "laces").
///
/// 2. **Positive query** - the phrase with the marker and its negated token
///    removed, all other tokens preserved in order.
///
/// Far cruder than the LLM classifier: it cannot tell "unlined" from an
/// unfamiliar brand name starting with "un". Suitable for offline runs and
/// tests, not as the primary production path.
pub struct RuleBasedNegationClassifier;

impl Default for RuleBasedNegationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedNegationClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Strip a negation prefix from a single token, if one applies.
    fn strip_prefix(token: &str) -> Option<String> {
        let lower = token.to_lowercase();
        if PREFIX_FALSE_POSITIVES.contains(&lower.as_str()) {
            return None;
        }

        for prefix in NEGATION_PREFIXES {
            if let Some(rest) = lower.strip_prefix(prefix) {
                // A bare prefix ("non") is a standalone word, not a prefixed token.
                if rest.len() > 2 {
                    return Some(rest.to_string());
                }
            }
        }
        None
    }

    fn analyze(query: &str) -> NegationAnalysis {
        let tokens: Vec<&str> = query.split_whitespace().collect();

        for (i, token) in tokens.iter().enumerate() {
            let lower = token.to_lowercase();

            // "without laces", "not waterproof": the next token is negated.
            if NEGATION_WORDS.contains(&lower.as_str()) {
                if let Some(next) = tokens.get(i + 1) {
                    let positive: Vec<&str> = tokens
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i && j != i + 1)
                        .map(|(_, t)| *t)
                        .collect();
                    return NegationAnalysis::negated(
                        next.trim_matches(|c: char| !c.is_alphanumeric()),
                        positive.join(" "),
                    );
                }
            }

            // "non-waterproof jacket": the token itself carries the negation.
            if let Some(clause) = Self::strip_prefix(token) {
                let positive: Vec<&str> = tokens
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, t)| *t)
                    .collect();
                return NegationAnalysis::negated(clause, positive.join(" "));
            }
        }

        NegationAnalysis::not_negated()
    }
}

#[async_trait]
impl NegationClassifier for RuleBasedNegationClassifier {
    async fn classify(&self, query: &str) -> Result<NegationAnalysis, DomainError> {
        Ok(Self::analyze(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plain_query_is_not_negated() {
        let classifier = RuleBasedNegationClassifier::new();
        let analysis = classifier.classify("luggage wheels").await.unwrap();
        assert!(!analysis.is_negated());
    }

    #[tokio::test]
    async fn without_negates_the_following_token() {
        let classifier = RuleBasedNegationClassifier::new();
        let analysis = classifier.classify("running shoes without laces").await.unwrap();

        assert!(analysis.is_negated());
        assert_eq!(analysis.negated_clause(), "laces");
        assert_eq!(analysis.positive_query(), "running shoes");
    }

    #[tokio::test]
    async fn hyphenated_prefix_is_stripped() {
        let classifier = RuleBasedNegationClassifier::new();
        let analysis = classifier.classify("non-waterproof jacket").await.unwrap();

        assert!(analysis.is_negated());
        assert_eq!(analysis.negated_clause(), "waterproof");
        assert_eq!(analysis.positive_query(), "jacket");
    }

    #[tokio::test]
    async fn common_prefix_words_are_not_negation() {
        let classifier = RuleBasedNegationClassifier::new();

        for query in ["unisex watch", "indoor slippers", "under armour hoodie"] {
            let analysis = classifier.classify(query).await.unwrap();
            assert!(!analysis.is_negated(), "misclassified: {query}");
        }
    }

    #[tokio::test]
    async fn other_adjectives_are_preserved() {
        let classifier = RuleBasedNegationClassifier::new();
        let analysis = classifier
            .classify("lightweight jacket not waterproof")
            .await
            .unwrap();

        assert!(analysis.is_negated());
        assert_eq!(analysis.negated_clause(), "waterproof");
        assert_eq!(analysis.positive_query(), "lightweight jacket");
    }
}
