use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::NegationClassifier;
use crate::connector::adapter::ChatClient;
use crate::domain::{DomainError, NegationAnalysis};

/// Step 1: binary yes/no negation detection.
const DETECT_PROMPT: &str = "In the following phrase, Identify negation words: Find words \
like 'not,' 'un-,' 'in-,' 'non-,' 'without,' and similar terms. If \
there are any, respond yes. Otherwise, respond no.\n\
Phrase: ";

/// Step 2: extract the negated adjective, minus the negation marker.
const CLAUSE_PROMPT_PREFIX: &str =
    "Extract the negated adjective from the following sentence: '";
const CLAUSE_PROMPT_SUFFIX: &str =
    "'. Return only the negated adjective (not including the negation word).";

/// Step 3: rewrite the phrase with negation marker and negated adjective
/// stripped, other adjectives preserved.
const REWRITE_PROMPT: &str = "Please analyze the following phrase and perform these transformations:\n\
1. Identify negation words: Find words like 'not,' 'un-,' 'in-,' 'non-,' 'without,' and similar terms.\n\
2. Identify negated adjectives: Determine which adjectives are being negated by the identified negation words.\n\
3. Remove negation words and negated adjectives: Delete both the negation words and the adjectives they negate.\n\
4. Preserve other adjectives: Leave any adjectives that are not being negated intact.\n\
5. Respond with only the transformed phrase\n\
Phrase: ";

/// A [`NegationClassifier`] driven by three sequential LLM calls: detect,
/// extract the negated clause, rewrite the positive query. Steps 2 and 3
/// only run when step 1 answered yes.
///
/// Any call failure or unusable answer surfaces as
/// [`DomainError::ClassificationFailed`]. There is deliberately no silent
/// fallback to "not negated": that would run a direct search for a query the
/// user phrased as an exclusion, inverting the result semantics.
pub struct LlmNegationClassifier {
    chat: Arc<dyn ChatClient>,
}

impl LlmNegationClassifier {
    pub fn new(chat: Arc<dyn ChatClient>) -> Self {
        Self { chat }
    }

    /// Case-insensitive comparison against the literal token "yes".
    fn parse_detection(answer: &str) -> bool {
        answer.trim().eq_ignore_ascii_case("yes")
    }

    /// Trim model chatter down to the extracted text; reject blank answers.
    fn parse_extraction(answer: &str, step: &str) -> Result<String, DomainError> {
        let text = answer.trim();
        if text.is_empty() {
            return Err(DomainError::classification_failed(format!(
                "{step} returned an empty answer"
            )));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl NegationClassifier for LlmNegationClassifier {
    async fn classify(&self, query: &str) -> Result<NegationAnalysis, DomainError> {
        let detect = format!("{DETECT_PROMPT}{query}");
        let answer = self
            .chat
            .complete(&detect)
            .await
            .map_err(|e| DomainError::classification_failed(format!("negation detection: {e}")))?;

        debug!("Negation detection answer: {}", answer.trim());

        if !Self::parse_detection(&answer) {
            return Ok(NegationAnalysis::not_negated());
        }

        let clause_prompt = format!("{CLAUSE_PROMPT_PREFIX}{query}{CLAUSE_PROMPT_SUFFIX}");
        let clause_answer = self
            .chat
            .complete(&clause_prompt)
            .await
            .map_err(|e| DomainError::classification_failed(format!("clause extraction: {e}")))?;
        let negated_clause = Self::parse_extraction(&clause_answer, "clause extraction")?;

        let rewrite_prompt = format!("{REWRITE_PROMPT}{query}");
        let rewrite_answer = self
            .chat
            .complete(&rewrite_prompt)
            .await
            .map_err(|e| DomainError::classification_failed(format!("query rewrite: {e}")))?;
        let positive_query = Self::parse_extraction(&rewrite_answer, "query rewrite")?;

        Ok(NegationAnalysis::negated(negated_clause, positive_query))
    }
}
