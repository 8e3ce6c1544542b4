use serde::{Deserialize, Serialize};

/// Outcome of negation analysis for one query. Transient: lives for the
/// duration of a single search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NegationAnalysis {
    is_negated: bool,
    negated_clause: String,
    positive_query: String,
}

impl NegationAnalysis {
    /// The query contains no negation; the orchestrator takes the direct path.
    pub fn not_negated() -> Self {
        Self::default()
    }

    /// The query negates `negated_clause`; `positive_query` is the rewritten
    /// phrase with the negation marker and negated adjective stripped.
    pub fn negated(negated_clause: impl Into<String>, positive_query: impl Into<String>) -> Self {
        Self {
            is_negated: true,
            negated_clause: negated_clause.into(),
            positive_query: positive_query.into(),
        }
    }

    pub fn is_negated(&self) -> bool {
        self.is_negated
    }

    pub fn negated_clause(&self) -> &str {
        &self.negated_clause
    }

    pub fn positive_query(&self) -> &str {
        &self.positive_query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_negated_leaves_fields_empty() {
        let analysis = NegationAnalysis::not_negated();
        assert!(!analysis.is_negated());
        assert!(analysis.negated_clause().is_empty());
        assert!(analysis.positive_query().is_empty());
    }

    #[test]
    fn negated_carries_clause_and_rewrite() {
        let analysis = NegationAnalysis::negated("waterproof", "jacket");
        assert!(analysis.is_negated());
        assert_eq!(analysis.negated_clause(), "waterproof");
        assert_eq!(analysis.positive_query(), "jacket");
    }
}
