//! Language-model similarity scorer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::SimilarityVerdict;
use crate::error::{LlmError, Result};
use crate::port::outbound::llm::Llm;
use crate::port::outbound::scorer::SimilarityScorer;

/// Asks a text model whether two titles describe the same event.
///
/// Every call is bounded by `timeout`. Transport failures, timeouts and
/// unparseable replies are returned as errors; wrap this scorer in
/// [`Fallback`](super::fallback::Fallback) before handing it to the engine.
pub struct SemanticScorer {
    llm: Arc<dyn Llm>,
    timeout: Duration,
}

impl SemanticScorer {
    pub fn new(llm: Arc<dyn Llm>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    fn build_prompt(a: &str, b: &str) -> String {
        format!(
            r#"You are an expert prediction market analyst. Compare these two prediction market questions and determine if they refer to the same underlying event.

Question 1: "{a}"
Question 2: "{b}"

Consider:
- Semantic meaning and intent
- Time periods mentioned
- Specific entities (people, organizations)
- Market outcomes being predicted
- Logical equivalence even with different wording

Respond with valid JSON only:
{{
    "same_event": true/false,
    "confidence": 0.0-1.0,
    "unified_name": "standardized event name",
    "reasoning": "brief explanation"
}}

Examples of same events:
- "Trump wins 2024" and "Republican victory 2024 presidential election" = same (if Trump is nominee)
- "Bitcoin above $100k" and "BTC over $100,000" = same
- "Democrats control Senate" and "Democratic Senate majority" = same
"#
        )
    }

    fn parse_response(response: &str, a: &str, b: &str) -> Result<SimilarityVerdict> {
        let value = first_json_object(response).ok_or(LlmError::NoJson)?;
        let reply: Reply = serde_json::from_value(value)
            .map_err(|e| LlmError::InvalidVerdict(e.to_string()))?;

        let canonical_name = reply
            .unified_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| shorter(a, b).to_string());

        Ok(SimilarityVerdict::new(
            reply.same_event,
            reply.confidence,
            canonical_name,
            reply.reasoning.unwrap_or_else(|| "AI-powered matching".to_string()),
        ))
    }
}

#[async_trait]
impl SimilarityScorer for SemanticScorer {
    fn name(&self) -> &'static str {
        "semantic"
    }

    async fn score(&self, a: &str, b: &str) -> Result<SimilarityVerdict> {
        let prompt = Self::build_prompt(a, b);
        let response = tokio::time::timeout(self.timeout, self.llm.complete(&prompt))
            .await
            .map_err(|_| LlmError::Timeout {
                provider: self.llm.name(),
                seconds: self.timeout.as_secs(),
            })??;

        if response.trim().is_empty() {
            return Err(LlmError::EmptyCompletion {
                provider: self.llm.name(),
            }
            .into());
        }
        debug!(provider = self.llm.name(), "semantic verdict received");

        Self::parse_response(&response, a, b)
    }
}

#[derive(Deserialize)]
struct Reply {
    same_event: bool,
    confidence: f64,
    #[serde(default, alias = "canonical_name")]
    unified_name: Option<String>,
    #[serde(default, alias = "rationale")]
    reasoning: Option<String>,
}

/// First well-formed JSON object in a model reply.
///
/// A fenced ```json block is preferred. Otherwise each `{` is tried in turn
/// and the first position that starts a complete object wins, so trailing
/// prose or a second object does not break parsing.
fn first_json_object(text: &str) -> Option<Value> {
    if let Some(start) = text.find("```json") {
        let body = &text[start + 7..];
        let end = body.find("```").unwrap_or(body.len());
        if let Some(value) = first_object_from(body[..end].trim()) {
            return Some(value);
        }
    }
    first_object_from(text)
}

fn first_object_from(text: &str) -> Option<Value> {
    text.match_indices('{').find_map(|(pos, _)| {
        serde_json::Deserializer::from_str(&text[pos..])
            .into_iter::<Value>()
            .next()
            .and_then(std::result::Result::ok)
            .filter(Value::is_object)
    })
}

fn shorter<'a>(a: &'a str, b: &'a str) -> &'a str {
    if a.chars().count() <= b.chars().count() {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::llm::{FailingLlm, MockLlm, SlowLlm};
    use crate::error::Error;

    fn scorer(llm: impl Llm + 'static) -> SemanticScorer {
        SemanticScorer::new(Arc::new(llm), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn parses_plain_json_reply() {
        let s = scorer(MockLlm::new(
            r#"{"same_event": true, "confidence": 0.92, "unified_name": "Bitcoin above $100k in 2025", "reasoning": "Same asset and threshold"}"#,
        ));
        let v = s.score("Bitcoin above $100k", "BTC over $100,000").await.unwrap();

        assert!(v.same_event);
        assert_eq!(v.confidence, 0.92);
        assert_eq!(v.canonical_name, "Bitcoin above $100k in 2025");
        assert_eq!(v.rationale, "Same asset and threshold");
    }

    #[tokio::test]
    async fn parses_fenced_reply_with_prose() {
        let s = scorer(MockLlm::new(
            "Sure! Here is my analysis:\n```json\n{\"same_event\": false, \"confidence\": 0.2, \"unified_name\": \"x\", \"reasoning\": \"different years\"}\n```\nLet me know {if} you need more.",
        ));
        let v = s.score("a", "b").await.unwrap();
        assert!(!v.same_event);
        assert_eq!(v.rationale, "different years");
    }

    #[tokio::test]
    async fn skips_braces_before_the_object() {
        let s = scorer(MockLlm::new(
            r#"Comparing {Q1} and {Q2}: {"same_event": true, "confidence": 0.8} and {"same_event": false, "confidence": 0.1}"#,
        ));
        let v = s.score("Fed cut", "Fed cuts rates").await.unwrap();
        assert!(v.same_event);
        assert_eq!(v.canonical_name, "Fed cut");
        assert_eq!(v.rationale, "AI-powered matching");
    }

    #[tokio::test]
    async fn clamps_confidence() {
        let s = scorer(MockLlm::new(r#"{"same_event": true, "confidence": 1.4}"#));
        assert_eq!(s.score("a", "b").await.unwrap().confidence, 1.0);
    }

    #[tokio::test]
    async fn accepts_alternate_field_names() {
        let s = scorer(MockLlm::new(
            r#"{"same_event": true, "confidence": 0.9, "canonical_name": "X", "rationale": "Y"}"#,
        ));
        let v = s.score("a", "b").await.unwrap();
        assert_eq!(v.canonical_name, "X");
        assert_eq!(v.rationale, "Y");
    }

    #[tokio::test]
    async fn reply_without_json_is_an_error() {
        let s = scorer(MockLlm::new("I cannot answer that."));
        let err = s.score("a", "b").await.unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::NoJson)));
    }

    #[tokio::test]
    async fn reply_missing_fields_is_an_error() {
        let s = scorer(MockLlm::new(r#"{"confidence": 0.9}"#));
        let err = s.score("a", "b").await.unwrap_err();
        assert!(matches!(err, Error::Llm(LlmError::InvalidVerdict(_))));
    }

    #[tokio::test]
    async fn empty_reply_is_an_error() {
        let s = scorer(MockLlm::new("   "));
        let err = s.score("a", "b").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Llm(LlmError::EmptyCompletion { provider: "mock" })
        ));
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let s = scorer(FailingLlm);
        assert!(s.score("a", "b").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let s = SemanticScorer::new(
            Arc::new(SlowLlm::new(Duration::from_secs(60))),
            Duration::from_secs(30),
        );
        let err = s.score("a", "b").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Llm(LlmError::Timeout { seconds: 30, .. })
        ));
    }

    #[test]
    fn prompt_contains_both_titles() {
        let prompt = SemanticScorer::build_prompt("Trump wins 2024", "GOP takes White House");
        assert!(prompt.contains(r#"Question 1: "Trump wins 2024""#));
        assert!(prompt.contains(r#"Question 2: "GOP takes White House""#));
        assert!(prompt.contains("\"unified_name\""));
    }
}
