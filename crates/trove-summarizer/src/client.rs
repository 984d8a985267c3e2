//! Summarization Client
//!
//! Builds one prompt for all articles, makes a single model call under a
//! timeout, and turns the response into a [`SummaryResult`].

use crate::config::SummarizerConfig;
use crate::error::SummarizerError;
use crate::parser::parse_summary_response;
use crate::prompt::PromptBuilder;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use trove_domain::category;
use trove_domain::summary::reading_minutes;
use trove_domain::{ExtractedContent, SummaryOptions, SummaryResult};
use trove_llm::{ApiKey, LlmProvider};

/// Summarizes extracted article text through an LLM provider
pub struct SummarizationClient<L: LlmProvider> {
    llm: Arc<L>,
    config: SummarizerConfig,
}

impl<L: LlmProvider> SummarizationClient<L> {
    /// Create a new client
    pub fn new(llm: L, config: SummarizerConfig) -> Self {
        Self {
            llm: Arc::new(llm),
            config,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarize one or more articles
    ///
    /// The credential is used for this call only. A degraded response still
    /// succeeds; only a provider error, a timeout or an empty response fail.
    pub async fn summarize(
        &self,
        contents: &[ExtractedContent],
        options: &SummaryOptions,
        key: &ApiKey,
    ) -> Result<SummaryResult, SummarizerError> {
        if contents.is_empty() {
            return Err(SummarizerError::NoContent);
        }
        self.config.validate().map_err(SummarizerError::Config)?;

        let prompt = PromptBuilder::new(contents, options).build();
        let words_processed: usize = contents.iter().map(|c| c.word_count).sum();
        info!(
            articles = contents.len(),
            words_processed,
            style = ?options.style,
            "Requesting summary"
        );
        debug!(prompt_chars = prompt.len(), "Summary prompt built");

        let response = timeout(self.config.timeout(), self.llm.generate(&prompt, key))
            .await
            .map_err(|_| {
                warn!(timeout_secs = self.config.timeout_secs, "Summary request timed out");
                SummarizerError::SummarizationFailed(format!(
                    "model did not answer within {}s",
                    self.config.timeout_secs
                ))
            })?
            .map_err(|e| {
                warn!("Summary request failed: {}", e);
                SummarizerError::from(e)
            })?;

        if response.trim().is_empty() {
            return Err(SummarizerError::SummarizationFailed(
                "model returned an empty response".to_string(),
            ));
        }

        let draft = parse_summary_response(&response, self.config.fallback_chars);

        let key_points = if options.include_key_points {
            draft.key_points
        } else {
            Vec::new()
        };
        let mut categories = category::dedupe(&draft.categories);
        categories.truncate(self.config.max_suggested_categories);

        let estimated_reading_minutes = if draft.summary_text.trim().is_empty() {
            0
        } else {
            reading_minutes(&draft.summary_text).max(1)
        };

        info!(
            degraded = draft.degraded,
            key_points = key_points.len(),
            reading_minutes = estimated_reading_minutes,
            "Summary received"
        );

        Ok(SummaryResult {
            summary_text: draft.summary_text,
            key_points,
            categories,
            sentiment: draft.sentiment,
            words_processed,
            estimated_reading_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use trove_domain::{Sentiment, SummaryStyle};
    use trove_llm::{LlmError, MockProvider};

    fn key() -> ApiKey {
        ApiKey::parse("sk-test-key").unwrap()
    }

    fn article(title: &str, words: usize) -> ExtractedContent {
        let text = std::iter::repeat("word").take(words).collect::<Vec<_>>().join(" ");
        ExtractedContent::new(format!("https://{}.example", title), title, text).unwrap()
    }

    #[tokio::test]
    async fn test_summarize_full_response() {
        let llm = MockProvider::new(
            r#"{"summaryText": "A short summary.", "keyPoints": ["one", "two"],
                "categories": ["Rust", "rust", " systems "], "sentiment": "negative"}"#,
        );
        let client = SummarizationClient::new(llm, SummarizerConfig::default());

        let contents = vec![article("a", 100), article("b", 250)];
        let result = client
            .summarize(&contents, &SummaryOptions::default(), &key())
            .await
            .unwrap();

        assert_eq!(result.summary_text, "A short summary.");
        assert_eq!(result.key_points, vec!["one", "two"]);
        assert_eq!(result.categories, vec!["Rust", "systems"]);
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.words_processed, 350);
        assert_eq!(result.estimated_reading_minutes, 1);
    }

    #[tokio::test]
    async fn test_key_points_dropped_when_not_requested() {
        let llm = MockProvider::new(r#"{"summaryText": "S", "keyPoints": ["k"]}"#);
        let client = SummarizationClient::new(llm, SummarizerConfig::default());
        let options = SummaryOptions {
            style: SummaryStyle::Brief,
            max_words: 100,
            include_key_points: false,
        };

        let result = client.summarize(&[article("a", 60)], &options, &key()).await.unwrap();
        assert!(result.key_points.is_empty());
    }

    #[tokio::test]
    async fn test_categories_capped() {
        let llm = MockProvider::new(
            r#"{"summaryText": "S", "categories": ["a", "b", "c", "d", "e", "f", "g"]}"#,
        );
        let client = SummarizationClient::new(llm, SummarizerConfig::default());
        let result = client
            .summarize(&[article("a", 60)], &SummaryOptions::default(), &key())
            .await
            .unwrap();
        assert_eq!(result.categories, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn test_reading_minutes_round_up() {
        let summary = std::iter::repeat("w").take(401).collect::<Vec<_>>().join(" ");
        let llm = MockProvider::new(format!(r#"{{"summaryText": "{}"}}"#, summary));
        let client = SummarizationClient::new(llm, SummarizerConfig::default());
        let result = client
            .summarize(&[article("a", 60)], &SummaryOptions::default(), &key())
            .await
            .unwrap();
        assert_eq!(result.estimated_reading_minutes, 3);
    }

    #[tokio::test]
    async fn test_degraded_response_still_succeeds() {
        let llm = MockProvider::new("The model ignored the format and wrote prose.");
        let client = SummarizationClient::new(llm, SummarizerConfig::default());
        let result = client
            .summarize(&[article("a", 60)], &SummaryOptions::default(), &key())
            .await
            .unwrap();

        assert_eq!(result.summary_text, "The model ignored the format and wrote prose.");
        assert!(result.key_points.is_empty());
        assert!(result.categories.is_empty());
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.estimated_reading_minutes, 1);
    }

    #[tokio::test]
    async fn test_empty_response_fails() {
        let client = SummarizationClient::new(MockProvider::new("   "), SummarizerConfig::default());
        let err = client
            .summarize(&[article("a", 60)], &SummaryOptions::default(), &key())
            .await
            .unwrap_err();
        assert!(matches!(err, SummarizerError::SummarizationFailed(_)));
    }

    #[tokio::test]
    async fn test_no_content() {
        let client = SummarizationClient::new(MockProvider::default(), SummarizerConfig::default());
        let err = client
            .summarize(&[], &SummaryOptions::default(), &key())
            .await
            .unwrap_err();
        assert_eq!(err, SummarizerError::NoContent);
    }

    #[tokio::test]
    async fn test_provider_errors_are_mapped() {
        let llm = Arc::new(MockProvider::default());
        llm.push_error(LlmError::Unauthorized("HTTP 401".into()));
        llm.push_error(LlmError::Communication("connection reset".into()));
        let client = SummarizationClient::new(Arc::clone(&llm), SummarizerConfig::default());
        let contents = [article("a", 60)];
        let options = SummaryOptions::default();

        let first = client.summarize(&contents, &options, &key()).await.unwrap_err();
        assert!(matches!(first, SummarizerError::InvalidCredential(_)));

        let second = client.summarize(&contents, &options, &key()).await.unwrap_err();
        assert!(matches!(second, SummarizerError::SummarizationFailed(_)));
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_timeout() {
        let llm = MockProvider::new(r#"{"summaryText": "late"}"#).with_delay(Duration::from_secs(2));
        let config = SummarizerConfig {
            timeout_secs: 1,
            ..SummarizerConfig::default()
        };
        let client = SummarizationClient::new(llm, config);

        let err = client
            .summarize(&[article("a", 60)], &SummaryOptions::default(), &key())
            .await
            .unwrap_err();
        match err {
            SummarizerError::SummarizationFailed(msg) => assert!(msg.contains("1s")),
            other => panic!("expected timeout failure, got {:?}", other),
        }
    }
}
