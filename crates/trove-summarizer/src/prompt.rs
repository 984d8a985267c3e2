//! LLM prompt engineering for multi-article summaries

use trove_domain::{ExtractedContent, SummaryOptions};

/// Builds the summarization prompt
pub struct PromptBuilder<'a> {
    contents: &'a [ExtractedContent],
    options: &'a SummaryOptions,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(contents: &'a [ExtractedContent], options: &'a SummaryOptions) -> Self {
        Self { contents, options }
    }

    /// Build the complete summarization prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task and ground rules
        prompt.push_str(SUMMARY_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Style and length
        prompt.push_str(&format!("Style: {}\n", self.options.style.instruction()));
        prompt.push_str(&format!(
            "Length: at most {} words for summaryText.\n",
            self.options.max_words
        ));
        if self.options.include_key_points {
            prompt.push_str("List the most important takeaways in keyPoints.\n\n");
        } else {
            prompt.push_str("Return an empty keyPoints array.\n\n");
        }

        // 3. The articles
        prompt.push_str(&format!("Articles ({}):\n\n", self.contents.len()));
        for (index, content) in self.contents.iter().enumerate() {
            prompt.push_str(&format!("### Article {}: {}\n", index + 1, content.title));
            prompt.push_str(&format!("URL: {}\n", content.source_url));
            prompt.push_str(&format!("Words: {}\n\n", content.word_count));
            prompt.push_str(&content.text);
            prompt.push_str("\n\n");
        }

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const SUMMARY_INSTRUCTIONS: &str = r#"Summarize the articles below as one coherent piece.

Rules:
- Summarize what the articles say: their arguments, findings and conclusions
- Where articles agree or disagree, say so
- Never mention bookmarks, saved links, reading lists, titles as metadata, URLs or storage
- Do not invent facts that are not in the text
- Suggest 3 to 5 short topical categories
- Judge the overall sentiment as positive, neutral or negative"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (one JSON object only, no additional text):
{
  "summaryText": "the summary",
  "keyPoints": ["point one", "point two"],
  "categories": ["topic", "topic"],
  "sentiment": "positive | neutral | negative"
}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;
