//! Shape-tolerant text extraction from model response envelopes.
//!
//! The model API has returned text under several shapes over time: the
//! structured `output` list, the aggregated `output_text` field, and the
//! chat-style `choices` list. Extraction strategies are tried in that
//! precedence order and the first non-empty result wins.

use serde::Deserialize;

/// Response envelope for the `/responses` endpoint.
///
/// Every field is optional; which ones are populated depends on the model
/// and API version that served the request.
#[derive(Debug, Deserialize)]
pub struct ModelResponse {
    #[serde(default)]
    output: Option<Vec<OutputItem>>,
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Option<Vec<ContentPart>>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

/// Response envelope for the `/chat/completions` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Consumes the envelope and returns the first choice's message content,
    /// if any.
    pub(crate) fn into_content(self) -> Option<String> {
        first_choice_text(self.choices)
    }
}

type Extractor = fn(&ModelResponse) -> Option<String>;

/// Extraction strategies in precedence order: structured output first, then
/// the aggregated text field, then the chat-style choice list.
const EXTRACTORS: &[Extractor] = &[direct_output, aggregated_output, chat_output];

/// Extracts the response text from a [`ModelResponse`], trying each strategy
/// in order and returning the first non-empty result.
#[must_use]
pub fn extract_text(response: &ModelResponse) -> Option<String> {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(response).filter(|text| !text.is_empty()))
}

/// Strategy 1: `output[0].content[0].text`.
fn direct_output(response: &ModelResponse) -> Option<String> {
    response
        .output
        .as_ref()?
        .first()?
        .content
        .as_ref()?
        .first()?
        .text
        .clone()
}

/// Strategy 2: the aggregated `output_text` field.
fn aggregated_output(response: &ModelResponse) -> Option<String> {
    response.output_text.clone()
}

/// Strategy 3: `choices[0].message.content`.
fn chat_output(response: &ModelResponse) -> Option<String> {
    response
        .choices
        .as_ref()?
        .first()?
        .message
        .as_ref()?
        .content
        .clone()
}

fn first_choice_text(choices: Option<Vec<Choice>>) -> Option<String> {
    choices?.into_iter().next()?.message?.content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ModelResponse {
        serde_json::from_str(raw).expect("fixture should parse")
    }

    #[test]
    fn direct_output_shape_is_extracted() {
        let response = parse(r#"{"output": [{"content": [{"text": "hello"}]}]}"#);
        assert_eq!(extract_text(&response).as_deref(), Some("hello"));
    }

    #[test]
    fn aggregated_output_text_is_extracted() {
        let response = parse(r#"{"output_text": "aggregated"}"#);
        assert_eq!(extract_text(&response).as_deref(), Some("aggregated"));
    }

    #[test]
    fn chat_shape_is_extracted() {
        let response = parse(r#"{"choices": [{"message": {"content": "chatty"}}]}"#);
        assert_eq!(extract_text(&response).as_deref(), Some("chatty"));
    }

    #[test]
    fn direct_output_wins_over_aggregated_and_chat() {
        let response = parse(
            r#"{
                "output": [{"content": [{"text": "direct"}]}],
                "output_text": "aggregated",
                "choices": [{"message": {"content": "chatty"}}]
            }"#,
        );
        assert_eq!(extract_text(&response).as_deref(), Some("direct"));
    }

    #[test]
    fn aggregated_wins_over_chat_when_direct_is_absent() {
        let response = parse(
            r#"{
                "output_text": "aggregated",
                "choices": [{"message": {"content": "chatty"}}]
            }"#,
        );
        assert_eq!(extract_text(&response).as_deref(), Some("aggregated"));
    }

    #[test]
    fn empty_direct_text_falls_through_to_next_strategy() {
        let response = parse(
            r#"{
                "output": [{"content": [{"text": ""}]}],
                "output_text": "aggregated"
            }"#,
        );
        assert_eq!(extract_text(&response).as_deref(), Some("aggregated"));
    }

    #[test]
    fn malformed_output_list_falls_through_to_aggregated() {
        // `output` is present but carries no usable content part.
        let response = parse(r#"{"output": [{"content": []}], "output_text": "fallback"}"#);
        assert_eq!(extract_text(&response).as_deref(), Some("fallback"));
    }

    #[test]
    fn no_shape_yields_none() {
        let response = parse(r"{}");
        assert_eq!(extract_text(&response), None);
    }

    #[test]
    fn all_empty_yields_none() {
        let response = parse(r#"{"output_text": "", "choices": []}"#);
        assert_eq!(extract_text(&response), None);
    }
}
