//! Single-shot generation of Pinterest pin copy from validated product data.
//!
//! Unlike product generation this stage does not retry: one conversational
//! call, one strict JSON parse, fail fast on anything unusable.

use serde::Deserialize;

use trendpin_core::{PinContent, ProductInfo};

use crate::client::ModelClient;
use crate::error::GenError;

/// Pin payload as returned by the model. Missing keys degrade to empty
/// values; only an unparseable or non-object payload is an error.
#[derive(Debug, Deserialize)]
struct PinDraft {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Generates pin title, description, and tags for a product.
///
/// # Errors
///
/// - [`GenError::Http`] / [`GenError::Api`] / [`GenError::MissingContent`] if
///   the conversational call fails.
/// - [`GenError::MalformedPin`] if the returned text is not a JSON object.
///   There is no retry at this stage.
pub async fn generate_pin_content(
    client: &ModelClient,
    product: &ProductInfo,
) -> Result<PinContent, GenError> {
    let prompt = format!(
        "Create a viral, keyword-rich (high search-volume) Pinterest pin title, description, \
         and 10 tagged topics for the product below. Return ONLY JSON with keys: 'title' \
         (string), 'description' (string), and 'tags' (array of strings).\n\
         Product title: {}\n\
         About this item: {}",
        product.title, product.about
    );

    let raw_text = client.complete(&prompt).await?;

    let draft: PinDraft = serde_json::from_str(&raw_text).map_err(|e| GenError::MalformedPin {
        reason: e.to_string(),
        raw_text: raw_text.clone(),
    })?;

    Ok(PinContent {
        title: draft.title.trim().to_owned(),
        description: draft.description.trim().to_owned(),
        tags: clean_tags(draft.tags),
    })
}

/// Trims tags and drops empties, preserving the original order.
#[must_use]
pub fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_tags_trims_and_drops_empties_preserving_order() {
        let tags = vec![
            "  ".to_owned(),
            "Deal".to_owned(),
            String::new(),
            " Viral ".to_owned(),
        ];
        assert_eq!(clean_tags(tags), vec!["Deal", "Viral"]);
    }

    #[test]
    fn clean_tags_empty_input_is_legal() {
        assert!(clean_tags(Vec::new()).is_empty());
    }

    #[test]
    fn pin_draft_missing_keys_degrade_to_empty_values() {
        let draft: PinDraft = serde_json::from_str(r#"{"title": "Cozy Lamp"}"#).unwrap();
        assert_eq!(draft.title, "Cozy Lamp");
        assert_eq!(draft.description, "");
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn pin_draft_rejects_non_object_payload() {
        assert!(serde_json::from_str::<PinDraft>(r#"["not", "an", "object"]"#).is_err());
    }
}
