use serde::{Deserialize, Serialize};

/// A trending Amazon product selected for the current publish cycle.
///
/// All four fields are validated non-empty and whitespace-trimmed before an
/// instance is constructed. Produced fresh once per cycle and discarded after
/// dispatch; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Amazon Standard Identification Number.
    pub asin: String,
    /// Direct link to the product image.
    pub image_url: String,
    /// Product listing title.
    pub title: String,
    /// "About this item" text from the listing.
    pub about: String,
}

/// Pinterest pin copy derived from a [`ProductInfo`].
///
/// Title and description are trimmed; tags are trimmed with empties dropped,
/// original order preserved. An empty tag list is legal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinContent {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}
