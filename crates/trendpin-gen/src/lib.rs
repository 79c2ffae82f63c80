//! Generative-model pipeline: trending-product discovery with a bounded
//! retry-validated loop, and single-shot pin-copy generation.

mod client;
mod error;
mod extract;
mod pin;
mod product;

pub use client::ModelClient;
pub use error::GenError;
pub use extract::{extract_text, ModelResponse};
pub use pin::{clean_tags, generate_pin_content};
pub use product::{ProductGenerator, MAX_ATTEMPTS};
