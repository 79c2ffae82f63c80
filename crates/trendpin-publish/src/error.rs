use thiserror::Error;

use trendpin_bundle::BundleError;
use trendpin_gen::GenError;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("generation error: {0}")]
    Gen(#[from] GenError),

    #[error("posting error: {0}")]
    Bundle(#[from] BundleError),
}
