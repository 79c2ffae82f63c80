//! Bundle.social collaborator client: image retrieval, media upload, and
//! post scheduling.

mod client;
mod error;
mod image;
mod types;

pub use client::BundleClient;
pub use error::BundleError;
pub use image::fetch_image;
pub use types::{PinterestData, PostData, SchedulePost};
