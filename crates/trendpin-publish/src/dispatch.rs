//! One publish cycle: resolve product and pin copy, then fan the post out to
//! every target team.

use chrono::Utc;
use chrono_tz::Tz;

use trendpin_bundle::{fetch_image, BundleClient, PinterestData, SchedulePost};
use trendpin_core::AppConfig;
use trendpin_gen::{generate_pin_content, ModelClient, ProductGenerator};

use crate::error::PublishError;

/// Seam between the scheduler and the publish pipeline, so the scheduling
/// loop can be exercised in tests with a recording stub instead of live
/// collaborators.
#[allow(async_fn_in_trait)]
pub trait Dispatch {
    /// Runs one full dispatch cycle for the given trigger time.
    async fn dispatch(&self, post_time: chrono::DateTime<Tz>) -> Result<(), PublishError>;
}

/// Production dispatcher backed by the generative model and Bundle.social.
pub struct Dispatcher<'a> {
    config: &'a AppConfig,
    model: &'a ModelClient,
    bundle: &'a BundleClient,
    /// Client used for image downloads; its transfer timeout is configured
    /// once at startup.
    image_client: reqwest::Client,
}

impl<'a> Dispatcher<'a> {
    #[must_use]
    pub fn new(
        config: &'a AppConfig,
        model: &'a ModelClient,
        bundle: &'a BundleClient,
        image_client: reqwest::Client,
    ) -> Self {
        Self {
            config,
            model,
            bundle,
            image_client,
        }
    }
}

impl Dispatch for Dispatcher<'_> {
    /// Generates content once, then stages the image and schedules a post for
    /// each target team in order.
    ///
    /// The effective post time is clamped to "now" so a trigger delayed by a
    /// slow earlier dispatch is never submitted with a past date.
    ///
    /// Per-target failures are not caught: the first error aborts the
    /// remaining targets and propagates to the scheduler.
    async fn dispatch(&self, post_time: chrono::DateTime<Tz>) -> Result<(), PublishError> {
        let now = Utc::now().with_timezone(&self.config.timezone);
        let post_date = post_time.max(now).with_timezone(&Utc).to_rfc3339();

        tracing::info!(post_date = %post_date, "dispatch: starting publish cycle");

        let product = ProductGenerator::new(self.model).generate_product().await?;
        let pin = generate_pin_content(self.model, &product).await?;

        tracing::info!(
            asin = %product.asin,
            title = %pin.title,
            tags = pin.tags.len(),
            "dispatch: content ready"
        );

        let link = format!(
            "http://www.amazon.com/dp/{}/ref=nosim?tag={}",
            product.asin, self.config.affiliate_tag
        );

        for team_id in &self.config.team_ids {
            let image = fetch_image(&self.image_client, &product.image_url).await?;
            let upload_id = self.bundle.upload_image(image).await?;

            let post = SchedulePost::pinterest(
                team_id.clone(),
                pin.title.clone(),
                post_date.clone(),
                PinterestData {
                    text: pin.title.clone(),
                    description: pin.description.clone(),
                    board_name: self.config.board_name.clone(),
                    upload_ids: vec![upload_id],
                    link: link.clone(),
                    alt_text: pin.title.clone(),
                    note: pin.tags.join(", "),
                },
            );

            self.bundle.schedule_post(&post).await.map_err(|e| {
                tracing::error!(team = %team_id, error = %e, "dispatch: schedule-post failed");
                e
            })?;

            tracing::info!(team = %team_id, "dispatch: post scheduled");
        }

        Ok(())
    }
}
