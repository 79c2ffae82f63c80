use chrono_tz::Tz;

/// Immutable application configuration, built once at startup and passed by
/// reference into the scheduler. There are no ambient globals; everything the
/// pipeline needs to reach its collaborators lives here.
#[derive(Clone)]
pub struct AppConfig {
    /// API key for the generative model service.
    pub openai_api_key: String,
    /// API key for the Bundle.social posting service.
    pub bundle_api_key: String,
    /// Bundle.social team ids to publish to, in posting order.
    pub team_ids: Vec<String>,
    /// Pinterest board name posts are filed under.
    pub board_name: String,
    /// Generative model identifier.
    pub model: String,
    /// Base URL of the generative model API.
    pub openai_base_url: String,
    /// Base URL of the Bundle.social API.
    pub bundle_base_url: String,
    /// Time zone the daily trigger times are evaluated in.
    pub timezone: Tz,
    /// Amazon affiliate tracking tag embedded in post links.
    pub affiliate_tag: String,
    pub image_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"[redacted]")
            .field("bundle_api_key", &"[redacted]")
            .field("team_ids", &self.team_ids)
            .field("board_name", &self.board_name)
            .field("model", &self.model)
            .field("openai_base_url", &self.openai_base_url)
            .field("bundle_base_url", &self.bundle_base_url)
            .field("timezone", &self.timezone)
            .field("affiliate_tag", &self.affiliate_tag)
            .field("image_timeout_secs", &self.image_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
