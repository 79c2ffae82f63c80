//! Request payloads for the Bundle.social post-scheduling endpoint.

use serde::Serialize;

/// A schedule-post request. One is submitted per target team per cycle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePost {
    pub team_id: String,
    pub title: String,
    /// UTC post date in RFC 3339 format.
    pub post_date: String,
    pub status: &'static str,
    pub social_account_types: [&'static str; 1],
    pub data: PostData,
}

#[derive(Debug, Serialize)]
pub struct PostData {
    #[serde(rename = "PINTEREST")]
    pub pinterest: PinterestData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinterestData {
    pub text: String,
    pub description: String,
    pub board_name: String,
    pub upload_ids: Vec<String>,
    pub link: String,
    pub alt_text: String,
    /// Comma-joined tag list.
    pub note: String,
}

impl SchedulePost {
    /// Builds a Pinterest schedule-post request in `SCHEDULED` status.
    #[must_use]
    pub fn pinterest(
        team_id: String,
        title: String,
        post_date: String,
        pinterest: PinterestData,
    ) -> Self {
        Self {
            team_id,
            title,
            post_date,
            status: "SCHEDULED",
            social_account_types: ["PINTEREST"],
            data: PostData { pinterest },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_post_serializes_with_expected_field_names() {
        let post = SchedulePost::pinterest(
            "h2nter".to_owned(),
            "Dreamy Sunset Lamp".to_owned(),
            "2026-08-08T13:00:00+00:00".to_owned(),
            PinterestData {
                text: "Dreamy Sunset Lamp".to_owned(),
                description: "Golden-hour vibes.".to_owned(),
                board_name: "Amazon Finds".to_owned(),
                upload_ids: vec!["upl_123".to_owned()],
                link: "http://www.amazon.com/dp/B0TEST123/ref=nosim?tag=h2nter-20".to_owned(),
                alt_text: "Dreamy Sunset Lamp".to_owned(),
                note: "Deal, Viral".to_owned(),
            },
        );

        let rendered = serde_json::to_value(&post).unwrap();
        assert_eq!(rendered["teamId"], "h2nter");
        assert_eq!(rendered["postDate"], "2026-08-08T13:00:00+00:00");
        assert_eq!(rendered["status"], "SCHEDULED");
        assert_eq!(rendered["socialAccountTypes"][0], "PINTEREST");
        assert_eq!(rendered["data"]["PINTEREST"]["boardName"], "Amazon Finds");
        assert_eq!(rendered["data"]["PINTEREST"]["uploadIds"][0], "upl_123");
        assert_eq!(rendered["data"]["PINTEREST"]["altText"], "Dreamy Sunset Lamp");
        assert_eq!(rendered["data"]["PINTEREST"]["note"], "Deal, Viral");
    }
}
