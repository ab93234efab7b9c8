use crate::{controller::PlayerConfiguration, utils::url::Url};
use serde::Deserialize;
use thiserror::Error;

/// Metadata of a processed video, as stored by the metadata service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(alias = "videoDuration")]
    pub duration_seconds: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl VideoRecord {
    /// Parse a `VideoRecord` from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, VideoRecordError> {
        let record: VideoRecord =
            serde_json::from_str(json).map_err(|e| VideoRecordError::Parsing {
                message: e.to_string(),
            })?;
        if !record.duration_seconds.is_finite() || record.duration_seconds < 0. {
            return Err(VideoRecordError::InvalidDuration {
                duration: record.duration_seconds,
            });
        }
        Ok(record)
    }

    /// Derive the URL of the manifest of that video: `{domain}/{id}/{id}.{extension}`.
    pub fn manifest_url(&self, config: &PlayerConfiguration) -> Result<Url, VideoRecordError> {
        let domain = config
            .delivery_base_domain
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .ok_or(VideoRecordError::MissingDeliveryDomain)?;
        let id = self.id.trim();
        if id.is_empty() || id.contains(['/', '?', '#']) {
            return Err(VideoRecordError::InvalidId {
                id: self.id.clone(),
            });
        }
        let filename = format!("{id}.{}", config.manifest_extension);
        Ok(Url::from_base_and_segments(
            domain.trim(),
            &config.default_scheme,
            &[id, &filename],
        ))
    }
}

/// Error encountered when turning a `VideoRecord` into a manifest URL.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VideoRecordError {
    #[error("Invalid video record: {message}")]
    Parsing { message: String },
    #[error("Invalid video id `{id}`")]
    InvalidId { id: String },
    #[error("Invalid video duration: {duration}")]
    InvalidDuration { duration: f64 },
    #[error("The delivery domain of processed videos is not set")]
    MissingDeliveryDomain,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORD: &str = r#"{
        "id": "a1b2",
        "title": "My trip",
        "description": "Some mountains",
        "durationSeconds": 93.5
    }"#;

    #[test]
    fn test_from_json() {
        let record = VideoRecord::from_json(RECORD).unwrap();
        assert_eq!(record.id, "a1b2");
        assert_eq!(record.title, "My trip");
        assert_eq!(record.duration_seconds, 93.5);
        assert_eq!(record.user_id, None);

        let record = VideoRecord::from_json(
            r#"{"id":"x","title":"t","description":"d","videoDuration":4,
                "createdAt":"2024-01-01T00:00:00.000Z","userId":"u1"}"#,
        )
        .unwrap();
        assert_eq!(record.duration_seconds, 4.);
        assert_eq!(record.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            VideoRecord::from_json(r#"{"id":"x"}"#),
            Err(VideoRecordError::Parsing { .. })
        ));
        assert!(matches!(
            VideoRecord::from_json("not json"),
            Err(VideoRecordError::Parsing { .. })
        ));
        assert_eq!(
            VideoRecord::from_json(
                r#"{"id":"x","title":"t","description":"d","durationSeconds":-1}"#
            ),
            Err(VideoRecordError::InvalidDuration { duration: -1. })
        );
    }

    #[test]
    fn test_manifest_url() {
        let record = VideoRecord::from_json(RECORD).unwrap();
        let config = PlayerConfiguration::default().with_delivery_base_domain("cdn.example.com");
        assert_eq!(
            record.manifest_url(&config).unwrap().get_ref(),
            "https://cdn.example.com/a1b2/a1b2.m3u8"
        );

        let mut config = config.with_delivery_base_domain("http://localhost:8080/");
        config.manifest_extension = "mpd".to_owned();
        assert_eq!(
            record.manifest_url(&config).unwrap().get_ref(),
            "http://localhost:8080/a1b2/a1b2.mpd"
        );
    }

    #[test]
    fn test_manifest_url_errors() {
        let record = VideoRecord::from_json(RECORD).unwrap();
        assert_eq!(
            record.manifest_url(&PlayerConfiguration::default()),
            Err(VideoRecordError::MissingDeliveryDomain)
        );
        let config = PlayerConfiguration::default().with_delivery_base_domain("  ");
        assert_eq!(
            record.manifest_url(&config),
            Err(VideoRecordError::MissingDeliveryDomain)
        );

        let config = PlayerConfiguration::default().with_delivery_base_domain("cdn.example.com");
        let mut record = record;
        record.id = "../etc".to_owned();
        assert!(matches!(
            record.manifest_url(&config),
            Err(VideoRecordError::InvalidId { .. })
        ));
        record.id = String::new();
        assert!(matches!(
            record.manifest_url(&config),
            Err(VideoRecordError::InvalidId { .. })
        ));
    }
}
